use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use interactions::chat::{
    Author, ChatSession, ChatView, PanelState, PlaceholderId, RandomReplies, ReplyStrategy,
    TranscriptEntry,
};
use interactions::config::{ChatConfig, DEFAULT_RESPONSES};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Panel(bool),
    Focus,
    Clear,
    Append(Author, String),
    Typing(PlaceholderId),
    Untyping(PlaceholderId),
    Scroll,
}

/// Records view calls and mirrors what a DOM transcript would contain.
#[derive(Clone, Default)]
struct RecordingView {
    ops: Rc<RefCell<Vec<Op>>>,
}

impl RecordingView {
    fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    fn rows(&self) -> Vec<String> {
        let mut rows: Vec<String> = Vec::new();
        for op in self.ops.borrow().iter() {
            match op {
                Op::Append(author, text) => rows.push(format!("{}:{}", author.css_class(), text)),
                Op::Typing(id) => rows.push(format!("typing:{}", id)),
                Op::Untyping(id) => rows.retain(|r| r != &format!("typing:{}", id)),
                _ => {}
            }
        }
        rows
    }

    fn placeholders(&self) -> usize {
        self.rows().iter().filter(|r| r.starts_with("typing:")).count()
    }
}

impl ChatView for RecordingView {
    fn show_panel(&self, open: bool) {
        self.ops.borrow_mut().push(Op::Panel(open));
    }
    fn focus_input(&self) {
        self.ops.borrow_mut().push(Op::Focus);
    }
    fn clear_input(&self) {
        self.ops.borrow_mut().push(Op::Clear);
    }
    fn append_entry(&self, entry: &TranscriptEntry) {
        self.ops
            .borrow_mut()
            .push(Op::Append(entry.author, entry.text.clone()));
    }
    fn show_typing(&self, placeholder: PlaceholderId) {
        self.ops.borrow_mut().push(Op::Typing(placeholder));
    }
    fn remove_typing(&self, placeholder: PlaceholderId) {
        self.ops.borrow_mut().push(Op::Untyping(placeholder));
    }
    fn scroll_to_end(&self) {
        self.ops.borrow_mut().push(Op::Scroll);
    }
}

/// Plays back fixed jitter and reply picks.
struct Scripted {
    jitter_ms: VecDeque<u64>,
    picks: VecDeque<usize>,
}

impl Scripted {
    fn new(jitter_ms: &[u64], picks: &[usize]) -> Self {
        Self {
            jitter_ms: jitter_ms.iter().copied().collect(),
            picks: picks.iter().copied().collect(),
        }
    }
}

impl ReplyStrategy for Scripted {
    fn reply_delay(&mut self, base: Duration, _jitter: Duration) -> Duration {
        base + Duration::from_millis(self.jitter_ms.pop_front().unwrap_or(0))
    }

    fn pick_response(&mut self, _count: usize) -> usize {
        self.picks.pop_front().unwrap_or(0)
    }
}

fn session(strategy: Scripted) -> (ChatSession<RecordingView, Scripted>, RecordingView) {
    let view = RecordingView::default();
    let session = ChatSession::new(&ChatConfig::default(), view.clone(), strategy).unwrap();
    (session, view)
}

#[test]
fn hello_exchange() {
    let (mut chat, view) = session(Scripted::new(&[500], &[0]));
    chat.toggle();

    let reply = chat.submit("hello").unwrap();
    assert_eq!(reply.delay, Duration::from_millis(1700));
    assert_eq!(view.rows(), vec!["user:hello".to_string(), "typing:0".to_string()]);

    chat.reply_ready();
    assert_eq!(
        view.rows(),
        vec![
            "user:hello".to_string(),
            format!("bot:{}", DEFAULT_RESPONSES[0]),
        ]
    );
    let texts: Vec<_> = chat
        .transcript()
        .entries()
        .iter()
        .map(|e| (e.author, e.text.as_str()))
        .collect();
    assert_eq!(texts, vec![(Author::User, "hello"), (Author::Bot, DEFAULT_RESPONSES[0])]);
}

#[test]
fn pricing_question_gets_canned_answer_within_window() {
    let view = RecordingView::default();
    let config = ChatConfig::default();
    let mut chat = ChatSession::new(
        &config,
        view.clone(),
        RandomReplies::new(StdRng::seed_from_u64(2024)),
    )
    .unwrap();

    chat.toggle();
    assert_eq!(view.ops()[..2], [Op::Panel(true), Op::Focus]);

    let reply = chat.submit("Tell me about pricing").unwrap();
    assert_eq!(view.rows()[0], "user:Tell me about pricing");
    assert!(reply.delay >= config.reply_base());
    assert!(reply.delay < config.reply_base() + config.reply_jitter());

    let bot = chat.reply_ready().cloned().unwrap();
    assert_eq!(bot.author, Author::Bot);
    assert!(DEFAULT_RESPONSES.contains(&bot.text.as_str()));
}

#[test]
fn every_mutation_scrolls_to_end() {
    let (mut chat, view) = session(Scripted::new(&[], &[]));
    chat.toggle();
    chat.submit("one");
    chat.reply_ready();

    let ops = view.ops();
    let after_append = ops
        .iter()
        .enumerate()
        .filter(|(_, op)| matches!(op, Op::Append(..)))
        .all(|(i, _)| ops[i..].contains(&Op::Scroll));
    assert!(after_append);
    assert_eq!(ops.last(), Some(&Op::Scroll));
}

#[test]
fn serialized_exchanges_never_show_two_placeholders() {
    let (mut chat, view) = session(Scripted::new(&[], &[1, 2, 3]));
    chat.toggle();
    for message in ["a", "b", "c"] {
        chat.submit(message);
        assert_eq!(view.placeholders(), 1);
        chat.reply_ready();
        assert_eq!(view.placeholders(), 0);
    }
    assert_eq!(chat.transcript().len(), 6);
    let typed = view.ops().iter().filter(|op| matches!(op, Op::Typing(_))).count();
    let removed = view.ops().iter().filter(|op| matches!(op, Op::Untyping(_))).count();
    assert_eq!((typed, removed), (3, 3));
}

#[test]
fn trimmed_text_is_committed_and_blank_ignored() {
    let (mut chat, _view) = session(Scripted::new(&[], &[]));
    chat.toggle();
    assert!(chat.submit("   ").is_none());
    assert!(chat.submit("\n\t hi there \n").is_some());
    assert_eq!(chat.transcript().entries()[0].text, "hi there");
    assert_eq!(chat.transcript().len(), 1);
}

#[test]
fn closing_mid_reply_keeps_view_untouched_until_reopen() {
    let (mut chat, view) = session(Scripted::new(&[], &[3]));
    chat.toggle();
    chat.submit("still there?");
    chat.close();
    assert_eq!(view.placeholders(), 0);

    let before = view.ops().len();
    chat.reply_ready();
    assert_eq!(view.ops().len(), before, "closed panel must not be drawn into");
    assert_eq!(chat.panel(), PanelState::Closed);

    chat.toggle();
    assert_eq!(
        view.rows(),
        vec![
            "user:still there?".to_string(),
            format!("bot:{}", DEFAULT_RESPONSES[3]),
        ]
    );
}
