//! Scripted chat widget.
//!
//! [`ChatSession`] owns the panel state, the transcript and the queue of
//! pending replies. Rendering goes through [`ChatView`]; delays and reply
//! choice come from a [`ReplyStrategy`]. Timers stay with the caller: a
//! successful [`ChatSession::submit`] returns the delay after which
//! [`ChatSession::reply_ready`] should be called.
//!
//! Several replies may be in flight at once. Each one owns a typing
//! placeholder, and whichever reply fires first removes the oldest one.
//! While the panel is closed nothing is drawn: entries committed in the
//! meantime are rendered the next time it opens.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ChatConfig;
use crate::error::InteractionError;

pub const TOGGLE_ID: &str = "chat-toggle";
pub const PANEL_ID: &str = "chat-box";
pub const CLOSE_ID: &str = "chat-close";
pub const FORM_ID: &str = "chat-form";
pub const INPUT_ID: &str = "chat-input-field";
pub const MESSAGES_ID: &str = "chat-messages";

/// Class that hides the panel while closed.
pub const PANEL_HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
}

impl Author {
    pub fn css_class(self) -> &'static str {
        match self {
            Author::User => "user",
            Author::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub text: String,
    pub author: Author,
    /// Position in the transcript, starting at zero.
    pub rendered_at: usize,
}

/// Append-only message log.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    fn push(&mut self, text: String, author: Author) {
        let rendered_at = self.entries.len();
        self.entries.push(TranscriptEntry {
            text,
            author,
            rendered_at,
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Optional controls present on the page. The toggle, the panel and the
/// message list are required; a missing optional control only disables the
/// feature it drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChatControls {
    pub close_button: bool,
    pub form: bool,
    pub input: bool,
}

impl ChatControls {
    pub fn can_close(self) -> bool {
        self.close_button
    }

    /// Submitting needs both the form and the field it reads from.
    pub fn accepts_messages(self) -> bool {
        self.form && self.input
    }

    pub fn resizes_input(self) -> bool {
        self.input
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceholderId(u64);

impl fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reply the caller must deliver by calling `reply_ready` after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledReply {
    pub placeholder: PlaceholderId,
    pub delay: Duration,
}

#[cfg_attr(test, automock)]
pub trait ChatView {
    fn show_panel(&self, open: bool);
    fn focus_input(&self);
    fn clear_input(&self);
    fn append_entry(&self, entry: &TranscriptEntry);
    fn show_typing(&self, placeholder: PlaceholderId);
    fn remove_typing(&self, placeholder: PlaceholderId);
    fn scroll_to_end(&self);
}

/// Source of reply timing and reply choice.
#[cfg_attr(test, automock)]
pub trait ReplyStrategy {
    /// Delay in `[base, base + jitter)`, or exactly `base` without jitter.
    fn reply_delay(&mut self, base: Duration, jitter: Duration) -> Duration;
    /// Index into a response set of `count` entries; `count` is never zero.
    fn pick_response(&mut self, count: usize) -> usize;
}

/// Uniformly random delays and replies.
#[derive(Debug)]
pub struct RandomReplies<R> {
    rng: R,
}

impl<R: Rng> RandomReplies<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomReplies<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ReplyStrategy for RandomReplies<R> {
    fn reply_delay(&mut self, base: Duration, jitter: Duration) -> Duration {
        let jitter_ms = u64::try_from(jitter.as_millis()).unwrap_or(u64::MAX);
        if jitter_ms == 0 {
            return base;
        }
        base + Duration::from_millis(self.rng.gen_range(0..jitter_ms))
    }

    fn pick_response(&mut self, count: usize) -> usize {
        self.rng.gen_range(0..count)
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingReply {
    placeholder: PlaceholderId,
    shown: bool,
}

pub struct ChatSession<V, S> {
    view: V,
    strategy: S,
    responses: Vec<String>,
    reply_base: Duration,
    reply_jitter: Duration,
    panel: PanelState,
    transcript: Transcript,
    // Entries before this index are already in the view.
    rendered: usize,
    pending: VecDeque<PendingReply>,
    next_placeholder: u64,
}

impl<V: ChatView, S: ReplyStrategy> ChatSession<V, S> {
    /// Starts closed with an empty transcript. Blank responses are dropped.
    pub fn new(config: &ChatConfig, view: V, strategy: S) -> Result<Self, InteractionError> {
        let responses: Vec<String> = config
            .responses
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();
        if responses.is_empty() {
            return Err(InteractionError::InvalidConfig(
                "chat needs at least one non-blank response".to_string(),
            ));
        }

        Ok(Self {
            view,
            strategy,
            responses,
            reply_base: config.reply_base(),
            reply_jitter: config.reply_jitter(),
            panel: PanelState::Closed,
            transcript: Transcript::default(),
            rendered: 0,
            pending: VecDeque::new(),
            next_placeholder: 0,
        })
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn is_open(&self) -> bool {
        self.panel == PanelState::Open
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_awaiting_reply(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    /// Placeholders currently drawn in the view, oldest first.
    pub fn visible_placeholders(&self) -> Vec<PlaceholderId> {
        self.pending
            .iter()
            .filter(|p| p.shown)
            .map(|p| p.placeholder)
            .collect()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn toggle(&mut self) -> PanelState {
        match self.panel {
            PanelState::Closed => self.open(),
            PanelState::Open => self.close(),
        }
        self.panel
    }

    /// Forces the panel closed. Pending replies keep running, but their
    /// placeholders leave the view until it opens again.
    pub fn close(&mut self) {
        self.panel = PanelState::Closed;
        for pending in self.pending.iter_mut().filter(|p| p.shown) {
            self.view.remove_typing(pending.placeholder);
            pending.shown = false;
        }
        self.view.show_panel(false);
    }

    fn open(&mut self) {
        self.panel = PanelState::Open;
        self.view.show_panel(true);
        self.sync_view();
        self.view.focus_input();
    }

    /// Commits a user message and schedules the bot's answer.
    ///
    /// Returns `None` for blank input, which leaves everything untouched.
    pub fn submit(&mut self, raw: &str) -> Option<ScheduledReply> {
        let text = raw.trim();
        if text.is_empty() {
            log::debug!("Ignoring blank chat submission");
            return None;
        }

        self.transcript.push(text.to_string(), Author::User);
        self.view.clear_input();

        let placeholder = PlaceholderId(self.next_placeholder);
        self.next_placeholder += 1;
        self.pending.push_back(PendingReply {
            placeholder,
            shown: false,
        });
        self.sync_view();

        let delay = self.strategy.reply_delay(self.reply_base, self.reply_jitter);
        log::debug!("Chat reply {} scheduled in {:?}", placeholder, delay);
        Some(ScheduledReply { placeholder, delay })
    }

    /// Resolves the oldest pending reply with a canned response.
    pub fn reply_ready(&mut self) -> Option<&TranscriptEntry> {
        let Some(pending) = self.pending.pop_front() else {
            log::warn!("Chat reply fired with nothing pending");
            return None;
        };
        if pending.shown {
            self.view.remove_typing(pending.placeholder);
        }

        let index = self.strategy.pick_response(self.responses.len()) % self.responses.len();
        let text = self.responses[index].clone();
        self.transcript.push(text, Author::Bot);
        self.sync_view();
        self.transcript.last()
    }

    /// Draws whatever the view is missing, if the panel is open.
    fn sync_view(&mut self) {
        if self.panel == PanelState::Closed {
            return;
        }

        let mut changed = false;
        for entry in &self.transcript.entries[self.rendered..] {
            self.view.append_entry(entry);
            changed = true;
        }
        self.rendered = self.transcript.len();

        for pending in self.pending.iter_mut().filter(|p| !p.shown) {
            self.view.show_typing(pending.placeholder);
            pending.shown = true;
            changed = true;
        }

        if changed {
            self.view.scroll_to_end();
        }
    }
}

impl<V, S> fmt::Debug for ChatSession<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSession")
            .field("panel", &self.panel)
            .field("entries", &self.transcript.len())
            .field("rendered", &self.rendered)
            .field("pending", &self.pending.len())
            .finish()
    }
}

/// Height for the auto-growing input, given its content height after a
/// reset to the base height.
pub fn input_height(config: &ChatConfig, scroll_height: f64) -> f64 {
    scroll_height
        .max(config.input_base_height_px)
        .min(config.input_max_height_px)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn strategy(delay_ms: u64, pick: usize) -> MockReplyStrategy {
        let mut strategy = MockReplyStrategy::new();
        strategy
            .expect_reply_delay()
            .returning(move |base, _| base + Duration::from_millis(delay_ms));
        strategy.expect_pick_response().returning(move |_| pick);
        strategy
    }

    fn quiet_view() -> MockChatView {
        let mut view = MockChatView::new();
        view.expect_show_panel().return_const(());
        view.expect_focus_input().return_const(());
        view.expect_clear_input().return_const(());
        view.expect_append_entry().return_const(());
        view.expect_show_typing().return_const(());
        view.expect_remove_typing().return_const(());
        view.expect_scroll_to_end().return_const(());
        view
    }

    #[test]
    fn opening_shows_panel_then_focuses_input() {
        let mut seq = Sequence::new();
        let mut view = MockChatView::new();
        view.expect_show_panel()
            .with(eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        view.expect_focus_input()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut session =
            ChatSession::new(&ChatConfig::default(), view, strategy(0, 0)).unwrap();
        assert_eq!(session.toggle(), PanelState::Open);
    }

    #[test]
    fn toggle_twice_returns_to_closed() {
        let mut session =
            ChatSession::new(&ChatConfig::default(), quiet_view(), strategy(0, 0)).unwrap();
        session.toggle();
        assert_eq!(session.toggle(), PanelState::Closed);
    }

    #[test]
    fn closing_a_closed_panel_changes_nothing() {
        let mut view = MockChatView::new();
        view.expect_show_panel()
            .with(eq(false))
            .times(1)
            .return_const(());
        view.expect_remove_typing().never();

        let mut session =
            ChatSession::new(&ChatConfig::default(), view, strategy(0, 0)).unwrap();
        session.close();
        assert_eq!(session.panel(), PanelState::Closed);
    }

    #[test]
    fn submit_renders_entry_then_placeholder() {
        let mut seq = Sequence::new();
        let mut view = MockChatView::new();
        view.expect_show_panel().return_const(());
        view.expect_focus_input().return_const(());
        view.expect_scroll_to_end().return_const(());
        view.expect_clear_input()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        view.expect_append_entry()
            .withf(|entry| entry.author == Author::User && entry.text == "hello")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        view.expect_show_typing()
            .with(eq(PlaceholderId(0)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut session =
            ChatSession::new(&ChatConfig::default(), view, strategy(300, 0)).unwrap();
        session.toggle();
        let reply = session.submit("  hello \n").unwrap();

        assert_eq!(reply.placeholder, PlaceholderId(0));
        assert_eq!(reply.delay, Duration::from_millis(1500));
        assert!(session.is_awaiting_reply());
    }

    #[test]
    fn blank_submission_is_discarded() {
        let mut view = MockChatView::new();
        view.expect_show_panel().return_const(());
        view.expect_focus_input().return_const(());
        view.expect_scroll_to_end().return_const(());
        view.expect_clear_input().never();
        view.expect_append_entry().never();
        view.expect_show_typing().never();

        let mut strategy = MockReplyStrategy::new();
        strategy.expect_reply_delay().never();

        let mut session = ChatSession::new(&ChatConfig::default(), view, strategy).unwrap();
        session.toggle();
        assert_eq!(session.submit(""), None);
        assert_eq!(session.submit(" \t\n "), None);
        assert!(session.transcript().is_empty());
        assert!(!session.is_awaiting_reply());
    }

    #[test]
    fn reply_replaces_placeholder_with_canned_text() {
        let mut session =
            ChatSession::new(&ChatConfig::default(), quiet_view(), strategy(0, 4)).unwrap();
        session.toggle();
        session.submit("Tell me about pricing");

        let reply = session.reply_ready().cloned().unwrap();
        assert_eq!(reply.author, Author::Bot);
        assert_eq!(reply.text, crate::config::DEFAULT_RESPONSES[4]);
        assert_eq!(reply.rendered_at, 1);
        assert!(!session.is_awaiting_reply());
        assert!(session.visible_placeholders().is_empty());
    }

    #[test]
    fn overlapping_replies_resolve_oldest_placeholder_first() {
        let mut seq = Sequence::new();
        let mut view = MockChatView::new();
        view.expect_show_panel().return_const(());
        view.expect_focus_input().return_const(());
        view.expect_clear_input().return_const(());
        view.expect_append_entry().return_const(());
        view.expect_show_typing().return_const(());
        view.expect_scroll_to_end().return_const(());
        view.expect_remove_typing()
            .with(eq(PlaceholderId(0)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        view.expect_remove_typing()
            .with(eq(PlaceholderId(1)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut session =
            ChatSession::new(&ChatConfig::default(), view, strategy(0, 0)).unwrap();
        session.toggle();
        session.submit("first");
        session.submit("second");
        assert_eq!(session.visible_placeholders(), vec![PlaceholderId(0), PlaceholderId(1)]);

        session.reply_ready();
        assert_eq!(session.visible_placeholders(), vec![PlaceholderId(1)]);
        session.reply_ready();
        assert!(session.visible_placeholders().is_empty());
        assert_eq!(session.reply_ready(), None);
    }

    #[test]
    fn reply_while_closed_waits_for_reopen() {
        let mut session =
            ChatSession::new(&ChatConfig::default(), quiet_view(), strategy(0, 1)).unwrap();
        session.toggle();
        session.submit("are you there?");
        session.close();
        assert!(session.visible_placeholders().is_empty());
        assert_eq!(session.pending_replies(), 1);

        session.reply_ready();
        assert_eq!(session.panel(), PanelState::Closed);
        assert_eq!(session.transcript().len(), 2);

        session.toggle();
        assert_eq!(session.rendered, 2);
    }

    #[test]
    fn reopening_redraws_pending_placeholders() {
        let mut session =
            ChatSession::new(&ChatConfig::default(), quiet_view(), strategy(0, 0)).unwrap();
        session.toggle();
        session.submit("one");
        session.close();
        session.toggle();
        assert_eq!(session.visible_placeholders(), vec![PlaceholderId(0)]);
    }

    #[test]
    fn out_of_range_pick_wraps_into_response_set() {
        let mut session =
            ChatSession::new(&ChatConfig::default(), quiet_view(), strategy(0, 12)).unwrap();
        session.submit("hi");
        let reply = session.reply_ready().unwrap();
        assert_eq!(reply.text, crate::config::DEFAULT_RESPONSES[2]);
    }

    #[test]
    fn blank_responses_are_rejected() {
        let config = ChatConfig {
            responses: vec!["   ".to_string()],
            ..ChatConfig::default()
        };
        assert!(ChatSession::new(&config, quiet_view(), strategy(0, 0)).is_err());
    }

    #[test]
    fn random_delay_stays_in_window() {
        let mut replies = RandomReplies::new(StdRng::seed_from_u64(7));
        let base = Duration::from_millis(1200);
        let jitter = Duration::from_millis(800);
        for _ in 0..200 {
            let delay = replies.reply_delay(base, jitter);
            assert!(delay >= base && delay < base + jitter, "delay {:?}", delay);
        }
        assert_eq!(replies.reply_delay(base, Duration::ZERO), base);
    }

    #[test]
    fn random_pick_covers_every_response() {
        let mut replies = RandomReplies::new(StdRng::seed_from_u64(11));
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[replies.pick_response(5)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn missing_controls_only_disable_their_own_feature() {
        let no_close = ChatControls {
            close_button: false,
            form: true,
            input: true,
        };
        assert!(!no_close.can_close());
        assert!(no_close.accepts_messages());

        let no_input = ChatControls {
            close_button: true,
            form: true,
            input: false,
        };
        assert!(no_input.can_close());
        assert!(!no_input.accepts_messages());
        assert!(!no_input.resizes_input());

        assert!(!ChatControls::default().accepts_messages());
    }

    #[test]
    fn input_height_is_clamped() {
        let config = ChatConfig::default();
        assert_eq!(input_height(&config, 20.0), 44.0);
        assert_eq!(input_height(&config, 72.0), 72.0);
        assert_eq!(input_height(&config, 240.0), 100.0);
    }
}
