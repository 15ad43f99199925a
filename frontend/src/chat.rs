use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use interactions::chat::{
    self, Author, ChatControls, ChatSession, ChatView, PlaceholderId, RandomReplies, ScheduledReply,
    TranscriptEntry, CLOSE_ID, FORM_ID, INPUT_ID, MESSAGES_ID, PANEL_HIDDEN_CLASS, PANEL_ID,
    TOGGLE_ID,
};
use interactions::config::ChatConfig;
use interactions::styles::TYPING_STYLE;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::dom;
use crate::error::FrontendError;

const BOT_AVATAR: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none"><path d="M12 2C12 8 16 12 22 12C16 12 12 16 12 22C12 16 8 12 2 12C8 12 12 8 12 2Z" stroke="currentColor" stroke-width="2"/></svg>"#;

const TYPING_DOTS: &str = r#"<p style="display: flex; gap: 4px; padding: 12px 16px;"><span class="typing-dot" style="width: 8px; height: 8px; background: var(--color-text-muted); border-radius: 50%; animation: typingBounce 1.4s ease-in-out infinite;"></span><span class="typing-dot" style="width: 8px; height: 8px; background: var(--color-text-muted); border-radius: 50%; animation: typingBounce 1.4s ease-in-out 0.2s infinite;"></span><span class="typing-dot" style="width: 8px; height: 8px; background: var(--color-text-muted); border-radius: 50%; animation: typingBounce 1.4s ease-in-out 0.4s infinite;"></span></p>"#;

const PLACEHOLDER_ATTR: &str = "data-placeholder";

type Session = Rc<RefCell<ChatSession<DomChatView, RandomReplies<StdRng>>>>;

/// The page may use either a textarea or a single-line input for the message.
enum ChatInput {
    Area(HtmlTextAreaElement),
    Line(HtmlInputElement),
}

impl ChatInput {
    fn lookup() -> Result<Self, FrontendError> {
        let element: HtmlElement = dom::by_id(INPUT_ID)?;
        match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(area) => Ok(ChatInput::Area(area)),
            Err(element) => element
                .dyn_into::<HtmlInputElement>()
                .map(ChatInput::Line)
                .map_err(|_| FrontendError::UnexpectedElement(format!("#{}", INPUT_ID))),
        }
    }

    fn element(&self) -> &HtmlElement {
        match self {
            ChatInput::Area(area) => area,
            ChatInput::Line(line) => line,
        }
    }

    fn value(&self) -> String {
        match self {
            ChatInput::Area(area) => area.value(),
            ChatInput::Line(line) => line.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            ChatInput::Area(area) => area.set_value(value),
            ChatInput::Line(line) => line.set_value(value),
        }
    }
}

/// Renders the chat session into `#chat-box`.
struct DomChatView {
    panel: HtmlElement,
    input: Option<ChatInput>,
    messages: HtmlElement,
}

impl DomChatView {
    fn lookup() -> Result<Self, FrontendError> {
        Ok(Self {
            panel: dom::by_id(PANEL_ID)?,
            input: ChatInput::lookup()
                .map_err(|e| log::debug!("Chat input unavailable: {}", e))
                .ok(),
            messages: dom::by_id(MESSAGES_ID)?,
        })
    }

    fn input_value(&self) -> Option<String> {
        self.input.as_ref().map(ChatInput::value)
    }

    fn message_row(&self, class: &str) -> Result<Element, FrontendError> {
        let document = dom::document()?;
        let row = document.create_element("div")?;
        row.set_class_name(class);
        Ok(row)
    }

    fn avatar(&self) -> Result<Element, FrontendError> {
        let avatar = dom::document()?.create_element("div")?;
        avatar.set_class_name("message-avatar");
        avatar.set_inner_html(BOT_AVATAR);
        Ok(avatar)
    }

    fn render_entry(&self, entry: &TranscriptEntry) -> Result<(), FrontendError> {
        let document = dom::document()?;
        let row = self.message_row(&format!("message {}", entry.author.css_class()))?;
        if entry.author == Author::Bot {
            let avatar = self.avatar()?;
            row.append_child(&avatar)?;
        }

        let content = document.create_element("div")?;
        content.set_class_name("message-content");
        let paragraph = document.create_element("p")?;
        paragraph.set_text_content(Some(&entry.text));
        content.append_child(&paragraph)?;
        row.append_child(&content)?;

        self.messages.append_child(&row)?;
        Ok(())
    }

    fn render_typing(&self, placeholder: PlaceholderId) -> Result<(), FrontendError> {
        let row = self.message_row("message bot typing-indicator")?;
        row.set_attribute(PLACEHOLDER_ATTR, &placeholder.to_string())?;
        let avatar = self.avatar()?;
        row.append_child(&avatar)?;

        let content = dom::document()?.create_element("div")?;
        content.set_class_name("message-content");
        content.set_inner_html(TYPING_DOTS);
        row.append_child(&content)?;

        self.messages.append_child(&row)?;
        Ok(())
    }

    fn drop_typing(&self, placeholder: PlaceholderId) -> Result<(), FrontendError> {
        let selector = format!("[{}=\"{}\"]", PLACEHOLDER_ATTR, placeholder);
        if let Some(row) = self.messages.query_selector(&selector)? {
            row.remove();
        }
        Ok(())
    }
}

fn logged(action: &str, result: Result<(), FrontendError>) {
    if let Err(e) = result {
        log::warn!("Chat view failed to {}: {}", action, e);
    }
}

impl ChatView for DomChatView {
    fn show_panel(&self, open: bool) {
        let result = self
            .panel
            .class_list()
            .toggle_with_force(PANEL_HIDDEN_CLASS, !open)
            .map(|_| ())
            .map_err(FrontendError::from);
        logged("toggle the panel", result);
    }

    fn focus_input(&self) {
        if let Some(input) = &self.input {
            logged("focus the input", input.element().focus().map_err(Into::into));
        }
    }

    fn clear_input(&self) {
        if let Some(input) = &self.input {
            input.set_value("");
        }
    }

    fn append_entry(&self, entry: &TranscriptEntry) {
        logged("append a message", self.render_entry(entry));
    }

    fn show_typing(&self, placeholder: PlaceholderId) {
        logged("show the typing indicator", self.render_typing(placeholder));
    }

    fn remove_typing(&self, placeholder: PlaceholderId) {
        logged("remove the typing indicator", self.drop_typing(placeholder));
    }

    fn scroll_to_end(&self) {
        self.messages.set_scroll_top(self.messages.scroll_height());
    }
}

pub(crate) fn mount(config: &ChatConfig) -> Result<(), FrontendError> {
    let toggle: HtmlElement = dom::by_id(TOGGLE_ID)?;
    let view = DomChatView::lookup()?;
    let input = view.input.as_ref().map(|input| input.element().clone());

    dom::ensure_style(&TYPING_STYLE)?;
    let session: Session = Rc::new(RefCell::new(ChatSession::new(
        config,
        view,
        RandomReplies::from_entropy(),
    )?));
    session.borrow_mut().close();

    let toggled = session.clone();
    dom::listen(&toggle, "click", move |_| {
        let panel = toggled.borrow_mut().toggle();
        log::debug!("Chat panel {:?}", panel);
    })?;

    let close = dom::by_id::<HtmlElement>(CLOSE_ID).ok();
    let form = dom::by_id::<HtmlElement>(FORM_ID).ok();
    let controls = ChatControls {
        close_button: close.is_some(),
        form: form.is_some(),
        input: input.is_some(),
    };
    log::debug!("Chat controls found: {:?}", controls);

    if let Some(close) = close.filter(|_| controls.can_close()) {
        let closed = session.clone();
        dom::listen(&close, "click", move |_| closed.borrow_mut().close())?;
    }

    match form.filter(|_| controls.accepts_messages()) {
        Some(form) => {
            let submitted = session.clone();
            dom::listen(&form, "submit", move |event| {
                event.prevent_default();
                let Some(text) = submitted.borrow().view().input_value() else {
                    return;
                };
                let scheduled = submitted.borrow_mut().submit(&text);
                if let Some(reply) = scheduled {
                    schedule_reply(submitted.clone(), reply);
                }
            })?;
        }
        None => log::debug!("Chat messages disabled: #{} or #{} missing", FORM_ID, INPUT_ID),
    }

    if let Some(input) = input.filter(|_| controls.resizes_input()) {
        let config = config.clone();
        let resized = input.clone();
        dom::listen(&input, "input", move |_| {
            if let Err(e) = resize_input(&resized, &config) {
                log::warn!("Chat input resize failed: {}", e);
            }
        })?;
    }

    log::info!("Chat widget ready");
    Ok(())
}

fn schedule_reply(session: Session, reply: ScheduledReply) {
    let millis = u32::try_from(reply.delay.as_millis()).unwrap_or(u32::MAX);
    Timeout::new(millis, move || {
        session.borrow_mut().reply_ready();
    })
    .forget();
}

fn resize_input(input: &HtmlElement, config: &ChatConfig) -> Result<(), FrontendError> {
    let style = input.style();
    style.set_property("height", &format!("{}px", config.input_base_height_px))?;
    let height = chat::input_height(config, f64::from(input.scroll_height()));
    style.set_property("height", &format!("{}px", height))?;
    Ok(())
}
