use chrono::Local;
use tokio::sync::watch;

use crate::models::{AdjustOption, FormState, MessageLength, Notification, Severity, Tone};

/// Focusable form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ApiKey,
    Tone,
    Length,
    InitialMessage,
    CustomInstructions,
    EmailMode,
    FixSpelling,
    FixGrammar,
    FixPunctuation,
    AdjustOption,
}

impl FormField {
    pub const ORDER: [Self; 10] = [
        Self::ApiKey,
        Self::Tone,
        Self::Length,
        Self::InitialMessage,
        Self::CustomInstructions,
        Self::EmailMode,
        Self::FixSpelling,
        Self::FixGrammar,
        Self::FixPunctuation,
        Self::AdjustOption,
    ];

    pub fn next(self) -> Self {
        let index = Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let index = Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0);
        Self::ORDER[(index + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Whether typed characters edit this field.
    pub const fn is_text(self) -> bool {
        matches!(
            self,
            Self::ApiKey | Self::InitialMessage | Self::CustomInstructions
        )
    }
}

#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub exit_pending: bool,
    pub show_help: bool,
    pub focus: FormField,
    pub model: String,

    // Form fields; the controller only ever sees them through snapshot()
    pub api_key: String,
    pub tone: Tone,
    pub length: MessageLength,
    pub initial_message: String,
    pub custom_instructions: String,
    pub email_mode: bool,
    pub fix_spelling: bool,
    pub fix_grammar: bool,
    pub fix_punctuation: bool,
    pub adjust_option: Option<AdjustOption>,

    // View state
    pub draft: watch::Receiver<String>,
    pub notification: Option<Notification>,
    pub pending_requests: usize,
    pub scroll_offset: usize,
}

impl App {
    pub fn new(
        draft: watch::Receiver<String>,
        default_api_key: Option<String>,
        model: String,
    ) -> Self {
        Self {
            should_quit: false,
            exit_pending: false,
            show_help: false,
            focus: FormField::ApiKey,
            model,
            api_key: default_api_key.unwrap_or_default(),
            tone: Tone::default(),
            length: MessageLength::default(),
            initial_message: String::new(),
            custom_instructions: String::new(),
            email_mode: true,
            fix_spelling: false,
            fix_grammar: false,
            fix_punctuation: false,
            adjust_option: None,
            draft,
            notification: None,
            pending_requests: 0,
            scroll_offset: 0,
        }
    }

    /// The form as one action sees it.
    pub fn snapshot(&self) -> FormState {
        FormState {
            api_key: self.api_key.clone(),
            tone: self.tone,
            length: self.length,
            initial_message: self.initial_message.clone(),
            custom_instructions: self.custom_instructions.clone(),
            email_mode: self.email_mode,
            fix_spelling: self.fix_spelling,
            fix_grammar: self.fix_grammar,
            fix_punctuation: self.fix_punctuation,
            adjust_option: self.adjust_option,
        }
    }

    /// Clear the message fields. The draft store itself is cleared by the
    /// controller; the key and the selects keep their values.
    pub fn reset_form(&mut self) {
        self.initial_message.clear();
        self.custom_instructions.clear();
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    pub const fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn current_draft(&self) -> String {
        self.draft.borrow().clone()
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    /// Drop the notification once it has been on screen long enough.
    pub fn expire_notification(&mut self) {
        if let Some(notification) = &self.notification {
            let ttl_seconds = match notification.severity {
                Severity::Info => 3,
                Severity::Warning | Severity::Error => 5,
            };
            if (Local::now() - notification.raised).num_seconds() >= ttl_seconds {
                self.notification = None;
            }
        }
    }

    pub const fn request_started(&mut self) {
        self.pending_requests = self.pending_requests.saturating_add(1);
    }

    pub const fn request_finished(&mut self) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
    }

    pub const fn is_loading(&self) -> bool {
        self.pending_requests > 0
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(buffer) = self.focused_text_mut() {
            buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = self.focused_text_mut() {
            buffer.pop();
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::ApiKey => Some(&mut self.api_key),
            FormField::InitialMessage => Some(&mut self.initial_message),
            FormField::CustomInstructions => Some(&mut self.custom_instructions),
            _ => None,
        }
    }

    /// Flip the focused toggle, or step the focused select forward.
    pub fn toggle_focused(&mut self) {
        match self.focus {
            FormField::EmailMode => self.email_mode = !self.email_mode,
            FormField::FixSpelling => self.fix_spelling = !self.fix_spelling,
            FormField::FixGrammar => self.fix_grammar = !self.fix_grammar,
            FormField::FixPunctuation => self.fix_punctuation = !self.fix_punctuation,
            FormField::Tone | FormField::Length | FormField::AdjustOption => {
                self.cycle_focused(true);
            }
            _ => {}
        }
    }

    /// Step the focused select through its choices.
    pub fn cycle_focused(&mut self, forward: bool) {
        match self.focus {
            FormField::Tone => {
                self.tone = if forward { self.tone.next() } else { self.tone.prev() };
            }
            FormField::Length => {
                self.length = if forward {
                    self.length.next()
                } else {
                    self.length.prev()
                };
            }
            FormField::AdjustOption => {
                self.adjust_option = if forward {
                    AdjustOption::cycle_next(self.adjust_option)
                } else {
                    AdjustOption::cycle_prev(self.adjust_option)
                };
            }
            _ => {}
        }
    }

    pub const fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
    }

    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub const fn scroll_to_bottom(&mut self) {
        // Clamped to the real maximum by the draft renderer
        self.scroll_offset = usize::MAX;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftStore;

    fn test_app() -> App {
        let store = DraftStore::new();
        App::new(store.subscribe(), None, "gpt-4o-mini".to_string())
    }

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(!app.should_quit);
        assert_eq!(app.focus, FormField::ApiKey);
        assert!(app.email_mode);
        assert!(!app.fix_spelling);
        assert!(app.adjust_option.is_none());
        assert!(!app.is_loading());
    }

    #[test]
    fn test_app_prefills_api_key_from_environment_default() {
        let store = DraftStore::new();
        let app = App::new(
            store.subscribe(),
            Some("sk-env".to_string()),
            "gpt-4o-mini".to_string(),
        );
        assert_eq!(app.api_key, "sk-env");
    }

    #[test]
    fn test_snapshot_mirrors_form_fields() {
        let mut app = test_app();
        app.api_key = "sk-test".to_string();
        app.tone = Tone::Formal;
        app.length = MessageLength::Long;
        app.initial_message = "hello".to_string();
        app.fix_grammar = true;
        app.adjust_option = Some(AdjustOption::Poem);

        let form = app.snapshot();
        assert_eq!(form.api_key, "sk-test");
        assert_eq!(form.tone, Tone::Formal);
        assert_eq!(form.length, MessageLength::Long);
        assert_eq!(form.initial_message, "hello");
        assert!(form.fix_grammar);
        assert_eq!(form.adjust_option, Some(AdjustOption::Poem));
    }

    #[test]
    fn test_reset_form_clears_only_message_fields() {
        let mut app = test_app();
        app.api_key = "sk-test".to_string();
        app.initial_message = "hello".to_string();
        app.custom_instructions = "brief".to_string();
        app.adjust_option = Some(AdjustOption::Longer);

        app.reset_form();

        assert!(app.initial_message.is_empty());
        assert!(app.custom_instructions.is_empty());
        assert_eq!(app.api_key, "sk-test");
        assert_eq!(app.adjust_option, Some(AdjustOption::Longer));
    }

    #[test]
    fn test_focus_order_wraps() {
        let mut app = test_app();
        for _ in 0..FormField::ORDER.len() {
            app.focus_next();
        }
        assert_eq!(app.focus, FormField::ApiKey);

        app.focus_prev();
        assert_eq!(app.focus, FormField::AdjustOption);
    }

    #[test]
    fn test_push_char_edits_focused_text_field() {
        let mut app = test_app();
        app.focus = FormField::InitialMessage;
        app.push_char('h');
        app.push_char('i');
        assert_eq!(app.initial_message, "hi");

        app.backspace();
        assert_eq!(app.initial_message, "h");

        // Non-text fields ignore typing
        app.focus = FormField::EmailMode;
        app.push_char('x');
        assert_eq!(app.initial_message, "h");
    }

    #[test]
    fn test_toggle_focused_flips_switches() {
        let mut app = test_app();
        app.focus = FormField::FixSpelling;
        app.toggle_focused();
        assert!(app.fix_spelling);
        app.toggle_focused();
        assert!(!app.fix_spelling);
    }

    #[test]
    fn test_toggle_focused_steps_selects() {
        let mut app = test_app();
        app.focus = FormField::Tone;
        app.toggle_focused();
        assert_eq!(app.tone, Tone::Casual);
    }

    #[test]
    fn test_cycle_focused_adjust_option() {
        let mut app = test_app();
        app.focus = FormField::AdjustOption;
        app.cycle_focused(true);
        assert_eq!(app.adjust_option, Some(AdjustOption::Longer));
        app.cycle_focused(false);
        assert_eq!(app.adjust_option, None);
    }

    #[test]
    fn test_request_counter_saturates() {
        let mut app = test_app();
        app.request_started();
        app.request_started();
        assert!(app.is_loading());
        app.request_finished();
        app.request_finished();
        app.request_finished();
        assert!(!app.is_loading());
        assert_eq!(app.pending_requests, 0);
    }

    #[test]
    fn test_current_draft_tracks_store() {
        let store = DraftStore::new();
        let app = App::new(store.subscribe(), None, "gpt-4o-mini".to_string());
        assert_eq!(app.current_draft(), "");
        store.set("fresh draft");
        assert_eq!(app.current_draft(), "fresh draft");
    }

    #[test]
    fn test_scroll_movement() {
        let mut app = test_app();
        app.scroll_down(5);
        assert_eq!(app.scroll_offset, 5);
        app.scroll_up(2);
        assert_eq!(app.scroll_offset, 3);
        app.scroll_up(10);
        assert_eq!(app.scroll_offset, 0);
        app.scroll_to_bottom();
        assert_eq!(app.scroll_offset, usize::MAX);
        app.scroll_to_top();
        assert_eq!(app.scroll_offset, 0);
    }
}
