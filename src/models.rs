use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Tone of the drafted message, as offered by the tone select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Direct,
    Casual,
    Formal,
    Poem,
}

impl Tone {
    pub const ALL: [Self; 4] = [Self::Direct, Self::Casual, Self::Formal, Self::Poem];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::Casual => "Casual",
            Self::Formal => "Formal",
            Self::Poem => "Make it a poem",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|tone| *tone == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|tone| *tone == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Target length of the drafted message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageLength {
    #[default]
    Short,
    Medium,
    Long,
}

impl MessageLength {
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Long => "Long",
        }
    }

    /// The phrase handed to the model for each length.
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::Short => "about 50 words",
            Self::Medium => "about 100 words",
            Self::Long => "about 200 words",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|length| *length == self)
            .unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|length| *length == self)
            .unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Directive applied to an existing draft by the adjust action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustOption {
    Longer,
    Shorter,
    MoreFormal,
    MoreDirect,
    MoreCasual,
    Poem,
}

impl AdjustOption {
    pub const ALL: [Self; 6] = [
        Self::Longer,
        Self::Shorter,
        Self::MoreFormal,
        Self::MoreDirect,
        Self::MoreCasual,
        Self::Poem,
    ];

    /// The natural-language directive embedded in the adjustment prompt.
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Longer => "Make it longer",
            Self::Shorter => "Make it shorter",
            Self::MoreFormal => "Make it sound more formal",
            Self::MoreDirect => "Make it sound more direct",
            Self::MoreCasual => "Make it sound more casual",
            Self::Poem => "Make it a poem",
        }
    }

    /// Cycle forward through the options, with `None` meaning "not selected".
    pub fn cycle_next(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::ALL[0]),
            Some(option) => {
                let index = Self::ALL
                    .iter()
                    .position(|candidate| *candidate == option)
                    .unwrap_or(0);
                if index + 1 == Self::ALL.len() {
                    None
                } else {
                    Some(Self::ALL[index + 1])
                }
            }
        }
    }

    /// Cycle backward through the options, with `None` meaning "not selected".
    pub fn cycle_prev(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::ALL[Self::ALL.len() - 1]),
            Some(option) => {
                let index = Self::ALL
                    .iter()
                    .position(|candidate| *candidate == option)
                    .unwrap_or(0);
                if index == 0 {
                    None
                } else {
                    Some(Self::ALL[index - 1])
                }
            }
        }
    }
}

/// Snapshot of the form taken when an action fires. The controller reads it,
/// never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
    Warning,
}

/// A user-facing notification. Every action raises at most one.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub raised: DateTime<Local>,
}

impl Notification {
    fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            raised: Local::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout")]
    pub request_timeout: u64,
}

fn default_api_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_timeout() -> u64 {
    120
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            model: default_model(),
            request_timeout: default_timeout(),
        }
    }
}
