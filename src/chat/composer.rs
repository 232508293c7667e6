use crate::error::ValidationError;

pub const MIN_MESSAGE_LEN: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn enter() -> Self {
        Self { key: Key::Enter, shift: false }
    }

    pub fn shift_enter() -> Self {
        Self { key: Key::Enter, shift: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Submit and suppress the default newline.
    Submit,
    InsertNewline,
    /// Not ours; let the input handle it.
    Default,
}

pub fn key_action(press: KeyPress) -> KeyAction {
    match press {
        KeyPress { key: Key::Enter, shift: false } => KeyAction::Submit,
        KeyPress { key: Key::Enter, shift: true } => KeyAction::InsertNewline,
        _ => KeyAction::Default,
    }
}

/// Draft of the outbound message plus its inline validation state.
///
/// `content` starts out unset, which validates as [`ValidationError::Required`];
/// after a reset it is an empty string.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    content: Option<String>,
    error: Option<ValidationError>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// The hint is shown only while nothing at all has been typed.
    pub fn shows_placeholder(&self) -> bool {
        self.text().is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Some(text.into());
        self.error = None;
    }

    pub fn insert_newline(&mut self) {
        self.content.get_or_insert_with(String::new).push('\n');
        self.error = None;
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Checks the draft; on failure the error is kept for inline display.
    pub fn validate(&mut self) -> Result<String, ValidationError> {
        let result = match &self.content {
            None => Err(ValidationError::Required),
            Some(text) if text.trim().chars().count() < MIN_MESSAGE_LEN => {
                Err(ValidationError::TooShort { min: MIN_MESSAGE_LEN })
            }
            Some(text) => Ok(text.clone()),
        };
        self.error = result.as_ref().err().cloned();
        result
    }

    pub fn reset(&mut self) {
        self.content = Some(String::new());
        self.error = None;
    }
}
