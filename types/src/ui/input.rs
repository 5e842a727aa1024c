//! Input mode and the size-field draft.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the size field.
    EditSize,
    /// Yes/no prompt guarding a reset.
    ConfirmReset,
    /// Yes/no prompt guarding quit while draws exist.
    ConfirmQuit,
}

impl InputMode {
    #[must_use]
    pub const fn is_confirmation(self) -> bool {
        matches!(self, Self::ConfirmReset | Self::ConfirmQuit)
    }
}

/// Longest text the size field accepts.
const MAX_SIZE_INPUT_LEN: usize = 6;

/// Text of the size field, with the value it held before editing began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeInput {
    text: String,
    saved: Option<String>,
}

impl SizeInput {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            saved: None,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.saved.is_some()
    }

    pub fn begin(&mut self) {
        if self.saved.is_none() {
            self.saved = Some(self.text.clone());
        }
    }

    /// Only characters a numeric field would let through are accepted.
    pub fn push(&mut self, c: char) -> bool {
        let accepted = match c {
            '0'..='9' => true,
            '-' => self.text.is_empty(),
            _ => false,
        };
        if !accepted || self.text.len() >= MAX_SIZE_INPUT_LEN {
            return false;
        }
        self.text.push(c);
        true
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn commit(&mut self) {
        self.saved = None;
    }

    pub fn cancel(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.text = saved;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_accepts_digits_only() {
        let mut input = SizeInput::new("");
        assert!(input.push('4'));
        assert!(!input.push('x'));
        assert!(!input.push('.'));
        assert!(input.push('2'));
        assert_eq!(input.text(), "42");
    }

    #[test]
    fn minus_only_at_start() {
        let mut input = SizeInput::new("");
        assert!(input.push('-'));
        assert!(input.push('5'));
        assert!(!input.push('-'));
        assert_eq!(input.text(), "-5");
    }

    #[test]
    fn length_is_bounded() {
        let mut input = SizeInput::new("");
        for _ in 0..10 {
            input.push('9');
        }
        assert_eq!(input.text().len(), MAX_SIZE_INPUT_LEN);
    }

    #[test]
    fn cancel_restores_text_from_before_editing() {
        let mut input = SizeInput::new("75");
        input.begin();
        input.backspace();
        input.backspace();
        input.push('3');
        assert!(input.is_editing());
        input.cancel();
        assert_eq!(input.text(), "75");
        assert!(!input.is_editing());
    }

    #[test]
    fn commit_keeps_edited_text() {
        let mut input = SizeInput::new("75");
        input.begin();
        input.backspace();
        input.commit();
        assert_eq!(input.text(), "7");
        assert!(!input.is_editing());
    }

    #[test]
    fn confirmation_modes() {
        assert!(InputMode::ConfirmReset.is_confirmation());
        assert!(InputMode::ConfirmQuit.is_confirmation());
        assert!(!InputMode::EditSize.is_confirmation());
        assert!(!InputMode::Normal.is_confirmation());
    }
}
