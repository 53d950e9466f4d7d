//! Single-line text input for keyboard-driven forms.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Editable line of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    /// Creates an input holding `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Clears the text.
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Returns the text and clears the input.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.value)
    }

    /// Applies an editing key. Returns false if the key is not an edit.
    ///
    /// Characters typed with Control or Alt are left for the caller.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            _ => false,
        }
    }
}
