use serde::{Deserialize, Serialize};

/// The three text versions of one dictation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditLineage {
    /// Recognizer transcript before correction
    pub original_text: String,
    /// Last corrected and saved text
    pub text: String,
    /// Text currently in the editor
    pub local_text: String,
}

impl EditLineage {
    /// Start an editing session; the live text begins as the saved text
    pub fn new(original_text: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            original_text: original_text.into(),
            local_text: text.clone(),
            text,
        }
    }

    /// Whether the user has changed anything since the saved text
    pub fn is_locally_edited(&self) -> bool {
        self.local_text != self.text
    }
}
