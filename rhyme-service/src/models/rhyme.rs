use serde::Serialize;
use validator::Validate;

/// Rhymes for a word. `rhymes` is empty when the dictionary knows none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct RhymeResult {
    #[validate(length(min = 1, message = "Word must not be empty"))]
    pub word: String,
    pub rhymes: Vec<String>,
}

impl RhymeResult {
    pub fn new(word: impl Into<String>, rhymes: Vec<String>) -> Self {
        Self {
            word: word.into(),
            rhymes,
        }
    }
}
