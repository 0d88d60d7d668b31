use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError, ValidationErrors};

/// How common rhymes for the generated word should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Difficulty must be 'easy', 'medium', or 'hard'.")]
pub struct InvalidDifficulty;

impl FromStr for Difficulty {
    type Err = InvalidDifficulty;

    /// Case-insensitive; surrounding whitespace is not ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(InvalidDifficulty),
        }
    }
}

/// A single generated English word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordResult {
    pub word: String,
}

impl WordResult {
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }
}

/// Letters only, with a hyphen or apostrophe (ASCII or typographic) allowed
/// between letters ("well-known", "o'clock").
fn is_single_token(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    let last = chars.len().saturating_sub(1);

    chars.iter().enumerate().all(|(i, c)| {
        c.is_alphabetic()
            || (i != 0 && i != last && matches!(c, '-' | '\'' | '\u{2010}' | '\u{2019}'))
    })
}

impl Validate for WordResult {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let err = if self.word.is_empty() {
            let mut err = ValidationError::new("length");
            err.message = Some(Cow::from("Word must not be empty"));
            err
        } else if !is_single_token(&self.word) {
            let mut err = ValidationError::new("single_token");
            err.message = Some(Cow::from(
                "Word must be a single token without whitespace or punctuation",
            ));
            err.add_param(Cow::from("value"), &self.word);
            err
        } else {
            return Ok(());
        };

        let mut errors = ValidationErrors::new();
        errors.add("word", err);
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("easy".parse(), Ok(Difficulty::Easy));
        assert_eq!("Medium".parse(), Ok(Difficulty::Medium));
        assert_eq!("HARD".parse(), Ok(Difficulty::Hard));
    }

    #[test]
    fn difficulty_rejects_unknown_values() {
        for raw in ["", "extreme", "EXTREME", " easy", "hard ", "1"] {
            assert_eq!(raw.parse::<Difficulty>(), Err(InvalidDifficulty), "{raw:?}");
        }
    }

    #[test]
    fn difficulty_displays_lowercase() {
        let rendered: Vec<String> = Difficulty::ALL.iter().map(|d| d.to_string()).collect();
        assert_eq!(rendered, ["easy", "medium", "hard"]);
    }

    #[test]
    fn accepts_plain_and_compound_words() {
        for word in ["cat", "Orange", "well-known", "o'clock", "o\u{2019}clock", "café"] {
            assert!(WordResult::new(word).validate().is_ok(), "{word}");
        }
    }

    #[test]
    fn rejects_empty_word() {
        let errors = WordResult::new("").validate().unwrap_err();
        let field_errors = errors.field_errors();
        assert_eq!(field_errors["word"][0].code, "length");
    }

    #[test]
    fn rejects_whitespace_and_punctuation() {
        for word in [
            "two words",
            "tab\there",
            "cat.",
            "-dash",
            "what?",
            "quote'",
            "\u{2019}tis",
            "matter\u{2014}really",
        ] {
            let errors = WordResult::new(word).validate().unwrap_err();
            assert_eq!(errors.field_errors()["word"][0].code, "single_token", "{word}");
        }
    }
}
