//! Local input validation, run before anything touches the network.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive bounds on the trimmed input length, counted in characters.
///
/// A character is a Unicode scalar value, so an emoji counts once rather than
/// as the two UTF-16 code units a browser's `String.length` would report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLimits {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for TextLimits {
    fn default() -> Self {
        Self {
            min_chars: 100,
            max_chars: 5000,
        }
    }
}

impl TextLimits {
    pub fn contains(&self, len: usize) -> bool {
        (self.min_chars..=self.max_chars).contains(&len)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter some text to summarize")]
    Empty,
    #[error("Text must be between {min}-{max} characters")]
    OutOfRange { min: usize, max: usize, actual: usize },
}

/// Check the input and return the trimmed text that should be sent.
///
/// Emptiness is checked first, then the length bounds.
pub fn validate<'a>(input: &'a str, limits: &TextLimits) -> Result<&'a str, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let actual = trimmed.chars().count();
    if !limits.contains(actual) {
        return Err(ValidationError::OutOfRange {
            min: limits.min_chars,
            max: limits.max_chars,
            actual,
        });
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_empty() {
        let limits = TextLimits::default();
        assert_eq!(validate("", &limits), Err(ValidationError::Empty));
        assert_eq!(validate(" \n\t ", &limits), Err(ValidationError::Empty));
    }

    #[test]
    fn bounds_are_inclusive() {
        let limits = TextLimits::default();
        let low = "a".repeat(100);
        let high = "a".repeat(5000);
        assert_eq!(validate(&low, &limits), Ok(low.as_str()));
        assert_eq!(validate(&high, &limits), Ok(high.as_str()));

        let err = validate(&"a".repeat(99), &limits).unwrap_err();
        assert_eq!(err.to_string(), "Text must be between 100-5000 characters");
        assert!(matches!(
            validate(&"a".repeat(5001), &limits),
            Err(ValidationError::OutOfRange { actual: 5001, .. })
        ));
    }

    #[test]
    fn length_is_measured_after_trimming() {
        let limits = TextLimits::default();
        let padded = format!("   {}   ", "b".repeat(99));
        assert!(matches!(
            validate(&padded, &limits),
            Err(ValidationError::OutOfRange { actual: 99, .. })
        ));

        let padded = format!("\n{}\n", "b".repeat(100));
        assert_eq!(validate(&padded, &limits).unwrap().len(), 100);
    }

    #[test]
    fn astral_characters_count_once() {
        let limits = TextLimits::default();
        // 100 emoji: 200 UTF-16 code units, 400 bytes, 100 characters
        let text = "\u{1F600}".repeat(100);
        assert_eq!(validate(&text, &limits), Ok(text.as_str()));
        assert!(matches!(
            validate(&"\u{1F600}".repeat(99), &limits),
            Err(ValidationError::OutOfRange { actual: 99, .. })
        ));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let limits = TextLimits::default();
        let text = "é".repeat(100);
        assert!(validate(&text, &limits).is_ok());
    }
}
