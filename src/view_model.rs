//! What the form shows: labels, the character counter, and the one visible outcome.

use crate::validate::TextLimits;

pub const TITLE: &str = "AI Text Summarizer";
pub const SUBMIT_LABEL: &str = "Summarize";
pub const SUBMITTING_LABEL: &str = "Summarizing...";
pub const LOADING_TEXT: &str = "Processing your text...";
pub const SUMMARY_HEADING: &str = "Summary";

/// The single outcome the form shows below the text area.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Idle,
    Failed(String),
    Loading,
    Summary(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub input: String,
    pub char_count: usize,
    pub limits: TextLimits,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub placeholder: String,
    pub outcome: Outcome,
}

impl FormView {
    pub(crate) fn new(input: &str, limits: TextLimits, outcome: Outcome) -> Self {
        let loading = outcome == Outcome::Loading;
        Self {
            input: input.to_string(),
            char_count: input.trim().chars().count(),
            limits,
            submit_enabled: !loading,
            submit_label: if loading {
                SUBMITTING_LABEL
            } else {
                SUBMIT_LABEL
            },
            placeholder: format!(
                "Enter text to summarize ({}-{} characters)",
                limits.min_chars, limits.max_chars
            ),
            outcome,
        }
    }

    /// Whether the trimmed input currently satisfies the length bounds.
    pub fn within_limits(&self) -> bool {
        self.limits.contains(self.char_count)
    }
}
