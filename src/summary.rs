//! Wire types exchanged with the summarisation service.

use serde::{Deserialize, Serialize};

/// Body of `POST /summarize`.
#[derive(Debug, Clone, Serialize)]
pub struct SummarizeRequest<'a> {
    pub text: &'a str,
}

/// Body returned by `POST /summarize` on success.
///
/// Every field is optional on the wire; a missing summary is a protocol
/// error that the client reports, not a deserialisation failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummarizeResponse {
    #[serde(default)]
    pub summary: Option<serde_json::Value>,
    /// Length of the text the service actually received.
    #[serde(default)]
    pub original_text_length: Option<usize>,
}

impl SummarizeResponse {
    /// The summary text, if the service sent a non-empty string.
    pub fn into_summary(self) -> Option<String> {
        match self.summary {
            Some(serde_json::Value::String(text)) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Body returned by `GET /`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> SummarizeResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn request_serialises_as_text_object() {
        let body = serde_json::to_string(&SummarizeRequest { text: "hello" }).unwrap();
        assert_eq!(body, r#"{"text":"hello"}"#);
    }

    #[test]
    fn summary_must_be_a_non_empty_string() {
        assert_eq!(
            parse(r#"{"summary": "short summary", "original_text_length": 120}"#).into_summary(),
            Some("short summary".to_string())
        );
        assert_eq!(parse("{}").into_summary(), None);
        assert_eq!(parse(r#"{"summary": null}"#).into_summary(), None);
        assert_eq!(parse(r#"{"summary": ""}"#).into_summary(), None);
        assert_eq!(parse(r#"{"summary": 42}"#).into_summary(), None);
    }
}
