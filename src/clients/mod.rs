//! # External Collaborators
//!
//! The pipeline talks to exactly two remote systems, each behind an object-safe
//! async trait so that implementations are injected rather than global:
//!
//! - [`TextProvider`] - a chat-completion style text generator
//!   ([`OpenAiProvider`] over HTTP).
//! - [`SheetStore`] - a spreadsheet values API ([`GoogleSheetsStore`] over HTTP).
//!
//! Both report failures as a [`ClientError`] carrying the remote status code when
//! one exists. Translating that into the crate's error taxonomy is the caller's
//! job (see [`crate::generator`] and [`crate::sheets`]).
//!
//! # Testing
//!
//! See [`mock`] for in-memory collaborators with an expectation API.

pub mod google_sheets;
pub mod mock;
pub mod openai;

pub use google_sheets::GoogleSheetsStore;
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a remote collaborator.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ClientError {
    /// Remote status code, if the failure came with one.
    pub status: Option<u16>,
    pub message: String,
}

impl ClientError {
    /// A failure without a remote status (transport, parsing).
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

/// One text-generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A remote text-generation model.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Returns the generated text for a single prompt.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ClientError>;
}

/// A remote spreadsheet addressed by document id and A1 range.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Reads a range. A range without data yields an empty vector.
    async fn get_values(&self, sheet_id: &str, range: &str)
        -> Result<Vec<Vec<String>>, ClientError>;

    /// Overwrites a range with `rows`.
    async fn update_values(
        &self,
        sheet_id: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), ClientError>;
}

/// Pulls a human-readable message out of a JSON error body.
///
/// Understands `{"error": {"message": ..}}`, `{"error": ".."}` and
/// `{"message": ..}`; returns `None` for empty or non-JSON bodies.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    if let Some(msg) = parsed.get("error").and_then(|error| error.as_str()) {
        return Some(msg.to_string());
    }

    parsed
        .get("message")
        .and_then(|message| message.as_str())
        .map(ToOwned::to_owned)
}

/// Builds a [`ClientError`] from a non-success HTTP response body.
pub(crate) fn status_error(status: u16, body: &str, fallback: &str) -> ClientError {
    let message = extract_error_message(body).unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            fallback.to_string()
        } else {
            trimmed.chars().take(400).collect()
        }
    });
    ClientError::with_status(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_nested_error_message() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "requests"}}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("Rate limit reached"));
    }

    #[test]
    fn test_extract_flat_messages() {
        assert_eq!(
            extract_error_message(r#"{"message": "nope"}"#).as_deref(),
            Some("nope")
        );
        assert_eq!(
            extract_error_message(r#"{"error": "invalid_grant"}"#).as_deref(),
            Some("invalid_grant")
        );
        assert_eq!(extract_error_message("<html>502</html>"), None);
        assert_eq!(extract_error_message("   "), None);
    }

    #[test]
    fn test_status_error_falls_back_to_body_then_default() {
        let raw = status_error(502, "<html>bad gateway</html>", "request failed");
        assert_eq!(raw.status, Some(502));
        assert_eq!(raw.message, "<html>bad gateway</html>");

        let empty = status_error(500, "", "request failed");
        assert_eq!(empty.message, "request failed");
    }
}
