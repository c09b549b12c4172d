//! Stable wire-level error shape.

use std::error::Error;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ContentError;

pub(crate) const UNKNOWN_CODE: &str = "UNKNOWN_ERROR";

/// Message used when an unrecognised error carries no text of its own.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// HTTP-class status; transport metadata, not part of the payload.
    #[serde(skip)]
    pub status: u16,
}

impl From<&ContentError> for ErrorResponse {
    fn from(error: &ContentError) -> Self {
        let message = match error {
            ContentError::Unknown(message) => first_line(message),
            known => known.to_string(),
        };
        Self {
            message,
            code: error.code().to_string(),
            field: error.field().map(str::to_string),
            timestamp: Utc::now(),
            status: error.status(),
        }
    }
}

/// Maps any error to an [`ErrorResponse`].
///
/// [`ContentError`]s keep their code, status and field tag. Anything else becomes
/// `UNKNOWN_ERROR`/500 and keeps only the first line of its message, so
/// multi-line diagnostics (backtraces, debug dumps) never reach the payload.
pub fn format_error(error: &(dyn Error + 'static)) -> ErrorResponse {
    if let Some(known) = error.downcast_ref::<ContentError>() {
        return ErrorResponse::from(known);
    }

    ErrorResponse {
        message: first_line(&error.to_string()),
        code: UNKNOWN_CODE.to_string(),
        field: None,
        timestamp: Utc::now(),
        status: 500,
    }
}

fn first_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(FALLBACK_MESSAGE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentKind;

    #[test]
    fn test_quota_error_maps_to_quota_exceeded() {
        let response = format_error(&ContentError::Quota("rate limit reached".into()));

        assert_eq!(response.code, "QUOTA_EXCEEDED");
        assert_eq!(response.status, 429);
        assert!(response.message.contains("rate limit reached"));
    }

    #[test]
    fn test_validation_error_keeps_field_tag() {
        let response = format_error(&ContentError::missing_field("outputRange"));

        assert_eq!(response.code, "VALIDATION_ERROR");
        assert_eq!(response.field.as_deref(), Some("outputRange"));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["field"], "outputRange");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_provider_and_store_codes() {
        let provider = format_error(&ContentError::Provider {
            kind: ContentKind::Title,
            message: "bad gateway".into(),
        });
        assert_eq!(provider.code, "PROVIDER_ERROR");

        let store = format_error(&ContentError::Store("sheet locked".into()));
        assert_eq!(store.code, "STORE_ERROR");
        assert_eq!(store.status, 502);
    }

    #[test]
    fn test_native_error_is_unknown_without_trace() {
        let native = std::io::Error::other(
            "disk on fire\n   0: std::backtrace::Backtrace::capture\n   1: main",
        );
        let response = format_error(&native);

        assert_eq!(response.code, "UNKNOWN_ERROR");
        assert_eq!(response.status, 500);
        assert_eq!(response.message, "disk on fire");
        assert!(!response.message.contains("backtrace"));
        assert_eq!(response.field, None);
    }

    #[test]
    fn test_blank_message_falls_back() {
        let response = format_error(&std::io::Error::other(""));
        assert_eq!(response.message, FALLBACK_MESSAGE);

        let unknown = format_error(&ContentError::Unknown("  \n".into()));
        assert_eq!(unknown.code, "UNKNOWN_ERROR");
        assert_eq!(unknown.message, FALLBACK_MESSAGE);
    }
}
