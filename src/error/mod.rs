//! # Error Taxonomy
//!
//! Every failure a caller can observe is a [`ContentError`]. Errors reach the
//! caller only through [`format_error`], which turns them into a stable
//! [`ErrorResponse`] without leaking internal detail.
//!
//! | Variant      | Code               | Status | Scope                        |
//! |--------------|--------------------|--------|------------------------------|
//! | `Validation` | `VALIDATION_ERROR` | 400    | rejects the record/request   |
//! | `Quota`      | `QUOTA_EXCEEDED`   | 429    | one content kind only        |
//! | `Auth`       | `AUTH_ERROR`       | 401    | fatal for the request        |
//! | `Provider`   | `PROVIDER_ERROR`   | 502    | one content kind only        |
//! | `Store`      | `STORE_ERROR`      | 502    | aborts the batch             |
//! | `Unknown`    | `UNKNOWN_ERROR`    | 500    | anything else                |

mod response;

pub use response::*;

use crate::model::ContentKind;
use thiserror::Error;

/// Errors raised by the generation pipeline.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContentError {
    /// Caller-supplied data violates a required contract.
    ///
    /// `field` is set only for single-field request errors (batch parameters);
    /// product validation reports every violation in `message` and leaves it empty.
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The text-generation provider reported rate or quota exhaustion.
    #[error("API quota exceeded: {0}")]
    Quota(String),

    /// The text-generation provider rejected the credentials.
    #[error("API authentication failed: {0}")]
    Auth(String),

    /// Any other provider failure, tagged with the kind being generated.
    #[error("Failed to generate {kind}: {message}")]
    Provider { kind: ContentKind, message: String },

    /// The spreadsheet store failed to read or write.
    #[error("Spreadsheet operation failed: {0}")]
    Store(String),

    #[error("{0}")]
    Unknown(String),
}

impl ContentError {
    /// A multi-cause product validation failure.
    pub fn invalid(violations: &[String]) -> Self {
        ContentError::Validation {
            message: violations.join("; "),
            field: None,
        }
    }

    /// A single missing request parameter.
    pub fn missing_field(field: &str) -> Self {
        ContentError::Validation {
            message: format!("{field} is required"),
            field: Some(field.to_string()),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ContentError::Validation { .. } => "VALIDATION_ERROR",
            ContentError::Quota(_) => "QUOTA_EXCEEDED",
            ContentError::Auth(_) => "AUTH_ERROR",
            ContentError::Provider { .. } => "PROVIDER_ERROR",
            ContentError::Store(_) => "STORE_ERROR",
            ContentError::Unknown(_) => UNKNOWN_CODE,
        }
    }

    /// HTTP-class status for transports that need one.
    pub fn status(&self) -> u16 {
        match self {
            ContentError::Validation { .. } => 400,
            ContentError::Quota(_) => 429,
            ContentError::Auth(_) => 401,
            ContentError::Provider { .. } | ContentError::Store(_) => 502,
            ContentError::Unknown(_) => 500,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            ContentError::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Rejected credentials end the whole request. Every other provider
    /// failure, quota included, stays local to one content kind.
    pub fn is_request_fatal(&self) -> bool {
        matches!(self, ContentError::Auth(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_joins_every_violation() {
        let err = ContentError::invalid(&["name is required".into(), "bad price".into()]);
        assert_eq!(err.to_string(), "name is required; bad price");
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_missing_field_is_tagged() {
        let err = ContentError::missing_field("sourceId");
        assert_eq!(err.field(), Some("sourceId"));
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn test_provider_error_names_the_kind() {
        let err = ContentError::Provider {
            kind: ContentKind::AdCopy,
            message: "upstream 500".into(),
        };
        assert_eq!(err.to_string(), "Failed to generate adCopy: upstream 500");
        assert!(!err.is_request_fatal());
        assert!(ContentError::Auth("bad key".into()).is_request_fatal());
        assert!(!ContentError::Quota("slow down".into()).is_request_fatal());
    }
}
