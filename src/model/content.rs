//! Content kinds and per-product generation results.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::Product;
use crate::error::ContentError;

const PROVIDER_CODE: &str = "PROVIDER_ERROR";

/// The closed set of text fields generated for every product.
///
/// Variant order is the canonical reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
    Title,
    BulletPoints,
    APlusContent,
    AdCopy,
}

impl ContentKind {
    /// Every kind, in reporting order.
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Title,
        ContentKind::BulletPoints,
        ContentKind::APlusContent,
        ContentKind::AdCopy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Title => "title",
            ContentKind::BulletPoints => "bulletPoints",
            ContentKind::APlusContent => "aPlusContent",
            ContentKind::AdCopy => "adCopy",
        }
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived outcome of a generation run for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Success,
    /// One or more kinds failed. Also used when all four failed: the record
    /// itself was valid, so it is never dropped.
    PartialSuccess,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Success => "success",
            OverallStatus::PartialSuccess => "partial_success",
        }
    }
}

/// A content kind that could not be generated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindFailure {
    pub content_kind: ContentKind,
    pub error: String,
    /// Error code of the cause, e.g. `PROVIDER_ERROR` or `QUOTA_EXCEEDED`.
    pub code: String,
}

impl KindFailure {
    /// Rebuilds the error that caused this failure.
    pub fn to_error(&self) -> ContentError {
        match self.code.as_str() {
            "QUOTA_EXCEEDED" => ContentError::Quota(self.error.clone()),
            "AUTH_ERROR" => ContentError::Auth(self.error.clone()),
            PROVIDER_CODE => ContentError::Provider {
                kind: self.content_kind,
                message: self.error.clone(),
            },
            _ => ContentError::Unknown(self.error.clone()),
        }
    }
}

/// Generated text for one product, plus the kinds that failed.
///
/// A kind is recorded either as a success or as a failure, never both. Recording
/// the same kind twice keeps the first outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub product_name: String,
    pub sku: Option<String>,
    contents: BTreeMap<ContentKind, String>,
    failures: Vec<KindFailure>,
    pub generated_at: DateTime<Utc>,
}

impl GenerationResult {
    pub fn new(product: &Product) -> Self {
        Self {
            product_name: product.name.clone(),
            sku: product.sku.clone(),
            contents: BTreeMap::new(),
            failures: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    pub fn record_success(&mut self, kind: ContentKind, text: String) {
        if !self.is_recorded(kind) {
            self.contents.insert(kind, text);
        }
    }

    /// Records a provider failure for `kind`.
    pub fn record_failure(&mut self, kind: ContentKind, error: impl Into<String>) {
        self.push_failure(kind, error.into(), PROVIDER_CODE);
    }

    /// Records `error` as the outcome of `kind`, keeping its code.
    pub fn record_error(&mut self, kind: ContentKind, error: &ContentError) {
        let message = match error {
            ContentError::Provider { message, .. }
            | ContentError::Quota(message)
            | ContentError::Auth(message)
            | ContentError::Unknown(message) => message.clone(),
            other => other.to_string(),
        };
        self.push_failure(kind, message, error.code());
    }

    fn push_failure(&mut self, kind: ContentKind, error: String, code: &str) {
        if !self.is_recorded(kind) {
            self.failures.push(KindFailure {
                content_kind: kind,
                error,
                code: code.to_string(),
            });
            self.failures.sort_by_key(|failure| failure.content_kind);
        }
    }

    fn is_recorded(&self, kind: ContentKind) -> bool {
        self.contents.contains_key(&kind)
            || self.failures.iter().any(|f| f.content_kind == kind)
    }

    /// Generated text for `kind`, if that kind succeeded.
    pub fn content(&self, kind: ContentKind) -> Option<&str> {
        self.contents.get(&kind).map(String::as_str)
    }

    pub fn failures(&self) -> &[KindFailure] {
        &self.failures
    }

    /// True when every [`ContentKind`] has an outcome.
    pub fn is_complete(&self) -> bool {
        ContentKind::ALL.iter().all(|kind| self.is_recorded(*kind))
    }

    pub fn status(&self) -> OverallStatus {
        if self.failures.is_empty() {
            OverallStatus::Success
        } else {
            OverallStatus::PartialSuccess
        }
    }
}

/// Wire shape of a processed product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub title: String,
    pub bullet_points: String,
    pub a_plus_content: String,
    pub ad_copy: String,
    pub status: OverallStatus,
    pub errors: Vec<KindFailure>,
    pub timestamp: DateTime<Utc>,
}

impl From<&GenerationResult> for ContentResponse {
    fn from(result: &GenerationResult) -> Self {
        let text = |kind| result.content(kind).unwrap_or_default().to_string();
        Self {
            product_name: result.product_name.clone(),
            sku: result.sku.clone(),
            title: text(ContentKind::Title),
            bullet_points: text(ContentKind::BulletPoints),
            a_plus_content: text(ContentKind::APlusContent),
            ad_copy: text(ContentKind::AdCopy),
            status: result.status(),
            errors: result.failures.clone(),
            timestamp: result.generated_at,
        }
    }
}

impl Serialize for GenerationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ContentResponse::from(self).serialize(serializer)
    }
}
