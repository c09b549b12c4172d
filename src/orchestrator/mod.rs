//! # Generation Orchestration
//!
//! [`ContentOrchestrator`] drives every [`ContentKind`] for one product and every
//! product of a batch.
//!
//! ## Per product
//! The record is validated first; a validation failure is returned as-is and no
//! provider call is made. Then one task per kind is spawned. Tasks share the
//! validated product read-only through an `Arc` and each fills its own result
//! slot. Handles are awaited in [`ContentKind::ALL`] order, so the report order
//! does not depend on which call finishes first.
//!
//! A failing kind never cancels its siblings. Its failure entry carries the
//! error code, so a quota refusal shows up as `QUOTA_EXCEEDED` next to the
//! kinds that did succeed. Rejected credentials are the one exception: an auth
//! failure is raised for the whole request once all four calls have finished.
//!
//! ## Per batch
//! See [`ContentOrchestrator::process_batch`].

mod batch;

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn, Instrument};

use crate::error::ContentError;
use crate::generator::ContentGenerator;
use crate::model::{ContentKind, GenerationResult, ProductRecord};
use crate::validation::validate_product;

/// What a batch does when a row fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Record the failure for that row and keep going.
    #[default]
    Isolate,
    /// Stop at the first rejected row or failed content kind.
    AbortOnFirstError,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "isolate" => Ok(FailurePolicy::Isolate),
            "abort_on_first_error" | "abort" => Ok(FailurePolicy::AbortOnFirstError),
            other => Err(format!(
                "unknown failure policy '{other}' (expected isolate or abort_on_first_error)"
            )),
        }
    }
}

/// Generates all content kinds for products and batches of products.
#[derive(Clone)]
pub struct ContentOrchestrator {
    generator: ContentGenerator,
    policy: FailurePolicy,
}

impl ContentOrchestrator {
    pub fn new(generator: ContentGenerator, policy: FailurePolicy) -> Self {
        Self { generator, policy }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Validates `record` and generates every content kind for it.
    ///
    /// # Errors
    /// - [`ContentError::Validation`] if the record is invalid (nothing is generated)
    /// - [`ContentError::Auth`] if the provider rejected the credentials for any kind
    ///
    /// Other per-kind failures, quota refusals included, are recorded in the
    /// returned result with their error code.
    #[instrument(skip_all, fields(product = %record.display_name()))]
    pub async fn generate_all_content(
        &self,
        record: &ProductRecord,
    ) -> Result<GenerationResult, ContentError> {
        let product = Arc::new(validate_product(record)?);

        let handles: Vec<_> = ContentKind::ALL
            .into_iter()
            .map(|kind| {
                let generator = self.generator.clone();
                let product = Arc::clone(&product);
                let task = async move { generator.generate(kind, &product).await };
                (kind, tokio::spawn(task.in_current_span()))
            })
            .collect();

        let mut result = GenerationResult::new(&product);
        let mut fatal: Option<ContentError> = None;

        for (kind, handle) in handles {
            match handle.await {
                Ok(Ok(text)) => result.record_success(kind, text),
                Ok(Err(e)) => {
                    warn!(%kind, error = %e, "Content kind failed");
                    result.record_error(kind, &e);
                    if e.is_request_fatal() && fatal.is_none() {
                        fatal = Some(e);
                    }
                }
                Err(join_error) => {
                    error!(%kind, error = %join_error, "Generation task aborted");
                    let aborted =
                        ContentError::Unknown(format!("generation task aborted: {join_error}"));
                    result.record_error(kind, &aborted);
                }
            }
        }

        if let Some(e) = fatal {
            error!(error = %e, "Request-fatal provider failure");
            return Err(e);
        }

        info!(
            status = ?result.status(),
            failed = result.failures().len(),
            "Content generated"
        );
        Ok(result)
    }
}
