use tracing::{info, instrument, warn};

use super::{ContentOrchestrator, FailurePolicy};
use crate::error::{ContentError, ErrorResponse};
use crate::model::{BatchEntry, BatchResult, ProductRecord, RejectedRow};

impl ContentOrchestrator {
    /// Generates content for every data row of a table.
    ///
    /// The first row is a header and is always skipped. Rows are processed one
    /// after another and the result has exactly one entry per data row, in input
    /// order. Under [`FailurePolicy::Isolate`] a row that fails validation becomes
    /// a [`BatchEntry::Rejected`] entry and the batch continues.
    ///
    /// # Errors
    /// - [`ContentError::Auth`] from any row
    /// - under [`FailurePolicy::AbortOnFirstError`], the first row rejection or
    ///   per-kind failure (a quota refusal aborts as [`ContentError::Quota`])
    #[instrument(skip_all, fields(rows = rows.len().saturating_sub(1)))]
    pub async fn process_batch(&self, rows: &[Vec<String>]) -> Result<BatchResult, ContentError> {
        let mut results = Vec::with_capacity(rows.len().saturating_sub(1));

        for (index, row) in rows.iter().skip(1).enumerate() {
            let position = index + 1;
            let record = ProductRecord::from_row(row);

            match self.generate_all_content(&record).await {
                Ok(result) => {
                    if self.policy == FailurePolicy::AbortOnFirstError {
                        if let Some(failure) = result.failures().first() {
                            warn!(row = position, kind = %failure.content_kind, "Aborting batch");
                            return Err(failure.to_error());
                        }
                    }
                    results.push(BatchEntry::Generated(result));
                }
                Err(e) if e.is_request_fatal() || self.policy == FailurePolicy::AbortOnFirstError => {
                    warn!(row = position, error = %e, "Aborting batch");
                    return Err(e);
                }
                Err(e) => {
                    warn!(row = position, error = %e, "Row rejected");
                    results.push(BatchEntry::Rejected(RejectedRow {
                        row: position,
                        sku: record.display_sku(),
                        product_name: record.display_name(),
                        error: ErrorResponse::from(&e),
                    }));
                }
            }
        }

        let rejected = results.iter().filter(|entry| entry.is_rejected()).count();
        info!(processed = results.len(), rejected, "Batch generated");
        Ok(results)
    }
}
