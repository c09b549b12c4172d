//! # Sheet Adapter
//!
//! Thin pass-through to a [`SheetStore`], translating store failures into
//! [`ContentError::Store`], plus the rendering of batch results into output rows.
//!
//! Output layout (one header row, then one row per batch entry):
//!
//! | SKU | Product Name | Title | Bullet Points | A+ Content | Ad Copy | Status | Errors | Generated At |

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::clients::{ClientError, SheetStore};
use crate::error::ContentError;
use crate::model::{BatchEntry, ContentKind, GenerationResult, RejectedRow};

pub const OUTPUT_HEADER: [&str; 9] = [
    "SKU",
    "Product Name",
    "Title",
    "Bullet Points",
    "A+ Content",
    "Ad Copy",
    "Status",
    "Errors",
    "Generated At",
];

fn store_error(e: ClientError) -> ContentError {
    ContentError::Store(e.message)
}

/// Reads and writes product rows through an injected store.
#[derive(Clone)]
pub struct SheetAdapter {
    store: Arc<dyn SheetStore>,
}

impl SheetAdapter {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    /// Reads all rows of `range`. An empty range is not an error.
    #[instrument(skip(self))]
    pub async fn read_rows(
        &self,
        source_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, ContentError> {
        let rows = self
            .store
            .get_values(source_id, range)
            .await
            .map_err(|e| {
                error!(error = %e, "Sheet read failed");
                store_error(e)
            })?;
        info!(rows = rows.len(), "Rows read");
        Ok(rows)
    }

    /// Writes `rows` to `range` in a single store call.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub async fn write_rows(
        &self,
        source_id: &str,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), ContentError> {
        self.store
            .update_values(source_id, range, rows)
            .await
            .map_err(|e| {
                error!(error = %e, "Sheet write failed");
                store_error(e)
            })?;
        info!("Rows written");
        Ok(())
    }
}

/// Renders batch entries as output rows, header first.
pub fn output_rows(entries: &[BatchEntry]) -> Vec<Vec<String>> {
    let header: Vec<String> = OUTPUT_HEADER.iter().map(|cell| cell.to_string()).collect();
    std::iter::once(header)
        .chain(entries.iter().map(|entry| match entry {
            BatchEntry::Generated(result) => generated_row(result),
            BatchEntry::Rejected(rejected) => rejected_row(rejected),
        }))
        .collect()
}

fn generated_row(result: &GenerationResult) -> Vec<String> {
    let mut row = vec![
        result.sku.clone().unwrap_or_default(),
        result.product_name.clone(),
    ];
    row.extend(
        ContentKind::ALL
            .iter()
            .map(|kind| result.content(*kind).unwrap_or_default().to_string()),
    );
    let errors = result
        .failures()
        .iter()
        .map(|failure| match failure.code.as_str() {
            "PROVIDER_ERROR" => format!("{}: {}", failure.content_kind, failure.error),
            code => format!("{}: [{code}] {}", failure.content_kind, failure.error),
        })
        .collect::<Vec<_>>()
        .join("; ");
    row.extend([
        result.status().as_str().to_string(),
        errors,
        result.generated_at.to_rfc3339(),
    ]);
    row
}

fn rejected_row(rejected: &RejectedRow) -> Vec<String> {
    let mut row = vec![
        rejected.sku.clone().unwrap_or_default(),
        rejected.product_name.clone(),
    ];
    row.extend(ContentKind::ALL.iter().map(|_| String::new()));
    row.extend([
        "error".to_string(),
        rejected.error.message.clone(),
        rejected.error.timestamp.to_rfc3339(),
    ]);
    row
}
