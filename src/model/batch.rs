//! Batch request and result types.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::GenerationResult;
use crate::error::ErrorResponse;

/// Parameters of a spreadsheet-driven batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub source_id: Option<String>,
    pub input_range: Option<String>,
    pub output_range: Option<String>,
}

impl BatchRequest {
    pub fn new(
        source_id: impl Into<String>,
        input_range: impl Into<String>,
        output_range: impl Into<String>,
    ) -> Self {
        Self {
            source_id: Some(source_id.into()),
            input_range: Some(input_range.into()),
            output_range: Some(output_range.into()),
        }
    }
}

/// A row rejected before any content was generated for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based position among the data rows (header excluded).
    pub row: usize,
    pub sku: Option<String>,
    pub product_name: String,
    pub error: ErrorResponse,
}

impl Serialize for RejectedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RejectedRow", 5)?;
        state.serialize_field("row", &self.row)?;
        state.serialize_field("sku", &self.sku)?;
        state.serialize_field("productName", &self.product_name)?;
        state.serialize_field("status", "error")?;
        state.serialize_field("error", &self.error)?;
        state.end()
    }
}

/// Outcome for one data row of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Generated(GenerationResult),
    Rejected(RejectedRow),
}

impl BatchEntry {
    pub fn is_rejected(&self) -> bool {
        matches!(self, BatchEntry::Rejected(_))
    }

    pub fn product_name(&self) -> &str {
        match self {
            BatchEntry::Generated(result) => &result.product_name,
            BatchEntry::Rejected(rejected) => &rejected.product_name,
        }
    }
}

/// One entry per data row, in input order.
pub type BatchResult = Vec<BatchEntry>;

/// Response of a completed batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub processed_count: usize,
    pub results: BatchResult,
}
