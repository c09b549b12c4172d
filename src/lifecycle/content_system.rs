use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::{ConfigError, ServiceConfig};
use crate::clients::{GoogleSheetsStore, OpenAiProvider, SheetStore, TextProvider};
use crate::error::ContentError;
use crate::generator::{ContentGenerator, GenerationSettings};
use crate::model::{BatchReport, BatchRequest, GenerationResult, ProductRecord};
use crate::orchestrator::{ContentOrchestrator, FailurePolicy};
use crate::sheets::{output_rows, SheetAdapter};
use crate::validation::validate_batch_request;

/// Entry point of the service: one product at a time, or a spreadsheet batch.
///
/// `ContentService` owns the wiring. The provider and (optionally) the sheet store
/// are injected once at construction and shared by every request; nothing is
/// global.
///
/// # Example
///
/// ```ignore
/// let config = ServiceConfig::from_env()?;
/// let service = ContentService::from_config(&config)?;
///
/// let result = service
///     .generate_content_for_product(&ProductRecord::new("Trail Bottle", "Outdoors"))
///     .await?;
///
/// let report = service
///     .process_product_batch(&BatchRequest::new("sheet-id", "Products!A1:G", "Content!A1"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct ContentService {
    orchestrator: ContentOrchestrator,
    sheets: Option<SheetAdapter>,
}

impl ContentService {
    /// Creates a service without a sheet store, using [`FailurePolicy::Isolate`].
    pub fn new(provider: Arc<dyn TextProvider>, settings: GenerationSettings) -> Self {
        let generator = ContentGenerator::new(provider, settings);
        Self {
            orchestrator: ContentOrchestrator::new(generator, FailurePolicy::default()),
            sheets: None,
        }
    }

    pub fn with_sheet_store(mut self, store: Arc<dyn SheetStore>) -> Self {
        self.sheets = Some(SheetAdapter::new(store));
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.orchestrator = self.orchestrator.with_policy(policy);
        self
    }

    /// Builds the HTTP collaborators described by `config`.
    ///
    /// The sheet store is only created when an access token is configured.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let provider = OpenAiProvider::new(&config.provider)?;
        let mut service = Self::new(Arc::new(provider), config.provider.generation_settings())
            .with_failure_policy(config.batch.failure_policy);

        if let Some(token) = &config.sheets.access_token {
            let store = GoogleSheetsStore::new(&config.sheets, token.clone())?;
            service = service.with_sheet_store(Arc::new(store));
        }

        debug!(?config, "Content service configured");
        Ok(service)
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.orchestrator.policy()
    }

    /// Validates one product record and generates every content kind for it.
    ///
    /// # Errors
    /// - [`ContentError::Validation`] if the record is invalid
    /// - [`ContentError::Auth`] if the provider rejected the credentials
    ///
    /// Quota refusals are recorded per kind in the result.
    pub async fn generate_content_for_product(
        &self,
        record: &ProductRecord,
    ) -> Result<GenerationResult, ContentError> {
        self.orchestrator.generate_all_content(record).await
    }

    /// Reads a product table, generates content for every data row and writes the
    /// rendered results back in one call.
    ///
    /// Nothing is written if the batch aborts.
    ///
    /// # Errors
    /// - [`ContentError::Validation`] if a request field is missing
    /// - [`ContentError::Store`] if no store is configured, or a read/write failed
    /// - [`ContentError::Auth`], or any row failure under
    ///   [`FailurePolicy::AbortOnFirstError`]
    #[instrument(skip_all, fields(source_id = request.source_id.as_deref().unwrap_or_default()))]
    pub async fn process_product_batch(
        &self,
        request: &BatchRequest,
    ) -> Result<BatchReport, ContentError> {
        let target = validate_batch_request(request)?;
        let sheets = self
            .sheets
            .as_ref()
            .ok_or_else(|| ContentError::Store("No spreadsheet store configured".into()))?;

        let rows = sheets.read_rows(&target.source_id, &target.input_range).await?;
        let results = self.orchestrator.process_batch(&rows).await?;
        sheets
            .write_rows(&target.source_id, &target.output_range, output_rows(&results))
            .await?;

        info!(processed = results.len(), "Batch complete");
        Ok(BatchReport {
            processed_count: results.len(),
            results,
        })
    }
}
