//! # Service Lifecycle
//!
//! Everything needed to stand the service up: configuration loading, the
//! [`ContentService`] facade that wires collaborators together, and tracing
//! initialization.
//!
//! ## Wiring
//!
//! ```rust,ignore
//! setup_tracing();
//!
//! let config = ServiceConfig::from_env()?;          // or ServiceConfig::from_file(path)?
//! let service = ContentService::from_config(&config)?;
//! ```
//!
//! In tests, inject in-memory collaborators instead:
//!
//! ```rust,ignore
//! let service = ContentService::new(Arc::new(MockProvider::always("copy")), GenerationSettings::default())
//!     .with_sheet_store(Arc::new(MockSheetStore::new()));
//! ```

mod config;
mod content_system;
pub mod tracing;

pub use config::{BatchConfig, ConfigError, ProviderConfig, ServiceConfig, SheetsConfig};
pub use content_system::ContentService;
pub use self::tracing::setup_tracing;
