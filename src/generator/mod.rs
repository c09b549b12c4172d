//! Single-kind content generation.
//!
//! [`ContentGenerator`] builds the prompt for one [`ContentKind`], makes exactly one
//! provider call and classifies the failure, if any. It never retries.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::clients::{ClientError, CompletionRequest, TextProvider};
use crate::error::ContentError;
use crate::model::{ContentKind, Product};
use crate::prompts::{self, SYSTEM_PROMPT};

const STATUS_UNAUTHORIZED: u16 = 401;
const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Fixed sampling parameters applied to every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

/// Generates one content field per call against an injected provider.
#[derive(Clone)]
pub struct ContentGenerator {
    provider: Arc<dyn TextProvider>,
    settings: GenerationSettings,
}

impl ContentGenerator {
    pub fn new(provider: Arc<dyn TextProvider>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> GenerationSettings {
        self.settings
    }

    /// Generates the text for `kind`.
    ///
    /// # Errors
    /// - [`ContentError::Quota`] when the provider answers 429
    /// - [`ContentError::Auth`] when the provider answers 401
    /// - [`ContentError::Provider`] tagged with `kind` for anything else
    #[instrument(skip(self, product), fields(product = %product.name))]
    pub async fn generate(&self, kind: ContentKind, product: &Product) -> Result<String, ContentError> {
        let prompt = prompts::build_prompt(kind, product);
        debug!(prompt_chars = prompt.len(), "Sending request");

        let request = CompletionRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: prompt,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        match self.provider.complete(request).await {
            Ok(text) => Ok(text.trim().to_string()),
            Err(e) => {
                warn!(status = ?e.status, error = %e, "Generation failed");
                Err(classify(kind, e))
            }
        }
    }
}

/// Maps a provider failure onto the error taxonomy.
pub fn classify(kind: ContentKind, error: ClientError) -> ContentError {
    match error.status {
        Some(STATUS_TOO_MANY_REQUESTS) => ContentError::Quota(error.message),
        Some(STATUS_UNAUTHORIZED) => ContentError::Auth(error.message),
        _ => ContentError::Provider {
            kind,
            message: error.message,
        },
    }
}
