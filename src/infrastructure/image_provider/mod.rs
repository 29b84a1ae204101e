//! Image provider client for poster generation
//!
//! A backend performs exactly one HTTP request per call; the
//! [`ImageProviderClient`] wraps it with validation and the retry policy.

mod openai;
mod response;
mod retry;
mod stability;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio_retry2::{Retry, RetryError};

use crate::application::ports::outbound::{GenerationError, ImageGenerationPort};
use crate::domain::value_objects::{GeneratedImage, PromptText};
use crate::infrastructure::config::{AppConfig, ImageProviderConfig};

pub use openai::OpenAiImageBackend;
pub use retry::RetryPolicy;
pub use stability::StabilityBackend;

/// A single request against an image generation API
#[async_trait]
pub trait ImageBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn request_image(&self, prompt: &str) -> Result<Vec<u8>, GenerationError>;
}

/// Retrying client over one image backend
pub struct ImageProviderClient {
    backend: Arc<dyn ImageBackend>,
    retry: RetryPolicy,
    output_format: String,
}

impl ImageProviderClient {
    pub fn new(backend: Arc<dyn ImageBackend>, retry: RetryPolicy, output_format: &str) -> Self {
        Self {
            backend,
            retry,
            output_format: output_format.to_string(),
        }
    }

    /// Build the client for the provider selected in configuration
    pub fn from_config(config: &AppConfig, http: reqwest::Client) -> Self {
        let backend: Arc<dyn ImageBackend> = match &config.image_provider {
            ImageProviderConfig::Stability { api_key, api_url } => Arc::new(StabilityBackend::new(
                http,
                api_url,
                api_key,
                &config.image_format,
            )),
            ImageProviderConfig::OpenAi {
                api_key,
                api_url,
                model,
                size,
            } => Arc::new(OpenAiImageBackend::new(
                http,
                api_url,
                api_key,
                model,
                size,
                &config.image_format,
            )),
        };

        Self::new(
            backend,
            RetryPolicy::new(config.max_retries, config.retry_backoff),
            &config.image_format,
        )
    }
}

#[async_trait]
impl ImageGenerationPort for ImageProviderClient {
    async fn generate(&self, prompt: &PromptText) -> Result<GeneratedImage, GenerationError> {
        if prompt.is_blank() {
            return Err(GenerationError::InvalidPrompt);
        }

        let backend = self.backend.as_ref();
        let max_attempts = self.retry.max_attempts;
        let attempts = AtomicU32::new(0);

        let result = Retry::spawn(self.retry.strategy(), || {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                let result = match backend.request_image(prompt.as_str()).await {
                    Ok(bytes) if bytes.is_empty() => Err(GenerationError::EmptyPayload),
                    other => other,
                };

                match result {
                    Ok(bytes) => {
                        tracing::debug!(
                            provider = backend.name(),
                            attempt,
                            "Received {} image bytes",
                            bytes.len()
                        );
                        Ok(bytes)
                    }
                    Err(e) if e.is_retryable() => {
                        tracing::warn!(
                            provider = backend.name(),
                            attempt,
                            max_attempts,
                            error = %e,
                            "Image generation attempt failed"
                        );
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => Err(RetryError::Permanent(e)),
                }
            }
        })
        .await;

        match result {
            Ok(bytes) => Ok(GeneratedImage::from_bytes(bytes, &self.output_format)),
            Err(e) if e.is_retryable() => Err(GenerationError::Exhausted {
                attempts: attempts.load(Ordering::SeqCst),
                last: Box::new(e),
            }),
            Err(e) => Err(e),
        }
    }
}
