use async_trait::async_trait;

use crate::domain::value_objects::{GeneratedImage, PromptText};

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Prompt is empty")]
    InvalidPrompt,
    #[error("HTTP request failed: {0}")]
    Transport(String),
    #[error("Provider API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Invalid provider response: {0}")]
    MalformedResponse(String),
    #[error("Provider returned no image data")]
    EmptyPayload,
    #[error("Image generation failed after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<GenerationError>,
    },
}

impl GenerationError {
    /// Structurally invalid input is never retried
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidPrompt | Self::Exhausted { .. })
    }
}

/// Image generation provider
#[async_trait]
pub trait ImageGenerationPort: Send + Sync {
    async fn generate(&self, prompt: &PromptText) -> Result<GeneratedImage, GenerationError>;
}
