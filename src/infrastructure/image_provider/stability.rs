//! Stability AI Stable Image Core backend

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use reqwest::Client;

use super::response::read_image_response;
use super::ImageBackend;
use crate::application::ports::outbound::GenerationError;

const ASPECT_RATIO: &str = "1:1";

/// Client for the Stability `stable-image/generate/core` endpoint
pub struct StabilityBackend {
    client: Client,
    api_url: String,
    api_key: String,
    output_format: String,
}

impl StabilityBackend {
    pub fn new(client: Client, api_url: &str, api_key: &str, output_format: &str) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            output_format: output_format.to_string(),
        }
    }
}

#[async_trait]
impl ImageBackend for StabilityBackend {
    fn name(&self) -> &'static str {
        "Stability"
    }

    async fn request_image(&self, prompt: &str) -> Result<Vec<u8>, GenerationError> {
        let form = Form::new()
            .text("prompt", prompt.to_string())
            .text("output_format", self.output_format.clone())
            .text("aspect_ratio", ASPECT_RATIO);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        read_image_response(response).await
    }
}
