//! OpenAI Images backend

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::response::read_image_response;
use super::ImageBackend;
use crate::application::ports::outbound::GenerationError;

#[derive(Debug, Serialize)]
struct ImagesRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    n: u8,
    output_format: &'a str,
}

/// Client for the OpenAI `images/generations` endpoint
pub struct OpenAiImageBackend {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    size: String,
    output_format: String,
}

impl OpenAiImageBackend {
    pub fn new(
        client: Client,
        api_url: &str,
        api_key: &str,
        model: &str,
        size: &str,
        output_format: &str,
    ) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            size: size.to_string(),
            output_format: output_format.to_string(),
        }
    }
}

#[async_trait]
impl ImageBackend for OpenAiImageBackend {
    fn name(&self) -> &'static str {
        "OpenAI Images"
    }

    async fn request_image(&self, prompt: &str) -> Result<Vec<u8>, GenerationError> {
        let request = ImagesRequest {
            model: &self.model,
            prompt,
            size: &self.size,
            n: 1,
            output_format: &self.output_format,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        read_image_response(response).await
    }
}
