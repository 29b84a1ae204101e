//! Provider response normalization
//!
//! Providers answer either with the raw image body or with a JSON envelope
//! carrying base64 image data. Both shapes become raw bytes here.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::application::ports::outbound::GenerationError;

const PREVIEW_CHARS: usize = 300;

/// Turn an HTTP response from a provider into raw image bytes
pub async fn read_image_response(response: reqwest::Response) -> Result<Vec<u8>, GenerationError> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response
        .bytes()
        .await
        .map_err(|e| GenerationError::Transport(e.without_url().to_string()))?;

    if !status.is_success() {
        return Err(GenerationError::Api {
            status: status.as_u16(),
            body: preview(&body),
        });
    }

    normalize_image_payload(content_type.as_deref(), &body)
}

/// Normalize a successful response body to raw image bytes
pub fn normalize_image_payload(
    content_type: Option<&str>,
    body: &[u8],
) -> Result<Vec<u8>, GenerationError> {
    if body.is_empty() {
        return Err(GenerationError::EmptyPayload);
    }

    let is_json = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("json"))
        .unwrap_or(false)
        || body.first() == Some(&b'{');
    if !is_json {
        return Ok(body.to_vec());
    }

    let envelope: Value = serde_json::from_slice(body).map_err(|e| {
        GenerationError::MalformedResponse(format!("{}: {}", e, preview(body)))
    })?;
    let encoded = base64_image(&envelope).ok_or_else(|| {
        GenerationError::MalformedResponse(format!("Missing image field: {}", preview(body)))
    })?;

    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| GenerationError::MalformedResponse(format!("Invalid base64 image: {}", e)))?;
    if bytes.is_empty() {
        return Err(GenerationError::EmptyPayload);
    }
    Ok(bytes)
}

/// Stability `{"image"}`, OpenAI `{"data":[{"b64_json"}]}` or legacy `{"artifacts":[{"base64"}]}`
fn base64_image(envelope: &Value) -> Option<&str> {
    envelope
        .get("image")
        .and_then(Value::as_str)
        .or_else(|| envelope.pointer("/data/0/b64_json").and_then(Value::as_str))
        .or_else(|| envelope.pointer("/artifacts/0/base64").and_then(Value::as_str))
}

fn preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body).chars().take(PREVIEW_CHARS).collect()
}
