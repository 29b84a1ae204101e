//! Telegram Bot API client for poster delivery and command polling

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::DeliveryPort;

/// Client for the Telegram Bot API
pub struct TelegramClient {
    client: Client,
    api_base: String,
    token: String,
}

impl TelegramClient {
    pub fn new(client: Client, api_base: &str, token: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// Upload a photo to a chat
    pub async fn send_photo(
        &self,
        chat_id: &str,
        image_bytes: Vec<u8>,
        filename: &str,
        caption: Option<&str>,
    ) -> Result<Message, TelegramError> {
        let photo = Part::bytes(image_bytes)
            .file_name(filename.to_string())
            .mime_str(mime_for(filename))?;

        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("photo", photo);
        if let Some(caption) = caption.filter(|c| !c.is_empty()) {
            form = form.text("caption", caption.to_string());
        }

        let response = self
            .client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await?;

        parse_response(response).await
    }

    /// Send a plain text message to a chat
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<Message, TelegramError> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await?;

        parse_response(response).await
    }

    /// Long-poll for new updates
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
            allowed_updates: &["message"],
        };

        let response = self
            .client
            .post(self.method_url("getUpdates"))
            .json(&request)
            // Outlive the server-side long-poll window
            .timeout(Duration::from_secs(timeout_secs + 10))
            .send()
            .await?;

        parse_response(response).await
    }
}

#[async_trait]
impl DeliveryPort for TelegramClient {
    async fn deliver(
        &self,
        chat_id: &str,
        image_bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> bool {
        match self
            .send_photo(chat_id, image_bytes, filename, Some(caption))
            .await
        {
            Ok(message) => {
                tracing::debug!(
                    "Telegram accepted photo as message {} in chat {}",
                    message.message_id,
                    chat_id
                );
                true
            }
            Err(e) => {
                tracing::error!("Failed to send photo to Telegram chat {}: {}", chat_id, e);
                false
            }
        }
    }
}

async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, TelegramError> {
    let status = response.status();
    let text = response.text().await?;

    let envelope: ApiResponse<T> = match serde_json::from_str(&text) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => {
            return Err(TelegramError::Status {
                status: status.as_u16(),
                body: text.chars().take(300).collect(),
            })
        }
        Err(e) => return Err(TelegramError::InvalidResponse(e.to_string())),
    };

    if !envelope.ok {
        return Err(TelegramError::Api {
            error_code: envelope.error_code.unwrap_or_else(|| status.as_u16() as i64),
            description: envelope
                .description
                .unwrap_or_else(|| "no description".to_string()),
        });
    }

    envelope
        .result
        .ok_or_else(|| TelegramError::InvalidResponse("missing result".to_string()))
}

fn mime_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),
    #[error("Telegram API error {error_code}: {description}")]
    Api { error_code: i64, description: String },
    #[error("Telegram returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid Telegram response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for TelegramError {
    fn from(error: reqwest::Error) -> Self {
        // Request URLs embed the bot token
        Self::Http(error.without_url())
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GetUpdatesRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_support::serve;
    use axum::body::Bytes;
    use axum::http::{StatusCode, Uri};
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Fake Bot API answering every method with a fixed status and body
    async fn fake_api(
        status: StatusCode,
        reply: serde_json::Value,
    ) -> (String, Arc<AtomicUsize>, Arc<Mutex<Vec<(String, Bytes)>>>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let (counter, recorder) = (hits.clone(), requests.clone());
        let router = Router::new().fallback(move |uri: Uri, body: Bytes| {
            let (counter, recorder, reply) = (counter.clone(), recorder.clone(), reply.clone());
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                recorder.lock().unwrap().push((uri.path().to_string(), body));
                (status, Json(reply))
            }
        });
        (serve(router).await, hits, requests)
    }

    fn client(base: &str) -> TelegramClient {
        TelegramClient::new(Client::new(), base, "123:abc")
    }

    #[tokio::test]
    async fn test_deliver_rejected_makes_single_attempt() {
        let (base, hits, _) =
            fake_api(StatusCode::OK, json!({"ok": false, "description": "Bad Request"})).await;

        let delivered = client(&base)
            .deliver("123", b"PNGDATA".to_vec(), "megagrok_poster.png", "caption")
            .await;

        assert!(!delivered);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_deliver_error_status_returns_false() {
        let (base, hits, _) = fake_api(
            StatusCode::BAD_REQUEST,
            json!({"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}),
        )
        .await;

        let delivered = client(&base)
            .deliver("123", b"PNGDATA".to_vec(), "megagrok_poster.png", "caption")
            .await;

        assert!(!delivered);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_deliver_unreachable_platform_returns_false() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let delivered = client(&base)
            .deliver("123", b"PNGDATA".to_vec(), "megagrok_poster.png", "caption")
            .await;

        assert!(!delivered);
    }

    #[tokio::test]
    async fn test_deliver_accepted() {
        let (base, hits, requests) = fake_api(
            StatusCode::OK,
            json!({"ok": true, "result": {"message_id": 9, "chat": {"id": 123}}}),
        )
        .await;

        let delivered = client(&base)
            .deliver("123", b"PNGDATA".to_vec(), "megagrok_poster.png", "🐸 MegaGrok Mob: RugRat")
            .await;

        assert!(delivered);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        let requests = requests.lock().unwrap();
        let (path, body) = &requests[0];
        assert_eq!(path, "/bot123:abc/sendPhoto");
        let body = String::from_utf8_lossy(body);
        assert!(body.contains("name=\"chat_id\""));
        assert!(body.contains("filename=\"megagrok_poster.png\""));
        assert!(body.contains("PNGDATA"));
        assert!(body.contains("MegaGrok Mob: RugRat"));
    }

    #[tokio::test]
    async fn test_get_updates_parses_messages() {
        let (base, _, requests) = fake_api(
            StatusCode::OK,
            json!({"ok": true, "result": [
                {"update_id": 10, "message": {"message_id": 1, "chat": {"id": -100}, "text": "/grokposter"}},
                {"update_id": 11, "edited_message": {"message_id": 1, "chat": {"id": -100}}}
            ]}),
        )
        .await;

        let updates = client(&base).get_updates(Some(10), 0).await.unwrap();

        assert_eq!(updates.len(), 2);
        let message = updates[0].message.as_ref().unwrap();
        assert_eq!(message.chat.id, -100);
        assert_eq!(message.text.as_deref(), Some("/grokposter"));
        assert!(updates[1].message.is_none());

        let requests = requests.lock().unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].1).unwrap();
        assert_eq!(body["offset"], 10);
        assert_eq!(body["timeout"], 0);
    }

    #[tokio::test]
    async fn test_send_message_surfaces_api_error() {
        let (base, _, _) = fake_api(
            StatusCode::FORBIDDEN,
            json!({"ok": false, "error_code": 403, "description": "Forbidden: bot was blocked by the user"}),
        )
        .await;

        let err = client(&base).send_message("123", "hi").await.unwrap_err();

        match err {
            TelegramError::Api { error_code, description } => {
                assert_eq!(error_code, 403);
                assert!(description.contains("blocked"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("megagrok_poster.png"), "image/png");
        assert_eq!(mime_for("megagrok_poster.jpeg"), "image/jpeg");
        assert_eq!(mime_for("megagrok_poster.webp"), "image/webp");
        assert_eq!(mime_for("poster"), "image/png");
    }
}
