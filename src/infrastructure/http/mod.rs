//! HTTP routes - Liveness only

use axum::{routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

const SERVICE_NAME: &str = "megagrok_graphics_bot";

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub time: String,
}

/// Create all HTTP routes
pub fn create_routes() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}

async fn index() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        service: SERVICE_NAME,
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::test_support::serve;

    #[tokio::test]
    async fn test_index_reports_status_and_time() {
        let base = serve(create_routes()).await;

        let body: serde_json::Value = reqwest::get(format!("{}/", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], SERVICE_NAME);
        let time = body["time"].as_str().unwrap();
        assert!(time.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok());
    }

    #[tokio::test]
    async fn test_health_check() {
        let base = serve(create_routes()).await;

        let text = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert_eq!(text, "OK");
    }
}
