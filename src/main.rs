//! MegaGrok Graphics Bot - Scheduled poster generation for Telegram
//!
//! The bot:
//! - Picks a MegaGrok mob from the roster on every posting occasion
//! - Renders the poster prompt and sends it to Stability AI or OpenAI Images
//! - Posts the image to Telegram on a timer and on `/grokposter` commands
//! - Serves a liveness endpoint

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;
use crate::infrastructure::workers::{command_listener_worker, scheduled_post_worker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "megagrok_graphics_bot=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MegaGrok Graphics Bot");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Chat: {}", config.telegram_chat_id);
    tracing::info!("  Interval: {}h", config.post_interval_hours);
    tracing::info!(
        "  Image provider: {:?} ({})",
        config.image_provider.kind(),
        config.image_provider.api_url()
    );

    // Initialize application state
    let state = Arc::new(AppState::new(config)?);
    tracing::info!(
        "Application state initialized ({} mobs)",
        state.poster_service.roster().len()
    );

    // Start background workers
    let scheduler = {
        let service = state.poster_service.clone();
        let chat_id = state.config.telegram_chat_id.clone();
        let interval_hours = state.config.post_interval_hours;
        tokio::spawn(async move {
            scheduled_post_worker(service, chat_id, interval_hours).await;
        })
    };

    let command_listener = {
        let telegram = state.telegram.clone();
        let service = state.poster_service.clone();
        let interval_hours = state.config.post_interval_hours;
        tokio::spawn(async move {
            command_listener_worker(telegram, service, interval_hours).await;
        })
    };

    tracing::info!("Background workers started");

    let app = http::create_routes().layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received, stopping workers...");
        }
    }

    scheduler.abort();
    command_listener.abort();
    tracing::info!("Workers stopped");

    Ok(())
}
