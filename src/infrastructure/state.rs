//! Shared application state

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::services::{PosterService, PosterStyle};
use crate::domain::services::Selector;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::image_provider::ImageProviderClient;
use crate::infrastructure::roster_loader::load_roster;
use crate::infrastructure::telegram::TelegramClient;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub telegram: Arc<TelegramClient>,
    pub poster_service: Arc<PosterService>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        // Roster snapshot, fixed for the life of the process
        let roster = Arc::new(load_roster(config.mobs_json_path.as_deref()));
        let selector = Selector::new(config.variant_probability);
        tracing::info!(
            "Variant probability: {}",
            selector.variant_probability()
        );

        let image_client = ImageProviderClient::from_config(&config, http.clone());
        let telegram = Arc::new(TelegramClient::new(
            http,
            &config.telegram_api_base,
            &config.telegram_bot_token,
        ));

        let poster_service = Arc::new(PosterService::new(
            roster,
            selector,
            PosterStyle::default(),
            Arc::new(image_client),
            telegram.clone(),
        ));

        Ok(Self {
            config,
            telegram,
            poster_service,
        })
    }
}
