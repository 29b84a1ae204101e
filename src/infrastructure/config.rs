//! Application configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::domain::services::DEFAULT_VARIANT_PROBABILITY;

const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const DEFAULT_STABILITY_API_URL: &str =
    "https://api.stability.ai/v2beta/stable-image/generate/core";
const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/images/generations";

const SUPPORTED_IMAGE_FORMATS: [&str; 3] = ["png", "jpeg", "webp"];

/// Which image generation provider to call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageProviderKind {
    Stability,
    OpenAi,
}

impl FromStr for ImageProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stability" | "stability-ai" => Ok(Self::Stability),
            "openai" | "open-ai" => Ok(Self::OpenAi),
            other => bail!("unknown image provider '{}' (expected stability or openai)", other),
        }
    }
}

/// Provider-specific connection settings
#[derive(Debug, Clone, PartialEq)]
pub enum ImageProviderConfig {
    Stability {
        api_key: String,
        api_url: String,
    },
    OpenAi {
        api_key: String,
        api_url: String,
        model: String,
        size: String,
    },
}

impl ImageProviderConfig {
    pub fn kind(&self) -> ImageProviderKind {
        match self {
            Self::Stability { .. } => ImageProviderKind::Stability,
            Self::OpenAi { .. } => ImageProviderKind::OpenAi,
        }
    }

    pub fn api_url(&self) -> &str {
        match self {
            Self::Stability { api_url, .. } | Self::OpenAi { api_url, .. } => api_url,
        }
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Telegram bot token (bearer credential for the Bot API)
    pub telegram_bot_token: String,
    /// Chat that receives scheduled posters
    pub telegram_chat_id: String,
    /// Telegram Bot API base URL
    pub telegram_api_base: String,
    /// Hours between scheduled posters
    pub post_interval_hours: f64,

    /// Image generation provider settings
    pub image_provider: ImageProviderConfig,
    /// Requested output format (png, jpeg, webp)
    pub image_format: String,
    /// Optional roster override file
    pub mobs_json_path: Option<PathBuf>,

    /// Maximum generation attempts per poster
    pub max_retries: u32,
    /// Backoff unit; the wait after attempt n is `unit * 2^n`
    pub retry_backoff: Duration,
    /// Chance of a random variant poster on unnamed occasions
    pub variant_probability: f64,
    /// Timeout applied to every outbound HTTP request
    pub http_timeout: Duration,

    /// Health server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let post_interval_hours: f64 = var_or("POST_INTERVAL_HOURS", "2")
            .trim()
            .parse()
            .context("POST_INTERVAL_HOURS must be a number")?;
        if !post_interval_hours.is_finite() || post_interval_hours <= 0.0 {
            bail!("POST_INTERVAL_HOURS must be a positive number of hours");
        }

        let provider_kind: ImageProviderKind = var_or("IMAGE_PROVIDER", "stability").parse()?;
        let image_provider = match provider_kind {
            ImageProviderKind::Stability => ImageProviderConfig::Stability {
                api_key: var("STABILITY_API_KEY")
                    .context("STABILITY_API_KEY environment variable is required")?,
                api_url: var_or("STABILITY_API_URL", DEFAULT_STABILITY_API_URL),
            },
            ImageProviderKind::OpenAi => ImageProviderConfig::OpenAi {
                api_key: var("OPENAI_API_KEY")
                    .context("OPENAI_API_KEY environment variable is required")?,
                api_url: var_or("OPENAI_API_URL", DEFAULT_OPENAI_API_URL),
                model: var_or("OPENAI_IMAGE_MODEL", "gpt-image-1"),
                size: parse_square_size(&var_or("IMAGE_SIZE", "1024x1024"))?,
            },
        };

        let image_format = var_or("IMAGE_FORMAT", "png").trim().to_ascii_lowercase();
        if !SUPPORTED_IMAGE_FORMATS.contains(&image_format.as_str()) {
            bail!(
                "IMAGE_FORMAT must be one of {} (got '{}')",
                SUPPORTED_IMAGE_FORMATS.join(", "),
                image_format
            );
        }

        let max_retries: u32 = var_or("MAX_RETRIES", "3")
            .trim()
            .parse()
            .context("MAX_RETRIES must be a positive integer")?;
        if max_retries == 0 {
            bail!("MAX_RETRIES must be at least 1");
        }

        let variant_probability: f64 = var_or(
            "VARIANT_PROBABILITY",
            &DEFAULT_VARIANT_PROBABILITY.to_string(),
        )
        .trim()
        .parse()
        .context("VARIANT_PROBABILITY must be a number")?;
        if !(0.0..=1.0).contains(&variant_probability) {
            bail!("VARIANT_PROBABILITY must be between 0 and 1");
        }

        Ok(Self {
            telegram_bot_token: var("TELEGRAM_BOT_TOKEN")
                .context("TELEGRAM_BOT_TOKEN environment variable is required")?,
            telegram_chat_id: var("TELEGRAM_CHAT_ID")
                .context("TELEGRAM_CHAT_ID environment variable is required")?
                .trim()
                .to_string(),
            telegram_api_base: var_or("TELEGRAM_API_BASE", DEFAULT_TELEGRAM_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            post_interval_hours,

            image_provider,
            image_format,
            mobs_json_path: var("MOBS_JSON_PATH").map(PathBuf::from),

            max_retries,
            retry_backoff: Duration::from_secs(
                var_or("RETRY_BACKOFF_SECS", "1")
                    .trim()
                    .parse()
                    .context("RETRY_BACKOFF_SECS must be a whole number of seconds")?,
            ),
            variant_probability,
            http_timeout: Duration::from_secs(
                var_or("HTTP_TIMEOUT_SECS", "60")
                    .trim()
                    .parse()
                    .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),

            server_port: var_or("PORT", "5000")
                .trim()
                .parse()
                .context("PORT must be a valid port number")?,
        })
    }
}

/// Accept only `NxN` sizes; posters are always square
fn parse_square_size(raw: &str) -> Result<String> {
    let size = raw.trim().to_ascii_lowercase();
    let (width, height) = size
        .split_once('x')
        .context("IMAGE_SIZE must look like 1024x1024")?;
    let width: u32 = width.parse().context("IMAGE_SIZE width must be a number")?;
    let height: u32 = height.parse().context("IMAGE_SIZE height must be a number")?;
    if width == 0 || width != height {
        bail!("IMAGE_SIZE must be a square size, got '{}'", size);
    }
    Ok(size)
}
