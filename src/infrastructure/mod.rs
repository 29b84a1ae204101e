//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Config: Application configuration
//! - Roster loader: Built-in mobs and the JSON override file
//! - Image provider: Stability / OpenAI clients with retry
//! - Telegram: Bot API client for delivery and command polling
//! - Workers: Scheduler and command listener
//! - HTTP: Liveness routes
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod image_provider;
pub mod roster_loader;
pub mod state;
pub mod telegram;
pub mod workers;

#[cfg(test)]
pub(crate) mod test_support;
