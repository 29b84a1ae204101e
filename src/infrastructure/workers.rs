//! Background workers for scheduled posting and chat commands
//!
//! Both workers share one [`PosterService`] and run independently; a command
//! may overlap a scheduled post.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::application::services::PosterService;
use crate::infrastructure::telegram::TelegramClient;

/// Chat command that requests a poster on demand
pub const POSTER_COMMAND: &str = "grokposter";

const LONG_POLL_TIMEOUT_SECS: u64 = 30;
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

const GENERATING_REPLY: &str = "⚡ MegaForge Prime Engine is generating your MegaGrok poster...";

/// Post to the configured chat once at startup and then every interval
pub async fn scheduled_post_worker(
    service: Arc<PosterService>,
    chat_id: String,
    interval_hours: f64,
) {
    let period = match Duration::try_from_secs_f64(interval_hours * 3600.0) {
        Ok(period) if !period.is_zero() => period,
        _ => {
            tracing::error!(
                "Invalid posting interval {}h, scheduler not started",
                interval_hours
            );
            return;
        }
    };

    // The first tick completes immediately
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::info!("Scheduler started | Interval: {}h", interval_hours);

    loop {
        ticker.tick().await;
        tracing::info!("Running scheduled MegaGrok poster job...");

        let outcome = service
            .produce_and_post(&chat_id, interval_hours, None)
            .await;
        if outcome.success {
            tracing::info!("Scheduled poster posted: {}", outcome.detail);
        } else {
            tracing::error!("Scheduled poster FAILED: {}", outcome.detail);
        }
    }
}

/// Long-poll Telegram and dispatch poster commands
pub async fn command_listener_worker(
    telegram: Arc<TelegramClient>,
    service: Arc<PosterService>,
    interval_hours: f64,
) {
    tracing::info!("Starting Telegram polling for /{}", POSTER_COMMAND);
    let mut offset: Option<i64> = None;

    loop {
        let updates = match telegram.get_updates(offset, LONG_POLL_TIMEOUT_SECS).await {
            Ok(updates) => updates,
            Err(e) => {
                tracing::error!("Failed to poll Telegram updates: {}", e);
                tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let Some(args) = message
                .text
                .as_deref()
                .and_then(|text| parse_command(text, POSTER_COMMAND))
            else {
                continue;
            };

            let chat_id = message.chat.id.to_string();
            let name_override = Some(args.to_string()).filter(|args| !args.is_empty());
            tracing::info!(
                "/{} from chat {} (mob: {:?})",
                POSTER_COMMAND,
                chat_id,
                name_override
            );

            tokio::spawn(handle_poster_command(
                telegram.clone(),
                service.clone(),
                chat_id,
                name_override,
                interval_hours,
            ));
        }
    }
}

/// Acknowledge the command, produce the poster and report failures back
async fn handle_poster_command(
    telegram: Arc<TelegramClient>,
    service: Arc<PosterService>,
    chat_id: String,
    name_override: Option<String>,
    interval_hours: f64,
) {
    if let Err(e) = telegram.send_message(&chat_id, GENERATING_REPLY).await {
        tracing::warn!("Failed to acknowledge command in chat {}: {}", chat_id, e);
    }

    let outcome = service
        .produce_and_post(&chat_id, interval_hours, name_override.as_deref())
        .await;
    if outcome.success {
        tracing::info!("On-demand poster posted to {}: {}", chat_id, outcome.detail);
        return;
    }

    tracing::warn!("On-demand poster failed for {}: {}", chat_id, outcome.detail);
    let reply = format!("❌ Poster generation failed:\n{}", outcome.detail);
    if let Err(e) = telegram.send_message(&chat_id, &reply).await {
        tracing::error!("Failed to report failure to chat {}: {}", chat_id, e);
    }
}

/// Match `/command`, `/command@BotName` and their arguments
///
/// Returns the trimmed argument text (possibly empty) when `text` invokes
/// `command`.
pub fn parse_command<'a>(text: &'a str, command: &str) -> Option<&'a str> {
    let text = text.trim_start();
    let invocation = text.strip_prefix('/')?;

    let (head, args) = match invocation.find(char::is_whitespace) {
        Some(split) => invocation.split_at(split),
        None => (invocation, ""),
    };
    let name = head.split('@').next().unwrap_or(head);

    (name == command).then(|| args.trim())
}
