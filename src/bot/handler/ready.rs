use serenity::all::{Context, Ready};

use crate::service::spam::SpamService;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `spam` - Spam engine, for logging the active thresholds
/// - `ctx` - Discord context
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(spam: &SpamService, _ctx: Context, ready: Ready) {
    let config = spam.config();

    tracing::info!(
        guilds = ready.guilds.len(),
        message_limit = config.message_limit,
        window_ms = u64::try_from(config.time_window.as_millis()).unwrap_or(u64::MAX),
        duplicate_limit = config.duplicate_limit,
        mention_limit = config.mention_limit,
        "{} is connected to Discord",
        ready.user.name
    );
}
