use serenity::all::{Client, GatewayIntents};

use crate::bot::handler::Handler;
use crate::config::Config;
use crate::error::AppError;
use crate::service::spam::SpamService;

/// Builds the Discord client without connecting it.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `spam` - Spam engine shared with the sweep scheduler
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError)` - Client construction failed, e.g. a malformed token
pub async fn init_bot(config: &Config, spam: SpamService) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(spam))
        .await?;

    Ok(client)
}

/// Connects to the gateway and processes events until shutdown.
///
/// # Arguments
/// - `client` - Client returned by [`init_bot`]
///
/// # Returns
/// - `Ok(())` - The bot shut down cleanly
/// - `Err(AppError)` - The gateway connection failed
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
