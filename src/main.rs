mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;

use crate::config::Config;
use crate::error::AppError;
use crate::scheduler::spam_sweep;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let spam = startup::build_spam_service(&config)?;

    tracing::info!(
        alert_channel_id = config.mod_alert_channel_id.get(),
        "Starting anti-spam bot"
    );

    spam_sweep::start_scheduler(spam.clone()).await?;

    let client = bot::start::init_bot(&config, spam).await?;
    bot::start::start_bot(client).await
}
