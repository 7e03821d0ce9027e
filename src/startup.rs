use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::data::spam_tracker::SpamTrackerRepository;
use crate::error::AppError;
use crate::service::spam::SpamService;

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to `info` when the variable is
/// unset or cannot be parsed. Must be called once, before anything logs.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}

/// Builds the spam engine with an empty tracker store.
///
/// # Arguments
/// - `config` - Application configuration holding thresholds and the alert channel
///
/// # Returns
/// - `Ok(SpamService)` - Engine shared by the bot and the sweep scheduler
/// - `Err(AppError::RegexErr)` - A content rule failed to compile
pub fn build_spam_service(config: &Config) -> Result<SpamService, AppError> {
    SpamService::new(
        config.spam.clone(),
        SpamTrackerRepository::new(),
        config.mod_alert_channel_id,
    )
}
