use serenity::all::ChannelId;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{config::ConfigError, AppError};
use crate::model::spam::SpamConfig;

pub struct Config {
    pub discord_bot_token: String,
    pub mod_alert_channel_id: ChannelId,
    pub spam: SpamConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Arguments
    /// - `lookup` - Returns the raw value of a variable, `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - Every required variable present and every value valid
    /// - `Err(AppError::ConfigErr)` - Missing or invalid variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SpamConfig::default();

        let discord_bot_token = lookup("DISCORD_BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?;
        let mod_alert_channel_id = required::<u64>(&lookup, "MOD_ALERT_CHANNEL_ID")?;

        let spam = SpamConfig {
            message_limit: optional(&lookup, "SPAM_MESSAGE_LIMIT", defaults.message_limit)?,
            time_window: optional_millis(&lookup, "SPAM_TIME_WINDOW_MS", defaults.time_window)?,
            duplicate_limit: optional(&lookup, "SPAM_DUPLICATE_LIMIT", defaults.duplicate_limit)?,
            mention_limit: optional(&lookup, "SPAM_MENTION_LIMIT", defaults.mention_limit)?,
            link_limit: optional(&lookup, "SPAM_LINK_LIMIT", defaults.link_limit)?,
            warning_cooldown: optional_millis(
                &lookup,
                "SPAM_WARNING_COOLDOWN_MS",
                defaults.warning_cooldown,
            )?,
        };

        Ok(Self {
            discord_bot_token,
            mod_alert_channel_id: ChannelId::new(mod_alert_channel_id),
            spam,
        })
    }
}

fn parse_positive<T>(name: &str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => Ok(value),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: raw,
        }),
    }
}

fn required<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    let raw = lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))?;
    parse_positive(name, raw)
}

fn optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    match lookup(name) {
        Some(raw) => parse_positive(name, raw),
        None => Ok(default),
    }
}

fn optional_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match lookup(name) {
        Some(raw) => parse_positive::<u64>(name, raw).map(Duration::from_millis),
        None => Ok(default),
    }
}
