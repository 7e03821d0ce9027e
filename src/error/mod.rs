//! Error types for the bot.
//!
//! `AppError` is the top-level error returned from startup code and from the
//! moderation capability. The spam engine itself never returns an `AppError` to
//! the event dispatcher: it logs the failure and degrades to "no action taken".

pub mod config;
pub mod internal;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError};

/// Top-level application error type.
///
/// Most variants use `#[from]` so startup code can propagate with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// A content rule pattern failed to compile.
    #[error(transparent)]
    RegexErr(#[from] regex::Error),

    /// Unexpected internal state, usually a value Discord cannot represent.
    #[error(transparent)]
    InternalError(#[from] InternalError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to keep the size of `AppError` small, serenity::Error is very large.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
