//! Discord moderation capabilities used by the services.
//!
//! The spam engine never talks to serenity directly: it acts through
//! [`ModerationActions`], which the bot backs with [`DiscordModeration`] and the
//! tests back with a recording double.

use async_trait::async_trait;
use chrono::Utc;
use serenity::all::{
    ChannelId, EditMember, GuildId, MessageId, Permissions, Timestamp, UserId,
};
use serenity::http::Http;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::error::{internal::InternalError, AppError};
use crate::model::alert::{AlertAction, SpamAlert};

/// Audit log reason used when a moderator bans from an alert.
pub const ALERT_BAN_REASON: &str = "Banned from anti-spam alert";

/// Fallible moderation calls against the chat platform.
#[async_trait]
pub trait ModerationActions: Send + Sync {
    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), AppError>;

    async fn timeout_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        duration: Duration,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn remove_timeout(&self, guild_id: GuildId, user_id: UserId) -> Result<(), AppError>;

    async fn ban_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        reason: &str,
    ) -> Result<(), AppError>;

    async fn send_alert(&self, channel_id: ChannelId, alert: &SpamAlert) -> Result<(), AppError>;
}

/// [`ModerationActions`] backed by the bot's serenity HTTP client.
#[derive(Clone)]
pub struct DiscordModeration {
    http: Arc<Http>,
}

impl DiscordModeration {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

/// Converts a timeout length into the Discord deadline starting now.
fn timeout_deadline(duration: Duration) -> Result<Timestamp, AppError> {
    let now = Utc::now().timestamp();
    let timestamp = i64::try_from(duration.as_secs())
        .ok()
        .and_then(|secs| now.checked_add(secs))
        .ok_or_else(|| InternalError::InvalidDiscordTimestamp {
            timestamp: now,
            reason: format!("timeout of {}s overflows", duration.as_secs()),
        })?;

    Timestamp::from_unix_timestamp(timestamp).map_err(|e| {
        AppError::InternalError(InternalError::InvalidDiscordTimestamp {
            timestamp,
            reason: e.to_string(),
        })
    })
}

#[async_trait]
impl ModerationActions for DiscordModeration {
    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), AppError> {
        self.http
            .delete_message(channel_id, message_id, Some("Anti-spam"))
            .await?;

        Ok(())
    }

    async fn timeout_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        duration: Duration,
        reason: &str,
    ) -> Result<(), AppError> {
        let until = timeout_deadline(duration)?;

        guild_id
            .edit_member(
                &self.http,
                user_id,
                EditMember::new()
                    .disable_communication_until_datetime(until)
                    .audit_log_reason(reason),
            )
            .await?;

        Ok(())
    }

    async fn remove_timeout(&self, guild_id: GuildId, user_id: UserId) -> Result<(), AppError> {
        guild_id
            .edit_member(&self.http, user_id, EditMember::new().enable_communication())
            .await?;

        Ok(())
    }

    async fn ban_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        reason: &str,
    ) -> Result<(), AppError> {
        guild_id
            .ban_with_reason(&self.http, user_id, 0, reason)
            .await?;

        Ok(())
    }

    async fn send_alert(&self, channel_id: ChannelId, alert: &SpamAlert) -> Result<(), AppError> {
        channel_id
            .send_message(&self.http, alert.to_message())
            .await?;

        Ok(())
    }
}

impl AlertAction {
    /// Permission a moderator needs to use this control.
    pub fn required_permission(&self) -> Permissions {
        match self {
            AlertAction::RemoveTimeout => Permissions::MODERATE_MEMBERS,
            AlertAction::Ban => Permissions::BAN_MEMBERS,
        }
    }

    /// Whether a member with `permissions` may use this control.
    pub fn is_permitted(&self, permissions: Permissions) -> bool {
        permissions.administrator() || permissions.contains(self.required_permission())
    }
}

/// Runs an alert follow-up control and describes the result for the moderator.
///
/// Permission checks happen before this is called.
///
/// # Arguments
/// - `moderation` - Capability to act through
/// - `guild_id` - Guild the alert belongs to
/// - `action` - Which control was used
/// - `target` - Member the alert was about
/// - `moderator` - Display name of the moderator, for logs
///
/// # Returns
/// - `Ok(String)` - Confirmation to show the moderator
/// - `Err(AppError)` - The Discord call failed
pub async fn apply_alert_action(
    moderation: &dyn ModerationActions,
    guild_id: GuildId,
    action: AlertAction,
    target: UserId,
    moderator: &str,
) -> Result<String, AppError> {
    match action {
        AlertAction::RemoveTimeout => {
            moderation.remove_timeout(guild_id, target).await?;
            info!(
                user_id = target.get(),
                moderator, "Timeout removed from anti-spam alert"
            );
            Ok(format!("Removed timeout from <@{}>.", target.get()))
        }
        AlertAction::Ban => {
            moderation
                .ban_member(guild_id, target, ALERT_BAN_REASON)
                .await?;
            info!(user_id = target.get(), moderator, "Member banned from anti-spam alert");
            Ok(format!("Banned <@{}>.", target.get()))
        }
    }
}
