//! Recording [`ModerationActions`] double for service tests.

use async_trait::async_trait;
use serenity::all::{ChannelId, GuildId, MessageId, UserId};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::AppError;
use crate::model::alert::SpamAlert;
use crate::service::moderation::ModerationActions;

/// A call made through the double, recorded whether or not it was set to fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ModerationCall {
    Delete {
        channel: ChannelId,
        message: MessageId,
    },
    Timeout {
        guild: GuildId,
        user: UserId,
        duration: Duration,
        reason: String,
    },
    RemoveTimeout {
        guild: GuildId,
        user: UserId,
    },
    Ban {
        guild: GuildId,
        user: UserId,
        reason: String,
    },
    Alert {
        channel: ChannelId,
        alert: SpamAlert,
    },
}

#[derive(Default)]
pub struct RecordingModeration {
    pub fail_delete: bool,
    pub fail_timeout: bool,
    pub fail_ban: bool,
    pub fail_alert: bool,
    pub(crate) calls: Mutex<Vec<ModerationCall>>,
}

impl RecordingModeration {
    pub fn calls(&self) -> Vec<ModerationCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn timeouts(&self) -> Vec<(Duration, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ModerationCall::Timeout {
                    duration, reason, ..
                } => Some((duration, reason)),
                _ => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ModerationCall::Delete { .. }))
            .count()
    }

    pub fn alerts(&self) -> Vec<SpamAlert> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ModerationCall::Alert { alert, .. } => Some(alert),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ModerationCall, fail: bool) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(call);
        if fail {
            return Err(serenity::Error::Other("Unknown Message").into());
        }
        Ok(())
    }
}

#[async_trait]
impl ModerationActions for RecordingModeration {
    async fn delete_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<(), AppError> {
        self.record(
            ModerationCall::Delete {
                channel: channel_id,
                message: message_id,
            },
            self.fail_delete,
        )
    }

    async fn timeout_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        duration: Duration,
        reason: &str,
    ) -> Result<(), AppError> {
        self.record(
            ModerationCall::Timeout {
                guild: guild_id,
                user: user_id,
                duration,
                reason: reason.to_string(),
            },
            self.fail_timeout,
        )
    }

    async fn remove_timeout(&self, guild_id: GuildId, user_id: UserId) -> Result<(), AppError> {
        self.record(
            ModerationCall::RemoveTimeout {
                guild: guild_id,
                user: user_id,
            },
            false,
        )
    }

    async fn ban_member(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        reason: &str,
    ) -> Result<(), AppError> {
        self.record(
            ModerationCall::Ban {
                guild: guild_id,
                user: user_id,
                reason: reason.to_string(),
            },
            self.fail_ban,
        )
    }

    async fn send_alert(&self, channel_id: ChannelId, alert: &SpamAlert) -> Result<(), AppError> {
        self.record(
            ModerationCall::Alert {
                channel: channel_id,
                alert: alert.clone(),
            },
            self.fail_alert,
        )
    }
}
