//! Spam classification and enforcement.
//!
//! Every guild message from a human author is recorded in the author's tracker
//! and checked against four rules, in this order, stopping at the first match:
//!
//! 1. **Suspicious content** - scam/phishing signatures and structural abuse
//!    (see [`rules`]). Delete + 5 minute timeout.
//! 2. **Mention spam** - too many distinct user and role mentions.
//!    Delete + 10 minute timeout, regardless of earlier warnings.
//! 3. **Duplicate spam** - the same content repeated inside the window.
//! 4. **Rapid spam** - too many messages inside the window.
//!
//! The two window rules always delete the message but only time the member out
//! when the warning cooldown has passed. Each such escalation bumps the user's
//! warning count and the timeout grows with it, up to a cap.
//!
//! Failures of Discord calls are logged and never reach the event dispatcher,
//! which only learns whether the message was acted upon.

pub mod rules;

#[cfg(test)]
mod test;

use chrono::Utc;
use serenity::all::{ChannelId, UserId};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::data::spam_tracker::SpamTrackerRepository;
use crate::error::AppError;
use crate::model::alert::SpamAlert;
use crate::model::message::InboundMessage;
use crate::model::spam::{Enforcement, SpamConfig, SpamVerdict, TimeoutAction};
use crate::service::moderation::ModerationActions;

use self::rules::ContentRules;

pub const SUSPICIOUS_TIMEOUT: Duration = Duration::from_secs(5 * 60);
pub const MENTION_TIMEOUT: Duration = Duration::from_secs(10 * 60);
pub const DUPLICATE_TIMEOUT_STEP: Duration = Duration::from_secs(5 * 60);
pub const DUPLICATE_TIMEOUT_MAX: Duration = Duration::from_secs(60 * 60);
pub const RAPID_TIMEOUT_STEP: Duration = Duration::from_secs(3 * 60);
pub const RAPID_TIMEOUT_MAX: Duration = Duration::from_secs(30 * 60);

pub const SUSPICIOUS_REASON: &str = "Suspicious message (potential scam/spam)";
pub const MENTION_REASON: &str = "Mention spam";
pub const DUPLICATE_REASON: &str = "Duplicate message spam";
pub const RAPID_REASON: &str = "Rapid messaging";

/// Timeout for the `warnings`-th escalation: `warnings * step`, capped at `max`.
pub fn escalated_timeout(warnings: u32, step: Duration, max: Duration) -> Duration {
    step.saturating_mul(warnings).min(max)
}

/// The spam engine.
///
/// Cloning is cheap, clones share the tracker repository and rule table.
#[derive(Clone)]
pub struct SpamService {
    config: SpamConfig,
    rules: Arc<ContentRules>,
    trackers: SpamTrackerRepository,
    alert_channel_id: ChannelId,
}

impl SpamService {
    /// Creates the engine over an injected tracker repository.
    ///
    /// # Arguments
    /// - `config` - Detection thresholds
    /// - `trackers` - Tracker store owned by this engine
    /// - `alert_channel_id` - Moderation channel receiving alerts
    ///
    /// # Returns
    /// - `Ok(SpamService)` - Ready to check messages
    /// - `Err(AppError::RegexErr)` - A content signature failed to compile
    pub fn new(
        config: SpamConfig,
        trackers: SpamTrackerRepository,
        alert_channel_id: ChannelId,
    ) -> Result<Self, AppError> {
        let rules = ContentRules::new(config.link_limit)?;

        Ok(Self {
            config,
            rules: Arc::new(rules),
            trackers,
            alert_channel_id,
        })
    }

    pub fn config(&self) -> &SpamConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn trackers(&self) -> &SpamTrackerRepository {
        &self.trackers
    }

    /// Checks a message and enforces against it if it is spam.
    ///
    /// Bot/system authors and blank messages are ignored. Discord failures are
    /// logged and swallowed.
    ///
    /// # Arguments
    /// - `message` - Message to inspect
    /// - `moderation` - Capability used to delete, time out and alert
    ///
    /// # Returns
    /// - `true` - The message was acted upon, callers should stop processing it
    /// - `false` - Not spam, or every moderation call failed
    pub async fn check_spam(
        &self,
        message: &InboundMessage,
        moderation: &dyn ModerationActions,
    ) -> bool {
        if message.author_is_bot || message.trimmed_content().is_empty() {
            return false;
        }

        let (verdict, enforcement) = self.classify(message, Instant::now()).await;
        let Some(enforcement) = enforcement.filter(|_| verdict.is_spam()) else {
            return false;
        };

        info!(
            user_id = message.author_id.get(),
            channel_id = message.channel_id.get(),
            verdict = verdict.label(),
            detail = %verdict.detail(),
            "Spam detected"
        );

        self.enforce(message, verdict, &enforcement, moderation)
            .await
    }

    /// Records the message and decides the verdict and enforcement.
    ///
    /// Updates the author's tracker, including the warning count when a window
    /// rule escalates. Performs no Discord calls.
    ///
    /// # Arguments
    /// - `message` - Message to inspect
    /// - `now` - Time the message is processed
    ///
    /// # Returns
    /// - `(SpamVerdict::Clean, None)` - Nothing to do
    /// - `(verdict, Some(enforcement))` - Spam and the actions to take
    pub async fn classify(
        &self,
        message: &InboundMessage,
        now: Instant,
    ) -> (SpamVerdict, Option<Enforcement>) {
        let content = message.trimmed_content();
        let snapshot = self
            .trackers
            .record(message.author_id, content, now, self.config.time_window)
            .await;

        if let Some(pattern) = self.rules.find_match(&message.content) {
            return (
                SpamVerdict::SuspiciousContent { pattern },
                Some(Self::fixed(SUSPICIOUS_TIMEOUT, SUSPICIOUS_REASON)),
            );
        }

        let mentions = message.mention_count();
        if mentions >= self.config.mention_limit {
            return (
                SpamVerdict::MentionSpam { count: mentions },
                Some(Self::fixed(MENTION_TIMEOUT, MENTION_REASON)),
            );
        }

        if snapshot.duplicate_count >= self.config.duplicate_limit {
            let enforcement = self
                .escalate(
                    message.author_id,
                    now,
                    DUPLICATE_TIMEOUT_STEP,
                    DUPLICATE_TIMEOUT_MAX,
                    DUPLICATE_REASON,
                )
                .await;
            return (
                SpamVerdict::DuplicateSpam {
                    count: snapshot.duplicate_count,
                },
                Some(enforcement),
            );
        }

        if snapshot.message_count >= self.config.message_limit {
            let enforcement = self
                .escalate(
                    message.author_id,
                    now,
                    RAPID_TIMEOUT_STEP,
                    RAPID_TIMEOUT_MAX,
                    RAPID_REASON,
                )
                .await;
            return (
                SpamVerdict::RapidSpam {
                    count: snapshot.message_count,
                },
                Some(enforcement),
            );
        }

        (SpamVerdict::Clean, None)
    }

    /// Trims every tracker and evicts idle ones.
    ///
    /// # Returns
    /// - Number of evicted trackers
    pub async fn sweep(&self) -> usize {
        self.trackers
            .sweep(
                Instant::now(),
                self.config.time_window,
                self.config.warning_cooldown,
            )
            .await
    }

    fn fixed(duration: Duration, reason: &'static str) -> Enforcement {
        Enforcement {
            timeout: Some(TimeoutAction { duration, reason }),
            warnings: None,
        }
    }

    /// Escalates the author if the cooldown allows, otherwise delete only.
    async fn escalate(
        &self,
        user_id: UserId,
        now: Instant,
        step: Duration,
        max: Duration,
        reason: &'static str,
    ) -> Enforcement {
        match self
            .trackers
            .try_escalate(user_id, now, self.config.warning_cooldown)
            .await
        {
            Some(warnings) => Enforcement {
                timeout: Some(TimeoutAction {
                    duration: escalated_timeout(warnings, step, max),
                    reason,
                }),
                warnings: Some(warnings),
            },
            None => {
                debug!(
                    user_id = user_id.get(),
                    "Within warning cooldown, deleting without timeout"
                );
                Enforcement {
                    timeout: None,
                    warnings: None,
                }
            }
        }
    }

    /// Deletes, times out, then alerts.
    ///
    /// The alert is only sent when at least one action went through, and its
    /// failure never changes the result.
    async fn enforce(
        &self,
        message: &InboundMessage,
        verdict: SpamVerdict,
        enforcement: &Enforcement,
        moderation: &dyn ModerationActions,
    ) -> bool {
        let mut acted = false;

        match moderation
            .delete_message(message.channel_id, message.message_id)
            .await
        {
            Ok(()) => acted = true,
            Err(e) => warn!(
                message_id = message.message_id.get(),
                channel_id = message.channel_id.get(),
                "Failed to delete spam message: {}",
                e
            ),
        }

        if let Some(timeout) = &enforcement.timeout {
            match moderation
                .timeout_member(
                    message.guild_id,
                    message.author_id,
                    timeout.duration,
                    timeout.reason,
                )
                .await
            {
                Ok(()) => acted = true,
                Err(e) => error!(
                    user_id = message.author_id.get(),
                    guild_id = message.guild_id.get(),
                    "Failed to timeout member for {}: {}",
                    verdict.label(),
                    e
                ),
            }
        }

        if !acted {
            return false;
        }

        let alert = SpamAlert::new(
            message.author_id,
            message.channel_id,
            verdict,
            enforcement,
            &message.content,
            message.author_created_at,
            Utc::now(),
        );

        if let Err(e) = moderation.send_alert(self.alert_channel_id, &alert).await {
            error!(
                channel_id = self.alert_channel_id.get(),
                "Failed to post anti-spam alert: {}",
                e
            );
        }

        true
    }
}
