//! Moderation alert payload posted after an enforcement action.

use chrono::{DateTime, Utc};
use serenity::all::{
    ButtonStyle, ChannelId, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
    CreateMessage, Timestamp, UserId,
};

use crate::model::spam::{Enforcement, SpamVerdict};

/// Maximum number of characters of the offending message shown in an alert.
pub const PREVIEW_MAX_CHARS: usize = 500;

const COLOR_SUSPICIOUS: u32 = 0xE74C3C;
const COLOR_MENTION: u32 = 0xE67E22;
const COLOR_FLOOD: u32 = 0xF1C40F;

/// Follow-up controls attached to every alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    RemoveTimeout,
    Ban,
}

impl AlertAction {
    const REMOVE_TIMEOUT_PREFIX: &'static str = "spam_untimeout";
    const BAN_PREFIX: &'static str = "spam_ban";

    fn prefix(&self) -> &'static str {
        match self {
            AlertAction::RemoveTimeout => Self::REMOVE_TIMEOUT_PREFIX,
            AlertAction::Ban => Self::BAN_PREFIX,
        }
    }

    /// Button custom id, `<action>:<user id>`.
    pub fn custom_id(&self, target: UserId) -> String {
        format!("{}:{}", self.prefix(), target.get())
    }

    /// Parses a button custom id produced by [`AlertAction::custom_id`].
    ///
    /// Returns `None` for ids that belong to other components.
    pub fn parse(custom_id: &str) -> Option<(AlertAction, UserId)> {
        let (prefix, raw_id) = custom_id.split_once(':')?;
        let action = match prefix {
            Self::REMOVE_TIMEOUT_PREFIX => AlertAction::RemoveTimeout,
            Self::BAN_PREFIX => AlertAction::Ban,
            _ => return None,
        };
        let id = raw_id.parse::<u64>().ok().filter(|id| *id != 0)?;

        Some((action, UserId::new(id)))
    }
}

/// Report sent to the moderation channel.
#[derive(Debug, Clone, PartialEq)]
pub struct SpamAlert {
    pub target_id: UserId,
    pub channel_id: ChannelId,
    pub verdict: SpamVerdict,
    /// What was done, e.g. `Message deleted, timed out for 5 minutes`.
    pub action: String,
    /// Truncated message content, already escaped for a code block.
    pub preview: String,
    pub account_age: String,
    pub warnings: Option<u32>,
}

impl SpamAlert {
    /// Assembles the alert for a message that was just enforced.
    ///
    /// # Arguments
    /// - `target_id` - Author of the offending message
    /// - `channel_id` - Channel the message was posted in
    /// - `verdict` - Detection outcome
    /// - `enforcement` - Actions decided for the verdict
    /// - `content` - Raw message content
    /// - `account_created_at` - Author's account creation time
    /// - `now` - Reference time for the account age
    pub fn new(
        target_id: UserId,
        channel_id: ChannelId,
        verdict: SpamVerdict,
        enforcement: &Enforcement,
        content: &str,
        account_created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            target_id,
            channel_id,
            verdict,
            action: enforcement.summary(),
            preview: preview(content),
            account_age: account_age(account_created_at, now),
            warnings: enforcement.warnings,
        }
    }

    fn color(&self) -> u32 {
        match self.verdict {
            SpamVerdict::SuspiciousContent { .. } => COLOR_SUSPICIOUS,
            SpamVerdict::MentionSpam { .. } => COLOR_MENTION,
            _ => COLOR_FLOOD,
        }
    }

    /// Renders the alert as an embed with "remove timeout" and "ban" buttons.
    pub fn to_message(&self) -> CreateMessage {
        let mut embed = CreateEmbed::new()
            .title(format!("Anti-Spam: {}", self.verdict.title()))
            .color(self.color())
            .field("Member", format!("<@{}>", self.target_id.get()), true)
            .field("Channel", format!("<#{}>", self.channel_id.get()), true)
            .field("Detection", self.verdict.detail(), false)
            .field("Action", &self.action, false)
            .field("Account Age", &self.account_age, true);

        if let Some(warnings) = self.warnings {
            embed = embed.field("Warnings", warnings.to_string(), true);
        }

        embed = embed
            .field("Content", format!("```\n{}\n```", self.preview), false)
            .footer(CreateEmbedFooter::new(format!(
                "User ID: {}",
                self.target_id.get()
            )))
            .timestamp(Timestamp::now());

        let buttons = vec![
            CreateButton::new(AlertAction::RemoveTimeout.custom_id(self.target_id))
                .label("Remove Timeout")
                .style(ButtonStyle::Secondary),
            CreateButton::new(AlertAction::Ban.custom_id(self.target_id))
                .label("Ban")
                .style(ButtonStyle::Danger),
        ];

        CreateMessage::new()
            .embed(embed)
            .components(vec![CreateActionRow::Buttons(buttons)])
    }
}

/// Truncates content to [`PREVIEW_MAX_CHARS`] characters for a code block.
///
/// Backtick fences inside the content are broken up so they cannot close the block.
pub fn preview(content: &str) -> String {
    let mut preview: String = content.chars().take(PREVIEW_MAX_CHARS).collect();
    if content.chars().count() > PREVIEW_MAX_CHARS {
        preview.push_str("...");
    }

    preview.replace("```", "`\u{200B}``")
}

/// Describes how old an account is, e.g. `3 days (created <t:1700000000:D>)`.
pub fn account_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(created_at);

    let human = if age.num_days() >= 1 {
        match age.num_days() {
            1 => "1 day".to_string(),
            days => format!("{} days", days),
        }
    } else if age.num_hours() >= 1 {
        match age.num_hours() {
            1 => "1 hour".to_string(),
            hours => format!("{} hours", hours),
        }
    } else {
        "less than an hour".to_string()
    };

    format!("{} (created <t:{}:D>)", human, created_at.timestamp())
}
