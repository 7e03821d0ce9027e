//! Platform-neutral view of an inbound guild message.

use chrono::{DateTime, Utc};
use serenity::all::{ChannelId, GuildId, Message, MessageId, RoleId, UserId};
use std::collections::HashSet;

/// A guild message as seen by the spam engine.
///
/// Converted from a serenity `Message` at the bot boundary. Only guild messages
/// can be represented since enforcement needs a member to time out.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub message_id: MessageId,
    pub channel_id: ChannelId,
    pub guild_id: GuildId,
    pub author_id: UserId,
    /// Bot and system accounts are never checked.
    pub author_is_bot: bool,
    /// Account creation time derived from the author's snowflake.
    pub author_created_at: DateTime<Utc>,
    pub content: String,
    /// Distinct users mentioned in the message.
    pub user_mentions: HashSet<UserId>,
    /// Distinct roles mentioned in the message.
    pub role_mentions: HashSet<RoleId>,
    pub mention_everyone: bool,
}

impl InboundMessage {
    /// Converts a serenity message received from the gateway.
    ///
    /// # Returns
    /// - `Some(InboundMessage)` - Message was posted in a guild
    /// - `None` - Direct message, nothing to moderate
    pub fn from_message(message: &Message) -> Option<Self> {
        let guild_id = message.guild_id?;
        let created = message.author.id.created_at();

        Some(Self {
            message_id: message.id,
            channel_id: message.channel_id,
            guild_id,
            author_id: message.author.id,
            author_is_bot: message.author.bot || message.author.system,
            author_created_at: DateTime::from_timestamp(created.unix_timestamp(), 0)
                .unwrap_or_default(),
            content: message.content.clone(),
            user_mentions: message.mentions.iter().map(|user| user.id).collect(),
            role_mentions: message.mention_roles.iter().copied().collect(),
            mention_everyone: message.mention_everyone,
        })
    }

    /// Distinct user mentions plus role mentions. `@everyone` is not counted.
    pub fn mention_count(&self) -> usize {
        self.user_mentions.len() + self.role_mentions.len()
    }

    /// Content with surrounding whitespace removed, the form tracked for duplicates.
    pub fn trimmed_content(&self) -> &str {
        self.content.trim()
    }
}
