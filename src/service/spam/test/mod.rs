use crate::data::spam_tracker::SpamTrackerRepository;
use crate::model::message::InboundMessage;
use crate::model::spam::{SpamConfig, SpamVerdict};
use crate::service::mock::{ModerationCall, RecordingModeration};
use crate::service::spam::*;
use chrono::Utc;
use serenity::all::{ChannelId, GuildId, MessageId, RoleId, UserId};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;


const GUILD: u64 = 500000000000000001;
const CHANNEL: u64 = 400000000000000001;
const ALERT_CHANNEL: u64 = 400000000000000099;
const SPAMMER: u64 = 200000000000000001;

static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(300000000000000001);

fn service() -> SpamService {
    SpamService::new(
        SpamConfig::default(),
        SpamTrackerRepository::new(),
        ChannelId::new(ALERT_CHANNEL),
    )
    .unwrap()
}

/// Ordinary guild message from a month-old account with no mentions.
fn message(author: u64, content: &str) -> InboundMessage {
    InboundMessage {
        message_id: MessageId::new(NEXT_MESSAGE_ID.fetch_add(1, Ordering::Relaxed)),
        channel_id: ChannelId::new(CHANNEL),
        guild_id: GuildId::new(GUILD),
        author_id: UserId::new(author),
        author_is_bot: false,
        author_created_at: Utc::now() - chrono::Duration::days(30),
        content: content.to_string(),
        user_mentions: HashSet::new(),
        role_mentions: HashSet::new(),
        mention_everyone: false,
    }
}

fn with_mentions(mut message: InboundMessage, users: u64, roles: u64) -> InboundMessage {
    message.user_mentions = (1..=users).map(|id| UserId::new(700 + id)).collect();
    message.role_mentions = (1..=roles).map(|id| RoleId::new(800 + id)).collect();
    message
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
