//! Test factory for creating Serenity Message objects.

use serenity::all::{Message, User};

/// Creates a test Serenity Message as received through the gateway.
///
/// # Arguments
/// - `message_id` - Message ID (snowflake)
/// - `channel_id` - Channel the message was posted in
/// - `guild_id` - Guild of the channel, `None` for a DM
/// - `author` - Message author
/// - `content` - Message text
/// - `mentions` - Users mentioned by the message
/// - `mention_roles` - IDs of roles mentioned by the message
///
/// # Returns
/// - `Message` - A valid Serenity Message struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a Message (indicates invalid test data)
pub fn create_test_message(
    message_id: u64,
    channel_id: u64,
    guild_id: Option<u64>,
    author: User,
    content: &str,
    mentions: Vec<User>,
    mention_roles: Vec<u64>,
) -> Message {
    let author = serde_json::to_value(&author).expect("Failed to serialize test author");
    let mentions = serde_json::to_value(&mentions).expect("Failed to serialize test mentions");
    let mention_roles: Vec<String> = mention_roles.iter().map(|id| id.to_string()).collect();

    serde_json::from_value(serde_json::json!({
        "id": message_id.to_string(),
        "channel_id": channel_id.to_string(),
        "guild_id": guild_id.map(|id| id.to_string()),
        "author": author,
        "content": content,
        "timestamp": "2024-01-01T00:00:00.000000+00:00",
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": mentions,
        "mention_roles": mention_roles,
        "mention_channels": [],
        "attachments": [],
        "embeds": [],
        "reactions": [],
        "pinned": false,
        "type": 0,
        "flags": 0,
        "components": [],
        "sticker_items": [],
    }))
    .expect("Failed to create test message from JSON")
}
