use serenity::all::{Context, Message};

use crate::model::message::InboundMessage;
use crate::service::moderation::DiscordModeration;
use crate::service::spam::SpamService;

/// Handle message creation in a channel
pub async fn handle_message(spam: &SpamService, ctx: Context, message: Message) {
    // DMs have no member to time out
    let Some(inbound) = InboundMessage::from_message(&message) else {
        return;
    };

    let moderation = DiscordModeration::new(ctx.http.clone());

    if spam.check_spam(&inbound, &moderation).await {
        tracing::debug!(
            "Suppressed message {} from {} in channel {}",
            inbound.message_id,
            inbound.author_id,
            inbound.channel_id
        );
    }
}
