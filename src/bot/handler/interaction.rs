use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    Interaction, Permissions,
};

use crate::model::alert::AlertAction;
use crate::service::moderation::{apply_alert_action, DiscordModeration};

/// Handles component clicks, acting on the ones that belong to spam alerts.
///
/// Every reply is ephemeral so only the clicking moderator sees it.
///
/// # Arguments
/// - `ctx` - Discord context for API calls
/// - `interaction` - The interaction event
pub async fn handle_interaction_create(ctx: Context, interaction: Interaction) {
    let Interaction::Component(component) = interaction else {
        return;
    };
    let Some((action, target)) = AlertAction::parse(&component.data.custom_id) else {
        return;
    };
    let Some(guild_id) = component.guild_id else {
        return;
    };

    let permissions = component
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .unwrap_or_else(Permissions::empty);

    let reply = if !action.is_permitted(permissions) {
        tracing::warn!(
            "{} ({}) used {:?} on {} without permission",
            component.user.name,
            component.user.id,
            action,
            target
        );
        refusal(action)
    } else {
        let moderation = DiscordModeration::new(ctx.http.clone());
        match apply_alert_action(&moderation, guild_id, action, target, &component.user.name).await
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Failed to apply {:?} to {}: {}", action, target, e);
                format!("Failed: {}", e)
            }
        }
    };

    respond(&ctx, &component, reply).await;
}

/// Message shown to a member lacking the permission for `action`.
fn refusal(action: AlertAction) -> String {
    let permission = match action {
        AlertAction::RemoveTimeout => "Moderate Members",
        AlertAction::Ban => "Ban Members",
    };
    format!("You need the {} permission to do that.", permission)
}

async fn respond(ctx: &Context, component: &ComponentInteraction, content: String) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );

    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to interaction: {}", e);
    }
}
