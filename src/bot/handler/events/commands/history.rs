use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use poise::CreateReply;
use serenity::all::CreateEmbed;

use crate::bot::handler::events::HandlerResult;
use crate::bot::handler::framework::Context;
use crate::chat::{ChatMessage, MessageRole};
use crate::utils::misc;

/// Discord's cap on an embed description.
const EMBED_LIMIT: usize = 4096;

/// Replays the caller's session history as ephemeral embeds.
pub async fn history(ctx: Context<'_>) -> HandlerResult<'_, ()> {
    let data = ctx.data().clone();

    let result: anyhow::Result<()> = async {
        let session = data.sessions.get_or_create(&ctx.author().id).await?;
        let messages = session.messages().await?;

        let transcript = render_history(&messages, data.config.discord.timezone);

        for (i, chunk) in misc::chunk_message(&transcript, EMBED_LIMIT)
            .into_iter()
            .enumerate()
        {
            let mut embed = CreateEmbed::default().color(0x77DD77).description(chunk);
            if i == 0 {
                embed = embed.title(&data.config.discord.title);
            }

            ctx.send(CreateReply::default().embed(embed).ephemeral(true))
                .await?;
        }

        Ok(())
    }
    .await;

    match result {
        Ok(_) => HandlerResult::ok(()),
        Err(why) => HandlerResult::err(why, ctx),
    }
}

fn render_history(messages: &[ChatMessage], timezone: Option<Tz>) -> String {
    if messages.is_empty() {
        return "No messages yet, ask me anything!".to_string();
    }

    messages
        .iter()
        .map(|message| {
            let (role, content) = message.turn();
            let tag = match role {
                MessageRole::User => "🧑 **user**",
                MessageRole::Assistant => "🤖 **assistant**",
            };

            format!("{tag} · {}\n{content}", timestamp(message.sent_at, timezone))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn timestamp(sent_at: DateTime<Utc>, timezone: Option<Tz>) -> String {
    match timezone {
        Some(tz) => sent_at
            .with_timezone(&tz)
            .format("%Y-%m-%d %H:%M %Z")
            .to_string(),
        None => sent_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    }
}
