use poise::CreateReply;

use crate::bot::handler::buttons;
use crate::bot::handler::events::HandlerResult;
use crate::bot::handler::framework::Context;

/// Wipes the caller's session history, unless an answer is still streaming.
pub async fn clear(ctx: Context<'_>) -> HandlerResult<'_, ()> {
    let data = ctx.data().clone();

    let result: anyhow::Result<()> = async {
        let session = data.sessions.get_or_create(&ctx.author().id).await?;
        let reply = buttons::clear_reply(session.clear().await)?;

        ctx.send(CreateReply::default().content(reply).ephemeral(true))
            .await?;

        Ok(())
    }
    .await;

    match result {
        Ok(_) => HandlerResult::ok(()),
        Err(why) => HandlerResult::err(why, ctx),
    }
}
