use std::time::Duration;

use serenity::all::{Context, Message};

use crate::bot::handler::render::StreamRenderer;

use super::{super::Handler, error::HandlerResult};

impl Handler {
    pub async fn on_message(&self, ctx: Context, msg: Message) -> HandlerResult<'static, ()> {
        if msg.author.bot || msg.content.trim().is_empty() {
            return HandlerResult::ok(());
        }

        let typing = ctx.http.start_typing(msg.channel_id);

        let result: anyhow::Result<()> = async {
            let session = self.data.sessions.get_or_create(&msg.author.id).await?;
            log::debug!(
                "{}: question from {} while {:?}",
                session.id(),
                msg.author.name,
                session.state()
            );
            let interval = Duration::from_millis(self.data.config.discord.render_interval_ms);

            let mut renderer = StreamRenderer::start(ctx.http.clone(), &msg, interval).await?;

            match session.ask(&msg.content, &mut renderer).await {
                Ok(answer) => renderer.finish(&answer).await,
                Err(why) => {
                    renderer.abandon().await;
                    Err(why.into())
                }
            }
        }
        .await;

        typing.stop();

        match result {
            Ok(_) => HandlerResult::ok(()),
            Err(why) => HandlerResult::err(why, (ctx.http, msg)),
        }
    }
}
