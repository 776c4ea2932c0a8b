use std::sync::Arc;

use serenity::all::{Framework, UserId};

use crate::{
    chat::engine::{ConfiguredSessions, SessionRegistry},
    config::store::ChatBotConfig,
};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

mod clear;
mod history;

pub struct InnerData {
    pub config: ChatBotConfig,
    pub sessions: SessionRegistry<UserId>,
}
pub type Data = Arc<InnerData>;

pub fn framework(config: ChatBotConfig) -> (impl Framework + 'static, Data) {
    let data = Arc::new(InnerData {
        sessions: SessionRegistry::new(ConfiguredSessions::new(config.clone())),
        config,
    });

    (
        poise::Framework::builder()
            .options(poise::FrameworkOptions {
                commands: vec![clear::clear(), history::history()],
                ..Default::default()
            })
            .setup({
                let data = data.clone();
                move |ctx, _ready, framework| {
                    Box::pin({
                        async move {
                            poise::builtins::register_globally(ctx, &framework.options().commands)
                                .await?;
                            Ok(data)
                        }
                    })
                }
            })
            .build(),
        data,
    )
}
