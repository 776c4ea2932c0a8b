use anyhow::Result;
use handler::Handler;
use serenity::{Client, all::GatewayIntents};

use crate::config::store::ChatBotConfig;

mod handler;

pub struct ChatBot {
    client: Client,
}

impl ChatBot {
    pub async fn new(config: ChatBotConfig) -> Result<Self> {
        let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;
        let builder = serenity::Client::builder(&config.discord.token, intents);

        let (framework, data) = handler::framework::framework(config);

        let client = builder
            .event_handler(Handler::new(data))
            .framework(framework)
            .await?;

        Ok(Self { client })
    }

    pub async fn run(self) -> Result<()> {
        let ChatBot { mut client } = self;

        if let Err(why) = client.start().await {
            log::error!("client error: {why:?}");
            return Err(why.into());
        }

        Ok(())
    }
}
