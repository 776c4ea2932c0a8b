pub use framework::Data;
use serenity::{
    all::{ActivityData, Context, EventHandler, Interaction, Message, OnlineStatus, Ready},
    async_trait,
};

mod buttons;
mod events;
pub mod framework;
mod render;

pub struct Handler {
    pub data: Data,
}

impl Handler {
    pub fn new(data: Data) -> Self {
        Self { data }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        log::info!("{} is connected!", ready.user.name);

        ctx.set_presence(
            Some(ActivityData::custom(self.data.config.discord.title.clone())),
            OnlineStatus::Online,
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if let events::HandlerResult::Err(why) = self.on_message(ctx, msg).await {
            Handler::on_error(why).await;
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let events::HandlerResult::Err(why) = self.on_interaction(ctx, interaction).await {
            Handler::on_error(why).await;
        }
    }
}
