use std::path::PathBuf;

use config::store::ChatBotConfig;
use utils::log::Logger;

mod archive;
mod bot;
mod chat;
mod config;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ChatBotConfig::read(PathBuf::from("config.toml"))?;

    Logger::init(Logger::level(config.log_level.as_deref()));
    match config.created() {
        true => log::warn!("{} did not exist, wrote defaults", config.path.display()),
        false => log::info!("loaded {}", config.path.display()),
    }

    let bot = bot::ChatBot::new(config).await?;
    bot.run().await
}
