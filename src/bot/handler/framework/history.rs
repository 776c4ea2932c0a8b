use super::{Context, Error};
use crate::bot::handler::{
    Handler,
    events::{HandlerResult, commands},
};

/// Shows the conversation so far
#[poise::command(slash_command, prefix_command)]
pub(super) async fn history(ctx: Context<'_>) -> Result<(), Error> {
    if let HandlerResult::Err(why) = commands::history(ctx).await {
        Handler::on_error(why).await;
    }

    Ok(())
}
