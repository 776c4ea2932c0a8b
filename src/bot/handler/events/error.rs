use std::sync::Arc;

use poise::CreateReply;
use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateMessage, Http, Message,
};

use crate::bot::handler::framework::Context;

use super::super::Handler;

impl Handler {
    /// Relays an error into the channel it came from. Failing to do so is
    /// only logged.
    pub async fn on_error(error: HandlerError<'_>) {
        let HandlerError { error, location } = error;

        log::error!("handling error:\n\n{error:?}\n");

        let embed = CreateEmbed::default()
            .color(0xFF6961)
            .title("Something went wrong while answering")
            .description(format!("```{error}```"));
        let button = CreateButton::new("delete_error")
            .label("")
            .emoji('🗑')
            .style(ButtonStyle::Danger);

        match location {
            ErrorLocation::Context(ctx) => {
                if let Err(why) = ctx
                    .send(
                        CreateReply::default()
                            .embed(embed)
                            .ephemeral(true)
                            .components(vec![CreateActionRow::Buttons(vec![button])]),
                    )
                    .await
                {
                    log::error!("error during propagation of error to user: {why:?}");
                }
            }
            ErrorLocation::Message((http, message)) => {
                if let Err(why) = message
                    .channel_id
                    .send_message(
                        http,
                        CreateMessage::new()
                            .button(button)
                            .reference_message(&message)
                            .embed(embed),
                    )
                    .await
                {
                    log::error!("error during propagation of error to user: {why:?}");
                }
            }
        }
    }
}

pub enum ErrorLocation<'a> {
    /// A slash command, answered ephemerally.
    Context(Context<'a>),
    /// A channel message, answered with a reply.
    Message((Arc<Http>, Message)),
}

impl<'a> From<Context<'a>> for ErrorLocation<'a> {
    fn from(ctx: Context<'a>) -> Self {
        ErrorLocation::Context(ctx)
    }
}

impl From<(Arc<Http>, Message)> for ErrorLocation<'static> {
    fn from(location: (Arc<Http>, Message)) -> Self {
        ErrorLocation::Message(location)
    }
}

pub struct HandlerError<'a> {
    error: anyhow::Error,
    location: ErrorLocation<'a>,
}

pub enum HandlerResult<'a, T> {
    Ok(T),
    Err(HandlerError<'a>),
}

impl<'a, T> HandlerResult<'a, T> {
    pub fn ok(value: T) -> Self {
        Self::Ok(value)
    }

    pub fn err(error: impl Into<anyhow::Error>, location: impl Into<ErrorLocation<'a>>) -> Self {
        Self::Err(HandlerError {
            error: error.into(),
            location: location.into(),
        })
    }
}
