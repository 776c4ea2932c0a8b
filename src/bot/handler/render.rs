use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use serenity::{
    all::{CreateMessage, EditMessage, Http, Message},
    async_trait,
};

use crate::{
    chat::engine::AnswerSink,
    utils::misc::{self, MESSAGE_LIMIT},
};

use super::buttons;

/// Shown until the first fragment arrives.
const PLACEHOLDER: &str = "💭 …";

/// Edits a placeholder reply in place while the answer streams in.
pub struct StreamRenderer {
    http: Arc<Http>,
    reply: Message,
    interval: Duration,
    last_render: Instant,
}

impl StreamRenderer {
    pub async fn start(
        http: Arc<Http>,
        question: &Message,
        interval: Duration,
    ) -> anyhow::Result<Self> {
        let reply = question
            .channel_id
            .send_message(
                &http,
                CreateMessage::new()
                    .content(PLACEHOLDER)
                    .reference_message(question),
            )
            .await?;

        Ok(Self {
            http,
            reply,
            interval,
            last_render: Instant::now(),
        })
    }

    /// Replaces the preview with the full answer, spilling into follow-up
    /// messages when it is too long. The last one carries the clear button.
    pub async fn finish(mut self, answer: &str) -> anyhow::Result<()> {
        let answer = match answer.trim().is_empty() {
            true => "(the model returned an empty answer)",
            false => answer,
        };

        let mut chunks = misc::chunk_message(answer, MESSAGE_LIMIT);
        let rest = chunks.split_off(1);
        let first = chunks.pop().unwrap_or_default();

        let mut edit = EditMessage::new().content(first);
        if rest.is_empty() {
            edit = edit.button(buttons::clear_history());
        }
        self.reply.edit(&self.http, edit).await?;

        let last = rest.len().saturating_sub(1);
        for (i, chunk) in rest.into_iter().enumerate() {
            let mut message = CreateMessage::new().content(chunk);
            if i == last {
                message = message.button(buttons::clear_history());
            }

            self.reply
                .channel_id
                .send_message(&self.http, message)
                .await?;
        }

        Ok(())
    }

    /// Drops the partial answer after a failure.
    pub async fn abandon(self) {
        if let Err(why) = self.reply.delete(&self.http).await {
            log::warn!("could not remove partial answer: {why:?}");
        }
    }
}

#[async_trait]
impl AnswerSink for StreamRenderer {
    async fn fragment(&mut self, _fragment: &str, answer: &str) {
        if self.last_render.elapsed() < self.interval {
            return;
        }
        self.last_render = Instant::now();

        let preview = misc::preview(answer, MESSAGE_LIMIT);
        if let Err(why) = self
            .reply
            .edit(&self.http, EditMessage::new().content(preview))
            .await
        {
            log::warn!("could not render partial answer: {why:?}");
        }
    }
}
