use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
};

use crate::chat::ChatError;

use super::super::Handler;

impl Handler {
    pub async fn clear_history(
        &self,
        component: &ComponentInteraction,
        ctx: &Context,
    ) -> anyhow::Result<()> {
        let session = self.data.sessions.get_or_create(&component.user.id).await?;

        let reply = clear_reply(session.clear().await)?;

        component
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .content(reply)
                        .ephemeral(true),
                ),
            )
            .await?;

        Ok(())
    }
}

/// A clear refused while an answer streams is a notice, not an error.
pub fn clear_reply(result: Result<(), ChatError>) -> Result<&'static str, ChatError> {
    match result {
        Ok(()) => Ok("cleared your chat history."),
        Err(ChatError::Busy) => Ok("still answering, try again once the answer is done."),
        Err(why) => Err(why),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::{
        archive::MemoryHistory,
        chat::{
            engine::{AnswerSink, ChatChain, Session, SessionId},
            prompt::PromptBuilder,
            testing::{ScriptedGenerator, StaticRetriever},
        },
        config::structure::PromptConfig,
    };

    /// Presses the clear button while the answer is still streaming.
    struct ClearMidAnswer<'a> {
        session: &'a Session,
        replies: Vec<Result<&'static str, ChatError>>,
    }

    #[async_trait]
    impl AnswerSink for ClearMidAnswer<'_> {
        async fn fragment(&mut self, _fragment: &str, _answer: &str) {
            self.replies.push(clear_reply(self.session.clear().await));
        }
    }

    #[tokio::test]
    async fn clearing_mid_answer_is_a_notice() {
        let session = Session::new(
            SessionId::generate(),
            Arc::new(MemoryHistory::new()),
            ChatChain::new(
                Arc::new(StaticRetriever::new(["doc"])),
                Arc::new(ScriptedGenerator::new(["ok"])),
                PromptBuilder::new(&PromptConfig::default()),
            ),
        );
        let mut sink = ClearMidAnswer {
            session: &session,
            replies: vec![],
        };

        session.ask("q", &mut sink).await.unwrap();

        assert!(matches!(
            sink.replies.as_slice(),
            [Ok(reply)] if reply.starts_with("still answering")
        ));
        assert_eq!(session.messages().await.unwrap().len(), 2);
        assert_eq!(
            clear_reply(session.clear().await).unwrap(),
            "cleared your chat history."
        );
    }

    #[test]
    fn storage_failures_still_surface() {
        assert!(matches!(
            clear_reply(Err(ChatError::storage("disk gone"))),
            Err(ChatError::StorageUnavailable(_))
        ));
    }
}
