use std::sync::Arc;

use crate::{
    archive::Retriever,
    chat::{
        ChatError, ChatMessage,
        client::{AnswerGenerator, FragmentStream},
        prompt::{PromptBuilder, format_documents},
    },
};

/// Retrieval, formatting, prompt assembly and generation as one callable unit.
pub struct ChatChain {
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn AnswerGenerator>,
    prompt: PromptBuilder,
}

impl ChatChain {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        generator: Arc<dyn AnswerGenerator>,
        prompt: PromptBuilder,
    ) -> Self {
        Self {
            retriever,
            generator,
            prompt,
        }
    }

    pub async fn stream(
        &self,
        question: &str,
        history: Vec<ChatMessage>,
    ) -> Result<FragmentStream, ChatError> {
        let documents = self.retriever.retrieve(question).await?;
        let context = format_documents(&documents);

        let prompt = self.prompt.assemble(&context, history, question);

        self.generator.generate(prompt).await
    }
}
