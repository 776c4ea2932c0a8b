//! Stand-ins for the external services, shared by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use futures::StreamExt;

use crate::{
    archive::{HistoryStore, RetrievedDocument, Retriever},
    chat::{
        ChatError, ChatMessage,
        client::{AnswerGenerator, FragmentStream},
        engine::AnswerSink,
        prompt::Prompt,
    },
};

pub struct StaticRetriever {
    documents: Option<Vec<RetrievedDocument>>,
}

impl StaticRetriever {
    pub fn new(contents: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            documents: Some(contents.into_iter().map(RetrievedDocument::new).collect()),
        }
    }

    pub fn failing() -> Self {
        Self { documents: None }
    }
}

#[async_trait]
impl Retriever for StaticRetriever {
    async fn retrieve(&self, _question: &str) -> Result<Vec<RetrievedDocument>, ChatError> {
        self.documents
            .clone()
            .ok_or_else(|| ChatError::retrieval("knowledge base unreachable"))
    }
}

pub struct ScriptedGenerator {
    fragments: Vec<String>,
    breaks: bool,
    last_prompt: Mutex<Option<Prompt>>,
}

impl ScriptedGenerator {
    pub fn new(fragments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            breaks: false,
            last_prompt: Mutex::new(None),
        }
    }

    /// Emits the fragments, then fails mid-stream.
    pub fn breaking_after(fragments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            breaks: true,
            ..Self::new(fragments)
        }
    }

    pub fn last_prompt(&self) -> Option<Prompt> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: Prompt) -> Result<FragmentStream, ChatError> {
        *self.last_prompt.lock().unwrap() = Some(prompt);

        let mut items = self
            .fragments
            .iter()
            .cloned()
            .map(Ok)
            .collect::<Vec<Result<String, ChatError>>>();
        if self.breaks {
            items.push(Err(ChatError::generation("connection reset mid-stream")));
        }

        Ok(futures::stream::iter(items).boxed())
    }
}

pub struct FailingHistory;

#[async_trait]
impl HistoryStore for FailingHistory {
    async fn messages(&self) -> Result<Vec<ChatMessage>, ChatError> {
        Err(ChatError::storage("table does not exist"))
    }

    async fn append(&self, _messages: Vec<ChatMessage>) -> Result<(), ChatError> {
        Err(ChatError::storage("table does not exist"))
    }

    async fn clear(&self) -> Result<(), ChatError> {
        Err(ChatError::storage("table does not exist"))
    }
}

#[async_trait]
impl AnswerSink for () {
    async fn fragment(&mut self, _fragment: &str, _answer: &str) {}
}

/// Records the answer as it grows.
#[async_trait]
impl AnswerSink for Vec<String> {
    async fn fragment(&mut self, _fragment: &str, answer: &str) {
        self.push(answer.to_string());
    }
}
