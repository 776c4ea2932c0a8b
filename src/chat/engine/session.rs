use std::{
    fmt::Display,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use futures::StreamExt;

use crate::{
    archive::HistoryStore,
    chat::{ChatError, ChatMessage},
};

use super::ChatChain;

/// Opaque identifier, stable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(format!("session_id_{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Processing,
}

/// Receives the answer while it is being generated.
#[async_trait]
pub trait AnswerSink: Send {
    /// `answer` is everything received so far, `fragment` included.
    async fn fragment(&mut self, fragment: &str, answer: &str);
}

pub struct Session {
    id: SessionId,
    history: Arc<dyn HistoryStore>,
    chain: ChatChain,
    processing: AtomicBool,
}

/// Holds the session in `Processing` until dropped.
struct Busy<'a>(&'a AtomicBool);

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Session {
    pub fn new(id: SessionId, history: Arc<dyn HistoryStore>, chain: ChatChain) -> Self {
        Self {
            id,
            history,
            chain,
            processing: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        match self.processing.load(Ordering::Acquire) {
            true => SessionState::Processing,
            false => SessionState::Idle,
        }
    }

    fn begin(&self) -> Result<Busy<'_>, ChatError> {
        self.processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Busy(&self.processing))
            .map_err(|_| ChatError::Busy)
    }

    pub async fn messages(&self) -> Result<Vec<ChatMessage>, ChatError> {
        self.history.messages().await
    }

    /// Answers `question`, streaming fragments into `sink`.
    ///
    /// The exchange is written to history only once the whole answer has
    /// been received; any failure leaves history untouched.
    pub async fn ask<S>(&self, question: &str, sink: &mut S) -> Result<String, ChatError>
    where
        S: AnswerSink + ?Sized,
    {
        let _busy = self.begin()?;

        let history = self.history.messages().await?;
        let mut stream = self.chain.stream(question, history).await?;

        let mut answer = String::new();
        while let Some(fragment) = stream.next().await {
            let fragment = fragment?;
            answer.push_str(&fragment);
            sink.fragment(&fragment, &answer).await;
        }

        self.history
            .add_exchange(question.to_string(), answer.clone())
            .await?;

        log::debug!("{}: answered in {} chars", self.id, answer.len());

        Ok(answer)
    }

    /// Removes every message of this session. Refused while a question is in flight.
    pub async fn clear(&self) -> Result<(), ChatError> {
        let _busy = self.begin()?;

        self.history.clear().await?;
        log::info!("{}: history cleared", self.id);

        Ok(())
    }
}
