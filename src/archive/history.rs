use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::chat::{ChatError, ChatMessage, engine::SessionId};

/// Ordered, per-session message log.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn messages(&self) -> Result<Vec<ChatMessage>, ChatError>;

    // single-message appends complete the store API; sessions write whole
    // exchanges through `add_exchange`
    #[allow(unused)]
    async fn add_user_message(&self, content: String) -> Result<(), ChatError> {
        self.append(vec![ChatMessage::user(content)]).await
    }

    #[allow(unused)]
    async fn add_ai_message(&self, content: String) -> Result<(), ChatError> {
        self.append(vec![ChatMessage::assistant(content)]).await
    }

    /// Appends the question and its answer in one step.
    async fn add_exchange(&self, question: String, answer: String) -> Result<(), ChatError> {
        self.append(vec![ChatMessage::user(question), ChatMessage::assistant(answer)])
            .await
    }

    async fn append(&self, messages: Vec<ChatMessage>) -> Result<(), ChatError>;

    async fn clear(&self) -> Result<(), ChatError>;
}

#[derive(Default)]
pub struct MemoryHistory {
    messages: RwLock<Vec<ChatMessage>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn messages(&self) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.messages.read().await.clone())
    }

    async fn append(&self, messages: Vec<ChatMessage>) -> Result<(), ChatError> {
        self.messages.write().await.extend(messages);
        Ok(())
    }

    async fn clear(&self) -> Result<(), ChatError> {
        self.messages.write().await.clear();
        Ok(())
    }
}

/// One CBOR document per session, stored under `<directory>/<table>/<session>.cbor`.
pub struct FileHistory {
    path: PathBuf,
    // serializes read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl FileHistory {
    pub fn new(directory: &Path, table_name: &str, session_id: &SessionId) -> Self {
        Self {
            path: directory
                .join(table_name)
                .join(format!("{}.cbor", session_id.as_str())),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<ChatMessage>, ChatError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(why) if why.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(why) => return Err(ChatError::storage(why)),
        };

        ciborium::from_reader(bytes.as_slice()).map_err(ChatError::storage)
    }

    async fn store(&self, messages: &[ChatMessage]) -> Result<(), ChatError> {
        let mut bytes = Vec::new();
        ciborium::into_writer(messages, &mut bytes).map_err(ChatError::storage)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(ChatError::storage)?;
        }

        let tmp = self.path.with_extension("cbor.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(ChatError::storage)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(ChatError::storage)
    }
}

#[async_trait]
impl HistoryStore for FileHistory {
    async fn messages(&self) -> Result<Vec<ChatMessage>, ChatError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn append(&self, messages: Vec<ChatMessage>) -> Result<(), ChatError> {
        let _guard = self.lock.lock().await;

        let mut history = self.load().await?;
        history.extend(messages);

        self.store(&history).await
    }

    async fn clear(&self) -> Result<(), ChatError> {
        let _guard = self.lock.lock().await;

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(why) if why.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(why) => Err(ChatError::storage(why)),
        }
    }
}
