use std::{collections::HashMap, fmt::Display, hash::Hash, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    archive::{FileHistory, HistoryStore, KnowledgeBase, MemoryHistory},
    chat::{client::HostedModel, prompt::PromptBuilder},
    config::{store::ChatBotConfig, structure::HistoryBackend},
};

use super::{ChatChain, Session, SessionId};

/// Builds the history handle and chain owned by a new session.
pub trait SessionFactory: Send + Sync {
    fn create(&self, id: SessionId) -> anyhow::Result<Session>;
}

/// Wires a session from `config.toml`.
pub struct ConfiguredSessions {
    config: ChatBotConfig,
}

impl ConfiguredSessions {
    pub fn new(config: ChatBotConfig) -> Self {
        Self { config }
    }
}

impl SessionFactory for ConfiguredSessions {
    fn create(&self, id: SessionId) -> anyhow::Result<Session> {
        let history: Arc<dyn HistoryStore> = match self.config.history.backend {
            HistoryBackend::File => {
                let history = FileHistory::new(
                    &self.config.history.directory,
                    &self.config.history.table_name,
                    &id,
                );
                log::debug!("{id}: history at {}", history.path().display());

                Arc::new(history)
            }
            HistoryBackend::Memory => Arc::new(MemoryHistory::new()),
        };

        let chain = ChatChain::new(
            Arc::new(KnowledgeBase::new(
                &self.config.retrieval,
                &self.config.llm,
            )?),
            Arc::new(HostedModel::new(&self.config.llm)),
            PromptBuilder::new(&self.config.prompt),
        );

        Ok(Session::new(id, history, chain))
    }
}

/// One session per key, created on first use and reused afterwards.
pub struct SessionRegistry<K> {
    factory: Box<dyn SessionFactory>,
    sessions: RwLock<HashMap<K, Arc<Session>>>,
}

impl<K> SessionRegistry<K>
where
    K: Eq + Hash + Display + Clone,
{
    pub fn new(factory: impl SessionFactory + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &K) -> Option<Arc<Session>> {
        self.sessions.read().await.get(key).cloned()
    }

    pub async fn get_or_create(&self, key: &K) -> anyhow::Result<Arc<Session>> {
        if let Some(session) = self.get(key).await {
            return Ok(session);
        }

        let mut sessions = self.sessions.write().await;
        // someone else may have won the race for the write lock
        if let Some(session) = sessions.get(key) {
            return Ok(session.clone());
        }

        let session = Arc::new(self.factory.create(SessionId::generate())?);
        log::info!("new session for {key}: {}", session.id());

        sessions.insert(key.clone(), session.clone());

        Ok(session)
    }
}
