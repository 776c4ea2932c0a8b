pub mod history;
pub mod retrieval;

pub use history::{FileHistory, HistoryStore, MemoryHistory};
pub use retrieval::{KnowledgeBase, RetrievedDocument, Retriever};
