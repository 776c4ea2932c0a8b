use std::path::PathBuf;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::chat::client::providers::Provider;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ChatBotConfigTOML {
    #[serde(default)]
    pub config: ChatBotConfigInner,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ChatBotConfigInner {
    pub log_level: Option<String>,
    pub discord: DiscordConfig,
    pub llm: LLMConfig,
    pub retrieval: RetrievalConfig,
    pub history: HistoryConfig,
    pub prompt: PromptConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DiscordConfig {
    pub token: String,
    pub title: String,
    pub render_interval_ms: u64,
    pub timezone: Option<Tz>,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            title: "Knowledge Base FAQ".to_string(),
            render_interval_ms: 750,
            timezone: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LLMConfig {
    pub provider: Provider,
    pub api_key: String,
    pub custom_url: Option<String>,
    pub model: String,
    pub max_tokens: u64,
    pub temperature: f64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Anthropic,
            api_key: String::new(),
            custom_url: None,
            model: "claude-3-5-sonnet-20240620".to_string(),
            max_tokens: 4000,
            // low temperature keeps answers close to the retrieved documents
            temperature: 0.2,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Qdrant collection holding the knowledge base.
    pub knowledge_base: String,
    pub number_of_results: u64,
    pub similarity_threshold: Option<f32>,
    pub content_field: String,

    pub qdrant_host: String,
    pub qdrant_port: Option<u16>,
    pub qdrant_https: Option<bool>,
    pub qdrant_api_key: Option<String>,

    pub embedding_provider: Provider,
    pub embedding_api_key: Option<String>,
    pub embedding_url: Option<String>,
    pub embedding_model: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            knowledge_base: "faq".to_string(),
            number_of_results: 3,
            similarity_threshold: None,
            content_field: "content".to_string(),
            qdrant_host: "localhost".to_string(),
            qdrant_port: None,
            qdrant_https: None,
            qdrant_api_key: None,
            embedding_provider: Provider::OpenAI,
            embedding_api_key: None,
            embedding_url: None,
            embedding_model: "text-embedding-3-small".to_string(),
        }
    }
}

impl RetrievalConfig {
    pub fn qdrant_url(&self) -> String {
        format!(
            "http{}://{}:{}",
            match self.qdrant_https.unwrap_or(false) {
                true => "s",
                false => "",
            },
            self.qdrant_host,
            self.qdrant_port.unwrap_or(6334)
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryBackend {
    #[default]
    #[serde(rename = "file")]
    File,

    #[serde(rename = "memory")]
    Memory,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    pub backend: HistoryBackend,
    pub directory: PathBuf,
    pub table_name: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            backend: HistoryBackend::File,
            directory: PathBuf::from("data"),
            table_name: "chat_history".to_string(),
        }
    }
}

pub const DEFAULT_SYSTEM_PROMPT: &str = "Talk in a friendly way and feel free to use emoji.
Answer using only the information below. If something is not covered by it, reply with \"That information is not in my database.\"

{context}

When answering, rely solely on the information given above and avoid speculation or creative interpretation.";

pub const DEFAULT_NO_CONTEXT: &str = "(no documents were found in the knowledge base)";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PromptConfig {
    /// System instruction, `{context}` is replaced with the retrieved documents.
    pub system: String,
    /// Stands in for the context when retrieval found nothing.
    pub no_context: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            no_context: DEFAULT_NO_CONTEXT.to_string(),
        }
    }
}
