use std::fmt::Display;

use async_trait::async_trait;

use rig::{
    completion::{CompletionError, CompletionRequest},
    embeddings::{Embedding, EmbeddingError, EmbeddingModel},
    providers::{anthropic, openai},
    streaming::{StreamingCompletionModel, StreamingResult},
};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub enum ProviderClient {
    Anthropic(anthropic::Client),
    OpenAI(openai::Client),
}

#[async_trait]
pub trait DynEmbeddingModel: Send + Sync {
    async fn embed_text(&self, input: &str) -> Result<Embedding, EmbeddingError>;
}

#[async_trait]
impl<T> DynEmbeddingModel for T
where
    T: rig::embeddings::EmbeddingModel + Send + Sync,
{
    async fn embed_text(&self, input: &str) -> Result<Embedding, EmbeddingError> {
        EmbeddingModel::embed_text(self, input).await
    }
}

#[async_trait]
pub trait DynStreamingModel: Send + Sync {
    async fn stream(&self, request: CompletionRequest) -> Result<StreamingResult, CompletionError>;
}

macro_rules! dyn_streaming_model {
    ($($model:ty),* $(,)?) => {
        $(
            #[async_trait]
            impl DynStreamingModel for $model {
                async fn stream(
                    &self,
                    request: CompletionRequest,
                ) -> Result<StreamingResult, CompletionError> {
                    StreamingCompletionModel::stream(self, request).await
                }
            }
        )*
    };
}

dyn_streaming_model!(anthropic::completion::CompletionModel, openai::CompletionModel);

impl ProviderClient {
    /// Returns a streaming completion model for the given provider and model name.
    pub fn streaming_model(&self, model: &str) -> Box<dyn DynStreamingModel> {
        match self {
            ProviderClient::Anthropic(client) => Box::new(client.completion_model(model)),
            ProviderClient::OpenAI(client) => Box::new(client.completion_model(model)),
        }
    }

    /// Returns an embedding model wrapper for the given provider and model name.
    /// Returns `None` if the provider does not support embeddings.
    pub fn embedding_model(&self, model: &str) -> Option<Box<dyn DynEmbeddingModel>> {
        match self {
            ProviderClient::Anthropic(_) => None,
            ProviderClient::OpenAI(client) => Some(Box::new(client.embedding_model(model))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Provider {
    #[default]
    #[serde(rename = "anthropic")]
    Anthropic,

    #[serde(rename = "openai")]
    #[serde(alias = "openai-api")]
    #[serde(alias = "openai-compatible")]
    OpenAI,
}

impl TryFrom<String> for Provider {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        serde_plain::from_str(&value).map_err(|e| anyhow::anyhow!("{}", e))
    }
}

impl Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        serde_plain::to_string(self)
            .map_err(|_| std::fmt::Error)?
            .fmt(f)
    }
}

impl Provider {
    pub fn client(&self, api_key: &str, custom_url: Option<&str>) -> ProviderClient {
        match self {
            Provider::Anthropic => {
                let builder = anthropic::ClientBuilder::new(api_key);
                if let Some(url) = custom_url {
                    ProviderClient::Anthropic(builder.base_url(url).build())
                } else {
                    ProviderClient::Anthropic(builder.build())
                }
            }
            Provider::OpenAI => match custom_url {
                None => ProviderClient::OpenAI(openai::Client::new(api_key)),
                Some(url) => ProviderClient::OpenAI(openai::Client::from_url(api_key, url)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names_round_trip_through_plain_strings() {
        assert_eq!(Provider::Anthropic.to_string(), "anthropic");
        assert_eq!(Provider::OpenAI.to_string(), "openai");
        assert_eq!(
            Provider::try_from("openai-compatible".to_string()).unwrap(),
            Provider::OpenAI
        );
        assert!(Provider::try_from("bedrock".to_string()).is_err());
    }

    #[test]
    fn anthropic_has_no_embeddings() {
        let client = Provider::Anthropic.client("key", None);

        assert!(client.embedding_model("text-embedding-3-small").is_none());
        assert!(
            Provider::OpenAI
                .client("key", Some("http://127.0.0.1:8080/v1"))
                .embedding_model("text-embedding-3-small")
                .is_some()
        );
    }
}
