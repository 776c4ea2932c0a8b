use std::collections::HashMap;

use async_trait::async_trait;
use qdrant_client::{
    Qdrant,
    qdrant::{ScoredPoint, SearchPointsBuilder, Value},
};

use crate::{
    chat::{ChatError, client::providers::DynEmbeddingModel},
    config::structure::{LLMConfig, RetrievalConfig},
};

/// A knowledge base hit. Only `content` reaches the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedDocument {
    pub content: String,
    pub metadata: HashMap<String, String>,
    pub score: f32,
}

impl RetrievedDocument {
    #[cfg(test)]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: HashMap::new(),
            score: 0.0,
        }
    }

    fn from_payload(
        mut payload: HashMap<String, Value>,
        score: f32,
        content_field: &str,
    ) -> Option<Self> {
        let content = payload.remove(content_field)?.as_str()?.to_owned();

        let metadata = payload
            .into_iter()
            .map(|(key, value)| {
                let value = match value.as_str() {
                    Some(text) => text.to_owned(),
                    None => value.to_string(),
                };
                (key, value)
            })
            .collect();

        Some(Self {
            content,
            metadata,
            score,
        })
    }
}

#[async_trait]
pub trait Retriever: Send + Sync {
    /// Documents relevant to `question`, best first.
    async fn retrieve(&self, question: &str) -> Result<Vec<RetrievedDocument>, ChatError>;
}

pub struct RetrievalSettings {
    pub collection: String,
    pub limit: u64,
    pub similarity_threshold: Option<f32>,
    pub content_field: String,
}

/// Vector search over a Qdrant collection, queried with an embedded question.
pub struct KnowledgeBase {
    client: Qdrant,
    embedding_model: Box<dyn DynEmbeddingModel>,
    settings: RetrievalSettings,
}

impl KnowledgeBase {
    pub fn new(config: &RetrievalConfig, llm: &LLMConfig) -> anyhow::Result<Self> {
        let mut builder = Qdrant::from_url(&config.qdrant_url()).skip_compatibility_check();
        if let Some(api_key) = &config.qdrant_api_key {
            builder = builder.api_key(api_key.clone());
        }
        let client = builder.build()?;

        let embedding_model = config
            .embedding_provider
            .client(
                embedding_api_key(config, llm)?,
                config.embedding_url.as_deref(),
            )
            .embedding_model(&config.embedding_model)
            .ok_or(anyhow::anyhow!(
                "{} does not provide embedding models",
                config.embedding_provider
            ))?;

        Ok(Self {
            client,
            embedding_model,
            settings: RetrievalSettings {
                collection: config.knowledge_base.clone(),
                limit: config.number_of_results,
                similarity_threshold: config.similarity_threshold,
                content_field: config.content_field.clone(),
            },
        })
    }
}

/// The LLM key is only reused when both sides talk to the same provider.
fn embedding_api_key<'a>(
    config: &'a RetrievalConfig,
    llm: &'a LLMConfig,
) -> anyhow::Result<&'a str> {
    match &config.embedding_api_key {
        Some(key) => Ok(key.as_str()),
        None if config.embedding_provider == llm.provider => Ok(llm.api_key.as_str()),
        None => anyhow::bail!(
            "retrieval.embedding_api_key must be set, embedding_provider ({}) differs from llm.provider ({})",
            config.embedding_provider,
            llm.provider
        ),
    }
}

impl RetrievalSettings {
    /// Applies the threshold and decodes payloads, keeping the backend's order.
    fn documents(&self, points: Vec<ScoredPoint>) -> Vec<RetrievedDocument> {
        let threshold = self.similarity_threshold.unwrap_or(f32::MIN);

        points
            .into_iter()
            .filter(|point| point.score >= threshold)
            .filter_map(|point| {
                let document =
                    RetrievedDocument::from_payload(point.payload, point.score, &self.content_field);
                if document.is_none() {
                    log::warn!(
                        "point without a \"{}\" text field in {}, skipping",
                        self.content_field,
                        self.collection
                    );
                }
                document
            })
            .collect()
    }
}

#[async_trait]
impl Retriever for KnowledgeBase {
    async fn retrieve(&self, question: &str) -> Result<Vec<RetrievedDocument>, ChatError> {
        let embedding = self
            .embedding_model
            .embed_text(question)
            .await
            .map_err(ChatError::retrieval)?
            .vec
            .into_iter()
            .map(|x| x as f32)
            .collect::<Vec<f32>>();

        let search_result = self
            .client
            .search_points(
                SearchPointsBuilder::new(
                    self.settings.collection.as_str(),
                    embedding,
                    self.settings.limit,
                )
                .with_payload(true),
            )
            .await
            .map_err(ChatError::retrieval)?;

        let documents = self.settings.documents(search_result.result);

        log::debug!(
            "retrieved {} document(s) from {}",
            documents.len(),
            self.settings.collection
        );
        for document in &documents {
            log::trace!("{:.3} {:?}", document.score, document.metadata);
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chat::client::providers::Provider;

    fn settings(similarity_threshold: Option<f32>) -> RetrievalSettings {
        RetrievalSettings {
            collection: "faq".to_string(),
            limit: 3,
            similarity_threshold,
            content_field: "content".to_string(),
        }
    }

    fn point(content: Option<&str>, score: f32) -> ScoredPoint {
        let payload = content
            .map(|text| HashMap::from([("content".to_string(), Value::from(text.to_string()))]))
            .unwrap_or_default();

        ScoredPoint {
            payload,
            score,
            ..Default::default()
        }
    }

    fn contents(documents: &[RetrievedDocument]) -> Vec<&str> {
        documents.iter().map(|d| d.content.as_str()).collect()
    }

    #[test]
    fn points_below_the_threshold_are_dropped_in_order() {
        let points = vec![
            point(Some("best"), 0.9),
            point(Some("weak"), 0.2),
            point(Some("edge"), 0.5),
        ];

        assert_eq!(
            contents(&settings(Some(0.5)).documents(points.clone())),
            vec!["best", "edge"]
        );
        assert_eq!(
            contents(&settings(None).documents(points)),
            vec!["best", "weak", "edge"]
        );
    }

    #[test]
    fn points_without_content_are_skipped() {
        let points = vec![point(None, 0.9), point(Some("kept"), 0.8)];

        let documents = settings(None).documents(points);

        assert_eq!(contents(&documents), vec!["kept"]);
        assert_eq!(documents[0].score, 0.8);
    }

    #[test]
    fn llm_key_is_not_sent_to_another_provider() {
        let llm = LLMConfig {
            provider: Provider::Anthropic,
            api_key: "sk-ant-secret".to_string(),
            ..Default::default()
        };
        let retrieval = RetrievalConfig {
            embedding_provider: Provider::OpenAI,
            embedding_api_key: None,
            ..Default::default()
        };

        let error = embedding_api_key(&retrieval, &llm).unwrap_err();
        assert!(error.to_string().contains("retrieval.embedding_api_key"));
        assert!(KnowledgeBase::new(&retrieval, &llm).is_err());
    }

    #[test]
    fn llm_key_is_reused_for_the_same_provider() {
        let llm = LLMConfig {
            provider: Provider::OpenAI,
            api_key: "sk-shared".to_string(),
            ..Default::default()
        };
        let mut retrieval = RetrievalConfig {
            embedding_provider: Provider::OpenAI,
            embedding_api_key: None,
            ..Default::default()
        };

        assert_eq!(embedding_api_key(&retrieval, &llm).unwrap(), "sk-shared");

        retrieval.embedding_api_key = Some("sk-embed".to_string());
        assert_eq!(embedding_api_key(&retrieval, &llm).unwrap(), "sk-embed");
    }

    #[test]
    fn payload_content_becomes_the_document_body() {
        let payload = HashMap::from([
            ("content".to_string(), Value::from("X is Y.".to_string())),
            ("source".to_string(), Value::from("faq.md".to_string())),
        ]);

        let document = RetrievedDocument::from_payload(payload, 0.9, "content").unwrap();

        assert_eq!(document.content, "X is Y.");
        assert_eq!(document.score, 0.9);
        assert_eq!(
            document.metadata,
            HashMap::from([("source".to_string(), "faq.md".to_string())])
        );
    }

    #[test]
    fn custom_content_field_is_honoured() {
        let payload = HashMap::from([("text".to_string(), Value::from("body".to_string()))]);

        assert_eq!(
            RetrievedDocument::from_payload(payload.clone(), 0.5, "text")
                .unwrap()
                .content,
            "body"
        );
        assert!(RetrievedDocument::from_payload(payload, 0.5, "content").is_none());
    }

    #[test]
    fn non_text_content_is_rejected() {
        let payload = HashMap::from([("content".to_string(), Value::from(42_i64))]);

        assert!(RetrievedDocument::from_payload(payload, 0.5, "content").is_none());
    }
}
