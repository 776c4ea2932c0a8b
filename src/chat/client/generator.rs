use async_trait::async_trait;
use futures::{Stream, StreamExt, stream::BoxStream};
use rig::{
    completion::{CompletionError, CompletionRequest},
    streaming::StreamingChoice,
};

use crate::{
    chat::{ChatError, prompt::Prompt},
    config::structure::LLMConfig,
};

use super::providers::DynStreamingModel;

/// Answer fragments in emission order. Finite and not restartable.
pub type FragmentStream = BoxStream<'static, Result<String, ChatError>>;

#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Performs one call to the model and streams its answer.
    async fn generate(&self, prompt: Prompt) -> Result<FragmentStream, ChatError>;
}

pub struct ClientSettings {
    pub model: String,
    pub max_tokens: u64,
    pub temperature: f64,
}

/// Streams answers from a hosted chat model through rig.
pub struct HostedModel {
    model: Box<dyn DynStreamingModel>,
    settings: ClientSettings,
}

impl HostedModel {
    pub fn new(config: &LLMConfig) -> Self {
        let client = config
            .provider
            .client(&config.api_key, config.custom_url.as_deref());

        Self {
            model: client.streaming_model(&config.model),
            settings: ClientSettings {
                model: config.model.clone(),
                max_tokens: config.max_tokens,
                temperature: config.temperature,
            },
        }
    }

    fn request(&self, prompt: Prompt) -> CompletionRequest {
        let Prompt {
            system,
            history,
            question,
        } = prompt;

        CompletionRequest {
            additional_params: None,
            chat_history: history.into_iter().map(|m| m.into()).collect(),
            documents: vec![],
            max_tokens: Some(self.settings.max_tokens),
            preamble: Some(system),
            temperature: Some(self.settings.temperature),
            tools: vec![],
            prompt: rig::message::Message::user(question),
        }
    }
}

#[async_trait]
impl AnswerGenerator for HostedModel {
    async fn generate(&self, prompt: Prompt) -> Result<FragmentStream, ChatError> {
        log::debug!(
            "streaming from {} ({} prior messages)",
            self.settings.model,
            prompt.history.len()
        );

        let stream = self
            .model
            .stream(self.request(prompt))
            .await
            .map_err(ChatError::generation)?;

        Ok(text_fragments(stream))
    }
}

/// Keeps the text chunks of a model stream. Tool calls are dropped.
fn text_fragments<S>(stream: S) -> FragmentStream
where
    S: Stream<Item = Result<StreamingChoice, CompletionError>> + Send + 'static,
{
    stream
        .filter_map(|choice| async move {
            match choice {
                Ok(StreamingChoice::Message(text)) => Some(Ok(text)),
                Ok(_) => {
                    log::warn!("ignoring non-text chunk in answer stream");
                    None
                }
                Err(why) => Some(Err(ChatError::generation(why))),
            }
        })
        .boxed()
}
