use crate::chat::ChatMessage;

/// Everything sent to the model for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    /// System instruction with the retrieved context already inlined.
    pub system: String,
    /// Prior turns, oldest first.
    pub history: Vec<ChatMessage>,
    /// The new question, sent as the final user turn.
    pub question: String,
}
