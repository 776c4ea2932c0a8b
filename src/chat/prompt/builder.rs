use crate::{chat::ChatMessage, config::structure::PromptConfig};

use super::{prompt::Prompt, template::TemplateVariables};

#[derive(Clone, Debug, PartialEq)]
pub struct PromptBuilder {
    system: String,
    no_context: String,
}

impl PromptBuilder {
    pub fn new(config: &PromptConfig) -> Self {
        Self {
            system: config.system.clone(),
            no_context: config.no_context.clone(),
        }
    }

    pub fn assemble(&self, context: &str, history: Vec<ChatMessage>, question: &str) -> Prompt {
        let context = match context.trim().is_empty() {
            true => self.no_context.as_str(),
            false => context,
        };

        Prompt {
            system: TemplateVariables::new(context).substitute_template(&self.system),
            history,
            question: question.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chat::MessageRole;

    fn builder() -> PromptBuilder {
        PromptBuilder::new(&PromptConfig {
            system: "Use only this:\n{context}\nBe nice.".to_string(),
            no_context: "(nothing found)".to_string(),
        })
    }

    #[test]
    fn context_is_inlined_into_the_system_instruction() {
        let prompt = builder().assemble("Document 1:\nA", vec![], "what is A?");

        assert_eq!(prompt.system, "Use only this:\nDocument 1:\nA\nBe nice.");
        assert_eq!(prompt.question, "what is A?");
        assert!(prompt.history.is_empty());
    }

    #[test]
    fn empty_context_falls_back_to_sentinel() {
        let prompt = builder().assemble("", vec![], "anything?");

        assert_eq!(prompt.system, "Use only this:\n(nothing found)\nBe nice.");
    }

    #[test]
    fn history_keeps_its_order_and_question_comes_last() {
        let history = vec![
            ChatMessage::user("first"),
            ChatMessage::assistant("reply one"),
            ChatMessage::user("second"),
            ChatMessage::assistant("reply two"),
        ];

        let prompt = builder().assemble("ctx", history.clone(), "third");

        assert_eq!(prompt.history, history);
        assert_eq!(
            prompt
                .history
                .iter()
                .map(|m| m.role)
                .collect::<Vec<_>>(),
            vec![
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
            ]
        );
        assert_eq!(prompt.question, "third");
    }

    #[test]
    fn default_instruction_asks_for_grounded_answers() {
        let prompt = PromptBuilder::new(&PromptConfig::default()).assemble(
            "Document 1:\nX is Y.",
            vec![],
            "What is X?",
        );

        assert!(prompt.system.contains("Document 1:\nX is Y."));
        assert!(prompt.system.contains("That information is not in my database."));
        assert!(!prompt.system.contains("{context}"));
    }
}
