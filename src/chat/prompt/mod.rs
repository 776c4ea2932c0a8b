mod builder;
mod context;
mod prompt;
mod template;

pub use builder::PromptBuilder;
pub use context::format_documents;
pub use prompt::Prompt;
