pub mod client;
mod context;
pub mod engine;
mod error;
pub mod prompt;

#[cfg(test)]
pub mod testing;

pub use context::{ChatMessage, MessageRole};
pub use error::ChatError;
