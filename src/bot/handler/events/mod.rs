pub mod commands;
mod error;
mod interaction;
mod message;

pub use error::HandlerResult;
