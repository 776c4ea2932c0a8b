use serenity::all::{ButtonStyle, CreateButton};

mod clear;
mod delete;

pub use clear::clear_reply;

/// Attached to the last message of every answer.
pub fn clear_history() -> CreateButton {
    CreateButton::new("clear_history")
        .label("Clear history")
        .emoji('🗑')
        .style(ButtonStyle::Danger)
}
