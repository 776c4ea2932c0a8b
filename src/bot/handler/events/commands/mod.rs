mod clear;
mod history;

pub use clear::clear;
pub use history::history;
