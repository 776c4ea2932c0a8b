pub mod store;
pub mod structure;
