mod generator;
pub mod providers;

pub use generator::{AnswerGenerator, FragmentStream, HostedModel};
