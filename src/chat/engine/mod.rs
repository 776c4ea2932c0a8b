mod chain;
mod registry;
mod session;

pub use chain::ChatChain;
pub use registry::{ConfiguredSessions, SessionRegistry};
pub use session::{AnswerSink, Session, SessionId};
