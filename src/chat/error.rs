pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("history store is unavailable: {0}")]
    StorageUnavailable(#[source] BoxError),

    #[error("knowledge base retrieval failed: {0}")]
    RetrievalFailed(#[source] BoxError),

    #[error("answer generation failed: {0}")]
    GenerationFailed(#[source] BoxError),

    /// A question is still being answered for this session.
    #[error("still answering the previous question, please wait for it to finish")]
    Busy,
}

impl ChatError {
    pub fn storage(why: impl Into<BoxError>) -> Self {
        Self::StorageUnavailable(why.into())
    }

    pub fn retrieval(why: impl Into<BoxError>) -> Self {
        Self::RetrievalFailed(why.into())
    }

    pub fn generation(why: impl Into<BoxError>) -> Self {
        Self::GenerationFailed(why.into())
    }
}
