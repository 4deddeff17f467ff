//! Error types for ReviewScope

/// Result type alias using ReviewScope's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ReviewScope operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model or tokenizer artifact could not be read or deserialized
    #[error("artifact load error: {0}")]
    ArtifactLoad(String),

    /// Tokenizer execution errors
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// Model forward pass errors
    #[error("inference error: {0}")]
    Inference(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new artifact load error
    pub fn artifact_load(msg: impl Into<String>) -> Self {
        Self::ArtifactLoad(msg.into())
    }

    /// Create a new tokenizer error
    pub fn tokenizer(msg: impl Into<String>) -> Self {
        Self::Tokenizer(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
