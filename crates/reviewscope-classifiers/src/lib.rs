//! ReviewScope Classifiers
//!
//! Loads the trained review sentiment model and its tokenizer, and runs
//! reviews through the inference pipeline:
//!
//! - Text is normalized, tokenized, and padded to a fixed length
//! - An LSTM model scores the sequence in `[0, 1]`
//! - Scores of 0.5 and above are positive
//!
//! Artifacts are loaded once per process and shared read-only afterwards.

pub mod analyzer;
pub mod config;
pub mod insights;
pub mod model;
pub mod model_loader;
pub mod pipeline;
pub mod tokenizer;

pub use analyzer::{
    validate_review, Analysis, InputRejection, ReviewAnalyzer, ReviewReport, MIN_REVIEW_CHARS,
};
pub use config::{ArtifactConfig, DeviceSpec};
pub use insights::{AnalysisDepth, ConfidenceLevel, Insights, InputStatus, Reliability, Strength};
pub use model::{LstmDimensions, LstmSentimentModel, SentimentModel};
pub use model_loader::{ArtifactCache, ArtifactPaths, ArtifactStatus, Artifacts, DeviceType};
pub use pipeline::{PreparedInput, SentimentPipeline};
pub use tokenizer::{load_tokenizer, HfTokenizer, KerasTokenizer, TextEncoder, TokenizerFormat};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analyzer::{Analysis, InputRejection, ReviewAnalyzer, ReviewReport};
    pub use crate::model::{LstmSentimentModel, SentimentModel};
    pub use crate::model_loader::{ArtifactCache, ArtifactPaths, Artifacts, DeviceType};
    pub use crate::pipeline::SentimentPipeline;
    pub use crate::tokenizer::{KerasTokenizer, TextEncoder, TokenizerFormat};
}
