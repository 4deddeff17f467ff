//! ReviewScope Core
//!
//! Core types, text handling, and error types shared across ReviewScope components.
//!
//! This crate provides:
//! - The review data model: normalized text, token and padded sequences, raw scores
//! - Sentiment interpretation of a model's scalar output
//! - Text normalization and fixed-window padding used in front of the model
//! - Error types and result handling

pub mod error;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use text::{normalize, pad_sequence, word_count, non_whitespace_len};
pub use types::{
    NormalizedText, PaddedSequence, RawScore, SentimentLabel, SentimentResult, TokenSequence,
    DECISION_THRESHOLD, SEQUENCE_LENGTH,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        NormalizedText, PaddedSequence, RawScore, SentimentLabel, SentimentResult, TokenSequence,
    };
}
