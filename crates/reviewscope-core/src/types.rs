//! Core types for ReviewScope

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of token positions the sentiment model accepts.
///
/// Fixed by the trained artifact's input shape; changing it breaks
/// compatibility with existing model files.
pub const SEQUENCE_LENGTH: usize = 100;

/// Raw scores at or above this value are labelled positive.
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Review text after lower-casing and punctuation stripping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Normalize raw review text
    pub fn new(raw: &str) -> Self {
        Self(crate::text::normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-delimited words
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token IDs produced by the vocabulary, one per recognised word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSequence(Vec<u32>);

impl TokenSequence {
    pub fn new(ids: Vec<u32>) -> Self {
        Self(ids)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for TokenSequence {
    fn from(ids: Vec<u32>) -> Self {
        Self(ids)
    }
}

/// Token sequence fitted to exactly [`SEQUENCE_LENGTH`] positions.
///
/// Only constructible through [`crate::text::pad_sequence`] or
/// [`PaddedSequence::zeros`], so the length invariant always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedSequence {
    ids: Vec<u32>,
}

impl PaddedSequence {
    pub(crate) fn from_exact(ids: Vec<u32>) -> Self {
        debug_assert_eq!(ids.len(), SEQUENCE_LENGTH);
        Self { ids }
    }

    /// All-padding sequence (what an empty review becomes)
    pub fn zeros() -> Self {
        Self::from_exact(vec![0; SEQUENCE_LENGTH])
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.ids
    }

    /// Always [`SEQUENCE_LENGTH`]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of non-padding positions
    pub fn token_count(&self) -> usize {
        self.ids.iter().filter(|&&id| id != 0).count()
    }
}

/// The model's scalar output, in `[0, 1]`; higher means more positive
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct RawScore(f32);

impl RawScore {
    /// Wrap a model output, rejecting values outside `[0, 1]`
    pub fn new(value: f32) -> Result<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(Error::inference(format!(
                "model score {value} is outside [0, 1]"
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

/// Sentiment polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Positive)
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpreted model output
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentResult {
    /// Chosen polarity
    pub label: SentimentLabel,

    /// Certainty in the chosen label, in `[0.5, 1.0]`
    pub confidence: f32,

    /// Model output the label was derived from
    pub raw_score: f32,
}

impl SentimentResult {
    /// Derive label and confidence from a raw score.
    ///
    /// Ties at [`DECISION_THRESHOLD`] resolve to [`SentimentLabel::Positive`].
    pub fn from_raw_score(score: RawScore) -> Self {
        let raw = score.value();
        let (label, confidence) = if raw >= DECISION_THRESHOLD {
            (SentimentLabel::Positive, raw)
        } else {
            (SentimentLabel::Negative, 1.0 - raw)
        };

        Self {
            label,
            confidence,
            raw_score: raw,
        }
    }

    /// Confidence scaled to a percentage
    pub fn confidence_percent(&self) -> f32 {
        self.confidence * 100.0
    }
}
