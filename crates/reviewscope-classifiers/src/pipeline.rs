//! Sentiment inference pipeline
//!
//! normalize → tokenize → pad → infer → interpret, over borrowed artifacts.

use crate::model_loader::Artifacts;
use reviewscope_core::{
    pad_sequence, Error, NormalizedText, PaddedSequence, RawScore, Result, SentimentResult,
    TokenSequence,
};
use std::time::Instant;
use tracing::debug;

/// Model input derived from one review
#[derive(Debug, Clone)]
pub struct PreparedInput {
    pub normalized: NormalizedText,
    pub tokens: TokenSequence,
    pub padded: PaddedSequence,
}

/// Runs one review through the loaded model.
///
/// Holding a `&Artifacts` is the precondition: there is no way to build a
/// pipeline without loaded artifacts.
#[derive(Debug, Clone, Copy)]
pub struct SentimentPipeline<'a> {
    artifacts: &'a Artifacts,
}

impl<'a> SentimentPipeline<'a> {
    pub fn new(artifacts: &'a Artifacts) -> Self {
        Self { artifacts }
    }

    /// Normalize, tokenize, and pad a review
    pub fn prepare(&self, review: &str) -> Result<PreparedInput> {
        let normalized = NormalizedText::new(review);
        let tokens = self.artifacts.tokenizer().encode(normalized.as_str())?;
        let padded = pad_sequence(&tokens);

        debug!(
            words = normalized.words().count(),
            tokens = tokens.len(),
            "Prepared review for inference"
        );

        Ok(PreparedInput {
            normalized,
            tokens,
            padded,
        })
    }

    /// Score a prepared input
    pub fn infer(&self, input: &PreparedInput) -> Result<RawScore> {
        let start = Instant::now();
        let scores = self
            .artifacts
            .model()
            .predict(std::slice::from_ref(&input.padded))?;
        let latency_us = start.elapsed().as_micros() as u64;

        metrics::histogram!("reviewscope_inference_latency_us").record(latency_us as f64);
        debug!(latency_us, "Model inference complete");

        let score = scores
            .first()
            .copied()
            .ok_or_else(|| Error::inference("model returned no score"))?;
        RawScore::new(score)
    }

    /// Classify one review
    pub fn run(&self, review: &str) -> Result<SentimentResult> {
        let input = self.prepare(review)?;
        let score = self.infer(&input)?;
        Ok(SentimentResult::from_raw_score(score))
    }
}
