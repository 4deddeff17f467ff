//! Review analysis boundary
//!
//! Validates user input, checks that artifacts are available, runs the
//! pipeline and attaches insights. Rejected input never reaches the model.

use crate::insights::Insights;
use crate::model_loader::ArtifactCache;
use crate::pipeline::SentimentPipeline;
use reviewscope_core::{non_whitespace_len, Result, SentimentResult};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Minimum number of non-whitespace characters before a review is analyzed
pub const MIN_REVIEW_CHARS: usize = 10;

/// Why a review was not analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum InputRejection {
    /// Nothing but whitespace
    Empty,
    /// Fewer than [`MIN_REVIEW_CHARS`] non-whitespace characters
    TooShort { non_whitespace_chars: usize },
}

impl InputRejection {
    /// User-facing warning text
    pub fn message(&self) -> String {
        match self {
            Self::Empty => "Please enter a review to analyze.".to_string(),
            Self::TooShort { .. } => format!(
                "Please provide a more detailed review (at least {MIN_REVIEW_CHARS} characters) for accurate analysis."
            ),
        }
    }
}

impl fmt::Display for InputRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Check a review before any inference work
pub fn validate_review(review: &str) -> std::result::Result<(), InputRejection> {
    let chars = non_whitespace_len(review);
    if chars == 0 {
        Err(InputRejection::Empty)
    } else if chars < MIN_REVIEW_CHARS {
        Err(InputRejection::TooShort {
            non_whitespace_chars: chars,
        })
    } else {
        Ok(())
    }
}

/// Completed analysis of one review
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewReport {
    pub sentiment: SentimentResult,
    pub insights: Insights,
}

/// Outcome of one user submission
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Rejected(InputRejection),
    Completed(ReviewReport),
}

/// Entry point for a single review submission
#[derive(Debug, Clone)]
pub struct ReviewAnalyzer {
    artifacts: Arc<ArtifactCache>,
    reported_accuracy: Option<f32>,
}

impl ReviewAnalyzer {
    pub fn new(artifacts: Arc<ArtifactCache>) -> Self {
        Self {
            artifacts,
            reported_accuracy: None,
        }
    }

    /// Accuracy figure displayed next to results
    pub fn with_reported_accuracy(mut self, accuracy: Option<f32>) -> Self {
        self.reported_accuracy = accuracy;
        self
    }

    pub fn artifacts(&self) -> &ArtifactCache {
        &self.artifacts
    }

    /// Analyze one review.
    ///
    /// Returns `Ok(Analysis::Rejected)` for unusable input and
    /// `Err(Error::ArtifactLoad)` when the model could not be loaded.
    pub fn analyze(&self, review: &str) -> Result<Analysis> {
        if let Err(rejection) = validate_review(review) {
            warn!(?rejection, "Review rejected before inference");
            metrics::counter!("reviewscope_analyses_total", "outcome" => "rejected").increment(1);
            return Ok(Analysis::Rejected(rejection));
        }

        let artifacts = self.artifacts.get().map_err(|e| {
            metrics::counter!("reviewscope_analyses_total", "outcome" => "unavailable")
                .increment(1);
            e
        })?;

        let sentiment = SentimentPipeline::new(&artifacts).run(review).map_err(|e| {
            metrics::counter!("reviewscope_analyses_total", "outcome" => "error").increment(1);
            e
        })?;

        let outcome = if sentiment.label.is_positive() {
            "positive"
        } else {
            "negative"
        };
        metrics::counter!("reviewscope_analyses_total", "outcome" => outcome).increment(1);
        info!(
            label = %sentiment.label,
            confidence = sentiment.confidence,
            raw_score = sentiment.raw_score,
            "Review analyzed"
        );

        let insights = Insights::derive(review, &sentiment, self.reported_accuracy);
        Ok(Analysis::Completed(ReviewReport {
            sentiment,
            insights,
        }))
    }
}
