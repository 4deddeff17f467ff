//! Descriptive statistics shown alongside a sentiment result

use reviewscope_core::{word_count, SentimentResult};
use serde::Serialize;

/// Reviews with more words than this get a comprehensive analysis label
pub const COMPREHENSIVE_WORD_COUNT: usize = 15;

/// Reviews shorter than this many characters are flagged as short
pub const VALID_REVIEW_CHARS: usize = 20;

const STRONG_CONFIDENCE: f32 = 0.8;
const MODERATE_CONFIDENCE: f32 = 0.6;

/// How decisive the sentiment is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

impl Strength {
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence > STRONG_CONFIDENCE {
            Self::Strong
        } else if confidence > MODERATE_CONFIDENCE {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        match self {
            Self::Strong => ConfidenceLevel::High,
            Self::Moderate => ConfidenceLevel::Medium,
            Self::Weak => ConfidenceLevel::Low,
        }
    }

    pub fn reliability(&self) -> Reliability {
        match self {
            Self::Strong => Reliability::Excellent,
            Self::Moderate => Reliability::Good,
            Self::Weak => Reliability::Fair,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reliability {
    Excellent,
    Good,
    Fair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisDepth {
    Comprehensive,
    Basic,
}

impl AnalysisDepth {
    pub fn from_word_count(words: usize) -> Self {
        if words > COMPREHENSIVE_WORD_COUNT {
            Self::Comprehensive
        } else {
            Self::Basic
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputStatus {
    Valid,
    Short,
}

impl InputStatus {
    pub fn from_review(review: &str) -> Self {
        if review.chars().count() >= VALID_REVIEW_CHARS {
            Self::Valid
        } else {
            Self::Short
        }
    }
}

/// Everything the result page shows beyond label and confidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub word_count: usize,
    pub analysis_depth: AnalysisDepth,
    pub strength: Strength,
    pub confidence_level: ConfidenceLevel,
    pub reliability: Reliability,
    pub input_status: InputStatus,
    pub confidence_percent: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_accuracy: Option<f32>,
}

impl Insights {
    pub fn derive(review: &str, result: &SentimentResult, reported_accuracy: Option<f32>) -> Self {
        let words = word_count(review);
        let strength = Strength::from_confidence(result.confidence);

        Self {
            word_count: words,
            analysis_depth: AnalysisDepth::from_word_count(words),
            strength,
            confidence_level: strength.confidence_level(),
            reliability: strength.reliability(),
            input_status: InputStatus::from_review(review),
            confidence_percent: result.confidence_percent(),
            reported_accuracy,
        }
    }
}
