//! Mock artifacts for testing
//!
//! Provides recording implementations of the model and tokenizer traits so
//! the analysis flow can be checked without trained weights.

use reviewscope_classifiers::{
    Analysis, ArtifactCache, Artifacts, InputRejection, ReviewAnalyzer, SentimentModel,
    SentimentPipeline, TextEncoder,
};
use reviewscope_core::{
    Error, PaddedSequence, Result, SentimentLabel, TokenSequence, SEQUENCE_LENGTH,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// A configurable mock model for testing
pub struct MockModel {
    score: f32,
    call_count: AtomicU32,
    inputs: Mutex<Vec<PaddedSequence>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self {
            score: 0.5,
            call_count: AtomicU32::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Set the score this model will return
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    /// Get the number of times predict was called
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Every sequence the model has seen
    pub fn inputs(&self) -> Vec<PaddedSequence> {
        self.inputs.lock().unwrap().clone()
    }
}

impl SentimentModel for MockModel {
    fn predict(&self, batch: &[PaddedSequence]) -> Result<Vec<f32>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.inputs.lock().unwrap().extend_from_slice(batch);
        Ok(vec![self.score; batch.len()])
    }

    fn name(&self) -> &str {
        "mock-model"
    }
}

/// A model that always fails - for testing error paths
pub struct FailingModel;

impl SentimentModel for FailingModel {
    fn predict(&self, _batch: &[PaddedSequence]) -> Result<Vec<f32>> {
        Err(Error::inference("Simulated model failure"))
    }

    fn name(&self) -> &str {
        "failing-model"
    }
}

/// A tokenizer that returns fixed ids and records what it was given
pub struct MockEncoder {
    ids: Vec<u32>,
    texts: Mutex<Vec<String>>,
}

impl MockEncoder {
    pub fn new(ids: Vec<u32>) -> Self {
        Self {
            ids,
            texts: Mutex::new(Vec::new()),
        }
    }

    /// Every text the encoder has seen
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

impl TextEncoder for MockEncoder {
    fn texts_to_sequences(&self, texts: &[&str]) -> Result<Vec<TokenSequence>> {
        let mut seen = self.texts.lock().unwrap();
        Ok(texts
            .iter()
            .map(|text| {
                seen.push(text.to_string());
                TokenSequence::new(self.ids.clone())
            })
            .collect())
    }

    fn name(&self) -> &str {
        "mock-encoder"
    }
}

fn analyzer_with(model: Arc<MockModel>, encoder: Arc<MockEncoder>) -> ReviewAnalyzer {
    let artifacts = Artifacts::new(model, encoder);
    ReviewAnalyzer::new(Arc::new(ArtifactCache::preloaded(artifacts)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_review_flow() {
        let model = Arc::new(MockModel::new().with_score(0.12));
        let encoder = Arc::new(MockEncoder::new(vec![41, 7, 3, 9, 18]));
        let analyzer = analyzer_with(model.clone(), encoder.clone());

        let report = match analyzer.analyze("Terrible, broke on day one!!").unwrap() {
            Analysis::Completed(report) => report,
            other => panic!("expected completed analysis, got {other:?}"),
        };

        assert_eq!(encoder.texts(), vec!["terrible broke on day one".to_string()]);
        assert_eq!(model.call_count(), 1);

        let inputs = model.inputs();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].len(), SEQUENCE_LENGTH);
        assert_eq!(&inputs[0].as_slice()[95..], &[41, 7, 3, 9, 18]);
        assert!(inputs[0].as_slice()[..95].iter().all(|&id| id == 0));

        assert_eq!(report.sentiment.label, SentimentLabel::Negative);
        assert!((report.sentiment.confidence - 0.88).abs() < 1e-6);
        assert!((report.sentiment.raw_score - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_positive_review_flow() {
        let model = Arc::new(MockModel::new().with_score(0.93));
        let encoder = Arc::new(MockEncoder::new(vec![12, 44, 2, 87, 150]));
        let analyzer = analyzer_with(model.clone(), encoder);

        match analyzer.analyze("Excellent quality and fast delivery.").unwrap() {
            Analysis::Completed(report) => {
                assert_eq!(report.sentiment.label, SentimentLabel::Positive);
                assert!((report.sentiment.confidence - 0.93).abs() < 1e-6);
                assert_eq!(report.insights.word_count, 5);
            }
            other => panic!("expected completed analysis, got {other:?}"),
        }
        assert_eq!(model.call_count(), 1);
    }

    #[test]
    fn test_short_and_empty_input_skip_model() {
        let model = Arc::new(MockModel::new());
        let encoder = Arc::new(MockEncoder::new(vec![1]));
        let analyzer = analyzer_with(model.clone(), encoder.clone());

        assert_eq!(
            analyzer.analyze("ok").unwrap(),
            Analysis::Rejected(InputRejection::TooShort {
                non_whitespace_chars: 2
            })
        );
        assert_eq!(
            analyzer.analyze("   ").unwrap(),
            Analysis::Rejected(InputRejection::Empty)
        );

        assert_eq!(model.call_count(), 0);
        assert!(encoder.texts().is_empty());
    }

    #[test]
    fn test_load_failure_refuses_analysis() {
        let loads = Arc::new(AtomicU32::new(0));
        let counter = loads.clone();
        let cache = ArtifactCache::new(move || {
            counter.fetch_add(1, Ordering::Relaxed);
            Err(Error::tokenizer("Invalid Keras tokenizer JSON"))
        });
        let analyzer = ReviewAnalyzer::new(Arc::new(cache));

        for _ in 0..2 {
            let err = analyzer
                .analyze("Excellent quality and fast delivery.")
                .unwrap_err();
            assert!(matches!(err, Error::ArtifactLoad(_)));
        }
        assert_eq!(loads.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_short_input_does_not_trigger_load() {
        let loads = Arc::new(AtomicU32::new(0));
        let counter = loads.clone();
        let cache = ArtifactCache::new(move || {
            counter.fetch_add(1, Ordering::Relaxed);
            Err(Error::artifact_load("unreachable"))
        });
        let analyzer = ReviewAnalyzer::new(Arc::new(cache));

        assert!(matches!(
            analyzer.analyze("meh").unwrap(),
            Analysis::Rejected(_)
        ));
        assert_eq!(loads.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_unknown_words_still_infer() {
        let model = Arc::new(MockModel::new().with_score(0.5));
        let encoder = Arc::new(MockEncoder::new(Vec::new()));
        let analyzer = analyzer_with(model.clone(), encoder);

        match analyzer.analyze("zzzzqqqq xxxyyy").unwrap() {
            Analysis::Completed(report) => {
                assert_eq!(report.sentiment.label, SentimentLabel::Positive);
            }
            other => panic!("expected completed analysis, got {other:?}"),
        }

        let inputs = model.inputs();
        assert_eq!(inputs[0].as_slice(), &[0u32; SEQUENCE_LENGTH][..]);
    }

    #[test]
    fn test_model_failure_propagates() {
        let artifacts = Artifacts::new(Arc::new(FailingModel), Arc::new(MockEncoder::new(vec![1])));
        let result = SentimentPipeline::new(&artifacts).run("Excellent quality and fast delivery.");
        assert!(matches!(result, Err(Error::Inference(_))));
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        let model = Arc::new(MockModel::new().with_score(1.5));
        let artifacts = Artifacts::new(model, Arc::new(MockEncoder::new(vec![1])));
        let result = SentimentPipeline::new(&artifacts).run("Excellent quality and fast delivery.");
        assert!(matches!(result, Err(Error::Inference(_))));
    }
}
