//! End-to-end tests over artifacts written to disk
//!
//! Builds a tiny LSTM with known weights, saves it as SafeTensors next to a
//! Keras tokenizer file, and runs reviews through the full analyzer.

use candle_core::{DType, Device, Tensor};
use reviewscope_classifiers::{
    Analysis, ArtifactCache, ArtifactConfig, ArtifactStatus, ReviewAnalyzer, Strength,
};
use reviewscope_core::{Error, SentimentLabel};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

const VOCAB: usize = 16;
const EMBED: usize = 4;
const HIDDEN: usize = 3;

const TOKENIZER_JSON: &str = r#"{
    "class_name": "Tokenizer",
    "config": {
        "num_words": 10000,
        "lower": true,
        "split": " ",
        "oov_token": "<OOV>",
        "word_index": "{\"<OOV>\": 1, \"excellent\": 2, \"quality\": 3, \"and\": 4, \"fast\": 5, \"delivery\": 6}"
    }
}"#;

fn write_model(path: &Path, classifier_bias: f32) {
    let dev = Device::Cpu;
    let zeros = |shape: Vec<usize>| Tensor::zeros(shape, DType::F32, &dev).unwrap();

    let mut tensors = HashMap::new();
    tensors.insert("embedding.weight".to_string(), zeros(vec![VOCAB, EMBED]));
    tensors.insert("lstm.weight_ih_l0".to_string(), zeros(vec![4 * HIDDEN, EMBED]));
    tensors.insert("lstm.weight_hh_l0".to_string(), zeros(vec![4 * HIDDEN, HIDDEN]));
    tensors.insert("lstm.bias_ih_l0".to_string(), zeros(vec![4 * HIDDEN]));
    tensors.insert("lstm.bias_hh_l0".to_string(), zeros(vec![4 * HIDDEN]));
    tensors.insert("classifier.weight".to_string(), zeros(vec![1, HIDDEN]));
    tensors.insert(
        "classifier.bias".to_string(),
        Tensor::new(&[classifier_bias], &dev).unwrap(),
    );

    candle_core::safetensors::save(&tensors, path).unwrap();
}

fn config_for(dir: &Path) -> ArtifactConfig {
    ArtifactConfig {
        model_path: dir.join("sentiment_model.safetensors"),
        tokenizer_path: dir.join("review_tokenizer.json"),
        ..ArtifactConfig::default()
    }
}

#[test]
fn test_analyze_with_artifacts_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    write_model(&config.model_path, 2.0);
    std::fs::write(&config.tokenizer_path, TOKENIZER_JSON).unwrap();

    let cache = Arc::new(ArtifactCache::from_paths(config.to_artifact_paths()));
    let analyzer = ReviewAnalyzer::new(cache.clone()).with_reported_accuracy(Some(0.892));

    let report = match analyzer.analyze("Excellent quality and fast delivery.").unwrap() {
        Analysis::Completed(report) => report,
        other => panic!("expected completed analysis, got {other:?}"),
    };

    let expected = 1.0 / (1.0 + (-2.0f32).exp());
    assert_eq!(report.sentiment.label, SentimentLabel::Positive);
    assert!((report.sentiment.raw_score - expected).abs() < 1e-5);
    assert_eq!(report.insights.strength, Strength::Strong);
    assert_eq!(report.insights.reported_accuracy, Some(0.892));
    assert_eq!(cache.status(), ArtifactStatus::Ready);
}

#[test]
fn test_negative_bias_gives_negative_label() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    write_model(&config.model_path, -1.0);
    std::fs::write(&config.tokenizer_path, TOKENIZER_JSON).unwrap();

    let analyzer = ReviewAnalyzer::new(Arc::new(ArtifactCache::from_paths(
        config.to_artifact_paths(),
    )));

    match analyzer.analyze("Terrible, broke on day one!!").unwrap() {
        Analysis::Completed(report) => {
            assert_eq!(report.sentiment.label, SentimentLabel::Negative);
            assert!(report.sentiment.confidence > 0.5);
        }
        other => panic!("expected completed analysis, got {other:?}"),
    }
}

#[test]
fn test_missing_model_reports_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    std::fs::write(&config.tokenizer_path, TOKENIZER_JSON).unwrap();

    let cache = Arc::new(ArtifactCache::from_paths(config.to_artifact_paths()));
    let analyzer = ReviewAnalyzer::new(cache.clone());

    let err = analyzer
        .analyze("Excellent quality and fast delivery.")
        .unwrap_err();
    assert!(matches!(err, Error::ArtifactLoad(_)));
    assert!(matches!(cache.status(), ArtifactStatus::Failed(msg) if msg.contains("Model file not found")));
}

#[test]
fn test_failed_load_is_not_retried() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let cache = Arc::new(ArtifactCache::from_paths(config.to_artifact_paths()));
    let analyzer = ReviewAnalyzer::new(cache.clone());

    assert!(analyzer.analyze("Excellent quality and fast delivery.").is_err());

    // Artifacts appearing later do not change the memoized outcome
    write_model(&config.model_path, 2.0);
    std::fs::write(&config.tokenizer_path, TOKENIZER_JSON).unwrap();

    assert!(analyzer.analyze("Excellent quality and fast delivery.").is_err());
    assert!(matches!(cache.status(), ArtifactStatus::Failed(_)));
}
