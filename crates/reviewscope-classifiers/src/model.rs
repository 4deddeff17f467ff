//! Sequence classification model
//!
//! The review model is an embedding → LSTM → dense(1) → sigmoid network,
//! exported to SafeTensors with the following tensor names:
//!
//! | tensor                | shape                    |
//! |-----------------------|--------------------------|
//! | `embedding.weight`    | `[vocab, embedding_dim]` |
//! | `lstm.weight_ih_l0`   | `[4*hidden, embedding_dim]` |
//! | `lstm.weight_hh_l0`   | `[4*hidden, hidden]`     |
//! | `lstm.bias_ih_l0`     | `[4*hidden]`             |
//! | `lstm.bias_hh_l0`     | `[4*hidden]`             |
//! | `classifier.weight`   | `[1, hidden]`            |
//! | `classifier.bias`     | `[1]`                    |
//!
//! Gate order follows PyTorch (input, forget, cell, output), which matches Keras.

use candle_core::{DType, Device, Tensor};
use candle_nn::{Embedding, Linear, Module, VarBuilder, LSTM, LSTMConfig, RNN};
use reviewscope_core::{Error, PaddedSequence, Result, SEQUENCE_LENGTH};
use std::collections::HashMap;
use std::path::Path;

/// Binary sequence classifier: one score in `[0, 1]` per padded sequence
pub trait SentimentModel: Send + Sync {
    /// Score a batch of padded sequences
    fn predict(&self, batch: &[PaddedSequence]) -> Result<Vec<f32>>;

    /// Get the model name
    fn name(&self) -> &str;
}

/// Layer sizes, read off the weight shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LstmDimensions {
    pub vocab_size: usize,
    pub embedding_dim: usize,
    pub hidden_size: usize,
}

impl LstmDimensions {
    /// Infer layer sizes from a tensor map
    pub fn infer(tensors: &HashMap<String, Tensor>) -> Result<Self> {
        let (vocab_size, embedding_dim) = dims2(tensors, "embedding.weight")?;
        let (gates, hidden_size) = dims2(tensors, "lstm.weight_hh_l0")?;
        let (outputs, classifier_in) = dims2(tensors, "classifier.weight")?;

        if gates != 4 * hidden_size {
            return Err(Error::artifact_load(format!(
                "lstm.weight_hh_l0 has {gates} rows, expected 4 * {hidden_size}"
            )));
        }
        if outputs != 1 || classifier_in != hidden_size {
            return Err(Error::artifact_load(format!(
                "classifier.weight is [{outputs}, {classifier_in}], expected [1, {hidden_size}]"
            )));
        }

        Ok(Self {
            vocab_size,
            embedding_dim,
            hidden_size,
        })
    }
}

fn dims2(tensors: &HashMap<String, Tensor>, name: &str) -> Result<(usize, usize)> {
    tensors
        .get(name)
        .ok_or_else(|| Error::artifact_load(format!("Model is missing tensor '{name}'")))?
        .dims2()
        .map_err(|e| Error::artifact_load(format!("Tensor '{name}' is not a matrix: {e}")))
}

/// Candle implementation of the review LSTM
pub struct LstmSentimentModel {
    name: String,
    embedding: Embedding,
    lstm: LSTM,
    classifier: Linear,
    dims: LstmDimensions,
    device: Device,
}

impl LstmSentimentModel {
    /// Load weights from a SafeTensors file
    pub fn load(path: impl AsRef<Path>, device: &Device) -> Result<Self> {
        let path = path.as_ref();
        let tensors = candle_core::safetensors::load(path, device).map_err(|e| {
            Error::artifact_load(format!("Failed to load SafeTensors {}: {}", path.display(), e))
        })?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sentiment-lstm")
            .to_string();

        Self::from_tensors(name, tensors, device)
    }

    /// Build the network from named tensors
    pub fn from_tensors(
        name: impl Into<String>,
        tensors: HashMap<String, Tensor>,
        device: &Device,
    ) -> Result<Self> {
        let dims = LstmDimensions::infer(&tensors)?;
        let vb = VarBuilder::from_tensors(tensors, DType::F32, device);

        let embedding =
            candle_nn::embedding(dims.vocab_size, dims.embedding_dim, vb.pp("embedding"))
                .map_err(|e| Error::artifact_load(format!("Failed to build embedding: {e}")))?;
        let lstm = candle_nn::lstm(
            dims.embedding_dim,
            dims.hidden_size,
            LSTMConfig::default(),
            vb.pp("lstm"),
        )
        .map_err(|e| Error::artifact_load(format!("Failed to build LSTM: {e}")))?;
        let classifier = candle_nn::linear(dims.hidden_size, 1, vb.pp("classifier"))
            .map_err(|e| Error::artifact_load(format!("Failed to build classifier: {e}")))?;

        tracing::debug!(
            vocab_size = dims.vocab_size,
            embedding_dim = dims.embedding_dim,
            hidden_size = dims.hidden_size,
            "Built LSTM sentiment model"
        );

        Ok(Self {
            name: name.into(),
            embedding,
            lstm,
            classifier,
            dims,
            device: device.clone(),
        })
    }

    pub fn dimensions(&self) -> LstmDimensions {
        self.dims
    }

    fn forward(&self, input_ids: &Tensor) -> candle_core::Result<Tensor> {
        let embedded = self.embedding.forward(input_ids)?;
        let states = self.lstm.seq(&embedded)?;
        let last = states
            .last()
            .ok_or_else(|| candle_core::Error::Msg("LSTM produced no states".to_string()))?;
        let logits = self.classifier.forward(last.h())?;
        candle_nn::ops::sigmoid(&logits)?.squeeze(1)
    }
}

impl SentimentModel for LstmSentimentModel {
    fn predict(&self, batch: &[PaddedSequence]) -> Result<Vec<f32>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::with_capacity(batch.len() * SEQUENCE_LENGTH);
        for sequence in batch {
            if let Some(&id) = sequence
                .as_slice()
                .iter()
                .find(|&&id| id as usize >= self.dims.vocab_size)
            {
                return Err(Error::inference(format!(
                    "token id {id} is outside the model vocabulary ({})",
                    self.dims.vocab_size
                )));
            }
            ids.extend_from_slice(sequence.as_slice());
        }

        let input_ids = Tensor::from_vec(ids, (batch.len(), SEQUENCE_LENGTH), &self.device)
            .map_err(|e| Error::inference(format!("Failed to create input tensor: {e}")))?;

        self.forward(&input_ids)
            .and_then(|scores| scores.to_vec1::<f32>())
            .map_err(|e| Error::inference(format!("Model forward pass failed: {e}")))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
