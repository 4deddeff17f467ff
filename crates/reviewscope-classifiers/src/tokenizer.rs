//! Vocabulary lookup: words to integer token IDs
//!
//! Two artifact formats are supported:
//! - Keras `Tokenizer.to_json()` output, the format the review model was trained with
//! - HuggingFace `tokenizer.json`, loaded through the `tokenizers` crate

use reviewscope_core::{Error, Result, TokenSequence};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Maps text to token sequences through a fixed vocabulary
pub trait TextEncoder: Send + Sync {
    /// Encode a batch of texts, one sequence per text
    fn texts_to_sequences(&self, texts: &[&str]) -> Result<Vec<TokenSequence>>;

    /// Encode a single text
    fn encode(&self, text: &str) -> Result<TokenSequence> {
        self.texts_to_sequences(&[text])?
            .pop()
            .ok_or_else(|| Error::tokenizer("tokenizer returned no sequence"))
    }

    /// Get the tokenizer name
    fn name(&self) -> &str;
}

/// Tokenizer artifact format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerFormat {
    /// Keras `Tokenizer.to_json()`
    #[default]
    Keras,
    /// HuggingFace `tokenizer.json`
    #[serde(alias = "hf")]
    HuggingFace,
}

impl std::str::FromStr for TokenizerFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keras" => Ok(Self::Keras),
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            other => Err(format!("unknown tokenizer format '{other}' (expected keras or huggingface)")),
        }
    }
}

/// Load a tokenizer artifact in the given format
pub fn load_tokenizer(path: &Path, format: TokenizerFormat) -> Result<Arc<dyn TextEncoder>> {
    match format {
        TokenizerFormat::Keras => Ok(Arc::new(KerasTokenizer::from_file(path)?)),
        TokenizerFormat::HuggingFace => Ok(Arc::new(HfTokenizer::from_file(path)?)),
    }
}

const DEFAULT_FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// Top-level shape of `Tokenizer.to_json()`
#[derive(Debug, Deserialize)]
struct KerasTokenizerJson {
    class_name: String,
    config: KerasTokenizerConfig,
}

#[derive(Debug, Deserialize)]
struct KerasTokenizerConfig {
    #[serde(default)]
    num_words: Option<usize>,

    #[serde(default = "default_filters")]
    filters: String,

    #[serde(default = "default_true")]
    lower: bool,

    #[serde(default = "default_split")]
    split: String,

    #[serde(default)]
    char_level: bool,

    #[serde(default)]
    oov_token: Option<String>,

    word_index: WordIndex,
}

/// Keras stores `word_index` as a JSON document inside a string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WordIndex {
    Encoded(String),
    Map(HashMap<String, u32>),
}

impl WordIndex {
    fn into_map(self) -> Result<HashMap<String, u32>> {
        match self {
            Self::Map(map) => Ok(map),
            Self::Encoded(encoded) => Ok(serde_json::from_str(&encoded)?),
        }
    }
}

fn default_filters() -> String {
    DEFAULT_FILTERS.to_string()
}

fn default_true() -> bool {
    true
}

fn default_split() -> String {
    " ".to_string()
}

/// Word-level tokenizer reproducing Keras `texts_to_sequences`
#[derive(Debug, Clone)]
pub struct KerasTokenizer {
    name: String,
    word_index: HashMap<String, u32>,
    num_words: Option<usize>,
    oov_index: Option<u32>,
    filters: Vec<char>,
    lower: bool,
    split: String,
    char_level: bool,
}

impl KerasTokenizer {
    /// Load from a `Tokenizer.to_json()` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::tokenizer(format!("Failed to read tokenizer {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse `Tokenizer.to_json()` output
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: KerasTokenizerJson = serde_json::from_str(json)
            .map_err(|e| Error::tokenizer(format!("Invalid Keras tokenizer JSON: {e}")))?;

        if parsed.class_name != "Tokenizer" {
            return Err(Error::tokenizer(format!(
                "Expected a Keras Tokenizer, found '{}'",
                parsed.class_name
            )));
        }

        let config = parsed.config;
        let word_index = config
            .word_index
            .into_map()
            .map_err(|e| Error::tokenizer(format!("Invalid word_index: {e}")))?;
        let oov_index = config
            .oov_token
            .as_ref()
            .and_then(|token| word_index.get(token).copied());

        Ok(Self {
            name: "keras-tokenizer".to_string(),
            word_index,
            num_words: config.num_words.filter(|&n| n > 0),
            oov_index,
            filters: config.filters.chars().collect(),
            lower: config.lower,
            split: config.split,
            char_level: config.char_level,
        })
    }

    /// Build directly from a vocabulary
    pub fn from_word_index(word_index: HashMap<String, u32>, oov_token: Option<&str>) -> Self {
        let oov_index = oov_token.and_then(|token| word_index.get(token).copied());
        Self {
            name: "keras-tokenizer".to_string(),
            word_index,
            num_words: None,
            oov_index,
            filters: DEFAULT_FILTERS.chars().collect(),
            lower: true,
            split: " ".to_string(),
            char_level: false,
        }
    }

    /// Only keep the `num_words - 1` most frequent words
    pub fn with_num_words(mut self, num_words: usize) -> Self {
        self.num_words = Some(num_words).filter(|&n| n > 0);
        self
    }

    /// Vocabulary size (including the OOV entry, if any)
    pub fn vocab_size(&self) -> usize {
        self.word_index.len()
    }

    fn words(&self, text: &str) -> Vec<String> {
        let text = if self.lower {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        if self.char_level {
            return text.chars().map(String::from).collect();
        }

        let translated: String = text
            .chars()
            .map(|c| {
                if self.filters.contains(&c) {
                    self.split.clone()
                } else {
                    c.to_string()
                }
            })
            .collect();

        translated
            .split(self.split.as_str())
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn lookup(&self, word: &str) -> Option<u32> {
        match self.word_index.get(word) {
            Some(&index) => match self.num_words {
                Some(limit) if index as usize >= limit => self.oov_index,
                _ => Some(index),
            },
            None => self.oov_index,
        }
    }

    fn text_to_sequence(&self, text: &str) -> TokenSequence {
        self.words(text)
            .iter()
            .filter_map(|word| self.lookup(word))
            .collect::<Vec<_>>()
            .into()
    }
}

impl TextEncoder for KerasTokenizer {
    fn texts_to_sequences(&self, texts: &[&str]) -> Result<Vec<TokenSequence>> {
        Ok(texts.iter().map(|text| self.text_to_sequence(text)).collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Subword tokenizer backed by a HuggingFace `tokenizer.json`
pub struct HfTokenizer {
    name: String,
    inner: tokenizers::Tokenizer,
}

impl HfTokenizer {
    /// Load from a `tokenizer.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let inner = tokenizers::Tokenizer::from_file(path).map_err(|e| {
            Error::tokenizer(format!("Failed to load tokenizer {}: {}", path.display(), e))
        })?;

        Ok(Self {
            name: "hf-tokenizer".to_string(),
            inner,
        })
    }
}

impl TextEncoder for HfTokenizer {
    fn texts_to_sequences(&self, texts: &[&str]) -> Result<Vec<TokenSequence>> {
        texts
            .iter()
            .map(|text| {
                let encoding = self
                    .inner
                    .encode(*text, false)
                    .map_err(|e| Error::tokenizer(format!("Tokenization failed: {e}")))?;
                Ok(TokenSequence::new(encoding.get_ids().to_vec()))
            })
            .collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KERAS_JSON: &str = r##"{
        "class_name": "Tokenizer",
        "config": {
            "num_words": 6,
            "filters": "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n",
            "lower": true,
            "split": " ",
            "char_level": false,
            "oov_token": "<OOV>",
            "document_count": 3,
            "word_index": "{\"<OOV>\": 1, \"great\": 2, \"product\": 3, \"terrible\": 4, \"broke\": 5, \"day\": 6, \"one\": 7}"
        }
    }"##;

    #[test]
    fn test_parse_keras_json() {
        let tokenizer = KerasTokenizer::from_json(KERAS_JSON).unwrap();
        assert_eq!(tokenizer.vocab_size(), 7);
        assert_eq!(tokenizer.name(), "keras-tokenizer");
    }

    #[test]
    fn test_num_words_maps_rare_words_to_oov() {
        let tokenizer = KerasTokenizer::from_json(KERAS_JSON).unwrap();
        let seq = tokenizer.encode("terrible broke on day one").unwrap();

        // "day" and "one" are beyond num_words, "on" is unknown
        assert_eq!(seq.as_slice(), &[4, 5, 1, 1, 1]);
    }

    #[test]
    fn test_filters_and_lowercase() {
        let tokenizer = KerasTokenizer::from_json(KERAS_JSON).unwrap();
        let seq = tokenizer.encode("GREAT, product!").unwrap();
        assert_eq!(seq.as_slice(), &[2, 3]);
    }

    #[test]
    fn test_unknown_words_dropped_without_oov() {
        let index: HashMap<String, u32> =
            [("great".to_string(), 1), ("value".to_string(), 2)].into_iter().collect();
        let tokenizer = KerasTokenizer::from_word_index(index, None);

        let seq = tokenizer.encode("great price great value").unwrap();
        assert_eq!(seq.as_slice(), &[1, 1, 2]);
    }

    #[test]
    fn test_empty_text() {
        let tokenizer = KerasTokenizer::from_json(KERAS_JSON).unwrap();
        assert!(tokenizer.encode("").unwrap().is_empty());
        assert!(tokenizer.encode("   ").unwrap().is_empty());
    }

    #[test]
    fn test_batch_keeps_order() {
        let tokenizer = KerasTokenizer::from_json(KERAS_JSON).unwrap();
        let seqs = tokenizer
            .texts_to_sequences(&["great", "terrible product"])
            .unwrap();
        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].as_slice(), &[2]);
        assert_eq!(seqs[1].as_slice(), &[4, 3]);
    }

    #[test]
    fn test_plain_word_index_map() {
        let json = r#"{"class_name": "Tokenizer", "config": {"word_index": {"good": 1}}}"#;
        let tokenizer = KerasTokenizer::from_json(json).unwrap();
        assert_eq!(tokenizer.encode("good good bad").unwrap().as_slice(), &[1, 1]);
    }

    #[test]
    fn test_rejects_other_classes() {
        let json = r#"{"class_name": "TextVectorization", "config": {"word_index": {}}}"#;
        assert!(KerasTokenizer::from_json(json).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            KerasTokenizer::from_json("not json"),
            Err(Error::Tokenizer(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(KerasTokenizer::from_file("/nonexistent/tokenizer.json").is_err());
        assert!(HfTokenizer::from_file("/nonexistent/tokenizer.json").is_err());
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("keras".parse::<TokenizerFormat>().unwrap(), TokenizerFormat::Keras);
        assert_eq!("HF".parse::<TokenizerFormat>().unwrap(), TokenizerFormat::HuggingFace);
        assert!("pickle".parse::<TokenizerFormat>().is_err());
    }
}
