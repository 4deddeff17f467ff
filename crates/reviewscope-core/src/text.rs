//! Text preparation in front of the sentiment model

use crate::types::{PaddedSequence, TokenSequence, SEQUENCE_LENGTH};

/// Lower-case `text` and drop every character that is neither
/// alphanumeric nor whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Fit a token sequence to [`SEQUENCE_LENGTH`] positions.
///
/// Short sequences are zero-padded at the start; long ones keep their last
/// [`SEQUENCE_LENGTH`] tokens.
pub fn pad_sequence(tokens: &TokenSequence) -> PaddedSequence {
    let ids = tokens.as_slice();

    let padded = if ids.len() >= SEQUENCE_LENGTH {
        ids[ids.len() - SEQUENCE_LENGTH..].to_vec()
    } else {
        let mut padded = vec![0; SEQUENCE_LENGTH - ids.len()];
        padded.extend_from_slice(ids);
        padded
    };

    PaddedSequence::from_exact(padded)
}

/// Number of whitespace-separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of characters that are not whitespace
pub fn non_whitespace_len(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}
