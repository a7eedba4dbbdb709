//! Error types for format tagging.

use thiserror::Error;

/// Errors that can occur when encoding, decoding, or persisting format tags.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The filename carries more than one delimiter, so the tag segment cannot be identified.
    #[error("ambiguous format metadata in {filename:?}: found {delimiters} '{delimiter}' delimiters")]
    AmbiguousMetadata {
        filename: String,
        delimiter: char,
        delimiters: usize,
    },

    /// The stem is empty.
    #[error("empty stem in {0:?}")]
    EmptyStem(String),

    /// The stem contains the tag delimiter and would not decode back to itself.
    #[error("stem {stem:?} contains the tag delimiter '{delimiter}'")]
    DelimiterInStem { stem: String, delimiter: char },

    /// The delimiter cannot separate a stem from a tag.
    #[error("'{0}' cannot be used as a tag delimiter")]
    InvalidDelimiter(char),

    /// Manifest (de)serialization error.
    #[error("format manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Result type for tagging operations.
pub type Result<T> = std::result::Result<T, Error>;
