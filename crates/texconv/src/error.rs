//! Error types for batch conversion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during a batch conversion.
///
/// [`Error::Scan`], [`Error::CreateOutput`], an invalid delimiter and
/// manifest I/O abort the whole batch. Everything else is reported per file.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input directory could not be read.
    #[error("failed to scan {}: {source}", .dir.display())]
    Scan {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", .dir.display())]
    CreateOutput {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filename tag or manifest error.
    #[error("{0}")]
    Tag(#[from] texconv_tag::Error),

    /// Texture decoding or encoding error.
    #[error("{0}")]
    Codec(#[from] texconv_dds::Error),

    /// Another file of the same batch was already written to this output path.
    #[error("{} was already written by another file in this batch", .0.display())]
    OutputCollision(PathBuf),

    /// The file name is not valid UTF-8.
    #[error("file name is not valid UTF-8: {}", .0.display())]
    NonUtf8Name(PathBuf),
}

/// Result type for batch operations.
pub type Result<T> = std::result::Result<T, Error>;
