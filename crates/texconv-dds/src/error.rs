//! Error types for DDS handling.

use texconv_tag::PixelFormatTag;
use thiserror::Error;

/// Errors that can occur when probing, decoding, or encoding textures.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raster image error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Invalid DDS magic.
    #[error("invalid DDS magic: expected 'DDS ', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Invalid DDS header.
    #[error("invalid DDS header: {0}")]
    InvalidHeader(String),

    /// The DDS surface could not be decoded.
    #[error("failed to decode DDS surface: {0}")]
    Decode(String),

    /// The image could not be encoded to the requested format.
    #[error("failed to encode {format}: {reason}")]
    Encode {
        format: PixelFormatTag,
        reason: String,
    },

    /// The format has no encoder.
    #[error("encoding to {0} is not supported")]
    UnsupportedTarget(PixelFormatTag),

    /// Block compressed formats need dimensions in whole 4x4 blocks.
    #[error("{width}x{height} is not a multiple of the 4x4 block size required by {format}")]
    BlockAlignment {
        width: u32,
        height: u32,
        format: PixelFormatTag,
    },
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
