//! Pixel format tags for texture round trips.
//!
//! Converting a DDS texture to PNG or JPEG loses its pixel format. This
//! crate preserves it in two ways:
//!
//! - [`TagCodec`] - embeds the format in the raster filename (`tex01-DDS_DXT1.png`)
//! - [`FormatManifest`] - a JSON sidecar mapping stems to formats
//!
//! # Example
//!
//! ```
//! use texconv_tag::{PixelFormatTag, TagCodec};
//!
//! let codec = TagCodec::default();
//! let name = codec.encode("tex01", PixelFormatTag::Dxt1, "png")?;
//! assert_eq!(name.file_name(), "tex01-DDS_DXT1.png");
//!
//! let decoded = codec.decode("tex01-DDS_DXT1.png")?;
//! assert_eq!(decoded.stem(), "tex01");
//! assert_eq!(decoded.format(), PixelFormatTag::Dxt1);
//! # Ok::<(), texconv_tag::Error>(())
//! ```

mod error;
mod format;
mod manifest;
mod tag;

pub use error::{Error, Result};
pub use format::PixelFormatTag;
pub use manifest::{FormatManifest, MANIFEST_FILE_NAME};
pub use tag::{validate_delimiter, TagCodec, TaggedFilename, DEFAULT_DELIMITER};
