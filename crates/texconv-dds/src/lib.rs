//! DDS texture handling for texconv.
//!
//! - [`probe_dds`] reads the header and classifies the source pixel format
//! - [`TextureCodec`] abstracts decoding and encoding of texture files
//! - [`DdsCodec`] implements it on top of `image_dds` and `image`
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use texconv_dds::{DdsCodec, RasterFormat, TextureCodec};
//!
//! let codec = DdsCodec::default();
//! let texture = codec.decode_container(Path::new("tex01.dds"))?;
//! println!("source format: {}", texture.reported_format());
//! codec.save_raster(&texture.image, Path::new("tex01.png"), RasterFormat::Png)?;
//! # Ok::<(), texconv_dds::Error>(())
//! ```

mod codec;
mod error;
mod header;
mod probe;

pub use codec::{check_block_alignment, DdsCodec, DecodedTexture, RasterFormat, TextureCodec};
pub use error::{Error, Result};
pub use header::{DdsHeader, DdsHeaderDxt10, DdsPixelFormat, FourCC};
pub use image_dds::Quality;
pub use probe::{probe_dds, probe_dds_file, DdsInfo, MAX_HEADER_LEN};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";
