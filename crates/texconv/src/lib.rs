//! texconv - batch conversion of DDS textures to and from PNG/JPEG.
//!
//! This crate ties the texconv crates together:
//!
//! - [`texconv_tag`] - pixel format tags in filenames and the format manifest
//! - [`texconv_dds`] - DDS header probing and the texture codec
//!
//! and adds [`BatchConverter`], which walks an input directory and converts
//! every matching file into an output directory.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use texconv::prelude::*;
//!
//! let converter = BatchConverter::new(DdsCodec::default(), ConvertOptions::default());
//! let report = converter.run(Path::new("textures"), Path::new("png"), |event| {
//!     if let ProgressEvent::Converting { file_name, index, total } = event {
//!         println!("Converting: {} {}/{}", file_name, index, total);
//!     }
//! })?;
//! println!("{} converted, {} failed", report.converted, report.failed.len());
//! # Ok::<(), texconv::Error>(())
//! ```

mod error;
mod options;
mod pipeline;
mod scan;

pub use texconv_dds as dds;
pub use texconv_tag as tag;

pub use error::{Error, Result};
pub use options::{ConvertOptions, Direction};
pub use pipeline::{BatchConverter, BatchReport, FailedFile, ProgressEvent};
pub use scan::{collect_files, SourceFile};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{BatchConverter, BatchReport, ConvertOptions, Direction, ProgressEvent};
    pub use texconv_dds::{DdsCodec, Quality, RasterFormat, TextureCodec};
    pub use texconv_tag::{FormatManifest, PixelFormatTag, TagCodec};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
