//! Texture codec used by the batch converter.
//!
//! [`TextureCodec`] is the seam between directory processing and the
//! image libraries. [`DdsCodec`] implements it with `image_dds` for DDS
//! surfaces and `image` for PNG/JPEG files.

use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use image::{DynamicImage, RgbaImage};
use image_dds::ddsfile::Dds;
use image_dds::{ImageFormat, Mipmaps, Quality};
use texconv_tag::PixelFormatTag;

use crate::probe::{probe_dds, DdsInfo};
use crate::{Error, Result};

/// Raster file formats written and read by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterFormat {
    #[default]
    Png,
    Jpeg,
}

impl RasterFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

/// A decoded DDS texture.
#[derive(Debug, Clone)]
pub struct DecodedTexture {
    /// Base mip level as RGBA8.
    pub image: RgbaImage,
    /// Header information, including the reported pixel format.
    pub info: DdsInfo,
}

impl DecodedTexture {
    /// Pixel format the container reported.
    pub fn reported_format(&self) -> PixelFormatTag {
        self.info.format
    }
}

/// Decoding and encoding of texture files.
pub trait TextureCodec {
    /// Load a DDS container and decode its base mip level.
    fn decode_container(&self, path: &Path) -> Result<DecodedTexture>;

    /// Load a raster image.
    fn load_raster(&self, path: &Path) -> Result<RgbaImage>;

    /// Write `image` as a raster file.
    fn save_raster(&self, image: &RgbaImage, path: &Path, format: RasterFormat) -> Result<()>;

    /// Encode `image` to `format` and write it as a DDS container.
    fn save_container(&self, image: &RgbaImage, path: &Path, format: PixelFormatTag)
        -> Result<()>;
}

/// Check that `format` can encode a `width` x `height` surface.
pub fn check_block_alignment(width: u32, height: u32, format: PixelFormatTag) -> Result<()> {
    if format.is_block_compressed() && (width % 4 != 0 || height % 4 != 0) {
        return Err(Error::BlockAlignment {
            width,
            height,
            format,
        });
    }
    Ok(())
}

/// [`TextureCodec`] backed by `image_dds` and `image`.
#[derive(Debug, Clone, Copy)]
pub struct DdsCodec {
    quality: Quality,
    mipmaps: bool,
}

impl Default for DdsCodec {
    fn default() -> Self {
        Self::new(Quality::Normal, true)
    }
}

impl DdsCodec {
    /// Create a codec encoding at `quality`, generating mipmaps when `mipmaps` is set.
    pub fn new(quality: Quality, mipmaps: bool) -> Self {
        Self { quality, mipmaps }
    }

    fn target_format(format: PixelFormatTag) -> Result<ImageFormat> {
        match format {
            PixelFormatTag::Dxt1 => Ok(ImageFormat::BC1RgbaUnorm),
            PixelFormatTag::Dxt5 => Ok(ImageFormat::BC3RgbaUnorm),
            PixelFormatTag::Argb => Ok(ImageFormat::Bgra8Unorm),
            PixelFormatTag::G16R16 | PixelFormatTag::Unspecified => {
                Err(Error::UnsupportedTarget(format))
            }
        }
    }
}

impl TextureCodec for DdsCodec {
    /// The pixel format comes from the `zerocopy` header read, which also
    /// classifies numeric D3DFMT codes and bit masks. `ddsfile` reads the
    /// same buffer for the surface only, and a file the two readers disagree
    /// on is a decode error.
    fn decode_container(&self, path: &Path) -> Result<DecodedTexture> {
        let data = fs::read(path)?;
        let info = probe_dds(&data)?;
        log::debug!(
            "{}: {}x{}, {} mipmaps, {}",
            path.display(),
            info.width,
            info.height,
            info.mipmap_count,
            info.format
        );

        let dds = Dds::read(&mut Cursor::new(&data)).map_err(|e| Error::Decode(e.to_string()))?;
        if (dds.get_width(), dds.get_height()) != (info.width, info.height) {
            return Err(Error::Decode(format!(
                "header reports {}x{}, surface is {}x{}",
                info.width,
                info.height,
                dds.get_width(),
                dds.get_height()
            )));
        }
        let image = image_dds::image_from_dds(&dds, 0).map_err(|e| Error::Decode(e.to_string()))?;

        Ok(DecodedTexture { image, info })
    }

    fn load_raster(&self, path: &Path) -> Result<RgbaImage> {
        Ok(image::open(path)?.to_rgba8())
    }

    fn save_raster(&self, image: &RgbaImage, path: &Path, format: RasterFormat) -> Result<()> {
        match format {
            RasterFormat::Png => image.save_with_format(path, format.image_format())?,
            // JPEG has no alpha channel.
            RasterFormat::Jpeg => DynamicImage::ImageRgba8(image.clone())
                .to_rgb8()
                .save_with_format(path, format.image_format())?,
        }
        Ok(())
    }

    fn save_container(
        &self,
        image: &RgbaImage,
        path: &Path,
        format: PixelFormatTag,
    ) -> Result<()> {
        let target = Self::target_format(format)?;
        check_block_alignment(image.width(), image.height(), format)?;

        let mipmaps = if self.mipmaps {
            Mipmaps::GeneratedAutomatic
        } else {
            Mipmaps::Disabled
        };
        let dds = image_dds::dds_from_image(image, target, self.quality, mipmaps).map_err(|e| {
            Error::Encode {
                format,
                reason: e.to_string(),
            }
        })?;

        let mut writer = BufWriter::new(File::create(path)?);
        dds.write(&mut writer).map_err(|e| Error::Encode {
            format,
            reason: e.to_string(),
        })?;
        writer.flush()?;

        Ok(())
    }
}
