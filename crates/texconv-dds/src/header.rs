//! DDS header structures.

use texconv_tag::PixelFormatTag;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// DDS file header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// Check if this is a DX10 extended header.
    pub fn is_dx10(&self) -> bool {
        self.pixel_format.has_four_cc() && self.pixel_format.four_cc == FourCC::DX10
    }

    /// Classify the stored pixel format.
    ///
    /// `dx10` must be the extension header when [`DdsHeader::is_dx10`] is true.
    pub fn pixel_format_tag(&self, dx10: Option<&DdsHeaderDxt10>) -> PixelFormatTag {
        match dx10 {
            Some(dx10) => dx10.pixel_format_tag(),
            None => self.pixel_format.pixel_format_tag(),
        }
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Texture has alpha data.
    pub const DDPF_ALPHAPIXELS: u32 = 0x1;
    /// `four_cc` holds a valid code.
    pub const DDPF_FOURCC: u32 = 0x4;
    /// Uncompressed RGB data described by the bit masks.
    pub const DDPF_RGB: u32 = 0x40;

    pub fn has_four_cc(&self) -> bool {
        self.flags & Self::DDPF_FOURCC != 0
    }

    /// Classify a legacy (non-DX10) pixel format.
    pub fn pixel_format_tag(&self) -> PixelFormatTag {
        if self.has_four_cc() {
            return match self.four_cc {
                FourCC::DXT1 => PixelFormatTag::Dxt1,
                FourCC::DXT4 | FourCC::DXT5 => PixelFormatTag::Dxt5,
                FourCC::D3DFMT_A8R8G8B8 => PixelFormatTag::Argb,
                FourCC::D3DFMT_G16R16 => PixelFormatTag::G16R16,
                _ => PixelFormatTag::Unspecified,
            };
        }

        if self.flags & Self::DDPF_RGB == 0 || self.rgb_bit_count != 32 {
            return PixelFormatTag::Unspecified;
        }

        let masks = (
            self.r_bit_mask,
            self.g_bit_mask,
            self.b_bit_mask,
            self.a_bit_mask,
        );
        match masks {
            (0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0xff00_0000) => PixelFormatTag::Argb,
            (0x0000_ffff, 0xffff_0000, 0, 0) => PixelFormatTag::G16R16,
            _ => PixelFormatTag::Unspecified,
        }
    }
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT4 compression (premultiplied DXT5).
    pub const DXT4: Self = Self(*b"DXT4");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// DX10 extended header.
    pub const DX10: Self = Self(*b"DX10");
    /// Numeric `D3DFMT_A8R8G8B8` stored in the code field.
    pub const D3DFMT_A8R8G8B8: Self = Self(21u32.to_le_bytes());
    /// Numeric `D3DFMT_G16R16` stored in the code field.
    pub const D3DFMT_G16R16: Self = Self(34u32.to_le_bytes());
}

/// DX10 extended header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeaderDxt10 {
    /// DXGI format.
    pub dxgi_format: u32,
    /// Resource dimension.
    pub resource_dimension: u32,
    /// Misc flags.
    pub misc_flag: u32,
    /// Array size.
    pub array_size: u32,
    /// Misc flags 2.
    pub misc_flags2: u32,
}

impl DdsHeaderDxt10 {
    pub const R8G8B8A8_UNORM: u32 = 28;
    pub const R8G8B8A8_UNORM_SRGB: u32 = 29;
    pub const R16G16_UNORM: u32 = 35;
    pub const BC1_UNORM: u32 = 71;
    pub const BC1_UNORM_SRGB: u32 = 72;
    pub const BC3_UNORM: u32 = 77;
    pub const BC3_UNORM_SRGB: u32 = 78;
    pub const B8G8R8A8_UNORM: u32 = 87;
    pub const B8G8R8A8_UNORM_SRGB: u32 = 91;

    /// Classify the DXGI format.
    pub fn pixel_format_tag(&self) -> PixelFormatTag {
        match self.dxgi_format {
            Self::BC1_UNORM | Self::BC1_UNORM_SRGB => PixelFormatTag::Dxt1,
            Self::BC3_UNORM | Self::BC3_UNORM_SRGB => PixelFormatTag::Dxt5,
            Self::B8G8R8A8_UNORM
            | Self::B8G8R8A8_UNORM_SRGB
            | Self::R8G8B8A8_UNORM
            | Self::R8G8B8A8_UNORM_SRGB => PixelFormatTag::Argb,
            Self::R16G16_UNORM => PixelFormatTag::G16R16,
            _ => PixelFormatTag::Unspecified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel_format(flags: u32, four_cc: FourCC, bits: u32, masks: [u32; 4]) -> DdsPixelFormat {
        DdsPixelFormat {
            size: 32,
            flags,
            four_cc,
            rgb_bit_count: bits,
            r_bit_mask: masks[0],
            g_bit_mask: masks[1],
            b_bit_mask: masks[2],
            a_bit_mask: masks[3],
        }
    }

    #[test]
    fn test_header_layout() {
        assert_eq!(std::mem::size_of::<DdsHeader>(), DdsHeader::SIZE as usize);
        assert_eq!(std::mem::size_of::<DdsPixelFormat>(), 32);
        assert_eq!(std::mem::size_of::<DdsHeaderDxt10>(), 20);
    }

    #[test]
    fn test_four_cc_formats() {
        let fourcc = DdsPixelFormat::DDPF_FOURCC;
        assert_eq!(
            pixel_format(fourcc, FourCC::DXT1, 0, [0; 4]).pixel_format_tag(),
            PixelFormatTag::Dxt1
        );
        assert_eq!(
            pixel_format(fourcc, FourCC::DXT5, 0, [0; 4]).pixel_format_tag(),
            PixelFormatTag::Dxt5
        );
        assert_eq!(
            pixel_format(fourcc, FourCC::DXT3, 0, [0; 4]).pixel_format_tag(),
            PixelFormatTag::Unspecified
        );
        assert_eq!(
            pixel_format(fourcc, FourCC::D3DFMT_G16R16, 0, [0; 4]).pixel_format_tag(),
            PixelFormatTag::G16R16
        );
    }

    #[test]
    fn test_four_cc_ignored_without_flag() {
        assert_eq!(
            pixel_format(0, FourCC::DXT1, 0, [0; 4]).pixel_format_tag(),
            PixelFormatTag::Unspecified
        );
    }

    #[test]
    fn test_rgb_masks() {
        let rgba = DdsPixelFormat::DDPF_RGB | DdsPixelFormat::DDPF_ALPHAPIXELS;
        let argb = pixel_format(
            rgba,
            FourCC([0; 4]),
            32,
            [0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0xff00_0000],
        );
        assert_eq!(argb.pixel_format_tag(), PixelFormatTag::Argb);

        let g16r16 = pixel_format(
            DdsPixelFormat::DDPF_RGB,
            FourCC([0; 4]),
            32,
            [0x0000_ffff, 0xffff_0000, 0, 0],
        );
        assert_eq!(g16r16.pixel_format_tag(), PixelFormatTag::G16R16);

        let rgb565 = pixel_format(
            DdsPixelFormat::DDPF_RGB,
            FourCC([0; 4]),
            16,
            [0xf800, 0x07e0, 0x001f, 0],
        );
        assert_eq!(rgb565.pixel_format_tag(), PixelFormatTag::Unspecified);
    }

    #[test]
    fn test_dxgi_formats() {
        let dx10 = |dxgi_format| DdsHeaderDxt10 {
            dxgi_format,
            resource_dimension: 3,
            misc_flag: 0,
            array_size: 1,
            misc_flags2: 0,
        };
        assert_eq!(dx10(71).pixel_format_tag(), PixelFormatTag::Dxt1);
        assert_eq!(dx10(78).pixel_format_tag(), PixelFormatTag::Dxt5);
        assert_eq!(dx10(87).pixel_format_tag(), PixelFormatTag::Argb);
        assert_eq!(dx10(35).pixel_format_tag(), PixelFormatTag::G16R16);
        assert_eq!(dx10(98).pixel_format_tag(), PixelFormatTag::Unspecified);
    }
}
