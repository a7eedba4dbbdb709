//! Reading texture properties from a DDS header.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use texconv_tag::PixelFormatTag;
use zerocopy::FromBytes;

use crate::header::{DdsHeader, DdsHeaderDxt10};
use crate::{Error, Result, DDS_MAGIC};

/// Bytes needed to probe any DDS file: magic, header, and DX10 extension.
pub const MAX_HEADER_LEN: usize =
    4 + std::mem::size_of::<DdsHeader>() + std::mem::size_of::<DdsHeaderDxt10>();

/// Texture properties read from a DDS header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsInfo {
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
    /// Number of mipmap levels (at least 1).
    pub mipmap_count: u32,
    /// DXGI format when the file has a DX10 header.
    pub dxgi_format: Option<u32>,
    /// Classified source pixel format.
    pub format: PixelFormatTag,
}

/// Parse the header at the start of `data`.
pub fn probe_dds(data: &[u8]) -> Result<DdsInfo> {
    if data.len() < 4 {
        return Err(Error::InvalidHeader("file too small".into()));
    }

    let magic: [u8; 4] = [data[0], data[1], data[2], data[3]];
    if &magic != DDS_MAGIC {
        return Err(Error::InvalidMagic(magic));
    }

    let (header, rest) = DdsHeader::read_from_prefix(&data[4..])
        .map_err(|_| Error::InvalidHeader("truncated header".into()))?;

    let size = header.size;
    if size != DdsHeader::SIZE {
        return Err(Error::InvalidHeader(format!(
            "header size {} (expected {})",
            size,
            DdsHeader::SIZE
        )));
    }

    let dx10 = if header.is_dx10() {
        let (dx10, _) = DdsHeaderDxt10::read_from_prefix(rest)
            .map_err(|_| Error::InvalidHeader("truncated DX10 header".into()))?;
        Some(dx10)
    } else {
        None
    };

    Ok(DdsInfo {
        width: header.width,
        height: header.height,
        mipmap_count: header.mipmap_count.max(1),
        dxgi_format: dx10.map(|dx10| dx10.dxgi_format),
        format: header.pixel_format_tag(dx10.as_ref()),
    })
}

/// Read only the header of the DDS file at `path` and parse it.
pub fn probe_dds_file(path: impl AsRef<Path>) -> Result<DdsInfo> {
    let mut data = Vec::with_capacity(MAX_HEADER_LEN);
    File::open(path)?
        .take(MAX_HEADER_LEN as u64)
        .read_to_end(&mut data)?;
    probe_dds(&data)
}

#[cfg(test)]
mod tests {
    use zerocopy::IntoBytes;

    use super::*;
    use crate::header::{DdsPixelFormat, FourCC};

    fn header(four_cc: FourCC) -> DdsHeader {
        DdsHeader {
            size: DdsHeader::SIZE,
            flags: 0x1007,
            height: 64,
            width: 128,
            pitch_or_linear_size: 0,
            depth: 0,
            mipmap_count: 0,
            reserved1: [0; 11],
            pixel_format: DdsPixelFormat {
                size: 32,
                flags: DdsPixelFormat::DDPF_FOURCC,
                four_cc,
                rgb_bit_count: 0,
                r_bit_mask: 0,
                g_bit_mask: 0,
                b_bit_mask: 0,
                a_bit_mask: 0,
            },
            caps: 0x1000,
            caps2: 0,
            caps3: 0,
            caps4: 0,
            reserved2: 0,
        }
    }

    fn file_bytes(header: &DdsHeader, dx10: Option<&DdsHeaderDxt10>) -> Vec<u8> {
        let mut data = DDS_MAGIC.to_vec();
        data.extend_from_slice(header.as_bytes());
        if let Some(dx10) = dx10 {
            data.extend_from_slice(dx10.as_bytes());
        }
        data
    }

    #[test]
    fn test_probe_legacy() {
        let info = probe_dds(&file_bytes(&header(FourCC::DXT5), None)).unwrap();
        assert_eq!(info.width, 128);
        assert_eq!(info.height, 64);
        assert_eq!(info.mipmap_count, 1);
        assert_eq!(info.dxgi_format, None);
        assert_eq!(info.format, PixelFormatTag::Dxt5);
    }

    #[test]
    fn test_probe_dx10() {
        let mut dds = header(FourCC::DX10);
        dds.mipmap_count = 8;
        let dx10 = DdsHeaderDxt10 {
            dxgi_format: DdsHeaderDxt10::BC1_UNORM,
            resource_dimension: 3,
            misc_flag: 0,
            array_size: 1,
            misc_flags2: 0,
        };
        let info = probe_dds(&file_bytes(&dds, Some(&dx10))).unwrap();
        assert_eq!(info.mipmap_count, 8);
        assert_eq!(info.dxgi_format, Some(71));
        assert_eq!(info.format, PixelFormatTag::Dxt1);
    }

    #[test]
    fn test_probe_truncated_dx10() {
        let data = file_bytes(&header(FourCC::DX10), None);
        assert!(matches!(probe_dds(&data), Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_probe_bad_magic() {
        let mut data = file_bytes(&header(FourCC::DXT1), None);
        data[..4].copy_from_slice(b"PNG ");
        assert!(matches!(probe_dds(&data), Err(Error::InvalidMagic(m)) if &m == b"PNG "));
    }

    #[test]
    fn test_probe_bad_size() {
        let mut dds = header(FourCC::DXT1);
        dds.size = 100;
        assert!(matches!(
            probe_dds(&file_bytes(&dds, None)),
            Err(Error::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_probe_too_small() {
        assert!(probe_dds(b"DD").is_err());
        assert!(probe_dds(b"DDS \x7c\x00").is_err());
    }

    #[test]
    fn test_probe_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tex.dds");
        let mut data = file_bytes(&header(FourCC::DXT1), None);
        data.extend_from_slice(&[0u8; 512]);
        std::fs::write(&path, data).unwrap();

        let info = probe_dds_file(&path).unwrap();
        assert_eq!(info.format, PixelFormatTag::Dxt1);
    }
}
