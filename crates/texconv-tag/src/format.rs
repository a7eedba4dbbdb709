//! Source pixel formats recognized in DDS textures.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Pixel format of a source DDS texture.
///
/// The textual names are the ones written into tagged filenames and
/// format manifests, and are matched case-sensitively.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum PixelFormatTag {
    /// 8 bits per channel ARGB, uncompressed.
    #[strum(serialize = "DDS_ARGB")]
    #[serde(rename = "DDS_ARGB")]
    Argb,
    /// 16 bits per channel, red and green only.
    #[strum(serialize = "DDS_G16_R16")]
    #[serde(rename = "DDS_G16_R16")]
    G16R16,
    /// BC1 block compression.
    #[strum(serialize = "DDS_DXT1")]
    #[serde(rename = "DDS_DXT1")]
    Dxt1,
    /// BC3 block compression.
    #[strum(serialize = "DDS_DXT5")]
    #[serde(rename = "DDS_DXT5")]
    Dxt5,
    /// Format unknown or not recorded.
    #[default]
    #[strum(serialize = "Unspecified")]
    #[serde(rename = "Unspecified")]
    Unspecified,
}

impl PixelFormatTag {
    /// Every format that has a tag name.
    pub const KNOWN: [Self; 4] = [Self::Argb, Self::G16R16, Self::Dxt1, Self::Dxt5];

    /// Format assumed when a tag is present but not recognized.
    pub const DEFAULT_FALLBACK: Self = Self::Dxt1;

    /// Uncompressed format every image can be encoded to.
    pub const UNCOMPRESSED_FALLBACK: Self = Self::Argb;

    /// Look up a known format by its tag name.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse::<Self>().ok().filter(|format| format.is_known())
    }

    /// Tag name, or `None` for [`PixelFormatTag::Unspecified`].
    pub fn name(self) -> Option<&'static str> {
        self.is_known().then(|| self.into())
    }

    /// Whether this is a member of the closed set of named formats.
    pub fn is_known(self) -> bool {
        self != Self::Unspecified
    }

    /// Whether this format uses 4x4 block compression.
    pub fn is_block_compressed(self) -> bool {
        matches!(self, Self::Dxt1 | Self::Dxt5)
    }

    /// Format to attempt first when re-encoding a texture with this tag.
    pub fn encode_target(self) -> Self {
        match self {
            Self::Unspecified => Self::DEFAULT_FALLBACK,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_names() {
        assert_eq!(PixelFormatTag::Argb.name(), Some("DDS_ARGB"));
        assert_eq!(PixelFormatTag::G16R16.name(), Some("DDS_G16_R16"));
        assert_eq!(PixelFormatTag::Dxt1.name(), Some("DDS_DXT1"));
        assert_eq!(PixelFormatTag::Dxt5.name(), Some("DDS_DXT5"));
        assert_eq!(PixelFormatTag::Unspecified.name(), None);
    }

    #[test]
    fn test_from_name_is_case_sensitive() {
        assert_eq!(PixelFormatTag::from_name("DDS_DXT5"), Some(PixelFormatTag::Dxt5));
        assert_eq!(PixelFormatTag::from_name("dds_dxt5"), None);
        assert_eq!(PixelFormatTag::from_name("DXT5"), None);
    }

    #[test]
    fn test_unspecified_is_not_a_tag() {
        assert_eq!(PixelFormatTag::from_name("Unspecified"), None);
        assert_eq!(
            PixelFormatTag::iter().filter(|f| f.is_known()).collect::<Vec<_>>(),
            PixelFormatTag::KNOWN
        );
    }

    #[test]
    fn test_encode_target() {
        assert_eq!(PixelFormatTag::Unspecified.encode_target(), PixelFormatTag::Dxt1);
        assert_eq!(PixelFormatTag::Dxt5.encode_target(), PixelFormatTag::Dxt5);
        assert!(PixelFormatTag::DEFAULT_FALLBACK.is_block_compressed());
        assert!(!PixelFormatTag::UNCOMPRESSED_FALLBACK.is_block_compressed());
    }
}
