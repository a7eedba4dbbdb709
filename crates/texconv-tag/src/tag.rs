//! Pixel format tags embedded in raster filenames.
//!
//! A tagged filename has the shape `{stem}{delimiter}{tag}.{ext}`, for
//! example `tex01-DDS_DXT1.png`. Raster formats have no field for the
//! source pixel format, so the name carries it across the round trip.

use std::fmt;

use crate::{Error, PixelFormatTag, Result};

/// Delimiter separating the stem from the tag.
pub const DEFAULT_DELIMITER: char = '-';

/// Encodes and decodes format tags in filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagCodec {
    delimiter: char,
}

/// Check that `delimiter` can separate a stem from a tag.
///
/// Path separators, `.` and control characters are rejected, as is any
/// character that appears in a known tag name.
pub fn validate_delimiter(delimiter: char) -> Result<char> {
    let reserved = delimiter == '.'
        || delimiter == '/'
        || delimiter == '\\'
        || std::path::is_separator(delimiter)
        || delimiter.is_control()
        || PixelFormatTag::KNOWN
            .iter()
            .filter_map(|format| format.name())
            .any(|name| name.contains(delimiter));
    if reserved {
        return Err(Error::InvalidDelimiter(delimiter));
    }
    Ok(delimiter)
}

impl Default for TagCodec {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl TagCodec {
    /// Create a codec using `delimiter` between stem and tag.
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Like [`TagCodec::new`], but rejects delimiters refused by [`validate_delimiter`].
    pub fn try_new(delimiter: char) -> Result<Self> {
        validate_delimiter(delimiter).map(Self::new)
    }

    /// The reserved delimiter character.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Build `{stem}{delimiter}{tag}.{extension}`.
    ///
    /// [`PixelFormatTag::Unspecified`] produces an untagged `{stem}.{extension}`.
    /// Stems that are empty or contain the delimiter are rejected, since
    /// they would not decode back to the same stem.
    pub fn encode(
        &self,
        stem: &str,
        format: PixelFormatTag,
        extension: &str,
    ) -> Result<TaggedFilename> {
        if stem.is_empty() {
            return Err(Error::EmptyStem(stem.to_string()));
        }
        if stem.contains(self.delimiter) {
            return Err(Error::DelimiterInStem {
                stem: stem.to_string(),
                delimiter: self.delimiter,
            });
        }

        Ok(TaggedFilename {
            stem: stem.to_string(),
            tag: format.name().map(str::to_string),
            format,
            extension: extension.to_string(),
            delimiter: self.delimiter,
        })
    }

    /// Recover the stem and pixel format from a filename.
    ///
    /// - no delimiter: the whole name is the stem, format is `Unspecified`
    /// - one delimiter: the tag is matched against the known names; an
    ///   unrecognized tag yields [`PixelFormatTag::DEFAULT_FALLBACK`]
    /// - more delimiters: [`Error::AmbiguousMetadata`]
    pub fn decode(&self, filename: &str) -> Result<TaggedFilename> {
        let (base, extension) = match filename.rsplit_once('.') {
            Some((base, extension)) if !base.is_empty() => (base, extension),
            _ => (filename, ""),
        };

        let parts: Vec<&str> = base.split(self.delimiter).collect();
        let (stem, tag) = match parts.as_slice() {
            [stem] => (*stem, None),
            [stem, tag] => {
                // Drop a leftover extension such as the `.dds` in `a-DDS_DXT1.dds.png`.
                let tag = tag.split_once('.').map_or(*tag, |(tag, _)| tag);
                (*stem, Some(tag))
            }
            _ => {
                return Err(Error::AmbiguousMetadata {
                    filename: filename.to_string(),
                    delimiter: self.delimiter,
                    delimiters: parts.len() - 1,
                })
            }
        };

        if stem.is_empty() {
            return Err(Error::EmptyStem(filename.to_string()));
        }

        let format = match tag {
            None => PixelFormatTag::Unspecified,
            Some(tag) => {
                PixelFormatTag::from_name(tag).unwrap_or(PixelFormatTag::DEFAULT_FALLBACK)
            }
        };

        Ok(TaggedFilename {
            stem: stem.to_string(),
            tag: tag.map(str::to_string),
            format,
            extension: extension.to_string(),
            delimiter: self.delimiter,
        })
    }
}

/// A filename split into stem, optional format tag, and extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedFilename {
    stem: String,
    tag: Option<String>,
    format: PixelFormatTag,
    extension: String,
    delimiter: char,
}

impl TaggedFilename {
    /// An untagged filename, `{stem}.{extension}`.
    ///
    /// Unlike [`TagCodec::encode`] the stem is not validated.
    pub fn plain(stem: &str, extension: &str) -> Self {
        Self {
            stem: stem.to_string(),
            tag: None,
            format: PixelFormatTag::Unspecified,
            extension: extension.to_string(),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Original identifying name.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Raw tag text, if the name carried one.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Pixel format recovered from (or written into) the name.
    pub fn format(&self) -> PixelFormatTag {
        self.format
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Whether the tag text named a known format.
    pub fn is_tag_recognized(&self) -> bool {
        self.tag
            .as_deref()
            .is_some_and(|tag| PixelFormatTag::from_name(tag).is_some())
    }

    /// Render the full file name.
    pub fn file_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TaggedFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem)?;
        if let Some(tag) = &self.tag {
            write!(f, "{}{}", self.delimiter, tag)?;
        }
        if !self.extension.is_empty() {
            write!(f, ".{}", self.extension)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_tagged() {
        let codec = TagCodec::default();
        let name = codec.encode("tex01", PixelFormatTag::Dxt1, "png").unwrap();
        assert_eq!(name.file_name(), "tex01-DDS_DXT1.png");
    }

    #[test]
    fn test_validate_delimiter() {
        for ok in ['-', '~', '+', '@'] {
            assert_eq!(validate_delimiter(ok).unwrap(), ok);
        }
        for bad in ['/', '\\', '.', '\n', '_', 'D', '1'] {
            assert!(matches!(
                validate_delimiter(bad),
                Err(Error::InvalidDelimiter(c)) if c == bad
            ));
        }
        assert!(TagCodec::try_new('.').is_err());
        assert_eq!(TagCodec::try_new('~').unwrap().delimiter(), '~');
    }

    #[test]
    fn test_encode_unspecified_is_untagged() {
        let codec = TagCodec::default();
        let name = codec.encode("tex01", PixelFormatTag::Unspecified, "png").unwrap();
        assert_eq!(name.file_name(), "tex01.png");
    }

    #[test]
    fn test_roundtrip_all_formats() {
        let codec = TagCodec::default();
        for stem in ["a", "tex01", "Some Texture_2", "x.y"] {
            for format in PixelFormatTag::KNOWN
                .into_iter()
                .chain([PixelFormatTag::Unspecified])
            {
                let encoded = codec.encode(stem, format, "png").unwrap();
                let decoded = codec.decode(&encoded.file_name()).unwrap();
                assert_eq!(decoded.stem(), stem);
                assert_eq!(decoded.format(), format);
            }
        }
    }

    #[test]
    fn test_roundtrip_custom_delimiter() {
        let codec = TagCodec::new('@');
        let encoded = codec.encode("road-sign", PixelFormatTag::G16R16, "jpg").unwrap();
        assert_eq!(encoded.file_name(), "road-sign@DDS_G16_R16.jpg");
        let decoded = codec.decode(&encoded.file_name()).unwrap();
        assert_eq!(decoded.stem(), "road-sign");
        assert_eq!(decoded.format(), PixelFormatTag::G16R16);
    }

    #[test]
    fn test_decode_without_delimiter() {
        let decoded = TagCodec::default().decode("tex02.png").unwrap();
        assert_eq!(decoded.stem(), "tex02");
        assert_eq!(decoded.tag(), None);
        assert_eq!(decoded.format(), PixelFormatTag::Unspecified);
        assert_eq!(decoded.extension(), "png");
    }

    #[test]
    fn test_decode_unrecognized_tag_falls_back() {
        let decoded = TagCodec::default().decode("tex03-DDS_BC7.png").unwrap();
        assert_eq!(decoded.stem(), "tex03");
        assert_eq!(decoded.tag(), Some("DDS_BC7"));
        assert_eq!(decoded.format(), PixelFormatTag::DEFAULT_FALLBACK);
        assert!(!decoded.is_tag_recognized());
    }

    #[test]
    fn test_decode_tag_is_case_sensitive() {
        let decoded = TagCodec::default().decode("tex03-dds_dxt5.png").unwrap();
        assert_eq!(decoded.format(), PixelFormatTag::DEFAULT_FALLBACK);
    }

    #[test]
    fn test_decode_strips_trailing_extension_fragment() {
        let decoded = TagCodec::default().decode("tex04-DDS_DXT5.dds.png").unwrap();
        assert_eq!(decoded.stem(), "tex04");
        assert_eq!(decoded.format(), PixelFormatTag::Dxt5);
        assert!(decoded.is_tag_recognized());
    }

    #[test]
    fn test_decode_ambiguous() {
        let err = TagCodec::default()
            .decode("tex-05-DDS_DXT1.png")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::AmbiguousMetadata { delimiters: 2, .. }
        ));
    }

    #[test]
    fn test_decode_empty_stem() {
        assert!(matches!(
            TagCodec::default().decode("-DDS_DXT1.png"),
            Err(Error::EmptyStem(_))
        ));
    }

    #[test]
    fn test_encode_rejects_delimiter_in_stem() {
        let err = TagCodec::default()
            .encode("tex-06", PixelFormatTag::Dxt1, "png")
            .unwrap_err();
        assert!(matches!(err, Error::DelimiterInStem { delimiter: '-', .. }));
    }

    #[test]
    fn test_encode_rejects_empty_stem() {
        assert!(TagCodec::default()
            .encode("", PixelFormatTag::Dxt1, "png")
            .is_err());
    }

    #[test]
    fn test_plain() {
        let name = TaggedFilename::plain("tex-06", "png");
        assert_eq!(name.file_name(), "tex-06.png");
        assert_eq!(name.format(), PixelFormatTag::Unspecified);
    }
}
