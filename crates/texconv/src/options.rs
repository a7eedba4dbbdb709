//! Batch conversion settings.

use texconv_dds::RasterFormat;
use texconv_tag::DEFAULT_DELIMITER;

/// Conversion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// DDS container to raster.
    #[default]
    Forward,
    /// Raster to DDS container.
    Reverse,
}

/// Settings for a [`BatchConverter`](crate::BatchConverter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Conversion direction.
    pub direction: Direction,
    /// Also process files in immediate subdirectories of the input.
    pub recursive: bool,
    /// Embed the source pixel format in raster filenames.
    pub tagging: bool,
    /// Keep a format manifest next to the raster files.
    pub sidecar: bool,
    /// Character between stem and tag.
    pub delimiter: char,
    /// Extension of container files, without the dot (`dds` or `texture`).
    pub container_extension: String,
    /// Raster format written by forward runs and read by reverse runs.
    pub raster_format: RasterFormat,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Forward,
            recursive: false,
            tagging: true,
            sidecar: false,
            delimiter: DEFAULT_DELIMITER,
            container_extension: "dds".to_string(),
            raster_format: RasterFormat::Png,
        }
    }
}

impl ConvertOptions {
    /// Extension of the files picked up from the input directory.
    pub fn input_extension(&self) -> &str {
        match self.direction {
            Direction::Forward => self.container_extension.as_str(),
            Direction::Reverse => self.raster_format.extension(),
        }
    }

    /// Extension of the files written to the output directory.
    pub fn output_extension(&self) -> &str {
        match self.direction {
            Direction::Forward => self.raster_format.extension(),
            Direction::Reverse => self.container_extension.as_str(),
        }
    }
}
