//! Sequential batch conversion.
//!
//! Files are enumerated once, then converted one at a time. A failure only
//! affects its own file; the batch moves on to the next one.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use texconv_dds::TextureCodec;
use texconv_tag::{validate_delimiter, FormatManifest, PixelFormatTag, TagCodec, TaggedFilename};

use crate::options::{ConvertOptions, Direction};
use crate::scan::{collect_files, SourceFile};
use crate::{Error, Result};

/// Progress notifications emitted while a batch runs.
#[derive(Debug)]
pub enum ProgressEvent<'a> {
    /// A file is about to be converted. `index` starts at 1.
    Converting {
        file_name: &'a str,
        index: usize,
        total: usize,
    },
    /// The first target format failed and the file was written uncompressed.
    Fallback {
        file_name: &'a str,
        attempted: PixelFormatTag,
        used: PixelFormatTag,
        error: &'a Error,
    },
    /// A file was written.
    Converted {
        file_name: &'a str,
        output: &'a Path,
        format: PixelFormatTag,
    },
    /// A file was skipped because its conversion failed.
    Failed { file_name: &'a str, error: &'a Error },
}

/// A file that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Summary of a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Files selected for conversion.
    pub total: usize,
    /// Files written successfully, including fallbacks.
    pub converted: usize,
    /// Files written with the uncompressed fallback format.
    pub fallbacks: usize,
    /// Files that were skipped.
    pub failed: Vec<FailedFile>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

struct Outcome {
    output: PathBuf,
    format: PixelFormatTag,
    fallback: Option<(PixelFormatTag, Error)>,
}

/// Converts every matching file of an input directory into an output directory.
pub struct BatchConverter<C> {
    codec: C,
    options: ConvertOptions,
    tags: TagCodec,
}

impl<C: TextureCodec> BatchConverter<C> {
    pub fn new(codec: C, options: ConvertOptions) -> Self {
        let tags = TagCodec::new(options.delimiter);
        Self {
            codec,
            options,
            tags,
        }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert all files of `input` into `output`, reporting each step to `progress`.
    ///
    /// The output directory is created if needed; existing files in it are
    /// left alone unless a conversion writes to the same name. Two input
    /// files never write the same output within one batch: the second one
    /// fails with [`Error::OutputCollision`].
    pub fn run<F>(&self, input: &Path, output: &Path, mut progress: F) -> Result<BatchReport>
    where
        F: FnMut(ProgressEvent<'_>),
    {
        validate_delimiter(self.options.delimiter)?;
        fs::create_dir_all(output).map_err(|source| Error::CreateOutput {
            dir: output.to_path_buf(),
            source,
        })?;

        let files = collect_files(
            input,
            self.options.input_extension(),
            self.options.recursive,
        )?;
        log::debug!(
            "{} .{} files in {}",
            files.len(),
            self.options.input_extension(),
            input.display()
        );

        let mut manifest = match (self.options.sidecar, self.options.direction) {
            (false, _) => None,
            (true, Direction::Forward) => Some(FormatManifest::load(output)?),
            (true, Direction::Reverse) => Some(FormatManifest::load(input)?),
        };

        let mut report = BatchReport {
            total: files.len(),
            ..Default::default()
        };
        let mut written = HashSet::new();

        for (position, file) in files.iter().enumerate() {
            let file_name = file.display_name();
            progress(ProgressEvent::Converting {
                file_name: &file_name,
                index: position + 1,
                total: files.len(),
            });

            let result = match self.options.direction {
                Direction::Forward => {
                    self.convert_forward(file, output, manifest.as_mut(), &written)
                }
                Direction::Reverse => {
                    self.convert_reverse(file, output, manifest.as_ref(), &written)
                }
            };

            match result {
                Ok(outcome) => {
                    if let Some((attempted, error)) = &outcome.fallback {
                        report.fallbacks += 1;
                        progress(ProgressEvent::Fallback {
                            file_name: &file_name,
                            attempted: *attempted,
                            used: outcome.format,
                            error,
                        });
                    }
                    report.converted += 1;
                    progress(ProgressEvent::Converted {
                        file_name: &file_name,
                        output: &outcome.output,
                        format: outcome.format,
                    });
                    written.insert(outcome.output);
                }
                Err(error) => {
                    log::warn!("skipping {}: {}", file.path.display(), error);
                    progress(ProgressEvent::Failed {
                        file_name: &file_name,
                        error: &error,
                    });
                    report.failed.push(FailedFile {
                        path: file.path.clone(),
                        error: error.to_string(),
                    });
                }
            }
        }

        if let (Direction::Forward, Some(manifest)) = (self.options.direction, &manifest) {
            if !manifest.is_empty() {
                let path = manifest.save(output)?;
                log::debug!("wrote {} format entries to {}", manifest.len(), path.display());
            }
        }

        Ok(report)
    }

    /// DDS container to raster.
    fn convert_forward(
        &self,
        file: &SourceFile,
        output_root: &Path,
        manifest: Option<&mut FormatManifest>,
        written: &HashSet<PathBuf>,
    ) -> Result<Outcome> {
        let stem = file.stem()?;
        let texture = self.codec.decode_container(&file.path)?;
        let format = texture.reported_format();
        let extension = self.options.raster_format.extension();

        // A stem holding the delimiter would decode to another stem. It is
        // only written untagged when the manifest records it whole.
        let name = if self.options.tagging {
            match self.tags.encode(stem, format, extension) {
                Ok(name) => name,
                Err(texconv_tag::Error::DelimiterInStem { delimiter, .. })
                    if self.options.sidecar && format.is_known() =>
                {
                    log::warn!(
                        "{}: stem contains '{}', writing it without a format tag",
                        file.path.display(),
                        delimiter
                    );
                    TaggedFilename::plain(stem, extension)
                }
                Err(error) => return Err(error.into()),
            }
        } else {
            TaggedFilename::plain(stem, extension)
        };

        let out_dir = output_root.join(&file.relative_dir);
        let out_path = unclaimed_output(written, out_dir.join(name.file_name()))?;
        fs::create_dir_all(&out_dir)?;
        self.codec
            .save_raster(&texture.image, &out_path, self.options.raster_format)?;

        if let Some(manifest) = manifest {
            if format.is_known() {
                manifest.insert(manifest_key(&file.relative_dir, stem), format);
            }
        }

        Ok(Outcome {
            output: out_path,
            format,
            fallback: None,
        })
    }

    /// Raster to DDS container, retrying once with the uncompressed format.
    fn convert_reverse(
        &self,
        file: &SourceFile,
        output_root: &Path,
        manifest: Option<&FormatManifest>,
        written: &HashSet<PathBuf>,
    ) -> Result<Outcome> {
        let (stem, format) = self.resolve_format(file, manifest)?;
        let image = self.codec.load_raster(&file.path)?;

        let out_dir = output_root.join(&file.relative_dir);
        let out_path = unclaimed_output(
            written,
            out_dir.join(format!("{}.{}", stem, self.options.container_extension)),
        )?;
        fs::create_dir_all(&out_dir)?;

        let target = format.encode_target();
        match self.codec.save_container(&image, &out_path, target) {
            Ok(()) => Ok(Outcome {
                output: out_path,
                format: target,
                fallback: None,
            }),
            Err(error) if target != PixelFormatTag::UNCOMPRESSED_FALLBACK => {
                let fallback = PixelFormatTag::UNCOMPRESSED_FALLBACK;
                log::warn!(
                    "{}: {} failed ({}), retrying as {}",
                    file.path.display(),
                    target,
                    error,
                    fallback
                );
                self.codec.save_container(&image, &out_path, fallback)?;
                Ok(Outcome {
                    output: out_path,
                    format: fallback,
                    fallback: Some((target, error.into())),
                })
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Work out the output stem and source format of a raster file.
    ///
    /// A manifest entry for the whole file stem wins. Otherwise the filename
    /// tag is decoded, and a manifest entry for the decoded stem replaces a
    /// missing or unrecognized tag.
    fn resolve_format(
        &self,
        file: &SourceFile,
        manifest: Option<&FormatManifest>,
    ) -> Result<(String, PixelFormatTag)> {
        let whole_stem = file.stem()?;
        let lookup = |stem: &str| manifest.and_then(|m| m.get(&manifest_key(&file.relative_dir, stem)));

        if let Some(format) = lookup(whole_stem) {
            return Ok((whole_stem.to_string(), format));
        }
        if !self.options.tagging {
            return Ok((whole_stem.to_string(), PixelFormatTag::Unspecified));
        }

        let decoded = self.tags.decode(file.file_name()?)?;
        let format = if decoded.is_tag_recognized() {
            decoded.format()
        } else {
            lookup(decoded.stem()).unwrap_or(decoded.format())
        };

        Ok((decoded.stem().to_string(), format))
    }
}

/// `path`, unless an earlier file of the batch already wrote it.
fn unclaimed_output(written: &HashSet<PathBuf>, path: PathBuf) -> Result<PathBuf> {
    if written.contains(&path) {
        return Err(Error::OutputCollision(path));
    }
    Ok(path)
}

/// Manifest key of `stem` in `relative_dir`, using `/` separators.
fn manifest_key(relative_dir: &Path, stem: &str) -> String {
    let mut key = String::new();
    for component in relative_dir.components() {
        key.push_str(&component.as_os_str().to_string_lossy());
        key.push('/');
    }
    key.push_str(stem);
    key
}
