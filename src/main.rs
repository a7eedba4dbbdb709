//! texconv CLI - batch converter between DDS textures and PNG/JPEG images.
//!
//! This is the main entry point for the texconv command-line application.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use texconv::prelude::*;

/// texconv - convert unbundled DDS textures to PNG/JPEG and back
#[derive(Parser)]
#[command(name = "texconv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the files to convert
    #[arg(env = "TEXCONV_INPUT")]
    input: PathBuf,

    /// Directory the converted files are written to
    #[arg(env = "TEXCONV_OUTPUT")]
    output: PathBuf,

    /// Conversion direction: `rev` converts raster images back to DDS
    #[arg(value_enum, default_value = "fwd")]
    mode: Mode,

    /// Also convert files in immediate subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Do not embed the source pixel format in raster file names
    #[arg(long)]
    no_tag: bool,

    /// Record source pixel formats in a texconv-formats.json manifest
    #[arg(long)]
    sidecar: bool,

    /// Character separating the file stem from the format tag
    #[arg(long, default_value_t = texconv::tag::DEFAULT_DELIMITER, value_parser = parse_delimiter)]
    delimiter: char,

    /// Extension of the DDS container files
    #[arg(long, value_enum, default_value = "dds")]
    container_ext: ContainerExt,

    /// Raster format to write (forward) or read (rev)
    #[arg(long, value_enum, default_value = "png")]
    raster: Raster,

    /// Block compression quality
    #[arg(long, value_enum, default_value = "normal")]
    quality: EncodeQuality,

    /// Do not generate mipmaps when writing DDS files
    #[arg(long)]
    no_mipmaps: bool,

    /// Show a progress bar instead of the per-file Converting: lines
    ///
    /// Fallbacks and failures are still printed above the bar.
    #[arg(long)]
    progress_bar: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// DDS to raster
    Fwd,
    /// Raster to DDS
    Rev,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ContainerExt {
    Dds,
    Texture,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Raster {
    Png,
    Jpg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EncodeQuality {
    Fast,
    Normal,
    Slow,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            direction: match self.mode {
                Mode::Fwd => Direction::Forward,
                Mode::Rev => Direction::Reverse,
            },
            recursive: self.recursive,
            tagging: !self.no_tag,
            sidecar: self.sidecar,
            delimiter: self.delimiter,
            container_extension: match self.container_ext {
                ContainerExt::Dds => "dds",
                ContainerExt::Texture => "texture",
            }
            .to_string(),
            raster_format: match self.raster {
                Raster::Png => RasterFormat::Png,
                Raster::Jpg => RasterFormat::Jpeg,
            },
        }
    }

    fn codec(&self) -> DdsCodec {
        let quality = match self.quality {
            EncodeQuality::Fast => Quality::Fast,
            EncodeQuality::Normal => Quality::Normal,
            EncodeQuality::Slow => Quality::Slow,
        };
        DdsCodec::new(quality, !self.no_mipmaps)
    }
}

fn parse_delimiter(value: &str) -> std::result::Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(delimiter), None) => {
            texconv::tag::validate_delimiter(delimiter).map_err(|e| e.to_string())
        }
        _ => Err(format!("expected a single character, got {:?}", value)),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stdout = io::stdout();
    execute(std::env::args_os(), &mut stdout.lock());
}

/// Parse `args` and run the conversion, writing all console output to `out`.
///
/// Usage and top-level errors are written to `out` as well; the exit status stays 0.
fn execute<I, T, W>(args: I, out: &mut W)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = writeln!(out, "{}", e.render());
            return;
        }
    };

    if let Err(e) = run(&cli, out) {
        let _ = writeln!(out, "{:#}", e);
    }
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let converter = BatchConverter::new(cli.codec(), cli.options());

    let start = Instant::now();
    let report = if cli.progress_bar {
        run_with_progress_bar(&converter, cli)?
    } else {
        let mut write_error = None;
        let report = converter
            .run(&cli.input, &cli.output, |event| {
                if let Err(e) = print_event(&mut *out, event) {
                    write_error.get_or_insert(e);
                }
            })
            .with_context(|| format!("Failed to convert {}", cli.input.display()))?;
        if let Some(e) = write_error {
            return Err(e).context("Failed to write progress");
        }
        report
    };

    writeln!(
        out,
        "Converted {} of {} files in {:?} ({} fallbacks, {} errors)",
        report.converted,
        report.total,
        start.elapsed(),
        report.fallbacks,
        report.failed.len()
    )?;
    writeln!(out, "Done.")?;

    Ok(())
}

fn print_event<W: Write>(out: &mut W, event: ProgressEvent<'_>) -> io::Result<()> {
    match event {
        ProgressEvent::Converting {
            file_name,
            index,
            total,
        } => writeln!(out, "Converting: {} {}/{}", file_name, index, total),
        ProgressEvent::Fallback {
            file_name,
            used,
            error,
            ..
        } => writeln!(out, "Fallback: {} -> {} ({})", file_name, used, error),
        ProgressEvent::Converted { output, .. } => {
            log::debug!("wrote {}", output.display());
            Ok(())
        }
        ProgressEvent::Failed { file_name, error } => {
            writeln!(out, "Failed: {}: {}", file_name, error)
        }
    }
}

fn run_with_progress_bar(converter: &BatchConverter<DdsCodec>, cli: &Cli) -> Result<BatchReport> {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = converter
        .run(&cli.input, &cli.output, |event| match event {
            ProgressEvent::Converting {
                file_name, total, ..
            } => {
                pb.set_length(total as u64);
                pb.set_message(file_name.to_string());
            }
            ProgressEvent::Fallback {
                file_name, used, ..
            } => pb.println(format!("Fallback: {} -> {}", file_name, used)),
            ProgressEvent::Converted { .. } => pb.inc(1),
            ProgressEvent::Failed { file_name, error } => {
                pb.println(format!("Failed: {}: {}", file_name, error));
                pb.inc(1);
            }
        })
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;

    pb.finish_with_message("Done");
    Ok(report)
}
