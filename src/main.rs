//! `preprocess` CLI - rename, convert, downscale and grayscale an image
//! dataset, then write its manifests.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dataset_prep::imaging::{DEFAULT_JPEG_QUALITY, LOW_RES_HEIGHT, LOW_RES_WIDTH};
use dataset_prep::{Pipeline, PreprocessConfig};

/// Flags that are also accepted with a single leading dash.
const SINGLE_DASH_FLAGS: [&str; 5] = ["-print-files", "-rename", "-bmp-to-jpg", "-lowres", "-gray"];

/// Preprocess a directory tree of labelled images.
///
/// Label of each image is its subdirectory. Low-resolution and grayscale
/// copies are written to sibling trees "<DIRECTORY> (Low Resolution)" and
/// "<DIRECTORY> (Grayscale)"; a .tsv manifest is written next to each tree.
#[derive(Parser, Debug)]
#[command(name = "preprocess")]
#[command(version, about, long_about = None)]
struct Args {
    /// Root directory of the dataset.
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// Print every image path.
    #[arg(long)]
    print_files: bool,

    /// Rename every image to a random unique name (extension kept).
    #[arg(long)]
    rename: bool,

    /// Convert .bmp files to .jpg, removing the originals.
    #[arg(long)]
    bmp_to_jpg: bool,

    /// Build the low-resolution tree.
    #[arg(long)]
    lowres: bool,

    /// Build the 8-bit grayscale tree (from the low-resolution tree when present).
    #[arg(long)]
    gray: bool,

    /// Low-resolution width in pixels.
    #[arg(long, default_value_t = LOW_RES_WIDTH, value_name = "INT")]
    width: u32,

    /// Low-resolution height in pixels.
    #[arg(long, default_value_t = LOW_RES_HEIGHT, value_name = "INT")]
    height: u32,

    /// JPEG quality (1-100).
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY, value_name = "INT")]
    quality: u8,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> PreprocessConfig {
        PreprocessConfig {
            print_files: self.print_files,
            rename: self.rename,
            bmp_to_jpg: self.bmp_to_jpg,
            lowres: self.lowres,
            gray: self.gray,
            width: self.width,
            height: self.height,
            quality: self.quality,
        }
    }
}

/// Rewrites `-lowres` style flags to `--lowres` so clap doesn't read them as
/// bundles of short options.
fn normalize_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(s) if SINGLE_DASH_FLAGS.contains(&s) => OsString::from(format!("-{s}")),
            _ => arg,
        })
        .collect()
}

fn main() -> ExitCode {
    let args = Args::parse_from(normalize_flags(std::env::args_os()));

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("dataset_prep={log_level},preprocess={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let pipeline = Pipeline::new(args.config()).context("Invalid options")?;
    let summary = pipeline
        .run(&args.directory)
        .with_context(|| format!("Failed to preprocess {}", args.directory.display()))?;

    tracing::info!(
        files = summary.files_found,
        renamed = summary.renamed,
        converted = summary.converted,
        resized = summary.resized,
        grayscaled = summary.grayscaled,
        manifests = summary.manifests.len(),
        "done"
    );

    Ok(())
}
