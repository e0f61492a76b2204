//! `classify` CLI - run a trained binary image classifier over a test set.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dataset_prep::predict::run_directory;
use dataset_prep::NetworkClassifier;

/// Print a prediction for every .jpg under a directory.
///
/// Each line reads `<relative path> --> <label> (<score0> / <score1>)`.
#[derive(Parser, Debug)]
#[command(name = "classify")]
#[command(version, about, long_about = None)]
struct Args {
    /// Trained model (JSON network with image input metadata).
    #[arg(value_name = "MODEL")]
    model: PathBuf,

    /// Directory of test images, searched recursively.
    #[arg(value_name = "TESTSET_DIRECTORY")]
    testset: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("dataset_prep={log_level},classify={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let classifier = NetworkClassifier::load(&args.model)
        .with_context(|| format!("Failed to load model {}", args.model.display()))?;
    tracing::debug!(labels = ?classifier.labels(), "model loaded");

    let count = run_directory(&classifier, &args.testset, io::stdout().lock())
        .with_context(|| format!("Failed to classify {}", args.testset.display()))?;
    tracing::info!(count, "classified images");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_both_arguments() {
        assert!(Args::try_parse_from(["classify", "model.json"]).is_err());
        let args = Args::try_parse_from(["classify", "model.json", "tests"]).unwrap();
        assert_eq!(args.model, PathBuf::from("model.json"));
        assert_eq!(args.testset, PathBuf::from("tests"));
    }
}
