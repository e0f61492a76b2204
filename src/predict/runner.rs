use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::imaging;
use crate::walk::{image_files, relative_path, FileFilter};

use super::{Prediction, Predictor};

/// `<relative path> --> <label> (<score0> / <score1>)`, scores to 2 decimals.
pub fn format_line(relative: &str, prediction: &Prediction) -> String {
    format!(
        "{} --> {} ({:.2} / {:.2})",
        relative, prediction.label, prediction.scores[0], prediction.scores[1]
    )
}

/// Classifies every `.jpg` under `dir` and writes one line per image to `out`.
///
/// Returns the number of images classified. The first decode or inference
/// failure aborts the run.
pub fn run_directory<P, W>(predictor: &P, dir: &Path, mut out: W) -> Result<usize>
where
    P: Predictor + ?Sized,
    W: Write,
{
    let files = image_files(dir, FileFilter::Extension("jpg"))?;
    for file in &files {
        let image = imaging::open(file)?;
        let prediction = predictor.predict(&image)?;
        debug!(file = %file.display(), ?prediction, "classified");
        writeln!(out, "{}", format_line(&relative_path(dir, file), &prediction))?;
    }
    out.flush()?;
    Ok(files.len())
}
