//! In-place renaming of image files to random unique names.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::debug;

use crate::error::Result;
use crate::walk::{image_files, FileFilter};

/// A file that was moved by [`randomize_names`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// 32 lowercase hex characters.
fn random_stem<R: Rng>(rng: &mut R) -> String {
    format!("{:032x}", rng.gen::<u128>())
}

/// Renames every image under `root` to a random name, keeping its directory
/// and extension.
///
/// A candidate that was already handed out in this run, or that exists on
/// disk, is discarded and a new one drawn.
pub fn randomize_names(root: &Path) -> Result<Vec<Renamed>> {
    randomize_names_with(root, &mut rand::thread_rng())
}

pub fn randomize_names_with<R: Rng>(root: &Path, rng: &mut R) -> Result<Vec<Renamed>> {
    let files = image_files(root, FileFilter::AnyImage)?;
    let mut taken: HashSet<PathBuf> = HashSet::with_capacity(files.len());
    let mut renamed = Vec::with_capacity(files.len());

    for from in files {
        let dir = from.parent().unwrap_or(root);
        let ext = from
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        let to = loop {
            let mut name = random_stem(rng);
            if !ext.is_empty() {
                name.push('.');
                name.push_str(&ext);
            }
            let candidate = dir.join(name);
            if !taken.contains(&candidate) && !candidate.exists() {
                break candidate;
            }
            debug!(candidate = %candidate.display(), "name collision, retrying");
        };

        fs::rename(&from, &to)?;
        debug!(from = %from.display(), to = %to.display(), "renamed");
        taken.insert(to.clone());
        renamed.push(Renamed { from, to });
    }

    Ok(renamed)
}
