//! Tab-separated `Label\tImageSource` manifests.
//!
//! A manifest for tree `<parent>/<name>` is written to `<parent>/<name>.tsv`.
//! Each row holds the file's label (its subdirectory under the tree root)
//! and its path as `<name>/<relative path>`, always with `/` separators.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::walk::{canonical_root, image_files, label_for, relative_path, FileFilter};

pub const HEADER: &str = "Label\tImageSource";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub label: String,
    pub path: String,
}

/// Where the manifest for `root` lives. `root` must end in a real directory
/// name; [`write`] resolves it first.
pub fn manifest_path(root: &Path) -> PathBuf {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    root.with_file_name(format!("{name}.tsv"))
}

/// One entry per image under `root`, in enumeration order.
pub fn build(root: &Path) -> Result<Vec<ManifestEntry>> {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(image_files(root, FileFilter::AnyImage)?
        .iter()
        .map(|file| {
            let rel = relative_path(root, file);
            ManifestEntry {
                label: label_for(root, file),
                path: if name.is_empty() { rel } else { format!("{name}/{rel}") },
            }
        })
        .collect())
}

/// Serialize entries with the header row.
pub fn write_entries<W: Write>(mut out: W, entries: &[ManifestEntry]) -> std::io::Result<()> {
    writeln!(out, "{HEADER}")?;
    for entry in entries {
        writeln!(out, "{}\t{}", entry.label, entry.path)?;
    }
    out.flush()
}

/// Build and write the manifest for `root`; returns the manifest path and row count.
pub fn write(root: &Path) -> Result<(PathBuf, usize)> {
    let root = canonical_root(root)?;
    let entries = build(&root)?;
    let path = manifest_path(&root);
    write_entries(BufWriter::new(File::create(&path)?), &entries)?;
    info!(manifest = %path.display(), rows = entries.len(), "wrote manifest");
    Ok((path, entries.len()))
}

/// Parse a manifest written by [`write`].
pub fn read(path: &Path) -> Result<Vec<ManifestEntry>> {
    let reader = BufReader::new(File::open(path)?);
    let mut lines = reader.lines();

    let malformed = |line: usize, reason: &str| Error::Manifest {
        path: path.to_path_buf(),
        line,
        reason: reason.to_owned(),
    };

    let header = lines.next().transpose()?;
    if header.as_deref().map(|h| h.trim_end_matches('\r')) != Some(HEADER) {
        return Err(malformed(1, "missing Label\\tImageSource header"));
    }

    let mut entries = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let (label, file) = line
            .split_once('\t')
            .ok_or_else(|| malformed(idx + 2, "expected two tab-separated columns"))?;
        entries.push(ManifestEntry {
            label: label.to_owned(),
            path: file.to_owned(),
        });
    }
    Ok(entries)
}
