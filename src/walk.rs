//! Recursive enumeration of image files and label derivation.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Extensions treated as images when walking a tree.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "gif"];

/// Which files a walk should yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFilter {
    /// Any of [`IMAGE_EXTENSIONS`].
    AnyImage,
    /// Exactly one extension (case-insensitive, without the dot).
    Extension(&'static str),
}

impl FileFilter {
    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        match self {
            FileFilter::AnyImage => IMAGE_EXTENSIONS.contains(&ext.as_str()),
            FileFilter::Extension(wanted) => ext == *wanted,
        }
    }
}

/// Fails with [`Error::DirectoryNotFound`] unless `root` is an existing directory.
pub fn require_dir(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(Error::DirectoryNotFound { path: root.to_path_buf() })
    }
}

/// Absolute, symlink-free form of `root`.
///
/// Sibling trees and manifests are named after the root's last component, so
/// `.`, `imgs/.` and `imgs/..` must be resolved before any path is derived.
pub fn canonical_root(root: &Path) -> Result<PathBuf> {
    require_dir(root)?;
    Ok(std::fs::canonicalize(root)?)
}

/// Every file under `root` accepted by `filter`.
///
/// Entries are sorted by file name within each directory, so the order is
/// stable between runs.
pub fn image_files(root: &Path, filter: FileFilter) -> Result<Vec<PathBuf>> {
    require_dir(root)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && filter.matches(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// `file` relative to `root`, joined with `/`.
pub fn relative_path(root: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    join_normal(rel.components())
}

/// Label for `file`: its containing directory relative to `root`, with `/`
/// separators and no leading or trailing separator. Files directly under
/// `root` get an empty label.
pub fn label_for(root: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    let dir = rel.parent().unwrap_or_else(|| Path::new(""));
    join_normal(dir.components())
}

fn join_normal<'a>(components: impl Iterator<Item = Component<'a>>) -> String {
    components
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().replace('\\', "/")),
            _ => None,
        })
        .map(|s| s.trim_matches('/').to_owned())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Sibling of `root` whose name is `root`'s name followed by ` (<suffix>)`.
pub fn sibling_tree(root: &Path, suffix: &str) -> PathBuf {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    root.with_file_name(format!("{name} ({suffix})"))
}

/// Same relative location as `file` (under `from`) but under `to`.
pub fn mirror_path(from: &Path, to: &Path, file: &Path) -> PathBuf {
    match file.strip_prefix(from) {
        Ok(rel) => to.join(rel),
        Err(_) => to.join(file.file_name().unwrap_or_default()),
    }
}

/// Recreate every subdirectory of `from` under `to`, including empty ones.
pub fn mirror_dirs(from: &Path, to: &Path) -> Result<()> {
    require_dir(from)?;
    for entry in WalkDir::new(from) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(mirror_path(from, to, entry.path()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_walk_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("root");
        touch(&root.join("b/2.JPG"));
        touch(&root.join("b/1.png"));
        touch(&root.join("a/x.jpg"));
        touch(&root.join("a/notes.txt"));
        touch(&root.join("a/deep/y.bmp"));

        let all: Vec<String> = image_files(&root, FileFilter::AnyImage)
            .unwrap()
            .iter()
            .map(|p| relative_path(&root, p))
            .collect();
        assert_eq!(all, vec!["a/deep/y.bmp", "a/x.jpg", "b/1.png", "b/2.JPG"]);

        let jpgs = image_files(&root, FileFilter::Extension("jpg")).unwrap();
        assert_eq!(jpgs.len(), 2);
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            image_files(&missing, FileFilter::AnyImage),
            Err(Error::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_labels() {
        let root = Path::new("/data/root");
        assert_eq!(label_for(root, Path::new("/data/root/catA/x.jpg")), "catA");
        assert_eq!(label_for(root, Path::new("/data/root/a/b/x.jpg")), "a/b");
        assert_eq!(label_for(root, Path::new("/data/root/x.jpg")), "");
    }

    #[test]
    fn test_sibling_and_mirror() {
        let root = Path::new("/data/imgs");
        let low = sibling_tree(root, "Low Resolution");
        assert_eq!(low, Path::new("/data/imgs (Low Resolution)"));
        assert_eq!(
            mirror_path(root, &low, Path::new("/data/imgs/cat/1.jpg")),
            Path::new("/data/imgs (Low Resolution)/cat/1.jpg")
        );
    }

    #[test]
    fn test_canonical_root_resolves_dot_components() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("imgs");
        fs::create_dir_all(root.join("cat")).unwrap();
        let parent = fs::canonicalize(dir.path()).unwrap();

        assert_eq!(canonical_root(&root.join(".")).unwrap(), parent.join("imgs"));
        assert_eq!(canonical_root(&root.join("cat/..")).unwrap(), parent.join("imgs"));

        let low = sibling_tree(&canonical_root(&root.join(".")).unwrap(), "Low Resolution");
        assert_eq!(low, parent.join("imgs (Low Resolution)"));
        assert!(matches!(
            canonical_root(&dir.path().join("missing")),
            Err(Error::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_mirror_dirs_copies_empty_dirs() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("imgs");
        fs::create_dir_all(root.join("cat/kitten")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        let to = sibling_tree(&root, "Grayscale");

        mirror_dirs(&root, &to).unwrap();
        assert!(to.join("cat/kitten").is_dir());
        assert!(to.join("empty").is_dir());
    }
}
