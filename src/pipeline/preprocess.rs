//! Sequential preprocessing of one image tree.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::imaging::{self, OutputFormat};
use crate::manifest;
use crate::rename::randomize_names;
use crate::walk::{canonical_root, image_files, mirror_dirs, mirror_path, sibling_tree, FileFilter};

use super::PreprocessConfig;

/// Name suffix of the low-resolution sibling tree.
pub const LOW_RES_SUFFIX: &str = "Low Resolution";

/// Name suffix of the grayscale sibling tree.
pub const GRAYSCALE_SUFFIX: &str = "Grayscale";

/// What a [`Pipeline::run`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_found: usize,
    pub renamed: usize,
    pub converted: usize,
    pub resized: usize,
    pub grayscaled: usize,
    /// Manifest files written, in the order source, low-res, grayscale.
    pub manifests: Vec<PathBuf>,
}

/// Runs the enabled stages over a directory tree.
///
/// Stages run in a fixed order: print, rename, BMP→JPEG, low-res, grayscale,
/// then manifests. The first error aborts the run.
pub struct Pipeline {
    config: PreprocessConfig,
}

impl Pipeline {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a zero target size or a JPEG
    /// quality outside 1-100.
    pub fn new(config: PreprocessConfig) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(Error::InvalidParameter {
                name: "size".into(),
                reason: format!("{}x{} must be non-zero", config.width, config.height),
            });
        }
        if !(1..=100).contains(&config.quality) {
            return Err(Error::InvalidParameter {
                name: "quality".into(),
                reason: format!("{} is not in 1-100", config.quality),
            });
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    pub fn run(&self, root: &Path) -> Result<RunSummary> {
        let root = canonical_root(root)?;
        let root = root.as_path();
        let mut summary = RunSummary::default();

        let files = image_files(root, FileFilter::AnyImage)?;
        summary.files_found = files.len();
        info!(root = %root.display(), files = files.len(), "scanning");

        if self.config.print_files {
            for file in &files {
                println!("{}", file.display());
            }
        }

        if self.config.rename {
            summary.renamed = randomize_names(root)?.len();
            info!(count = summary.renamed, "renamed files");
        }

        if self.config.bmp_to_jpg {
            summary.converted = self.convert_bmps(root)?;
            info!(count = summary.converted, "converted BMP to JPEG");
        }

        let low_res = sibling_tree(root, LOW_RES_SUFFIX);
        if self.config.lowres {
            summary.resized = self.transform_tree(root, &low_res, |img| {
                imaging::resize(img, self.config.width, self.config.height)
            })?;
            info!(
                count = summary.resized,
                width = self.config.width,
                height = self.config.height,
                tree = %low_res.display(),
                "built low-resolution tree"
            );
        }

        let gray = sibling_tree(root, GRAYSCALE_SUFFIX);
        if self.config.gray {
            let source = if low_res.is_dir() { low_res.as_path() } else { root };
            summary.grayscaled =
                self.transform_tree(source, &gray, |img| Ok(imaging::to_grayscale(img)))?;
            info!(count = summary.grayscaled, tree = %gray.display(), "built grayscale tree");
        }

        for tree in [root, low_res.as_path(), gray.as_path()] {
            if tree.is_dir() {
                let (path, _) = manifest::write(tree)?;
                summary.manifests.push(path);
            }
        }

        Ok(summary)
    }

    /// Re-encodes each `.bmp` as a sibling `.jpg`; the `.bmp` is removed only
    /// once the JPEG has been written.
    fn convert_bmps(&self, root: &Path) -> Result<usize> {
        let bmps = image_files(root, FileFilter::Extension("bmp"))?;
        for bmp in &bmps {
            let jpg = bmp.with_extension(OutputFormat::Jpeg.extension());
            if jpg.exists() {
                warn!(bmp = %bmp.display(), jpg = %jpg.display(), "overwriting existing JPEG");
            }
            let img = imaging::open(bmp)?;
            imaging::save(&img, &jpg, self.config.quality)?;
            fs::remove_file(bmp)?;
            debug!(from = %bmp.display(), to = %jpg.display(), "converted");
        }
        Ok(bmps.len())
    }

    /// Applies `op` to every image under `from` and writes the result to the
    /// same relative path under `to`. Fails before overwriting a file already
    /// written in this pass.
    fn transform_tree<F>(&self, from: &Path, to: &Path, op: F) -> Result<usize>
    where
        F: Fn(&image::DynamicImage) -> Result<image::DynamicImage>,
    {
        mirror_dirs(from, to)?;
        let files = image_files(from, FileFilter::AnyImage)?;
        let mut written: HashSet<PathBuf> = HashSet::with_capacity(files.len());
        for file in &files {
            let dst = output_path(&mirror_path(from, to, file));
            if !written.insert(dst.clone()) {
                return Err(Error::OutputCollision { path: dst });
            }
            let img = imaging::open(file)?;
            imaging::save(&op(&img)?, &dst, self.config.quality)?;
            debug!(from = %file.display(), to = %dst.display(), "wrote");
        }
        Ok(files.len())
    }
}

/// Files with no encoder (e.g. GIF) are written as JPEG with `.jpg`
/// appended, so `a.gif` and `a.jpg` stay distinct.
fn output_path(path: &Path) -> PathBuf {
    match OutputFormat::from_path(path) {
        Some(_) => path.to_path_buf(),
        None => {
            let mut name = path.file_name().unwrap_or_default().to_os_string();
            name.push(".");
            name.push(OutputFormat::Jpeg.extension());
            path.with_file_name(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_config() {
        let zero = PreprocessConfig { width: 0, ..PreprocessConfig::default() };
        assert!(Pipeline::new(zero).is_err());
        let quality = PreprocessConfig { quality: 0, ..PreprocessConfig::default() };
        assert!(Pipeline::new(quality).is_err());
        assert!(Pipeline::new(PreprocessConfig::default()).is_ok());
    }

    #[test]
    fn test_output_path() {
        assert_eq!(output_path(Path::new("a/b.gif")), Path::new("a/b.gif.jpg"));
        assert_eq!(output_path(Path::new("a/b.png")), Path::new("a/b.png"));
    }

    #[test]
    fn test_missing_root() {
        let pipeline = Pipeline::new(PreprocessConfig::default()).unwrap();
        assert!(matches!(
            pipeline.run(Path::new("/no/such/dataset")),
            Err(Error::DirectoryNotFound { .. })
        ));
    }
}
