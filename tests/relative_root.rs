//! Runs the pipeline on `.` from inside the dataset. Kept in its own test
//! binary because it changes the process working directory.

use std::fs;
use std::path::Path;

use dataset_prep::imaging;
use dataset_prep::{Pipeline, PreprocessConfig};
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use tempfile::TempDir;

#[test]
fn dot_root_builds_siblings_beside_the_tree() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("imgs");
    let file = root.join("cat/1.jpg");
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, Rgb([1, 2, 3])));
    imaging::save(&img, &file, 100).unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(&root).unwrap();
    let config = PreprocessConfig { lowres: true, gray: true, ..PreprocessConfig::default() };
    let result = Pipeline::new(config).unwrap().run(Path::new("."));
    std::env::set_current_dir(previous).unwrap();

    let summary = result.unwrap();
    assert_eq!(summary.resized, 1);
    assert_eq!(summary.grayscaled, 1);

    let parent = fs::canonicalize(dir.path()).unwrap();
    assert_eq!(
        summary.manifests,
        vec![
            parent.join("imgs.tsv"),
            parent.join("imgs (Low Resolution).tsv"),
            parent.join("imgs (Grayscale).tsv"),
        ]
    );
    assert_eq!(
        imaging::open(parent.join("imgs (Grayscale)/cat/1.jpg")).unwrap().dimensions(),
        (320, 240)
    );

    // Nothing derived may land inside the source tree.
    let inside: Vec<String> = fs::read_dir(&root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(inside, vec!["cat"]);
}
