#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// A small on-disk YOLO dataset plus config files for end-to-end tests.
pub struct Fixture {
    pub images: PathBuf,
    pub labels: PathBuf,
    pub classes: PathBuf,
    pub targets: PathBuf,
}

/// Write one image/label pair. The "image" is a stub file; the tool copies
/// bytes without decoding them.
pub fn write_pair(images: &Path, labels: &Path, stem: &str, label_lines: &str) {
    fs::write(images.join(format!("{stem}.jpg")), stem.as_bytes()).expect("write image");
    fs::write(labels.join(format!("{stem}.txt")), label_lines).expect("write label");
}

/// Lay out a dataset with three classes and a handful of overlapping images.
pub fn setup_dataset(root: &Path) -> Fixture {
    let images = root.join("images_src");
    let labels = root.join("labels_src");
    fs::create_dir_all(&images).expect("create images dir");
    fs::create_dir_all(&labels).expect("create labels dir");

    // class ids: 0 = car, 1 = person, 2 = train
    write_pair(&images, &labels, "img_a", "0 0.5 0.5 0.2 0.2\n");
    write_pair(&images, &labels, "img_b", "0 0.3 0.3 0.1 0.1\n1 0.6 0.6 0.2 0.2\n");
    write_pair(&images, &labels, "img_c", "1 0.4 0.4 0.1 0.1\n");
    write_pair(&images, &labels, "img_d", "0 0.2 0.2 0.1 0.1\n");
    write_pair(&images, &labels, "img_e", "2 0.5 0.5 0.4 0.4\n");

    let classes = root.join("data.yaml");
    fs::write(&classes, "names:\n  - car\n  - person\n  - train\n").expect("write classes");

    let targets = root.join("targets.yaml");
    fs::write(&targets, "car: 2\nperson: 1\ntrain: 5\n").expect("write targets");

    Fixture {
        images,
        labels,
        classes,
        targets,
    }
}

/// Assert that every file under `images/<split>` has a same-stem file under
/// `labels/<split>` and vice versa.
pub fn assert_no_partial_pairs(output: &Path, split: &str) {
    let images = output.join("images").join(split);
    let labels = output.join("labels").join(split);

    let stems = |dir: &Path| -> Vec<std::ffi::OsString> {
        let mut stems: Vec<_> = fs::read_dir(dir)
            .expect("read output dir")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .path()
                    .file_stem()
                    .expect("file stem")
                    .to_owned()
            })
            .collect();
        stems.sort();
        stems
    };

    assert_eq!(stems(&images), stems(&labels), "partial pair in output tree");
}

/// List the sorted label filenames of an output split.
pub fn output_label_names(output: &Path, split: &str) -> Vec<std::ffi::OsString> {
    let mut names: Vec<_> = fs::read_dir(output.join("labels").join(split))
        .expect("read output labels")
        .map(|entry| entry.expect("dir entry").file_name())
        .collect();
    names.sort();
    names
}
