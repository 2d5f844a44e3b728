// folder.rs
// Class-folder dataset: `root/<class_name>/<sample file>`. Classes get ids in
// sorted directory-name order. Samples are file paths; nothing is decoded here.
use crate::dataset::LabeledDataset;
use crate::error::{Error, Result};
use crate::types::Label;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Dataset scanned from a directory of per-class sub-directories
#[derive(Debug, Clone)]
pub struct ImageFolderDataset {
    root: PathBuf,
    class_names: Vec<String>,
    paths: Vec<PathBuf>,
    labels: Vec<Label>,
}

impl ImageFolderDataset {
    /// Scan `root`; each visible sub-directory is one class
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        let mut class_dirs = Vec::new();
        for entry in fs::read_dir(&root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() && !is_hidden(&entry.path()) {
                class_dirs.push(entry.path());
            }
        }
        if class_dirs.is_empty() {
            return Err(Error::EmptyDataset(root.display().to_string()));
        }
        class_dirs.sort();

        let mut class_names = Vec::with_capacity(class_dirs.len());
        let mut paths = Vec::new();
        let mut labels = Vec::new();
        for (label, dir) in class_dirs.iter().enumerate() {
            let mut files = Vec::new();
            for entry in fs::read_dir(dir)? {
                let entry = entry?;
                if entry.file_type()?.is_file() && !is_hidden(&entry.path()) {
                    files.push(entry.path());
                }
            }
            if files.is_empty() {
                warn!(class_dir = %dir.display(), "class directory has no samples");
            }
            files.sort();
            labels.extend(std::iter::repeat(label).take(files.len()));
            paths.extend(files);
            class_names.push(file_name(dir));
        }

        info!(
            root = %root.display(),
            nb_classes = class_names.len(),
            nb_samples = paths.len(),
            "scanned image folder"
        );

        Ok(Self {
            root,
            class_names,
            paths,
            labels,
        })
    }

    /// Open the train and test splits of one dataset
    pub fn pair(train_root: impl AsRef<Path>, test_root: impl AsRef<Path>) -> Result<(Self, Self)> {
        let train = Self::open(train_root)?;
        let test = Self::open(test_root)?;
        if train.class_names != test.class_names {
            warn!(
                train_classes = train.class_names.len(),
                test_classes = test.class_names.len(),
                "train and test folders have different class directories"
            );
        }
        Ok((train, test))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Class directory names, indexed by label
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }
}

impl LabeledDataset for ImageFolderDataset {
    type Sample = (PathBuf, Label);

    fn len(&self) -> usize {
        self.paths.len()
    }

    fn get(&self, index: usize) -> Result<Self::Sample> {
        match (self.paths.get(index), self.labels.get(index)) {
            (Some(path), Some(&label)) => Ok((path.clone(), label)),
            _ => Err(Error::IndexOutOfRange {
                index,
                len: self.paths.len(),
            }),
        }
    }

    fn label(&self, index: usize) -> Option<Label> {
        self.labels.get(index).copied()
    }

    fn labels(&self) -> Vec<Label> {
        self.labels.clone()
    }

    /// Every class directory counts, even an empty one
    fn nb_classes(&self) -> usize {
        self.class_names.len()
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.starts_with('.'))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_scan_sorted_classes() {
        let dir = tempfile::tempdir().unwrap();
        for class in ["cat", "ant", "bee"] {
            let class_dir = dir.path().join(class);
            fs::create_dir(&class_dir).unwrap();
            touch(&class_dir.join("b.jpg"));
            touch(&class_dir.join("a.jpg"));
        }
        touch(&dir.path().join("README"));
        fs::create_dir(dir.path().join(".cache")).unwrap();

        let dataset = ImageFolderDataset::open(dir.path()).unwrap();
        assert_eq!(dataset.class_names(), &["ant", "bee", "cat"]);
        assert_eq!(dataset.len(), 6);
        assert_eq!(dataset.nb_classes(), 3);
        assert_eq!(dataset.labels(), vec![0, 0, 1, 1, 2, 2]);

        let (path, label) = dataset.get(2).unwrap();
        assert_eq!(label, 1);
        assert_eq!(path, dir.path().join("bee").join("a.jpg"));
    }

    #[test]
    fn test_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageFolderDataset::open(dir.path()).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset(_)));
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageFolderDataset::open(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_empty_class_still_counts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        touch(&dir.path().join("a").join("0.jpg"));

        let dataset = ImageFolderDataset::open(dir.path()).unwrap();
        assert_eq!(dataset.nb_classes(), 2);
        assert_eq!(dataset.len(), 1);
    }
}
