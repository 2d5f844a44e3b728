// config.rs
// Loader configuration: the increment policy, the optional initial task size
// and the label-space check mode. Loadable from a JSON file.
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How many new classes each task introduces
///
/// Serialized untagged, so a JSON config accepts either `2` or `[5, 1, 1, 3]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Increment {
    /// Same number of classes for every task (after the optional initial task)
    Uniform(usize),
    /// Explicit per-task class counts, consumed in order
    Explicit(Vec<usize>),
}

impl Increment {
    /// Short human readable form, used in logs and the CLI table header
    pub fn description(&self) -> String {
        match self {
            Increment::Uniform(k) => format!("uniform({})", k),
            Increment::Explicit(sizes) => format!("explicit({:?})", sizes),
        }
    }
}

impl From<usize> for Increment {
    fn from(k: usize) -> Self {
        Increment::Uniform(k)
    }
}

impl From<Vec<usize>> for Increment {
    fn from(sizes: Vec<usize>) -> Self {
        Increment::Explicit(sizes)
    }
}

impl From<&[usize]> for Increment {
    fn from(sizes: &[usize]) -> Self {
        Increment::Explicit(sizes.to_vec())
    }
}

/// Everything `CLLoader::from_config` needs besides the two datasets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Per-task class increment
    pub increment: Increment,
    /// Size of the first task; only honored for a uniform increment, 0 disables it
    #[serde(default)]
    pub initial_increment: usize,
    /// Reject a test split whose class count differs from the train split
    #[serde(default)]
    pub strict_label_space: bool,
}

impl LoaderConfig {
    pub fn new(increment: impl Into<Increment>, initial_increment: usize) -> Self {
        Self {
            increment: increment.into(),
            initial_increment,
            strict_label_space: false,
        }
    }

    pub fn strict(mut self, strict_label_space: bool) -> Self {
        self.strict_label_space = strict_label_space;
        self
    }

    /// Parse a configuration from a JSON document
    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| Error::Config(format!("failed to parse loader config: {}", e)))
    }

    /// Read and parse a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::Config(format!(
                "config file {} not found",
                path.display()
            )));
        }
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

impl Default for LoaderConfig {
    /// One class per task, no special first task, lax label-space check
    fn default() -> Self {
        Self::new(1usize, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_increment_from_json() {
        let config = LoaderConfig::from_json_str(r#"{"increment": 2, "initial_increment": 4}"#)
            .unwrap();
        assert_eq!(config.increment, Increment::Uniform(2));
        assert_eq!(config.initial_increment, 4);
        assert!(!config.strict_label_space);
    }

    #[test]
    fn test_list_increment_from_json() {
        let config = LoaderConfig::from_json_str(r#"{"increment": [5, 1, 1, 3]}"#).unwrap();
        assert_eq!(config.increment, Increment::Explicit(vec![5, 1, 1, 3]));
        assert_eq!(config.initial_increment, 0);
    }

    #[test]
    fn test_negative_increment_rejected() {
        let err = LoaderConfig::from_json_str(r#"{"increment": -2}"#).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LoaderConfig::from_file(dir.path().join("loader.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loader.json");
        fs::write(&path, r#"{"increment": 5, "strict_label_space": true}"#).unwrap();

        let config = LoaderConfig::from_file(&path).unwrap();
        assert_eq!(config, LoaderConfig::new(5usize, 0).strict(true));
    }
}
