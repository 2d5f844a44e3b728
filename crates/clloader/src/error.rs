// error.rs
// Crate-wide error type: configuration errors raised while building the task
// partition, and errors reported by dataset collaborators.
use std::io;
use thiserror::Error;

/// Errors produced by the partitioner, the loader and the dataset backends
#[derive(Debug, Error)]
pub enum Error {
    /// Explicit per-task sizes do not add up to the number of classes
    #[error("increment sizes sum to {actual} but the dataset has {expected} classes")]
    SizeMismatch { expected: usize, actual: usize },

    /// Remaining label count is not a multiple of the uniform increment
    #[error("{remaining} remaining classes cannot be split into tasks of {increment}")]
    NonDivisibleIncrement { remaining: usize, increment: usize },

    /// Zero increment, zero per-task size or empty size list
    #[error("invalid increment: {0}")]
    InvalidIncrement(String),

    /// Initial task asks for more classes than exist
    #[error("initial increment {initial} exceeds the {nb_classes} available classes")]
    InitialIncrementExceeds { initial: usize, nb_classes: usize },

    /// Train dataset reports no classes at all
    #[error("label space is empty")]
    EmptyLabelSpace,

    /// A train label falls outside `0..nb_classes`, so no task would own it
    #[error("label {label} is outside the label space 0..{nb_classes}")]
    LabelOutOfRange { label: usize, nb_classes: usize },

    /// Train and test datasets disagree on the number of classes (strict mode)
    #[error("train split has {train} classes but test split has {test}")]
    LabelSpaceMismatch { train: usize, test: usize },

    /// Malformed loader configuration
    #[error("config error: {0}")]
    Config(String),

    /// Inputs and labels of an in-memory dataset have different lengths
    #[error("{inputs} inputs but {labels} labels")]
    LengthMismatch { inputs: usize, labels: usize },

    /// Sample index past the end of a dataset or view
    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Folder scan found no class directories
    #[error("no class directories found under {0}")]
    EmptyDataset(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Crate result type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for the errors that reject a loader configuration at construction time
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::SizeMismatch { .. }
                | Error::NonDivisibleIncrement { .. }
                | Error::InvalidIncrement(_)
                | Error::InitialIncrementExceeds { .. }
                | Error::EmptyLabelSpace
                | Error::LabelOutOfRange { .. }
                | Error::LabelSpaceMismatch { .. }
                | Error::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_family() {
        assert!(Error::EmptyLabelSpace.is_config());
        assert!(Error::LabelOutOfRange { label: 5, nb_classes: 3 }.is_config());
        assert!(Error::SizeMismatch { expected: 10, actual: 9 }.is_config());
        assert!(!Error::IndexOutOfRange { index: 3, len: 2 }.is_config());
        assert!(!Error::EmptyDataset("/tmp/x".to_string()).is_config());
    }

    #[test]
    fn test_display() {
        let err = Error::NonDivisibleIncrement { remaining: 7, increment: 2 };
        assert_eq!(
            err.to_string(),
            "7 remaining classes cannot be split into tasks of 2"
        );
    }
}
