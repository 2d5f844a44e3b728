// lib.rs
// Continual-learning loader: splits a classification dataset into a sequence of
// label-range tasks, each with its own train view and cumulative test view.
pub mod config;
pub mod dataset;
pub mod error;
pub mod folder;
pub mod loader;
pub mod partitioner;
pub mod types;

pub use config::{Increment, LoaderConfig};
pub use dataset::{ArrayDataset, DatasetView, LabeledDataset};
pub use error::{Error, Result};
pub use folder::ImageFolderDataset;
pub use loader::{CLLoader, TaskIter, TaskSet};
pub use partitioner::{expected_nb_tasks, partition};
pub use types::{Label, TaskRange};
