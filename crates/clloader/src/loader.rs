// loader.rs
// Continual-learning loader: partitions the label space of a train/test dataset
// pair into tasks and hands out a (train, test) view per task.
use crate::config::{Increment, LoaderConfig};
use crate::dataset::{DatasetView, LabeledDataset};
use crate::error::{Error, Result};
use crate::partitioner::partition;
use crate::types::TaskRange;
use std::iter::FusedIterator;
use tracing::{info, warn};

/// Sequence of continual-learning tasks over a train and a test dataset
///
/// The partition is computed once in the constructor and never changes; every
/// pass over the loader yields the same tasks in ascending label order.
#[derive(Debug, Clone)]
pub struct CLLoader<D> {
    train: D,
    test: D,
    nb_classes: usize,
    ranges: Vec<TaskRange>,
}

/// Data of one task
///
/// `train` holds only the classes introduced by the task, `test` holds every
/// class seen up to and including it.
#[derive(Debug, Clone)]
pub struct TaskSet<'a, D> {
    pub range: TaskRange,
    pub train: DatasetView<'a, D>,
    pub test: DatasetView<'a, D>,
}

impl<'a, D> TaskSet<'a, D> {
    pub fn task_id(&self) -> usize {
        self.range.task_id
    }

    pub fn into_pair(self) -> (DatasetView<'a, D>, DatasetView<'a, D>) {
        (self.train, self.test)
    }
}

impl<D: LabeledDataset> CLLoader<D> {
    /// Build the task sequence; fails if the increment does not fit the label space
    pub fn new(
        train: D,
        test: D,
        increment: impl Into<Increment>,
        initial_increment: usize,
    ) -> Result<Self> {
        let config = LoaderConfig::new(increment, initial_increment);
        Self::from_config(train, test, &config)
    }

    pub fn from_config(train: D, test: D, config: &LoaderConfig) -> Result<Self> {
        let nb_classes = train.nb_classes();
        if let Some(label) = train.labels().into_iter().find(|&l| l >= nb_classes) {
            return Err(Error::LabelOutOfRange { label, nb_classes });
        }
        let test_classes = test.nb_classes();
        if test_classes != nb_classes {
            if config.strict_label_space {
                return Err(Error::LabelSpaceMismatch {
                    train: nb_classes,
                    test: test_classes,
                });
            }
            warn!(
                train_classes = nb_classes,
                test_classes, "test split label space differs from train split"
            );
        }

        let ranges = partition(nb_classes, &config.increment, config.initial_increment)?;
        info!(
            nb_classes,
            nb_tasks = ranges.len(),
            train_samples = train.len(),
            test_samples = test.len(),
            "continual loader ready"
        );

        Ok(Self {
            train,
            test,
            nb_classes,
            ranges,
        })
    }

    pub fn nb_tasks(&self) -> usize {
        self.ranges.len()
    }

    /// Size of the label space the partition was computed on
    pub fn nb_classes(&self) -> usize {
        self.nb_classes
    }

    pub fn ranges(&self) -> &[TaskRange] {
        &self.ranges
    }

    pub fn train(&self) -> &D {
        &self.train
    }

    pub fn test(&self) -> &D {
        &self.test
    }

    /// Views of task `task_id`, `None` past the last task
    pub fn task(&self, task_id: usize) -> Option<TaskSet<'_, D>> {
        self.ranges.get(task_id).map(|range| self.task_set(*range))
    }

    /// Iterate over all tasks; can be called any number of times
    pub fn iter(&self) -> TaskIter<'_, D> {
        TaskIter {
            loader: self,
            next: 0,
        }
    }

    fn task_set(&self, range: TaskRange) -> TaskSet<'_, D> {
        TaskSet {
            range,
            train: self.train.filter_range(range.as_range()),
            test: self.test.filter_range(range.seen()),
        }
    }
}

/// Iterator over the tasks of a `CLLoader`, in ascending task order
pub struct TaskIter<'a, D> {
    loader: &'a CLLoader<D>,
    next: usize,
}

impl<'a, D: LabeledDataset> Iterator for TaskIter<'a, D> {
    type Item = TaskSet<'a, D>;

    fn next(&mut self) -> Option<Self::Item> {
        let range = *self.loader.ranges.get(self.next)?;
        self.next += 1;
        Some(self.loader.task_set(range))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.loader.ranges.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<D: LabeledDataset> ExactSizeIterator for TaskIter<'_, D> {}

impl<D: LabeledDataset> FusedIterator for TaskIter<'_, D> {}

impl<'a, D: LabeledDataset> IntoIterator for &'a CLLoader<D> {
    type Item = TaskSet<'a, D>;
    type IntoIter = TaskIter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
