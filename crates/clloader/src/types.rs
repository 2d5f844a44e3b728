// types.rs
// Shared value types: class labels and the label range owned by a task.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Class id, contiguous in `0..nb_classes`
pub type Label = usize;

/// Half-open label range `[lo, hi)` owned by one task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskRange {
    pub task_id: usize,
    pub lo: Label,
    pub hi: Label,
}

impl TaskRange {
    pub fn new(task_id: usize, lo: Label, hi: Label) -> Self {
        Self { task_id, lo, hi }
    }

    /// Number of classes introduced by the task
    pub fn len(&self) -> usize {
        self.hi - self.lo
    }

    pub fn is_empty(&self) -> bool {
        self.hi == self.lo
    }

    pub fn contains(&self, label: Label) -> bool {
        self.lo <= label && label < self.hi
    }

    pub fn as_range(&self) -> Range<Label> {
        self.lo..self.hi
    }

    /// Labels seen from task 0 up to and including this task
    pub fn seen(&self) -> Range<Label> {
        0..self.hi
    }
}

impl fmt::Display for TaskRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task {} [{}, {})", self.task_id, self.lo, self.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_helpers() {
        let range = TaskRange::new(1, 5, 8);
        assert_eq!(range.len(), 3);
        assert!(range.contains(5));
        assert!(range.contains(7));
        assert!(!range.contains(8));
        assert_eq!(range.as_range(), 5..8);
        assert_eq!(range.seen(), 0..8);
        assert_eq!(range.to_string(), "task 1 [5, 8)");
    }
}
