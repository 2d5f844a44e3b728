// dataset.rs
// Dataset capability consumed by the loader, the label-filtered view it hands
// out per task, and a plain in-memory backend.
use crate::error::{Error, Result};
use crate::types::Label;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

/// A classification dataset: indexed samples, each carrying an integer label
///
/// The partitioner and the loader only ever talk to this trait, so any backend
/// (class folders, in-memory arrays, views of other datasets) can be plugged in.
pub trait LabeledDataset {
    type Sample;

    /// Number of samples
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample at `index`
    fn get(&self, index: usize) -> Result<Self::Sample>;

    /// Label of the sample at `index`, `None` past the end
    fn label(&self, index: usize) -> Option<Label>;

    /// Labels of all samples, in sample order
    fn labels(&self) -> Vec<Label> {
        (0..self.len()).filter_map(|i| self.label(i)).collect()
    }

    /// Number of distinct labels
    fn nb_classes(&self) -> usize {
        self.labels().into_iter().collect::<BTreeSet<_>>().len()
    }

    /// View over the samples whose label falls in `range`; labels are not remapped
    fn filter_range(&self, range: Range<Label>) -> DatasetView<'_, Self>
    where
        Self: Sized,
    {
        DatasetView::new(self, range)
    }
}

impl<T: LabeledDataset + ?Sized> LabeledDataset for &T {
    type Sample = T::Sample;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn get(&self, index: usize) -> Result<Self::Sample> {
        (**self).get(index)
    }

    fn label(&self, index: usize) -> Option<Label> {
        (**self).label(index)
    }

    fn labels(&self) -> Vec<Label> {
        (**self).labels()
    }

    fn nb_classes(&self) -> usize {
        (**self).nb_classes()
    }
}

/// Label-filtered view over a parent dataset
///
/// Holds only the parent indices of the selected samples; samples are fetched
/// from the parent on access.
pub struct DatasetView<'a, D> {
    parent: &'a D,
    range: Range<Label>,
    indices: Vec<usize>,
}

impl<'a, D: LabeledDataset> DatasetView<'a, D> {
    pub fn new(parent: &'a D, range: Range<Label>) -> Self {
        let indices = (0..parent.len())
            .filter(|&i| parent.label(i).map_or(false, |label| range.contains(&label)))
            .collect();
        Self {
            parent,
            range,
            indices,
        }
    }

    /// Label range this view was filtered on
    pub fn range(&self) -> Range<Label> {
        self.range.clone()
    }

    /// Parent indices of the selected samples
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn parent(&self) -> &'a D {
        self.parent
    }

    /// Iterate over the samples of the view in order
    pub fn samples(&self) -> impl Iterator<Item = Result<D::Sample>> + '_ {
        self.indices.iter().map(move |&i| self.parent.get(i))
    }
}

impl<D: LabeledDataset> LabeledDataset for DatasetView<'_, D> {
    type Sample = D::Sample;

    fn len(&self) -> usize {
        self.indices.len()
    }

    fn get(&self, index: usize) -> Result<Self::Sample> {
        let parent_index = self.indices.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.indices.len(),
        })?;
        self.parent.get(*parent_index)
    }

    fn label(&self, index: usize) -> Option<Label> {
        self.indices.get(index).and_then(|&i| self.parent.label(i))
    }
}

impl<D> Clone for DatasetView<'_, D> {
    fn clone(&self) -> Self {
        Self {
            parent: self.parent,
            range: self.range.clone(),
            indices: self.indices.clone(),
        }
    }
}

impl<D> fmt::Debug for DatasetView<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetView")
            .field("range", &self.range)
            .field("len", &self.indices.len())
            .finish()
    }
}

/// In-memory dataset built from parallel input and label vectors
#[derive(Debug, Clone)]
pub struct ArrayDataset<X> {
    inputs: Vec<X>,
    labels: Vec<Label>,
    nb_classes: usize,
}

impl<X: Clone> ArrayDataset<X> {
    pub fn new(inputs: Vec<X>, labels: Vec<Label>) -> Result<Self> {
        if inputs.len() != labels.len() {
            return Err(Error::LengthMismatch {
                inputs: inputs.len(),
                labels: labels.len(),
            });
        }
        let nb_classes = labels.iter().collect::<BTreeSet<_>>().len();
        Ok(Self {
            inputs,
            labels,
            nb_classes,
        })
    }

    pub fn inputs(&self) -> &[X] {
        &self.inputs
    }
}

impl<X: Clone> LabeledDataset for ArrayDataset<X> {
    type Sample = (X, Label);

    fn len(&self) -> usize {
        self.inputs.len()
    }

    fn get(&self, index: usize) -> Result<Self::Sample> {
        match (self.inputs.get(index), self.labels.get(index)) {
            (Some(x), Some(&y)) => Ok((x.clone(), y)),
            _ => Err(Error::IndexOutOfRange {
                index,
                len: self.inputs.len(),
            }),
        }
    }

    fn label(&self, index: usize) -> Option<Label> {
        self.labels.get(index).copied()
    }

    fn labels(&self) -> Vec<Label> {
        self.labels.clone()
    }

    fn nb_classes(&self) -> usize {
        self.nb_classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_dataset() -> ArrayDataset<u32> {
        // two samples per class, classes 0..5, interleaved
        let labels: Vec<Label> = (0..10).map(|i| i % 5).collect();
        let inputs: Vec<u32> = (0..10).map(|i| i * 100).collect();
        ArrayDataset::new(inputs, labels).unwrap()
    }

    #[test]
    fn test_array_dataset() {
        let dataset = toy_dataset();
        assert_eq!(dataset.len(), 10);
        assert_eq!(dataset.nb_classes(), 5);
        assert_eq!(dataset.get(3).unwrap(), (300, 3));
        assert!(matches!(
            dataset.get(10),
            Err(Error::IndexOutOfRange { index: 10, len: 10 })
        ));
        assert_eq!(dataset.label(10), None);
    }

    #[test]
    fn test_length_mismatch() {
        let err = ArrayDataset::new(vec![1, 2, 3], vec![0, 1]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { inputs: 3, labels: 2 }));
    }

    #[test]
    fn test_filter_range_keeps_original_labels() {
        let dataset = toy_dataset();
        let view = dataset.filter_range(2..4);

        assert_eq!(view.len(), 4);
        assert_eq!(view.labels(), vec![2, 3, 2, 3]);
        assert_eq!(view.indices(), &[2, 3, 7, 8]);
        assert_eq!(view.nb_classes(), 2);
        assert_eq!(view.get(2).unwrap(), (700, 2));
        assert!(view.get(4).is_err());
        assert_eq!(view.range(), 2..4);

        let samples: Vec<_> = view.samples().collect::<Result<_>>().unwrap();
        assert_eq!(samples, vec![(200, 2), (300, 3), (700, 2), (800, 3)]);
    }

    #[test]
    fn test_view_of_view() {
        let dataset = toy_dataset();
        let outer = dataset.filter_range(0..4);
        let inner = outer.filter_range(3..10);

        assert_eq!(inner.labels(), vec![3, 3]);
        assert_eq!(inner.get(1).unwrap(), (800, 3));
    }

    #[test]
    fn test_empty_range() {
        let dataset = toy_dataset();
        let view = dataset.filter_range(7..9);
        assert!(view.is_empty());
        assert_eq!(view.nb_classes(), 0);
    }

    #[test]
    fn test_reference_is_a_dataset() {
        let dataset = toy_dataset();
        let borrowed = &dataset;
        assert!(!LabeledDataset::is_empty(&borrowed));
        assert_eq!(borrowed.nb_classes(), 5);
        assert_eq!(borrowed.filter_range(0..1).len(), 2);
    }
}
