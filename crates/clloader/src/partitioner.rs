// partitioner.rs
// Task partitioner: carves the label space `[0, N)` into consecutive,
// non-overlapping label ranges, one per task, according to the increment policy.
use crate::config::Increment;
use crate::error::{Error, Result};
use crate::types::TaskRange;
use tracing::debug;

/// Split `nb_classes` labels into ordered task ranges
///
/// * explicit sizes: one task per entry, `initial_increment` is ignored and the
///   sizes must sum to `nb_classes`;
/// * uniform `k` with `initial_increment > 0`: task 0 is `[0, initial_increment)`,
///   the rest is split in tasks of `k`;
/// * uniform `k` with `initial_increment == 0`: `nb_classes / k` tasks of `k`.
///
/// Nothing is returned unless the whole partition is valid.
pub fn partition(
    nb_classes: usize,
    increment: &Increment,
    initial_increment: usize,
) -> Result<Vec<TaskRange>> {
    if nb_classes == 0 {
        return Err(Error::EmptyLabelSpace);
    }

    let sizes = match increment {
        Increment::Explicit(sizes) => split_explicit(nb_classes, sizes)?,
        Increment::Uniform(k) if initial_increment > 0 => {
            split_with_initial(nb_classes, *k, initial_increment)?
        }
        Increment::Uniform(k) => split_uniform(nb_classes, *k)?,
    };

    let mut ranges = Vec::with_capacity(sizes.len());
    let mut lo = 0;
    for (task_id, size) in sizes.into_iter().enumerate() {
        let hi = lo + size;
        ranges.push(TaskRange::new(task_id, lo, hi));
        lo = hi;
    }

    debug!(
        nb_classes,
        increment = %increment.description(),
        initial_increment,
        nb_tasks = ranges.len(),
        "computed task partition"
    );
    for range in &ranges {
        debug!("{}", range);
    }

    Ok(ranges)
}

/// Closed-form task count, validated exactly like `partition`
pub fn expected_nb_tasks(
    nb_classes: usize,
    increment: &Increment,
    initial_increment: usize,
) -> Result<usize> {
    if nb_classes == 0 {
        return Err(Error::EmptyLabelSpace);
    }
    match increment {
        Increment::Explicit(sizes) => split_explicit(nb_classes, sizes).map(|s| s.len()),
        Increment::Uniform(k) if initial_increment > 0 => {
            check_uniform(*k)?;
            check_initial(nb_classes, *k, initial_increment)?;
            Ok(1 + (nb_classes - initial_increment) / k)
        }
        Increment::Uniform(k) => {
            check_uniform(*k)?;
            check_divisible(nb_classes, *k)?;
            Ok(nb_classes / k)
        }
    }
}

fn split_explicit(nb_classes: usize, sizes: &[usize]) -> Result<Vec<usize>> {
    if sizes.is_empty() {
        return Err(Error::InvalidIncrement(
            "explicit increment list is empty".to_string(),
        ));
    }
    if let Some(pos) = sizes.iter().position(|&s| s == 0) {
        return Err(Error::InvalidIncrement(format!(
            "task {} has a size of 0",
            pos
        )));
    }
    let total = sizes
        .iter()
        .try_fold(0usize, |acc, &s| acc.checked_add(s))
        .ok_or_else(|| Error::InvalidIncrement("increment sizes overflow".to_string()))?;
    if total != nb_classes {
        return Err(Error::SizeMismatch {
            expected: nb_classes,
            actual: total,
        });
    }
    Ok(sizes.to_vec())
}

fn split_with_initial(nb_classes: usize, k: usize, initial: usize) -> Result<Vec<usize>> {
    check_uniform(k)?;
    check_initial(nb_classes, k, initial)?;
    let mut sizes = vec![initial];
    sizes.extend(std::iter::repeat(k).take((nb_classes - initial) / k));
    Ok(sizes)
}

fn split_uniform(nb_classes: usize, k: usize) -> Result<Vec<usize>> {
    check_uniform(k)?;
    check_divisible(nb_classes, k)?;
    Ok(vec![k; nb_classes / k])
}

fn check_uniform(k: usize) -> Result<()> {
    if k == 0 {
        return Err(Error::InvalidIncrement(
            "increment must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

fn check_initial(nb_classes: usize, k: usize, initial: usize) -> Result<()> {
    if initial > nb_classes {
        return Err(Error::InitialIncrementExceeds {
            initial,
            nb_classes,
        });
    }
    check_divisible(nb_classes - initial, k)
}

fn check_divisible(remaining: usize, k: usize) -> Result<()> {
    if remaining % k != 0 {
        return Err(Error::NonDivisibleIncrement {
            remaining,
            increment: k,
        });
    }
    Ok(())
}
