#[cfg(test)]
#[path = "../../../tests/unit/algorithms/som/labeling_test.rs"]
mod labeling_test;

use super::Grid;
use crate::models::{Prototype, Vector, euclidean_distance};
use crate::utils::{SomError, SomResult, compare_floats, ensure_dimension, parallel_collect};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;

/// Maps an original label to its canonical name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelMapping {
    /// An original label.
    pub original: String,
    /// A canonical label.
    pub canonical: String,
}

/// Amount of prototypes which have the label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelCount {
    /// A label.
    pub label: String,
    /// Amount of prototypes.
    pub count: usize,
}

/// Returns a canonical name for the label index: `a`..`z`, then `aa`, `ab`, and so on.
pub fn canonical_label(index: usize) -> String {
    let mut name = Vec::new();
    let mut value = index + 1;

    while value > 0 {
        value -= 1;
        name.push(b'a' + (value % 26) as u8);
        value /= 26;
    }

    name.iter().rev().map(|&byte| byte as char).collect()
}

/// Assigns to every prototype the label of the closest dataset vector. Ties are resolved by the
/// lowest dataset index. Rows are processed in parallel when `is_parallel` is set.
pub fn assign_labels(grid: &mut Grid, dataset: &[Vector], is_parallel: bool) -> SomResult<()> {
    if dataset.is_empty() {
        return Err(SomError::illegal_state("dataset is empty, nothing to label from"));
    }

    dataset.iter().try_for_each(|vector| ensure_dimension(grid.dimension(), vector.dimension()))?;

    let closest_label = |weights: &Vector| -> SomResult<String> {
        let (index, _) = dataset.iter().enumerate().try_fold((0, None), |(best_idx, best), (idx, vector)| {
            let distance = euclidean_distance(weights.features(), vector.features())?;
            Ok::<_, SomError>(match best {
                Some(best) if compare_floats(distance, best) != Ordering::Less => (best_idx, Some(best)),
                _ => (idx, Some(distance)),
            })
        })?;

        Ok(dataset[index].label().to_string())
    };

    let label_row = |row: &Vec<Prototype>| -> SomResult<Vec<String>> {
        row.iter().map(|prototype| closest_label(prototype.weights())).collect()
    };

    let labels = if is_parallel {
        parallel_collect(grid.row_slices(), label_row).into_iter().collect::<SomResult<Vec<_>>>()?
    } else {
        grid.row_slices().iter().map(label_row).collect::<SomResult<Vec<_>>>()?
    };

    grid.row_slices_mut().iter_mut().zip(labels).for_each(|(row, labels)| {
        row.iter_mut().zip(labels).for_each(|(prototype, label)| prototype.set_label(label));
    });

    Ok(())
}

/// Returns distinct non-empty labels in the row-major order of their first appearance.
pub fn distinct_labels(grid: &Grid) -> Vec<String> {
    let mut seen = FxHashSet::default();

    grid.iter()
        .map(|prototype| prototype.label())
        .filter(|label| !label.is_empty())
        .filter(|&label| seen.insert(label))
        .map(|label| label.to_string())
        .collect()
}

/// Replaces labels with canonical names keeping the first-seen order and returns the mapping.
pub fn rename_labels(grid: &mut Grid) -> Vec<LabelMapping> {
    let mapping = distinct_labels(grid)
        .into_iter()
        .enumerate()
        .map(|(index, original)| LabelMapping { original, canonical: canonical_label(index) })
        .collect::<Vec<_>>();

    let lookup =
        mapping.iter().map(|entry| (entry.original.clone(), entry.canonical.clone())).collect::<FxHashMap<_, _>>();

    grid.iter_mut().for_each(|prototype| {
        if let Some(canonical) = lookup.get(prototype.label()) {
            prototype.set_label(canonical.clone());
        }
    });

    mapping
}

/// Counts prototypes per non-empty label in the order of the first appearance.
pub fn count_labels(grid: &Grid) -> Vec<LabelCount> {
    let mut counts = distinct_labels(grid).into_iter().map(|label| LabelCount { label, count: 0 }).collect::<Vec<_>>();
    let index = counts.iter().enumerate().map(|(idx, entry)| (entry.label.clone(), idx)).collect::<FxHashMap<_, _>>();

    grid.iter().filter_map(|prototype| index.get(prototype.label())).for_each(|&idx| counts[idx].count += 1);

    counts
}
