//! Formats training results for console output.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/display/display_test.rs"]
mod display_test;

use rand::seq::SliceRandom;
use som_core::prelude::*;
use std::io::{Result as IoResult, Write};

/// Max amount of vectors shown in a random sample.
pub const SAMPLE_SIZE: usize = 10;

/// Returns up to `amount` distinct vectors picked randomly.
pub fn sample_vectors<'a>(dataset: &'a [Vector], amount: usize, random: &(dyn Random + Send + Sync)) -> Vec<&'a Vector> {
    dataset.choose_multiple(&mut random.get_rng(), amount).collect()
}

/// Formats dataset size and dimension.
pub fn format_data_info(dataset: &[Vector]) -> String {
    match dataset.first() {
        Some(first) => format!("Number of data points: {}\nNumber of dimensions: {}", dataset.len(), first.dimension()),
        None => "Number of data points: 0".to_string(),
    }
}

/// Formats labels of the grid: one row per line, cells are separated by tabs.
pub fn format_grid(grid: &Grid) -> String {
    grid.row_slices()
        .iter()
        .map(|row| row.iter().map(|prototype| prototype.to_string()).collect::<Vec<_>>().join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats mapping from original to canonical labels, one entry per line.
pub fn format_mapping(mapping: &[LabelMapping]) -> String {
    mapping.iter().map(|entry| format!("{} = {}", entry.original, entry.canonical)).collect::<Vec<_>>().join("\n")
}

/// Formats class distribution in a single line.
pub fn format_counts(counts: &[LabelCount]) -> String {
    counts.iter().map(|entry| format!("{} = {}", entry.label, entry.count)).collect::<Vec<_>>().join("\t")
}

/// Writes a summary of a finished training run.
pub fn write_report<W: Write>(writer: &mut W, report: &TrainingReport, grid: &Grid) -> IoResult<()> {
    writeln!(writer, "\nClassification results:")?;
    writeln!(writer, "{}", format_mapping(&report.mapping))?;
    writeln!(writer, "{}", format_grid(grid))?;

    writeln!(writer, "\nClass distribution:")?;
    writeln!(writer, "{}", format_counts(&report.counts))?;

    writeln!(writer, "\nTrained with {} iterations ({} steps)", report.iterations, report.steps)
}
