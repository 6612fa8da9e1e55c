//! Dataset import helpers.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/import/import_test.rs"]
mod import_test;

mod csv;
pub use self::csv::*;

use som_core::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::mem::size_of;

/// Specifies how records are converted into vectors.
#[derive(Clone, Debug)]
pub struct ImportOptions {
    /// Column mapping, derived from the header when not set.
    pub mapping: Option<ColumnMapping>,
    /// A value used instead of a feature which cannot be parsed.
    pub default_value: Float,
    /// When set, a record with an unparsable feature is skipped instead of using the default value.
    pub is_strict: bool,
    /// A probability to keep a record, in (0, 1].
    pub sampling_rate: Float,
    /// Amount of vectors accumulated before they are moved into the dataset.
    pub batch_size: usize,
    /// How often progress is reported, in records.
    pub progress_interval: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { mapping: None, default_value: 0., is_strict: false, sampling_rate: 1., batch_size: 1000, progress_interval: 100 }
    }
}

impl ImportOptions {
    /// Checks that options are within their valid domains.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.sampling_rate > 0. && self.sampling_rate <= 1.) {
            return Err(format!("sampling rate must be in (0, 1], got {}", self.sampling_rate));
        }

        if self.batch_size == 0 {
            return Err("batch size must be positive".to_string());
        }

        if self.progress_interval == 0 {
            return Err("progress interval must be positive".to_string());
        }

        if !self.default_value.is_finite() {
            return Err(format!("default value must be finite, got {}", self.default_value));
        }

        Ok(())
    }
}

/// Imports a dataset from the csv file at the given path.
pub fn import_dataset(
    path: &str,
    options: &ImportOptions,
    environment: &Environment,
    progress: &dyn ProgressListener,
) -> Result<Vec<Vector>, String> {
    let open = || File::open(path).map_err(|err| format!("cannot open data file '{path}': '{err}'"));

    let total_rows = count_data_lines(BufReader::new(open()?))?;

    read_csv_dataset(BufReader::new(open()?), options, total_rows, environment, progress)
}

/// Counts non-empty lines excluding the header.
pub fn count_data_lines<R: Read>(reader: BufReader<R>) -> Result<i64, String> {
    let mut lines = 0_i64;

    for line in reader.lines() {
        let line = line.map_err(|err| format!("cannot read line: '{err}'"))?;
        if !line.trim().is_empty() {
            lines += 1;
        }
    }

    Ok((lines - 1).max(0))
}

/// Estimates memory held by vectors in megabytes.
pub fn estimate_memory_mb(vectors: &[Vector]) -> u64 {
    let bytes = vectors
        .iter()
        .map(|vector| size_of::<Vector>() + vector.dimension() * size_of::<Float>() + vector.label().len())
        .sum::<usize>();

    (bytes / (1024 * 1024)) as u64
}
