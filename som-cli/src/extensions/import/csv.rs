//! Import from a csv format with a header row.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/import/csv_test.rs"]
mod csv_test;

pub use self::actual::read_csv_dataset;

#[cfg(feature = "csv-format")]
mod actual {
    use crate::extensions::import::{ImportOptions, estimate_memory_mb};
    use som_core::prelude::*;
    use std::io::{BufReader, Read};

    /// Converts tokens of a single record into a vector.
    pub(crate) fn create_vector(tokens: &[&str], mapping: &ColumnMapping, options: &ImportOptions) -> SomResult<Vector> {
        if !options.is_strict {
            return Vector::from_tokens(tokens, mapping, options.default_value);
        }

        let pick = |index: usize| {
            tokens
                .get(index)
                .copied()
                .ok_or_else(|| SomError::invalid_argument(format!("column index out of bounds: {index}")))
        };

        let mut selected = mapping.features().iter().map(|&index| pick(index)).collect::<SomResult<Vec<_>>>()?;
        selected.push(match mapping.label() {
            Some(index) => pick(index)?,
            None => "",
        });

        Vector::from_labeled_tokens(selected.as_slice())
    }

    /// Reads a dataset from csv. Malformed records are skipped and logged, `total_rows` is used
    /// only for progress reporting and can be -1 when unknown.
    pub fn read_csv_dataset<R: Read>(
        reader: BufReader<R>,
        options: &ImportOptions,
        total_rows: i64,
        environment: &Environment,
        progress: &dyn ProgressListener,
    ) -> Result<Vec<Vector>, String> {
        options.validate()?;

        let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);

        let header = reader.headers().map_err(|err| format!("cannot read csv header: '{err}'"))?;
        let header = header.iter().map(|column| column.trim().to_string()).collect::<Vec<_>>();

        let mapping = match &options.mapping {
            Some(mapping) => mapping.clone(),
            None => ColumnMapping::from_header(header.as_slice()).map_err(|err| err.to_string())?,
        };

        progress.on_operation_start("Loading data", total_rows);

        let mut dataset = Vec::new();
        let mut batch = Vec::with_capacity(options.batch_size);
        let (mut rows, mut skipped) = (0_usize, 0_usize);

        for record in reader.records() {
            rows += 1;

            if rows % options.progress_interval == 0 {
                progress.on_progress_update(rows as i64, total_rows, &format!("processed {rows} rows"));
            }

            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    skipped += 1;
                    (environment.logger)(&format!("skipping row {rows}: '{err}'"));
                    continue;
                }
            };

            if options.sampling_rate < 1. && !environment.random.is_hit(options.sampling_rate) {
                continue;
            }

            let tokens = record.iter().collect::<Vec<_>>();

            match create_vector(tokens.as_slice(), &mapping, options) {
                Ok(vector) => batch.push(vector),
                Err(err) => {
                    skipped += 1;
                    (environment.logger)(&format!("skipping row {rows}: '{err}'"));
                }
            }

            if batch.len() >= options.batch_size {
                move_batch(&mut dataset, &mut batch, rows, total_rows, progress);
            }
        }

        if !batch.is_empty() {
            move_batch(&mut dataset, &mut batch, rows, total_rows, progress);
        }

        progress.on_progress_update(rows as i64, total_rows.max(rows as i64), &format!("processed {rows} rows"));
        progress.on_operation_complete(
            "Data loading",
            true,
            &format!("loaded {} vectors from {rows} rows, skipped {skipped}", dataset.len()),
        );

        Ok(dataset)
    }

    /// Moves accumulated vectors into the dataset and reports memory held by loaded vectors
    /// together with its projection to the whole input.
    fn move_batch(
        dataset: &mut Vec<Vector>,
        batch: &mut Vec<Vector>,
        rows: usize,
        total_rows: i64,
        progress: &dyn ProgressListener,
    ) {
        dataset.append(batch);

        let used = estimate_memory_mb(dataset);
        let projected = match total_rows {
            total if rows > 0 && total > rows as i64 => used * total as u64 / rows as u64,
            _ => used,
        };

        progress.on_memory_usage(used, projected);
    }
}

#[cfg(not(feature = "csv-format"))]
mod actual {
    use crate::extensions::import::ImportOptions;
    use som_core::prelude::*;
    use std::io::{BufReader, Read};

    /// A stub method for reading a dataset from csv format.
    pub fn read_csv_dataset<R: Read>(
        _reader: BufReader<R>,
        _options: &ImportOptions,
        _total_rows: i64,
        _environment: &Environment,
        _progress: &dyn ProgressListener,
    ) -> Result<Vec<Vector>, String> {
        Err("csv-format feature is not included".to_string())
    }
}
