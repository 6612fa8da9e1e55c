use super::actual::create_vector;
use super::*;
use crate::extensions::import::ImportOptions;
use crate::helpers::{RecordingProgress, create_capturing_environment, create_test_environment};
use som_core::prelude::*;
use std::io::BufReader;

const IRIS_CSV: &str = r"id,sepal_length,sepal_width,petal_length,petal_width,class
1,5.1,3.5,1.4,0.2,Iris-setosa
2,7.0,3.2,4.7,1.4,Iris-versicolor
3,6.3,3.3,6.0,2.5,Iris-virginica
";

fn read(csv: &str, options: &ImportOptions) -> Vec<Vector> {
    read_csv_dataset(BufReader::new(csv.as_bytes()), options, -1, &create_test_environment(), &NoopProgress).unwrap()
}

#[test]
fn can_read_dataset_with_default_mapping() {
    let dataset = read(IRIS_CSV, &ImportOptions::default());

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset[0].features(), &[5.1, 3.5, 1.4, 0.2]);
    assert_eq!(dataset[0].label(), "Iris-setosa");
    assert_eq!(dataset[2].label(), "Iris-virginica");
}

#[test]
fn can_use_default_value_for_unparsable_feature() {
    let csv = "id,a,b,class\n1,0.5,abc,x\n2,,0.25,y\n";
    let options = ImportOptions { default_value: -1., ..ImportOptions::default() };

    let dataset = read(csv, &options);

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset[0].features(), &[0.5, -1.]);
    assert_eq!(dataset[1].features(), &[-1., 0.25]);
}

#[test]
fn can_skip_short_rows_and_log_them() {
    let csv = "id,a,b,class\n1,0.5,0.1,x\n2,0.3\n3,0.1,0.2,y\n";
    let (environment, messages) = create_capturing_environment();
    let progress = RecordingProgress::default();

    let dataset = read_csv_dataset(BufReader::new(csv.as_bytes()), &ImportOptions::default(), 3, &environment, &progress)
        .unwrap();

    assert_eq!(dataset.iter().map(|vector| vector.label()).collect::<Vec<_>>(), vec!["x", "y"]);
    let messages = messages.lock().unwrap().clone();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("skipping row 2: "));
    assert_eq!(progress.completions.lock().unwrap().clone(), vec!["loaded 2 vectors from 3 rows, skipped 1"]);
}

#[test]
fn can_skip_unparsable_rows_in_strict_mode() {
    let csv = "id,a,b,class\n1,0.5,abc,x\n2,0.3,0.2,y\n";
    let options = ImportOptions { is_strict: true, ..ImportOptions::default() };

    let dataset = read(csv, &options);

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset[0].label(), "y");
}

#[test]
fn can_handle_non_finite_values() {
    let csv = "id,a,b,class\n1,NaN,0.1,x\n2,0.3,inf,y\n3,0.3,0.2,z\n";

    let flexible = read(csv, &ImportOptions { default_value: -1., ..ImportOptions::default() });
    let strict = read(csv, &ImportOptions { is_strict: true, ..ImportOptions::default() });

    assert_eq!(flexible.iter().map(|vector| vector.to_features()).collect::<Vec<_>>(), vec![
        vec![-1., 0.1],
        vec![0.3, -1.],
        vec![0.3, 0.2]
    ]);
    assert_eq!(strict.iter().map(|vector| vector.label()).collect::<Vec<_>>(), vec!["z"]);
}

#[test]
fn can_use_explicit_mapping() {
    let csv = "class,a,b\nx,0.5,0.1\ny,0.3,0.2\n";
    let options =
        ImportOptions { mapping: Some(ColumnMapping::new(vec![2, 1], Some(0)).unwrap()), ..ImportOptions::default() };

    let dataset = read(csv, &options);

    assert_eq!(dataset[0].features(), &[0.1, 0.5]);
    assert_eq!(dataset[1].label(), "y");
}

parameterized_test! {can_create_vector_from_record, (tokens, is_strict, expected), {
    let mapping = ColumnMapping::new(vec![1, 2], Some(3)).unwrap();
    let options = ImportOptions { is_strict, ..ImportOptions::default() };

    let result = create_vector(tokens.as_slice(), &mapping, &options).map(|vector| vector.to_features());

    assert_eq!(result.is_ok(), expected.is_some());
    if let Some(expected) = expected {
        assert_eq!(result.unwrap(), expected);
    }
}}

can_create_vector_from_record! {
    case01_flexible: (vec!["1", "0.5", "0.1", "x"], false, Some(vec![0.5, 0.1])),
    case02_flexible_fallback: (vec!["1", "?", "0.1", "x"], false, Some(vec![0., 0.1])),
    case03_strict: (vec!["1", "0.5", "0.1", "x"], true, Some(vec![0.5, 0.1])),
    case04_strict_failure: (vec!["1", "?", "0.1", "x"], true, None::<Vec<Float>>),
    case05_short_flexible: (vec!["1", "0.5"], false, None::<Vec<Float>>),
    case06_short_strict: (vec!["1", "0.5", "0.1"], true, None::<Vec<Float>>),
    case07_flexible_nan: (vec!["1", "NaN", "0.1", "x"], false, Some(vec![0., 0.1])),
    case08_flexible_infinite: (vec!["1", "0.5", "-inf", "x"], false, Some(vec![0.5, 0.])),
    case09_strict_nan: (vec!["1", "NaN", "0.1", "x"], true, None::<Vec<Float>>),
}

#[test]
fn can_keep_all_rows_with_full_sampling_rate() {
    let options = ImportOptions { sampling_rate: 1., ..ImportOptions::default() };

    assert_eq!(read(IRIS_CSV, &options).len(), 3);
}

#[test]
fn can_subsample_rows() {
    let csv = std::iter::once("id,a,class".to_string())
        .chain((0..1000).map(|idx| format!("{idx},{idx},x")))
        .collect::<Vec<_>>()
        .join("\n");
    let options = ImportOptions { sampling_rate: 0.3, ..ImportOptions::default() };

    let size = read(csv.as_str(), &options).len();

    assert!(size > 200 && size < 400, "unexpected size: {size}");
}

parameterized_test! {cannot_read_with_invalid_options, options, {
    let result = read_csv_dataset(BufReader::new(IRIS_CSV.as_bytes()), &options, -1, &create_test_environment(), &NoopProgress);

    assert!(result.is_err());
}}

cannot_read_with_invalid_options! {
    case01_zero_sampling: ImportOptions { sampling_rate: 0., ..ImportOptions::default() },
    case02_big_sampling: ImportOptions { sampling_rate: 1.5, ..ImportOptions::default() },
    case03_zero_batch: ImportOptions { batch_size: 0, ..ImportOptions::default() },
}

#[test]
fn cannot_read_without_feature_columns() {
    let result = read_csv_dataset(
        BufReader::new("id,class\n1,x\n".as_bytes()),
        &ImportOptions::default(),
        -1,
        &create_test_environment(),
        &NoopProgress,
    );

    assert!(result.is_err());
}

#[test]
fn can_report_memory_per_batch() {
    let csv = std::iter::once("id,a,b,class".to_string())
        .chain((0..25).map(|idx| format!("{idx},0.1,0.2,x")))
        .collect::<Vec<_>>()
        .join("\n");
    let options = ImportOptions { batch_size: 10, progress_interval: 5, ..ImportOptions::default() };
    let progress = RecordingProgress::default();

    let dataset =
        read_csv_dataset(BufReader::new(csv.as_bytes()), &options, 25, &create_test_environment(), &progress).unwrap();

    assert_eq!(dataset.len(), 25);
    assert_eq!(progress.memory.lock().unwrap().len(), 3);
    assert_eq!(
        progress.updates.lock().unwrap().clone(),
        vec![(5, 25), (10, 25), (15, 25), (20, 25), (25, 25), (25, 25)]
    );
}
