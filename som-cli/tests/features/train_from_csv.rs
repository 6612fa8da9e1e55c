use crate::extensions::config::*;
use crate::extensions::display::*;
use crate::extensions::import::*;
use crate::helpers::{CONFIG_PATH, RecordingProgress, THREE_CLASSES_PATH, create_test_environment};
use som_core::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

#[test]
fn can_import_train_and_report() {
    let environment = create_test_environment();
    let progress = Arc::new(RecordingProgress::default());

    let dataset = import_dataset(THREE_CLASSES_PATH, &ImportOptions::default(), &environment, progress.as_ref()).unwrap();
    let mut trainer = Trainer::new(dataset, TrainingConfig::default(), environment, progress.clone()).unwrap();
    let report = trainer.run(0.1, 0.1, OrderingMode::Randomized).unwrap();
    let grid = trainer.grid().unwrap();

    assert_eq!(report.counts.iter().map(|entry| entry.count).sum::<usize>(), grid.size());
    assert!(report.mapping.iter().all(|entry| ["setosa", "versicolor", "virginica"].contains(&entry.original.as_str())));
    assert!(!progress.memory.lock().unwrap().is_empty());

    let mut buffer = Vec::new();
    write_report(&mut buffer, &report, grid).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(text.lines().filter(|line| line.starts_with("[")).count(), grid.rows());
}

#[test]
fn can_apply_config_to_run() {
    let config = read_config(BufReader::new(File::open(CONFIG_PATH).unwrap())).unwrap();
    let environment = Environment::silent(Arc::new(DefaultRandom::new_with_seed(config.seed.unwrap())));
    let (upper, lower) = get_bounds(&config);

    let dataset =
        import_dataset(THREE_CLASSES_PATH, &create_import_options(&config), &environment, &NoopProgress).unwrap();
    let training = create_training_config(&config).unwrap();
    let mut trainer = Trainer::new(dataset, training, environment, create_noop_progress()).unwrap();

    let report = trainer.run(upper, lower, OrderingMode::Sequential).unwrap();

    assert_eq!(report.iterations, 60);
    assert_eq!(trainer.state(), TrainerState::Done);
}
