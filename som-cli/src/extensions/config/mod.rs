//! Training configuration read from a json file.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/config/config_test.rs"]
mod config_test;

use crate::extensions::import::ImportOptions;
use serde::Deserialize;
use som_core::prelude::*;
use std::io::{BufReader, Read};

/// Default bounds of the interval around the mean vector.
pub const DEFAULT_BOUND: Float = 0.1;

/// A training run configuration, all fields are optional.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Specifies training loop parameters.
    pub training: Option<TrainingSettings>,
    /// Specifies prototype initialization parameters.
    pub initialization: Option<InitializationSettings>,
    /// Specifies data ingestion parameters.
    pub ingestion: Option<IngestionSettings>,
    /// Specifies a random seed for reproducible runs.
    pub seed: Option<u64>,
}

/// Training loop parameters.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSettings {
    /// Learning rate of the first iteration.
    pub initial_learning_rate: Option<Float>,
    /// Learning rate floor.
    pub final_learning_rate: Option<Float>,
    /// Neighborhood radii used by the ordering phase thirds.
    pub radii: Option<[i32; 3]>,
    /// Amount of iterations per dataset vector.
    pub iteration_factor: Option<usize>,
    /// A share of iterations in the ordering phase.
    pub ordering_phase_ratio: Option<Float>,
    /// Minimal grid size to process distances in parallel.
    pub parallel_threshold: Option<usize>,
    /// How often progress is reported.
    pub progress_interval: Option<usize>,
}

/// Prototype initialization parameters.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializationSettings {
    /// Distance above the mean vector.
    pub upper_bound: Option<Float>,
    /// Distance below the mean vector.
    pub lower_bound: Option<Float>,
}

/// Data ingestion parameters.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionSettings {
    /// Amount of vectors per batch.
    pub batch_size: Option<usize>,
    /// A probability to keep a record.
    pub sampling_rate: Option<Float>,
    /// A value used for features which cannot be parsed.
    pub default_value: Option<Float>,
    /// Skip records with unparsable features.
    pub strict: Option<bool>,
}

/// Reads config from a json reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> Result<Config, String> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'"))
}

/// Creates training parameters from config, unset values keep their defaults.
pub fn create_training_config(config: &Config) -> Result<TrainingConfig, String> {
    let defaults = TrainingConfig::default();

    let training = match &config.training {
        Some(settings) => TrainingConfig {
            initial_learning_rate: settings.initial_learning_rate.unwrap_or(defaults.initial_learning_rate),
            final_learning_rate: settings.final_learning_rate.unwrap_or(defaults.final_learning_rate),
            radii: settings.radii.unwrap_or(defaults.radii),
            iteration_factor: settings.iteration_factor.unwrap_or(defaults.iteration_factor),
            ordering_phase_ratio: settings.ordering_phase_ratio.unwrap_or(defaults.ordering_phase_ratio),
            parallel_threshold: settings.parallel_threshold.unwrap_or(defaults.parallel_threshold),
            progress_interval: settings.progress_interval.unwrap_or(defaults.progress_interval),
            ..defaults
        },
        None => defaults,
    };

    training.validate().map_err(|err| format!("invalid training config: {err}"))?;

    Ok(training)
}

/// Creates import options from config.
pub fn create_import_options(config: &Config) -> ImportOptions {
    let defaults = ImportOptions::default();

    match &config.ingestion {
        Some(settings) => ImportOptions {
            batch_size: settings.batch_size.unwrap_or(defaults.batch_size),
            sampling_rate: settings.sampling_rate.unwrap_or(defaults.sampling_rate),
            default_value: settings.default_value.unwrap_or(defaults.default_value),
            is_strict: settings.strict.unwrap_or(defaults.is_strict),
            ..defaults
        },
        None => defaults,
    }
}

/// Returns `(upper, lower)` bounds of the interval around the mean vector.
pub fn get_bounds(config: &Config) -> (Float, Float) {
    let settings = config.initialization.clone().unwrap_or_default();

    (settings.upper_bound.unwrap_or(DEFAULT_BOUND), settings.lower_bound.unwrap_or(DEFAULT_BOUND))
}
