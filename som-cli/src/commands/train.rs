#[cfg(test)]
#[path = "../../tests/unit/commands/train_test.rs"]
mod train_test;

use super::*;
use clap::{Arg, ArgAction, Command};
use som_cli::extensions::config::*;
use som_cli::extensions::display::*;
use som_cli::extensions::import::import_dataset;
use som_cli::extensions::progress::ConsoleProgressListener;
use som_core::prelude::*;
use std::io::{BufReader, stderr};
use std::sync::Arc;

const INPUT_ARG_NAME: &str = "INPUT";
const UPPER_BOUND_ARG_NAME: &str = "upper-bound";
const LOWER_BOUND_ARG_NAME: &str = "lower-bound";
const MODE_ARG_NAME: &str = "mode";
const SEED_ARG_NAME: &str = "seed";
const CONFIG_ARG_NAME: &str = "config";
const SAMPLING_RATE_ARG_NAME: &str = "sampling-rate";
const BATCH_SIZE_ARG_NAME: &str = "batch-size";
const STRICT_ARG_NAME: &str = "strict";
const LOG_ARG_NAME: &str = "log";

pub fn get_train_app() -> Command {
    Command::new("train")
        .about("Trains a self-organizing map on a csv dataset and prints the labeled grid")
        .arg(Arg::new(INPUT_ARG_NAME).help("Sets path to the csv file with id, features and label columns").required(true).index(1))
        .arg(
            Arg::new(UPPER_BOUND_ARG_NAME)
                .help("Specifies distance above the mean vector for initial prototypes, default is 0.1")
                .short('u')
                .long(UPPER_BOUND_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(LOWER_BOUND_ARG_NAME)
                .help("Specifies distance below the mean vector for initial prototypes, default is 0.1")
                .short('d')
                .long(LOWER_BOUND_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(MODE_ARG_NAME)
                .help("Specifies in which order vectors are presented within an iteration")
                .short('m')
                .long(MODE_ARG_NAME)
                .required(false)
                .value_parser(["sequential", "random"])
                .default_value("sequential"),
        )
        .arg(Arg::new(SEED_ARG_NAME).help("Specifies a random seed for reproducible runs").short('s').long(SEED_ARG_NAME).required(false))
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Specifies path to a json config, command line arguments override its values")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(SAMPLING_RATE_ARG_NAME)
                .help("Specifies a probability to keep a data row, in (0, 1]")
                .long(SAMPLING_RATE_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(BATCH_SIZE_ARG_NAME)
                .help("Specifies amount of rows loaded per batch")
                .long(BATCH_SIZE_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(STRICT_ARG_NAME)
                .help("Skips rows with unparsable features instead of using a default value")
                .long(STRICT_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(LOG_ARG_NAME)
                .help("Specifies whether progress and phase summaries are written to stderr")
                .short('l')
                .long(LOG_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
}

pub fn run_train<W: Write>(matches: &ArgMatches, out: &mut W) -> Result<(), String> {
    let input = matches.get_one::<String>(INPUT_ARG_NAME).ok_or_else(|| "input file is not specified".to_string())?;

    let config = match matches.get_one::<String>(CONFIG_ARG_NAME) {
        Some(path) => read_config(BufReader::new(open_file(path, "config")?))?,
        None => Config::default(),
    };

    let (default_upper, default_lower) = get_bounds(&config);
    let upper = parse_float_value::<Float>(matches, UPPER_BOUND_ARG_NAME, "upper bound")?.unwrap_or(default_upper);
    let lower = parse_float_value::<Float>(matches, LOWER_BOUND_ARG_NAME, "lower bound")?.unwrap_or(default_lower);
    let seed = parse_int_value::<u64>(matches, SEED_ARG_NAME, "random seed")?.or(config.seed);

    let mode = match matches.get_one::<String>(MODE_ARG_NAME).map(String::as_str) {
        Some("random") => OrderingMode::Randomized,
        _ => OrderingMode::Sequential,
    };

    let training_config = create_training_config(&config)?;

    let mut import_options = create_import_options(&config);
    import_options.progress_interval = training_config.progress_interval;
    if let Some(sampling_rate) = parse_float_value::<Float>(matches, SAMPLING_RATE_ARG_NAME, "sampling rate")? {
        import_options.sampling_rate = sampling_rate;
    }
    if let Some(batch_size) = parse_int_value::<usize>(matches, BATCH_SIZE_ARG_NAME, "batch size")? {
        import_options.batch_size = batch_size;
    }
    if matches.get_flag(STRICT_ARG_NAME) {
        import_options.is_strict = true;
    }

    let is_logging = matches.get_flag(LOG_ARG_NAME);
    let logger: InfoLogger = if is_logging { Arc::new(|msg: &str| eprintln!("{msg}")) } else { Arc::new(|_: &str| {}) };
    let progress: Arc<dyn ProgressListener> =
        if is_logging { Arc::new(ConsoleProgressListener::new(Box::new(stderr()))) } else { create_noop_progress() };
    let random: Arc<dyn Random + Send + Sync> = Arc::new(seed.map(DefaultRandom::new_with_seed).unwrap_or_default());
    let environment = Environment::new(random.clone(), logger);

    let dataset = import_dataset(input, &import_options, &environment, progress.as_ref())?;
    if dataset.is_empty() {
        return Err(format!("no valid data points loaded from '{input}'"));
    }

    let write_error = |err: std::io::Error| format!("cannot write output: '{err}'");

    writeln!(out, "Data Information:\n{}", format_data_info(&dataset)).map_err(write_error)?;
    writeln!(out, "\nRandom sample of data points:").map_err(write_error)?;
    sample_vectors(&dataset, SAMPLE_SIZE, random.as_ref())
        .into_iter()
        .try_for_each(|vector| writeln!(out, "{vector}"))
        .map_err(write_error)?;

    let mut trainer = Trainer::new(dataset, training_config, environment, progress).map_err(|err| err.to_string())?;
    let report = trainer.run(upper, lower, mode).map_err(|err| format!("cannot train map: {err}"))?;

    if let Some(mean) = trainer.mean_vector() {
        writeln!(out, "\nMean vector: {mean}").map_err(write_error)?;
    }

    let grid = trainer.grid().ok_or_else(|| "grid is not generated".to_string())?;
    write_report(out, &report, grid).map_err(write_error)?;

    out.flush().map_err(write_error)
}
