//! A command line interface to train *Self-Organizing Maps* on csv datasets.
//!
//! ## Usage
//!
//! - train a map on a dataset where the first column is an identifier and the last one is a label
//!
//!     `som train iris.csv --upper-bound 0.1 --lower-bound 0.1 --mode random --seed 42`
//!
//! - use a json config and report progress to stderr
//!
//!     `som train iris.csv --config config.json --log`
//!
//! For more details, simply run
//!
//!     som --help

#[cfg(test)]
#[path = "../tests/helpers/macros.rs"]
#[macro_use]
mod macros;

mod commands;

#[cfg(test)]
#[path = "../tests/unit/main_test.rs"]
mod main_test;

fn main() {
    let matches = cli::get_app().get_matches();
    cli::run_subcommand(matches);
}

mod cli {
    use super::commands::create_write_buffer;
    use super::commands::train::{get_train_app, run_train};
    use clap::{ArgMatches, Command};
    use std::process;

    pub fn get_app() -> Command {
        Command::new("Self-Organizing Map Trainer")
            .version(env!("CARGO_PKG_VERSION"))
            .about("A command line interface to train Kohonen self-organizing maps")
            .subcommand(get_train_app())
    }

    pub fn run_subcommand(arg_matches: ArgMatches) {
        let result = match arg_matches.subcommand() {
            Some(("train", train_matches)) => run_train(train_matches, &mut create_write_buffer()),
            _ => Err("no subcommand was used. Use -h to print help information.".to_string()),
        };

        if let Err(err) = result {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
