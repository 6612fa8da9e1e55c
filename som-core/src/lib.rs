//! This crate provides a training engine for Kohonen self-organizing maps: a fixed rectangular
//! grid of prototypes is initialized around the data mean, trained with an annealed competitive
//! learning loop and, finally, labeled from the original data.
//!
//! A typical run:
//!
//! ```no_run
//! use som_core::prelude::*;
//! use std::sync::Arc;
//!
//! # fn load() -> Vec<Vector> { unimplemented!() }
//! let dataset: Vec<Vector> = load();
//! let environment = Environment::new_with_seed(42, Arc::new(|msg: &str| println!("{msg}")));
//!
//! let mut trainer = Trainer::new(dataset, TrainingConfig::default(), environment, create_noop_progress())?;
//! let report = trainer.run(0.1, 0.1, OrderingMode::Randomized)?;
//!
//! report.counts.iter().for_each(|entry| println!("{} = {}", entry.label, entry.count));
//! # Ok::<(), SomError>(())
//! ```

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

#[cfg(test)]
#[path = "../tests/features/mod.rs"]
mod features;

pub mod algorithms;
pub mod models;
pub mod prelude;
pub mod telemetry;
pub mod utils;
