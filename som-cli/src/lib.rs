//! A command line interface library for training self-organizing maps on csv datasets.
//!
//! It provides data ingestion, configuration and console reporting helpers which are used by
//! the `som` binary on top of `som_core`.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
mod helpers;

#[cfg(test)]
#[path = "../tests/features/mod.rs"]
mod features;

pub mod extensions;
