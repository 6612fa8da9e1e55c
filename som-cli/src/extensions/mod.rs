//! Module provides various helper functionality.

pub mod config;
pub mod display;
pub mod import;
pub mod progress;
