//! This module contains the map training algorithms.

pub mod som;
