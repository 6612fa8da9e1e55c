//! Provides an implementation of the Kohonen self-organizing map with a fixed rectangular grid.

mod config;
pub use self::config::*;

mod grid;
pub use self::grid::*;

mod labeling;
pub use self::labeling::*;

mod neighborhood;
pub use self::neighborhood::*;

mod schedule;
pub use self::schedule::*;

mod trainer;
pub use self::trainer::*;
