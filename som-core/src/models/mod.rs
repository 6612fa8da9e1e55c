//! Contains the data model of the map: feature vectors and grid prototypes.

mod vector;
pub use self::vector::*;

mod prototype;
pub use self::prototype::*;
