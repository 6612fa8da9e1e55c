#[cfg(test)]
#[path = "../../../tests/unit/algorithms/som/grid_test.rs"]
mod grid_test;

use crate::models::{Coordinate, Prototype, Vector};
use crate::utils::{SomError, SomResult};

/// Amount of columns in every grid.
pub const GRID_COLUMNS: usize = 10;

/// Returns amount of prototypes for a dataset of the given size: `5 * sqrt(n)` rounded down to
/// the nearest multiple of `GRID_COLUMNS`.
pub fn estimate_prototype_count(dataset_size: usize) -> usize {
    let count = (5. * (dataset_size as f64).sqrt()) as usize;

    count - count % GRID_COLUMNS
}

/// A rectangular matrix of prototypes stored row by row.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: Vec<Vec<Prototype>>,
    dimension: usize,
}

impl Grid {
    /// Creates a grid laying vectors row-major into `len / GRID_COLUMNS` rows. Vectors which do
    /// not fill a complete row are ignored.
    pub fn new(vectors: &[Vector]) -> SomResult<Self> {
        let row_count = vectors.len() / GRID_COLUMNS;
        if row_count == 0 {
            return Err(SomError::illegal_state(format!(
                "at least {GRID_COLUMNS} prototype vectors are required to build a grid, got {}",
                vectors.len()
            )));
        }

        let dimension = vectors[0].dimension();

        let rows = vectors
            .chunks_exact(GRID_COLUMNS)
            .enumerate()
            .map(|(x, chunk)| {
                chunk
                    .iter()
                    .enumerate()
                    .map(|(y, weights)| {
                        if weights.dimension() != dimension {
                            return Err(SomError::DimensionMismatch { expected: dimension, actual: weights.dimension() });
                        }

                        Prototype::new(weights.clone(), Coordinate(x, y), 0.)
                    })
                    .collect::<SomResult<Vec<_>>>()
            })
            .collect::<SomResult<Vec<_>>>()?;

        Ok(Self { rows, dimension })
    }

    /// Returns amount of rows.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns amount of columns.
    pub fn columns(&self) -> usize {
        GRID_COLUMNS
    }

    /// Returns total amount of prototypes.
    pub fn size(&self) -> usize {
        self.rows() * self.columns()
    }

    /// Returns dimension of prototype weights.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Checks whether coordinate lies inside the grid.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        coordinate.0 < self.rows() && coordinate.1 < self.columns()
    }

    /// Returns a prototype at the given coordinate.
    pub fn get(&self, coordinate: &Coordinate) -> Option<&Prototype> {
        self.rows.get(coordinate.0).and_then(|row| row.get(coordinate.1))
    }

    /// Returns a mutable prototype at the given coordinate.
    pub fn get_mut(&mut self, coordinate: &Coordinate) -> Option<&mut Prototype> {
        self.rows.get_mut(coordinate.0).and_then(|row| row.get_mut(coordinate.1))
    }

    /// Iterates over prototypes in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Prototype> + '_ {
        self.rows.iter().flat_map(|row| row.iter())
    }

    /// Iterates mutably over prototypes in row-major order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Prototype> + '_ {
        self.rows.iter_mut().flat_map(|row| row.iter_mut())
    }

    /// Returns grid rows.
    pub fn row_slices(&self) -> &[Vec<Prototype>] {
        self.rows.as_slice()
    }

    /// Returns mutable grid rows. Rows are disjoint, so they can be processed independently.
    pub fn row_slices_mut(&mut self) -> &mut [Vec<Prototype>] {
        self.rows.as_mut_slice()
    }

    /// Returns labels laid out as the grid.
    pub fn labels(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(|row| row.iter().map(|prototype| prototype.label().to_string()).collect()).collect()
    }
}
