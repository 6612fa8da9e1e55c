#[cfg(test)]
#[path = "../../../tests/unit/algorithms/som/neighborhood_test.rs"]
mod neighborhood_test;

use super::Grid;
use crate::models::Coordinate;
use crate::utils::{SomError, SomResult};

/// Prototypes within a manhattan radius of a center, laid out into their minimal bounding box.
/// Cells which are inside the box but outside of the radius stay empty.
#[derive(Clone, Debug)]
pub struct Neighborhood {
    center: Coordinate,
    origin: Coordinate,
    rows: usize,
    columns: usize,
    cells: Vec<Option<Coordinate>>,
}

impl Neighborhood {
    /// Calculates the neighborhood of the center prototype within the grid.
    pub fn new(grid: &Grid, center: &Coordinate, radius: i32) -> SomResult<Self> {
        if radius < 0 {
            return Err(SomError::invalid_argument(format!("radius cannot be negative: {radius}")));
        }

        if !grid.contains(center) {
            return Err(SomError::invalid_argument(format!("center {center} is outside of the grid")));
        }

        let mut members = grid
            .iter()
            .map(|prototype| prototype.coordinate())
            .filter(|coordinate| coordinate.manhattan(center) <= radius as usize)
            .collect::<Vec<_>>();

        if members.is_empty() {
            members.push(*center);
        }

        let ((x_min, x_max), (y_min, y_max)) = members.iter().fold(
            ((usize::MAX, usize::MIN), (usize::MAX, usize::MIN)),
            |((x_min, x_max), (y_min, y_max)), Coordinate(x, y)| {
                ((x_min.min(*x), x_max.max(*x)), (y_min.min(*y), y_max.max(*y)))
            },
        );

        let rows = x_max - x_min + 1;
        let columns = y_max - y_min + 1;

        let mut cells = vec![None; rows * columns];
        members.into_iter().for_each(|coordinate| {
            cells[(coordinate.0 - x_min) * columns + (coordinate.1 - y_min)] = Some(coordinate);
        });

        Ok(Self { center: *center, origin: Coordinate(x_min, y_min), rows, columns, cells })
    }

    /// Returns the center of the neighborhood.
    pub fn center(&self) -> Coordinate {
        self.center
    }

    /// Returns the grid coordinate of the bounding box top-left cell.
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Returns amount of rows in the bounding box.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns amount of columns in the bounding box.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns a member at the box-relative offset, `None` for absent cells.
    pub fn get(&self, dx: usize, dy: usize) -> Option<Coordinate> {
        if dx < self.rows && dy < self.columns { self.cells[dx * self.columns + dy] } else { None }
    }

    /// Checks whether the bounding box covers the coordinate.
    pub fn bounds(&self, coordinate: &Coordinate) -> bool {
        (self.origin.0..self.origin.0 + self.rows).contains(&coordinate.0)
            && (self.origin.1..self.origin.1 + self.columns).contains(&coordinate.1)
    }

    /// Checks whether the coordinate is a member of the neighborhood.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.bounds(coordinate) && self.get(coordinate.0 - self.origin.0, coordinate.1 - self.origin.1).is_some()
    }

    /// Iterates over members skipping absent cells.
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells.iter().filter_map(|cell| *cell)
    }

    /// Returns amount of members.
    pub fn size(&self) -> usize {
        self.iter().count()
    }
}
