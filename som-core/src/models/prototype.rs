#[cfg(test)]
#[path = "../../tests/unit/models/prototype_test.rs"]
mod prototype_test;

use crate::models::Vector;
use crate::utils::{Float, SomError, SomResult, ensure_dimension};
use std::fmt::{Display, Formatter};

/// Coordinate of the prototype in the grid: `x` is a row, `y` is a column.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Coordinate(pub usize, pub usize);

impl Coordinate {
    /// Returns manhattan distance to another coordinate.
    pub fn manhattan(&self, other: &Coordinate) -> usize {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

/// Represents a grid cell: a weight vector, its fixed position and a class label.
#[derive(Clone, Debug)]
pub struct Prototype {
    weights: Vector,
    coordinate: Coordinate,
    distance: Float,
    label: String,
}

impl Prototype {
    /// Creates a new instance of `Prototype`.
    pub fn new(weights: Vector, coordinate: Coordinate, distance: Float) -> SomResult<Self> {
        let mut prototype = Self { weights, coordinate, distance: 0., label: String::new() };
        prototype.set_distance(distance)?;

        Ok(prototype)
    }

    /// Returns the weight vector.
    pub fn weights(&self) -> &Vector {
        &self.weights
    }

    /// Returns grid coordinate.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Returns the distance cached by the last `calculate_distance` call.
    pub fn distance(&self) -> Float {
        self.distance
    }

    /// Sets the cached distance, negative (or NaN) values are rejected.
    pub fn set_distance(&mut self, distance: Float) -> SomResult<()> {
        if distance.is_nan() || distance < 0. {
            return Err(SomError::invalid_argument(format!("distance cannot be negative: {distance}")));
        }

        self.distance = distance;

        Ok(())
    }

    /// Returns the class label, empty until labeling.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Sets the class label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Calculates and caches euclidean distance to the input vector.
    pub fn calculate_distance(&mut self, input: &Vector) -> SomResult<Float> {
        let distance = self.weights.distance(input)?;
        self.distance = distance;

        Ok(distance)
    }

    /// Returns weights moved toward the input: `w' = w + rate * (v - w)`.
    pub fn adapted_weights(&self, input: &Vector, learning_rate: Float) -> SomResult<Vector> {
        if !(0. ..=1.).contains(&learning_rate) {
            return Err(SomError::invalid_argument(format!("learning rate must be in [0, 1], got {learning_rate}")));
        }

        ensure_dimension(self.weights.dimension(), input.dimension())?;

        let weights = self
            .weights
            .features()
            .iter()
            .zip(input.features().iter())
            // NOTE convex form keeps exact bounds: rate 0 returns `w`, rate 1 returns `v`
            .map(|(weight, value)| (1. - learning_rate) * weight + learning_rate * value)
            .collect();

        Vector::new(weights, self.weights.label())
    }

    /// Replaces the weight vector with the one adapted toward the input.
    pub fn update_weights(&mut self, input: &Vector, learning_rate: Float) -> SomResult<()> {
        self.weights = self.adapted_weights(input, learning_rate)?;

        Ok(())
    }

    /// Returns manhattan distance between grid coordinates.
    pub fn grid_distance(&self, other: &Prototype) -> usize {
        self.coordinate.manhattan(&other.coordinate)
    }

    /// Checks whether other prototype is within the given radius on the grid.
    pub fn is_neighbor(&self, other: &Prototype, radius: i32) -> SomResult<bool> {
        is_within_radius(&self.coordinate, &other.coordinate, radius)
    }
}

impl Display for Prototype {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.label)
    }
}

/// Checks whether two coordinates are within the given manhattan radius.
fn is_within_radius(a: &Coordinate, b: &Coordinate, radius: i32) -> SomResult<bool> {
    if radius < 0 {
        return Err(SomError::invalid_argument(format!("radius cannot be negative: {radius}")));
    }

    Ok(a.manhattan(b) <= radius as usize)
}
