use crate::utils::{DISTANCE_TOLERANCE, Float, SomError, SomResult};

/// Specifies in which order dataset vectors are presented to the map within an iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderingMode {
    /// Vectors are processed in the dataset order.
    #[default]
    Sequential,
    /// Vectors are processed in a permutation which is shuffled once and reused by every iteration.
    Randomized,
}

/// Training parameters.
#[derive(Clone, Debug)]
pub struct TrainingConfig {
    /// Learning rate used in the first iteration.
    pub initial_learning_rate: Float,
    /// Learning rate floor.
    pub final_learning_rate: Float,
    /// Neighborhood radii of the ordering phase thirds, the last one is kept in the tuning phase.
    pub radii: [i32; 3],
    /// Amount of iterations per dataset vector.
    pub iteration_factor: usize,
    /// A share of iterations which belongs to the ordering phase.
    pub ordering_phase_ratio: Float,
    /// Minimal grid size to calculate distances in parallel.
    pub parallel_threshold: usize,
    /// How often sequential passes report progress.
    pub progress_interval: usize,
    /// Two distances closer than this value are considered equal.
    pub tie_tolerance: Float,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            initial_learning_rate: 0.7,
            final_learning_rate: 0.07,
            radii: [3, 2, 1],
            iteration_factor: 5,
            ordering_phase_ratio: 0.2,
            parallel_threshold: 1000,
            progress_interval: 100,
            tie_tolerance: DISTANCE_TOLERANCE,
        }
    }
}

impl TrainingConfig {
    /// Validates parameters.
    pub fn validate(&self) -> SomResult<()> {
        let is_rate = |rate: Float| (0. ..=1.).contains(&rate);

        if !is_rate(self.initial_learning_rate) || !is_rate(self.final_learning_rate) {
            return Err(SomError::invalid_argument("learning rates must be in [0, 1]"));
        }

        if self.final_learning_rate > self.initial_learning_rate {
            return Err(SomError::invalid_argument("final learning rate cannot exceed the initial one"));
        }

        if self.radii.iter().any(|&radius| radius < 0) {
            return Err(SomError::invalid_argument("radius cannot be negative"));
        }

        if self.iteration_factor == 0 {
            return Err(SomError::invalid_argument("iteration factor must be positive"));
        }

        if !is_rate(self.ordering_phase_ratio) {
            return Err(SomError::invalid_argument("ordering phase ratio must be in [0, 1]"));
        }

        if self.progress_interval == 0 {
            return Err(SomError::invalid_argument("progress interval must be positive"));
        }

        if self.tie_tolerance.is_nan() || self.tie_tolerance < 0. {
            return Err(SomError::invalid_argument("tie tolerance cannot be negative"));
        }

        Ok(())
    }
}
