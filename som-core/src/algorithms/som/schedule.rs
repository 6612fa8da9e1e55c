#[cfg(test)]
#[path = "../../../tests/unit/algorithms/som/schedule_test.rs"]
mod schedule_test;

use super::TrainingConfig;
use crate::utils::Float;

/// Linearly decays the learning rate toward a floor, the rate is never raised back.
#[derive(Clone, Debug)]
pub struct LearningSchedule {
    initial: Float,
    floor: Float,
    total_iterations: usize,
    current: Float,
}

impl LearningSchedule {
    /// Creates a new instance of `LearningSchedule`.
    pub fn new(initial: Float, floor: Float, total_iterations: usize) -> Self {
        Self { initial, floor, total_iterations, current: initial }
    }

    /// Creates a schedule from training parameters.
    pub fn from_config(config: &TrainingConfig, total_iterations: usize) -> Self {
        Self::new(config.initial_learning_rate, config.final_learning_rate, total_iterations)
    }

    /// Returns the rate used by the current iteration.
    pub fn current(&self) -> Float {
        self.current
    }

    /// Returns `max(floor, initial * (1 - iteration / total))`.
    pub fn rate_at(&self, iteration: usize) -> Float {
        let progress = iteration as Float / self.total_iterations.max(1) as Float;

        (self.initial * (1. - progress)).max(self.floor)
    }

    /// Advances the schedule after the given iteration is finished and returns the new rate.
    /// The last iteration leaves the rate unchanged.
    pub fn advance(&mut self, iteration: usize) -> Float {
        if iteration + 1 < self.total_iterations {
            self.current = self.current.min(self.rate_at(iteration));
        }

        self.current
    }
}

/// Defines the neighborhood radius per iteration: the ordering phase is split into thirds with
/// decreasing radii, the tuning phase keeps the last radius.
#[derive(Clone, Debug)]
pub struct RadiusSchedule {
    radii: [i32; 3],
    ordering_iterations: usize,
}

impl RadiusSchedule {
    /// Creates a new instance of `RadiusSchedule`.
    pub fn new(radii: [i32; 3], ordering_phase_ratio: Float, total_iterations: usize) -> Self {
        Self { radii, ordering_iterations: (ordering_phase_ratio * total_iterations as Float) as usize }
    }

    /// Creates a schedule from training parameters.
    pub fn from_config(config: &TrainingConfig, total_iterations: usize) -> Self {
        Self::new(config.radii, config.ordering_phase_ratio, total_iterations)
    }

    /// Returns amount of iterations in the ordering phase.
    pub fn ordering_iterations(&self) -> usize {
        self.ordering_iterations
    }

    /// Returns radius for the iteration.
    pub fn radius_at(&self, iteration: usize) -> i32 {
        let third = self.ordering_iterations / 3;

        match iteration {
            _ if iteration >= self.ordering_iterations => self.radii[2],
            _ if iteration < third => self.radii[0],
            _ if iteration < 2 * third => self.radii[1],
            _ => self.radii[2],
        }
    }
}
