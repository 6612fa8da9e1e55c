#[cfg(test)]
#[path = "../../../tests/unit/algorithms/som/trainer_test.rs"]
mod trainer_test;

use super::*;
use crate::models::{Coordinate, Vector};
use crate::telemetry::{NoopProgress, ProgressListener};
use crate::utils::*;
use rand::prelude::SliceRandom;
use std::sync::Arc;

/// Specifies the phase of the training run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainerState {
    /// Data is loaded and normalized.
    Idle,
    /// Mean vector, initial prototypes and the grid are being prepared.
    Initializing,
    /// The main loop is running.
    Training,
    /// The main loop is finished.
    Converged,
    /// Prototypes are being labeled.
    Labeling,
    /// Labels are counted, the run is finished.
    Done,
}

/// Summarizes a complete training run.
#[derive(Clone, Debug)]
pub struct TrainingReport {
    /// Amount of iterations (full passes over the dataset).
    pub iterations: usize,
    /// Amount of processed vectors over all iterations.
    pub steps: usize,
    /// Original to canonical label mapping.
    pub mapping: Vec<LabelMapping>,
    /// Prototypes per canonical label.
    pub counts: Vec<LabelCount>,
}

/// Orchestrates initialization, training and labeling of the map. The trainer exclusively owns
/// the grid and releases it with `into_grid`.
pub struct Trainer {
    config: TrainingConfig,
    environment: Environment,
    progress: Arc<dyn ProgressListener>,
    dataset: Vec<Vector>,
    normalized: Vec<Vector>,
    mean: Option<Vector>,
    samples: Vec<Vector>,
    grid: Option<Grid>,
    bmus: Vec<Coordinate>,
    state: TrainerState,
}

impl Trainer {
    /// Creates a new instance of `Trainer` normalizing the dataset.
    pub fn new(
        dataset: Vec<Vector>,
        config: TrainingConfig,
        environment: Environment,
        progress: Arc<dyn ProgressListener>,
    ) -> SomResult<Self> {
        config.validate()?;

        if let Some(first) = dataset.first() {
            dataset.iter().try_for_each(|vector| ensure_dimension(first.dimension(), vector.dimension()))?;
        }

        let normalized = normalize_dataset(&dataset, config.progress_interval, progress.as_ref());

        Ok(Self {
            config,
            environment,
            progress,
            dataset,
            normalized,
            mean: None,
            samples: Vec::new(),
            grid: None,
            bmus: Vec::new(),
            state: TrainerState::Idle,
        })
    }

    /// Returns current state.
    pub fn state(&self) -> TrainerState {
        self.state
    }

    /// Returns training parameters.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Returns original vectors.
    pub fn dataset(&self) -> &[Vector] {
        self.dataset.as_slice()
    }

    /// Returns normalized vectors.
    pub fn normalized(&self) -> &[Vector] {
        self.normalized.as_slice()
    }

    /// Returns the mean vector, if calculated.
    pub fn mean_vector(&self) -> Option<&Vector> {
        self.mean.as_ref()
    }

    /// Returns vectors sampled for prototype initialization.
    pub fn samples(&self) -> &[Vector] {
        self.samples.as_slice()
    }

    /// Returns the grid, if generated.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Releases the grid.
    pub fn into_grid(self) -> Option<Grid> {
        self.grid
    }

    /// Returns coordinates found by the last BMU search.
    pub fn best_matching_units(&self) -> &[Coordinate] {
        self.bmus.as_slice()
    }

    /// Calculates per-dimension mean of the normalized dataset.
    pub fn calculate_mean_vector(&mut self) -> SomResult<&Vector> {
        let first = self.normalized.first().ok_or_else(|| SomError::illegal_state("no normalized data available"))?;

        let sums = self.normalized.iter().fold(vec![0.; first.dimension()], |mut sums, vector| {
            sums.iter_mut().zip(vector.features()).for_each(|(sum, value)| *sum += value);
            sums
        });

        let size = self.normalized.len() as Float;
        let mean = Vector::new(sums.into_iter().map(|sum| sum / size).collect(), "")?;

        (self.environment.logger)(&format!("mean vector: {mean}"));

        self.state = TrainerState::Initializing;

        Ok(&*self.mean.insert(mean))
    }

    /// Samples initial prototype weights uniformly from `[mean - lower, mean + upper]`.
    pub fn create_random_weight_vectors(&mut self, upper: Float, lower: Float) -> SomResult<&[Vector]> {
        if !upper.is_finite() || !lower.is_finite() || upper < 0. || lower < 0. {
            return Err(SomError::invalid_argument(format!(
                "interval bounds must be finite and non-negative, got upper={upper}, lower={lower}"
            )));
        }

        let mean = self.mean.as_ref().ok_or_else(|| SomError::illegal_state("mean vector must be calculated first"))?;

        let max = mean.features().iter().map(|value| value + upper).collect::<Vec<_>>();
        let min = mean.features().iter().map(|value| value - lower).collect::<Vec<_>>();

        let count = estimate_prototype_count(self.dataset.len());
        let random = self.environment.random.as_ref();

        self.samples = (0..count).map(|_| Vector::random(&min, &max, random)).collect::<SomResult<Vec<_>>>()?;

        (self.environment.logger)(&format!("created {count} random weight vectors"));

        Ok(self.samples.as_slice())
    }

    /// Lays sampled vectors into the grid.
    pub fn generate_grid(&mut self) -> SomResult<&Grid> {
        if self.samples.is_empty() {
            return Err(SomError::illegal_state("random weight vectors must be created first"));
        }

        let total = self.samples.len() as i64;
        self.progress.on_operation_start("Generating grid", total);

        let grid = match Grid::new(&self.samples) {
            Ok(grid) => grid,
            Err(err) => {
                self.progress.on_operation_complete("Grid generation", false, &err.to_string());
                return Err(err);
            }
        };

        self.progress.on_progress_update(grid.size() as i64, total, &format!("generated {} prototypes", grid.size()));
        self.progress.on_operation_complete(
            "Grid generation",
            true,
            &format!("grid of {}x{} prototypes", grid.rows(), grid.columns()),
        );

        self.bmus.clear();
        self.state = TrainerState::Initializing;

        Ok(&*self.grid.insert(grid))
    }

    /// Calculates distances from every prototype to the input.
    pub fn calculate_distances(&mut self, input: &Vector) -> SomResult<()> {
        let grid = self.grid.as_mut().ok_or_else(grid_is_missing)?;

        calculate_distances(grid, input, &self.config, self.progress.as_ref())
    }

    /// Finds prototypes at the grid-wide minimum distance.
    pub fn find_best_matching_units(&mut self) -> SomResult<&[Coordinate]> {
        let grid = self.grid.as_ref().ok_or_else(grid_is_missing)?;

        self.bmus = find_best_matching_units(grid, &self.config, self.progress.as_ref());

        Ok(self.bmus.as_slice())
    }

    /// Picks uniformly a random index within the last found best matching units.
    pub fn random_bmu_index(&self) -> SomResult<usize> {
        random_bmu_index(&self.bmus, self.environment.random.as_ref())
    }

    /// Calculates the neighborhood of the prototype within the radius.
    pub fn calculate_neighborhood(&self, center: &Coordinate, radius: i32) -> SomResult<Neighborhood> {
        let grid = self.grid.as_ref().ok_or_else(grid_is_missing)?;

        self.progress.on_operation_start("Calculating neighborhood", 1);

        let neighborhood = Neighborhood::new(grid, center, radius)?;

        self.progress.on_progress_update(1, 1, &format!("neighborhood of {} prototypes", neighborhood.size()));
        self.progress.on_operation_complete(
            "Neighborhood calculation",
            true,
            &format!("bounding box {}x{}", neighborhood.rows(), neighborhood.columns()),
        );

        Ok(neighborhood)
    }

    /// Runs the main training loop and returns amount of iterations.
    pub fn train(&mut self, mode: OrderingMode) -> SomResult<usize> {
        if self.normalized.is_empty() {
            return Err(SomError::illegal_state("normalized data must be available"));
        }

        let grid = self.grid.as_mut().ok_or_else(grid_is_missing)?;
        ensure_dimension(grid.dimension(), self.normalized[0].dimension())?;

        let size = self.normalized.len();
        let total_iterations = self.config.iteration_factor * size;

        let mut learning = LearningSchedule::from_config(&self.config, total_iterations);
        let radii = RadiusSchedule::from_config(&self.config, total_iterations);

        // NOTE the permutation is generated once and reused by every iteration
        let order = match mode {
            OrderingMode::Sequential => (0..size).collect::<Vec<_>>(),
            OrderingMode::Randomized => {
                let mut order = (0..size).collect::<Vec<_>>();
                order.shuffle(&mut self.environment.random.get_rng());
                order
            }
        };

        (self.environment.logger)(&format!(
            "training with {total_iterations} iterations over {size} vectors, grid {}x{}, mode {mode:?}",
            grid.rows(),
            grid.columns()
        ));

        self.state = TrainerState::Training;
        self.progress.on_operation_start("Training", total_iterations as i64);

        let quiet = NoopProgress;
        let random = self.environment.random.as_ref();

        for iteration in 0..total_iterations {
            let learning_rate = learning.current();
            let radius = radii.radius_at(iteration);

            for &index in order.iter() {
                let input = &self.normalized[index];

                calculate_distances(grid, input, &self.config, &quiet)?;
                self.bmus = find_best_matching_units(grid, &self.config, &quiet);

                let bmu = self.bmus[random_bmu_index(&self.bmus, random)?];
                let neighborhood = Neighborhood::new(grid, &bmu, radius)?;

                neighborhood.iter().try_for_each(|coordinate| match grid.get_mut(&coordinate) {
                    Some(prototype) => prototype.update_weights(input, learning_rate),
                    None => Err(SomError::illegal_state(format!("no prototype at {coordinate}"))),
                })?;
            }

            learning.advance(iteration);

            if (iteration + 1) % 10 == 0 {
                self.progress.on_progress_update(
                    iteration as i64 + 1,
                    total_iterations as i64,
                    &format!("completed {} iterations, learning rate {:.4}", iteration + 1, learning.current()),
                );
            }
        }

        self.progress.on_progress_update(
            total_iterations as i64,
            total_iterations as i64,
            &format!("completed {total_iterations} iterations"),
        );
        self.progress.on_operation_complete("Training", true, &format!("trained with {total_iterations} iterations"));
        (self.environment.logger)("training completed");

        self.state = TrainerState::Converged;

        Ok(total_iterations)
    }

    /// Assigns to every prototype the label of the closest original vector.
    pub fn assign_class_labels(&mut self) -> SomResult<()> {
        let grid = self.grid.as_mut().ok_or_else(grid_is_missing)?;
        if self.dataset.is_empty() {
            return Err(SomError::illegal_state("data must be available"));
        }

        let total = grid.size() as i64;
        self.progress.on_operation_start("Assigning class labels", total);

        let is_parallel = grid.size() >= self.config.parallel_threshold;
        if let Err(err) = assign_labels(grid, &self.dataset, is_parallel) {
            self.progress.on_operation_complete("Class label assignment", false, &err.to_string());
            return Err(err);
        }

        self.progress.on_progress_update(total, total, &format!("assigned {total} labels"));
        self.progress.on_operation_complete("Class label assignment", true, &format!("labeled {total} prototypes"));

        self.state = TrainerState::Labeling;

        Ok(())
    }

    /// Replaces labels with canonical names and returns the mapping.
    pub fn rename_class_labels(&mut self) -> SomResult<Vec<LabelMapping>> {
        let grid = self.grid.as_mut().ok_or_else(grid_is_missing)?;

        let mapping = rename_labels(grid);

        let summary = mapping.iter().map(|entry| format!("{} = {}", entry.original, entry.canonical));
        (self.environment.logger)(&format!("label mapping: {}", summary.collect::<Vec<_>>().join(", ")));

        self.state = TrainerState::Labeling;

        Ok(mapping)
    }

    /// Counts prototypes per label.
    pub fn count_class_labels(&mut self) -> SomResult<Vec<LabelCount>> {
        let grid = self.grid.as_ref().ok_or_else(grid_is_missing)?;

        let counts = count_labels(grid);

        self.state = TrainerState::Done;

        Ok(counts)
    }

    /// Runs all phases in order: initialization, training and labeling.
    pub fn run(&mut self, upper: Float, lower: Float, mode: OrderingMode) -> SomResult<TrainingReport> {
        self.calculate_mean_vector()?;
        self.create_random_weight_vectors(upper, lower)?;
        self.generate_grid()?;

        let iterations = self.train(mode)?;

        self.assign_class_labels()?;
        let mapping = self.rename_class_labels()?;
        let counts = self.count_class_labels()?;

        Ok(TrainingReport { iterations, steps: iterations * self.normalized.len(), mapping, counts })
    }
}

fn grid_is_missing() -> SomError {
    SomError::illegal_state("grid must be generated first")
}

fn normalize_dataset(dataset: &[Vector], interval: usize, progress: &dyn ProgressListener) -> Vec<Vector> {
    let total = dataset.len() as i64;
    progress.on_operation_start("Normalizing data", total);

    let normalized = dataset
        .iter()
        .enumerate()
        .map(|(idx, vector)| {
            if (idx + 1) % interval == 0 {
                progress.on_progress_update(idx as i64 + 1, total, &format!("normalized {} vectors", idx + 1));
            }
            vector.normalize()
        })
        .collect::<Vec<_>>();

    progress.on_progress_update(total, total, &format!("normalized {total} vectors"));
    progress.on_operation_complete("Data normalization", true, &format!("normalized {total} vectors"));

    normalized
}

/// Calculates distances of all prototypes to the input. Large grids are processed in parallel by
/// rows: each row is written by one worker only and the call returns when all rows are done.
pub(crate) fn calculate_distances(
    grid: &mut Grid,
    input: &Vector,
    config: &TrainingConfig,
    progress: &dyn ProgressListener,
) -> SomResult<()> {
    ensure_dimension(grid.dimension(), input.dimension())?;

    let total = grid.size();
    progress.on_operation_start("Calculating distances", total as i64);

    if total >= config.parallel_threshold {
        parallel_try_foreach_mut(grid.row_slices_mut(), |row| {
            row.iter_mut().try_for_each(|prototype| prototype.calculate_distance(input).map(|_| ()))
        })?;
    } else {
        grid.iter_mut().enumerate().try_for_each(|(idx, prototype)| {
            prototype.calculate_distance(input)?;

            if (idx + 1) % config.progress_interval == 0 {
                progress.on_progress_update(idx as i64 + 1, total as i64, &format!("calculated {} distances", idx + 1));
            }

            Ok::<_, SomError>(())
        })?;
    }

    progress.on_operation_complete("Distance calculation", true, &format!("calculated {total} distances"));

    Ok(())
}

/// Returns coordinates of all prototypes within the tie tolerance of the minimum distance.
pub(crate) fn find_best_matching_units(
    grid: &Grid,
    config: &TrainingConfig,
    progress: &dyn ProgressListener,
) -> Vec<Coordinate> {
    progress.on_operation_start("Finding best matching units", grid.size() as i64);

    let min_distance = grid.iter().map(|prototype| prototype.distance()).min_by(compare_floats_refs);

    let bmus = min_distance
        .map(|min_distance| {
            grid.iter()
                .filter(|prototype| (prototype.distance() - min_distance).abs() < config.tie_tolerance)
                .map(|prototype| prototype.coordinate())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    progress.on_operation_complete("BMU search", true, &format!("found {} best matching units", bmus.len()));

    bmus
}

fn random_bmu_index(bmus: &[Coordinate], random: &(dyn Random + Send + Sync)) -> SomResult<usize> {
    if bmus.is_empty() {
        return Err(SomError::illegal_state("best matching units list is empty"));
    }

    Ok(random.uniform_int(0, bmus.len() as i32 - 1) as usize)
}
