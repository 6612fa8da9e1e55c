//! This module reimports commonly used types.

pub use crate::algorithms::som::Grid;
pub use crate::algorithms::som::LabelCount;
pub use crate::algorithms::som::LabelMapping;
pub use crate::algorithms::som::Neighborhood;
pub use crate::algorithms::som::OrderingMode;
pub use crate::algorithms::som::Trainer;
pub use crate::algorithms::som::TrainerState;
pub use crate::algorithms::som::TrainingConfig;
pub use crate::algorithms::som::TrainingReport;

pub use crate::models::{ColumnMapping, Coordinate, Prototype, Vector};

pub use crate::telemetry::{LoggingProgress, NoopProgress, ProgressListener, create_noop_progress};

pub use crate::utils::{DefaultRandom, Environment, InfoLogger, Random, RandomGen};
pub use crate::utils::{Float, SomError, SomResult};
