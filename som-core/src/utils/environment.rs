use crate::utils::{DefaultRandom, Random};
use std::sync::Arc;

/// A logger type which is called with various information regarding the work done by the trainer.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Keeps track of environment specific information which influences algorithm behavior.
#[derive(Clone)]
pub struct Environment {
    /// A wrapper on random generator.
    pub random: Arc<dyn Random + Send + Sync>,

    /// An information logger.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates a new instance of `Environment`.
    pub fn new(random: Arc<dyn Random + Send + Sync>, logger: InfoLogger) -> Self {
        Self { random, logger }
    }

    /// Creates a new instance of `Environment` with seeded random and given logger.
    pub fn new_with_seed(seed: u64, logger: InfoLogger) -> Self {
        Self::new(Arc::new(DefaultRandom::new_with_seed(seed)), logger)
    }

    /// Creates a new instance of `Environment` which does not log anything.
    pub fn silent(random: Arc<dyn Random + Send + Sync>) -> Self {
        Self::new(random, Arc::new(|_: &str| {}))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Arc::new(DefaultRandom::default()), Arc::new(|msg: &str| println!("{msg}")))
    }
}
