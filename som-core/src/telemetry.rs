//! A module which provides progress reporting and simple logging of the training phases.

#[cfg(test)]
#[path = "../tests/unit/telemetry_test.rs"]
mod telemetry_test;

use crate::utils::{InfoLogger, Timer};
use std::sync::{Arc, Mutex};

/// Receives progress notifications about long running operations. All methods are called only
/// at phase boundaries or at a coarse interval, implementations are free to ignore any of them.
pub trait ProgressListener: Send + Sync {
    /// Called when an operation starts, `total_steps` is -1 when unknown.
    fn on_operation_start(&self, name: &str, total_steps: i64);

    /// Called to report progress of the current operation.
    fn on_progress_update(&self, current: i64, total: i64, message: &str);

    /// Called when an operation completes.
    fn on_operation_complete(&self, name: &str, is_successful: bool, message: &str);

    /// Called to report memory usage in megabytes.
    fn on_memory_usage(&self, _used_mb: u64, _total_mb: u64) {}
}

/// A listener which ignores all notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopProgress;

impl ProgressListener for NoopProgress {
    fn on_operation_start(&self, _: &str, _: i64) {}

    fn on_progress_update(&self, _: i64, _: i64, _: &str) {}

    fn on_operation_complete(&self, _: &str, _: bool, _: &str) {}
}

/// A listener which writes operation boundaries into the info logger.
pub struct LoggingProgress {
    logger: InfoLogger,
    timer: Mutex<Option<Timer>>,
}

impl LoggingProgress {
    /// Creates a new instance of `LoggingProgress`.
    pub fn new(logger: InfoLogger) -> Self {
        Self { logger, timer: Mutex::new(None) }
    }
}

impl ProgressListener for LoggingProgress {
    fn on_operation_start(&self, name: &str, total_steps: i64) {
        *self.timer.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Timer::start());

        if total_steps < 0 {
            (self.logger)(&format!("[start] {name}"));
        } else {
            (self.logger)(&format!("[start] {name}: {total_steps} steps"));
        }
    }

    fn on_progress_update(&self, current: i64, total: i64, message: &str) {
        if total > 0 {
            (self.logger)(&format!("[progress] {:.1}% {message}", current as f64 * 100. / total as f64));
        } else {
            (self.logger)(&format!("[progress] {current} {message}"));
        }
    }

    fn on_operation_complete(&self, name: &str, is_successful: bool, message: &str) {
        let elapsed = self.timer.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).take();
        let status = if is_successful { "done" } else { "failed" };

        match elapsed {
            Some(timer) => (self.logger)(&format!("[{status}] {name} in {}ms: {message}", timer.elapsed_millis())),
            None => (self.logger)(&format!("[{status}] {name}: {message}")),
        }
    }

    fn on_memory_usage(&self, used_mb: u64, total_mb: u64) {
        (self.logger)(&format!("[memory] {used_mb}MB / {total_mb}MB"));
    }
}

/// Creates a default listener which does nothing.
pub fn create_noop_progress() -> Arc<dyn ProgressListener> {
    Arc::new(NoopProgress)
}
