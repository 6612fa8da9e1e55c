//! Console progress reporting.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/progress/progress_test.rs"]
mod progress_test;

use som_core::prelude::*;
use som_core::utils::Timer;
use std::io::Write;
use std::sync::Mutex;

const PROGRESS_BAR_LENGTH: usize = 50;

struct ConsoleState {
    writer: Box<dyn Write + Send>,
    last_percentage: Option<i64>,
    timer: Option<Timer>,
}

/// Writes operation boundaries and a progress bar into the given writer. A bar is redrawn only
/// when the integer percentage grows.
pub struct ConsoleProgressListener {
    state: Mutex<ConsoleState>,
}

impl ConsoleProgressListener {
    /// Creates a new instance of `ConsoleProgressListener`.
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self { state: Mutex::new(ConsoleState { writer, last_percentage: None, timer: None }) }
    }

    fn with_state(&self, action: impl FnOnce(&mut ConsoleState)) {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        action(&mut state);
    }
}

impl ProgressListener for ConsoleProgressListener {
    fn on_operation_start(&self, name: &str, total_steps: i64) {
        self.with_state(|state| {
            state.last_percentage = None;
            state.timer = Some(Timer::start());

            let total = if total_steps > 0 { total_steps.to_string() } else { "unknown".to_string() };
            // NOTE console output errors are not actionable
            let _ = writeln!(state.writer, "Starting operation: {name}, total steps: {total}");
        });
    }

    fn on_progress_update(&self, current: i64, total: i64, message: &str) {
        self.with_state(|state| {
            if total <= 0 {
                let _ = writeln!(state.writer, "Progress: {current} steps completed - {message}");
                return;
            }

            let percentage = (current * 100 / total).clamp(0, 100);
            if state.last_percentage.is_some_and(|last| percentage <= last) {
                return;
            }
            state.last_percentage = Some(percentage);

            let _ = write!(state.writer, "\r{}", format_progress_bar(percentage, message));
            if percentage == 100 {
                let _ = writeln!(state.writer);
            }
            let _ = state.writer.flush();
        });
    }

    fn on_operation_complete(&self, name: &str, is_successful: bool, message: &str) {
        self.with_state(|state| {
            let elapsed = state.timer.take().map(|timer| timer.elapsed_millis()).unwrap_or_default();
            let status = if is_successful { "completed successfully" } else { "failed" };

            let _ = writeln!(state.writer, "Operation {status}: {name} ({elapsed}ms)");
            if !message.is_empty() {
                let _ = writeln!(state.writer, "{message}");
            }
        });
    }

    fn on_memory_usage(&self, used_mb: u64, total_mb: u64) {
        self.with_state(|state| {
            let ratio = if total_mb > 0 { used_mb as f64 * 100. / total_mb as f64 } else { 0. };
            let _ = writeln!(state.writer, "Memory usage: {used_mb} MB / {total_mb} MB ({ratio:.1}%)");
        });
    }
}

/// Formats a progress bar like `[=====>    ] 50% - message`.
pub fn format_progress_bar(percentage: i64, message: &str) -> String {
    let percentage = percentage.clamp(0, 100);
    let completed = PROGRESS_BAR_LENGTH * percentage as usize / 100;

    let bar = (0..PROGRESS_BAR_LENGTH)
        .map(|idx| match idx {
            _ if idx < completed => '=',
            _ if idx == completed => '>',
            _ => ' ',
        })
        .collect::<String>();

    if message.is_empty() { format!("[{bar}] {percentage}%") } else { format!("[{bar}] {percentage}% - {message}") }
}
