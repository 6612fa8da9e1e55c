use super::*;
use crate::helpers::utils::create_capturing_environment;

#[test]
fn can_log_operation_lifecycle() {
    let (environment, messages) = create_capturing_environment();
    let progress = LoggingProgress::new(environment.logger.clone());

    progress.on_operation_start("Training", 150);
    progress.on_progress_update(75, 150, "halfway");
    progress.on_operation_complete("Training", true, "trained");

    let messages = messages.lock().unwrap().clone();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0], "[start] Training: 150 steps");
    assert_eq!(messages[1], "[progress] 50.0% halfway");
    assert!(messages[2].starts_with("[done] Training in "));
    assert!(messages[2].ends_with("ms: trained"));
}

#[test]
fn can_log_unknown_totals_and_failures() {
    let (environment, messages) = create_capturing_environment();
    let progress = LoggingProgress::new(environment.logger.clone());

    progress.on_operation_start("Loading", -1);
    progress.on_progress_update(100, -1, "rows");
    progress.on_operation_complete("Loading", false, "broken file");
    progress.on_operation_complete("Loading", false, "no start");
    progress.on_memory_usage(12, 1024);

    let messages = messages.lock().unwrap().clone();
    assert_eq!(messages[0], "[start] Loading");
    assert_eq!(messages[1], "[progress] 100 rows");
    assert!(messages[2].starts_with("[failed] Loading in "));
    assert_eq!(messages[3], "[failed] Loading: no start");
    assert_eq!(messages[4], "[memory] 12MB / 1024MB");
}

#[test]
fn can_ignore_everything_with_noop() {
    let progress = create_noop_progress();

    progress.on_operation_start("Training", 1);
    progress.on_progress_update(1, 1, "");
    progress.on_operation_complete("Training", true, "");
    progress.on_memory_usage(1, 1);
}
