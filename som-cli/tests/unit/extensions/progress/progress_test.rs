use super::*;
use std::sync::Arc;

/// A writer which shares its buffer with the test.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

parameterized_test! {can_format_progress_bar, (percentage, message, expected_prefix, expected_suffix), {
    let bar = format_progress_bar(percentage, message);

    assert!(bar.starts_with(expected_prefix), "{bar}");
    assert!(bar.ends_with(expected_suffix), "{bar}");
    assert_eq!(bar.chars().filter(|c| *c == '=').count(), 50 * percentage.clamp(0, 100) as usize / 100);
}}

can_format_progress_bar! {
    case01_zero: (0, "", "[>", "] 0%"),
    case02_half: (50, "training", "[=========================>", "] 50% - training"),
    case03_full: (100, "", "[==================================================]", "] 100%"),
    case04_overflow: (150, "", "[==================================================]", "] 100%"),
}

#[test]
fn can_write_operation_lifecycle() {
    let buffer = SharedBuffer::default();
    let listener = ConsoleProgressListener::new(Box::new(buffer.clone()));

    listener.on_operation_start("Training", 100);
    listener.on_progress_update(10, 100, "ten");
    listener.on_progress_update(10, 100, "ten again");
    listener.on_progress_update(5, 100, "back");
    listener.on_progress_update(100, 100, "done");
    listener.on_operation_complete("Training", true, "trained");
    listener.on_memory_usage(25, 100);

    let text = buffer.text();
    assert!(text.starts_with("Starting operation: Training, total steps: 100\n"));
    assert_eq!(text.matches("% - ten").count(), 1);
    assert!(!text.contains("ten again"));
    assert!(!text.contains("back"));
    assert!(text.contains("] 100% - done\n"));
    assert!(text.contains("Operation completed successfully: Training ("));
    assert!(text.contains("trained\n"));
    assert!(text.ends_with("Memory usage: 25 MB / 100 MB (25.0%)\n"));
}

#[test]
fn can_write_unknown_progress_and_failure() {
    let buffer = SharedBuffer::default();
    let listener = ConsoleProgressListener::new(Box::new(buffer.clone()));

    listener.on_operation_start("Loading data", -1);
    listener.on_progress_update(100, -1, "processed 100 rows");
    listener.on_operation_complete("Data loading", false, "");

    let text = buffer.text();
    assert!(text.contains("total steps: unknown"));
    assert!(text.contains("Progress: 100 steps completed - processed 100 rows\n"));
    assert!(text.contains("Operation failed: Data loading ("));
}

#[test]
fn can_reset_percentage_on_new_operation() {
    let buffer = SharedBuffer::default();
    let listener = ConsoleProgressListener::new(Box::new(buffer.clone()));

    listener.on_operation_start("First", 10);
    listener.on_progress_update(10, 10, "first");
    listener.on_operation_start("Second", 10);
    listener.on_progress_update(5, 10, "second");

    assert!(buffer.text().contains("] 50% - second"));
}
