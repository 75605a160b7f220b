// Unit tests for logger initialization
// The global logger can be installed once per process, so one test covers both calls

use crate::logger::{LOG_FILE_NAME, initialize};

/// **VALUE**: Verifies that calling initialize() twice doesn't panic or fail.
///
/// **WHY THIS MATTERS**: `fern` refuses to install a second global logger; without
/// the Once/AtomicBool guards a repeated call would return an error.
///
/// **BUG THIS CATCHES**: Would catch the guards being removed, and the log
/// directory not being created before the file is opened.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A directory that does not exist yet
    let temp_dir = tempfile::tempdir().unwrap();
    let log_dir = temp_dir.path().join("nested").join("logs");

    // WHEN: Calling initialize twice
    let first = initialize(&log_dir);
    let second = initialize(&log_dir);

    // THEN: Both succeed and the log file exists
    assert!(first.is_ok(), "First initialization should succeed: {first:?}");
    assert!(second.is_ok(), "Second initialization should be a no-op");
    assert!(log_dir.join(LOG_FILE_NAME).exists());
}
