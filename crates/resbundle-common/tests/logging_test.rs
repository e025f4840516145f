//! Integration test for global logging initialization.
//!
//! Kept in its own test binary: the global subscriber can only be set once
//! per process.

use resbundle_common::logging::{init_logging, LogFormat, LoggingConfig};

#[test]
fn test_init_logging_to_file_then_reject_second_init() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("bundle.log");
    let config = LoggingConfig {
        level: "debug".to_string(),
        format: LogFormat::Compact,
        file_path: Some(log_file.to_string_lossy().into_owned()),
        ..LoggingConfig::default()
    };

    init_logging(config).expect("first initialization succeeds");
    tracing::info!(locale = "en", "catalog loaded");
    assert!(log_file.exists());

    assert!(init_logging(LoggingConfig::default()).is_err());
}
