//! Tests for installing the global subscriber
//!
//! Runs in its own test binary because the subscriber can only be installed
//! once per process.

#![allow(clippy::expect_used)]

use std::fs;

use tempfile::TempDir;
use wmdiff_cli::logging::setup_logging;

#[test]
fn test_setup_logging_writes_log_file_once() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let log_dir = dir.path().join("logs");

    let path = setup_logging(false, Some(&log_dir))
        .expect("Failed to set up logging")
        .expect("Expected a log file path");

    assert_eq!(path.parent(), Some(log_dir.as_path()));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .expect("file name");
    assert!(name.starts_with("wmdiff_"));
    assert!(name.ends_with(".log"));

    tracing::info!("written to the log file");
    tracing::debug!("filtered out at info level");

    let content = fs::read_to_string(&path).expect("Failed to read log");
    assert!(content.contains("written to the log file"));
    assert!(!content.contains("filtered out"));
    assert!(!content.contains("\u{1b}["));

    assert!(setup_logging(false, None).is_err());
}
