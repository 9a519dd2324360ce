//! Tests for logging setup
//!
//! The global subscriber can only be installed once per process, so only
//! the pieces that build it are tested here.

use chrono::{Local, TimeZone};

use crate::logging::{env_filter, log_file_name};

#[test]
fn test_env_filter_info_when_quiet() {
    let filter = format!("{:?}", env_filter(false));
    assert!(filter.contains("INFO") || filter.contains("info"));
}

#[test]
fn test_env_filter_debug_when_verbose() {
    let filter = format!("{:?}", env_filter(true));
    assert!(filter.contains("DEBUG") || filter.contains("debug"));
}

#[test]
fn test_log_file_name_uses_start_time() {
    let Some(started) = Local
        .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
        .single()
    else {
        return;
    };

    assert_eq!(log_file_name(started), "wmdiff_20240309_140507.log");
}
