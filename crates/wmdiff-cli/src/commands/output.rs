//! Summary logging and report writing shared by the commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};
use wmdiff_core::report::write_report;
use wmdiff_core::{Commit, ComparisonResult, ReportMetadata};

use super::RunOptions;

/// Log the outcome of a comparison and write its report
pub(super) fn finish(
    result: &ComparisonResult,
    metadata: &ReportMetadata,
    commits: &[Commit],
    options: &RunOptions,
) -> Result<PathBuf> {
    log_summary(result, metadata);

    let path = write_report(&options.report_dir, options.format, result, metadata, commits)
        .with_context(|| {
            format!(
                "Failed to write report to {}",
                options.report_dir.display()
            )
        })?;

    println!("Report: {}", path.display());
    Ok(path)
}

fn log_summary(result: &ComparisonResult, metadata: &ReportMetadata) {
    let summary = result.summary();
    info!("Comparison complete ({})", metadata.scenario);
    info!("  {} -> {}", metadata.base_label, metadata.head_label);
    info!("  Added:    {}", summary.added);
    info!("  Removed:  {}", summary.removed);
    info!("  Modified: {}", summary.modified);

    if !result.duplicates.is_empty() {
        warn!(
            "{} duplicate identities were resolved by keeping the last occurrence",
            result.duplicates.len()
        );
    }
}
