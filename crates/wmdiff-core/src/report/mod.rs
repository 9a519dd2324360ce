//! Report module: Rendering comparison results
//!
//! Turns a [`ComparisonResult`] plus run metadata and the commit log into a
//! standalone HTML page or a JSON document, and writes it to disk.

mod html;
mod metadata;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

pub use html::{escape, render_html};
pub use metadata::{ReportMetadata, Scenario};

use crate::diff::{ComparisonResult, ComparisonSummary};
use crate::vcs::Commit;

/// Errors that can occur while writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format of a report file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
}

impl ReportFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: &'a ReportMetadata,
    summary: ComparisonSummary,
    result: &'a ComparisonResult,
    commits: &'a [Commit],
}

/// Render the comparison as pretty-printed JSON
///
/// # Errors
/// Returns an error if serialization fails.
pub fn render_json(
    result: &ComparisonResult,
    metadata: &ReportMetadata,
    commits: &[Commit],
) -> Result<String, ReportError> {
    let report = JsonReport {
        metadata,
        summary: result.summary(),
        result,
        commits,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// File name for a report: `compare_<YYYYmmdd_HHMM>_<repo>.<ext>`
#[must_use]
pub fn report_file_name(metadata: &ReportMetadata, format: ReportFormat) -> String {
    let repo: String = metadata
        .repo_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "compare_{}_{}.{}",
        metadata.generated_at.format("%Y%m%d_%H%M"),
        repo,
        format.extension()
    )
}

/// Render and write a report into `dir`, creating it if needed
///
/// # Errors
/// Returns an error if rendering fails or the file cannot be written.
pub fn write_report(
    dir: &Path,
    format: ReportFormat,
    result: &ComparisonResult,
    metadata: &ReportMetadata,
    commits: &[Commit],
) -> Result<PathBuf, ReportError> {
    let content = match format {
        ReportFormat::Html => render_html(result, metadata, commits),
        ReportFormat::Json => render_json(result, metadata, commits)?,
    };

    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(report_file_name(metadata, format));
    fs::write(&path, content).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;

    info!("Report written to {}", path.display());
    Ok(path)
}
