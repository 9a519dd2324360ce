//! Options shared by every comparison command

use std::path::PathBuf;

use wmdiff_core::ReportFormat;

/// Where and how a run writes its report
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub report_dir: PathBuf,
    pub format: ReportFormat,
    /// Fingerprint assets with rayon
    pub parallel: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("reports"),
            format: ReportFormat::Html,
            parallel: false,
        }
    }
}
