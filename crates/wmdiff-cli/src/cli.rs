//! Command line arguments

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use wmdiff_core::ReportFormat;

#[derive(Debug, Parser)]
#[command(name = "wmdiff")]
#[command(author, version, about = "webMethods IS asset comparison tool", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to a timestamped file in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Directory the report is written to
    #[arg(long, global = true, default_value = "reports")]
    pub report_dir: PathBuf,

    /// Report format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Fingerprint assets on all cores
    #[arg(long, global = true)]
    pub parallel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare two branches, tags or commits of one repository
    Branches {
        /// Remote URL (or local path) of the repository
        #[arg(long)]
        repo: String,

        /// Base reference
        #[arg(long)]
        base: String,

        /// Reference compared against the base
        #[arg(long)]
        head: String,

        /// Directory holding working copies
        #[arg(long, default_value = "./tmp/repos")]
        workdir: PathBuf,
    },

    /// Compare a branch against exported local folders
    #[command(group(
        ArgGroup::new("folders")
            .args(["packages", "properties"])
            .required(true)
            .multiple(true)
    ))]
    Local {
        /// Remote URL (or local path) of the repository
        #[arg(long)]
        repo: String,

        /// Reference used as the base
        #[arg(long)]
        branch: String,

        /// Local packages folder
        #[arg(long)]
        packages: Option<PathBuf>,

        /// Local properties folder
        #[arg(long)]
        properties: Option<PathBuf>,

        /// Directory holding working copies
        #[arg(long, default_value = "./tmp/repos")]
        workdir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Html => Self::Html,
            OutputFormat::Json => Self::Json,
        }
    }
}
