//! Typed report metadata

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Which two snapshots were compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    BranchVsBranch,
    BranchVsLocal,
}

impl Scenario {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::BranchVsBranch => "Branch vs Branch",
            Self::BranchVsLocal => "Branch in Repo vs Local Folder",
        }
    }

    #[must_use]
    pub const fn default_source_label(&self) -> &'static str {
        match self {
            Self::BranchVsBranch => "Base (Source)",
            Self::BranchVsLocal => "Repo (Source)",
        }
    }

    #[must_use]
    pub const fn default_target_label(&self) -> &'static str {
        match self {
            Self::BranchVsBranch => "Compare (Target)",
            Self::BranchVsLocal => "Local (Target)",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the report shows about the run besides the diff itself
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub scenario: Scenario,
    pub repo_url: String,
    pub repo_name: String,
    /// Base reference (branch, tag or commit)
    pub base_label: String,
    /// Head reference, or a description of the local folders
    pub head_label: String,
    pub source_label: String,
    pub target_label: String,
    /// Text after the base label; defaults to `on <repo_name>`
    pub source_extra: Option<String>,
    /// Text after the head label; defaults to `on <repo_name>`
    pub target_extra: Option<String>,
    pub local_packages: Option<PathBuf>,
    pub local_properties: Option<PathBuf>,
}

impl ReportMetadata {
    /// Create metadata for a run, with the scenario's default labels
    #[must_use]
    pub fn new(
        scenario: Scenario,
        repo_url: impl Into<String>,
        repo_name: impl Into<String>,
        base_label: impl Into<String>,
        head_label: impl Into<String>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            scenario,
            repo_url: repo_url.into(),
            repo_name: repo_name.into(),
            base_label: base_label.into(),
            head_label: head_label.into(),
            source_label: scenario.default_source_label().to_string(),
            target_label: scenario.default_target_label().to_string(),
            source_extra: None,
            target_extra: None,
            local_packages: None,
            local_properties: None,
        }
    }

    #[must_use]
    pub fn with_source_extra(mut self, extra: impl Into<String>) -> Self {
        self.source_extra = Some(extra.into());
        self
    }

    #[must_use]
    pub fn with_target_extra(mut self, extra: impl Into<String>) -> Self {
        self.target_extra = Some(extra.into());
        self
    }

    #[must_use]
    pub fn with_local_packages(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_packages = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_local_properties(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_properties = Some(path.into());
        self
    }

    /// Text shown after the base label
    #[must_use]
    pub fn source_suffix(&self) -> String {
        self.source_extra
            .clone()
            .unwrap_or_else(|| format!("on {}", self.repo_name))
    }

    /// Text shown after the head label
    #[must_use]
    pub fn target_suffix(&self) -> String {
        self.target_extra
            .clone()
            .unwrap_or_else(|| format!("on {}", self.repo_name))
    }
}
