//! VCS module: Snapshot acquisition from git
//!
//! Prepares a local working tree (clone or fetch), forces it to a named
//! reference before each discovery pass, and lists the commits between two
//! references for the report.

mod repo;

use serde::{Deserialize, Serialize};

pub use repo::{repo_name_from_url, GitRepo, VcsError};

/// A file touched by a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Name-status letter (`A`, `D`, `M`, `R`, `C`, `T`)
    pub status: String,
    pub path: String,
}

/// A commit present in the head reference but not in the base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Abbreviated commit id
    pub hash: String,
    pub author: String,
    pub date: String,
    /// First line of the commit message
    pub message: String,
    pub changes: Vec<FileChange>,
}
