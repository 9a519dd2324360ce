//! Git working tree handling via libgit2

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use git2::build::CheckoutBuilder;
use git2::{Delta, Oid, Repository, Sort};
use thiserror::Error;
use tracing::{debug, info};

use super::{Commit, FileChange};

/// Errors that can occur while preparing or reading a repository
#[derive(Debug, Error)]
pub enum VcsError {
    #[error("failed to clone {url} into {path}: {source}")]
    Clone {
        url: String,
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("failed to fetch {remote}: {source}")]
    Fetch {
        remote: String,
        #[source]
        source: git2::Error,
    },

    #[error("reference not found: {0}")]
    ReferenceNotFound(String),

    #[error("failed to check out {reference}: {source}")]
    Checkout {
        reference: String,
        #[source]
        source: git2::Error,
    },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
}

/// A remote repository mirrored into a local working tree
#[derive(Debug, Clone)]
pub struct GitRepo {
    remote_url: String,
    local_path: PathBuf,
}

/// Repository name from a remote URL, e.g. `https://host/org/app.git` → `app`
#[must_use]
pub fn repo_name_from_url(url: &str) -> String {
    let last = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(url);
    last.strip_suffix(".git").unwrap_or(last).to_string()
}

impl GitRepo {
    #[must_use]
    pub fn new(remote_url: impl Into<String>, local_path: impl Into<PathBuf>) -> Self {
        Self {
            remote_url: remote_url.into(),
            local_path: local_path.into(),
        }
    }

    /// Working tree for `remote_url` inside `workdir`
    #[must_use]
    pub fn in_workdir(remote_url: impl Into<String>, workdir: &Path) -> Self {
        let remote_url = remote_url.into();
        let local_path = workdir.join(repo_name_from_url(&remote_url));
        Self::new(remote_url, local_path)
    }

    #[must_use]
    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    #[must_use]
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    #[must_use]
    pub fn name(&self) -> String {
        repo_name_from_url(&self.remote_url)
    }

    /// Clone the remote if the working tree is missing, otherwise fetch
    ///
    /// # Errors
    /// Returns an error if cloning or fetching fails.
    pub fn prepare(&self) -> Result<(), VcsError> {
        if !self.local_path.exists() {
            info!(
                "Cloning {} to {}...",
                self.remote_url,
                self.local_path.display()
            );
            Repository::clone(&self.remote_url, &self.local_path).map_err(|source| {
                VcsError::Clone {
                    url: self.remote_url.clone(),
                    path: self.local_path.clone(),
                    source,
                }
            })?;
            return Ok(());
        }

        info!(
            "Repository exists at {}, fetching...",
            self.local_path.display()
        );
        let repo = self.open()?;
        for name in repo.remotes()?.iter().flatten() {
            let mut remote = repo.find_remote(name)?;
            remote
                .fetch(&[] as &[&str], None, None)
                .map_err(|source| VcsError::Fetch {
                    remote: name.to_string(),
                    source,
                })?;
            debug!("Fetched remote {}", name);
        }
        Ok(())
    }

    /// Force the working tree to `reference` (branch, tag or commit)
    ///
    /// Remote-tracking branches take precedence over local branches of the
    /// same name so a re-used clone always reflects the last fetch. HEAD is
    /// left detached at the resolved commit.
    ///
    /// # Errors
    /// Returns an error if the reference cannot be resolved or checked out.
    pub fn checkout(&self, reference: &str) -> Result<(), VcsError> {
        info!(
            "Checking out {} in {}...",
            reference,
            self.local_path.display()
        );
        let repo = self.open()?;
        let oid = resolve_commit(&repo, reference)?;
        let commit = repo.find_commit(oid)?;

        let wrap = |source| VcsError::Checkout {
            reference: reference.to_string(),
            source,
        };
        repo.checkout_tree(
            commit.as_object(),
            Some(CheckoutBuilder::new().force().remove_untracked(true)),
        )
        .map_err(wrap)?;
        repo.set_head_detached(oid).map_err(wrap)?;
        Ok(())
    }

    /// Commits reachable from `head_ref` but not from `base_ref`, newest first
    ///
    /// # Errors
    /// Returns an error if either reference cannot be resolved or the
    /// history cannot be walked.
    pub fn commit_log(&self, base_ref: &str, head_ref: &str) -> Result<Vec<Commit>, VcsError> {
        let repo = self.open()?;
        let base = resolve_commit(&repo, base_ref)?;
        let head = resolve_commit(&repo, head_ref)?;

        let mut walk = repo.revwalk()?;
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        walk.push(head)?;
        walk.hide(base)?;

        let mut commits = Vec::new();
        for oid in walk {
            let commit = repo.find_commit(oid?)?;
            commits.push(describe_commit(&repo, &commit)?);
        }
        debug!("{} commits in {}..{}", commits.len(), base_ref, head_ref);
        Ok(commits)
    }

    fn open(&self) -> Result<Repository, VcsError> {
        Ok(Repository::open(&self.local_path)?)
    }
}

fn resolve_commit(repo: &Repository, reference: &str) -> Result<Oid, VcsError> {
    let candidates = [format!("origin/{reference}"), reference.to_string()];
    for spec in &candidates {
        if let Ok(object) = repo.revparse_single(spec) {
            if let Ok(commit) = object.peel_to_commit() {
                return Ok(commit.id());
            }
        }
    }
    Err(VcsError::ReferenceNotFound(reference.to_string()))
}

fn describe_commit(repo: &Repository, commit: &git2::Commit<'_>) -> Result<Commit, VcsError> {
    let id = commit.id().to_string();
    let author = commit.author();

    Ok(Commit {
        hash: id.chars().take(7).collect(),
        author: author.name().unwrap_or_default().to_string(),
        date: format_time(&commit.time()),
        message: commit.summary().unwrap_or_default().to_string(),
        changes: commit_changes(repo, commit)?,
    })
}

/// Name-status changes of `commit` against its first parent
fn commit_changes(
    repo: &Repository,
    commit: &git2::Commit<'_>,
) -> Result<Vec<FileChange>, VcsError> {
    let tree = commit.tree()?;
    let parent_tree = match commit.parent(0) {
        Ok(parent) => Some(parent.tree()?),
        Err(_) => None,
    };

    let mut diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;
    diff.find_similar(None)?;

    let changes = diff
        .deltas()
        .filter_map(|delta| {
            let status = status_letter(delta.status())?;
            let file = if delta.status() == Delta::Deleted {
                delta.old_file()
            } else {
                delta.new_file()
            };
            let path = file.path()?.to_string_lossy().into_owned();
            Some(FileChange {
                status: status.to_string(),
                path,
            })
        })
        .collect();
    Ok(changes)
}

fn status_letter(delta: Delta) -> Option<char> {
    match delta {
        Delta::Added => Some('A'),
        Delta::Deleted => Some('D'),
        Delta::Modified => Some('M'),
        Delta::Renamed => Some('R'),
        Delta::Copied => Some('C'),
        Delta::Typechange => Some('T'),
        _ => None,
    }
}

/// Git's `--date=iso` rendering: `2024-05-01 13:45:00 +0200`
fn format_time(time: &git2::Time) -> String {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)
        .or_else(|| FixedOffset::east_opt(0));
    match (DateTime::from_timestamp(time.seconds(), 0), offset) {
        (Some(utc), Some(offset)) => utc
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S %z")
            .to_string(),
        _ => time.seconds().to_string(),
    }
}
