//! Branches command: base reference vs head reference

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};
use wmdiff_core::{compare, flatten, Asset, Discoverer, GitRepo, ReportMetadata, Scenario};

use crate::commands::output;
use crate::commands::RunOptions;

/// Run the branches command
///
/// Both references are checked out in turn in one working tree under
/// `workdir`. Returns the path of the written report.
///
/// # Errors
/// Returns an error if the repository cannot be prepared, a reference cannot
/// be checked out, or the report cannot be written.
pub fn run(
    repo_url: &str,
    base: &str,
    head: &str,
    workdir: &Path,
    options: &RunOptions,
) -> Result<PathBuf> {
    let repo = GitRepo::in_workdir(repo_url, workdir);
    info!("Comparing {} against {} in {}", head, base, repo.name());

    repo.prepare()
        .with_context(|| format!("Failed to prepare {}", repo.remote_url()))?;

    let discoverer = Discoverer::new().with_parallel(options.parallel);
    let base_assets = snapshot(&repo, &discoverer, base)?;
    let head_assets = snapshot(&repo, &discoverer, head)?;

    let result = compare(&base_assets, &head_assets);

    let commits = match repo.commit_log(base, head) {
        Ok(commits) => commits,
        Err(e) => {
            warn!("Could not read commit log {}..{}: {}", base, head, e);
            Vec::new()
        }
    };

    let metadata = ReportMetadata::new(
        Scenario::BranchVsBranch,
        repo.remote_url(),
        repo.name(),
        base,
        head,
    );

    output::finish(&result, &metadata, &commits, options)
}

/// Check out `reference` and collect every asset in the working tree
///
/// # Errors
/// Returns an error if the reference cannot be checked out.
pub fn snapshot(
    repo: &GitRepo,
    discoverer: &Discoverer,
    reference: &str,
) -> Result<Vec<Asset>> {
    repo.checkout(reference)
        .with_context(|| format!("Failed to check out {reference}"))?;

    let assets = flatten(discoverer.discover_all(repo.local_path()));
    info!("{} assets on {}", assets.len(), reference);
    Ok(assets)
}
