//! Local command: repository reference vs local packages/properties folders

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;
use wmdiff_core::{compare, flatten, Asset, Discoverer, GitRepo, ReportMetadata, Scenario};

use crate::commands::branches::snapshot;
use crate::commands::output;
use crate::commands::RunOptions;

/// Run the local command
///
/// At least one of `packages` and `properties` must be given; a kind whose
/// folder is omitted is absent from the local side. Returns the path of the
/// written report.
///
/// # Errors
/// Returns an error if no folder is given, a given folder does not exist,
/// the repository cannot be prepared or checked out, or the report cannot be
/// written.
pub fn run(
    repo_url: &str,
    branch: &str,
    packages: Option<&Path>,
    properties: Option<&Path>,
    workdir: &Path,
    options: &RunOptions,
) -> Result<PathBuf> {
    if packages.is_none() && properties.is_none() {
        bail!("At least one of --packages or --properties is required");
    }
    let packages = packages.map(absolute).transpose()?;
    let properties = properties.map(absolute).transpose()?;

    let repo = GitRepo::in_workdir(repo_url, workdir);
    info!("Comparing {} in {} against local folders", branch, repo.name());

    repo.prepare()
        .with_context(|| format!("Failed to prepare {}", repo.remote_url()))?;

    let discoverer = Discoverer::new().with_parallel(options.parallel);
    let base_assets = snapshot(&repo, &discoverer, branch)?;
    let local_assets = local_snapshot(&discoverer, packages.as_deref(), properties.as_deref());
    info!("{} assets in local folders", local_assets.len());

    let result = compare(&base_assets, &local_assets);

    let mut metadata = ReportMetadata::new(
        Scenario::BranchVsLocal,
        repo.remote_url(),
        repo.name(),
        branch,
        "Local Folders",
    )
    .with_target_extra("");
    if let Some(path) = packages {
        metadata = metadata.with_local_packages(path);
    }
    if let Some(path) = properties {
        metadata = metadata.with_local_properties(path);
    }

    output::finish(&result, &metadata, &[], options)
}

/// Assets of the given local folders, packages first
pub fn local_snapshot(
    discoverer: &Discoverer,
    packages: Option<&Path>,
    properties: Option<&Path>,
) -> Vec<Asset> {
    let mut assets = Vec::new();
    if let Some(root) = packages {
        assets.extend(
            discoverer
                .discover_packages(root)
                .into_iter()
                .map(Asset::from),
        );
    }
    if let Some(root) = properties {
        assets.extend(
            discoverer
                .discover_properties(root)
                .into_iter()
                .map(Asset::from),
        );
    }
    flatten(assets)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Local folder not found: {}", path.display()))
}
