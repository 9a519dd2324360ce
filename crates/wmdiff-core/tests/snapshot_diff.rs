//! End-to-end tests: discover two snapshot trees and compare them

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use wmdiff_core::discovery::{flatten, Discoverer};
use wmdiff_core::{compare, AssetKind};

fn write(root: &Path, relative: &str, content: &str) -> anyhow::Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Minimal checkout shared by both snapshots
fn base_checkout(root: &Path) -> anyhow::Result<()> {
    write(root, "assets/IS/Packages/A/manifest.v3", "<manifest a/>")?;
    write(root, "assets/IS/Packages/A/ns/a/svc/flow.xml", "<flow a/>")?;
    write(root, "assets/IS/Packages/B/manifest.v3", "<manifest b/>")?;
    write(root, "assets/IS/Properties/DV_server.cnf", "port=5555")?;
    Ok(())
}

fn snapshot(root: &Path) -> Vec<wmdiff_core::Asset> {
    flatten(Discoverer::new().discover_all(root))
}

fn ids(assets: &[wmdiff_core::Asset]) -> Vec<String> {
    assets.iter().map(|a| a.asset_id().to_string()).collect()
}

#[test]
fn test_identical_trees_have_no_differences() -> anyhow::Result<()> {
    let base = TempDir::new()?;
    let head = TempDir::new()?;
    base_checkout(base.path())?;
    base_checkout(head.path())?;

    let result = compare(&snapshot(base.path()), &snapshot(head.path()));

    assert!(result.is_empty());
    Ok(())
}

#[test]
fn test_package_added_and_removed() -> anyhow::Result<()> {
    let base = TempDir::new()?;
    let head = TempDir::new()?;
    base_checkout(base.path())?;
    base_checkout(head.path())?;
    fs::remove_dir_all(head.path().join("assets/IS/Packages/B"))?;
    write(head.path(), "assets/IS/Packages/C/manifest.v3", "<manifest c/>")?;

    let result = compare(&snapshot(base.path()), &snapshot(head.path()));

    assert_eq!(ids(&result.added), vec!["package:C"]);
    assert_eq!(ids(&result.removed), vec!["package:B"]);
    assert!(result.modified.is_empty());
    Ok(())
}

#[test]
fn test_changed_service_marks_service_and_package_modified() -> anyhow::Result<()> {
    let base = TempDir::new()?;
    let head = TempDir::new()?;
    base_checkout(base.path())?;
    base_checkout(head.path())?;
    write(head.path(), "assets/IS/Packages/A/ns/a/svc/flow.xml", "<flow a changed/>")?;

    let result = compare(&snapshot(base.path()), &snapshot(head.path()));

    let modified: Vec<(AssetKind, String)> = result
        .modified
        .iter()
        .map(|m| (m.head.kind(), m.head.name().to_string()))
        .collect();
    assert_eq!(
        modified,
        vec![
            (AssetKind::Package, "A".to_string()),
            (AssetKind::Service, "a:svc".to_string()),
        ]
    );
    Ok(())
}

#[test]
fn test_package_level_change_leaves_service_unmodified() -> anyhow::Result<()> {
    let base = TempDir::new()?;
    let head = TempDir::new()?;
    base_checkout(base.path())?;
    base_checkout(head.path())?;
    write(head.path(), "assets/IS/Packages/A/manifest.v3", "<manifest a v2/>")?;

    let result = compare(&snapshot(base.path()), &snapshot(head.path()));

    let modified: Vec<String> = result
        .modified
        .iter()
        .map(|m| m.head.asset_id().to_string())
        .collect();
    assert_eq!(modified, vec!["package:A"]);
    Ok(())
}

#[test]
fn test_unrecognized_property_prefix_never_appears() -> anyhow::Result<()> {
    let base = TempDir::new()?;
    let head = TempDir::new()?;
    base_checkout(base.path())?;
    base_checkout(head.path())?;
    write(head.path(), "assets/IS/Properties/QA_config.dat", "qa=true")?;
    write(head.path(), "assets/IS/Properties/PD_server.cnf", "port=80")?;

    let result = compare(&snapshot(base.path()), &snapshot(head.path()));

    assert_eq!(ids(&result.added), vec!["properties:PD_server.cnf"]);
    assert!(result.removed.is_empty());
    assert!(result.modified.is_empty());
    Ok(())
}

#[test]
fn test_checkout_against_bare_local_folders() -> anyhow::Result<()> {
    let repo = TempDir::new()?;
    base_checkout(repo.path())?;

    // Local folders point straight at the asset collections
    let local_packages = TempDir::new()?;
    let local_properties = TempDir::new()?;
    write(local_packages.path(), "A/manifest.v3", "<manifest a/>")?;
    write(local_packages.path(), "A/ns/a/svc/flow.xml", "<flow a/>")?;
    write(local_properties.path(), "DV_server.cnf", "port=6666")?;

    let discoverer = Discoverer::new();
    let mut local = Vec::new();
    local.extend(
        discoverer
            .discover_packages(local_packages.path())
            .into_iter()
            .map(wmdiff_core::Asset::from),
    );
    local.extend(
        discoverer
            .discover_properties(local_properties.path())
            .into_iter()
            .map(wmdiff_core::Asset::from),
    );

    let result = compare(&snapshot(repo.path()), &flatten(local));

    assert!(result.added.is_empty());
    assert_eq!(ids(&result.removed), vec!["package:B"]);
    let modified: Vec<String> = result
        .modified
        .iter()
        .map(|m| m.base.asset_id().to_string())
        .collect();
    assert_eq!(modified, vec!["properties:DV_server.cnf"]);
    Ok(())
}
