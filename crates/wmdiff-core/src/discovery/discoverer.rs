//! Discoverer: Walks a snapshot and builds typed assets

use std::fs;
use std::path::{Component, Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::Layout;
use crate::asset::{Asset, AssetKind, EnvironmentPrefix, Package, Properties, Service};
use crate::fingerprint::{fingerprint, Fingerprint};

/// Discovers packages, services and property files below a root directory
#[derive(Debug, Clone, Default)]
pub struct Discoverer {
    layout: Layout,
    parallel: bool,
}

impl Discoverer {
    /// Create a discoverer using the standard IS layout
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom layout
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Fingerprint packages and services on the rayon thread pool
    ///
    /// Output order is the same as for a sequential pass.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Discover packages and properties; packages come first
    #[must_use]
    pub fn discover_all(&self, root: &Path) -> Vec<Asset> {
        let mut assets: Vec<Asset> = self
            .discover_packages(root)
            .into_iter()
            .map(Asset::Package)
            .collect();
        assets.extend(self.discover_properties(root).into_iter().map(Asset::Properties));
        assets
    }

    /// Discover every package (with its services) below `root`
    #[must_use]
    pub fn discover_packages(&self, root: &Path) -> Vec<Package> {
        let packages_root = self.layout.packages_root(root);
        if !packages_root.is_dir() {
            debug!("No packages directory at {}", packages_root.display());
            return Vec::new();
        }

        let candidates: Vec<PathBuf> = sorted_entries(&packages_root)
            .into_iter()
            .filter(|path| path.is_dir() && path.join(&self.layout.package_marker).exists())
            .collect();

        let packages = self.map_ordered(&candidates, |dir| self.build_package(dir));
        info!(
            "Discovered {} packages in {}",
            packages.len(),
            packages_root.display()
        );
        packages
    }

    /// Discover property files with a recognized environment prefix
    #[must_use]
    pub fn discover_properties(&self, root: &Path) -> Vec<Properties> {
        let properties_root = self.layout.properties_root(root);
        if !properties_root.is_dir() {
            debug!("No properties directory at {}", properties_root.display());
            return Vec::new();
        }

        let mut discovered = Vec::new();
        for path in sorted_entries(&properties_root) {
            if !path.is_file() {
                continue;
            }
            let name = file_name(&path);
            let Some(environment) = EnvironmentPrefix::from_file_name(&name) else {
                debug!("Skipping property file without environment prefix: {}", name);
                continue;
            };
            let fp = fingerprint_or_warn(AssetKind::Properties, &name, &path);
            discovered.push(Properties::new(name, path, fp, environment));
        }

        info!(
            "Discovered {} properties in {}",
            discovered.len(),
            properties_root.display()
        );
        discovered
    }

    fn build_package(&self, dir: &Path) -> Package {
        let name = file_name(dir);
        let fp = fingerprint_or_warn(AssetKind::Package, &name, dir);
        let services = self.discover_services(dir, &name);
        debug!("Package {} has {} services", name, services.len());
        Package::new(name, dir, fp).with_services(services)
    }

    fn discover_services(&self, package_dir: &Path, package_name: &str) -> Vec<Service> {
        let services_root = package_dir.join(&self.layout.services_dir);
        if !services_root.is_dir() {
            return Vec::new();
        }

        let mut service_dirs: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(&services_root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error walking services of {}: {}", package_name, e);
                    continue;
                }
            };
            if entry.file_name() == self.layout.service_descriptor.as_str()
                && entry.path().is_file()
            {
                if let Some(parent) = entry.path().parent() {
                    service_dirs.push(parent.to_path_buf());
                }
            }
        }
        service_dirs.sort();

        let named: Vec<(String, PathBuf)> = service_dirs
            .into_iter()
            .filter_map(|dir| {
                let relative = dir.strip_prefix(&services_root).ok()?;
                match service_name(relative) {
                    Some(name) => Some((name, dir)),
                    None => {
                        warn!(
                            "Ignoring {} placed directly in {} of package {}",
                            self.layout.service_descriptor,
                            self.layout.services_dir,
                            package_name
                        );
                        None
                    }
                }
            })
            .collect();

        self.map_ordered(&named, |(name, dir)| {
            let fp = fingerprint_or_warn(AssetKind::Service, name, dir);
            Service::new(name.clone(), package_name, dir.clone(), fp)
        })
    }

    fn map_ordered<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.parallel {
            items.par_iter().map(f).collect()
        } else {
            items.iter().map(f).collect()
        }
    }
}

/// Derive a dotted service name from its directory relative to `ns/`.
///
/// `a/b/c` becomes `a.b:c`; a single segment is used verbatim.
pub(crate) fn service_name(relative: &Path) -> Option<String> {
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    match segments.as_slice() {
        [] => None,
        [single] => Some(single.clone()),
        [namespace @ .., leaf] => Some(format!("{}:{}", namespace.join("."), leaf)),
    }
}

fn fingerprint_or_warn(kind: AssetKind, name: &str, path: &Path) -> Option<Fingerprint> {
    match fingerprint(path) {
        Ok(fp) => Some(fp),
        Err(e) => {
            warn!("Could not fingerprint {} {}: {}", kind, name, e);
            None
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Immediate children of `dir`, sorted by path
fn sorted_entries(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!("Failed to read entry in {}: {}", dir.display(), e);
                None
            }
        })
        .collect();
    paths.sort();
    paths
}
