//! Directory layout conventions for IS assets

use std::path::{Path, PathBuf};

use tracing::debug;

/// Where each asset kind lives and how it is recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Packages root relative to a repository checkout
    pub packages_subpath: PathBuf,
    /// Properties root relative to a repository checkout
    pub properties_subpath: PathBuf,
    /// File that marks a directory as a package
    pub package_marker: String,
    /// Directory inside a package holding the service tree
    pub services_dir: String,
    /// File that marks a directory as a flow service
    pub service_descriptor: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            packages_subpath: ["assets", "IS", "Packages"].iter().collect(),
            properties_subpath: ["assets", "IS", "Properties"].iter().collect(),
            package_marker: "manifest.v3".to_string(),
            services_dir: "ns".to_string(),
            service_descriptor: "flow.xml".to_string(),
        }
    }
}

impl Layout {
    /// Effective packages root for `root`
    #[must_use]
    pub fn packages_root(&self, root: &Path) -> PathBuf {
        resolve(root, &self.packages_subpath)
    }

    /// Effective properties root for `root`
    #[must_use]
    pub fn properties_root(&self, root: &Path) -> PathBuf {
        resolve(root, &self.properties_subpath)
    }
}

/// Use `root/subpath` when it exists, else treat `root` as the asset folder
fn resolve(root: &Path, subpath: &Path) -> PathBuf {
    let nested = root.join(subpath);
    if nested.exists() {
        debug!("Using nested layout root {}", nested.display());
        nested
    } else {
        root.to_path_buf()
    }
}
