//! Discovery module: Asset discovery in a snapshot directory
//!
//! A snapshot is either a full repository checkout (assets live under
//! `assets/IS/...`) or a bare folder pointing straight at the packages or
//! properties. Both shapes are handled by the same layout resolution.

mod discoverer;
mod layout;

use std::path::Path;

pub use crate::asset::flatten;
pub use discoverer::Discoverer;
pub use layout::Layout;

use crate::asset::{Asset, Package, Properties};

/// Discover packages with the default layout
#[must_use]
pub fn discover_packages(root: &Path) -> Vec<Package> {
    Discoverer::new().discover_packages(root)
}

/// Discover property files with the default layout
#[must_use]
pub fn discover_properties(root: &Path) -> Vec<Properties> {
    Discoverer::new().discover_properties(root)
}

/// Discover packages and properties with the default layout
#[must_use]
pub fn discover_all(root: &Path) -> Vec<Asset> {
    Discoverer::new().discover_all(root)
}
