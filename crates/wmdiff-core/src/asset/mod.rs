//! Asset module: Typed representation of discoverable IS assets
//!
//! Assets form a closed set of kinds (packages, flow services, property
//! files). Each one carries a content fingerprint and derives its identity
//! from kind and name only, so the same asset can be matched across two
//! snapshots regardless of where it lives on disk.

mod model;

pub use model::{
    flatten, Asset, AssetId, AssetKind, EnvironmentPrefix, Package, Properties, Service,
};

#[cfg(test)]
mod tests;
