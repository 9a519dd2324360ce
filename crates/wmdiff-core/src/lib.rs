//! wmdiff-core: Structural diff of webMethods Integration Server assets
//!
//! Discovers packages, flow services and environment property files in two
//! snapshots of a codebase, fingerprints their content with SHA-256, and
//! classifies every asset as added, removed or modified.
//!
//! # Pipeline
//!
//! 1. [`vcs::GitRepo`] forces a working tree to a reference
//! 2. [`discovery::Discoverer`] walks the tree and builds [`asset::Asset`]s
//! 3. [`asset::flatten`] lifts services out of their packages
//! 4. [`diff::compare`] matches both sides by identity and fingerprint
//! 5. [`report`] renders the outcome as HTML or JSON

pub mod asset;
pub mod diff;
pub mod discovery;
pub mod fingerprint;
pub mod report;
pub mod vcs;

// Re-export commonly used types
pub use asset::{flatten, Asset, AssetId, AssetKind, EnvironmentPrefix, Package, Properties, Service};
pub use diff::{compare, ComparisonResult, ModifiedAsset};
pub use discovery::{Discoverer, Layout};
pub use fingerprint::{fingerprint, Fingerprint, FingerprintError};
pub use report::{ReportFormat, ReportMetadata, Scenario};
pub use vcs::{Commit, GitRepo, VcsError};
