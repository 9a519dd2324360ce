//! Diff module: Added / removed / modified classification
//!
//! The engine knows nothing about asset kinds beyond their identity string.
//! It works on flattened collections, so services are compared on their own
//! fingerprints independently of the package that contains them.

mod engine;

pub use engine::{
    compare, ComparisonResult, ComparisonSummary, DuplicateIdentity, ModifiedAsset, Side,
};
