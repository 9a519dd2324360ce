//! Identity-keyed comparison of two flattened asset collections

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::asset::{Asset, AssetId};

/// Which snapshot an asset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Base,
    Head,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Head => write!(f, "head"),
        }
    }
}

/// The prior and current version of a changed asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifiedAsset {
    pub base: Asset,
    pub head: Asset,
}

/// An identity that occurred more than once within one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateIdentity {
    pub side: Side,
    pub asset_id: AssetId,
    /// Total occurrences; the last one was kept
    pub occurrences: usize,
}

/// Three-way classification of two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub added: Vec<Asset>,
    pub removed: Vec<Asset>,
    pub modified: Vec<ModifiedAsset>,
    /// Identity collisions found while indexing either side
    pub duplicates: Vec<DuplicateIdentity>,
}

/// Counts for summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl ComparisonResult {
    /// True when no asset was added, removed or modified
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    #[must_use]
    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            added: self.added.len(),
            removed: self.removed.len(),
            modified: self.modified.len(),
        }
    }
}

/// Assets keyed by identity, in first-appearance order, last value wins
struct IdentityIndex<'a> {
    entries: Vec<(AssetId, &'a Asset)>,
    positions: HashMap<AssetId, usize>,
    occurrences: HashMap<AssetId, usize>,
}

impl<'a> IdentityIndex<'a> {
    fn build(assets: &'a [Asset]) -> Self {
        let mut index = Self {
            entries: Vec::with_capacity(assets.len()),
            positions: HashMap::with_capacity(assets.len()),
            occurrences: HashMap::new(),
        };
        for asset in assets {
            let id = asset.asset_id();
            *index.occurrences.entry(id.clone()).or_insert(0) += 1;
            let existing = index.positions.get(&id).copied();
            match existing {
                Some(pos) => index.entries[pos].1 = asset,
                None => {
                    index.positions.insert(id.clone(), index.entries.len());
                    index.entries.push((id, asset));
                }
            }
        }
        index
    }

    fn get(&self, id: &AssetId) -> Option<&'a Asset> {
        self.positions.get(id).map(|&pos| self.entries[pos].1)
    }

    fn contains(&self, id: &AssetId) -> bool {
        self.positions.contains_key(id)
    }

    fn duplicates(&self, side: Side) -> Vec<DuplicateIdentity> {
        self.entries
            .iter()
            .filter_map(|(id, _)| {
                let occurrences = self.occurrences.get(id).copied().unwrap_or(1);
                (occurrences > 1).then(|| DuplicateIdentity {
                    side,
                    asset_id: id.clone(),
                    occurrences,
                })
            })
            .collect()
    }
}

/// Compare two flattened collections.
///
/// `added` and `modified` follow the order of `head`, `removed` the order
/// of `base`. An asset present on both sides is modified unless both
/// fingerprints are known and equal.
#[must_use]
pub fn compare(base: &[Asset], head: &[Asset]) -> ComparisonResult {
    let base_index = IdentityIndex::build(base);
    let head_index = IdentityIndex::build(head);

    let mut result = ComparisonResult::default();

    for (id, head_asset) in &head_index.entries {
        match base_index.get(id) {
            None => result.added.push((*head_asset).clone()),
            Some(base_asset) if !base_asset.same_content(head_asset) => {
                result.modified.push(ModifiedAsset {
                    base: base_asset.clone(),
                    head: (*head_asset).clone(),
                });
            }
            Some(_) => {}
        }
    }

    for (id, base_asset) in &base_index.entries {
        if !head_index.contains(id) {
            result.removed.push((*base_asset).clone());
        }
    }

    result.duplicates = base_index.duplicates(Side::Base);
    result.duplicates.extend(head_index.duplicates(Side::Head));
    for dup in &result.duplicates {
        warn!(
            "Duplicate asset identity {} in {} snapshot ({} occurrences, last one kept)",
            dup.asset_id, dup.side, dup.occurrences
        );
    }

    debug!(
        "Compared {} base and {} head assets: {} added, {} removed, {} modified",
        base.len(),
        head.len(),
        result.added.len(),
        result.removed.len(),
        result.modified.len()
    );
    result
}
