//! Per-crop behavioural overrides.
//!
//! A handful of crops look structurally like the others but need different
//! treatment. Rather than comparing identities inline, the orchestrator and
//! eligibility checker consult a [`CropQuirks`] table.

use std::collections::BTreeMap;

use reap_types::BlockId;

/// A behavioural override for one crop identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropQuirk {
    /// Never recognized as a crop unless explicitly listed in the config.
    Excluded,
    /// Grows as a stack of identical cells that are independent crops, so
    /// harvesting one must not walk down to a base or break the one above.
    SingleSegment,
    /// Harvesting clears the cell instead of resetting its age.
    RemovedOnHarvest,
}

/// Identity-keyed table of [`CropQuirk`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropQuirks {
    entries: BTreeMap<BlockId, CropQuirk>,
}

impl Default for CropQuirks {
    fn default() -> Self {
        Self::vanilla()
    }
}

impl CropQuirks {
    /// An empty table.
    pub const fn none() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The stock overrides: torchflower crops are left alone, tomato vines
    /// are per-cell crops, and pitcher crops are consumed whole.
    ///
    /// The torchflower exclusion is house policy. Structurally it is an
    /// ordinary crop, and listing `minecraft:torchflower_crop` under
    /// `harvest.crops` makes it harvestable again.
    pub fn vanilla() -> Self {
        Self::none()
            .with("minecraft:torchflower_crop", CropQuirk::Excluded)
            .with("farmersdelight:tomatoes", CropQuirk::SingleSegment)
            .with("minecraft:pitcher_crop", CropQuirk::RemovedOnHarvest)
    }

    /// Add or replace an override.
    #[must_use]
    pub fn with(mut self, block: &str, quirk: CropQuirk) -> Self {
        self.entries.insert(BlockId::new(block), quirk);
        self
    }

    /// The override for `block`, if any.
    pub fn quirk_of(&self, block: &BlockId) -> Option<CropQuirk> {
        self.entries.get(block).copied()
    }

    /// Whether `block` is excluded from the built-in crop kinds.
    pub fn is_excluded(&self, block: &BlockId) -> bool {
        self.quirk_of(block) == Some(CropQuirk::Excluded)
    }

    /// Whether `block` stacks as independent single-cell crops.
    pub fn is_single_segment(&self, block: &BlockId) -> bool {
        self.quirk_of(block) == Some(CropQuirk::SingleSegment)
    }

    /// Whether harvesting `block` clears its cell.
    pub fn is_removed_on_harvest(&self, block: &BlockId) -> bool {
        self.quirk_of(block) == Some(CropQuirk::RemovedOnHarvest)
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanilla_table() {
        let quirks = CropQuirks::vanilla();
        assert_eq!(quirks.len(), 3);
        assert!(quirks.is_excluded(&BlockId::new("minecraft:torchflower_crop")));
        assert!(quirks.is_single_segment(&BlockId::new("farmersdelight:tomatoes")));
        assert!(quirks.is_removed_on_harvest(&BlockId::new("minecraft:pitcher_crop")));
        assert_eq!(quirks.quirk_of(&BlockId::new("minecraft:wheat")), None);
    }

    #[test]
    fn overrides_replace_existing_entries() {
        let quirks = CropQuirks::vanilla().with("minecraft:torchflower_crop", CropQuirk::RemovedOnHarvest);
        assert_eq!(quirks.len(), 3);
        assert!(!quirks.is_excluded(&BlockId::new("minecraft:torchflower_crop")));
    }

    #[test]
    fn empty_table_has_no_quirks() {
        let quirks = CropQuirks::none();
        assert!(quirks.is_empty());
        assert!(!quirks.is_single_segment(&BlockId::new("farmersdelight:tomatoes")));
    }
}
