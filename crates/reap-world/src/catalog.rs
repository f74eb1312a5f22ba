//! Crop definitions for the reference world.
//!
//! Each [`CropDefinition`] describes one crop block: its structural family,
//! growth range, extra properties, what it drops, which item replants it,
//! and how it sounds. [`CropCatalog::vanilla`] covers the vanilla crops plus
//! two modded lookalikes used to exercise the multi-segment rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use reap_types::{
    AGE_PROPERTY, BlockId, BlockKind, CellState, ItemId, ItemStack, Property, SoundDescriptor,
};

use crate::error::WorldError;

/// Static description of one crop block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropDefinition {
    /// Block identity.
    pub block: BlockId,
    /// Structural family.
    pub kind: BlockKind,
    /// Whether the block carries the "crops" tag.
    pub tagged_crop: bool,
    /// Fully grown age.
    pub max_age: i32,
    /// Properties other than age, in declaration order.
    pub extra_properties: Vec<Property>,
    /// Item that replants the crop.
    pub replant_item: ItemId,
    /// Drops when broken fully grown.
    pub mature_drops: Vec<ItemStack>,
    /// Drops when broken early.
    pub immature_drops: Vec<ItemStack>,
    /// Whether the block has a collision volume.
    pub collision: bool,
    /// Break sound.
    pub sound: SoundDescriptor,
}

impl CropDefinition {
    /// Cell state of this crop at `age`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::AgeOutOfRange`] if `age` is outside `0..=max_age`.
    pub fn state(&self, age: i32) -> Result<CellState, WorldError> {
        if !(0..=self.max_age).contains(&age) {
            return Err(WorldError::AgeOutOfRange {
                block: self.block.clone(),
                age,
                max: self.max_age,
            });
        }
        let mut state = CellState::new(self.block.clone(), self.kind, self.tagged_crop)
            .with_property(Property::int_range(AGE_PROPERTY, age, self.max_age));
        state.properties.extend(self.extra_properties.iter().cloned());
        Ok(state)
    }

    /// Drops for breaking `cell`, depending on whether it is fully grown.
    pub fn drops_for(&self, cell: &CellState) -> Vec<ItemStack> {
        if cell.int_value(AGE_PROPERTY).unwrap_or(0) >= self.max_age {
            self.mature_drops.clone()
        } else {
            self.immature_drops.clone()
        }
    }
}

/// Lookup table of crop definitions keyed by block identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CropCatalog {
    crops: BTreeMap<BlockId, CropDefinition>,
}

impl CropCatalog {
    /// An empty catalog.
    pub const fn new() -> Self {
        Self {
            crops: BTreeMap::new(),
        }
    }

    /// Vanilla crops plus the modded tomato and corn lookalikes.
    pub fn vanilla() -> Self {
        let mut catalog = Self::new();

        catalog.insert(farmland(
            "minecraft:wheat",
            7,
            "minecraft:wheat_seeds",
            vec![stack("minecraft:wheat", 1), stack("minecraft:wheat_seeds", 2)],
            vec![stack("minecraft:wheat_seeds", 1)],
        ));
        catalog.insert(farmland(
            "minecraft:carrots",
            7,
            "minecraft:carrot",
            vec![stack("minecraft:carrot", 3)],
            vec![stack("minecraft:carrot", 1)],
        ));
        catalog.insert(farmland(
            "minecraft:potatoes",
            7,
            "minecraft:potato",
            vec![stack("minecraft:potato", 3)],
            vec![stack("minecraft:potato", 1)],
        ));
        catalog.insert(farmland(
            "minecraft:beetroots",
            3,
            "minecraft:beetroot_seeds",
            vec![stack("minecraft:beetroot", 1), stack("minecraft:beetroot_seeds", 2)],
            vec![stack("minecraft:beetroot_seeds", 1)],
        ));
        catalog.insert(farmland(
            "minecraft:torchflower_crop",
            1,
            "minecraft:torchflower_seeds",
            vec![stack("minecraft:torchflower_seeds", 1)],
            vec![stack("minecraft:torchflower_seeds", 1)],
        ));
        catalog.insert(CropDefinition {
            block: BlockId::new("minecraft:nether_wart"),
            kind: BlockKind::NetherWart,
            tagged_crop: false,
            max_age: 3,
            extra_properties: Vec::new(),
            replant_item: ItemId::new("minecraft:nether_wart"),
            mature_drops: vec![stack("minecraft:nether_wart", 3)],
            immature_drops: vec![stack("minecraft:nether_wart", 1)],
            collision: false,
            sound: sound("block.nether_wart.break"),
        });
        catalog.insert(CropDefinition {
            block: BlockId::new("minecraft:cocoa"),
            kind: BlockKind::Cocoa,
            tagged_crop: false,
            max_age: 2,
            extra_properties: vec![Property::enumeration(
                "facing",
                "north",
                &["north", "south", "west", "east"],
            )],
            replant_item: ItemId::new("minecraft:cocoa_beans"),
            mature_drops: vec![stack("minecraft:cocoa_beans", 3)],
            immature_drops: vec![stack("minecraft:cocoa_beans", 1)],
            collision: true,
            sound: sound("block.wood.break"),
        });
        catalog.insert(CropDefinition {
            block: BlockId::new("minecraft:pitcher_crop"),
            kind: BlockKind::PitcherCrop,
            tagged_crop: true,
            max_age: 4,
            extra_properties: vec![Property::enumeration("half", "lower", &["upper", "lower"])],
            replant_item: ItemId::new("minecraft:pitcher_pod"),
            mature_drops: vec![stack("minecraft:pitcher_plant", 1)],
            immature_drops: vec![stack("minecraft:pitcher_pod", 1)],
            collision: true,
            sound: sound("block.crop.break"),
        });
        catalog.insert(farmland(
            "farmersdelight:tomatoes",
            3,
            "farmersdelight:tomato_seeds",
            vec![stack("farmersdelight:tomato", 2), stack("farmersdelight:tomato_seeds", 1)],
            vec![stack("farmersdelight:tomato_seeds", 1)],
        ));
        catalog.insert(farmland(
            "examplemod:corn",
            3,
            "examplemod:corn_kernels",
            vec![stack("examplemod:corn", 2), stack("examplemod:corn_kernels", 1)],
            vec![stack("examplemod:corn_kernels", 1)],
        ));

        catalog
    }

    /// Add or replace a definition.
    pub fn insert(&mut self, definition: CropDefinition) {
        self.crops.insert(definition.block.clone(), definition);
    }

    /// Look up a definition.
    pub fn get(&self, block: &BlockId) -> Option<&CropDefinition> {
        self.crops.get(block)
    }

    /// Look up a definition by its string key.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownCrop`] if the block is not catalogued.
    pub fn require(&self, block: &str) -> Result<&CropDefinition, WorldError> {
        let id = BlockId::new(block);
        self.crops.get(&id).ok_or(WorldError::UnknownCrop(id))
    }

    /// Number of catalogued crops.
    pub fn len(&self) -> usize {
        self.crops.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

fn farmland(
    block: &str,
    max_age: i32,
    replant: &str,
    mature_drops: Vec<ItemStack>,
    immature_drops: Vec<ItemStack>,
) -> CropDefinition {
    CropDefinition {
        block: BlockId::new(block),
        kind: BlockKind::Crop,
        tagged_crop: true,
        max_age,
        extra_properties: Vec::new(),
        replant_item: ItemId::new(replant),
        mature_drops,
        immature_drops,
        collision: false,
        sound: sound("block.crop.break"),
    }
}

fn stack(item: &str, count: u32) -> ItemStack {
    ItemStack::new(item, count)
}

fn sound(name: &str) -> SoundDescriptor {
    SoundDescriptor {
        sound: name.to_owned(),
        volume: 1.0,
        pitch: 1.0,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn vanilla_catalog_has_every_builtin_family() {
        let catalog = CropCatalog::vanilla();
        assert_eq!(catalog.len(), 10);
        for kind in [
            BlockKind::Crop,
            BlockKind::NetherWart,
            BlockKind::Cocoa,
            BlockKind::PitcherCrop,
        ] {
            assert!(catalog.crops.values().any(|d| d.kind == kind), "{kind:?} missing");
        }
    }

    #[test]
    fn state_carries_age_and_extra_properties() {
        let catalog = CropCatalog::vanilla();
        let cocoa = catalog.require("minecraft:cocoa").map(|d| d.state(2));
        let Ok(Ok(state)) = cocoa else {
            panic!("cocoa state should build");
        };
        assert_eq!(state.int_value(AGE_PROPERTY), Some(2));
        assert!(state.property("facing").is_some());
    }

    #[test]
    fn age_out_of_range_is_rejected() {
        let catalog = CropCatalog::vanilla();
        let result = catalog.require("minecraft:beetroots").map(|d| d.state(4));
        assert!(matches!(result, Ok(Err(WorldError::AgeOutOfRange { max: 3, .. }))));
    }

    #[test]
    fn unknown_crop_is_rejected() {
        let catalog = CropCatalog::vanilla();
        assert!(matches!(
            catalog.require("minecraft:stone"),
            Err(WorldError::UnknownCrop(_))
        ));
    }

    #[test]
    fn drops_depend_on_maturity() {
        let catalog = CropCatalog::vanilla();
        let Ok(wheat) = catalog.require("minecraft:wheat") else {
            panic!("wheat should be catalogued");
        };
        let ripe = wheat.state(7).unwrap_or_else(|_| CellState::air());
        let young = wheat.state(2).unwrap_or_else(|_| CellState::air());
        assert_eq!(wheat.drops_for(&ripe).len(), 2);
        assert_eq!(wheat.drops_for(&young), vec![stack("minecraft:wheat_seeds", 1)]);
    }
}
