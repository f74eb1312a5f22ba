//! Per-cell eligibility: is it a crop, is it grown, which hand acts.

use reap_types::{Actor, AgeLookupError, AgeProperty, CellState, Hand};

use crate::config::HarvestConfig;
use crate::quirks::CropQuirks;

/// Answers the per-cell questions the orchestrator asks before harvesting.
///
/// Crop recognition depends on the configuration snapshot and the crop
/// overrides, so it is a method. Age and hand checks depend only on their
/// arguments.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityChecker<'a> {
    config: &'a HarvestConfig,
    quirks: &'a CropQuirks,
}

impl<'a> EligibilityChecker<'a> {
    /// A checker over the given settings and crop overrides.
    pub const fn new(config: &'a HarvestConfig, quirks: &'a CropQuirks) -> Self {
        Self { config, quirks }
    }

    /// Whether `cell` holds something this engine harvests.
    ///
    /// Built-in crop kinds qualify unless their identity is excluded; any
    /// identity listed in the config qualifies regardless of kind.
    pub fn is_recognized_crop(&self, cell: &CellState) -> bool {
        if self.config.lists_crop(&cell.block) {
            return true;
        }
        cell.kind.is_builtin_crop() && !self.quirks.is_excluded(&cell.block)
    }

    /// Resolve the age property of `cell`.
    pub fn resolve_age(cell: &CellState) -> Result<AgeProperty, AgeLookupError> {
        AgeProperty::resolve(cell)
    }

    /// Whether `cell` has reached the top of its declared age range.
    pub fn is_mature(cell: &CellState, age: AgeProperty) -> bool {
        age.current(cell) >= age.max
    }

    /// The hand an interaction is performed with, if any.
    ///
    /// A hoe in the main hand wins, then a hoe in the off hand. Without a
    /// hoe the main hand acts only when `require_tool` is off. Crouching
    /// never harvests.
    pub fn select_hand(actor: &Actor, require_tool: bool) -> Option<Hand> {
        if actor.crouching {
            return None;
        }
        if actor.main_hand.is_hoe() {
            Some(Hand::MainHand)
        } else if actor.off_hand.is_hoe() {
            Some(Hand::OffHand)
        } else if require_tool {
            None
        } else {
            Some(Hand::MainHand)
        }
    }
}

#[cfg(test)]
mod tests {
    use reap_types::{
        ActorId, BlockId, BlockKind, ItemStack, Property, ToolInfo, ToolKind, AGE_PROPERTY,
    };

    use super::*;

    fn crop(block: &str, kind: BlockKind, age: i32, max: i32) -> CellState {
        CellState::new(BlockId::new(block), kind, true)
            .with_property(Property::int_range(AGE_PROPERTY, age, max))
    }

    fn hoe() -> ItemStack {
        ItemStack::tool("minecraft:stone_hoe", ToolInfo::new(ToolKind::Hoe, Some("stone"), 131))
    }

    fn sword() -> ItemStack {
        ItemStack::tool("minecraft:iron_sword", ToolInfo::new(ToolKind::Sword, Some("iron"), 250))
    }

    #[test]
    fn builtin_kinds_are_crops() {
        let config = HarvestConfig::default();
        let quirks = CropQuirks::vanilla();
        let checker = EligibilityChecker::new(&config, &quirks);

        assert!(checker.is_recognized_crop(&crop("minecraft:wheat", BlockKind::Crop, 0, 7)));
        assert!(checker.is_recognized_crop(&crop("minecraft:nether_wart", BlockKind::NetherWart, 0, 3)));
        assert!(checker.is_recognized_crop(&crop("minecraft:cocoa", BlockKind::Cocoa, 0, 2)));
        assert!(checker.is_recognized_crop(&crop("minecraft:pitcher_crop", BlockKind::PitcherCrop, 0, 4)));
        assert!(!checker.is_recognized_crop(&CellState::air()));
    }

    #[test]
    fn torchflower_is_excluded_unless_listed() {
        let torchflower = crop("minecraft:torchflower_crop", BlockKind::Crop, 1, 1);
        let quirks = CropQuirks::vanilla();

        let config = HarvestConfig::default();
        assert!(!EligibilityChecker::new(&config, &quirks).is_recognized_crop(&torchflower));

        let config = HarvestConfig {
            crops: vec![BlockId::new("minecraft:torchflower_crop")],
            ..HarvestConfig::default()
        };
        assert!(EligibilityChecker::new(&config, &quirks).is_recognized_crop(&torchflower));
    }

    #[test]
    fn allow_list_admits_other_blocks() {
        let berries = crop("examplemod:berry_bush", BlockKind::Other, 3, 3);
        let quirks = CropQuirks::vanilla();
        let config = HarvestConfig::default();
        assert!(!EligibilityChecker::new(&config, &quirks).is_recognized_crop(&berries));

        let config = HarvestConfig {
            crops: vec![BlockId::new("examplemod:berry_bush")],
            ..HarvestConfig::default()
        };
        assert!(EligibilityChecker::new(&config, &quirks).is_recognized_crop(&berries));
    }

    #[test]
    fn maturity_compares_against_declared_maximum() {
        let grown = crop("minecraft:wheat", BlockKind::Crop, 7, 7);
        let growing = crop("minecraft:wheat", BlockKind::Crop, 6, 7);
        let age = EligibilityChecker::resolve_age(&grown);
        assert_eq!(age, Ok(AgeProperty { max: 7 }));
        let age = age.unwrap_or(AgeProperty { max: 0 });
        assert!(EligibilityChecker::is_mature(&grown, age));
        assert!(!EligibilityChecker::is_mature(&growing, age));
    }

    #[test]
    fn unset_age_counts_as_zero() {
        let mut cell = crop("minecraft:wheat", BlockKind::Crop, 0, 7);
        if let Some(property) = cell.properties.first_mut() {
            property.value = reap_types::PropertyValue::Int {
                value: None,
                allowed: vec![0],
            };
        }
        assert_eq!(AgeProperty { max: 0 }.current(&cell), 0);
        assert!(EligibilityChecker::is_mature(&cell, AgeProperty { max: 0 }));
    }

    #[test]
    fn missing_age_is_reported() {
        let bare = CellState::new(BlockId::new("examplemod:odd"), BlockKind::Crop, true);
        assert_eq!(EligibilityChecker::resolve_age(&bare), Err(AgeLookupError::Missing));
    }

    #[test]
    fn hand_selection_prefers_hoes() {
        let id = ActorId::new();

        let main_hoe = Actor::new(id).holding(hoe()).holding_off_hand(hoe());
        assert_eq!(EligibilityChecker::select_hand(&main_hoe, true), Some(Hand::MainHand));

        let off_hoe = Actor::new(id).holding(sword()).holding_off_hand(hoe());
        assert_eq!(EligibilityChecker::select_hand(&off_hoe, true), Some(Hand::OffHand));
        assert_eq!(EligibilityChecker::select_hand(&off_hoe, false), Some(Hand::OffHand));

        let bare = Actor::new(id).holding(sword());
        assert_eq!(EligibilityChecker::select_hand(&bare, true), None);
        assert_eq!(EligibilityChecker::select_hand(&bare, false), Some(Hand::MainHand));
    }

    #[test]
    fn crouching_never_selects_a_hand() {
        let mut actor = Actor::new(ActorId::new()).holding(hoe());
        actor.crouching = true;
        assert_eq!(EligibilityChecker::select_hand(&actor, false), None);
        assert_eq!(EligibilityChecker::select_hand(&actor, true), None);
    }
}
