//! Sparse in-memory world.
//!
//! [`GridWorld`] stores only occupied cells; everything else reads as air.
//! Drop tables, replant items, collision, and sounds come from a
//! [`CropCatalog`]. Every mutation is appended to a journal of
//! [`WorldEffect`] values so callers can observe exactly what a harvest did.

use std::collections::BTreeMap;

use reap_types::{
    Actor, ActorId, BlockPos, CellState, Direction, Hand, ItemId, ItemStack, SoundDescriptor,
    WorldKey,
};
use tracing::trace;

use crate::catalog::CropCatalog;
use crate::error::WorldError;
use crate::world::World;

/// One observable mutation of a [`GridWorld`].
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEffect {
    /// A cell state was replaced.
    SetState {
        /// The cell.
        pos: BlockPos,
        /// Its new state.
        state: CellState,
    },
    /// A cell was broken.
    Broken {
        /// The cell.
        pos: BlockPos,
        /// The state it had.
        state: CellState,
        /// Whether its drops were spawned.
        drop_items: bool,
        /// Who broke it.
        actor: ActorId,
    },
    /// Experience was spawned.
    Experience {
        /// Where.
        pos: BlockPos,
        /// How much.
        amount: u32,
    },
    /// A sound was played.
    Sound {
        /// Where.
        pos: BlockPos,
        /// What.
        sound: SoundDescriptor,
    },
    /// An item stack was released into the world.
    Released {
        /// Source cell.
        pos: BlockPos,
        /// Face it popped out of, `None` when dropped in place.
        face: Option<Direction>,
        /// The stack.
        stack: ItemStack,
    },
    /// An actor swung a hand.
    Swing {
        /// Who.
        actor: ActorId,
        /// Which hand.
        hand: Hand,
    },
}

/// A sparse grid of cells backed by a crop catalog.
#[derive(Debug, Clone)]
pub struct GridWorld {
    key: WorldKey,
    authoritative: bool,
    drop_items_on_break: bool,
    cells: BTreeMap<BlockPos, CellState>,
    catalog: CropCatalog,
    journal: Vec<WorldEffect>,
}

impl GridWorld {
    /// An empty authoritative world using the vanilla crop catalog.
    pub fn new(key: &str) -> Self {
        Self::with_catalog(key, CropCatalog::vanilla())
    }

    /// An empty authoritative world using `catalog`.
    pub fn with_catalog(key: &str, catalog: CropCatalog) -> Self {
        Self {
            key: WorldKey::new(key),
            authoritative: true,
            drop_items_on_break: true,
            cells: BTreeMap::new(),
            catalog,
            journal: Vec::new(),
        }
    }

    /// Mark this world as a non-authoritative (client) view.
    #[must_use]
    pub const fn client_side(mut self) -> Self {
        self.authoritative = false;
        self
    }

    /// Set the "drop items on break" game rule.
    pub const fn set_drop_items_on_break(&mut self, enabled: bool) {
        self.drop_items_on_break = enabled;
    }

    /// The crop catalog backing this world.
    pub const fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    /// Place an arbitrary state in an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateCell`] if the cell is occupied.
    pub fn place(&mut self, pos: BlockPos, state: CellState) -> Result<(), WorldError> {
        if self.cells.contains_key(&pos) {
            return Err(WorldError::DuplicateCell(pos));
        }
        self.cells.insert(pos, state);
        Ok(())
    }

    /// Plant a catalogued crop at `age` in an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownCrop`], [`WorldError::AgeOutOfRange`], or
    /// [`WorldError::DuplicateCell`].
    pub fn plant(&mut self, pos: BlockPos, block: &str, age: i32) -> Result<(), WorldError> {
        let state = self.catalog.require(block)?.state(age)?;
        self.place(pos, state)
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.len()
    }

    /// Every mutation recorded so far, oldest first.
    pub fn journal(&self) -> &[WorldEffect] {
        &self.journal
    }

    /// All stacks released into the world so far.
    pub fn released_items(&self) -> Vec<&ItemStack> {
        self.journal
            .iter()
            .filter_map(|effect| match effect {
                WorldEffect::Released { stack, .. } => Some(stack),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, effect: WorldEffect) {
        trace!(world = %self.key, ?effect, "World effect");
        self.journal.push(effect);
    }
}

impl World for GridWorld {
    fn key(&self) -> WorldKey {
        self.key.clone()
    }

    fn is_authoritative(&self) -> bool {
        self.authoritative
    }

    fn cell_state(&self, pos: BlockPos) -> CellState {
        self.cells.get(&pos).cloned().unwrap_or_else(CellState::air)
    }

    fn set_cell_state(&mut self, pos: BlockPos, state: CellState) {
        if state.is_air() {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, state.clone());
        }
        self.record(WorldEffect::SetState { pos, state });
    }

    fn break_cell(&mut self, pos: BlockPos, drop_items: bool, actor: ActorId) -> bool {
        let Some(state) = self.cells.remove(&pos) else {
            return false;
        };
        if drop_items && self.drop_items_on_break {
            let drops = self
                .catalog
                .get(&state.block)
                .map(|def| def.drops_for(&state))
                .unwrap_or_default();
            for stack in drops {
                self.release_drop(pos, None, stack);
            }
        }
        self.record(WorldEffect::Broken {
            pos,
            state,
            drop_items,
            actor,
        });
        true
    }

    fn spawn_experience(&mut self, pos: BlockPos, amount: u32) {
        self.record(WorldEffect::Experience { pos, amount });
    }

    fn play_sound(&mut self, pos: BlockPos, sound: &SoundDescriptor) {
        self.record(WorldEffect::Sound {
            pos,
            sound: sound.clone(),
        });
    }

    fn compute_raw_drops(
        &self,
        cell: &CellState,
        _pos: BlockPos,
        _actor: &Actor,
        _tool: &ItemStack,
    ) -> Vec<ItemStack> {
        self.catalog
            .get(&cell.block)
            .map(|def| def.drops_for(cell))
            .unwrap_or_default()
    }

    fn replant_item(&self, cell: &CellState, _pos: BlockPos) -> Option<ItemId> {
        self.catalog
            .get(&cell.block)
            .map(|def| def.replant_item.clone())
    }

    fn drop_items_on_break(&self) -> bool {
        self.drop_items_on_break
    }

    fn has_collision(&self, cell: &CellState, _pos: BlockPos) -> bool {
        self.catalog
            .get(&cell.block)
            .map_or(!cell.is_air(), |def| def.collision)
    }

    fn release_drop(&mut self, pos: BlockPos, face: Option<Direction>, stack: ItemStack) {
        if stack.is_empty() {
            return;
        }
        self.record(WorldEffect::Released { pos, face, stack });
    }

    fn break_sound(&self, cell: &CellState) -> Option<SoundDescriptor> {
        self.catalog.get(&cell.block).map(|def| def.sound.clone())
    }

    fn swing_hand(&mut self, actor: ActorId, hand: Hand) {
        self.record(WorldEffect::Swing { actor, hand });
    }
}

#[cfg(test)]
mod tests {
    use reap_types::{AGE_PROPERTY, BlockId, BlockKind};

    use super::*;

    #[test]
    fn empty_cells_read_as_air() {
        let world = GridWorld::new("minecraft:overworld");
        assert!(world.cell_state(BlockPos::new(0, 0, 0)).is_air());
    }

    #[test]
    fn planting_twice_is_rejected() {
        let mut world = GridWorld::new("minecraft:overworld");
        let pos = BlockPos::new(1, 64, 1);
        assert!(world.plant(pos, "minecraft:wheat", 7).is_ok());
        assert!(matches!(
            world.plant(pos, "minecraft:carrots", 0),
            Err(WorldError::DuplicateCell(_))
        ));
    }

    #[test]
    fn break_with_drops_releases_in_place() {
        let mut world = GridWorld::new("minecraft:overworld");
        let pos = BlockPos::new(0, 64, 0);
        assert!(world.plant(pos, "minecraft:carrots", 7).is_ok());
        assert!(world.break_cell(pos, true, ActorId::new()));
        assert!(world.cell_state(pos).is_air());
        assert_eq!(world.released_items(), vec![&ItemStack::new("minecraft:carrot", 3)]);
    }

    #[test]
    fn break_without_drops_releases_nothing() {
        let mut world = GridWorld::new("minecraft:overworld");
        let pos = BlockPos::new(0, 64, 0);
        assert!(world.plant(pos, "minecraft:carrots", 7).is_ok());
        assert!(world.break_cell(pos, false, ActorId::new()));
        assert!(world.released_items().is_empty());
    }

    #[test]
    fn breaking_air_is_a_no_op() {
        let mut world = GridWorld::new("minecraft:overworld");
        assert!(!world.break_cell(BlockPos::new(0, 0, 0), true, ActorId::new()));
        assert!(world.journal().is_empty());
    }

    #[test]
    fn setting_air_clears_the_cell() {
        let mut world = GridWorld::new("minecraft:overworld");
        let pos = BlockPos::new(0, 64, 0);
        assert!(world.plant(pos, "minecraft:pitcher_crop", 4).is_ok());
        world.set_cell_state(pos, CellState::air());
        assert_eq!(world.occupied(), 0);
    }

    #[test]
    fn uncatalogued_blocks_fall_back_to_solid() {
        let world = GridWorld::new("minecraft:overworld");
        let stone = CellState::new(BlockId::new("minecraft:stone"), BlockKind::Other, false);
        assert!(world.has_collision(&stone, BlockPos::new(0, 0, 0)));
        assert!(!world.has_collision(&CellState::air(), BlockPos::new(0, 0, 0)));
    }

    #[test]
    fn empty_stacks_are_not_released() {
        let mut world = GridWorld::new("minecraft:overworld");
        world.release_drop(BlockPos::new(0, 0, 0), None, ItemStack::new("minecraft:wheat", 0));
        assert!(world.journal().is_empty());
    }

    #[test]
    fn replant_item_comes_from_catalog() {
        let world = GridWorld::new("minecraft:overworld");
        let Ok(wheat) = world.catalog().require("minecraft:wheat") else {
            return;
        };
        let state = wheat.state(7).unwrap_or_else(|_| CellState::air());
        assert_eq!(state.int_value(AGE_PROPERTY), Some(7));
        assert_eq!(
            world.replant_item(&state, BlockPos::new(0, 0, 0)),
            Some(ItemId::new("minecraft:wheat_seeds"))
        );
    }
}
