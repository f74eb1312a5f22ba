//! The world collaborator consumed by the harvest engine.

use reap_types::{
    Actor, ActorId, BlockPos, CellState, Direction, Hand, ItemId, ItemStack, SoundDescriptor,
    WorldKey,
};

/// Cell storage, drop tables, and effects provided by the host.
///
/// All calls are infallible at this layer: a host that cannot honour a
/// mutation deals with it on its own side. The engine relies on the host's
/// single-writer-per-tick guarantee and performs no locking.
pub trait World {
    /// Identity of this world, carried on every harvest event.
    fn key(&self) -> WorldKey;

    /// Whether this is the authoritative (server) side. Non-authoritative
    /// worlds never see mutations from the engine.
    fn is_authoritative(&self) -> bool;

    /// Current state of the cell at `pos`. Unloaded or empty cells read as air.
    fn cell_state(&self, pos: BlockPos) -> CellState;

    /// Replace the state of the cell at `pos`.
    fn set_cell_state(&mut self, pos: BlockPos, state: CellState);

    /// Break the cell at `pos`, attributing it to `actor`.
    ///
    /// Item drops are only spawned when `drop_items` is set. Returns whether
    /// anything was broken.
    fn break_cell(&mut self, pos: BlockPos, drop_items: bool, actor: ActorId) -> bool;

    /// Spawn `amount` experience at the centre of `pos`.
    fn spawn_experience(&mut self, pos: BlockPos, amount: u32);

    /// Play a sound at `pos`.
    fn play_sound(&mut self, pos: BlockPos, sound: &SoundDescriptor);

    /// Evaluate the drop table for breaking `cell` with `tool`.
    fn compute_raw_drops(
        &self,
        cell: &CellState,
        pos: BlockPos,
        actor: &Actor,
        tool: &ItemStack,
    ) -> Vec<ItemStack>;

    /// The item that plants `cell` (its "seed"), if any.
    fn replant_item(&self, cell: &CellState, pos: BlockPos) -> Option<ItemId>;

    /// The "drop items on break" game rule.
    fn drop_items_on_break(&self) -> bool;

    /// Whether `cell` has a collision volume.
    fn has_collision(&self, cell: &CellState, pos: BlockPos) -> bool;

    /// Release a drop into the world: popped out of `face` when given,
    /// otherwise dropped in place.
    fn release_drop(&mut self, pos: BlockPos, face: Option<Direction>, stack: ItemStack);

    /// The sound `cell` makes when broken.
    fn break_sound(&self, cell: &CellState) -> Option<SoundDescriptor>;

    /// Animate the actor's hand. Hosts without animation can ignore this.
    fn swing_hand(&mut self, actor: ActorId, hand: Hand) {
        let _ = (actor, hand);
    }
}
