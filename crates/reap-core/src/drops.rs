//! Drop computation for one harvested cell.
//!
//! The world evaluates its own drop table; this module only takes back the
//! single seed that replanting consumes.

use reap_types::{Actor, BlockPos, CellState, DropSet, Hand, ItemId, ItemStack};
use reap_world::World;

/// The drops of harvesting `cell` at `pos` with the item in `hand`, minus
/// one unit of the crop's replant item.
pub fn compute_drops<W>(world: &W, cell: &CellState, pos: BlockPos, actor: &Actor, hand: Hand) -> DropSet
where
    W: World + ?Sized,
{
    let mut drops = world.compute_raw_drops(cell, pos, actor, actor.item_in(hand));
    if let Some(seed) = world.replant_item(cell, pos) {
        remove_one_seed(&mut drops, &seed);
    }
    DropSet::new(drops)
}

/// Take one unit from the first stack of `seed`, dropping the slot if it
/// empties. Returns whether a unit was removed.
pub fn remove_one_seed(drops: &mut Vec<ItemStack>, seed: &ItemId) -> bool {
    let Some(index) = drops.iter().position(|stack| stack.item == *seed && stack.count > 0) else {
        return false;
    };
    if let Some(stack) = drops.get_mut(index) {
        stack.shrink(1);
        if stack.count == 0 {
            drops.remove(index);
        }
    }
    true
}

/// Whether drop listeners left `drops` different from what was computed.
pub fn have_drops_changed(drops: &DropSet) -> bool {
    drops.changed()
}
