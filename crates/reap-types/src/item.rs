//! Item stacks, tool descriptors, and drop sets.

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// Tool category of a held item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// The farming tool: qualifies for the hand requirement and multi-harvest.
    Hoe,
    /// Axe.
    Axe,
    /// Pickaxe.
    Pickaxe,
    /// Shovel.
    Shovel,
    /// Sword.
    Sword,
}

/// Tool capabilities of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool category.
    pub kind: ToolKind,
    /// Tier label (`"wood"`, `"iron"`, ...). `None` for unranked tools.
    pub tier: Option<String>,
    /// Damage accumulated so far.
    pub damage: u32,
    /// Damage at which the tool breaks. 0 for unbreakable tools.
    pub max_damage: u32,
}

impl ToolInfo {
    /// A fresh, undamaged tool.
    pub fn new(kind: ToolKind, tier: Option<&str>, max_damage: u32) -> Self {
        Self {
            kind,
            tier: tier.map(str::to_owned),
            damage: 0,
            max_damage,
        }
    }

    /// Whether this tool wears out at all.
    pub const fn is_damageable(&self) -> bool {
        self.max_damage > 0
    }
}

/// A quantity of one item, optionally carrying tool capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item identity.
    pub item: ItemId,
    /// Quantity. 0 means the stack is empty.
    pub count: u32,
    /// Tool capabilities, if the item is a tool.
    #[serde(default)]
    pub tool: Option<ToolInfo>,
}

impl ItemStack {
    /// A plain stack of `count` items.
    pub fn new(item: impl Into<ItemId>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
            tool: None,
        }
    }

    /// A single tool item.
    pub fn tool(item: impl Into<ItemId>, tool: ToolInfo) -> Self {
        Self {
            item: item.into(),
            count: 1,
            tool: Some(tool),
        }
    }

    /// The empty stack (an empty hand).
    pub fn empty() -> Self {
        Self::new(ItemId::new("minecraft:air"), 0)
    }

    /// Whether the stack holds nothing.
    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.item == *"minecraft:air"
    }

    /// Whether the stack is a hoe.
    pub fn is_hoe(&self) -> bool {
        !self.is_empty() && self.tool.as_ref().is_some_and(|t| t.kind == ToolKind::Hoe)
    }

    /// Same item and same quantity.
    pub fn matches(&self, other: &Self) -> bool {
        self.item == other.item && self.count == other.count
    }

    /// Remove up to `amount` items.
    pub const fn shrink(&mut self, amount: u32) {
        self.count = self.count.saturating_sub(amount);
    }

    /// Wear the tool down by `amount`, capped at its maximum damage.
    ///
    /// A tool whose damage reaches its maximum breaks and the stack becomes
    /// empty. Returns `true` if the tool broke. Non-damageable items are
    /// left untouched.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        let Some(tool) = self.tool.as_mut() else {
            return false;
        };
        if !tool.is_damageable() || amount == 0 {
            return false;
        }
        tool.damage = tool
            .damage
            .saturating_add(amount.min(tool.max_damage));
        if tool.damage >= tool.max_damage {
            *self = Self::empty();
            return true;
        }
        false
    }
}

/// Sound played at a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Sound event identity.
    pub sound: String,
    /// Playback volume.
    pub volume: f32,
    /// Playback pitch.
    pub pitch: f32,
}

/// The drops of one harvested cell.
///
/// Holds an immutable baseline, as computed from the world's drop table,
/// and a working copy that drop listeners are free to rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropSet {
    baseline: Vec<ItemStack>,
    working: Vec<ItemStack>,
}

impl DropSet {
    /// Start a drop set whose working copy equals `baseline`.
    pub fn new(baseline: Vec<ItemStack>) -> Self {
        Self {
            working: baseline.clone(),
            baseline,
        }
    }

    /// The drops as first computed.
    pub fn baseline(&self) -> &[ItemStack] {
        &self.baseline
    }

    /// The drops as they currently stand.
    pub fn working(&self) -> &[ItemStack] {
        &self.working
    }

    /// Mutable access to the working copy.
    pub const fn working_mut(&mut self) -> &mut Vec<ItemStack> {
        &mut self.working
    }

    /// Replace the working copy wholesale.
    pub fn set_working(&mut self, drops: Vec<ItemStack>) {
        self.working = drops;
    }

    /// Consume the set, keeping only the working copy.
    pub fn into_working(self) -> Vec<ItemStack> {
        self.working
    }

    /// Whether the working copy differs from the baseline.
    ///
    /// Same length and pairwise identity-and-quantity equality, index by
    /// index, is "unchanged". Reordering counts as a change.
    pub fn changed(&self) -> bool {
        self.baseline.len() != self.working.len()
            || self
                .baseline
                .iter()
                .zip(&self.working)
                .any(|(a, b)| !a.matches(b))
    }
}
