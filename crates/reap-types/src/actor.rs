//! The acting entity.

use serde::{Deserialize, Serialize};

use crate::ids::ActorId;
use crate::item::ItemStack;

/// Interaction mode of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Regular play.
    Survival,
    /// Tools never wear out.
    Creative,
    /// Restricted interaction with the world.
    Adventure,
    /// Non-interactive observer.
    Spectator,
}

impl GameMode {
    /// Observers never interact with cells.
    pub const fn is_observer(self) -> bool {
        matches!(self, Self::Spectator)
    }

    /// Whether held tools are immune to wear.
    pub const fn is_damage_immune(self) -> bool {
        matches!(self, Self::Creative)
    }
}

/// Which hand an interaction uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    /// Primary hand.
    MainHand,
    /// Secondary hand.
    OffHand,
}

/// An entity performing an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identity.
    pub id: ActorId,
    /// Current game mode.
    pub mode: GameMode,
    /// Whether the actor is crouching.
    pub crouching: bool,
    /// Item in the main hand.
    pub main_hand: ItemStack,
    /// Item in the off hand.
    pub off_hand: ItemStack,
}

impl Actor {
    /// A survival-mode actor with empty hands.
    pub fn new(id: ActorId) -> Self {
        Self {
            id,
            mode: GameMode::Survival,
            crouching: false,
            main_hand: ItemStack::empty(),
            off_hand: ItemStack::empty(),
        }
    }

    /// Builder-style main hand item.
    #[must_use]
    pub fn holding(mut self, item: ItemStack) -> Self {
        self.main_hand = item;
        self
    }

    /// Builder-style off hand item.
    #[must_use]
    pub fn holding_off_hand(mut self, item: ItemStack) -> Self {
        self.off_hand = item;
        self
    }

    /// Builder-style game mode.
    #[must_use]
    pub const fn in_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// The item held in `hand`.
    pub const fn item_in(&self, hand: Hand) -> &ItemStack {
        match hand {
            Hand::MainHand => &self.main_hand,
            Hand::OffHand => &self.off_hand,
        }
    }

    /// Mutable access to the item held in `hand`.
    pub const fn item_in_mut(&mut self, hand: Hand) -> &mut ItemStack {
        match hand {
            Hand::MainHand => &mut self.main_hand,
            Hand::OffHand => &mut self.off_hand,
        }
    }
}
