//! Harvest event payloads.
//!
//! Events are built fresh for every cell of every harvest pass and dropped
//! after dispatch. They own a snapshot of what they describe; listeners
//! that need live world access capture their own handles.

use reap_types::{ActorId, BlockPos, CellState, Direction, DropSet, Hand, HitResult, ItemStack, WorldKey};

/// The four event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Whether a cell may be harvested.
    Check,
    /// A cell is about to be harvested.
    Before,
    /// The drops of a harvested cell.
    Drops,
    /// A cell was harvested.
    After,
}

impl EventKind {
    /// Whether listeners may stop dispatch of this kind.
    pub const fn is_cancelable(self) -> bool {
        matches!(self, Self::Check | Self::Drops)
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Check => "check",
            Self::Before => "before",
            Self::Drops => "drops",
            Self::After => "after",
        })
    }
}

/// A payload dispatched through an [`EventBus`](crate::EventBus).
pub trait HarvestEvent {
    /// Which kind this payload is.
    const KIND: EventKind;

    /// Whether a listener cancelled further dispatch.
    ///
    /// Always `false` for non-cancelable kinds.
    fn is_canceled(&self) -> bool {
        false
    }
}

/// Where and by whom a cell is being harvested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSite {
    /// World of the interaction.
    pub world: WorldKey,
    /// State of the crop cell.
    pub target: CellState,
    /// Position of the crop cell.
    pub pos: BlockPos,
    /// The acting entity.
    pub actor: ActorId,
    /// Hand used.
    pub hand: Hand,
    /// Whether this is the clicked cell rather than one reached through
    /// area expansion.
    pub first: bool,
}

/// Fired when deciding whether a cell can be harvested.
#[derive(Debug, Clone)]
pub struct CheckEvent {
    site: HarvestSite,
    can_harvest: bool,
    canceled: bool,
}

impl CheckEvent {
    /// A check that allows harvesting unless a listener says otherwise.
    pub const fn new(site: HarvestSite) -> Self {
        Self {
            site,
            can_harvest: true,
            canceled: false,
        }
    }

    /// The cell being checked.
    pub const fn site(&self) -> &HarvestSite {
        &self.site
    }

    /// Current verdict.
    pub const fn can_harvest(&self) -> bool {
        self.can_harvest
    }

    /// Overwrite the verdict.
    pub const fn set_can_harvest(&mut self, can_harvest: bool) {
        self.can_harvest = can_harvest;
    }

    /// Stop dispatch; the verdict as currently set is final.
    pub const fn cancel(&mut self) {
        self.canceled = true;
    }
}

impl HarvestEvent for CheckEvent {
    const KIND: EventKind = EventKind::Check;

    fn is_canceled(&self) -> bool {
        self.canceled
    }
}

/// Generates a read-only notification payload for the server-side phases.
macro_rules! define_notification {
    (
        $(#[$meta:meta])*
        $name:ident => $kind:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            site: HarvestSite,
            face: Option<Direction>,
            hit: Option<HitResult>,
        }

        impl $name {
            /// Create the notification.
            pub const fn new(site: HarvestSite, face: Option<Direction>, hit: Option<HitResult>) -> Self {
                Self { site, face, hit }
            }

            /// The cell being harvested.
            pub const fn site(&self) -> &HarvestSite {
                &self.site
            }

            /// Struck face. `None` for cells reached through area expansion.
            pub const fn face(&self) -> Option<Direction> {
                self.face
            }

            /// Hit details. `None` for cells reached through area expansion.
            pub const fn hit(&self) -> Option<&HitResult> {
                self.hit.as_ref()
            }
        }

        impl HarvestEvent for $name {
            const KIND: EventKind = EventKind::$kind;
        }
    };
}

define_notification! {
    /// Fired right before a cell is harvested.
    BeforeHarvest => Before
}

define_notification! {
    /// Fired right after a cell was harvested.
    AfterHarvest => After
}

/// Fired once the drops of a harvested cell are known, before they are
/// released into the world.
#[derive(Debug, Clone)]
pub struct HarvestDrops {
    site: HarvestSite,
    face: Option<Direction>,
    hit: Option<HitResult>,
    drops: DropSet,
    canceled: bool,
}

impl HarvestDrops {
    /// Create the event around a freshly computed drop set.
    pub const fn new(
        site: HarvestSite,
        face: Option<Direction>,
        hit: Option<HitResult>,
        drops: DropSet,
    ) -> Self {
        Self {
            site,
            face,
            hit,
            drops,
            canceled: false,
        }
    }

    /// The cell being harvested.
    pub const fn site(&self) -> &HarvestSite {
        &self.site
    }

    /// Struck face. `None` for cells reached through area expansion.
    pub const fn face(&self) -> Option<Direction> {
        self.face
    }

    /// Hit details. `None` for cells reached through area expansion.
    pub const fn hit(&self) -> Option<&HitResult> {
        self.hit.as_ref()
    }

    /// Drops as they currently stand.
    pub fn drops(&self) -> &[ItemStack] {
        self.drops.working()
    }

    /// Edit the drops in place.
    pub const fn drops_mut(&mut self) -> &mut Vec<ItemStack> {
        self.drops.working_mut()
    }

    /// Replace the drops wholesale.
    pub fn set_drops(&mut self, drops: Vec<ItemStack>) {
        self.drops.set_working(drops);
    }

    /// Whether listeners changed the drops from their computed baseline.
    pub fn have_drops_changed(&self) -> bool {
        self.drops.changed()
    }

    /// Stop dispatch; the drops as currently set are final.
    pub const fn cancel(&mut self) {
        self.canceled = true;
    }

    /// Consume the event, yielding the final drop set.
    pub fn into_drops(self) -> DropSet {
        self.drops
    }
}

impl HarvestEvent for HarvestDrops {
    const KIND: EventKind = EventKind::Drops;

    fn is_canceled(&self) -> bool {
        self.canceled
    }
}

#[cfg(test)]
mod tests {
    use reap_types::{BlockId, BlockKind};

    use super::*;

    fn site() -> HarvestSite {
        HarvestSite {
            world: WorldKey::new("minecraft:overworld"),
            target: CellState::new(BlockId::new("minecraft:wheat"), BlockKind::Crop, true),
            pos: BlockPos::new(0, 64, 0),
            actor: ActorId::new(),
            hand: Hand::MainHand,
            first: true,
        }
    }

    #[test]
    fn cancelable_kinds() {
        assert!(CheckEvent::KIND.is_cancelable());
        assert!(HarvestDrops::KIND.is_cancelable());
        assert!(!BeforeHarvest::KIND.is_cancelable());
        assert!(!AfterHarvest::KIND.is_cancelable());
    }

    #[test]
    fn check_defaults_to_allowed() {
        let mut event = CheckEvent::new(site());
        assert!(event.can_harvest());
        event.set_can_harvest(false);
        event.cancel();
        assert!(!event.can_harvest());
        assert!(event.is_canceled());
    }

    #[test]
    fn drops_track_changes() {
        let mut event = HarvestDrops::new(
            site(),
            Some(Direction::Up),
            None,
            DropSet::new(vec![ItemStack::new("minecraft:wheat", 1)]),
        );
        assert!(!event.have_drops_changed());
        event.drops_mut().push(ItemStack::new("minecraft:diamond", 1));
        assert!(event.have_drops_changed());
        assert_eq!(event.drops().len(), 2);
    }

    #[test]
    fn notifications_expose_strike() {
        let event = BeforeHarvest::new(site(), None, None);
        assert!(event.site().first);
        assert!(event.face().is_none());
        assert!(event.hit().is_none());
        assert!(!event.is_canceled());
    }
}
