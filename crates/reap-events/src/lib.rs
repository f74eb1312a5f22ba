//! Phased, cancelable publish/subscribe for harvest events.
//!
//! External listeners observe and steer right-click harvesting through four
//! event kinds, each with its own [`EventBus`]:
//!
//! | Kind | Payload | Cancelable | Mutable result |
//! |---|---|---|---|
//! | Check | [`CheckEvent`] | yes | `can_harvest` |
//! | Before | [`BeforeHarvest`] | no | -- |
//! | Drops | [`HarvestDrops`] | yes | the drop list |
//! | After | [`AfterHarvest`] | no | -- |
//!
//! Every bus runs its listeners in three [`Phase`]s: Priority, Default,
//! Deferred. Within a phase, listeners run in registration order.
//!
//! # Modules
//!
//! - [`phase`] -- The three dispatch phases.
//! - [`event`] -- Event payloads and the [`HarvestEvent`] trait.
//! - [`bus`] -- The generic [`EventBus`] and the [`HarvestEvents`] bundle.

pub mod bus;
pub mod event;
pub mod phase;

pub use bus::{Dispatch, EventBus, HarvestEvents, Listener};
pub use event::{
    AfterHarvest, BeforeHarvest, CheckEvent, EventKind, HarvestDrops, HarvestEvent, HarvestSite,
};
pub use phase::Phase;
