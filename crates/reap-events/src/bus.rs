//! The phased event bus.
//!
//! Dispatch walks Priority, then Default, then Deferred listeners, each
//! phase in registration order. For cancelable kinds, dispatch stops the
//! moment a listener cancels the event: the remaining listeners of every
//! phase are skipped and the event's result stays as that listener left it.
//! Non-cancelable kinds always reach every listener.
//!
//! Dispatch borrows the bus immutably and registration needs `&mut`, so the
//! listener set is frozen for the duration of a dispatch. A listener that
//! holds a shared handle to the bus and dispatches from inside its callback
//! gets a nested dispatch that runs to completion before the outer one
//! resumes with its next listener.

use tracing::trace;

use crate::event::{AfterHarvest, BeforeHarvest, CheckEvent, HarvestDrops, HarvestEvent};
use crate::phase::Phase;

/// A registered callback.
pub type Listener<E> = Box<dyn Fn(&mut E) + Send + Sync>;

/// Outcome of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// How many listeners ran.
    pub invoked: usize,
    /// Phase in which a listener cancelled, if any.
    pub canceled_in: Option<Phase>,
}

/// Listeners for one event kind, grouped by phase.
pub struct EventBus<E> {
    priority: Vec<Listener<E>>,
    default: Vec<Listener<E>>,
    deferred: Vec<Listener<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            priority: Vec::new(),
            default: Vec::new(),
            deferred: Vec::new(),
        }
    }
}

impl<E> core::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("priority", &self.priority.len())
            .field("default", &self.default.len())
            .field("deferred", &self.deferred.len())
            .finish()
    }
}

impl<E: HarvestEvent> EventBus<E> {
    /// A bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener to `phase`.
    pub fn register<F>(&mut self, phase: Phase, listener: F)
    where
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        self.phase_mut(phase).push(Box::new(listener));
    }

    /// Number of listeners across all phases.
    pub fn len(&self) -> usize {
        Phase::ORDER.iter().map(|&phase| self.phase(phase).len()).sum()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run the listeners over `event`.
    pub fn dispatch(&self, event: &mut E) -> Dispatch {
        let mut invoked = 0_usize;
        for phase in Phase::ORDER {
            for listener in self.phase(phase) {
                listener(&mut *event);
                invoked = invoked.saturating_add(1);
                if E::KIND.is_cancelable() && event.is_canceled() {
                    trace!(kind = %E::KIND, %phase, invoked, "Dispatch cancelled");
                    return Dispatch {
                        invoked,
                        canceled_in: Some(phase),
                    };
                }
            }
        }
        trace!(kind = %E::KIND, invoked, "Dispatch complete");
        Dispatch {
            invoked,
            canceled_in: None,
        }
    }

    fn phase(&self, phase: Phase) -> &[Listener<E>] {
        match phase {
            Phase::Priority => &self.priority,
            Phase::Default => &self.default,
            Phase::Deferred => &self.deferred,
        }
    }

    const fn phase_mut(&mut self, phase: Phase) -> &mut Vec<Listener<E>> {
        match phase {
            Phase::Priority => &mut self.priority,
            Phase::Default => &mut self.default,
            Phase::Deferred => &mut self.deferred,
        }
    }
}

/// One bus per event kind.
#[derive(Debug, Default)]
pub struct HarvestEvents {
    /// Eligibility checks.
    pub check: EventBus<CheckEvent>,
    /// Pre-harvest notifications.
    pub before: EventBus<BeforeHarvest>,
    /// Drop rewriting.
    pub drops: EventBus<HarvestDrops>,
    /// Post-harvest notifications.
    pub after: EventBus<AfterHarvest>,
}

impl HarvestEvents {
    /// Buses with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the Check listeners and return the final verdict.
    pub fn can_harvest(&self, event: &mut CheckEvent) -> bool {
        self.check.dispatch(event);
        event.can_harvest()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use reap_types::{ActorId, BlockId, BlockKind, BlockPos, CellState, Hand, WorldKey};

    use super::*;
    use crate::event::HarvestSite;

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

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn Fn() + Send + Sync>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let handle = Arc::clone(&log);
        let make = move |name: &'static str| -> Box<dyn Fn() + Send + Sync> {
            let log = Arc::clone(&handle);
            Box::new(move || log.lock().unwrap().push(name))
        };
        (log, make)
    }

    #[test]
    fn phases_run_in_order_regardless_of_registration_order() {
        let (log, make) = recorder();
        let mut bus = EventBus::<BeforeHarvest>::new();
        let deferred = make("deferred");
        let default_a = make("default-a");
        let priority = make("priority");
        let default_b = make("default-b");
        bus.register(Phase::Deferred, move |_| deferred());
        bus.register(Phase::Default, move |_| default_a());
        bus.register(Phase::Priority, move |_| priority());
        bus.register(Phase::Default, move |_| default_b());

        let outcome = bus.dispatch(&mut BeforeHarvest::new(site(), None, None));

        assert_eq!(outcome.invoked, 4);
        assert_eq!(outcome.canceled_in, None);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["priority", "default-a", "default-b", "deferred"]
        );
    }

    #[test]
    fn priority_cancel_skips_later_phases() {
        let (log, make) = recorder();
        let mut bus = EventBus::<CheckEvent>::new();
        let later_default = make("default");
        let later_deferred = make("deferred");
        bus.register(Phase::Priority, |event: &mut CheckEvent| {
            event.set_can_harvest(false);
            event.cancel();
        });
        bus.register(Phase::Default, move |event: &mut CheckEvent| {
            later_default();
            event.set_can_harvest(true);
        });
        bus.register(Phase::Deferred, move |_| later_deferred());

        let mut event = CheckEvent::new(site());
        let outcome = bus.dispatch(&mut event);

        assert_eq!(outcome.invoked, 1);
        assert_eq!(outcome.canceled_in, Some(Phase::Priority));
        assert!(!event.can_harvest());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn cancel_keeps_value_set_at_cancellation() {
        let mut bus = EventBus::<CheckEvent>::new();
        bus.register(Phase::Priority, |event: &mut CheckEvent| event.set_can_harvest(false));
        bus.register(Phase::Default, |event: &mut CheckEvent| {
            event.set_can_harvest(true);
            event.cancel();
        });
        bus.register(Phase::Deferred, |event: &mut CheckEvent| event.set_can_harvest(false));

        let mut event = CheckEvent::new(site());
        let outcome = bus.dispatch(&mut event);

        assert_eq!(outcome.canceled_in, Some(Phase::Default));
        assert!(event.can_harvest());
    }

    #[test]
    fn last_writer_wins_without_cancel() {
        let mut events = HarvestEvents::new();
        events
            .check
            .register(Phase::Priority, |event: &mut CheckEvent| event.set_can_harvest(false));
        events
            .check
            .register(Phase::Deferred, |event: &mut CheckEvent| event.set_can_harvest(true));
        assert!(events.can_harvest(&mut CheckEvent::new(site())));
    }

    #[test]
    fn drops_listener_cancel_freezes_list() {
        let mut bus = EventBus::<HarvestDrops>::new();
        bus.register(Phase::Priority, |event: &mut HarvestDrops| {
            event.set_drops(Vec::new());
            event.cancel();
        });
        bus.register(Phase::Default, |event: &mut HarvestDrops| {
            event.drops_mut().push(reap_types::ItemStack::new("minecraft:diamond", 64));
        });

        let mut event = HarvestDrops::new(
            site(),
            None,
            None,
            reap_types::DropSet::new(vec![reap_types::ItemStack::new("minecraft:wheat", 1)]),
        );
        bus.dispatch(&mut event);

        assert!(event.drops().is_empty());
        assert!(event.have_drops_changed());
    }

    #[test]
    fn empty_bus_dispatches_nothing() {
        let bus = EventBus::<AfterHarvest>::new();
        assert!(bus.is_empty());
        let outcome = bus.dispatch(&mut AfterHarvest::new(site(), None, None));
        assert_eq!(outcome.invoked, 0);
    }

    #[test]
    fn nested_dispatch_completes_before_outer_resumes() {
        let (log, make) = recorder();
        let mut inner = EventBus::<AfterHarvest>::new();
        let inner_mark = make("inner");
        inner.register(Phase::Default, move |_| inner_mark());
        let inner = Arc::new(inner);

        let mut outer = EventBus::<BeforeHarvest>::new();
        let outer_first = make("outer-1");
        let outer_second = make("outer-2");
        let nested = Arc::clone(&inner);
        outer.register(Phase::Default, move |event: &mut BeforeHarvest| {
            outer_first();
            nested.dispatch(&mut AfterHarvest::new(event.site().clone(), None, None));
        });
        outer.register(Phase::Default, move |_| outer_second());

        outer.dispatch(&mut BeforeHarvest::new(site(), None, None));
        assert_eq!(*log.lock().unwrap(), vec!["outer-1", "inner", "outer-2"]);
    }
}
