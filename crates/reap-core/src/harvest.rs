//! The interaction orchestrator.
//!
//! [`Harvester::on_interact`] takes one right-click on a cell and either
//! passes it through untouched or consumes it. A consumed interaction on the
//! authoritative side harvests the clicked crop and, for tools at or above
//! the configured tier, every grown crop in the surrounding square.
//!
//! # Per-cell sequence
//!
//! 1. Before notification on the clicked cell.
//! 2. Walk down to the base of stacked crops.
//! 3. Experience at the base, tool damage.
//! 4. Drops computed on the base, rewritten by Drops listeners, released.
//! 5. Base reset to age 0 (or cleared), segment above broken.
//! 6. Break sound, After notification.
//!
//! Age lookup failures on any cell are logged and skip that cell only.

use reap_events::{AfterHarvest, BeforeHarvest, CheckEvent, HarvestDrops, HarvestEvents, HarvestSite};
use reap_types::{
    AGE_PROPERTY, Actor, AgeLookupError, BlockPos, CellState, Direction, Hand, HitResult,
};
use reap_world::World;
use tracing::{debug, info};

use crate::area::{self, HarvestArea};
use crate::config::HarvestConfig;
use crate::drops;
use crate::eligibility::EligibilityChecker;
use crate::quirks::CropQuirks;
use crate::tier::{TierResolver, ToolReference};

/// One right-click on a cell, as delivered by the host.
///
/// Hosts deliver one interaction per hand; only the one whose hand matches
/// the selected hand can harvest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    /// The clicked cell.
    pub pos: BlockPos,
    /// The hand this interaction was delivered for.
    pub hand: Hand,
    /// Where the cell was struck.
    pub hit: HitResult,
}

impl Interaction {
    /// A main-hand click on the top face of `pos`.
    pub fn main_hand(pos: BlockPos) -> Self {
        Self::with_hand(pos, Hand::MainHand)
    }

    /// A click on the top face of `pos` delivered for `hand`.
    pub fn with_hand(pos: BlockPos, hand: Hand) -> Self {
        Self {
            pos,
            hand,
            hit: HitResult::on_face(pos, Direction::Up),
        }
    }
}

/// Why an interaction was passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassReason {
    /// The actor only observes the world.
    Observer,
    /// Crouching, or a hoe is required and none is held.
    NoQualifyingHand,
    /// The interaction was delivered for the other hand.
    OtherHand,
    /// The cell is not a recognized crop.
    NotACrop,
    /// A Check listener refused the harvest.
    CheckDenied,
    /// The crop's age could not be resolved.
    AgeLookup(AgeLookupError),
    /// The crop is still growing.
    Immature,
}

/// What happened to the clicked cell and its surroundings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
    /// The clicked cell.
    pub primary: BlockPos,
    /// Every harvested cell, clicked cell first.
    pub harvested: Vec<BlockPos>,
    /// Area cells visited but not harvested.
    pub skipped: usize,
    /// Half-extent of the area; 0 when only the clicked cell was harvested.
    pub half_extent: u32,
}

/// The result of [`Harvester::on_interact`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// Not ours: the host should continue with its own handling.
    Pass(PassReason),
    /// The interaction was a harvest. The report is `None` on the
    /// non-authoritative side, where nothing is mutated.
    Consumed(Option<HarvestReport>),
}

impl InteractionOutcome {
    /// Whether the interaction was consumed.
    pub const fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed(_))
    }

    /// The harvest report, if anything was harvested.
    pub const fn report(&self) -> Option<&HarvestReport> {
        match self {
            Self::Consumed(Some(report)) => Some(report),
            _ => None,
        }
    }
}

/// Sequences eligibility, world mutation, and notifications for right-click
/// harvests.
#[derive(Debug, Default)]
pub struct Harvester {
    events: HarvestEvents,
    tiers: TierResolver,
    quirks: CropQuirks,
}

impl Harvester {
    /// A harvester over `events` with the vanilla tier table and crop
    /// overrides.
    pub fn new(events: HarvestEvents) -> Self {
        Self {
            events,
            tiers: TierResolver::vanilla(),
            quirks: CropQuirks::vanilla(),
        }
    }

    /// Replace the tier table.
    #[must_use]
    pub fn with_tiers(mut self, tiers: TierResolver) -> Self {
        self.tiers = tiers;
        self
    }

    /// Replace the crop overrides.
    #[must_use]
    pub fn with_quirks(mut self, quirks: CropQuirks) -> Self {
        self.quirks = quirks;
        self
    }

    /// The event buses.
    pub const fn events(&self) -> &HarvestEvents {
        &self.events
    }

    /// The event buses, for registering listeners.
    pub const fn events_mut(&mut self) -> &mut HarvestEvents {
        &mut self.events
    }

    /// The tier table.
    pub const fn tiers(&self) -> &TierResolver {
        &self.tiers
    }

    /// The crop overrides.
    pub const fn quirks(&self) -> &CropQuirks {
        &self.quirks
    }

    /// Handle one right-click.
    ///
    /// Never fails: every refusal is a [`InteractionOutcome::Pass`], and
    /// per-cell problems during an area harvest skip that cell only.
    pub fn on_interact<W>(
        &self,
        config: &HarvestConfig,
        world: &mut W,
        actor: &mut Actor,
        interaction: &Interaction,
    ) -> InteractionOutcome
    where
        W: World + ?Sized,
    {
        let pos = interaction.pos;
        if actor.mode.is_observer() {
            debug!(%pos, mode = ?actor.mode, "Observer interaction passed");
            return InteractionOutcome::Pass(PassReason::Observer);
        }

        let checker = EligibilityChecker::new(config, &self.quirks);
        let cell = world.cell_state(pos);

        let Some(hand) = EligibilityChecker::select_hand(actor, config.require_hoe) else {
            debug!(%pos, crouching = actor.crouching, "No qualifying hand");
            return InteractionOutcome::Pass(PassReason::NoQualifyingHand);
        };
        if hand != interaction.hand {
            return InteractionOutcome::Pass(PassReason::OtherHand);
        }
        if !checker.is_recognized_crop(&cell) {
            return InteractionOutcome::Pass(PassReason::NotACrop);
        }

        let mut pass = HarvestPass {
            harvester: self,
            config,
            checker,
            world,
            actor,
            hand,
        };

        if !pass.check(pos, &cell, true) {
            debug!(%pos, block = %cell.block, "Check listeners denied harvest");
            return InteractionOutcome::Pass(PassReason::CheckDenied);
        }

        let age = match EligibilityChecker::resolve_age(&cell) {
            Ok(age) => age,
            Err(err) => {
                debug!(%pos, block = %cell.block, error = %err, "Crop age lookup failed, skipping");
                return InteractionOutcome::Pass(PassReason::AgeLookup(err));
            }
        };
        if !EligibilityChecker::is_mature(&cell, age) {
            debug!(%pos, block = %cell.block, max = age.max, "Crop not grown");
            return InteractionOutcome::Pass(PassReason::Immature);
        }

        if !pass.world.is_authoritative() {
            debug!(%pos, block = %cell.block, "Harvest consumed on non-authoritative side");
            return InteractionOutcome::Consumed(None);
        }

        let hit = interaction.hit;
        pass.harvest_cell(pos, &cell, Some(hit.face), Some(hit), true);
        pass.world.swing_hand(pass.actor.id, hand);

        let mut report = HarvestReport {
            primary: pos,
            harvested: vec![pos],
            skipped: 0,
            half_extent: 0,
        };

        if let Some(half_extent) = pass.multi_harvest_extent() {
            report.half_extent = half_extent;
            for target in HarvestArea::new(pos, half_extent).surrounding() {
                if pass.try_harvest_area_cell(target) {
                    report.harvested.push(target);
                } else {
                    report.skipped = report.skipped.saturating_add(1);
                }
            }
        }

        info!(
            world = %pass.world.key(),
            %pos,
            block = %cell.block,
            harvested = report.harvested.len(),
            skipped = report.skipped,
            half_extent = report.half_extent,
            "Harvest complete"
        );
        InteractionOutcome::Consumed(Some(report))
    }
}

/// State shared by every cell of one consumed interaction.
struct HarvestPass<'a, W: ?Sized> {
    harvester: &'a Harvester,
    config: &'a HarvestConfig,
    checker: EligibilityChecker<'a>,
    world: &'a mut W,
    actor: &'a mut Actor,
    hand: Hand,
}

impl<W> HarvestPass<'_, W>
where
    W: World + ?Sized,
{
    fn site(&self, target: &CellState, pos: BlockPos, first: bool) -> HarvestSite {
        HarvestSite {
            world: self.world.key(),
            target: target.clone(),
            pos,
            actor: self.actor.id,
            hand: self.hand,
            first,
        }
    }

    /// Run the Check listeners for `cell`.
    fn check(&self, pos: BlockPos, cell: &CellState, first: bool) -> bool {
        let mut event = CheckEvent::new(self.site(cell, pos, first));
        self.harvester.events.can_harvest(&mut event)
    }

    /// Half-extent of the area around the clicked cell, if the held item
    /// may multi-harvest at all.
    ///
    /// Only hoes multi-harvest. The `"none"` threshold admits every hoe and
    /// grows the area from level -1. Read after the clicked cell was
    /// harvested, so a tool that broke on it no longer counts.
    fn multi_harvest_extent(&self) -> Option<u32> {
        let tiers = &self.harvester.tiers;
        let threshold = self.config.threshold();
        let held = self.actor.item_in(self.hand);
        if !held.is_hoe() {
            return None;
        }
        let tool = ToolReference::of(held);
        if !tiers.is_above_threshold(&tool, &threshold) {
            return None;
        }

        let half_extent = area::half_extent(
            tiers.level_of(&tool),
            tiers.threshold_level(&threshold),
            self.config.area_increment_step.step(),
            self.config.starting_area_size.size(),
        );
        (half_extent > 0).then_some(half_extent)
    }

    /// Gate and harvest one cell of the area. Returns whether it was
    /// harvested.
    fn try_harvest_area_cell(&mut self, pos: BlockPos) -> bool {
        let cell = self.world.cell_state(pos);
        if !self.checker.is_recognized_crop(&cell) || !self.check(pos, &cell, false) {
            return false;
        }
        match EligibilityChecker::resolve_age(&cell) {
            Ok(age) if EligibilityChecker::is_mature(&cell, age) => {
                self.harvest_cell(pos, &cell, None, None, false);
                true
            }
            Ok(_) => false,
            Err(err) => {
                debug!(%pos, block = %cell.block, error = %err, "Crop age lookup failed, skipping");
                false
            }
        }
    }

    /// Harvest one grown crop.
    fn harvest_cell(
        &mut self,
        pos: BlockPos,
        cell: &CellState,
        face: Option<Direction>,
        hit: Option<HitResult>,
        first: bool,
    ) {
        let harvester = self.harvester;
        let events = &harvester.events;
        let site = self.site(cell, pos, first);

        events.before.dispatch(&mut BeforeHarvest::new(site.clone(), face, hit));

        let base = self.base_of(pos, cell);
        self.grant_exp(base);
        self.damage_tool();
        let custom_drops = self.release_drops(base, face, hit, first);
        self.update_crop(base, cell, custom_drops);
        self.play_sound(pos, cell);

        events.after.dispatch(&mut AfterHarvest::new(site, face, hit));
        debug!(%pos, %base, block = %cell.block, first, custom_drops, "Cell harvested");
    }

    /// Bottom segment of a stacked crop.
    fn base_of(&self, pos: BlockPos, cell: &CellState) -> BlockPos {
        if !cell.tagged_crop || self.harvester.quirks.is_single_segment(&cell.block) {
            return pos;
        }
        let mut base = pos;
        loop {
            let below = base.below();
            if below == base || !self.world.cell_state(below).is_same_block(cell) {
                return base;
            }
            base = below;
        }
    }

    fn grant_exp(&mut self, base: BlockPos) {
        let amount = self.config.granted_exp;
        if amount > 0 && self.world.drop_items_on_break() {
            self.world.spawn_experience(base, amount);
        }
    }

    fn damage_tool(&mut self) {
        let amount = self.config.damage_on_harvest;
        if !self.config.require_hoe || amount == 0 || self.actor.mode.is_damage_immune() {
            return;
        }
        let hand = self.hand;
        let tool = self.actor.item_in_mut(hand);
        let item = tool.item.clone();
        if tool.apply_damage(amount) {
            info!(actor = %self.actor.id, ?hand, %item, "Tool broke while harvesting");
        }
    }

    /// Compute, dispatch, and release the drops of the base cell. Returns
    /// whether listeners changed them.
    fn release_drops(
        &mut self,
        base: BlockPos,
        face: Option<Direction>,
        hit: Option<HitResult>,
        first: bool,
    ) -> bool {
        let state = self.world.cell_state(base);
        let computed = drops::compute_drops(&*self.world, &state, base, &*self.actor, self.hand);

        let mut event = HarvestDrops::new(self.site(&state, base, first), face, hit, computed);
        self.harvester.events.drops.dispatch(&mut event);
        let final_drops = event.into_drops();
        let changed = drops::have_drops_changed(&final_drops);

        let pop_face = if self.world.has_collision(&state, base) {
            face
        } else {
            None
        };
        for stack in final_drops.into_working() {
            self.world.release_drop(base, pop_face, stack);
        }
        changed
    }

    /// Replant the base and break the segment above it.
    fn update_crop(&mut self, base: BlockPos, clicked: &CellState, custom_drops: bool) {
        let replanted = if self.harvester.quirks.is_removed_on_harvest(&clicked.block) {
            CellState::air()
        } else {
            self.world.cell_state(base).with_int(AGE_PROPERTY, 0)
        };
        self.world.set_cell_state(base, replanted);

        let above = base.above();
        if self.world.cell_state(base).tagged_crop
            && self.world.cell_state(above).is_same_block(clicked)
            && !self.harvester.quirks.is_single_segment(&clicked.block)
        {
            self.world.break_cell(above, !custom_drops, self.actor.id);
        }
    }

    fn play_sound(&mut self, pos: BlockPos, cell: &CellState) {
        if !self.config.play_sound {
            return;
        }
        if let Some(sound) = self.world.break_sound(cell) {
            self.world.play_sound(pos, &sound);
        }
    }
}
