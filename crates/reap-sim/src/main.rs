//! Demo driver for the Reap harvest engine.
//!
//! Plants a seeded farm in the reference world, wires logging listeners
//! onto every harvest bus, and replays a fixed script of right-clicks
//! followed by random ones, logging each outcome.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `reap-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Validate the harvest section against the tier table
//! 4. Plant the demo farm
//! 5. Register listeners
//! 6. Run the script and log the totals

mod error;
mod farm;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reap_core::tier::TierResolver;
use reap_core::{Harvester, Interaction, InteractionOutcome, ReapConfig};
use reap_events::{AfterHarvest, BeforeHarvest, CheckEvent, HarvestDrops, HarvestEvents, Phase};
use reap_types::{Actor, ActorId, BlockPos, GameMode, Hand, ItemStack, ToolInfo, ToolKind};
use reap_world::GridWorld;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::SimError;
use crate::farm::{Farm, SimSettings};

/// Path of the configuration file, relative to the working directory.
const CONFIG_PATH: &str = "reap-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is unreadable or invalid, or the
/// farm cannot be planted.
fn main() -> Result<(), SimError> {
    // 1. Load configuration.
    let (config, settings) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("reap-sim starting");

    // 3. Validate.
    let tiers = TierResolver::vanilla();
    config.harvest.validate(&tiers)?;
    info!(
        require_hoe = config.harvest.require_hoe,
        starting_tier = %config.harvest.multi_harvest_starting_tier,
        area_size = config.harvest.starting_area_size.size(),
        area_step = config.harvest.area_increment_step.step(),
        extra_crops = config.harvest.crops.len(),
        "Configuration loaded"
    );

    // 4. Plant the farm.
    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut farm = farm::build(&settings, &mut rng)?;
    info!(
        seed = settings.seed,
        cells = farm.world.occupied(),
        radius = farm.radius,
        "Farm planted"
    );

    // 5. Register listeners.
    let tally = Tally::default();
    let harvester = Harvester::new(logging_listeners(&tally)).with_tiers(tiers);

    // 6. Run the script.
    let mut consumed = 0_usize;
    let mut passed = 0_usize;
    for mut step in script(&farm) {
        let outcome = harvester.on_interact(&config.harvest, &mut farm.world, &mut step.actor, &step.interaction);
        record(step.label, &outcome, &mut consumed, &mut passed);
    }

    let mut clicker = Actor::new(ActorId::new()).holding(hoe("iron", 250));
    for _ in 0..settings.random_clicks {
        let pos = random_field_cell(&farm, &mut rng);
        let outcome = harvester.on_interact(
            &config.harvest,
            &mut farm.world,
            &mut clicker,
            &Interaction::main_hand(pos),
        );
        record("random click", &outcome, &mut consumed, &mut passed);
    }

    info!(
        consumed,
        passed,
        harvested = tally.after.load(Ordering::Relaxed),
        rewritten_drops = tally.drops_rewritten.load(Ordering::Relaxed),
        stacks_released = farm.world.released_items().len(),
        items_released = items_released(&farm.world),
        "reap-sim finished"
    );
    Ok(())
}

/// Load the harvest configuration and the `sim` section.
///
/// Missing files fall back to defaults.
fn load_config() -> Result<(ReapConfig, SimSettings), SimError> {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        return Ok((ReapConfig::default(), SimSettings::default()));
    }

    let config = ReapConfig::from_file(path)?;

    // Parse the full YAML and extract just the "sim" section.
    let contents = std::fs::read_to_string(path).map_err(|e| SimError::Settings {
        message: format!("failed to read config file: {e}"),
    })?;
    let raw: serde_yml::Value = serde_yml::from_str(&contents).map_err(|e| SimError::Settings {
        message: format!("failed to parse config YAML: {e}"),
    })?;
    let settings = match raw.get("sim") {
        Some(section) => serde_yml::from_value(section.clone()).map_err(|e| SimError::Settings {
            message: format!("invalid sim section: {e}"),
        })?,
        None => SimSettings::default(),
    };

    Ok((config, settings))
}

/// Counters shared with the listeners.
#[derive(Debug, Default, Clone)]
struct Tally {
    after: Arc<AtomicUsize>,
    drops_rewritten: Arc<AtomicUsize>,
}

/// Buses that log every phase and apply a small drop bonus to carrots.
fn logging_listeners(tally: &Tally) -> HarvestEvents {
    let mut events = HarvestEvents::new();

    events.check.register(Phase::Deferred, |event: &mut CheckEvent| {
        let site = event.site();
        debug!(pos = %site.pos, block = %site.target.block, first = site.first, verdict = event.can_harvest(), "Check");
    });

    events.before.register(Phase::Priority, |event: &mut BeforeHarvest| {
        let site = event.site();
        debug!(pos = %site.pos, block = %site.target.block, face = ?event.face(), "Harvesting");
    });

    let rewritten = Arc::clone(&tally.drops_rewritten);
    events.drops.register(Phase::Default, move |event: &mut HarvestDrops| {
        if event.site().target.block == *"minecraft:carrots" {
            event.drops_mut().push(ItemStack::new("minecraft:golden_carrot", 1));
        }
        if event.have_drops_changed() {
            rewritten.fetch_add(1, Ordering::Relaxed);
        }
    });

    let after = Arc::clone(&tally.after);
    events.after.register(Phase::Deferred, move |event: &mut AfterHarvest| {
        let site = event.site();
        after.fetch_add(1, Ordering::Relaxed);
        debug!(pos = %site.pos, block = %site.target.block, first = site.first, "Harvested");
    });

    events
}

/// One scripted right-click.
struct Step {
    label: &'static str,
    actor: Actor,
    interaction: Interaction,
}

fn hoe(tier: &str, durability: u32) -> ItemStack {
    ItemStack::tool(
        format!("minecraft:{tier}_hoe").as_str(),
        ToolInfo::new(ToolKind::Hoe, Some(tier), durability),
    )
}

fn script(farm: &Farm) -> Vec<Step> {
    let farmer = || Actor::new(ActorId::new());
    let mut crouching = farmer().holding(hoe("diamond", 1561));
    crouching.crouching = true;

    vec![
        Step {
            label: "spectator click",
            actor: farmer().in_mode(GameMode::Spectator),
            interaction: Interaction::main_hand(farm.center),
        },
        Step {
            label: "crouching click",
            actor: crouching,
            interaction: Interaction::main_hand(farm.center),
        },
        Step {
            label: "off-hand hoe, main-hand delivery",
            actor: farmer().holding_off_hand(hoe("stone", 131)),
            interaction: Interaction::main_hand(farm.center),
        },
        Step {
            label: "off-hand hoe",
            actor: farmer().holding_off_hand(hoe("stone", 131)),
            interaction: Interaction::with_hand(farm.center, Hand::OffHand),
        },
        Step {
            label: "diamond hoe sweep",
            actor: farmer().holding(hoe("diamond", 1561)),
            interaction: Interaction::main_hand(farm.center.offset(1, 0, 1)),
        },
        Step {
            label: "corn stack",
            actor: farmer(),
            interaction: Interaction::main_hand(farm.corn_top),
        },
        Step {
            label: "tomato vine",
            actor: farmer(),
            interaction: Interaction::main_hand(farm.tomato_top),
        },
        Step {
            label: "pitcher crop",
            actor: farmer(),
            interaction: Interaction::main_hand(farm.pitcher),
        },
        Step {
            label: "torchflower",
            actor: farmer(),
            interaction: Interaction::main_hand(farm.torchflower),
        },
        Step {
            label: "nether wart",
            actor: farmer().in_mode(GameMode::Creative),
            interaction: Interaction::main_hand(farm.nether_wart),
        },
    ]
}

fn random_field_cell<R: Rng>(farm: &Farm, rng: &mut R) -> BlockPos {
    let reach = farm.radius;
    let low = reach.saturating_neg();
    farm.center.offset(rng.random_range(low..=reach), 0, rng.random_range(low..=reach))
}

fn record(label: &str, outcome: &InteractionOutcome, consumed: &mut usize, passed: &mut usize) {
    match outcome {
        InteractionOutcome::Pass(reason) => {
            *passed = passed.saturating_add(1);
            info!(label, ?reason, "Passed");
        }
        InteractionOutcome::Consumed(report) => {
            *consumed = consumed.saturating_add(1);
            let harvested = report.as_ref().map_or(0, |r| r.harvested.len());
            let half_extent = report.as_ref().map_or(0, |r| r.half_extent);
            info!(label, harvested, half_extent, "Consumed");
        }
    }
}

fn items_released(world: &GridWorld) -> u64 {
    world
        .released_items()
        .iter()
        .map(|stack| u64::from(stack.count))
        .fold(0, u64::saturating_add)
}
