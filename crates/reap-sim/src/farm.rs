//! Demo farm generation.
//!
//! The farm is a square field of rotating crop rows at random growth
//! stages, plus a row of special crops east of it that exercise the
//! stacked, removed-on-harvest, and excluded cases.

use rand::Rng;
use reap_types::BlockPos;
use reap_world::{GridWorld, WorldError};
use serde::Deserialize;
use tracing::debug;

/// Crops planted in the field, one per row, cycling.
const FIELD_CROPS: [&str; 4] = [
    "minecraft:wheat",
    "minecraft:carrots",
    "minecraft:potatoes",
    "minecraft:beetroots",
];

/// Ground level of the farm.
const GROUND_Y: i32 = 64;

/// Settings for the demo run, read from the `sim` section of the config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimSettings {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Cells from the farm centre to the field edge.
    #[serde(default = "default_farm_radius")]
    pub farm_radius: u32,

    /// Chance that a field crop is planted fully grown.
    #[serde(default = "default_ripe_chance")]
    pub ripe_chance: f64,

    /// Random right-clicks on the field after the scripted ones.
    #[serde(default = "default_random_clicks")]
    pub random_clicks: u32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            farm_radius: default_farm_radius(),
            ripe_chance: default_ripe_chance(),
            random_clicks: default_random_clicks(),
        }
    }
}

const fn default_seed() -> u64 {
    42
}

const fn default_farm_radius() -> u32 {
    4
}

const fn default_ripe_chance() -> f64 {
    0.7
}

const fn default_random_clicks() -> u32 {
    12
}

/// Positions of interest on the generated farm.
#[derive(Debug, Clone)]
pub struct Farm {
    /// The world holding every planted cell.
    pub world: GridWorld,
    /// Centre of the field.
    pub center: BlockPos,
    /// Half-width of the field.
    pub radius: i32,
    /// Top segment of the two-cell corn stack.
    pub corn_top: BlockPos,
    /// Top segment of the two-cell tomato vine.
    pub tomato_top: BlockPos,
    /// The pitcher crop.
    pub pitcher: BlockPos,
    /// The torchflower crop.
    pub torchflower: BlockPos,
    /// The nether wart.
    pub nether_wart: BlockPos,
}

/// Plant the demo farm.
///
/// # Errors
///
/// Returns [`WorldError`] if a catalogued crop is missing or two plantings
/// collide.
pub fn build<R: Rng>(settings: &SimSettings, rng: &mut R) -> Result<Farm, WorldError> {
    let mut world = GridWorld::new("minecraft:overworld");
    let center = BlockPos::new(0, GROUND_Y, 0);
    let radius = i32::try_from(settings.farm_radius).unwrap_or(i32::MAX).min(64);
    let ripe_chance = if settings.ripe_chance.is_nan() {
        0.0
    } else {
        settings.ripe_chance.clamp(0.0, 1.0)
    };
    let low = radius.saturating_neg();

    for (dx, block) in (low..=radius).zip(FIELD_CROPS.iter().cycle()) {
        let max_age = world.catalog().require(block)?.max_age;
        for dz in low..=radius {
            let age = if max_age == 0 || rng.random_bool(ripe_chance) {
                max_age
            } else {
                rng.random_range(0..max_age)
            };
            world.plant(center.offset(dx, 0, dz), block, age)?;
        }
    }

    let east = radius.saturating_add(2);
    let corn = center.offset(east, 0, -2);
    world.plant(corn, "examplemod:corn", 3)?;
    world.plant(corn.above(), "examplemod:corn", 3)?;

    let tomato = center.offset(east, 0, 0);
    world.plant(tomato, "farmersdelight:tomatoes", 3)?;
    world.plant(tomato.above(), "farmersdelight:tomatoes", 3)?;

    let pitcher = center.offset(east, 0, 2);
    world.plant(pitcher, "minecraft:pitcher_crop", 4)?;

    let torchflower = center.offset(east, 0, 4);
    world.plant(torchflower, "minecraft:torchflower_crop", 1)?;

    let nether_wart = center.offset(east, 0, -4);
    world.plant(nether_wart, "minecraft:nether_wart", 3)?;

    debug!(cells = world.occupied(), radius, "Farm planted");

    Ok(Farm {
        world,
        center,
        radius,
        corn_top: corn.above(),
        tomato_top: tomato.above(),
        pitcher,
        torchflower,
        nether_wart,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use reap_types::AGE_PROPERTY;
    use reap_world::World;

    use super::*;

    #[test]
    fn same_seed_same_farm() {
        let settings = SimSettings::default();
        let a = build(&settings, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = build(&settings, &mut StdRng::seed_from_u64(7)).unwrap();
        let low = a.radius.saturating_neg();
        for dx in low..=a.radius {
            for dz in low..=a.radius {
                let pos = a.center.offset(dx, 0, dz);
                assert_eq!(a.world.cell_state(pos), b.world.cell_state(pos));
            }
        }
    }

    #[test]
    fn field_and_specials_are_planted() {
        let settings = SimSettings {
            farm_radius: 2,
            ripe_chance: 1.0,
            ..SimSettings::default()
        };
        let farm = build(&settings, &mut StdRng::seed_from_u64(1)).unwrap();
        // 5x5 field, two stacks of two, three singles.
        assert_eq!(farm.world.occupied(), 32);
        assert_eq!(farm.world.cell_state(farm.center).int_value(AGE_PROPERTY), Some(7));
        assert!(!farm.world.cell_state(farm.corn_top).is_air());
        assert!(!farm.world.cell_state(farm.pitcher).is_air());
    }
}
