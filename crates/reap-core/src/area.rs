//! Multi-harvest area geometry.
//!
//! The area is always a square centred on the clicked cell, in the clicked
//! cell's horizontal plane. Its side grows by `step` for every tier level
//! the tool sits above the threshold:
//!
//! `half_extent = floor(((tool_level - threshold_level) * step + start_size - 1) / 2)`
//!
//! Odd starting sizes and even steps keep the side odd, so the square stays
//! symmetric around the clicked cell.

use reap_types::BlockPos;
use serde::Deserialize;

/// Starting side length of the multi-harvest square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaSize {
    /// 1x1: the clicked cell only.
    #[default]
    Single,
    /// 3x3.
    Medium,
    /// 5x5.
    Large,
}

impl AreaSize {
    /// Side length.
    pub const fn size(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Medium => 3,
            Self::Large => 5,
        }
    }
}

/// Growth of the side length per tier level above the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaStep {
    /// The area never grows.
    #[default]
    None,
    /// +2 per level.
    Small,
    /// +4 per level.
    Medium,
    /// +6 per level.
    Large,
}

impl AreaStep {
    /// Increment per level.
    pub const fn step(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Small => 2,
            Self::Medium => 4,
            Self::Large => 6,
        }
    }
}

/// Cells from the centre to the edge of the square, clamped at 0.
///
/// Callers gate this behind the tier threshold; a tool below it would
/// otherwise only ever shrink the area, which the clamp turns into the
/// clicked cell alone.
pub fn half_extent(tool_level: i32, threshold_level: i32, step: u32, start_size: u32) -> u32 {
    let span = i64::from(tool_level)
        .saturating_sub(i64::from(threshold_level))
        .saturating_mul(i64::from(step))
        .saturating_add(i64::from(start_size))
        .saturating_sub(1);
    let half = span.div_euclid(2).max(0);
    u32::try_from(half).unwrap_or(u32::MAX)
}

/// A square of cells centred on the clicked one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestArea {
    /// The clicked cell.
    pub center: BlockPos,
    /// Cells from the centre to the edge, inclusive.
    pub half_extent: u32,
}

impl HarvestArea {
    /// An area of the given half-extent around `center`.
    pub const fn new(center: BlockPos, half_extent: u32) -> Self {
        Self {
            center,
            half_extent,
        }
    }

    /// Side length of the square.
    pub fn side(&self) -> u64 {
        u64::from(self.half_extent).saturating_mul(2).saturating_add(1)
    }

    /// Every cell of the square except the centre, row by row (x, then z).
    pub fn surrounding(&self) -> impl Iterator<Item = BlockPos> + use<> {
        let center = self.center;
        let reach = i32::try_from(self.half_extent).unwrap_or(i32::MAX);
        let low = reach.saturating_neg();
        (low..=reach)
            .flat_map(move |dx| (low..=reach).map(move |dz| center.offset(dx, 0, dz)))
            .filter(move |pos| *pos != center)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn two_levels_above_with_small_step_is_five_by_five() {
        assert_eq!(half_extent(2, 0, 2, 1), 2);
    }

    #[test]
    fn at_threshold_with_single_start_is_one_cell() {
        assert_eq!(half_extent(0, 0, 2, 1), 0);
    }

    #[test]
    fn start_size_alone_sets_the_floor() {
        assert_eq!(half_extent(0, 0, 0, AreaSize::Large.size()), 2);
        assert_eq!(half_extent(4, 0, AreaStep::None.step(), AreaSize::Medium.size()), 1);
    }

    #[test]
    fn none_threshold_counts_from_minus_one() {
        // Iron (2) against "none" (-1): three levels of growth.
        assert_eq!(half_extent(2, -1, 2, 1), 3);
    }

    #[test]
    fn below_threshold_clamps_to_zero() {
        assert_eq!(half_extent(0, 3, 6, 1), 0);
        assert_eq!(half_extent(-1, 4, 2, 1), 0);
    }

    #[test]
    fn enums_map_to_numbers() {
        assert_eq!(
            [AreaSize::Single, AreaSize::Medium, AreaSize::Large].map(AreaSize::size),
            [1, 3, 5]
        );
        assert_eq!(
            [AreaStep::None, AreaStep::Small, AreaStep::Medium, AreaStep::Large].map(AreaStep::step),
            [0, 2, 4, 6]
        );
    }

    #[test]
    fn surrounding_covers_square_minus_centre() {
        let center = BlockPos::new(10, 64, -3);
        let area = HarvestArea::new(center, 2);
        let cells: BTreeSet<BlockPos> = area.surrounding().collect();
        assert_eq!(cells.len(), 24);
        assert!(!cells.contains(&center));
        assert!(cells.iter().all(|pos| pos.y == center.y
            && pos.x.abs_diff(center.x) <= 2
            && pos.z.abs_diff(center.z) <= 2));
        assert!(cells.contains(&BlockPos::new(8, 64, -5)));
        assert!(cells.contains(&BlockPos::new(12, 64, -1)));
        assert_eq!(area.side(), 5);
    }

    #[test]
    fn zero_extent_has_no_surrounding_cells() {
        let area = HarvestArea::new(BlockPos::new(0, 0, 0), 0);
        assert_eq!(area.surrounding().count(), 0);
        assert_eq!(area.side(), 1);
    }
}
