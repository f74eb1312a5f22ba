//! Cell positions, faces, and hit details.

use serde::{Deserialize, Serialize};

/// Integer coordinates of a cell in the voxel grid. `y` is vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    /// East-west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North-south axis.
    pub z: i32,
}

impl BlockPos {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Offset this position, saturating at the coordinate bounds.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }

    /// The cell directly above.
    pub const fn above(self) -> Self {
        self.offset(0, 1, 0)
    }

    /// The cell directly below.
    pub const fn below(self) -> Self {
        self.offset(0, -1, 0)
    }

    /// The neighbouring cell across the given face.
    pub const fn relative(self, face: Direction) -> Self {
        let (dx, dy, dz) = face.normal();
        self.offset(dx, dy, dz)
    }
}

impl core::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}

/// One of the six faces of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Negative y.
    Down,
    /// Positive y.
    Up,
    /// Negative z.
    North,
    /// Positive z.
    South,
    /// Negative x.
    West,
    /// Positive x.
    East,
}

impl Direction {
    /// Unit offset pointing out of this face.
    pub const fn normal(self) -> (i32, i32, i32) {
        match self {
            Self::Down => (0, -1, 0),
            Self::Up => (0, 1, 0),
            Self::North => (0, 0, -1),
            Self::South => (0, 0, 1),
            Self::West => (-1, 0, 0),
            Self::East => (1, 0, 0),
        }
    }
}

/// Details of a direct interaction with a cell.
///
/// Only cells the actor actually clicked carry one; cells reached through
/// area expansion do not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitResult {
    /// The clicked cell.
    pub pos: BlockPos,
    /// The struck face.
    pub face: Direction,
    /// Exact hit location in world space.
    pub location: [f64; 3],
    /// Whether the ray started inside the cell.
    pub inside: bool,
}

impl HitResult {
    /// A hit at the centre of the given face of `pos`.
    pub fn on_face(pos: BlockPos, face: Direction) -> Self {
        let (dx, dy, dz) = face.normal();
        Self {
            pos,
            face,
            location: [
                f64::from(pos.x) + 0.5 + f64::from(dx) * 0.5,
                f64::from(pos.y) + 0.5 + f64::from(dy) * 0.5,
                f64::from(pos.z) + 0.5 + f64::from(dz) * 0.5,
            ],
            inside: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_neighbours() {
        let pos = BlockPos::new(3, 64, -2);
        assert_eq!(pos.above(), BlockPos::new(3, 65, -2));
        assert_eq!(pos.below(), BlockPos::new(3, 63, -2));
        assert_eq!(pos.relative(Direction::East), BlockPos::new(4, 64, -2));
    }

    #[test]
    fn offset_saturates() {
        let pos = BlockPos::new(i32::MAX, 0, i32::MIN);
        assert_eq!(pos.offset(1, 0, -1), pos);
    }

    #[test]
    fn hit_on_top_face_sits_on_surface() {
        let hit = HitResult::on_face(BlockPos::new(0, 10, 0), Direction::Up);
        assert_eq!(hit.face, Direction::Up);
        assert!((hit.location[1] - 11.0).abs() < f64::EPSILON);
    }
}
