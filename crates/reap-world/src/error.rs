//! Error types for the `reap-world` crate.

use reap_types::{BlockId, BlockPos};

/// Errors that can occur while building a reference world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A cell was placed where one already exists.
    #[error("cell at [{0}] is already occupied")]
    DuplicateCell(BlockPos),

    /// The block is not in the crop catalog.
    #[error("unknown crop: {0}")]
    UnknownCrop(BlockId),

    /// The requested age is outside the crop's declared range.
    #[error("age {age} is out of range for {block} (0..={max})")]
    AgeOutOfRange {
        /// The crop.
        block: BlockId,
        /// Requested age.
        age: i32,
        /// Largest declared age.
        max: i32,
    },
}
