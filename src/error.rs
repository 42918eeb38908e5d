use thiserror::Error;

/// Errors reported by the checked (`try_*`) entry points.
///
/// The unchecked entry points panic on the same conditions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PartitionError {
    #[error("segment {left}..{right} is not within a slice of length {len}")]
    InvalidSegment { left: usize, right: usize, len: usize },

    #[error("rank {k} is out of range for a slice of length {len}")]
    RankOutOfRange { k: usize, len: usize },
}
