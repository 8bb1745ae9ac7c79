use std::fmt;
use thiserror::Error;

/// Which of the two merge inputs a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    X,
    Y,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::X => Side::Y,
            Side::Y => Side::X,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::X => write!(f, "x"),
            Side::Y => write!(f, "y"),
        }
    }
}

/// Outcome of a pairwise merge attempt that did not produce a profile.
///
/// Every variant except [`MergeError::AllocationFailure`] just means "these two
/// profiles do not merge"; the cluster engine moves on to the next candidate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    #[error("insufficient length")]
    EmptyInput,

    #[error("no opportunity for sufficient overlap")]
    NoOverlapOpportunity,

    #[error("gap not allowed: site in {side} has no counterpart")]
    GapNotAllowed { side: Side },

    #[error("base mismatch at column {column} (insertion {insertion_offset})")]
    BaseMismatch { column: i64, insertion_offset: u32 },

    #[error("insufficient overlap: {overlap} < {required}")]
    InsufficientOverlap { overlap: usize, required: usize },

    #[error("failed to allocate {len} positions for merged profile")]
    AllocationFailure { len: usize },
}

impl MergeError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, MergeError::AllocationFailure { .. })
    }
}

/// Errors that abort clustering altogether.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("clustering aborted after {merges} merges: {source}")]
    Fatal {
        merges: usize,
        #[source]
        source: MergeError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("positions are not strictly ordered by column and insertion offset")]
    Unordered,

    #[error("position column {column} lies outside bounds {left}..={right}")]
    OutOfBounds { column: i64, left: i64, right: i64 },

    #[error("left bound {left} exceeds right bound {right}")]
    InvertedBounds { left: i64, right: i64 },
}
