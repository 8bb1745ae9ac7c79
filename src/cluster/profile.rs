use super::error::ProfileError;
use super::position::{is_strictly_ordered, Position};

/// A read, or the consensus of several reads, as an ordered run of sites.
///
/// `left_bound`/`right_bound` record the reference span of the underlying reads,
/// which can be wider than the first and last stored position when low quality
/// ends were trimmed away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub positions: Vec<Position>,
    pub left_bound: i64,
    pub right_bound: i64,
    pub contributor_count: u32,
}

impl Profile {
    /// Builds a single-read profile, checking the ordering and span invariants.
    pub fn from_read(
        positions: Vec<Position>,
        left_bound: i64,
        right_bound: i64,
    ) -> Result<Self, ProfileError> {
        if left_bound > right_bound {
            return Err(ProfileError::InvertedBounds {
                left: left_bound,
                right: right_bound,
            });
        }
        if !is_strictly_ordered(&positions) {
            return Err(ProfileError::Unordered);
        }
        for p in [positions.first(), positions.last()].into_iter().flatten() {
            if p.column < left_bound || p.column > right_bound {
                return Err(ProfileError::OutOfBounds {
                    column: p.column,
                    left: left_bound,
                    right: right_bound,
                });
            }
        }

        Ok(Self {
            positions,
            left_bound,
            right_bound,
            contributor_count: 1,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Consensus bases in site order, IUPAC codes for ambiguous sites.
    pub fn consensus(&self) -> Vec<u8> {
        self.positions.iter().map(|p| p.base_mask.to_nuc()).collect()
    }

    pub fn total_coverage(&self) -> u64 {
        self.positions.iter().map(|p| p.coverage as u64).sum()
    }
}
