use super::nucleotide::BaseMask;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One observed site within a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub column: i64,
    /// Rank of an inserted base after `column`; 0 for a reference-aligned base.
    pub insertion_offset: u32,
    pub base_mask: BaseMask,
    pub coverage: u32,
}

impl Position {
    pub fn new(column: i64, insertion_offset: u32, base_mask: BaseMask) -> Self {
        Self {
            column,
            insertion_offset,
            base_mask,
            coverage: 1,
        }
    }

    pub fn with_coverage(mut self, coverage: u32) -> Self {
        self.coverage = coverage;
        self
    }

}

/// Site order: column first, then insertion offset. Mask and coverage are ignored.
pub fn compare_sites(x: &Position, y: &Position) -> Ordering {
    x.column
        .cmp(&y.column)
        .then(x.insertion_offset.cmp(&y.insertion_offset))
}

/// True when `positions` is strictly increasing in site order.
pub fn is_strictly_ordered(positions: &[Position]) -> bool {
    positions
        .windows(2)
        .all(|w| compare_sites(&w[0], &w[1]) == Ordering::Less)
}
