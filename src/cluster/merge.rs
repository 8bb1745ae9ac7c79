//! Pairwise profile merging.
//!
//! A merge runs in two independent passes over the same inputs. The scan pass
//! validates the overlap and measures the merged length without building
//! anything; the build pass then fills a buffer reserved at exactly that length.
//! Both passes must take the same number of steps.

use super::error::{MergeError, Side};
use super::options::{MaskPolicy, MergeConfig};
use super::position::{compare_sites, Position};
use super::profile::Profile;
use log::{error, trace};
use std::cmp::Ordering;

/// Element counts consumed by the scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct OverlapScan {
    /// Leading overhang of whichever profile starts first.
    pub(crate) skipped: usize,
    /// Steps taken while both cursors were in range.
    pub(crate) walked: usize,
    /// Unconsumed remainder of whichever profile ends last.
    pub(crate) tail: usize,
    pub(crate) overlap: usize,
}

impl OverlapScan {
    pub(crate) fn merged_len(&self) -> usize {
        self.skipped + self.walked + self.tail
    }
}

/// Merges `x` and `y` into a new profile if they overlap by at least
/// `config.min_overlap` matching sites.
///
/// The inputs are left untouched; on success the caller is expected to retire
/// them in favour of the returned profile.
pub fn merge(x: &Profile, y: &Profile, config: &MergeConfig) -> Result<Profile, MergeError> {
    if x.is_empty() || y.is_empty() {
        return Err(MergeError::EmptyInput);
    }

    if !has_overlap_opportunity(x, y, config.min_overlap) {
        return Err(MergeError::NoOverlapOpportunity);
    }

    let scan = scan_overlap(&x.positions, &y.positions, config)?;
    let len = scan.merged_len();

    let mut positions = Vec::new();
    positions
        .try_reserve_exact(len)
        .map_err(|_| MergeError::AllocationFailure { len })?;
    build_positions(&x.positions, &y.positions, config.mask_policy, &mut positions);

    if positions.len() != len {
        error!(
            "merged profile has {} positions, expected {}",
            positions.len(),
            len
        );
        debug_assert_eq!(positions.len(), len);
    }

    Ok(Profile {
        positions,
        left_bound: x.left_bound.min(y.left_bound),
        right_bound: x.right_bound.max(y.right_bound),
        contributor_count: x.contributor_count + y.contributor_count,
    })
}

/// Cheap span test on reference columns. Insertion sites share their anchor
/// column, so pairs whose overlap relies on insertions to reach `min_overlap`
/// are rejected here even though the walk would accept them.
fn has_overlap_opportunity(x: &Profile, y: &Profile, min_overlap: usize) -> bool {
    let min_overlap = i64::try_from(min_overlap).unwrap_or(i64::MAX);

    let disjoint = x.right_bound < y.left_bound || y.right_bound < x.left_bound;
    if disjoint && min_overlap > 0 {
        return false;
    }

    let reaches = |a: &Profile, b: &Profile| {
        a.right_bound.saturating_sub(b.left_bound).saturating_add(1) >= min_overlap
    };
    reaches(x, y) || reaches(y, x)
}

fn sites_match(x: &Position, y: &Position, tolerate_ambiguous: bool) -> bool {
    x.base_mask == y.base_mask || (tolerate_ambiguous && x.base_mask.intersects(y.base_mask))
}

fn reject(err: MergeError, x: &Position, y: &Position) -> MergeError {
    if cfg!(debug_assertions) {
        trace!(
            "{}: {} {} {}, {} {} {}",
            err,
            x.column,
            x.insertion_offset,
            x.base_mask,
            y.column,
            y.insertion_offset,
            y.base_mask
        );
    }
    err
}

/// Skips the leading overhang of `lead` relative to the first site of `other`.
///
/// Returns the number of skipped sites. Fails when the skip lands past the
/// first site of `other` without meeting it and gaps are not tolerated.
fn skip_overhang(
    lead: &[Position],
    other: &[Position],
    lead_side: Side,
    tolerate_gaps: bool,
) -> Result<usize, MergeError> {
    let anchor = &other[0];
    let mut idx = 0;
    while idx + 1 < lead.len() && compare_sites(&lead[idx], anchor) == Ordering::Less {
        idx += 1;
    }

    if compare_sites(&lead[idx], anchor) == Ordering::Greater && !tolerate_gaps {
        let (x, y) = match lead_side {
            Side::X => (&lead[idx], anchor),
            Side::Y => (anchor, &lead[idx]),
        };
        return Err(reject(
            MergeError::GapNotAllowed {
                side: lead_side.other(),
            },
            x,
            y,
        ));
    }

    Ok(idx)
}

pub(crate) fn scan_overlap(
    xs: &[Position],
    ys: &[Position],
    config: &MergeConfig,
) -> Result<OverlapScan, MergeError> {
    let mut xi = 0;
    let mut yi = 0;
    let mut scan = OverlapScan::default();

    match compare_sites(&xs[0], &ys[0]) {
        Ordering::Less => {
            xi = skip_overhang(xs, ys, Side::X, config.tolerate_gaps)?;
            scan.skipped = xi;
        }
        Ordering::Greater => {
            yi = skip_overhang(ys, xs, Side::Y, config.tolerate_gaps)?;
            scan.skipped = yi;
        }
        Ordering::Equal => {}
    }

    while xi < xs.len() && yi < ys.len() {
        let (x, y) = (&xs[xi], &ys[yi]);
        match compare_sites(x, y) {
            Ordering::Less => {
                if !config.tolerate_gaps {
                    return Err(reject(MergeError::GapNotAllowed { side: Side::X }, x, y));
                }
                xi += 1;
            }
            Ordering::Greater => {
                if !config.tolerate_gaps {
                    return Err(reject(MergeError::GapNotAllowed { side: Side::Y }, x, y));
                }
                yi += 1;
            }
            Ordering::Equal => {
                if !sites_match(x, y, config.tolerate_ambiguous) {
                    return Err(reject(
                        MergeError::BaseMismatch {
                            column: x.column,
                            insertion_offset: x.insertion_offset,
                        },
                        x,
                        y,
                    ));
                }
                scan.overlap += 1;
                xi += 1;
                yi += 1;
            }
        }
        scan.walked += 1;
    }

    if scan.overlap < config.min_overlap {
        return Err(MergeError::InsufficientOverlap {
            overlap: scan.overlap,
            required: config.min_overlap,
        });
    }

    scan.tail = (xs.len() - xi) + (ys.len() - yi);
    Ok(scan)
}

fn combine(x: &Position, y: &Position, policy: MaskPolicy) -> Position {
    let base_mask = match policy {
        MaskPolicy::Intersection => x.base_mask.intersection(y.base_mask).unwrap_or(x.base_mask),
        MaskPolicy::LegacyMinimum => x.base_mask.min(y.base_mask),
    };
    Position {
        base_mask,
        coverage: x.coverage.saturating_add(y.coverage),
        ..*x
    }
}

/// Interleaves both inputs from their starts, overhangs included, folding
/// equal sites into one.
pub(crate) fn build_positions(
    xs: &[Position],
    ys: &[Position],
    policy: MaskPolicy,
    out: &mut Vec<Position>,
) {
    let mut xi = 0;
    let mut yi = 0;

    while xi < xs.len() && yi < ys.len() {
        match compare_sites(&xs[xi], &ys[yi]) {
            Ordering::Less => {
                out.push(xs[xi]);
                xi += 1;
            }
            Ordering::Greater => {
                out.push(ys[yi]);
                yi += 1;
            }
            Ordering::Equal => {
                out.push(combine(&xs[xi], &ys[yi], policy));
                xi += 1;
                yi += 1;
            }
        }
    }

    out.extend_from_slice(&xs[xi..]);
    out.extend_from_slice(&ys[yi..]);
}
