use crate::cluster::{BaseMask, Position, Profile, ProfileError};
use rust_htslib::bam::record::Cigar;

/// Base quality htslib stores when a record carries no qualities.
const MISSING_QUALITY: u8 = 0xff;

/// Builds a single-read profile from an alignment.
///
/// Aligned bases become `(ref_pos, 0)` sites; inserted bases become
/// `(last_ref_pos, k)` for the k-th base of the insertion. Bases below
/// `min_base_quality` are left out, but the profile bounds still cover the
/// whole reference span of the alignment. Returns `None` when nothing is left.
pub fn profile_from_alignment(
    pos: i64,
    cigar: &[Cigar],
    seq: &[u8],
    qual: &[u8],
    min_base_quality: u8,
) -> Result<Option<Profile>, ProfileError> {
    let passes = |i: usize| {
        qual.get(i)
            .map_or(true, |&q| q == MISSING_QUALITY || q >= min_base_quality)
    };

    let mut positions = Vec::with_capacity(seq.len());
    let mut ref_pos = pos;
    let mut read_pos = 0usize;
    let mut ins_offset = 0u32;

    for op in cigar {
        match *op {
            Cigar::Match(len) | Cigar::Equal(len) | Cigar::Diff(len) => {
                for _ in 0..len {
                    if let Some(&base) = seq.get(read_pos) {
                        if passes(read_pos) {
                            positions.push(Position::new(ref_pos, 0, BaseMask::from_nuc(base)));
                        }
                    }
                    ref_pos += 1;
                    read_pos += 1;
                }
                ins_offset = 0;
            }
            Cigar::Ins(len) => {
                for _ in 0..len {
                    ins_offset += 1;
                    // Nothing to anchor an insertion to before the first reference base.
                    if ref_pos > pos {
                        if let Some(&base) = seq.get(read_pos) {
                            if passes(read_pos) {
                                positions.push(Position::new(
                                    ref_pos - 1,
                                    ins_offset,
                                    BaseMask::from_nuc(base),
                                ));
                            }
                        }
                    }
                    read_pos += 1;
                }
            }
            Cigar::Del(len) | Cigar::RefSkip(len) => {
                ref_pos += len as i64;
                ins_offset = 0;
            }
            Cigar::SoftClip(len) => read_pos += len as usize,
            Cigar::HardClip(_) | Cigar::Pad(_) => {}
        }
    }

    if positions.is_empty() || ref_pos == pos {
        return Ok(None);
    }

    Profile::from_read(positions, pos, ref_pos - 1).map(Some)
}
