use serde::{Deserialize, Serialize};
use std::fmt;

pub const MASK_A: u8 = 1;
pub const MASK_C: u8 = 2;
pub const MASK_G: u8 = 4;
pub const MASK_T: u8 = 8;
pub const MASK_ANY: u8 = MASK_A | MASK_C | MASK_G | MASK_T;

/// Maps a nucleotide (IUPAC letters included) to its 4-bit mask.
/// Anything unrecognised, `N` included, maps to the "any base" mask.
pub fn nuc_to_mask(nuc: u8) -> u8 {
    match nuc.to_ascii_uppercase() {
        b'A' => MASK_A,
        b'C' => MASK_C,
        b'G' => MASK_G,
        b'T' => MASK_T,
        b'M' => MASK_A | MASK_C,
        b'R' => MASK_A | MASK_G,
        b'W' => MASK_A | MASK_T,
        b'S' => MASK_C | MASK_G,
        b'Y' => MASK_C | MASK_T,
        b'K' => MASK_G | MASK_T,
        b'V' => MASK_A | MASK_C | MASK_G,
        b'H' => MASK_A | MASK_C | MASK_T,
        b'D' => MASK_A | MASK_G | MASK_T,
        b'B' => MASK_C | MASK_G | MASK_T,
        _ => MASK_ANY,
    }
}

/// Inverse of [`nuc_to_mask`]. Zero and out-of-range masks render as `N`.
pub fn mask_to_nuc(mask: u8) -> u8 {
    match mask {
        1 => b'A',
        2 => b'C',
        4 => b'G',
        8 => b'T',
        3 => b'M',
        5 => b'R',
        9 => b'W',
        6 => b'S',
        10 => b'Y',
        12 => b'K',
        7 => b'V',
        11 => b'H',
        13 => b'D',
        14 => b'B',
        _ => b'N',
    }
}

/// Non-empty set of possible bases at a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BaseMask(u8);

impl BaseMask {
    pub const ANY: BaseMask = BaseMask(MASK_ANY);

    /// Returns `None` for zero or for bits outside the low nibble.
    pub fn new(bits: u8) -> Option<Self> {
        if bits == 0 || bits & !MASK_ANY != 0 {
            None
        } else {
            Some(BaseMask(bits))
        }
    }

    pub fn from_nuc(nuc: u8) -> Self {
        BaseMask(nuc_to_mask(nuc))
    }

    pub fn to_nuc(self) -> u8 {
        mask_to_nuc(self.0)
    }

    pub fn is_ambiguous(self) -> bool {
        self.0.count_ones() > 1
    }

    pub fn intersects(self, other: BaseMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Shared bases of both masks, `None` when they are disjoint.
    pub fn intersection(self, other: BaseMask) -> Option<BaseMask> {
        BaseMask::new(self.0 & other.0)
    }
}

impl TryFrom<u8> for BaseMask {
    type Error = String;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        BaseMask::new(bits).ok_or_else(|| format!("Invalid base mask: {}", bits))
    }
}

impl From<BaseMask> for u8 {
    fn from(mask: BaseMask) -> u8 {
        mask.0
    }
}

impl fmt::Display for BaseMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_nuc() as char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iupac_table() {
        let cases = vec![
            (b'A', 1u8),
            (b'C', 2),
            (b'G', 4),
            (b'T', 8),
            (b'M', 3),
            (b'R', 5),
            (b'W', 9),
            (b'S', 6),
            (b'Y', 10),
            (b'K', 12),
            (b'V', 7),
            (b'H', 11),
            (b'D', 13),
            (b'B', 14),
            (b'N', 15),
        ];

        for (nuc, mask) in cases {
            assert_eq!(nuc_to_mask(nuc), mask, "mask for {}", nuc as char);
            assert_eq!(mask_to_nuc(mask), nuc, "nuc for {}", mask);
        }
    }

    #[test]
    fn test_unknown_input_is_any() {
        for nuc in [b'X', b'-', b'*', b'.', b'U', b'0'] {
            assert_eq!(nuc_to_mask(nuc), MASK_ANY);
        }
        assert_eq!(nuc_to_mask(b'a'), MASK_A);
        assert_eq!(nuc_to_mask(b'y'), MASK_C | MASK_T);
    }

    #[test]
    fn test_unknown_mask_is_n() {
        assert_eq!(mask_to_nuc(0), b'N');
        assert_eq!(mask_to_nuc(16), b'N');
        assert_eq!(mask_to_nuc(255), b'N');
    }

    #[test]
    fn test_base_mask_set_ops() {
        let ac = BaseMask::from_nuc(b'M');
        let cg = BaseMask::from_nuc(b'S');
        let t = BaseMask::from_nuc(b'T');

        assert!(ac.is_ambiguous());
        assert!(!t.is_ambiguous());
        assert!(ac.intersects(cg));
        assert!(!ac.intersects(t));
        assert_eq!(ac.intersection(cg), Some(BaseMask::from_nuc(b'C')));
        assert_eq!(ac.intersection(t), None);
        assert_eq!(BaseMask::new(0), None);
        assert_eq!(BaseMask::new(0x10), None);
        assert_eq!(ac.to_string(), "M");
    }
}
