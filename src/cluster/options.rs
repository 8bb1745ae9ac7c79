use serde::{Deserialize, Serialize};

/// How the masks of two matched sites are folded into the consensus.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskPolicy {
    /// Keep only the bases both sites allow.
    #[default]
    #[value(name = "intersection")]
    Intersection,
    /// Numerically smaller mask wins; matches output of older releases.
    #[value(name = "legacy-minimum")]
    LegacyMinimum,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeConfig {
    pub min_overlap: usize,
    pub tolerate_gaps: bool,
    pub tolerate_ambiguous: bool,
    pub mask_policy: MaskPolicy,
}

impl MergeConfig {
    pub fn new(min_overlap: usize, tolerate_gaps: bool, tolerate_ambiguous: bool) -> Self {
        Self {
            min_overlap,
            tolerate_gaps,
            tolerate_ambiguous,
            mask_policy: MaskPolicy::default(),
        }
    }

    pub fn with_mask_policy(mut self, mask_policy: MaskPolicy) -> Self {
        self.mask_policy = mask_policy;
        self
    }
}
