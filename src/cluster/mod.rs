//! Profile merging and the clustering loop built on it.

mod engine;
mod error;
mod merge;
pub mod nucleotide;
mod options;
mod position;
mod profile;

pub use engine::{cluster, ClusterOutcome, MergeProgress};
pub use error::{ClusterError, MergeError, ProfileError, Side};
pub use merge::merge;
pub use nucleotide::{mask_to_nuc, nuc_to_mask, BaseMask};
pub use options::{MaskPolicy, MergeConfig};
pub use position::{compare_sites, is_strictly_ordered, Position};
pub use profile::Profile;
