pub mod formats;

pub use formats::fasta::FastaExporter;
pub use formats::summary::{ClusterSummary, ContigSummary, SummaryParameters};
