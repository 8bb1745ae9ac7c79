use crate::cluster::MaskPolicy;
use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cluster aligned reads into consensus sequences by merging overlaps
    Cluster(ClusterArgs),

    /// Print the effective configuration as TOML
    Config {
        /// Config file to read instead of the per-user one
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct ClusterArgs {
    /// Input BAM, SAM or CRAM file
    pub bam_file: PathBuf,

    /// Output FASTA file for the retained clusters
    #[arg(short = 'o', long = "output", default_value = "clusters.fasta")]
    pub output_file: PathBuf,

    /// Reference FASTA, needed to decode CRAM input
    #[arg(short = 'r', long)]
    pub reference: Option<String>,

    /// Minimum number of matching sites required to merge two clusters
    #[arg(long)]
    pub min_overlap: Option<usize>,

    /// Allow one cluster to have sites the other lacks within the overlap
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub tolerate_gaps: Option<bool>,

    /// Accept ambiguous bases that merely share a nucleotide as a match
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub tolerate_ambiguous: Option<bool>,

    /// Minimum number of reads for a cluster to be reported
    #[arg(long)]
    pub min_reads: Option<u32>,

    /// Minimum mapping quality for a read to be loaded
    #[arg(long)]
    pub min_mapping_quality: Option<u8>,

    /// Bases below this quality are trimmed from reads
    #[arg(long)]
    pub min_base_quality: Option<u8>,

    /// How ambiguity masks of matched sites are combined
    #[arg(long, value_enum)]
    pub mask_policy: Option<MaskPolicy>,

    /// Write a JSON summary of the run to this file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Config file to read instead of the per-user one
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable the progress spinner
    #[arg(short, long)]
    pub quiet: bool,
}

impl ClusterArgs {
    /// Overrides `config` with every option given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(min_overlap) = self.min_overlap {
            config.min_overlap = min_overlap;
        }
        if let Some(gaps) = self.tolerate_gaps {
            config.tolerate_gaps = gaps;
        }
        if let Some(ambiguous) = self.tolerate_ambiguous {
            config.tolerate_ambiguous = ambiguous;
        }
        if let Some(min_reads) = self.min_reads {
            config.min_reads = min_reads;
        }
        if let Some(mapq) = self.min_mapping_quality {
            config.min_mapping_quality = mapq;
        }
        if let Some(baseq) = self.min_base_quality {
            config.min_base_quality = baseq;
        }
        if let Some(policy) = self.mask_policy {
            config.mask_policy = policy;
        }
    }
}
