use crate::cluster::{ClusterOutcome, MaskPolicy};
use crate::loader::LoadStats;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ClusterSummary {
    pub input: String,
    pub parameters: SummaryParameters,
    pub reads: LoadStats,
    pub contigs: Vec<ContigSummary>,
    pub total_clusters: usize,
    pub retained_clusters: usize,
}

#[derive(Debug, Serialize)]
pub struct SummaryParameters {
    pub min_overlap: usize,
    pub tolerate_gaps: bool,
    pub tolerate_ambiguous: bool,
    pub min_reads: u32,
    pub min_mapping_quality: u8,
    pub min_base_quality: u8,
    pub mask_policy: MaskPolicy,
}

#[derive(Debug, Serialize)]
pub struct ContigSummary {
    pub name: String,
    pub reads: usize,
    pub clusters: usize,
    pub retained: usize,
    pub merges: usize,
    pub passes: usize,
}

impl ContigSummary {
    pub fn new(name: &str, reads: usize, clusters: usize, outcome: &ClusterOutcome) -> Self {
        Self {
            name: name.to_string(),
            reads,
            clusters,
            retained: outcome.retained,
            merges: outcome.merges,
            passes: outcome.passes,
        }
    }
}

impl ClusterSummary {
    pub fn new(input: &str, parameters: SummaryParameters, reads: LoadStats) -> Self {
        Self {
            input: input.to_string(),
            parameters,
            reads,
            contigs: Vec::new(),
            total_clusters: 0,
            retained_clusters: 0,
        }
    }

    pub fn add_contig(&mut self, contig: ContigSummary) {
        self.total_clusters += contig.clusters;
        self.retained_clusters += contig.retained;
        self.contigs.push(contig);
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create summary file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .context("Failed to write cluster summary")?;
        writer.flush()?;
        Ok(())
    }
}
