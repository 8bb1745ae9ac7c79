//! Turns aligned reads into single-read profiles, grouped per reference contig.

mod alignment;

pub use alignment::profile_from_alignment;

use crate::cluster::Profile;
use crate::utils::bam_reader::BamReaderFactory;
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use log::{debug, warn};
use rust_htslib::bam::{self, record::Cigar, Read};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

const PROGRESS_INTERVAL: u64 = 10_000;

#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub min_mapping_quality: u8,
    pub min_base_quality: u8,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub total: u64,
    pub loaded: u64,
    /// Unmapped, secondary, supplementary, QC-failed, duplicate or low MAPQ.
    pub filtered: u64,
    /// Records left with no positions after trimming.
    pub empty: u64,
}

#[derive(Debug)]
pub struct ContigProfiles {
    pub name: String,
    pub profiles: Vec<Profile>,
}

fn keep_record(record: &bam::Record, options: &LoadOptions) -> bool {
    !(record.is_unmapped()
        || record.is_secondary()
        || record.is_supplementary()
        || record.is_quality_check_failed()
        || record.is_duplicate()
        || record.tid() < 0
        || record.mapq() < options.min_mapping_quality)
}

/// Reads every alignment in `path` into per-contig profile lists, contigs in
/// first-seen order and profiles in file order.
pub fn load_profiles(
    path: &Path,
    reference: Option<&str>,
    options: &LoadOptions,
    progress: &ProgressBar,
) -> Result<(Vec<ContigProfiles>, LoadStats)> {
    let mut reader = BamReaderFactory::open(path, reference)?;
    let header = reader.header().clone();

    let mut contigs: Vec<ContigProfiles> = Vec::new();
    let mut index: HashMap<i32, usize> = HashMap::new();
    let mut stats = LoadStats::default();
    let mut record = bam::Record::new();

    while let Some(result) = reader.read(&mut record) {
        result.with_context(|| format!("Failed to read record from {}", path.display()))?;
        stats.total += 1;
        if stats.total % PROGRESS_INTERVAL == 0 {
            progress.set_message(format!("Loaded {} reads", stats.loaded));
        }

        if !keep_record(&record, options) {
            stats.filtered += 1;
            continue;
        }

        let cigar: Vec<Cigar> = record.cigar().iter().copied().collect();
        let seq = record.seq().as_bytes();
        let profile = match profile_from_alignment(
            record.pos(),
            &cigar,
            &seq,
            record.qual(),
            options.min_base_quality,
        ) {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                stats.empty += 1;
                continue;
            }
            Err(e) => {
                warn!(
                    "Skipping {}: {}",
                    String::from_utf8_lossy(record.qname()),
                    e
                );
                stats.empty += 1;
                continue;
            }
        };

        let tid = record.tid();
        let slot = *index.entry(tid).or_insert_with(|| {
            contigs.push(ContigProfiles {
                name: String::from_utf8_lossy(header.tid2name(tid as u32)).into_owned(),
                profiles: Vec::new(),
            });
            contigs.len() - 1
        });
        contigs[slot].profiles.push(profile);
        stats.loaded += 1;
    }

    debug!(
        "loaded {} of {} records across {} contigs",
        stats.loaded,
        stats.total,
        contigs.len()
    );

    Ok((contigs, stats))
}
