// src/utils/bam_reader.rs
use anyhow::{Context, Result};
use rust_htslib::bam;
use std::path::Path;

pub struct BamReaderFactory;

impl BamReaderFactory {
    /// Opens a BAM, SAM or CRAM file. CRAM decoding uses `reference` when given.
    pub fn open(path: &Path, reference: Option<&str>) -> Result<bam::Reader> {
        let mut reader = bam::Reader::from_path(path)
            .with_context(|| format!("Failed to open alignment file {}", path.display()))?;

        if path.extension().map_or(false, |ext| ext == "cram") {
            if let Some(ref_path) = reference {
                reader
                    .set_reference(ref_path)
                    .with_context(|| format!("Failed to set CRAM reference {}", ref_path))?;
            }
        }

        Ok(reader)
    }
}
