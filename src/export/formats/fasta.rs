use crate::cluster::Profile;
use bio::io::fasta;
use std::io::{self, Write};

/// Writes retained clusters as FASTA, one record per cluster.
///
/// Records are named `{contig}_{n}` with `n` counting from 1 within each contig.
/// The description carries the contributor count and the 1-based reference span.
pub struct FastaExporter<W: Write> {
    writer: fasta::Writer<W>,
    written: usize,
}

impl<W: Write> FastaExporter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: fasta::Writer::new(inner),
            written: 0,
        }
    }

    /// Writes every profile of `contig` with at least `min_reads` contributors.
    /// Returns how many were written.
    pub fn write_contig(
        &mut self,
        contig: &str,
        profiles: &[Profile],
        min_reads: u32,
    ) -> io::Result<usize> {
        let mut count = 0;
        for profile in profiles.iter().filter(|p| p.contributor_count >= min_reads) {
            count += 1;
            let id = format!("{}_{}", contig, count);
            let description = format!(
                "ncontrib={} span={}-{}",
                profile.contributor_count,
                profile.left_bound + 1,
                profile.right_bound + 1
            );
            self.writer
                .write(&id, Some(description.as_str()), &profile.consensus())?;
        }
        self.written += count;
        Ok(count)
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{BaseMask, Position};

    fn profile(start: i64, seq: &[u8], contributors: u32) -> Profile {
        let positions = seq
            .iter()
            .enumerate()
            .map(|(i, &b)| Position::new(start + i as i64, 0, BaseMask::from_nuc(b)))
            .collect();
        let mut profile = Profile::from_read(positions, start, start + seq.len() as i64 - 1).unwrap();
        profile.contributor_count = contributors;
        profile
    }

    #[test]
    fn test_write_filters_by_min_reads() {
        let mut buffer = Vec::new();
        {
            let mut exporter = FastaExporter::new(&mut buffer);
            let profiles = vec![profile(0, b"ACGT", 3), profile(10, b"GG", 1), profile(20, b"TRA", 2)];
            assert_eq!(exporter.write_contig("chr1", &profiles, 2).unwrap(), 2);
            assert_eq!(exporter.write_contig("chr2", &profiles[..1], 2).unwrap(), 1);
            assert_eq!(exporter.written(), 3);
            exporter.finish().unwrap();
        }

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            ">chr1_1 ncontrib=3 span=1-4\nACGT\n>chr1_2 ncontrib=2 span=21-23\nTRA\n>chr2_1 ncontrib=3 span=1-4\nACGT\n"
        );
    }
}
