use super::error::{ClusterError, MergeError};
use super::merge::merge;
use super::options::MergeConfig;
use super::profile::Profile;
use log::{debug, trace};

/// Reported to the observer after every successful merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeProgress {
    pub merges: usize,
    pub clusters: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterOutcome {
    /// Profiles with at least `min_reads` contributors after the final pass.
    pub retained: usize,
    pub merges: usize,
    pub passes: usize,
}

/// Merges profiles in place until a full pass performs no merge.
///
/// Each pass orders the profiles by descending contributor count and lets every
/// profile absorb as many of the later ones as it can, restarting its candidate
/// scan after each merge. Any merge sends the whole loop back to re-sorting.
/// The sort is stable, so equal counts keep their previous relative order.
pub fn cluster<F>(
    profiles: &mut Vec<Profile>,
    config: &MergeConfig,
    min_reads: u32,
    on_merge: F,
) -> Result<ClusterOutcome, ClusterError>
where
    F: FnMut(&MergeProgress),
{
    cluster_with(profiles, min_reads, |a, b| merge(a, b, config), on_merge)
}

/// The clustering loop over an arbitrary pairwise merge.
pub(crate) fn cluster_with<M, F>(
    profiles: &mut Vec<Profile>,
    min_reads: u32,
    mut merge_fn: M,
    mut on_merge: F,
) -> Result<ClusterOutcome, ClusterError>
where
    M: FnMut(&Profile, &Profile) -> Result<Profile, MergeError>,
    F: FnMut(&MergeProgress),
{
    let mut outcome = ClusterOutcome::default();

    loop {
        outcome.passes += 1;
        outcome.retained = 0;
        let merges_before = outcome.merges;

        profiles.sort_by(|a, b| b.contributor_count.cmp(&a.contributor_count));

        let mut a = 0;
        while a < profiles.len() {
            let mut b = a + 1;
            while b < profiles.len() {
                match merge_fn(&profiles[a], &profiles[b]) {
                    Ok(merged) => {
                        profiles[a] = merged;
                        profiles.remove(b);
                        outcome.merges += 1;
                        on_merge(&MergeProgress {
                            merges: outcome.merges,
                            clusters: profiles.len(),
                        });
                        b = a + 1;
                    }
                    Err(e) if e.is_fatal() => {
                        return Err(ClusterError::Fatal {
                            merges: outcome.merges,
                            source: e,
                        });
                    }
                    Err(e) => {
                        trace!("profiles {} and {} not merged: {}", a, b, e);
                        b += 1;
                    }
                }
            }

            if profiles[a].contributor_count >= min_reads {
                outcome.retained += 1;
            }
            a += 1;
        }

        debug!(
            "pass {}: {} merges, {} clusters",
            outcome.passes,
            outcome.merges - merges_before,
            profiles.len()
        );

        if outcome.merges == merges_before {
            return Ok(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::nucleotide::BaseMask;
    use crate::cluster::position::Position;

    fn read(start: i64, seq: &[u8]) -> Profile {
        let positions: Vec<Position> = seq
            .iter()
            .enumerate()
            .map(|(i, &nuc)| Position::new(start + i as i64, 0, BaseMask::from_nuc(nuc)))
            .collect();
        let end = start + seq.len() as i64 - 1;
        Profile::from_read(positions, start, end).unwrap()
    }

    fn strict(min_overlap: usize) -> MergeConfig {
        MergeConfig::new(min_overlap, false, false)
    }

    #[test]
    fn test_transitive_convergence() {
        let a = read(10, b"ACGTA");
        let b = read(13, b"TACCG");
        let c = read(16, b"CGGTT");
        assert!(merge(&a, &c, &strict(2)).is_err());

        // a is scanned first and only reaches c through b.
        let mut profiles = vec![a, c, b];
        let outcome = cluster(&mut profiles, &strict(2), 1, |_| {}).unwrap();

        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].contributor_count, 3);
        assert_eq!(profiles[0].consensus(), b"ACGTACCGGTT".to_vec());
        assert_eq!(outcome.merges, 2);
        assert_eq!(outcome.retained, 1);
        assert_eq!(outcome.passes, 2);
    }

    #[test]
    fn test_fixpoint_is_stable() {
        let mut profiles = vec![
            read(0, b"AAAACC"),
            read(4, b"CCGG"),
            read(100, b"TTTT"),
            read(102, b"TTGG"),
            read(200, b"ACGT"),
            read(202, b"CA"),
        ];
        let first = cluster(&mut profiles, &strict(2), 1, |_| {}).unwrap();
        assert!(first.merges > 0);
        let snapshot = profiles.clone();

        let second = cluster(&mut profiles, &strict(2), 1, |_| {}).unwrap();
        assert_eq!(second.merges, 0);
        assert_eq!(second.passes, 1);
        assert_eq!(second.retained, first.retained);
        assert_eq!(profiles, snapshot);
    }

    #[test]
    fn test_retained_respects_min_reads() {
        let mut profiles = vec![
            read(0, b"ACGT"),
            read(1, b"CGTA"),
            read(2, b"GTAC"),
            read(500, b"GGGG"),
        ];
        let outcome = cluster(&mut profiles, &strict(2), 2, |_| {}).unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(outcome.retained, 1);
        // Heaviest cluster sorts first.
        assert_eq!(profiles[0].contributor_count, 3);
        assert_eq!(profiles[1].contributor_count, 1);
    }

    #[test]
    fn test_progress_reports_every_merge() {
        let mut profiles = vec![read(0, b"ACGT"), read(1, b"CGTA"), read(2, b"GTAC")];
        let mut seen = Vec::new();
        cluster(&mut profiles, &strict(2), 1, |p| seen.push(*p)).unwrap();

        assert_eq!(
            seen,
            vec![
                MergeProgress {
                    merges: 1,
                    clusters: 2
                },
                MergeProgress {
                    merges: 2,
                    clusters: 1
                },
            ]
        );
    }

    #[test]
    fn test_failed_merges_leave_collection_untouched() {
        let original = vec![read(0, b"ACGT"), read(2, b"TTTT"), read(50, b"ACGT")];
        let mut profiles = original.clone();
        let outcome = cluster(&mut profiles, &strict(2), 1, |_| {}).unwrap();

        assert_eq!(outcome.merges, 0);
        assert_eq!(outcome.retained, 3);
        assert_eq!(profiles, original);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut profiles = vec![read(300, b"AAAA"), read(100, b"CCCC"), read(200, b"GGGG")];
        cluster(&mut profiles, &strict(2), 1, |_| {}).unwrap();
        let starts: Vec<i64> = profiles.iter().map(|p| p.left_bound).collect();
        assert_eq!(starts, vec![300, 100, 200]);
    }

    #[test]
    fn test_allocation_failure_aborts() {
        let original = vec![
            read(0, b"ACGT"),
            read(1, b"CGTA"),
            read(2, b"GTAC"),
            read(3, b"TACG"),
        ];
        let mut profiles = original.clone();
        let config = strict(2);
        let mut calls = 0;
        let mut seen = Vec::new();

        let err = cluster_with(
            &mut profiles,
            1,
            |a, b| {
                calls += 1;
                if calls == 2 {
                    Err(MergeError::AllocationFailure { len: a.len() + b.len() })
                } else {
                    merge(a, b, &config)
                }
            },
            |p| seen.push(*p),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ClusterError::Fatal {
                merges: 1,
                source: MergeError::AllocationFailure { .. }
            }
        ));
        assert_eq!(calls, 2);
        assert_eq!(seen.len(), 1);
        // First merge applied, nothing after the failure.
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[0], merge(&original[0], &original[1], &config).unwrap());
        assert_eq!(&profiles[1..], &original[2..]);
    }

    #[test]
    fn test_empty_collection() {
        let mut profiles = Vec::new();
        let outcome = cluster(&mut profiles, &strict(1), 1, |_| {}).unwrap();
        assert_eq!(
            outcome,
            ClusterOutcome {
                retained: 0,
                merges: 0,
                passes: 1
            }
        );
    }
}
