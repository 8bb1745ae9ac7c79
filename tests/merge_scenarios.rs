use bamclust::cluster::{BaseMask, MergeError, Position};
use bamclust::{merge, MergeConfig, Profile};

fn p(column: i64, nuc: u8) -> Position {
    Position::new(column, 0, BaseMask::from_nuc(nuc))
}

fn profile(positions: Vec<Position>, left: i64, right: i64) -> Profile {
    Profile::from_read(positions, left, right).expect("valid profile")
}

fn config(min_overlap: usize) -> MergeConfig {
    MergeConfig::new(min_overlap, false, false)
}

#[test]
fn scenario_basic_merge() {
    let x = profile(vec![p(10, b'A')], 10, 10);
    let y = profile(vec![p(10, b'A')], 10, 10);

    let merged = merge(&x, &y, &config(1)).expect("identical sites merge");
    assert_eq!(merged.positions, vec![p(10, b'A').with_coverage(2)]);
    assert_eq!(merged.contributor_count, 2);
}

#[test]
fn scenario_chained_overlap() {
    let x = profile(vec![p(10, b'A'), p(11, b'C')], 10, 11);
    let y = profile(vec![p(11, b'C'), p(12, b'G')], 11, 12);

    let merged = merge(&x, &y, &config(1)).expect("chained overlap merges");
    let sites: Vec<(i64, u8, u32)> = merged
        .positions
        .iter()
        .map(|s| (s.column, s.base_mask.to_nuc(), s.coverage))
        .collect();
    assert_eq!(sites, vec![(10, b'A', 1), (11, b'C', 2), (12, b'G', 1)]);
    assert_eq!(merged.contributor_count, 2);
}

#[test]
fn scenario_mismatch() {
    let x = profile(vec![p(10, b'A'), p(11, b'C')], 10, 11);
    let y = profile(vec![p(11, b'T'), p(12, b'G')], 11, 12);

    assert!(matches!(
        merge(&x, &y, &config(1)),
        Err(MergeError::BaseMismatch { .. })
    ));
}

#[test]
fn scenario_insufficient_overlap() {
    let x = profile(vec![p(10, b'A'), p(11, b'C')], 10, 11);
    let y = profile(vec![p(11, b'C'), p(12, b'G')], 11, 12);

    assert!(matches!(
        merge(&x, &y, &config(2)),
        Err(MergeError::InsufficientOverlap { .. })
    ));
}

#[test]
fn scenario_no_opportunity() {
    let x = profile(vec![p(3, b'A'), p(4, b'C'), p(5, b'G')], 3, 5);
    let y = profile(vec![p(50, b'A'), p(51, b'C')], 50, 51);

    assert_eq!(
        merge(&x, &y, &config(1)).unwrap_err(),
        MergeError::NoOverlapOpportunity
    );
}

#[test]
fn merge_leaves_inputs_untouched() {
    let x = profile(vec![p(10, b'A'), p(11, b'C')], 10, 11);
    let y = profile(vec![p(11, b'C'), p(12, b'G')], 11, 12);
    let (x_before, y_before) = (x.clone(), y.clone());

    let _ = merge(&x, &y, &config(1)).unwrap();
    assert_eq!(x, x_before);
    assert_eq!(y, y_before);
}
