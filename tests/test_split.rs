//! Tests for train / validate / test partitioning

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use zwrangle::pipeline::{
    partition_indices, split_dataset, split_dataset_with_rng, WrangleError, MIN_PARTITION_ROWS,
};

#[path = "common/mod.rs"]
mod common;

use common::*;

fn ids(df: &polars::prelude::DataFrame) -> Vec<i64> {
    i64_values(df, "row_id")
}

#[test]
fn test_hundred_rows_split_60_20_20() {
    let df = create_indexed_dataframe(100);
    let partition = split_dataset(&df, Some(123)).unwrap();

    assert_eq!(partition.sizes(), (60, 20, 20));
    assert_eq!(partition.total_rows(), 100);
}

#[test]
fn test_sizes_follow_two_stage_rounding() {
    // test = ceil(0.2 * n), validate = ceil(0.25 * rest)
    let cases = [(3, (1, 1, 1)), (10, (6, 2, 2)), (11, (6, 2, 3)), (37, (21, 8, 8))];

    for (n, expected) in cases {
        let df = create_indexed_dataframe(n);
        let partition = split_dataset(&df, Some(1)).unwrap();
        assert_eq!(partition.sizes(), expected, "n = {}", n);
    }
}

#[test]
fn test_partitions_are_disjoint_and_cover_input() {
    let df = create_indexed_dataframe(250);
    let partition = split_dataset(&df, Some(99)).unwrap();

    let mut seen = HashSet::new();
    for part in [&partition.train, &partition.validate, &partition.test] {
        for id in ids(part) {
            assert!(seen.insert(id), "row {} assigned twice", id);
        }
    }
    let expected: HashSet<i64> = (0..250).collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_same_seed_same_membership() {
    let df = create_indexed_dataframe(80);

    let a = split_dataset(&df, Some(123)).unwrap();
    let b = split_dataset(&df, Some(123)).unwrap();

    assert_eq!(ids(&a.train), ids(&b.train));
    assert_eq!(ids(&a.validate), ids(&b.validate));
    assert_eq!(ids(&a.test), ids(&b.test));
}

#[test]
fn test_different_seed_changes_membership() {
    let df = create_indexed_dataframe(80);

    let a = split_dataset(&df, Some(1)).unwrap();
    let b = split_dataset(&df, Some(2)).unwrap();

    assert_ne!(ids(&a.test), ids(&b.test));
}

#[test]
fn test_explicit_rng_matches_seeded_split() {
    let df = create_indexed_dataframe(40);

    let mut rng = StdRng::seed_from_u64(5);
    let from_rng = split_dataset_with_rng(&df, &mut rng).unwrap();
    let seeded = split_dataset(&df, Some(5)).unwrap();

    assert_eq!(ids(&from_rng.train), ids(&seeded.train));
}

#[test]
fn test_columns_are_untouched() {
    let df = create_zillow_dataframe();
    let partition = split_dataset(&df, Some(123)).unwrap();

    for part in [&partition.train, &partition.validate, &partition.test] {
        assert_eq!(part.get_column_names(), df.get_column_names());
        assert_eq!(part.dtypes(), df.dtypes());
    }
}

#[test]
fn test_too_few_rows_is_rejected() {
    let df = create_indexed_dataframe(MIN_PARTITION_ROWS - 1);
    let err = split_dataset(&df, Some(123)).unwrap_err();

    assert!(matches!(
        err,
        WrangleError::InsufficientData { rows: 2, required: 3, .. }
    ));
}

#[test]
fn test_partition_indices_are_a_permutation() {
    let mut rng = StdRng::seed_from_u64(11);
    let indices = partition_indices(20, &mut rng).unwrap();

    let mut all: Vec<u32> = indices
        .train
        .iter()
        .chain(&indices.validate)
        .chain(&indices.test)
        .map(|&i| i as u32)
        .collect();
    all.sort_unstable();
    assert_eq!(all, (0..20).collect::<Vec<u32>>());
}
