//! Train / validate / test partitioning
//!
//! Two-stage proportional hold-out: 20% of the rows go to test, then 25% of
//! the remainder go to validate, which leaves 60/20/20 overall.

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::error::{Result, WrangleError};

/// Fraction of all rows held out as test
pub const TEST_FRACTION: f64 = 0.2;

/// Fraction of the non-test rows held out as validate
pub const VALIDATE_FRACTION: f64 = 0.25;

/// Minimum rows needed for a meaningful three-way split
pub const MIN_PARTITION_ROWS: usize = 3;

/// Three row-disjoint datasets covering every input row exactly once
#[derive(Debug, Clone)]
pub struct Partition {
    pub train: DataFrame,
    pub validate: DataFrame,
    pub test: DataFrame,
}

impl Partition {
    /// Row counts as (train, validate, test)
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.train.height(), self.validate.height(), self.test.height())
    }

    pub fn total_rows(&self) -> usize {
        self.train.height() + self.validate.height() + self.test.height()
    }
}

/// Row positions assigned to each partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionIndices {
    pub train: Vec<IdxSize>,
    pub validate: Vec<IdxSize>,
    pub test: Vec<IdxSize>,
}

/// Size of the held-out part of an `n`-row split, rounded up
fn holdout_size(n: usize, fraction: f64) -> usize {
    ((n as f64) * fraction).ceil() as usize
}

/// Draw a uniform random hold-out of `fraction` of `indices`, without
/// replacement. Returns (kept, held_out).
fn hold_out<R: Rng + ?Sized>(
    mut indices: Vec<IdxSize>,
    fraction: f64,
    rng: &mut R,
) -> (Vec<IdxSize>, Vec<IdxSize>) {
    let n_holdout = holdout_size(indices.len(), fraction).min(indices.len());
    indices.shuffle(rng);
    let kept = indices.split_off(n_holdout);
    (kept, indices)
}

/// Assign `n_rows` row positions to train/validate/test using `rng`.
pub fn partition_indices<R: Rng + ?Sized>(n_rows: usize, rng: &mut R) -> Result<PartitionIndices> {
    if n_rows < MIN_PARTITION_ROWS {
        return Err(WrangleError::InsufficientData {
            operation: "Partitioning",
            rows: n_rows,
            required: MIN_PARTITION_ROWS,
        });
    }

    let all: Vec<IdxSize> = (0..n_rows as IdxSize).collect();
    let (train_validate, test) = hold_out(all, TEST_FRACTION, rng);
    let (train, validate) = hold_out(train_validate, VALIDATE_FRACTION, rng);

    Ok(PartitionIndices {
        train,
        validate,
        test,
    })
}

/// Split `df` into train (60%), validate (20%) and test (20%) using `rng`.
///
/// Columns are untouched; only rows are distributed. No stratification.
pub fn split_dataset_with_rng<R: Rng + ?Sized>(df: &DataFrame, rng: &mut R) -> Result<Partition> {
    let indices = partition_indices(df.height(), rng)?;

    let take = |idx: Vec<IdxSize>| -> Result<DataFrame> {
        let idx = IdxCa::from_vec("idx".into(), idx);
        Ok(df.take(&idx)?)
    };

    let partition = Partition {
        train: take(indices.train)?,
        validate: take(indices.validate)?,
        test: take(indices.test)?,
    };

    let (train, validate, test) = partition.sizes();
    tracing::info!(rows = df.height(), train, validate, test, "split dataset");

    Ok(partition)
}

/// Split `df` with a seeded `StdRng`; the same seed always yields the same
/// row membership. `None` seeds from OS entropy.
pub fn split_dataset(df: &DataFrame, seed: Option<u64>) -> Result<Partition> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    split_dataset_with_rng(df, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_partition_sizes_for_100_rows() {
        let mut rng = StdRng::seed_from_u64(123);
        let idx = partition_indices(100, &mut rng).unwrap();
        assert_eq!(idx.train.len(), 60);
        assert_eq!(idx.validate.len(), 20);
        assert_eq!(idx.test.len(), 20);
    }

    #[test]
    fn test_indices_cover_every_row_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let idx = partition_indices(37, &mut rng).unwrap();

        let mut seen = HashSet::new();
        for i in idx.train.iter().chain(&idx.validate).chain(&idx.test) {
            assert!(seen.insert(*i), "row {} assigned twice", i);
        }
        assert_eq!(seen.len(), 37);
    }

    #[test]
    fn test_rounding_for_odd_sizes() {
        // test = ceil(0.2 * 11) = 3, validate = ceil(0.25 * 8) = 2
        let mut rng = StdRng::seed_from_u64(1);
        let idx = partition_indices(11, &mut rng).unwrap();
        assert_eq!((idx.train.len(), idx.validate.len(), idx.test.len()), (6, 2, 3));
    }

    #[test]
    fn test_three_rows_is_enough() {
        let mut rng = StdRng::seed_from_u64(1);
        let idx = partition_indices(3, &mut rng).unwrap();
        assert_eq!((idx.train.len(), idx.validate.len(), idx.test.len()), (1, 1, 1));
    }

    #[test]
    fn test_too_few_rows() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = partition_indices(2, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            WrangleError::InsufficientData { rows: 2, required: 3, .. }
        ));
    }
}
