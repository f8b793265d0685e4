//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

/// Bedroom counts with one obvious outlier (100)
pub const BED_WITH_OUTLIER: [i64; 10] = [1, 2, 2, 3, 3, 3, 4, 4, 5, 100];

/// Create a small prepared-looking Zillow DataFrame
///
/// This DataFrame includes:
/// - `bed`: integer counts with one outlier (100)
/// - `bath`: float counts
/// - `sqft`: finished square feet
/// - `assessed_worth`: target column
/// - `county`: categorical county name
pub fn create_zillow_dataframe() -> DataFrame {
    df! {
        "bed" => BED_WITH_OUTLIER,
        "bath" => [1.0f64, 1.5, 1.5, 2.0, 2.0, 2.5, 2.5, 3.0, 3.0, 3.5],
        "sqft" => [800.0f64, 950.0, 1100.0, 1200.0, 1300.0, 1350.0, 1500.0, 1600.0, 1800.0, 2000.0],
        "assessed_worth" => [150_000.0f64, 180_000.0, 210_000.0, 240_000.0, 260_000.0,
                             275_000.0, 300_000.0, 330_000.0, 360_000.0, 400_000.0],
        "county" => ["LA", "LA", "Orange", "Ventura", "LA", "Orange", "LA", "LA", "Ventura", "Orange"],
    }
    .unwrap()
}

/// Create a raw extract with the original Zillow column names
pub fn create_raw_zillow_dataframe() -> DataFrame {
    df! {
        "parcelid" => [11i64, 12, 13, 14, 15, 16],
        "bedroomcnt" => [Some(3.0f64), Some(4.0), Some(2.0), None, Some(3.0), Some(5.0)],
        "bathroomcnt" => [2.0f64, 2.5, 1.0, 2.0, 2.0, 3.0],
        "calculatedfinishedsquarefeet" => [Some(1400.0f64), Some(2100.0), Some(900.0), Some(1500.0), None, Some(2600.0)],
        "taxvaluedollarcnt" => [310_000.0f64, 450_000.0, 190_000.0, 320_000.0, 300_000.0, 610_000.0],
        "fips" => [6037.0f64, 6059.0, 6111.0, 6037.0, 6059.0, 6037.0],
    }
    .unwrap()
}

/// Create a DataFrame with a row id column for membership checks
pub fn create_indexed_dataframe(rows: usize) -> DataFrame {
    let ids: Vec<i64> = (0..rows as i64).collect();
    let values: Vec<f64> = (0..rows).map(|i| i as f64 * 1.5).collect();
    df! {
        "row_id" => ids,
        "value" => values,
    }
    .unwrap()
}

/// Create a larger random DataFrame for property tests and benchmarks
pub fn create_random_dataframe(rows: usize, cols: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut columns: Vec<Column> = Vec::with_capacity(cols);
    for i in 0..cols {
        let values: Vec<f64> = (0..rows)
            .map(|_| {
                let v: f64 = rng.gen();
                // Heavy tail so every column has something to trim
                if rng.gen_bool(0.05) {
                    v * 1000.0
                } else {
                    v * 10.0
                }
            })
            .collect();
        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }

    DataFrame::new(columns).unwrap()
}

/// Read a column as f64 values, panicking on nulls
pub fn f64_values(df: &DataFrame, column: &str) -> Vec<f64> {
    df.column(column)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

/// Read an i64 id column
pub fn i64_values(df: &DataFrame, column: &str) -> Vec<i64> {
    df.column(column)
        .unwrap()
        .i64()
        .unwrap()
        .into_no_null_iter()
        .collect()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
