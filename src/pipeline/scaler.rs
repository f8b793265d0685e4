//! Min-max scaling fitted once and shared across partitions
//!
//! The scaler is fitted on one dataset (the training partition) and the
//! stored per-column ranges are reused unchanged for every later
//! `transform` / `inverse_transform`, so all partitions share one frame of
//! reference.
//!
//! A column whose fitted min equals its max has no range to divide by. Such
//! columns are scaled to 0.0 and a warning is emitted; the inverse maps them
//! back to the single fitted value.

use std::path::Path;

use anyhow::Context;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::{Result, WrangleError};
use super::outliers::column_as_f64;

/// Fitted minimum and maximum of one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Zero-range column (every fitted value identical)
    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0
    }

    #[inline]
    pub fn scale(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            (value - self.min) / self.span()
        }
    }

    #[inline]
    pub fn unscale(&self, value: f64) -> f64 {
        value * self.span() + self.min
    }
}

/// Min-max scaler. Starts unfit; `fit` moves it to the fitted state once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinMaxScaler {
    ranges: Option<Vec<(String, ColumnRange)>>,
}

/// A scaler fitted on train plus the three transformed partitions
#[derive(Debug, Clone)]
pub struct ScaledPartitions {
    pub scaler: MinMaxScaler,
    pub train: DataFrame,
    pub validate: DataFrame,
    pub test: DataFrame,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.ranges.is_some()
    }

    /// Fitted ranges in the order the columns were given to `fit`
    pub fn ranges(&self) -> Option<&[(String, ColumnRange)]> {
        self.ranges.as_deref()
    }

    pub fn range(&self, column: &str) -> Option<ColumnRange> {
        self.ranges
            .as_ref()?
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, range)| *range)
    }

    /// Names of fitted columns with zero range
    pub fn degenerate_columns(&self) -> Vec<&str> {
        self.ranges
            .iter()
            .flatten()
            .filter(|(_, range)| range.is_degenerate())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Compute and store the min and max of each listed column of `df`.
    ///
    /// Nulls and NaN are ignored. Fitting twice is rejected; build a new
    /// scaler for a new scaling session.
    pub fn fit(&mut self, df: &DataFrame, columns: &[String]) -> Result<&mut Self> {
        if self.is_fitted() {
            return Err(WrangleError::AlreadyFitted);
        }

        let mut ranges = Vec::with_capacity(columns.len());

        for column in columns {
            let values = column_as_f64(df, column)?;
            let (min, max) = values
                .iter()
                .filter_map(|v| *v)
                .filter(|v| !v.is_nan())
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });

            if min > max {
                return Err(WrangleError::InsufficientData {
                    operation: "Scaler fit",
                    rows: 0,
                    required: 1,
                });
            }

            let range = ColumnRange { min, max };
            if range.is_degenerate() {
                tracing::warn!(
                    column = column.as_str(),
                    value = min,
                    "zero-range column, scaled values are clamped to 0.0"
                );
            }
            ranges.push((column.clone(), range));
        }

        tracing::debug!(columns = ranges.len(), "fitted min-max scaler");
        self.ranges = Some(ranges);
        Ok(self)
    }

    fn fitted_ranges(&self) -> Result<&[(String, ColumnRange)]> {
        self.ranges.as_deref().ok_or(WrangleError::UnfitState)
    }

    /// Map each listed column to `(v - min) / (max - min)` using the stored
    /// ranges. Other columns pass through untouched.
    pub fn transform(&self, df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
        self.fitted_ranges()?;

        let mut out = df.clone();
        for column in columns {
            let range = self
                .range(column)
                .ok_or_else(|| WrangleError::ColumnNotFitted {
                    column: column.clone(),
                })?;
            let scaled: Vec<Option<f64>> = column_as_f64(df, column)?
                .into_iter()
                .map(|v| v.map(|x| range.scale(x)))
                .collect();
            out.with_column(Series::new(column.as_str().into(), scaled))?;
        }

        Ok(out)
    }

    /// Map every fitted column back with `v * (max - min) + min`.
    ///
    /// All fitted columns must be present in `df`; other columns pass through.
    pub fn inverse_transform(&self, df: &DataFrame) -> Result<DataFrame> {
        let ranges = self.fitted_ranges()?;

        let mut out = df.clone();
        for (column, range) in ranges {
            let restored: Vec<Option<f64>> = column_as_f64(df, column)?
                .into_iter()
                .map(|v| v.map(|x| range.unscale(x)))
                .collect();
            out.with_column(Series::new(column.as_str().into(), restored))?;
        }

        Ok(out)
    }

    /// Fit on `df` and transform it in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df, columns)
    }

    /// Persist the fitted ranges as pretty JSON
    pub fn to_json_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize scaler")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write scaler file: {}", path.display()))?;
        Ok(())
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scaler file: {}", path.display()))?;
        let scaler = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse scaler file: {}", path.display()))?;
        Ok(scaler)
    }
}

/// Fit a scaler on `train` and transform all three partitions with it
pub fn scale_partitions(
    train: &DataFrame,
    validate: &DataFrame,
    test: &DataFrame,
    columns: &[String],
) -> Result<ScaledPartitions> {
    let mut scaler = MinMaxScaler::new();
    let train_scaled = scaler.fit_transform(train, columns)?;
    let validate_scaled = scaler.transform(validate, columns)?;
    let test_scaled = scaler.transform(test, columns)?;

    Ok(ScaledPartitions {
        scaler,
        train: train_scaled,
        validate: validate_scaled,
        test: test_scaled,
    })
}
