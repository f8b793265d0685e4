//! IQR-based outlier removal
//!
//! Columns are filtered one after another in schema order. Each column's
//! quartiles are computed on the rows that survived the previous columns, so
//! the result depends on column order. That order is part of the contract.

use polars::prelude::*;
use serde::Serialize;

use super::error::{Result, WrangleError};
use super::schema::classify_columns;

/// Multiplier applied to the IQR when none is specified
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Acceptable value band for one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlierBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl OutlierBounds {
    /// Derive the band `[q1 - m*iqr, q3 + m*iqr]` from the two quartiles
    pub fn from_quartiles(q1: f64, q3: f64, multiplier: f64) -> Self {
        let iqr = q3 - q1;
        Self {
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        }
    }

    /// Inclusive on both ends. NaN is never inside.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Outcome of a full filtering pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutlierReport {
    pub rows_before: usize,
    pub rows_after: usize,
    /// Bounds in the order they were applied
    pub bounds: Vec<(String, OutlierBounds)>,
}

impl OutlierReport {
    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }

    /// Fraction of the input rows still present after filtering
    pub fn retained_fraction(&self) -> f64 {
        if self.rows_before == 0 {
            return 0.0;
        }
        self.rows_after as f64 / self.rows_before as f64
    }
}

/// Quantile of already-sorted values using linear interpolation between the
/// closest ranks (`pos = q * (n - 1)`).
///
/// Returns `None` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;

    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Read a column as optional f64 values, casting integer widths as needed.
///
/// The cast is strict: a value that cannot become an f64 is an error rather
/// than a new null.
pub(crate) fn column_as_f64(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let col = df
        .column(column)
        .map_err(|_| WrangleError::missing_column(column))?;
    let cast = col.strict_cast(&DataType::Float64)?;
    let values = cast.f64()?.into_iter().collect();
    Ok(values)
}

fn bounds_from_values(values: &[Option<f64>], column: &str, multiplier: f64) -> Result<OutlierBounds> {
    let mut sorted: Vec<f64> = values
        .iter()
        .filter_map(|v| *v)
        .filter(|v| !v.is_nan())
        .collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let (q1, q3) = match (quantile_sorted(&sorted, 0.25), quantile_sorted(&sorted, 0.75)) {
        (Some(q1), Some(q3)) => (q1, q3),
        _ => {
            return Err(WrangleError::InsufficientData {
                operation: "Quantile computation",
                rows: sorted.len(),
                required: 1,
            })
        }
    };

    let bounds = OutlierBounds::from_quartiles(q1, q3, multiplier);
    tracing::debug!(
        column,
        q1 = bounds.q1,
        q3 = bounds.q3,
        lower = bounds.lower,
        upper = bounds.upper,
        "computed IQR bounds"
    );
    Ok(bounds)
}

fn validate_multiplier(multiplier: f64) -> Result<()> {
    if !multiplier.is_finite() || multiplier < 0.0 {
        return Err(WrangleError::InvalidParameter {
            name: "multiplier",
            value: multiplier.to_string(),
            reason: "must be a finite number >= 0".to_string(),
        });
    }
    Ok(())
}

/// Compute the outlier band for a single column without touching the dataset.
///
/// Uses the same quantile and bound formulas as [`remove_outliers`], so the
/// result equals what the filter would apply if `column` were filtered first.
pub fn compute_bounds(df: &DataFrame, column: &str, multiplier: f64) -> Result<OutlierBounds> {
    validate_multiplier(multiplier)?;
    if df.height() == 0 {
        return Err(WrangleError::InsufficientData {
            operation: "Quantile computation",
            rows: 0,
            required: 1,
        });
    }
    let values = column_as_f64(df, column)?;
    bounds_from_values(&values, column, multiplier)
}

/// Remove outlier rows across every numeric column, in schema order.
pub fn remove_outliers(df: &DataFrame, multiplier: f64) -> Result<(DataFrame, OutlierReport)> {
    let classification = classify_columns(df);
    remove_outliers_in(df, &classification.numeric, multiplier)
}

/// Remove outlier rows for the given columns, in the given order.
///
/// For each column the quartiles are recomputed on the current (already
/// narrowed) dataset, then every row whose value lies outside
/// `[q1 - m*iqr, q3 + m*iqr]` is dropped. Null and NaN values are never
/// inside the band, so their rows are dropped as well.
///
/// If a column's filter removes every row, the remaining columns are
/// skipped and the empty dataset is returned.
///
/// # Errors
/// * `InsufficientData` - the input has zero rows, or a column has only
///   null values when its turn comes
/// * `Polars` - a listed column holds values that cannot be read as f64
/// * `MissingColumn` - a listed column is absent
/// * `InvalidParameter` - `multiplier` is negative or not finite
pub fn remove_outliers_in(
    df: &DataFrame,
    columns: &[String],
    multiplier: f64,
) -> Result<(DataFrame, OutlierReport)> {
    validate_multiplier(multiplier)?;

    let rows_before = df.height();
    if rows_before == 0 {
        return Err(WrangleError::InsufficientData {
            operation: "Outlier removal",
            rows: 0,
            required: 1,
        });
    }

    let mut current = df.clone();
    let mut report = OutlierReport {
        rows_before,
        ..Default::default()
    };

    for column in columns {
        // Nothing left to bound once an earlier column removed every row
        if current.height() == 0 {
            tracing::warn!(column = column.as_str(), "no rows left, skipping remaining columns");
            break;
        }
        let values = column_as_f64(&current, column)?;
        let bounds = bounds_from_values(&values, column, multiplier)?;

        let mask: BooleanChunked = values
            .iter()
            .map(|v| matches!(v, Some(x) if bounds.contains(*x)))
            .collect();

        let before = current.height();
        current = current.filter(&mask)?;
        tracing::debug!(
            column = column.as_str(),
            removed = before - current.height(),
            "filtered outliers"
        );

        report.bounds.push((column.clone(), bounds));
    }

    report.rows_after = current.height();
    tracing::info!(
        rows_before = report.rows_before,
        rows_after = report.rows_after,
        retained_pct = report.retained_fraction() * 100.0,
        "outlier removal complete"
    );

    Ok((current, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_linear_interpolation() {
        let sorted = [1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 5.0, 100.0];
        assert!((quantile_sorted(&sorted, 0.25).unwrap() - 2.25).abs() < 1e-12);
        assert!((quantile_sorted(&sorted, 0.5).unwrap() - 3.0).abs() < 1e-12);
        assert!((quantile_sorted(&sorted, 0.75).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_single_value_and_empty() {
        assert_eq!(quantile_sorted(&[7.0], 0.25), Some(7.0));
        assert_eq!(quantile_sorted(&[7.0], 0.75), Some(7.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_bounds_from_quartiles() {
        let b = OutlierBounds::from_quartiles(2.0, 4.0, 1.5);
        assert_eq!(b.iqr, 2.0);
        assert_eq!(b.upper, 7.0);
        assert_eq!(b.lower, -1.0);
        assert!(b.contains(7.0));
        assert!(b.contains(-1.0));
        assert!(!b.contains(7.0001));
        assert!(!b.contains(f64::NAN));
    }

    #[test]
    fn test_zero_variance_column_keeps_only_quartile_value() {
        let df = df! {
            "x" => [5.0f64, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 6.0],
        }
        .unwrap();

        let (filtered, report) = remove_outliers(&df, 1.5).unwrap();
        let (_, bounds) = &report.bounds[0];

        assert_eq!(bounds.iqr, 0.0);
        assert_eq!((bounds.lower, bounds.upper), (5.0, 5.0));
        assert_eq!(filtered.height(), 7);
    }

    #[test]
    fn test_null_rows_are_removed() {
        let df = df! {
            "x" => [Some(1.0f64), Some(2.0), None, Some(3.0), Some(4.0)],
        }
        .unwrap();

        let (filtered, _) = remove_outliers(&df, 1.5).unwrap();
        assert_eq!(filtered.height(), 4);
        assert_eq!(filtered.column("x").unwrap().null_count(), 0);
    }

    #[test]
    fn test_empty_dataframe_errors() {
        let df = df! { "x" => Vec::<f64>::new() }.unwrap();
        let err = remove_outliers(&df, 1.5).unwrap_err();
        assert!(matches!(err, WrangleError::InsufficientData { rows: 0, .. }));
    }

    #[test]
    fn test_negative_multiplier_rejected() {
        let df = df! { "x" => [1.0f64, 2.0] }.unwrap();
        let err = remove_outliers(&df, -1.0).unwrap_err();
        assert!(matches!(err, WrangleError::InvalidParameter { name: "multiplier", .. }));
    }

    #[test]
    fn test_missing_named_column_errors() {
        let df = df! { "x" => [1.0f64, 2.0, 3.0] }.unwrap();
        let err = remove_outliers_in(&df, &["y".to_string()], 1.5).unwrap_err();
        assert!(matches!(err, WrangleError::MissingColumn { ref column } if column == "y"));
    }

    #[test]
    fn test_report_retained_fraction() {
        let report = OutlierReport {
            rows_before: 10,
            rows_after: 9,
            bounds: Vec::new(),
        };
        assert_eq!(report.rows_removed(), 1);
        assert!((report.retained_fraction() - 0.9).abs() < 1e-12);
    }
}
