//! Dataset cleaning before outlier removal
//!
//! Renames the raw Zillow property columns to short names, drops identifier
//! columns, removes rows with missing values, turns FIPS codes into county
//! names and casts count columns to integers.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::{Result, WrangleError};

/// FIPS county codes present in the Zillow extract
pub const FIPS_COUNTIES: [(i64, &str); 3] = [(6037, "LA"), (6059, "Orange"), (6111, "Ventura")];

/// Cleaning steps to apply, in the order listed on the fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrepareConfig {
    /// (old name, new name) pairs; absent old names are skipped
    pub renames: Vec<(String, String)>,
    /// Columns removed after renaming
    pub drop_columns: Vec<String>,
    /// Column holding FIPS codes to replace with county names
    pub county_column: Option<String>,
    /// Columns cast to Int64 at the end
    pub integer_columns: Vec<String>,
}

impl PrepareConfig {
    /// Cleaning for the single-family-property Zillow query
    pub fn zillow() -> Self {
        let renames = [
            ("bedroomcnt", "bed"),
            ("bathroomcnt", "bath"),
            ("calculatedfinishedsquarefeet", "sqft"),
            ("taxvaluedollarcnt", "assessed_worth"),
            ("fips", "county"),
            ("transactiondate", "date"),
        ]
        .iter()
        .map(|(old, new)| (old.to_string(), new.to_string()))
        .collect();

        Self {
            renames,
            drop_columns: vec!["parcelid".to_string()],
            county_column: Some("county".to_string()),
            integer_columns: vec!["bed".to_string()],
        }
    }

    /// Replace the columns to drop, keeping the other steps
    pub fn with_drop_columns(mut self, columns: Vec<String>) -> Self {
        self.drop_columns = columns;
        self
    }
}

/// Cleaned dataset plus row counts for reporting
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    pub frame: DataFrame,
    pub rows_before: usize,
    pub rows_after_nulls: usize,
}

impl PreparedDataset {
    pub fn null_retained_fraction(&self) -> f64 {
        if self.rows_before == 0 {
            return 0.0;
        }
        self.rows_after_nulls as f64 / self.rows_before as f64
    }
}

/// Rename columns that exist; missing sources are ignored
pub fn rename_columns(df: &mut DataFrame, renames: &[(String, String)]) -> Result<()> {
    for (old, new) in renames {
        if df.column(old).is_ok() {
            df.rename(old, new.as_str().into())?;
        }
    }
    Ok(())
}

/// Drop the named columns, failing if any is absent
pub fn drop_columns(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    for column in columns {
        if df.column(column).is_err() {
            return Err(WrangleError::missing_column(column.as_str()));
        }
    }
    Ok(df.drop_many(columns.iter().map(String::as_str)))
}

/// Remove every row that has a null in any column
pub fn drop_null_rows(df: &DataFrame) -> Result<DataFrame> {
    let mut mask = BooleanChunked::full("mask".into(), true, df.height());
    for col in df.get_columns() {
        if col.null_count() > 0 {
            let present = col.as_materialized_series().is_not_null();
            mask = &mask & &present;
        }
    }
    Ok(df.filter(&mask)?)
}

/// County name for a FIPS code, `None` for codes outside the extract
pub fn county_name(fips: i64) -> Option<&'static str> {
    FIPS_COUNTIES
        .iter()
        .find(|(code, _)| *code == fips)
        .map(|(_, name)| *name)
}

/// Replace FIPS codes in `column` with county names (a String column).
/// Unknown codes become null.
pub fn map_county_codes(df: &mut DataFrame, column: &str) -> Result<()> {
    let codes = df
        .column(column)
        .map_err(|_| WrangleError::missing_column(column))?
        .strict_cast(&DataType::Int64)?;

    let names: Vec<Option<&str>> = codes
        .i64()?
        .into_iter()
        .map(|code| code.and_then(county_name))
        .collect();

    let unknown = names.iter().filter(|n| n.is_none()).count() - codes.null_count();
    if unknown > 0 {
        tracing::warn!(column, unknown, "unrecognised FIPS codes mapped to null");
    }

    df.with_column(Series::new(column.into(), names))?;
    Ok(())
}

/// Cast the listed columns to Int64
pub fn cast_to_integer(df: &mut DataFrame, columns: &[String]) -> Result<()> {
    for column in columns {
        let cast = df
            .column(column)
            .map_err(|_| WrangleError::missing_column(column.as_str()))?
            .strict_cast(&DataType::Int64)?;
        df.with_column(cast)?;
    }
    Ok(())
}

/// Apply every step of `config` to `df`: rename, drop, drop nulls, county
/// mapping, integer casts.
pub fn prepare_dataset(df: &DataFrame, config: &PrepareConfig) -> Result<PreparedDataset> {
    let rows_before = df.height();

    let mut frame = df.clone();
    rename_columns(&mut frame, &config.renames)?;
    let frame = drop_columns(&frame, &config.drop_columns)?;
    let mut frame = drop_null_rows(&frame)?;
    let rows_after_nulls = frame.height();

    if let Some(county) = &config.county_column {
        map_county_codes(&mut frame, county)?;
    }
    cast_to_integer(&mut frame, &config.integer_columns)?;

    let prepared = PreparedDataset {
        frame,
        rows_before,
        rows_after_nulls,
    };
    tracing::info!(
        rows_before,
        rows_after_nulls,
        retained_pct = prepared.null_retained_fraction() * 100.0,
        "removed rows with nulls"
    );

    Ok(prepared)
}
