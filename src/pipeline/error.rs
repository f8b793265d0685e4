//! Error types for the preparation pipeline.
//!
//! Every variant is a precondition violation by the caller. Nothing in the
//! pipeline retries; errors propagate straight back to whoever invoked the step.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Result alias for pipeline operations
pub type Result<T> = std::result::Result<T, WrangleError>;

/// Errors raised by the cleaning, filtering, splitting and scaling steps.
#[derive(Error, Debug)]
pub enum WrangleError {
    /// A named column (target, scaling column, drop column) is absent.
    #[error("Column '{column}' not found in dataset")]
    MissingColumn { column: String },

    /// Too few rows for a quantile or a three-way split.
    #[error("{operation} requires at least {required} row(s), found {rows}")]
    InsufficientData {
        operation: &'static str,
        rows: usize,
        required: usize,
    },

    /// `transform` / `inverse_transform` called before `fit`.
    #[error("Scaler has not been fitted - call fit() first")]
    UnfitState,

    /// `fit` called on a scaler that already holds fitted bounds.
    #[error("Scaler is already fitted - create a new scaler to fit different data")]
    AlreadyFitted,

    /// Column requested for scaling was not part of the fitted set.
    #[error("Column '{column}' was not part of the data the scaler was fitted on")]
    ColumnNotFitted { column: String },

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl WrangleError {
    pub(crate) fn missing_column(column: impl Into<String>) -> Self {
        WrangleError::MissingColumn {
            column: column.into(),
        }
    }
}
