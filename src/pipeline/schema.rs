//! Column classification by declared data type

use polars::prelude::*;
use serde::Serialize;

/// Kind of a column as seen by the outlier filter and the scaler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    /// Classify a declared dtype. Integer and float widths are numeric,
    /// everything else (strings, dates, booleans, codes) is categorical.
    pub fn of(dtype: &DataType) -> Self {
        if dtype.is_primitive_numeric() {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }
}

/// Disjoint split of a dataset's column names, each in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnClassification {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnClassification {
    /// Kind of a single column, `None` when the name was not classified
    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        if self.numeric.iter().any(|c| c == column) {
            Some(ColumnKind::Numeric)
        } else if self.categorical.iter().any(|c| c == column) {
            Some(ColumnKind::Categorical)
        } else {
            None
        }
    }
}

/// Partition the columns of `df` into numeric and categorical names.
///
/// Every column lands in exactly one list and the schema order is preserved,
/// which is the iteration order the outlier filter relies on.
pub fn classify_columns(df: &DataFrame) -> ColumnClassification {
    let mut classification = ColumnClassification::default();

    for col in df.get_columns() {
        let name = col.name().to_string();
        match ColumnKind::of(col.dtype()) {
            ColumnKind::Numeric => classification.numeric.push(name),
            ColumnKind::Categorical => classification.categorical.push(name),
        }
    }

    tracing::debug!(
        numeric = classification.numeric.len(),
        categorical = classification.categorical.len(),
        "classified columns"
    );

    classification
}

/// Human-readable label for a column name, e.g. `assessed_worth` -> `Assessed worth`
pub fn display_label(column: &str) -> String {
    let spaced = column.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}
