//! Read-only outlier bound inspection for a single column

use std::path::Path;

use anyhow::Result;
use console::style;

use crate::pipeline::outliers::column_as_f64;
use crate::pipeline::{
    classify_columns, compute_bounds, display_label, load_dataset_with_progress, ColumnKind,
};

/// Print the IQR band of `column` in `input` without filtering any rows
pub fn run_bounds(input: &Path, column: &str, multiplier: f64, infer_schema_length: usize) -> Result<()> {
    println!(
        "\n {} Outlier bounds for {}",
        style("◆").cyan().bold(),
        style(column).bold()
    );
    println!("   Input: {}", style(input.display()).dim());
    println!();

    let (df, rows, _, _) = load_dataset_with_progress(input, infer_schema_length)?;

    match classify_columns(&df).kind_of(column) {
        None => anyhow::bail!("Column '{}' not found in dataset", column),
        Some(ColumnKind::Categorical) => anyhow::bail!(
            "{} is a categorical column, bounds only apply to numeric columns",
            display_label(column)
        ),
        Some(ColumnKind::Numeric) => {}
    }

    let bounds = compute_bounds(&df, column, multiplier)?;
    let outside = column_as_f64(&df, column)?
        .into_iter()
        .filter(|v| !matches!(v, Some(x) if bounds.contains(*x)))
        .count();

    println!();
    println!(
        "   {} <= {} and >= {}",
        display_label(column),
        style(format!("{:.2}", bounds.upper)).yellow(),
        style(format!("{:.2}", bounds.lower)).yellow()
    );
    println!(
        "   q1 = {:.2}, q3 = {:.2}, iqr = {:.2}, multiplier = {}",
        bounds.q1, bounds.q3, bounds.iqr, multiplier
    );
    println!(
        "   {} of {} row(s) fall outside the band",
        style(outside).yellow().bold(),
        rows
    );
    println!();

    Ok(())
}
