//! Preparation summary report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::OutlierBounds;

/// Row and column counts collected while the pipeline runs
#[derive(Debug, Default)]
pub struct WrangleSummary {
    pub rows_loaded: usize,
    pub rows_after_nulls: Option<usize>,
    pub rows_after_outliers: usize,
    pub train_rows: usize,
    pub validate_rows: usize,
    pub test_rows: usize,
    pub feature_count: usize,
    pub scaled_columns: Vec<String>,
    pub degenerate_columns: Vec<String>,
    pub bounds: Vec<(String, OutlierBounds)>,
}

impl WrangleSummary {
    pub fn new(rows_loaded: usize) -> Self {
        Self {
            rows_loaded,
            rows_after_outliers: rows_loaded,
            ..Default::default()
        }
    }

    pub fn set_partition_sizes(&mut self, (train, validate, test): (usize, usize, usize)) {
        self.train_rows = train;
        self.validate_rows = validate;
        self.test_rows = test;
    }

    fn retained_pct(&self) -> f64 {
        if self.rows_loaded == 0 {
            return 0.0;
        }
        self.rows_after_outliers as f64 / self.rows_loaded as f64 * 100.0
    }

    /// Build the row-count table
    pub fn counts_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows Loaded"), Cell::new(self.rows_loaded)]);

        if let Some(rows) = self.rows_after_nulls {
            table.add_row(vec![Cell::new("🧹 After Null Removal"), Cell::new(rows)]);
        }

        table.add_row(vec![
            Cell::new("✂️  After Outlier Removal"),
            Cell::new(self.rows_after_outliers).fg(Color::Green),
        ]);

        let pct = self.retained_pct();
        let color = if pct < 70.0 {
            Color::Red
        } else if pct < 90.0 {
            Color::Yellow
        } else {
            Color::Green
        };
        table.add_row(vec![
            Cell::new("📉 Retained"),
            Cell::new(format!("{:.1}%", pct))
                .fg(color)
                .add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("🏋️  Train"), Cell::new(self.train_rows)]);
        table.add_row(vec![Cell::new("🔍 Validate"), Cell::new(self.validate_rows)]);
        table.add_row(vec![Cell::new("🧪 Test"), Cell::new(self.test_rows)]);
        table.add_row(vec![Cell::new("🧩 Features"), Cell::new(self.feature_count)]);
        table.add_row(vec![
            Cell::new("📏 Scaled Columns"),
            Cell::new(self.scaled_columns.len()),
        ]);

        table
    }

    /// Build the per-column outlier bound table, in filter order
    pub fn bounds_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Column").add_attribute(Attribute::Bold),
            Cell::new("Q1").add_attribute(Attribute::Bold),
            Cell::new("Q3").add_attribute(Attribute::Bold),
            Cell::new("Lower").add_attribute(Attribute::Bold),
            Cell::new("Upper").add_attribute(Attribute::Bold),
        ]);

        for (column, b) in &self.bounds {
            table.add_row(vec![
                Cell::new(column),
                Cell::new(format!("{:.2}", b.q1)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}", b.q3)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}", b.lower)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}", b.upper)).set_alignment(CellAlignment::Right),
            ]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PREPARATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.counts_table().to_string().lines() {
            println!("    {}", line);
        }

        if !self.bounds.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📐").cyan(),
                style("OUTLIER BOUNDS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for line in self.bounds_table().to_string().lines() {
                println!("    {}", line);
            }
        }

        if !self.degenerate_columns.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Zero-range columns scaled to 0.0").yellow(),
                style(format!("({})", self.degenerate_columns.len())).dim()
            );
            for column in &self.degenerate_columns {
                println!("        {} {}", style("•").dim(), column);
            }
        }
    }
}
