//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// zwrangle - Clean, de-outlier, split and scale a housing-price dataset
#[derive(Parser, Debug)]
#[command(name = "zwrangle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Target column name (kept out of the feature set).
    /// If not provided, will be selected interactively from available columns.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Output directory for the partition files and fitted scaler.
    /// Defaults to the input directory with a '_prepared' suffix
    /// (e.g., zillow.csv → zillow_prepared/).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// IQR multiplier for outlier bounds: [q1 - m*iqr, q3 + m*iqr]
    #[arg(short, long, default_value = "1.5", value_parser = validate_multiplier)]
    pub multiplier: f64,

    /// Seed for the train/validate/test split
    #[arg(long, default_value = "123")]
    pub seed: u64,

    /// Columns to drop before processing (comma-separated).
    #[arg(long, value_delimiter = ',', default_value = "parcelid")]
    pub drop_columns: Vec<String>,

    /// Skip the Zillow column renames, null removal and county mapping.
    /// Only --drop-columns is applied.
    #[arg(long, default_value = "false")]
    pub skip_prepare: bool,

    /// Write unscaled feature partitions
    #[arg(long, default_value = "false")]
    pub no_scale: bool,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the IQR outlier bounds of one column without filtering anything
    Bounds {
        /// Input file path (CSV or Parquet)
        input: PathBuf,

        /// Column to inspect
        column: String,

        /// IQR multiplier
        #[arg(short, long, default_value = "1.5", value_parser = validate_multiplier)]
        multiplier: f64,

        /// Number of rows to use for schema inference (CSV only)
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },
}

impl Cli {
    /// Get the input path, if one was given.
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Get the output directory, deriving from input if not explicitly provided.
    pub fn output_dir(&self) -> Option<PathBuf> {
        let input = self.input.as_ref()?;
        Some(self.output_dir.clone().unwrap_or_else(|| {
            let parent = input.parent().unwrap_or_else(|| std::path::Path::new("."));
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            parent.join(format!("{}_prepared", stem))
        }))
    }

    /// Extension used for partition files: same as input, Parquet otherwise.
    pub fn output_extension(&self) -> &str {
        self.input
            .as_ref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .filter(|e| e.eq_ignore_ascii_case("csv"))
            .map(|_| "csv")
            .unwrap_or("parquet")
    }
}

/// Validator for the IQR multiplier
fn validate_multiplier(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !value.is_finite() || value < 0.0 {
        Err(format!(
            "multiplier must be a finite number >= 0.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
