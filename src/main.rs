//! zwrangle: Housing-Price Dataset Preparation CLI
//!
//! Loads a Zillow property extract, cleans it, removes IQR outliers, splits
//! it into train/validate/test, separates the target and min-max scales the
//! numeric features.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use polars::prelude::DataFrame;

use zwrangle::cli::{bounds::run_bounds, confirm_remove_rows, select_target, Cli, Commands};
use zwrangle::pipeline::{
    classify_columns, display_label, drop_columns, load_dataset_with_progress, prepare_dataset,
    remove_outliers, save_dataset, scale_partitions, separate_partitions, split_dataset,
    PrepareConfig,
};
use zwrangle::report::WrangleSummary;
use zwrangle::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_retained, print_step_header, print_step_time, print_success,
    print_warning,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zwrangle=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Bounds {
                input,
                column,
                multiplier,
                infer_schema_length,
            } => run_bounds(input, column, *multiplier, *infer_schema_length),
        };
    }

    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let output_dir = cli
        .output_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not derive an output directory from the input path"))?;
    let drop: Vec<String> = cli
        .drop_columns
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    print_banner(env!("CARGO_PKG_VERSION"));

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let (df, rows, cols, memory_mb) = load_dataset_with_progress(input, cli.infer_schema_length)?;
    print_success("Dataset loaded");
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    print_step_time(step_start.elapsed());

    let mut summary = WrangleSummary::new(rows);

    // Step 2: Clean
    print_step_header(2, "Prepare");
    let step_start = Instant::now();
    let df = if cli.skip_prepare {
        let df = drop_columns(&df, &drop)?;
        print_info("Skipped renames and null removal (--skip-prepare)");
        df
    } else {
        let prepared = prepare_dataset(&df, &PrepareConfig::zillow().with_drop_columns(drop))?;
        print_success("Renamed columns for ease of use");
        print_retained("Nulls removed", prepared.null_retained_fraction());
        print_success("Changed FIPS code to county name, bed to integer");
        summary.rows_after_nulls = Some(prepared.rows_after_nulls);
        prepared.frame
    };
    print_step_time(step_start.elapsed());

    let target = resolve_target(&cli, &df)?;
    println!();
    print_config(input, &target, &output_dir, cli.multiplier, cli.seed);

    // Step 3: Outliers
    print_step_header(3, "Outlier Removal");
    let step_start = Instant::now();
    let classification = classify_columns(&df);
    for column in &classification.categorical {
        print_info(&format!("{} is a categorical column.", display_label(column)));
    }
    println!(
        "      Outliers calculated with IQR ranges, multiplier {}",
        cli.multiplier
    );

    let (filtered, report) = remove_outliers(&df, cli.multiplier)?;
    for (column, bounds) in &report.bounds {
        println!(
            "      {} <= {:.2} and >= {:.2}",
            display_label(column),
            bounds.upper,
            bounds.lower
        );
    }
    print_count(
        "outlier row(s)",
        report.rows_removed(),
        Some(&format!("(of {})", report.rows_before)),
    );

    let apply = report.rows_removed() == 0
        || cli.no_confirm
        || confirm_remove_rows(report.rows_removed(), report.rows_before)?;
    let df = if apply {
        print_retained(
            "Outliers removed",
            report.rows_after as f64 / summary.rows_loaded.max(1) as f64,
        );
        summary.bounds = report.bounds;
        filtered
    } else {
        print_warning("Outlier removal skipped, keeping all rows");
        df
    };
    summary.rows_after_outliers = df.height();
    print_step_time(step_start.elapsed());

    // Step 4: Split
    print_step_header(4, "Train / Validate / Test Split");
    let step_start = Instant::now();
    let partition = split_dataset(&df, Some(cli.seed))?;
    summary.set_partition_sizes(partition.sizes());
    println!("      Prepared DF: {:?}", df.shape());
    println!("      Train: {:?}", partition.train.shape());
    println!("      Validate: {:?}", partition.validate.shape());
    println!("      Test: {:?}", partition.test.shape());

    let separated = separate_partitions(&partition, &target)?;
    summary.feature_count = separated.train.features.width();
    print_success("Separated features from target");
    print_step_time(step_start.elapsed());

    // Step 5: Scale
    print_step_header(5, "Min-Max Scaling");
    let step_start = Instant::now();
    let (mut x_train, mut x_validate, mut x_test, scaler) = if cli.no_scale {
        print_info("Scaling disabled (--no-scale)");
        (
            separated.train.features,
            separated.validate.features,
            separated.test.features,
            None,
        )
    } else {
        let to_scale = classify_columns(&separated.train.features).numeric;
        let scaled = scale_partitions(
            &separated.train.features,
            &separated.validate.features,
            &separated.test.features,
            &to_scale,
        )?;
        summary.scaled_columns = to_scale;
        summary.degenerate_columns = scaled
            .scaler
            .degenerate_columns()
            .into_iter()
            .map(String::from)
            .collect();
        print_count("numeric feature column(s) scaled", summary.scaled_columns.len(), None);
        (scaled.train, scaled.validate, scaled.test, Some(scaled.scaler))
    };
    print_step_time(step_start.elapsed());

    // Step 6: Save
    print_step_header(6, "Save Results");
    let step_start = Instant::now();
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let spinner = create_spinner("Writing partition files...");
    let ext = cli.output_extension();
    let (mut y_train, mut y_validate, mut y_test) = (
        separated.train.target,
        separated.validate.target,
        separated.test.target,
    );
    let outputs: [(&str, &mut DataFrame); 6] = [
        ("X_train", &mut x_train),
        ("y_train", &mut y_train),
        ("X_validate", &mut x_validate),
        ("y_validate", &mut y_validate),
        ("X_test", &mut x_test),
        ("y_test", &mut y_test),
    ];
    for (name, frame) in outputs {
        save_dataset(frame, &output_dir.join(format!("{}.{}", name, ext)))?;
    }
    if let Some(scaler) = &scaler {
        scaler.to_json_file(&output_dir.join("scaler.json"))?;
    }
    finish_with_success(&spinner, &format!("Saved to {}", output_dir.display()));
    print_step_time(step_start.elapsed());

    summary.display();
    print_completion();

    Ok(())
}

/// Pick the target column from the CLI flag or an interactive prompt, and
/// make sure it exists in the prepared dataset.
fn resolve_target(cli: &Cli, df: &DataFrame) -> Result<String> {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let target = match &cli.target {
        Some(target) => target.clone(),
        None if cli.no_confirm => anyhow::bail!(
            "Target column is required when using --no-confirm. Use -t/--target to specify."
        ),
        None => select_target(&columns)?,
    };

    if !columns.contains(&target) {
        anyhow::bail!(
            "Target column '{}' not found in dataset. Available columns: {:?}",
            target,
            columns
        );
    }

    Ok(target)
}
