//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Confirm, Select};

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm removing outlier rows
pub fn confirm_remove_rows(row_count: usize, total: usize) -> Result<bool> {
    let message = format!(
        "Remove {} of {} row(s) flagged as outliers?",
        row_count, total
    );
    confirm_step(&message)
}

/// Let the user pick the target column from the dataset's columns
pub fn select_target(columns: &[String]) -> Result<String> {
    if columns.is_empty() {
        anyhow::bail!("Dataset has no columns to choose a target from");
    }
    let index = Select::new()
        .with_prompt("Select the target column")
        .items(columns)
        .default(0)
        .interact()?;
    Ok(columns[index].clone())
}
