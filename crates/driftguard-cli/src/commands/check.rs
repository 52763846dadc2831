//! Check command - structural checks for a single dataset.

use std::path::PathBuf;

use colored::Colorize;
use driftguard::validation::{missing_columns, validate_column_count};
use driftguard::{DatasetSchema, read_dataset};

/// Returns whether the dataset conforms to the schema.
pub fn run(
    file: PathBuf,
    schema: PathBuf,
    verbose: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let schema = DatasetSchema::load(&schema)?;
    let dataset = read_dataset(&file)?;
    let (table, fingerprint) = (&dataset.table, &dataset.fingerprint);

    println!(
        "{} {} ({} rows, {} columns, {}-delimited)",
        "Checking".cyan().bold(),
        fingerprint.file.white(),
        fingerprint.rows,
        fingerprint.columns,
        fingerprint.delimiter
    );
    if verbose {
        println!("  sha256 {}", fingerprint.sha256.dimmed());
    }

    let count_ok = validate_column_count(table, &schema);
    if count_ok {
        println!("  {} column count {}", "ok".green(), table.column_count());
    } else {
        println!(
            "  {} column count {} (expected {})",
            "fail".red().bold(),
            table.column_count(),
            schema.expected_column_count()
        );
    }

    let missing = missing_columns(table, &schema);
    if missing.is_empty() {
        println!("  {} all required columns present", "ok".green());
    } else {
        println!(
            "  {} missing columns: {}",
            "fail".red().bold(),
            missing.join(", ").white()
        );
    }

    Ok(count_ok && missing.is_empty())
}
