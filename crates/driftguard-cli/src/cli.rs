//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// driftguard: validate training datasets before model fitting
#[derive(Parser)]
#[command(name = "driftguard")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to a timestamped file in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a train/test split against a schema and check for drift
    Validate {
        /// Training dataset (reference)
        #[arg(long, value_name = "FILE")]
        train: PathBuf,

        /// Test dataset (current)
        #[arg(long, value_name = "FILE")]
        test: PathBuf,

        /// Schema YAML with columns, numerical_columns and categorical_columns
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,

        /// Root directory for reports
        #[arg(short, long, default_value = "artifact")]
        artifact_dir: PathBuf,

        /// Write reports into a per-run timestamped subdirectory
        #[arg(long)]
        timestamped: bool,

        /// Print the artifact as JSON
        #[arg(long)]
        json: bool,

        /// Skip statistical tests and always report no drift
        #[arg(long)]
        dry_run_drift: bool,

        /// Exit with status 2 when validation fails
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Run the structural checks on a single dataset
    Check {
        /// Dataset to check
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Schema YAML
        #[arg(short, long, value_name = "FILE")]
        schema: PathBuf,
    },
}

/// Drift decision thresholds.
#[derive(clap::Args, Clone, Debug)]
pub struct ThresholdArgs {
    /// KS p-value below which a numerical column drifted
    #[arg(long, default_value = "0.05")]
    pub numerical_threshold: f64,

    /// PSI at or above which a categorical column drifted
    #[arg(long, default_value = "0.1")]
    pub categorical_threshold: f64,

    /// Share of drifted columns at which the dataset drifted
    #[arg(long, default_value = "0.5")]
    pub drift_share_threshold: f64,
}

impl From<ThresholdArgs> for driftguard::DriftThresholds {
    fn from(args: ThresholdArgs) -> Self {
        Self {
            numerical_threshold: args.numerical_threshold,
            categorical_threshold: args.categorical_threshold,
            drift_share_threshold: args.drift_share_threshold,
        }
    }
}
