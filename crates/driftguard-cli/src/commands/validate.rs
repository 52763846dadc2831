//! Validate command - run the validation stage on a train/test split.

use std::path::PathBuf;

use chrono::Local;
use colored::Colorize;
use driftguard::config::timestamped_artifact_dir;
use driftguard::{
    DataIngestionArtifact, DataValidation, DataValidationArtifact, StaticDriftService,
    StatisticalDriftService, ValidationConfig,
};

use crate::cli::ThresholdArgs;

/// Options for a validation run.
pub struct ValidateArgs {
    pub train: PathBuf,
    pub test: PathBuf,
    pub schema: PathBuf,
    pub artifact_dir: PathBuf,
    pub timestamped: bool,
    pub json: bool,
    pub dry_run_drift: bool,
    pub strict: bool,
    pub thresholds: ThresholdArgs,
}

/// Returns whether the dataset passed validation.
pub fn run(args: ValidateArgs, verbose: bool) -> Result<bool, Box<dyn std::error::Error>> {
    let artifact_dir = if args.timestamped {
        timestamped_artifact_dir(&args.artifact_dir, Local::now())
    } else {
        args.artifact_dir.clone()
    };
    let config = ValidationConfig::new(&artifact_dir);

    let ingestion = DataIngestionArtifact::new(&args.train, &args.test);
    let stage = DataValidation::from_schema_file(ingestion, config, &args.schema)?;

    let stage = if args.dry_run_drift {
        stage.with_drift_service(StaticDriftService::no_drift())
    } else {
        let service = StatisticalDriftService::from_schema(stage.schema())
            .with_thresholds(args.thresholds.clone().into());
        stage.with_drift_service(service)
    };

    if !args.json {
        println!(
            "{} {} {} {}",
            "Validating".cyan().bold(),
            args.train.display().to_string().white(),
            "against".cyan(),
            args.test.display().to_string().white()
        );
    }

    let artifact = stage.initiate_validation()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&artifact)?);
    } else {
        print_summary(&artifact, verbose);
    }

    Ok(artifact.validation_status || !args.strict)
}

fn print_summary(artifact: &DataValidationArtifact, verbose: bool) {
    println!();
    if artifact.validation_status {
        println!("{}", "Structural validation passed".green().bold());
    } else {
        println!("{}", "Structural validation failed".red().bold());
    }

    let message = artifact.message.trim_end();
    if artifact.validation_status {
        println!("  {}", message.yellow());
    } else {
        for reason in message.split_inclusive(". ") {
            println!("  - {}", reason.trim_end().red());
        }
    }

    match (
        &artifact.drift_report_path,
        &artifact.drift_report_rendered_path,
    ) {
        (Some(structured), Some(rendered)) => {
            println!();
            println!(
                "{} {}",
                "Drift report:".green().bold(),
                rendered.display().to_string().white()
            );
            println!(
                "{} {}",
                "Structured report:".green().bold(),
                structured.display().to_string().white()
            );
        }
        _ if verbose => println!("{}", "Drift detection skipped; no reports written".dimmed()),
        _ => {}
    }
}
