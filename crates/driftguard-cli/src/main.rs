//! driftguard CLI - dataset validation stage of a training pipeline.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use commands::validate::ValidateArgs;

/// Exit status when a run completed but the data failed validation.
const EXIT_INVALID: i32 = 2;

fn main() {
    let cli = Cli::parse();

    let log_file = match logging::init(cli.verbose, cli.log_dir.as_deref()) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: failed to set up logging: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(path) = &log_file {
        tracing::debug!(path = %path.display(), "Logging to file");
    }

    let result = match cli.command {
        Commands::Validate {
            train,
            test,
            schema,
            artifact_dir,
            timestamped,
            json,
            dry_run_drift,
            strict,
            thresholds,
        } => commands::validate::run(
            ValidateArgs {
                train,
                test,
                schema,
                artifact_dir,
                timestamped,
                json,
                dry_run_drift,
                strict,
                thresholds,
            },
            cli.verbose,
        ),

        Commands::Check { file, schema } => commands::check::run(file, schema, cli.verbose),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_INVALID),
        Err(e) => {
            if log_file.is_some() {
                tracing::error!("{}", e);
            } else {
                eprintln!("Error: {}", e);
            }
            std::process::exit(1);
        }
    }
}
