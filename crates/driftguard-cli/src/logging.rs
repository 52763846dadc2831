//! Tracing subscriber setup.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use driftguard::config::TIMESTAMP_FORMAT;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level is `info`, or `debug`
/// with `verbose`. With a log directory, events are also written to
/// `<dir>/<timestamp>.log`. Returns the log file path when one is used.
pub fn init(verbose: bool, log_dir: Option<&Path>) -> std::io::Result<Option<PathBuf>> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let path = dir.join(log_file_name(Local::now()));
            let file = File::create(&path)?;

            builder
                .with_ansi(false)
                .with_writer(std::io::stderr.and(Mutex::new(file)))
                .init();
            Ok(Some(path))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

fn log_file_name(at: chrono::DateTime<Local>) -> String {
    format!("{}.log", at.format(TIMESTAMP_FORMAT))
}
