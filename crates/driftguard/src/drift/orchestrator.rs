//! Runs a drift service and persists its reports.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use super::service::{DriftService, DriftSummary};
use crate::config::ValidationConfig;
use crate::error::{DriftguardError, Result};
use crate::input::DataTable;

/// Compare `current` against `reference` and write both reports.
///
/// The rendered report goes to `drift_report_html_path` and the structured
/// result, as YAML, to `drift_report_file_path`; existing files are
/// overwritten. A structured result without the expected shape is an error
/// rather than a "no drift" verdict.
pub fn detect_drift(
    service: &dyn DriftService,
    reference: &DataTable,
    current: &DataTable,
    config: &ValidationConfig,
) -> Result<DriftSummary> {
    tracing::info!(service = service.name(), "Running data drift check");

    ensure_dir(&config.drift_report_dir)?;
    for path in [&config.drift_report_html_path, &config.drift_report_file_path] {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
    }

    let run = service.run(reference, current)?;

    write_rendered(&config.drift_report_html_path, &run.rendered)?;
    write_structured(&config.drift_report_file_path, &run.structured)?;

    let summary = DriftSummary::from_structured(&run.structured)?;

    tracing::info!("Drift detected: {}", summary.dataset_drift_detected);
    tracing::info!("Drift share: {}", summary.drift_share);

    Ok(summary)
}

/// Create a directory and its parents; an existing directory is fine.
fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| DriftguardError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_rendered(path: &Path, rendered: &str) -> Result<()> {
    fs::write(path, rendered).map_err(|source| DriftguardError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_structured(path: &Path, structured: &Value) -> Result<()> {
    let io_err = |source| DriftguardError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_yaml::to_writer(&mut writer, structured).map_err(|source| {
        DriftguardError::ReportWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(io_err)
}
