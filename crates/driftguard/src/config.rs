//! Output layout and external settings for a validation run.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{DriftguardError, Result};

/// Root directory for pipeline artifacts.
pub const ARTIFACT_DIR: &str = "artifact";
/// Directory for this stage inside an artifact directory.
pub const DATA_VALIDATION_DIR_NAME: &str = "data_validation";
/// Directory for drift reports inside the stage directory.
pub const DRIFT_REPORT_DIR_NAME: &str = "drift_report";
/// Structured drift report file name.
pub const DRIFT_REPORT_FILE_NAME: &str = "report.yaml";
/// Rendered drift report file name.
pub const DRIFT_REPORT_HTML_FILE_NAME: &str = "report.html";
/// Timestamp format for run directories and log files.
pub const TIMESTAMP_FORMAT: &str = "%m_%d_%Y_%H_%M_%S";

/// Environment variable holding the database connection URL.
pub const DATABASE_URL_KEY: &str = "MONGODB_URL";
/// Database used when none is specified.
pub const DEFAULT_DATABASE_NAME: &str = "US_VISA";

/// Where a validation run writes its reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Directory holding both drift reports.
    pub drift_report_dir: PathBuf,
    /// Structured (YAML) drift report.
    pub drift_report_file_path: PathBuf,
    /// Rendered (HTML) drift report.
    pub drift_report_html_path: PathBuf,
}

impl ValidationConfig {
    /// Lay out report paths under an artifact directory:
    /// `<artifact_dir>/data_validation/drift_report/report.{yaml,html}`.
    pub fn new(artifact_dir: impl AsRef<Path>) -> Self {
        let drift_report_dir = artifact_dir
            .as_ref()
            .join(DATA_VALIDATION_DIR_NAME)
            .join(DRIFT_REPORT_DIR_NAME);

        Self {
            drift_report_file_path: drift_report_dir.join(DRIFT_REPORT_FILE_NAME),
            drift_report_html_path: drift_report_dir.join(DRIFT_REPORT_HTML_FILE_NAME),
            drift_report_dir,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::new(ARTIFACT_DIR)
    }
}

/// Per-run artifact directory, e.g. `artifact/10_17_2026_09_30_00`.
pub fn timestamped_artifact_dir(root: impl AsRef<Path>, at: DateTime<Local>) -> PathBuf {
    root.as_ref().join(at.format(TIMESTAMP_FORMAT).to_string())
}

/// Connection settings for the document database used by other stages.
///
/// Built once at startup and passed to whoever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: String,
    pub database_name: String,
}

impl DatabaseSettings {
    /// Read the URL from `MONGODB_URL`. A missing value is fatal.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the URL through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup(DATABASE_URL_KEY)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                DriftguardError::Config(format!(
                    "environment variable {} is not set",
                    DATABASE_URL_KEY
                ))
            })?;

        if !url.starts_with("mongodb://") && !url.starts_with("mongodb+srv://") {
            return Err(DriftguardError::Config(format!(
                "{} must start with mongodb:// or mongodb+srv://",
                DATABASE_URL_KEY
            )));
        }

        Ok(Self {
            url,
            database_name: DEFAULT_DATABASE_NAME.to_string(),
        })
    }

    /// Use a different database.
    pub fn with_database(mut self, name: impl Into<String>) -> Self {
        self.database_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaultKind;
    use chrono::TimeZone;

    #[test]
    fn test_report_layout() {
        let config = ValidationConfig::new("artifact/run");
        assert_eq!(
            config.drift_report_file_path,
            PathBuf::from("artifact/run/data_validation/drift_report/report.yaml")
        );
        assert_eq!(
            config.drift_report_html_path,
            PathBuf::from("artifact/run/data_validation/drift_report/report.html")
        );
        assert_eq!(
            config.drift_report_dir,
            PathBuf::from("artifact/run/data_validation/drift_report")
        );
    }

    #[test]
    fn test_timestamped_artifact_dir() {
        let at = Local.with_ymd_and_hms(2026, 10, 17, 9, 5, 3).unwrap();
        assert_eq!(
            timestamped_artifact_dir("artifact", at),
            PathBuf::from("artifact/10_17_2026_09_05_03")
        );
    }

    #[test]
    fn test_database_settings_from_lookup() {
        let settings = DatabaseSettings::from_lookup(|key| {
            (key == DATABASE_URL_KEY).then(|| "mongodb+srv://user@cluster0.example.net".to_string())
        })
        .unwrap()
        .with_database("visa_staging");

        assert_eq!(settings.url, "mongodb+srv://user@cluster0.example.net");
        assert_eq!(settings.database_name, "visa_staging");
    }

    #[test]
    fn test_database_settings_missing_url_is_fatal() {
        let err = DatabaseSettings::from_lookup(|_| None).unwrap_err();
        assert_eq!(err.kind(), FaultKind::Configuration);
        assert!(err.to_string().contains("MONGODB_URL"));

        let err = DatabaseSettings::from_lookup(|_| Some("   ".to_string())).unwrap_err();
        assert_eq!(err.kind(), FaultKind::Configuration);
    }

    #[test]
    fn test_database_settings_rejects_other_schemes() {
        let err = DatabaseSettings::from_lookup(|_| Some("postgres://db".to_string())).unwrap_err();
        assert!(matches!(err, DriftguardError::Config(_)));
    }
}
