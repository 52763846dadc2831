//! Records passed between pipeline stages.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Output of the ingestion stage: where the split datasets live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataIngestionArtifact {
    pub trained_file_path: PathBuf,
    pub test_file_path: PathBuf,
}

impl DataIngestionArtifact {
    pub fn new(trained_file_path: impl Into<PathBuf>, test_file_path: impl Into<PathBuf>) -> Self {
        Self {
            trained_file_path: trained_file_path.into(),
            test_file_path: test_file_path.into(),
        }
    }
}

/// Output of the validation stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataValidationArtifact {
    /// True iff every structural check passed.
    pub validation_status: bool,
    /// Failure reasons, or the drift verdict when the checks passed.
    pub message: String,
    /// Structured drift report; `None` when drift detection was skipped.
    pub drift_report_path: Option<PathBuf>,
    /// Rendered drift report; `None` when drift detection was skipped.
    pub drift_report_rendered_path: Option<PathBuf>,
}

impl DataValidationArtifact {
    /// Whether drift reports were written for this run.
    pub fn has_drift_reports(&self) -> bool {
        self.drift_report_path.is_some()
    }
}

impl fmt::Display for DataValidationArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "validation_status={} message={:?}",
            self.validation_status, self.message
        )?;
        if let Some(path) = &self.drift_report_path {
            write!(f, " drift_report_path={}", path.display())?;
        }
        if let Some(path) = &self.drift_report_rendered_path {
            write!(f, " drift_report_rendered_path={}", path.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_omits_missing_paths() {
        let artifact = DataValidationArtifact {
            validation_status: false,
            message: "Missing columns in test data. ".to_string(),
            drift_report_path: None,
            drift_report_rendered_path: None,
        };

        assert_eq!(
            artifact.to_string(),
            "validation_status=false message=\"Missing columns in test data. \""
        );
        assert!(!artifact.has_drift_reports());
    }

    #[test]
    fn test_json_shape() {
        let artifact = DataValidationArtifact {
            validation_status: true,
            message: "No data drift detected.".to_string(),
            drift_report_path: Some(PathBuf::from("r/report.yaml")),
            drift_report_rendered_path: Some(PathBuf::from("r/report.html")),
        };

        let value = serde_json::to_value(&artifact).unwrap();
        assert_eq!(value["validation_status"], true);
        assert_eq!(value["drift_report_path"], "r/report.yaml");

        let back: DataValidationArtifact = serde_json::from_value(value).unwrap();
        assert_eq!(back, artifact);
    }
}
