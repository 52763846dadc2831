//! The validation stage: structural checks followed by drift detection.

use std::path::Path;
use std::sync::Arc;

use crate::artifact::{DataIngestionArtifact, DataValidationArtifact};
use crate::config::ValidationConfig;
use crate::drift::{DriftService, StatisticalDriftService, detect_drift};
use crate::error::{Result, Stage};
use crate::input::{DataTable, read_dataset};
use crate::schema::DatasetSchema;
use crate::validation::{validate_column_count, validate_column_existence};

pub const TRAIN_COLUMN_COUNT_MISMATCH: &str = "Training data column count mismatch. ";
pub const TEST_COLUMN_COUNT_MISMATCH: &str = "Test data column count mismatch. ";
pub const TRAIN_MISSING_COLUMNS: &str = "Missing columns in training data. ";
pub const TEST_MISSING_COLUMNS: &str = "Missing columns in test data. ";
pub const DRIFT_DETECTED: &str = "Data drift detected.";
pub const NO_DRIFT_DETECTED: &str = "No data drift detected.";

/// Validates the train/test split produced by ingestion.
///
/// Each call to [`initiate_validation`](Self::initiate_validation) is an
/// independent run; only the schema is shared between runs.
pub struct DataValidation {
    ingestion: DataIngestionArtifact,
    config: ValidationConfig,
    schema: DatasetSchema,
    drift_service: Arc<dyn DriftService>,
}

impl DataValidation {
    /// Create a validation stage using the statistical drift service.
    pub fn new(
        ingestion: DataIngestionArtifact,
        config: ValidationConfig,
        schema: DatasetSchema,
    ) -> Self {
        let drift_service = Arc::new(StatisticalDriftService::from_schema(&schema));
        Self {
            ingestion,
            config,
            schema,
            drift_service,
        }
    }

    /// Create a validation stage, loading the schema from a YAML file.
    pub fn from_schema_file(
        ingestion: DataIngestionArtifact,
        config: ValidationConfig,
        schema_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let schema =
            DatasetSchema::load(schema_path).map_err(|e| e.in_stage(Stage::LoadSchema))?;
        Ok(Self::new(ingestion, config, schema))
    }

    /// Replace the drift computation service.
    pub fn with_drift_service(self, service: impl DriftService + 'static) -> Self {
        self.with_shared_drift_service(Arc::new(service))
    }

    /// Replace the drift computation service with one the caller keeps a handle to.
    pub fn with_shared_drift_service(mut self, service: Arc<dyn DriftService>) -> Self {
        self.drift_service = service;
        self
    }

    /// Schema both splits are checked against.
    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    /// Read one dataset fully into memory.
    pub fn read_data(&self, path: impl AsRef<Path>) -> Result<DataTable> {
        let dataset = read_dataset(path)?;
        let fingerprint = &dataset.fingerprint;
        tracing::info!(
            file = %fingerprint.file,
            delimiter = %fingerprint.delimiter,
            rows = fingerprint.rows,
            columns = fingerprint.columns,
            sha256 = %fingerprint.sha256,
            "Read dataset"
        );
        Ok(dataset.table)
    }

    /// Run the stage and produce its artifact.
    ///
    /// Structural failures are reported in the artifact. Reading, drift
    /// computation and report writing failures are returned as errors and no
    /// artifact is produced.
    pub fn initiate_validation(&self) -> Result<DataValidationArtifact> {
        tracing::info!("Starting data validation");

        let train = self
            .read_data(&self.ingestion.trained_file_path)
            .map_err(|e| e.in_stage(Stage::ReadTrainData))?;
        let test = self
            .read_data(&self.ingestion.test_file_path)
            .map_err(|e| e.in_stage(Stage::ReadTestData))?;

        let mut message = self.structural_message(&train, &test);
        let validation_status = message.is_empty();

        let mut drift_ran = false;
        if validation_status {
            let summary = detect_drift(self.drift_service.as_ref(), &train, &test, &self.config)
                .map_err(|e| e.in_stage(Stage::DetectDrift))?;
            drift_ran = true;
            message = if summary.dataset_drift_detected {
                DRIFT_DETECTED
            } else {
                NO_DRIFT_DETECTED
            }
            .to_string();
        } else {
            tracing::info!("Structural validation failed; skipping drift detection");
        }

        let report_path = |path: &Path| drift_ran.then(|| path.to_path_buf());
        let artifact = DataValidationArtifact {
            validation_status,
            message,
            drift_report_path: report_path(self.config.drift_report_file_path.as_path()),
            drift_report_rendered_path: report_path(self.config.drift_report_html_path.as_path()),
        };

        tracing::info!("Data validation artifact created: {}", artifact);
        Ok(artifact)
    }

    /// Run all four structural checks and collect failure reasons.
    fn structural_message(&self, train: &DataTable, test: &DataTable) -> String {
        let mut message = String::new();

        if !validate_column_count(train, &self.schema) {
            message.push_str(TRAIN_COLUMN_COUNT_MISMATCH);
        }
        if !validate_column_count(test, &self.schema) {
            message.push_str(TEST_COLUMN_COUNT_MISMATCH);
        }
        if !validate_column_existence(train, &self.schema) {
            message.push_str(TRAIN_MISSING_COLUMNS);
        }
        if !validate_column_existence(test, &self.schema) {
            message.push_str(TEST_MISSING_COLUMNS);
        }

        message
    }
}
