//! Integration tests for the validation stage.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use driftguard::{
    DRIFT_DETECTED, DataIngestionArtifact, DataValidation, DatasetSchema, FaultKind,
    NO_DRIFT_DETECTED, Stage, StaticDriftService, ValidationConfig,
};

/// A scratch directory holding datasets, schema and reports for one test.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    fn config(&self) -> ValidationConfig {
        ValidationConfig::new(self.dir.path().join("artifact"))
    }

    fn stage(&self, train: &str, test: &str, schema: DatasetSchema) -> DataValidation {
        let ingestion =
            DataIngestionArtifact::new(self.write("train.csv", train), self.write("test.csv", test));
        DataValidation::new(ingestion, self.config(), schema)
    }
}

fn visa_schema() -> DatasetSchema {
    DatasetSchema::new(
        &["age", "income", "visa_type"],
        &["age", "income"],
        &["visa_type"],
    )
}

fn reports_exist(config: &ValidationConfig) -> (bool, bool) {
    (
        config.drift_report_file_path.exists(),
        config.drift_report_html_path.exists(),
    )
}

// =============================================================================
// Structural failures
// =============================================================================

#[test]
fn test_extra_column_fails_without_drift() {
    let ws = Workspace::new();
    let data = "age,income,visa_type,extra\n30,50000,H1B,x\n41,72000,F1,y\n";
    let service = Arc::new(StaticDriftService::new(true, 1.0));
    let stage = ws
        .stage(data, data, visa_schema())
        .with_shared_drift_service(service.clone());

    let artifact = stage.initiate_validation().expect("Validation failed");

    assert!(!artifact.validation_status);
    assert_eq!(
        artifact.message,
        "Training data column count mismatch. Test data column count mismatch. "
    );
    assert_eq!(service.calls(), 0);
    assert_eq!(artifact.drift_report_path, None);
    assert_eq!(artifact.drift_report_rendered_path, None);
    assert_eq!(reports_exist(&ws.config()), (false, false));
}

#[test]
fn test_missing_column_in_test_split() {
    let ws = Workspace::new();
    let schema = DatasetSchema::new(&["age", "income"], &["age", "income"], &[]);
    let stage = ws
        .stage("age,income\n30,50000\n", "age\n30\n", schema)
        .with_drift_service(StaticDriftService::no_drift());

    let artifact = stage.initiate_validation().expect("Validation failed");

    assert!(!artifact.validation_status);
    assert!(artifact.message.contains("Missing columns in test data."));
    assert!(!artifact.message.contains("training data"));
    assert!(!artifact.has_drift_reports());
}

#[test]
fn test_right_count_wrong_names() {
    let ws = Workspace::new();
    let data = "a,b,c\n1,2,3\n";
    let stage = ws.stage(data, data, visa_schema());

    let artifact = stage.initiate_validation().expect("Validation failed");

    assert!(!artifact.validation_status);
    assert_eq!(
        artifact.message,
        "Missing columns in training data. Missing columns in test data. "
    );
}

// =============================================================================
// Drift outcomes
// =============================================================================

#[test]
fn test_matching_schema_with_drift() {
    let ws = Workspace::new();
    let data = "age,income,visa_type\n30,50000,H1B\n41,72000,F1\n";
    let stage = ws
        .stage(data, data, visa_schema())
        .with_drift_service(StaticDriftService::new(true, 0.6));

    let artifact = stage.initiate_validation().expect("Validation failed");
    let config = ws.config();

    assert!(artifact.validation_status);
    assert_eq!(artifact.message, DRIFT_DETECTED);
    assert_eq!(artifact.drift_report_path, Some(config.drift_report_file_path.clone()));
    assert_eq!(
        artifact.drift_report_rendered_path,
        Some(config.drift_report_html_path.clone())
    );
    assert_eq!(reports_exist(&config), (true, true));
}

#[test]
fn test_matching_schema_without_drift() {
    let ws = Workspace::new();
    let data = "age,income,visa_type\n30,50000,H1B\n41,72000,F1\n";
    let stage = ws
        .stage(data, data, visa_schema())
        .with_drift_service(StaticDriftService::no_drift());

    let artifact = stage.initiate_validation().expect("Validation failed");

    assert!(artifact.validation_status);
    assert_eq!(artifact.message, NO_DRIFT_DETECTED);
}

#[test]
fn test_statistical_service_end_to_end() {
    let ws = Workspace::new();

    let mut train = String::from("age,income,visa_type\n");
    let mut shifted = String::from("age,income,visa_type\n");
    for i in 0..60 {
        train.push_str(&format!("{},{},{}\n", 20 + i % 30, 40000 + i * 100, "H1B"));
        shifted.push_str(&format!("{},{},{}\n", 60 + i % 30, 90000 + i * 100, "L1"));
    }

    let artifact = ws
        .stage(&train, &train, visa_schema())
        .initiate_validation()
        .expect("Validation failed");
    assert!(artifact.validation_status);
    assert_eq!(artifact.message, NO_DRIFT_DETECTED);

    let artifact = ws
        .stage(&train, &shifted, visa_schema())
        .initiate_validation()
        .expect("Validation failed");
    assert!(artifact.validation_status);
    assert_eq!(artifact.message, DRIFT_DETECTED);

    let yaml = fs::read_to_string(ws.config().drift_report_file_path).unwrap();
    let report: serde_json::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(report["metrics"][0]["result"]["drift_share"], 1.0);
    assert_eq!(report["metrics"][0]["result"]["number_of_columns"], 3);

    let html = fs::read_to_string(ws.config().drift_report_html_path).unwrap();
    assert!(html.contains("visa_type"));
}

#[test]
fn test_repeated_runs_agree() {
    let ws = Workspace::new();
    let data = "age,income,visa_type\n30,50000,H1B\n41,72000,F1\n";
    let stage = ws.stage(data, data, visa_schema());

    let first = stage.initiate_validation().expect("Validation failed");
    let second = stage.initiate_validation().expect("Validation failed");

    assert_eq!(first.validation_status, second.validation_status);
    assert_eq!(first.message, second.message);
    assert_eq!(first, second);
}

// =============================================================================
// Faults
// =============================================================================

#[test]
fn test_missing_dataset_is_io_fault() {
    let ws = Workspace::new();
    let ingestion = DataIngestionArtifact::new(
        ws.dir.path().join("does_not_exist.csv"),
        ws.write("test.csv", "age\n1\n"),
    );
    let stage = DataValidation::new(ingestion, ws.config(), visa_schema());

    let err = stage.initiate_validation().unwrap_err();

    assert_eq!(err.kind(), FaultKind::Io);
    assert_eq!(err.stage(), Some(Stage::ReadTrainData));
}

#[test]
fn test_missing_test_dataset_is_tagged() {
    let ws = Workspace::new();
    let ingestion = DataIngestionArtifact::new(
        ws.write("train.csv", "age\n1\n"),
        Path::new("/nonexistent/test.csv"),
    );
    let stage = DataValidation::new(ingestion, ws.config(), visa_schema());

    let err = stage.initiate_validation().unwrap_err();
    assert_eq!(err.stage(), Some(Stage::ReadTestData));
    assert!(err.to_string().starts_with("reading test data"));
}

#[test]
fn test_drift_service_failure_is_not_a_verdict() {
    let ws = Workspace::new();
    let data = "age,income,visa_type\n30,50000,H1B\n";
    let stage = ws
        .stage(data, data, visa_schema())
        .with_drift_service(StaticDriftService::failing("out of memory"));

    let err = stage.initiate_validation().unwrap_err();

    assert_eq!(err.kind(), FaultKind::Service);
    assert_eq!(err.stage(), Some(Stage::DetectDrift));
    assert!(err.to_string().contains("out of memory"));
}

#[test]
fn test_unexpected_report_shape_is_not_a_verdict() {
    let ws = Workspace::new();
    let data = "age,income,visa_type\n30,50000,H1B\n";
    let stage = ws
        .stage(data, data, visa_schema())
        .with_drift_service(StaticDriftService::with_document(json!({
            "metrics": [{"metric": "DatasetDriftMetric", "result": {"share": 0.2}}]
        })));

    let err = stage.initiate_validation().unwrap_err();
    assert_eq!(err.kind(), FaultKind::Service);
}

#[test]
fn test_out_of_range_drift_share_is_not_a_verdict() {
    let ws = Workspace::new();
    let data = "age,income,visa_type\n30,50000,H1B\n";
    let stage = ws
        .stage(data, data, visa_schema())
        .with_drift_service(StaticDriftService::new(false, 7.5));

    let err = stage.initiate_validation().unwrap_err();

    assert_eq!(err.kind(), FaultKind::Service);
    assert_eq!(err.stage(), Some(Stage::DetectDrift));
    assert!(err.to_string().contains("drift_share"));
}

#[test]
fn test_schema_file_without_required_key() {
    let ws = Workspace::new();
    let schema_path = ws.write("schema.yaml", "columns: [age]\nnumerical_columns: [age]\n");
    let ingestion = DataIngestionArtifact::new("train.csv", "test.csv");

    let result = DataValidation::from_schema_file(ingestion, ws.config(), schema_path);
    let err = result.err().expect("Schema should be rejected");

    assert_eq!(err.kind(), FaultKind::Configuration);
    assert_eq!(err.stage(), Some(Stage::LoadSchema));
}

#[test]
fn test_schema_file_round_trip_through_stage() {
    let ws = Workspace::new();
    let schema_path = ws.write(
        "schema.yaml",
        "columns:\n  - age: int\n  - visa_type: category\nnumerical_columns: [age]\ncategorical_columns: [visa_type]\n",
    );
    let ingestion = DataIngestionArtifact::new(
        ws.write("train.csv", "age,visa_type\n30,H1B\n"),
        ws.write("test.csv", "age,visa_type\n31,H1B\n"),
    );

    let stage = DataValidation::from_schema_file(ingestion, ws.config(), schema_path)
        .expect("Schema should load")
        .with_drift_service(StaticDriftService::no_drift());

    assert_eq!(stage.schema().expected_column_count(), 2);
    let artifact = stage.initiate_validation().expect("Validation failed");
    assert!(artifact.validation_status);
}
