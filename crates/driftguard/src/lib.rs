//! driftguard: dataset validation for training pipelines.
//!
//! Before a model is fitted, the train and test splits produced by ingestion
//! are checked against a declared schema and compared with each other for
//! distributional drift. The outcome is a single artifact with a pass/fail
//! status and a diagnostic message.
//!
//! # Stages of a run
//!
//! 1. **Read** both datasets (any read failure aborts the run)
//! 2. **Structural checks**: column count and required columns, for each split
//! 3. **Drift detection**: only when every structural check passed
//!
//! # Example
//!
//! ```no_run
//! use driftguard::{DataIngestionArtifact, DataValidation, ValidationConfig};
//!
//! let ingestion = DataIngestionArtifact::new("data/train.csv", "data/test.csv");
//! let stage = DataValidation::from_schema_file(
//!     ingestion,
//!     ValidationConfig::default(),
//!     "config/schema.yaml",
//! )
//! .unwrap();
//!
//! let artifact = stage.initiate_validation().unwrap();
//! println!("{}: {}", artifact.validation_status, artifact.message);
//! ```

pub mod artifact;
pub mod config;
pub mod drift;
pub mod error;
pub mod input;
pub mod schema;
pub mod validation;

mod validator;

pub use crate::validator::{
    DRIFT_DETECTED, DataValidation, NO_DRIFT_DETECTED, TEST_COLUMN_COUNT_MISMATCH,
    TEST_MISSING_COLUMNS, TRAIN_COLUMN_COUNT_MISMATCH, TRAIN_MISSING_COLUMNS,
};
pub use artifact::{DataIngestionArtifact, DataValidationArtifact};
pub use config::{DatabaseSettings, ValidationConfig};
pub use drift::{
    DriftService, DriftSummary, DriftThresholds, StaticDriftService, StatisticalDriftService,
};
pub use error::{DriftguardError, FaultKind, Result, Stage};
pub use input::{DataTable, Dataset, DatasetFingerprint, Delimiter, read_dataset};
pub use schema::DatasetSchema;
