//! Error types for the driftguard library.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline step an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadSchema,
    ReadTrainData,
    ReadTestData,
    DetectDrift,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::LoadSchema => "loading schema",
            Stage::ReadTrainData => "reading training data",
            Stage::ReadTestData => "reading test data",
            Stage::DetectDrift => "detecting data drift",
        };
        f.write_str(label)
    }
}

/// Coarse classification of a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Missing environment variable, schema key or invalid setting.
    Configuration,
    /// Unreadable input or unwritable output.
    Io,
    /// The drift computation service failed or returned an unexpected shape.
    Service,
}

/// Main error type for driftguard operations.
#[derive(Debug, Error)]
pub enum DriftguardError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no columns to validate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema document is malformed or lacks a required key.
    #[error("Invalid schema '{path}': {source}")]
    SchemaParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to serialize a report to disk.
    #[error("Failed to write report '{path}': {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The drift computation service failed.
    #[error("Drift service '{service}' failed: {message}")]
    DriftService { service: String, message: String },

    /// The drift result does not have the expected structure.
    #[error("Unexpected drift report shape: {0}")]
    ReportShape(String),

    /// An error wrapped with the step it came from.
    #[error("{stage}: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<DriftguardError>,
    },
}

impl DriftguardError {
    /// Wrap this error with the pipeline step it surfaced in.
    pub fn in_stage(self, stage: Stage) -> Self {
        DriftguardError::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// Classify the error, looking through stage context.
    pub fn kind(&self) -> FaultKind {
        match self {
            DriftguardError::Io { .. }
            | DriftguardError::Csv(_)
            | DriftguardError::EmptyData(_)
            | DriftguardError::ReportWrite { .. } => FaultKind::Io,
            DriftguardError::Config(_)
            | DriftguardError::SchemaParse { .. } => FaultKind::Configuration,
            DriftguardError::Json(_)
            | DriftguardError::DriftService { .. }
            | DriftguardError::ReportShape(_) => FaultKind::Service,
            DriftguardError::Stage { source, .. } => source.kind(),
        }
    }

    /// The stage this error was tagged with, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            DriftguardError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type alias for driftguard operations.
pub type Result<T> = std::result::Result<T, DriftguardError>;
