//! Fixed-output drift service for testing and dry runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

use super::service::{DriftRun, DriftService};
use crate::error::{DriftguardError, Result};
use crate::input::DataTable;

enum Outcome {
    Summary { dataset_drift: bool, drift_share: f64 },
    Document(Value),
    Failure(String),
}

/// Drift service that returns a predetermined result.
pub struct StaticDriftService {
    outcome: Outcome,
    calls: AtomicUsize,
}

impl StaticDriftService {
    /// Report the given dataset-level verdict and share.
    pub fn new(dataset_drift: bool, drift_share: f64) -> Self {
        Self::with_outcome(Outcome::Summary {
            dataset_drift,
            drift_share,
        })
    }

    /// A service that never reports drift.
    pub fn no_drift() -> Self {
        Self::new(false, 0.0)
    }

    /// Return this structured document verbatim.
    pub fn with_document(document: Value) -> Self {
        Self::with_outcome(Outcome::Document(document))
    }

    /// Fail every run with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Failure(message.into()))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `run` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for StaticDriftService {
    fn default() -> Self {
        Self::no_drift()
    }
}

impl DriftService for StaticDriftService {
    fn name(&self) -> &str {
        "static"
    }

    fn run(&self, reference: &DataTable, current: &DataTable) -> Result<DriftRun> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let structured = match &self.outcome {
            Outcome::Summary {
                dataset_drift,
                drift_share,
            } => json!({
                "service": self.name(),
                "metrics": [{
                    "metric": "DatasetDriftMetric",
                    "result": {
                        "dataset_drift": dataset_drift,
                        "drift_share": drift_share,
                        "reference_rows": reference.row_count(),
                        "current_rows": current.row_count(),
                    }
                }]
            }),
            Outcome::Document(document) => document.clone(),
            Outcome::Failure(message) => {
                return Err(DriftguardError::DriftService {
                    service: self.name().to_string(),
                    message: message.clone(),
                });
            }
        };

        let rendered = format!(
            "<!DOCTYPE html>\n<html><body><pre>{}</pre></body></html>\n",
            super::render::escape_html(&serde_json::to_string_pretty(&structured)?)
        );

        Ok(DriftRun {
            rendered,
            structured,
        })
    }
}
