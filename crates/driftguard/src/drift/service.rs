//! Drift computation service trait and result types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DriftguardError, Result};
use crate::input::DataTable;

/// Output of one drift computation.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftRun {
    /// Human-viewable report (HTML).
    pub rendered: String,
    /// Machine-readable result document.
    ///
    /// The first entry of `metrics` must carry a `result` object with
    /// `dataset_drift` and `drift_share`.
    pub structured: Value,
}

/// The two dataset-level figures the validator acts on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftSummary {
    /// Whether the dataset as a whole drifted.
    pub dataset_drift_detected: bool,
    /// Fraction of compared features that drifted (0.0-1.0).
    pub drift_share: f64,
}

impl DriftSummary {
    /// Extract the summary from a structured drift document.
    ///
    /// Any deviation from the expected shape is an error, never a verdict.
    pub fn from_structured(structured: &Value) -> Result<Self> {
        let result = structured
            .get("metrics")
            .and_then(Value::as_array)
            .ok_or_else(|| shape_error("missing 'metrics' list"))?
            .first()
            .ok_or_else(|| shape_error("'metrics' list is empty"))?
            .get("result")
            .ok_or_else(|| shape_error("first metric has no 'result' object"))?;

        let dataset_drift_detected = result
            .get("dataset_drift")
            .and_then(Value::as_bool)
            .ok_or_else(|| shape_error("'dataset_drift' is missing or not a boolean"))?;

        let drift_share = result
            .get("drift_share")
            .and_then(Value::as_f64)
            .ok_or_else(|| shape_error("'drift_share' is missing or not a number"))?;
        if !(0.0..=1.0).contains(&drift_share) {
            return Err(shape_error(&format!(
                "'drift_share' {drift_share} is outside [0, 1]"
            )));
        }

        Ok(Self {
            dataset_drift_detected,
            drift_share,
        })
    }
}

fn shape_error(message: &str) -> DriftguardError {
    DriftguardError::ReportShape(message.to_string())
}

/// Computes drift statistics between a reference and a current dataset.
///
/// Implementations are synchronous and treated as a black box: the call may
/// be expensive and has no timeout of its own.
pub trait DriftService {
    /// Name recorded in errors and logs.
    fn name(&self) -> &str;

    /// Compare `current` against `reference`.
    fn run(&self, reference: &DataTable, current: &DataTable) -> Result<DriftRun>;
}
