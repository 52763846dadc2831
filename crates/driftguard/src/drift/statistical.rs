//! Drift service backed by per-column hypothesis tests.
//!
//! Numerical columns are compared with the two-sample Kolmogorov-Smirnov
//! test, categorical columns with the population stability index. The
//! dataset is considered drifted when the share of drifted columns reaches
//! a threshold.

use std::collections::BTreeSet;

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::render::render_report;
use super::service::{DriftRun, DriftService};
use crate::error::{DriftguardError, Result};
use crate::input::DataTable;
use crate::schema::DatasetSchema;

/// Floor applied to category proportions so PSI stays finite.
const PSI_EPSILON: f64 = 1e-4;

/// Thresholds used to decide drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftThresholds {
    /// A numerical column drifts when the KS p-value is below this.
    pub numerical_threshold: f64,
    /// A categorical column drifts when PSI is at or above this.
    pub categorical_threshold: f64,
    /// The dataset drifts when at least this share of columns drifted.
    pub drift_share_threshold: f64,
}

impl Default for DriftThresholds {
    fn default() -> Self {
        Self {
            numerical_threshold: 0.05,
            categorical_threshold: 0.1,
            drift_share_threshold: 0.5,
        }
    }
}

/// How a column is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Numerical,
    Categorical,
}

/// Drift outcome for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDrift {
    pub column: String,
    pub column_type: FeatureKind,
    /// Name of the statistical test used.
    pub stattest: String,
    pub threshold: f64,
    /// p-value for KS, index value for PSI.
    pub drift_score: f64,
    pub drift_detected: bool,
    pub reference_count: usize,
    pub current_count: usize,
}

/// Dataset-level drift outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDrift {
    pub dataset_drift: bool,
    /// Fraction of compared columns that drifted.
    pub drift_share: f64,
    pub drift_share_threshold: f64,
    pub number_of_columns: usize,
    pub number_of_drifted_columns: usize,
    pub reference_rows: usize,
    pub current_rows: usize,
}

/// Compares the schema's numerical and categorical columns.
#[derive(Debug, Clone)]
pub struct StatisticalDriftService {
    numerical_columns: Vec<String>,
    categorical_columns: Vec<String>,
    thresholds: DriftThresholds,
}

impl StatisticalDriftService {
    /// Compare the columns a schema declares, with default thresholds.
    pub fn from_schema(schema: &DatasetSchema) -> Self {
        Self {
            numerical_columns: schema.numerical_columns.clone(),
            categorical_columns: schema.categorical_columns.clone(),
            thresholds: DriftThresholds::default(),
        }
    }

    /// Override the drift thresholds.
    pub fn with_thresholds(mut self, thresholds: DriftThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thresholds(&self) -> &DriftThresholds {
        &self.thresholds
    }

    /// Per-column drift for every declared column present in both tables.
    pub fn column_drift(
        &self,
        reference: &DataTable,
        current: &DataTable,
    ) -> Result<Vec<FeatureDrift>> {
        let mut features = Vec::new();

        for name in &self.numerical_columns {
            if let Some((ref_values, cur_values)) = column_pair(reference, current, name) {
                let mut ref_values = self.parse_numeric(name, ref_values)?;
                let mut cur_values = self.parse_numeric(name, cur_values)?;
                let p_value = ks_two_sample(&mut ref_values, &mut cur_values);

                features.push(FeatureDrift {
                    column: name.clone(),
                    column_type: FeatureKind::Numerical,
                    stattest: "K-S p_value".to_string(),
                    threshold: self.thresholds.numerical_threshold,
                    drift_score: p_value,
                    drift_detected: p_value < self.thresholds.numerical_threshold,
                    reference_count: ref_values.len(),
                    current_count: cur_values.len(),
                });
            }
        }

        for name in &self.categorical_columns {
            if let Some((ref_values, cur_values)) = column_pair(reference, current, name) {
                let ref_counts = category_counts(ref_values);
                let cur_counts = category_counts(cur_values);
                let psi = population_stability_index(&ref_counts, &cur_counts);

                features.push(FeatureDrift {
                    column: name.clone(),
                    column_type: FeatureKind::Categorical,
                    stattest: "PSI".to_string(),
                    threshold: self.thresholds.categorical_threshold,
                    drift_score: psi,
                    drift_detected: psi >= self.thresholds.categorical_threshold,
                    reference_count: ref_counts.values().sum(),
                    current_count: cur_counts.values().sum(),
                });
            }
        }

        for feature in &features {
            tracing::debug!(
                column = %feature.column,
                stattest = %feature.stattest,
                score = feature.drift_score,
                drifted = feature.drift_detected,
                "Column drift"
            );
        }

        Ok(features)
    }

    /// Aggregate column results into the dataset verdict.
    pub fn dataset_drift(
        &self,
        features: &[FeatureDrift],
        reference_rows: usize,
        current_rows: usize,
    ) -> DatasetDrift {
        let number_of_columns = features.len();
        let number_of_drifted_columns = features.iter().filter(|f| f.drift_detected).count();
        let drift_share = if number_of_columns == 0 {
            0.0
        } else {
            number_of_drifted_columns as f64 / number_of_columns as f64
        };

        DatasetDrift {
            dataset_drift: number_of_columns > 0
                && drift_share >= self.thresholds.drift_share_threshold,
            drift_share,
            drift_share_threshold: self.thresholds.drift_share_threshold,
            number_of_columns,
            number_of_drifted_columns,
            reference_rows,
            current_rows,
        }
    }

    fn parse_numeric<'a>(
        &self,
        column: &str,
        values: impl Iterator<Item = &'a str>,
    ) -> Result<Vec<f64>> {
        let mut parsed = Vec::new();
        for value in values.filter(|v| !DataTable::is_null_value(v)) {
            let number = value.trim().parse::<f64>().map_err(|_| DriftguardError::DriftService {
                service: self.name().to_string(),
                message: format!("numerical column '{}' contains non-numeric value '{}'", column, value),
            })?;
            if number.is_finite() {
                parsed.push(number);
            }
        }
        Ok(parsed)
    }
}

impl DriftService for StatisticalDriftService {
    fn name(&self) -> &str {
        "statistical"
    }

    fn run(&self, reference: &DataTable, current: &DataTable) -> Result<DriftRun> {
        let features = self.column_drift(reference, current)?;
        let dataset = self.dataset_drift(&features, reference.row_count(), current.row_count());

        let structured = json!({
            "service": self.name(),
            "generated_at": Utc::now().to_rfc3339(),
            "metrics": [
                {
                    "metric": "DatasetDriftMetric",
                    "result": serde_json::to_value(&dataset)?,
                },
                {
                    "metric": "ColumnDriftMetrics",
                    "result": { "columns": serde_json::to_value(&features)? },
                },
            ],
        });

        Ok(DriftRun {
            rendered: render_report(&dataset, &features),
            structured,
        })
    }
}

/// Values of a column from both tables, if both have it.
fn column_pair<'a>(
    reference: &'a DataTable,
    current: &'a DataTable,
    name: &str,
) -> Option<(impl Iterator<Item = &'a str>, impl Iterator<Item = &'a str>)> {
    let ref_index = reference.column_index(name)?;
    let cur_index = current.column_index(name)?;
    Some((
        reference.column_values(ref_index),
        current.column_values(cur_index),
    ))
}

fn category_counts<'a>(values: impl Iterator<Item = &'a str>) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for value in values.filter(|v| !DataTable::is_null_value(v)) {
        *counts.entry(value.trim().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Population stability index between two category distributions.
///
/// Returns 0.0 when either side has no observations.
pub fn population_stability_index(
    reference: &IndexMap<String, usize>,
    current: &IndexMap<String, usize>,
) -> f64 {
    let ref_total: usize = reference.values().sum();
    let cur_total: usize = current.values().sum();
    if ref_total == 0 || cur_total == 0 {
        return 0.0;
    }

    let categories: BTreeSet<&str> = reference
        .keys()
        .chain(current.keys())
        .map(|k| k.as_str())
        .collect();

    categories
        .into_iter()
        .map(|category| {
            let ref_pct = (reference.get(category).copied().unwrap_or(0) as f64
                / ref_total as f64)
                .max(PSI_EPSILON);
            let cur_pct = (current.get(category).copied().unwrap_or(0) as f64
                / cur_total as f64)
                .max(PSI_EPSILON);
            (cur_pct - ref_pct) * (cur_pct / ref_pct).ln()
        })
        .sum()
}

/// Two-sample Kolmogorov-Smirnov test; returns the asymptotic p-value.
///
/// Sorts both slices in place. Returns 1.0 when either sample is empty.
pub fn ks_two_sample(reference: &mut [f64], current: &mut [f64]) -> f64 {
    let statistic = ks_statistic(reference, current);
    let (n1, n2) = (reference.len() as f64, current.len() as f64);
    if n1 == 0.0 || n2 == 0.0 {
        return 1.0;
    }

    let en = (n1 * n2 / (n1 + n2)).sqrt();
    kolmogorov_survival((en + 0.12 + 0.11 / en) * statistic)
}

/// Largest distance between the two empirical CDFs.
pub fn ks_statistic(reference: &mut [f64], current: &mut [f64]) -> f64 {
    reference.sort_by(f64::total_cmp);
    current.sort_by(f64::total_cmp);

    let (n1, n2) = (reference.len(), current.len());
    if n1 == 0 || n2 == 0 {
        return 0.0;
    }

    let (mut i, mut j) = (0, 0);
    let mut statistic: f64 = 0.0;
    while i < n1 && j < n2 {
        let x = reference[i].min(current[j]);
        while i < n1 && reference[i] <= x {
            i += 1;
        }
        while j < n2 && current[j] <= x {
            j += 1;
        }
        let gap = (i as f64 / n1 as f64 - j as f64 / n2 as f64).abs();
        statistic = statistic.max(gap);
    }

    statistic
}

/// Survival function of the Kolmogorov distribution.
fn kolmogorov_survival(lambda: f64) -> f64 {
    const EPS1: f64 = 1e-3;
    const EPS2: f64 = 1e-8;

    let a2 = -2.0 * lambda * lambda;
    let mut factor = 2.0;
    let mut sum = 0.0;
    let mut previous: f64 = 0.0;

    for k in 1..=100 {
        let term = factor * (a2 * (k * k) as f64).exp();
        sum += term;
        if term.abs() <= EPS1 * previous || term.abs() <= EPS2 * sum {
            return sum.clamp(0.0, 1.0);
        }
        factor = -factor;
        previous = term.abs();
    }

    // Series does not converge for tiny lambda; the samples are indistinguishable.
    1.0
}
