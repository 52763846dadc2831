//! Drift detection between a reference and a current dataset.
//!
//! The validator talks to drift computation through the [`DriftService`]
//! trait. Two services ship with the crate:
//!
//! - [`StatisticalDriftService`] - KS test for numerical columns, PSI for
//!   categorical columns
//! - [`StaticDriftService`] - fixed output, for tests and dry runs
//!
//! [`detect_drift`] runs a service and writes its rendered and structured
//! reports.

mod mock;
mod orchestrator;
mod render;
mod service;
mod statistical;

pub use mock::StaticDriftService;
pub use orchestrator::detect_drift;
pub use render::{escape_html, render_report};
pub use service::{DriftRun, DriftService, DriftSummary};
pub use statistical::{
    DatasetDrift, DriftThresholds, FeatureDrift, FeatureKind, StatisticalDriftService,
    ks_statistic, ks_two_sample, population_stability_index,
};
