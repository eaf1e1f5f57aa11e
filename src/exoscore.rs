//! # Library entry point
//!
//! [`Exoscore`] bundles the pieces a caller otherwise wires together by
//! hand: a [`ScoringEngine`] with its strategy, the telescope configuration
//! for observability assessments, and the background [`JobRegistry`]. One
//! instance serves any number of targets and batches.
//!
//! ## Overview
//!
//! ```rust,no_run
//! use exoscore::Exoscore;
//!
//! let exoscore = Exoscore::default();
//! let csv = std::fs::read_to_string("catalog.csv").unwrap();
//! let outcome = exoscore.score_csv(csv.as_bytes()).unwrap();
//! for result in &outcome.results {
//!     println!("{}: {}", result.target_name, result.characterization_score);
//! }
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::catalog::CanonicalTarget;
use crate::columns::detector::build_report;
use crate::columns::MappingReport;
use crate::exoscore_errors::ExoscoreError;
use crate::features::DerivedFeatures;
use crate::jobs::{JobId, JobRegistry, JobState};
use crate::observability::{
    compute_observability, score_batch, ObservabilityParams, ObservabilityResult,
};
use crate::pipeline::{score_csv, BatchOutcome};
use crate::scoring::{ScoreResult, ScoringEngine};

/// Facade over scoring, column validation, observability, and jobs.
pub struct Exoscore {
    engine: Arc<ScoringEngine>,
    observability: ObservabilityParams,
    jobs: JobRegistry,
}

impl Default for Exoscore {
    /// Heuristic-only engine with the default telescope configuration.
    fn default() -> Self {
        Exoscore::new(ScoringEngine::default(), ObservabilityParams::default())
    }
}

impl Exoscore {
    pub fn new(engine: ScoringEngine, observability: ObservabilityParams) -> Self {
        Exoscore {
            engine: Arc::new(engine),
            observability,
            jobs: JobRegistry::new(),
        }
    }

    /// Name of the active scoring strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.engine.strategy_name()
    }

    /// Score one canonical target.
    pub fn score_target(&self, target: &CanonicalTarget) -> Result<ScoreResult, ExoscoreError> {
        self.engine.score_target(target)
    }

    /// Dry-run column detection over a header list, without touching rows.
    pub fn validate_columns(&self, headers: &[String]) -> MappingReport {
        build_report(headers)
    }

    /// Run the full CSV pipeline synchronously.
    pub fn score_csv<R: Read>(&self, reader: R) -> Result<BatchOutcome, ExoscoreError> {
        score_csv(reader, &self.engine)
    }

    /// [`score_csv`](Self::score_csv) over a file on disk.
    pub fn score_csv_file<P: AsRef<Path>>(&self, path: P) -> Result<BatchOutcome, ExoscoreError> {
        let file = File::open(path)?;
        self.score_csv(file)
    }

    /// Observability assessment of one target under this instance's
    /// telescope configuration.
    pub fn observability(&self, target: &CanonicalTarget) -> ObservabilityResult {
        let features = DerivedFeatures::from_target(target);
        compute_observability(target, &features, &self.observability)
    }

    /// Observability assessments for a batch, preserving input order.
    pub fn observability_batch(&self, targets: &[CanonicalTarget]) -> Vec<ObservabilityResult> {
        score_batch(targets, &self.observability)
    }

    /// Queue a CSV batch on a background worker.
    pub fn submit_csv_job(&self, csv_content: String) -> JobId {
        self.jobs.submit(csv_content, Arc::clone(&self.engine))
    }

    /// Current state of a background job.
    pub fn job_status(&self, id: JobId) -> Result<JobState, ExoscoreError> {
        self.jobs.status(id)
    }
}

#[cfg(test)]
mod exoscore_test {
    use super::*;

    #[test]
    fn test_default_facade_is_heuristic() {
        let exoscore = Exoscore::default();
        assert_eq!(exoscore.strategy_name(), "heuristic");
    }

    #[test]
    fn test_validate_columns_reports_missing_fields() {
        let exoscore = Exoscore::default();
        let headers = vec!["pl_name".to_string(), "sy_dist".to_string()];
        let report = exoscore.validate_columns(&headers);
        assert!(!report.can_proceed);
        assert!(report
            .missing_required
            .contains(&"planet_radius".to_string()));
    }

    #[test]
    fn test_observability_uses_default_telescope() {
        let exoscore = Exoscore::default();
        let target = CanonicalTarget {
            name: "Nearby".to_string(),
            distance: 10.0,
            star_type: "G2V".to_string(),
            planet_radius: 0.0893,
            orbital_period: 365.25,
            stellar_mass: 1.0,
            planet_mass: None,
            temperature: None,
            discovery_year: None,
            detection_method: None,
            data_quality: None,
        };
        let result = exoscore.observability(&target);
        assert!(result.separation_mas > 0.0);
        assert!((0.0..=1.0).contains(&result.observability_score));
    }
}
