//! # CSV batch pipeline
//!
//! End-to-end path from a raw catalog file to scored targets:
//!
//! 1. decode the CSV ([`catalog::csv_reader`](crate::catalog::csv_reader)),
//! 2. detect and validate the column mapping
//!    ([`columns::detector`](crate::columns::detector)),
//! 3. convert each row to a [`CanonicalTarget`],
//! 4. score every surviving target with the engine's strategy.
//!
//! Row-level failures never abort the batch: a row that cannot be converted
//! (or a target the strategy refuses to score) is recorded in the summary
//! and processing moves on. The batch as a whole fails only when the column
//! mapping misses a required field, the file is structurally unreadable, or
//! not a single row survives conversion.

use std::collections::BTreeMap;
use std::io::Read;

use serde::Serialize;

use crate::catalog::{csv_reader::read_catalog, CanonicalTarget};
use crate::columns::detector::{build_report, detect_columns};
use crate::exoscore_errors::ExoscoreError;
use crate::scoring::{ScoreResult, ScoringEngine};

/// Detail entries kept in the summary before truncation.
const MAX_ERROR_DETAILS: usize = 10;

/// Marker appended once when error details were truncated.
const TRUNCATION_MARKER: &str = "... and more errors";

/// Aggregate accounting for one processed batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Data rows read from the file.
    pub rows_processed: usize,
    /// Rows that converted to a canonical target.
    pub valid_targets: usize,
    pub successful_scores: usize,
    pub failed_scores: usize,
    /// Rows dropped during conversion (full count, details capped).
    pub conversion_errors: usize,
    /// Human-readable error details, at most [`MAX_ERROR_DETAILS`] plus a
    /// truncation marker.
    pub errors: Vec<String>,
    /// Canonical field name → source header, as detected.
    pub detected_mapping: BTreeMap<String, String>,
    pub confidence_scores: BTreeMap<String, f64>,
    pub mapping_quality: f64,
    /// Name of the scoring strategy that produced the results.
    pub strategy: String,
}

/// Scored targets in input order plus the batch accounting.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub results: Vec<ScoreResult>,
    pub summary: BatchSummary,
}

/// Append an error detail, truncating after [`MAX_ERROR_DETAILS`].
fn push_error(errors: &mut Vec<String>, message: String) {
    if errors.len() < MAX_ERROR_DETAILS {
        errors.push(message);
    } else if errors.last().map(String::as_str) != Some(TRUNCATION_MARKER) {
        errors.push(TRUNCATION_MARKER.to_string());
    }
}

/// Run the full pipeline over one CSV catalog.
///
/// Arguments
/// -----------------
/// * `reader`: UTF-8 CSV content with a header row.
/// * `engine`: the scoring engine whose strategy scores each target.
///
/// Return
/// ----------
/// * A [`BatchOutcome`] with one [`ScoreResult`] per successfully scored
///   row, in input order, each carrying its untouched source row.
///
/// Errors
/// ----------
/// * [`ExoscoreError::EmptyCatalog`] for a file without headers or rows.
/// * [`ExoscoreError::MissingRequiredColumns`] when detection cannot map
///   every required field; the boxed report carries the suggestions.
/// * [`ExoscoreError::NoValidTargets`] when every row failed conversion.
pub fn score_csv<R: Read>(
    reader: R,
    engine: &ScoringEngine,
) -> Result<BatchOutcome, ExoscoreError> {
    let (headers, rows) = read_catalog(reader)?;

    let report = build_report(&headers);
    if !report.can_proceed {
        return Err(ExoscoreError::MissingRequiredColumns(Box::new(report)));
    }
    let mapping = detect_columns(&headers);

    let rows_processed = rows.len();
    let mut errors = Vec::new();
    let mut conversion_messages = Vec::new();
    let mut targets = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match CanonicalTarget::from_row(row, &mapping, index) {
            Ok(target) => targets.push((target, row.to_original_data())),
            Err(err) => {
                let message = format!("row {}: {err}", index + 1);
                conversion_messages.push(message.clone());
                push_error(&mut errors, message);
            }
        }
    }

    let conversion_errors = conversion_messages.len();
    if targets.is_empty() {
        let preview = conversion_messages
            .iter()
            .take(5)
            .cloned()
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ExoscoreError::NoValidTargets(preview));
    }

    let valid_targets = targets.len();
    let mut results = Vec::with_capacity(valid_targets);
    let mut failed_scores = 0;

    for (target, original_data) in targets {
        match engine.score_target(&target) {
            Ok(mut result) => {
                result.original_data = Some(original_data);
                results.push(result);
            }
            Err(err) => {
                failed_scores += 1;
                log::warn!("scoring failed for {}: {err}", target.name);
                push_error(&mut errors, format!("target '{}': {err}", target.name));
            }
        }
    }

    let summary = BatchSummary {
        rows_processed,
        valid_targets,
        successful_scores: results.len(),
        failed_scores,
        conversion_errors,
        errors,
        detected_mapping: report.detected_mapping,
        confidence_scores: report.confidence_scores,
        mapping_quality: report.mapping_quality,
        strategy: engine.strategy_name().to_string(),
    };

    Ok(BatchOutcome { results, summary })
}

#[cfg(test)]
mod pipeline_test {
    use super::*;
    use crate::scoring::Priority;

    const GOOD_CSV: &str = "\
pl_name,sy_dist,st_spectype,pl_rade,pl_orbper,st_mass,data_quality
Proxima b,1.30,M5V,0.095,11.2,0.12,Good
Kepler-452b,430.0,G2V,0.145,384.8,1.04,Excellent
Tau Ceti e,3.65,G8V,0.14,163.0,0.78,Fair
";

    #[test]
    fn test_full_batch_scores_every_row() {
        let engine = ScoringEngine::default();
        let outcome = score_csv(GOOD_CSV.as_bytes(), &engine).unwrap();

        assert_eq!(outcome.results.len(), 3);
        assert_eq!(outcome.summary.rows_processed, 3);
        assert_eq!(outcome.summary.valid_targets, 3);
        assert_eq!(outcome.summary.successful_scores, 3);
        assert_eq!(outcome.summary.failed_scores, 0);
        assert_eq!(outcome.summary.conversion_errors, 0);
        assert_eq!(outcome.summary.strategy, "heuristic");

        // Input order preserved, source rows attached verbatim.
        assert_eq!(outcome.results[0].target_name, "Proxima b");
        let original = outcome.results[0].original_data.as_ref().unwrap();
        assert_eq!(original.get("sy_dist").map(String::as_str), Some("1.30"));
    }

    #[test]
    fn test_bad_rows_are_skipped_not_fatal() {
        let data = "\
pl_name,sy_dist,st_spectype,pl_rade,pl_orbper,st_mass
Proxima b,1.30,M5V,0.095,11.2,0.12
Broken,not-a-number,G2V,0.1,100.0,1.0
Tau Ceti e,3.65,G8V,0.14,163.0,0.78
";
        let engine = ScoringEngine::default();
        let outcome = score_csv(data.as_bytes(), &engine).unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.summary.conversion_errors, 1);
        assert_eq!(outcome.summary.errors.len(), 1);
        assert!(outcome.summary.errors[0].starts_with("row 2:"));
        assert_eq!(outcome.results[1].target_name, "Tau Ceti e");
    }

    #[test]
    fn test_error_details_are_truncated() {
        let mut data = String::from("pl_name,sy_dist,st_spectype,pl_rade,pl_orbper,st_mass\n");
        for i in 0..15 {
            data.push_str(&format!("Bad-{i},oops,G2V,0.1,100.0,1.0\n"));
        }
        data.push_str("Good one,10.0,G2V,0.1,100.0,1.0\n");

        let engine = ScoringEngine::default();
        let outcome = score_csv(data.as_bytes(), &engine).unwrap();

        assert_eq!(outcome.summary.conversion_errors, 15);
        assert_eq!(outcome.summary.errors.len(), MAX_ERROR_DETAILS + 1);
        assert_eq!(
            outcome.summary.errors.last().map(String::as_str),
            Some(TRUNCATION_MARKER)
        );
        assert_eq!(outcome.results.len(), 1);
    }

    #[test]
    fn test_missing_required_columns_fail_fast() {
        let data = "some_col,other_col\n1,2\n";
        let engine = ScoringEngine::default();
        let err = score_csv(data.as_bytes(), &engine).unwrap_err();
        match err {
            ExoscoreError::MissingRequiredColumns(report) => {
                assert!(!report.missing_required.is_empty());
                assert!(!report.can_proceed);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_all_rows_invalid_is_fatal() {
        let data = "\
pl_name,sy_dist,st_spectype,pl_rade,pl_orbper,st_mass
A,x,G,0.1,1.0,1.0
B,y,G,0.1,1.0,1.0
";
        let engine = ScoringEngine::default();
        let err = score_csv(data.as_bytes(), &engine).unwrap_err();
        match err {
            ExoscoreError::NoValidTargets(preview) => {
                assert!(preview.contains("row 1:"));
                assert!(preview.contains("; row 2:"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_distance_factor_separates_near_and_far() {
        let engine = ScoringEngine::default();
        let outcome = score_csv(GOOD_CSV.as_bytes(), &engine).unwrap();

        let proxima = &outcome.results[0];
        let kepler = &outcome.results[1];
        assert!(proxima.detailed_scores["distance_factor"] > 95.0);
        assert_eq!(kepler.detailed_scores["distance_factor"], 0.0);
        assert!(matches!(proxima.priority, Priority::High | Priority::Medium));
    }
}
