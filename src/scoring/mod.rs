//! # Heuristic scoring engine
//!
//! Turns a [`CanonicalTarget`] plus its [`DerivedFeatures`] into a
//! [`ScoreResult`]: a characterization score driven by observational
//! factors, a habitability score and class from the selected
//! [`ScoringStrategy`](strategy::ScoringStrategy), a confidence estimate,
//! and an observation priority.
//!
//! ## Overview
//!
//! - [`characterization_score`] — weighted sum over distance, star type,
//!   planet size, data quality, and stellar mass. Missing inputs reweight
//!   the sum instead of zeroing it out.
//! - [`confidence`] — data completeness blended with model certainty.
//! - [`sephi`] / [`cdhs`] — the two habitability composites; callers choose
//!   which definition applies.
//! - [`strategy`] — the heuristic-only vs model-augmented seam.

pub mod cdhs;
pub mod sephi;
pub mod strategy;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::CanonicalTarget;
use crate::constants::FastHashMap;
use crate::exoscore_errors::ExoscoreError;
use crate::features::{encode_data_quality, encode_star_type, DerivedFeatures};

use strategy::{HeuristicStrategy, ScoringStrategy};

/// Observation priority derived from the characterization score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// High ≥ 75, Medium ≥ 50, else Low.
    pub fn from_characterization_score(score: f64) -> Self {
        if score >= 75.0 {
            Priority::High
        } else if score >= 50.0 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(s)
    }
}

/// Habitability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HabitabilityClass {
    #[serde(rename = "Potentially Habitable")]
    PotentiallyHabitable,
    #[serde(rename = "Not Habitable")]
    NotHabitable,
    Unknown,
}

impl std::fmt::Display for HabitabilityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HabitabilityClass::PotentiallyHabitable => "Potentially Habitable",
            HabitabilityClass::NotHabitable => "Not Habitable",
            HabitabilityClass::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Scoring verdict for one target. Created once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResult {
    pub target_name: String,
    /// Characterization score in `[0, 100]`.
    pub characterization_score: f64,
    /// Habitability score in `[0, 100]`.
    pub habitability_score: f64,
    pub habitability_class: HabitabilityClass,
    /// Confidence in `[0, 100]`.
    pub confidence: f64,
    pub priority: Priority,
    /// Component name → numeric value breakdown.
    pub detailed_scores: FastHashMap<String, f64>,
    /// Raw model outputs (empty in heuristic-only mode).
    pub ml_predictions: FastHashMap<String, f64>,
    /// Untouched source row, when the target came from a CSV batch.
    pub original_data: Option<BTreeMap<String, String>>,
}

/// Round to one decimal place, as reported scores are.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Characterization score in `[0, 100]` from observational factors.
///
/// Weighted sum where each factor contributes only when its input is
/// usable; the final score is normalized by the weights actually present,
/// so missing inputs reweight rather than zero out. With no usable factor
/// at all the score defaults to 50.
///
/// Factors and weights:
/// - distance (0.30) — only within 50 pc; ≤ 5 pc scores 1.0, then linear
///   falloff to 50 pc,
/// - star type (0.25) — `{G: 1.0, K: 0.9, F: 0.7, M: 0.6, A: 0.3}`, else 0.5,
/// - planet radius (0.20) — Earth-like peak at 1 R⊕,
/// - data quality (0.15) — quality-flag encoding,
/// - stellar mass (0.10) — solar-mass peak.
pub fn characterization_score(target: &CanonicalTarget) -> f64 {
    let mut score = 0.0;
    let mut weight_sum = 0.0;

    let distance = target.distance;
    if distance <= 50.0 {
        let distance_score = if distance > 5.0 {
            (1.0 - (distance - 5.0) / 45.0).max(0.0)
        } else {
            1.0
        };
        score += distance_score * 0.3;
        weight_sum += 0.3;
    }

    if !target.star_type.is_empty() {
        let star_score = match target.star_type.chars().next().map(|c| c.to_ascii_uppercase())
        {
            Some('G') => 1.0,
            Some('K') => 0.9,
            Some('F') => 0.7,
            Some('M') => 0.6,
            Some('A') => 0.3,
            _ => 0.5,
        };
        score += star_score * 0.25;
        weight_sum += 0.25;
    }

    let radius_earth = crate::features::planet_radius_earth(target.planet_radius);
    let radius_score = if (0.5..=2.0).contains(&radius_earth) {
        1.0 - (radius_earth - 1.0).abs()
    } else {
        (0.3 - (radius_earth - 1.0).abs() / 3.0).max(0.0)
    };
    score += radius_score * 0.2;
    weight_sum += 0.2;

    if let Some(quality) = target.data_quality.as_deref() {
        score += encode_data_quality(Some(quality)) * 0.15;
        weight_sum += 0.15;
    }

    let mass_score = (1.0 - (target.stellar_mass - 1.0).abs()).max(0.0);
    score += mass_score * 0.1;
    weight_sum += 0.1;

    if weight_sum > 0.0 {
        (score / weight_sum) * 100.0
    } else {
        50.0
    }
}

/// Confidence in `[0, 100]` from data completeness and model certainty.
///
/// Completeness counts the six core inputs (distance, star type, planet
/// radius, orbital period, stellar mass, data quality). Model certainty is
/// the classifier's habitability probability when available, 0.8 otherwise.
/// Blend: `completeness · 0.6 + certainty · 0.4`, scaled to 100.
pub fn confidence(target: &CanonicalTarget, ml_predictions: &FastHashMap<String, f64>) -> f64 {
    // The five required inputs are always present on a canonical target;
    // data_quality is the only one that can be absent.
    let present = 5 + usize::from(target.data_quality.is_some());
    let completeness = present as f64 / 6.0;

    let model_certainty = ml_predictions
        .get("habitability_probability")
        .copied()
        .unwrap_or(0.8);

    ((completeness * 0.6 + model_certainty * 0.4) * 100.0).clamp(0.0, 100.0)
}

/// Per-component breakdown reported alongside the aggregate scores.
fn detailed_scores(target: &CanonicalTarget) -> FastHashMap<String, f64> {
    let radius_earth = crate::features::planet_radius_earth(target.planet_radius);

    let mut scores = FastHashMap::default();
    scores.insert(
        "distance_factor".to_string(),
        (100.0 - target.distance).clamp(0.0, 100.0),
    );
    scores.insert(
        "star_type_factor".to_string(),
        encode_star_type(&target.star_type) * 100.0,
    );
    scores.insert(
        "planet_size_factor".to_string(),
        (100.0 / ((radius_earth - 1.0).abs() + 1.0)).min(100.0),
    );
    scores.insert(
        "data_quality_factor".to_string(),
        encode_data_quality(target.data_quality.as_deref()) * 100.0,
    );
    scores
}

/// The scoring engine: one strategy, stateless per call.
pub struct ScoringEngine {
    strategy: Box<dyn ScoringStrategy>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        ScoringEngine::new(Box::new(HeuristicStrategy))
    }
}

impl ScoringEngine {
    pub fn new(strategy: Box<dyn ScoringStrategy>) -> Self {
        ScoringEngine { strategy }
    }

    /// Name of the active strategy, for summaries and logs.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Score a single target.
    ///
    /// Derives features fresh, computes the characterization score, asks the
    /// strategy for the habitability assessment, then assembles the final
    /// result. Strategy-level hard failures (e.g. a scaler width mismatch)
    /// propagate; the caller decides whether they abort a batch.
    pub fn score_target(&self, target: &CanonicalTarget) -> Result<ScoreResult, ExoscoreError> {
        let features = DerivedFeatures::from_target(target);

        let characterization = characterization_score(target);
        let assessment = self.strategy.assess_habitability(target, &features)?;
        let confidence = confidence(target, &assessment.predictions);
        let priority = Priority::from_characterization_score(characterization);

        Ok(ScoreResult {
            target_name: target.name.clone(),
            characterization_score: round1(characterization),
            habitability_score: round1(assessment.score),
            habitability_class: assessment.class,
            confidence: round1(confidence),
            priority,
            detailed_scores: detailed_scores(target),
            ml_predictions: assessment.predictions,
            original_data: None,
        })
    }
}

#[cfg(test)]
mod scoring_test {
    use super::*;

    fn proxima_like() -> CanonicalTarget {
        CanonicalTarget {
            name: "Alpha Cen candidate".to_string(),
            distance: 4.24,
            star_type: "G2V".to_string(),
            planet_radius: 0.1,
            orbital_period: 365.0,
            stellar_mass: 1.0,
            planet_mass: None,
            temperature: None,
            discovery_year: None,
            detection_method: None,
            data_quality: Some("Excellent".to_string()),
        }
    }

    #[test]
    fn test_nearby_earth_analog_is_high_priority() {
        let target = proxima_like();
        let score = characterization_score(&target);
        assert!(score > 75.0, "expected > 75, got {score}");
        assert_eq!(Priority::from_characterization_score(score), Priority::High);
    }

    #[test]
    fn test_score_is_bounded() {
        let mut target = proxima_like();
        for distance in [0.0, 5.0, 49.0, 51.0, 500.0] {
            target.distance = distance;
            let score = characterization_score(&target);
            assert!((0.0..=100.0).contains(&score), "distance {distance}: {score}");
        }
    }

    #[test]
    fn test_distant_target_excludes_distance_factor() {
        // Beyond 50 pc the distance factor is excluded (reweighted), not
        // scored as zero; the remaining factors keep the score well above
        // what a zero-distance-score sum would give.
        let mut target = proxima_like();
        target.distance = 200.0;
        let score = characterization_score(&target);
        // star 1.0*0.25 + radius 0.88*0.2 + quality 1.0*0.15 + mass 1.0*0.1
        // over weight 0.7.
        let expected = (0.25 + 0.88 * 0.2 + 0.15 + 0.1) / 0.7 * 100.0;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_priority_thresholds() {
        assert_eq!(Priority::from_characterization_score(75.0), Priority::High);
        assert_eq!(Priority::from_characterization_score(74.9), Priority::Medium);
        assert_eq!(Priority::from_characterization_score(50.0), Priority::Medium);
        assert_eq!(Priority::from_characterization_score(49.9), Priority::Low);
    }

    #[test]
    fn test_confidence_blend() {
        let target = proxima_like();
        let no_predictions = FastHashMap::default();
        // Full completeness, default certainty: (1.0*0.6 + 0.8*0.4)*100 = 92.
        assert_eq!(confidence(&target, &no_predictions), 92.0);

        let mut with_proba = FastHashMap::default();
        with_proba.insert("habitability_probability".to_string(), 1.0);
        assert_eq!(confidence(&target, &with_proba), 100.0);

        let mut no_quality = target.clone();
        no_quality.data_quality = None;
        let c = confidence(&no_quality, &no_predictions);
        assert!((c - (5.0 / 6.0 * 0.6 + 0.32) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_engine_default_is_heuristic() {
        let engine = ScoringEngine::default();
        assert_eq!(engine.strategy_name(), "heuristic");

        let result = engine.score_target(&proxima_like()).unwrap();
        assert_eq!(result.priority, Priority::High);
        assert_eq!(result.habitability_class, HabitabilityClass::Unknown);
        assert!(result.ml_predictions.is_empty());
        assert!((0.0..=100.0).contains(&result.habitability_score));
        assert!(result.detailed_scores.contains_key("planet_size_factor"));
    }
}
