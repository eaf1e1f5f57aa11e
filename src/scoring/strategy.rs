//! # Scoring strategies
//!
//! The seam between heuristic-only and model-augmented scoring. Both
//! strategies answer the same question — how habitable is this target, and
//! how sure are we — through [`ScoringStrategy::assess_habitability`].
//!
//! [`HeuristicStrategy`] needs nothing beyond the catalog row: it evaluates
//! the [SEPHI](super::sephi) composite and reports the class as
//! [`HabitabilityClass::Unknown`] since no classifier was consulted.
//!
//! [`ModelStrategy`] wraps a trained regressor and classifier behind the
//! [`HabitabilityModel`] trait plus the [`FeatureScaler`] fitted with them.
//! Model prediction failures degrade to the heuristic values with a warning;
//! only a scaler width mismatch is a hard error, since it means the caller
//! wired incompatible artifacts together.

use nalgebra::DMatrix;

use crate::catalog::CanonicalTarget;
use crate::constants::FastHashMap;
use crate::exoscore_errors::ExoscoreError;
use crate::features::{self, DerivedFeatures, CHARACTERIZATION_FEATURE_WIDTH};
use crate::model::{FeatureScaler, HabitabilityModel};

use super::sephi::sephi_score;
use super::HabitabilityClass;

/// What a strategy concludes about one target.
#[derive(Debug, Clone)]
pub struct HabitabilityAssessment {
    /// Habitability score in `[0, 100]`.
    pub score: f64,
    pub class: HabitabilityClass,
    /// Raw model outputs by name (empty for the heuristic).
    pub predictions: FastHashMap<String, f64>,
}

/// One way of assessing habitability.
pub trait ScoringStrategy: Send + Sync {
    /// Short identifier for summaries and logs.
    fn name(&self) -> &'static str;

    fn assess_habitability(
        &self,
        target: &CanonicalTarget,
        features: &DerivedFeatures,
    ) -> Result<HabitabilityAssessment, ExoscoreError>;
}

/// Pure-heuristic assessment: SEPHI scaled to `[0, 100]`, class unknown.
pub struct HeuristicStrategy;

impl HeuristicStrategy {
    fn assess(&self, target: &CanonicalTarget, features: &DerivedFeatures) -> HabitabilityAssessment {
        let stellar_temp = features::stellar_effective_temp(target.stellar_mass);
        let sephi = sephi_score(
            features.equilibrium_temp,
            features.radius_earth,
            stellar_temp,
            target.orbital_period,
            target.planet_mass,
            None,
        );

        HabitabilityAssessment {
            score: sephi.score * 100.0,
            class: HabitabilityClass::Unknown,
            predictions: FastHashMap::default(),
        }
    }
}

impl ScoringStrategy for HeuristicStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn assess_habitability(
        &self,
        target: &CanonicalTarget,
        features: &DerivedFeatures,
    ) -> Result<HabitabilityAssessment, ExoscoreError> {
        Ok(self.assess(target, features))
    }
}

/// Model-augmented assessment: regressor for the score, classifier for the
/// class, heuristic values kept wherever a model declines to answer.
pub struct ModelStrategy {
    regressor: Box<dyn HabitabilityModel>,
    classifier: Box<dyn HabitabilityModel>,
    scaler: FeatureScaler,
}

impl ModelStrategy {
    pub fn new(
        regressor: Box<dyn HabitabilityModel>,
        classifier: Box<dyn HabitabilityModel>,
        scaler: FeatureScaler,
    ) -> Self {
        ModelStrategy {
            regressor,
            classifier,
            scaler,
        }
    }
}

impl ScoringStrategy for ModelStrategy {
    fn name(&self) -> &'static str {
        "model"
    }

    fn assess_habitability(
        &self,
        target: &CanonicalTarget,
        features: &DerivedFeatures,
    ) -> Result<HabitabilityAssessment, ExoscoreError> {
        let mut assessment = HeuristicStrategy.assess(target, features);

        let vector = features.characterization_vector(target);
        let matrix = DMatrix::from_row_slice(1, CHARACTERIZATION_FEATURE_WIDTH, &vector);
        let scaled = self.scaler.transform(&matrix)?;

        match self.regressor.predict(&scaled) {
            Ok(scores) if !scores.is_empty() => {
                let score = (scores[0] * 100.0).clamp(0.0, 100.0);
                assessment.score = score;
                assessment
                    .predictions
                    .insert("habitability_regression".to_string(), scores[0]);
            }
            Ok(_) => {
                log::warn!(
                    "regressor returned no prediction for {}, keeping heuristic score",
                    target.name
                );
            }
            Err(err) => {
                log::warn!(
                    "regressor failed for {}: {err}, keeping heuristic score",
                    target.name
                );
            }
        }

        match self.classifier.predict(&scaled) {
            Ok(labels) if !labels.is_empty() => {
                assessment.class = if labels[0].round() == 1.0 {
                    HabitabilityClass::PotentiallyHabitable
                } else {
                    HabitabilityClass::NotHabitable
                };
                assessment
                    .predictions
                    .insert("habitability_classification".to_string(), labels[0]);

                if let Some(proba) = self.classifier.predict_proba(&scaled) {
                    if proba.nrows() > 0 {
                        let max = proba
                            .row(0)
                            .iter()
                            .copied()
                            .fold(f64::NEG_INFINITY, f64::max);
                        assessment
                            .predictions
                            .insert("habitability_probability".to_string(), max);
                    }
                }
            }
            Ok(_) => {
                log::warn!(
                    "classifier returned no prediction for {}, keeping heuristic class",
                    target.name
                );
            }
            Err(err) => {
                log::warn!(
                    "classifier failed for {}: {err}, keeping heuristic class",
                    target.name
                );
            }
        }

        Ok(assessment)
    }
}

#[cfg(test)]
mod strategy_test {
    use nalgebra::DVector;

    use super::*;
    use crate::constants::EARTH_RADII_PER_JUPITER;

    struct ConstantModel {
        value: f64,
        proba: Option<Vec<f64>>,
    }

    impl HabitabilityModel for ConstantModel {
        fn predict(&self, features: &DMatrix<f64>) -> Result<DVector<f64>, ExoscoreError> {
            Ok(DVector::from_element(features.nrows(), self.value))
        }

        fn predict_proba(&self, features: &DMatrix<f64>) -> Option<DMatrix<f64>> {
            self.proba.as_ref().map(|row| {
                DMatrix::from_fn(features.nrows(), row.len(), |_, c| row[c])
            })
        }
    }

    struct FailingModel;

    impl HabitabilityModel for FailingModel {
        fn predict(&self, _features: &DMatrix<f64>) -> Result<DVector<f64>, ExoscoreError> {
            Err(ExoscoreError::EmptyPrediction("no output".to_string()))
        }
    }

    fn earth_analog() -> CanonicalTarget {
        CanonicalTarget {
            name: "Kepler test".to_string(),
            distance: 10.0,
            star_type: "G2V".to_string(),
            planet_radius: 1.0 / EARTH_RADII_PER_JUPITER,
            orbital_period: 365.0,
            stellar_mass: 1.0,
            planet_mass: Some(1.0),
            temperature: Some(288.0),
            discovery_year: None,
            detection_method: None,
            data_quality: Some("Good".to_string()),
        }
    }

    fn identity_scaler() -> FeatureScaler {
        FeatureScaler::new(
            vec![0.0; CHARACTERIZATION_FEATURE_WIDTH],
            vec![1.0; CHARACTERIZATION_FEATURE_WIDTH],
        )
        .unwrap()
    }

    #[test]
    fn test_heuristic_earth_analog_scores_high() {
        let target = earth_analog();
        let features = DerivedFeatures::from_target(&target);
        let assessment = HeuristicStrategy
            .assess_habitability(&target, &features)
            .unwrap();

        assert!(assessment.score > 80.0, "score = {}", assessment.score);
        assert_eq!(assessment.class, HabitabilityClass::Unknown);
        assert!(assessment.predictions.is_empty());
    }

    #[test]
    fn test_model_strategy_overrides_heuristic() {
        let strategy = ModelStrategy::new(
            Box::new(ConstantModel {
                value: 0.9,
                proba: None,
            }),
            Box::new(ConstantModel {
                value: 1.0,
                proba: Some(vec![0.2, 0.8]),
            }),
            identity_scaler(),
        );

        let target = earth_analog();
        let features = DerivedFeatures::from_target(&target);
        let assessment = strategy.assess_habitability(&target, &features).unwrap();

        assert_eq!(assessment.score, 90.0);
        assert_eq!(assessment.class, HabitabilityClass::PotentiallyHabitable);
        assert_eq!(
            assessment.predictions.get("habitability_regression"),
            Some(&0.9)
        );
        assert_eq!(
            assessment.predictions.get("habitability_classification"),
            Some(&1.0)
        );
        assert_eq!(
            assessment.predictions.get("habitability_probability"),
            Some(&0.8)
        );
    }

    #[test]
    fn test_model_failure_falls_back_to_heuristic() {
        let strategy = ModelStrategy::new(
            Box::new(FailingModel),
            Box::new(FailingModel),
            identity_scaler(),
        );

        let target = earth_analog();
        let features = DerivedFeatures::from_target(&target);
        let assessment = strategy.assess_habitability(&target, &features).unwrap();
        let heuristic = HeuristicStrategy
            .assess_habitability(&target, &features)
            .unwrap();

        assert_eq!(assessment.score, heuristic.score);
        assert_eq!(assessment.class, HabitabilityClass::Unknown);
        assert!(assessment.predictions.is_empty());
    }

    #[test]
    fn test_scaler_mismatch_is_a_hard_error() {
        let strategy = ModelStrategy::new(
            Box::new(ConstantModel {
                value: 0.5,
                proba: None,
            }),
            Box::new(ConstantModel {
                value: 0.0,
                proba: None,
            }),
            FeatureScaler::new(vec![0.0; 4], vec![1.0; 4]).unwrap(),
        );

        let target = earth_analog();
        let features = DerivedFeatures::from_target(&target);
        let err = strategy.assess_habitability(&target, &features).unwrap_err();
        assert_eq!(
            err,
            ExoscoreError::FeatureDimensionMismatch {
                expected: 4,
                got: CHARACTERIZATION_FEATURE_WIDTH,
            }
        );
    }

    #[test]
    fn test_classifier_zero_label_is_not_habitable() {
        let strategy = ModelStrategy::new(
            Box::new(ConstantModel {
                value: 0.1,
                proba: None,
            }),
            Box::new(ConstantModel {
                value: 0.0,
                proba: None,
            }),
            identity_scaler(),
        );

        let target = earth_analog();
        let features = DerivedFeatures::from_target(&target);
        let assessment = strategy.assess_habitability(&target, &features).unwrap();
        assert_eq!(assessment.class, HabitabilityClass::NotHabitable);
        assert!(!assessment
            .predictions
            .contains_key("habitability_probability"));
    }
}
