//! # External prediction model collaborator
//!
//! The trained regressor/classifier artifacts are opaque to this crate: they
//! are reachable only through the [`HabitabilityModel`] trait, a black box
//! taking a scaled feature matrix and returning one score per row. The crate
//! must keep working with no model at all — heuristic-only mode is the
//! default and the fallback whenever a collaborator misbehaves.
//!
//! This module also holds the [`FeatureScaler`] (per-column standardizer
//! applied before prediction) and the **dataset-wide** feature builder: six
//! catalog columns plus SI-derived quantities (bulk density, surface
//! gravity, stellar flux from Stefan–Boltzmann, orbital velocity), the
//! contract used by the whole-dataset predictor.

use nalgebra::{DMatrix, DVector};

use crate::catalog::CanonicalTarget;
use crate::constants::{
    EARTH_MASS_KG, EARTH_RADIUS_M, G_SI, SECONDS_PER_DAY, STEFAN_BOLTZMANN, SUN_MASS_KG,
    SUN_RADIUS_M,
};
use crate::exoscore_errors::ExoscoreError;
use crate::features::{self, DerivedFeatures};

/// Width of the dataset-wide feature matrix: 6 catalog columns + 4 derived.
pub const DATASET_FEATURE_WIDTH: usize = 10;

/// Black-box prediction capability of a trained model.
///
/// Implementations are external collaborators; the crate never inspects the
/// model beyond these two calls.
pub trait HabitabilityModel: Send + Sync {
    /// One predicted score per input row.
    fn predict(&self, features: &DMatrix<f64>) -> Result<DVector<f64>, ExoscoreError>;

    /// Per-class probabilities, one row per input row, when the model
    /// supports them.
    fn predict_proba(&self, features: &DMatrix<f64>) -> Option<DMatrix<f64>> {
        let _ = features;
        None
    }
}

/// Per-column standardizer `(x − µ) / σ` fitted offline with the model.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScaler {
    means: DVector<f64>,
    stds: DVector<f64>,
}

impl FeatureScaler {
    /// Build a scaler from fitted column means and standard deviations.
    ///
    /// Return
    /// ----------
    /// * The scaler, or [`ExoscoreError::FeatureDimensionMismatch`] when the
    ///   two vectors disagree in length.
    pub fn new(means: Vec<f64>, stds: Vec<f64>) -> Result<Self, ExoscoreError> {
        if means.len() != stds.len() {
            return Err(ExoscoreError::FeatureDimensionMismatch {
                expected: means.len(),
                got: stds.len(),
            });
        }
        Ok(FeatureScaler {
            means: DVector::from_vec(means),
            stds: DVector::from_vec(stds),
        })
    }

    /// Number of feature columns the scaler was fitted with.
    pub fn width(&self) -> usize {
        self.means.len()
    }

    /// Standardize a feature matrix column-wise.
    ///
    /// Columns with a non-positive fitted deviation pass through centered
    /// but unscaled.
    pub fn transform(&self, features: &DMatrix<f64>) -> Result<DMatrix<f64>, ExoscoreError> {
        if features.ncols() != self.width() {
            return Err(ExoscoreError::FeatureDimensionMismatch {
                expected: self.width(),
                got: features.ncols(),
            });
        }

        let mut scaled = features.clone();
        for col in 0..scaled.ncols() {
            let mean = self.means[col];
            let std = self.stds[col];
            let divisor = if std > 0.0 { std } else { 1.0 };
            for row in 0..scaled.nrows() {
                scaled[(row, col)] = (scaled[(row, col)] - mean) / divisor;
            }
        }
        Ok(scaled)
    }
}

/// Dataset-wide feature row for one target, in the predictor's column order.
///
/// Catalog columns `[radius_e, mass_e, eq_temp_k, stellar_teff_k, period_d,
/// distance_pc]` followed by SI-derived `[density kg/m³, surface gravity
/// m/s², stellar flux W/m², orbital velocity m/s]`. The stellar radius is
/// approximated as `R ≈ M` in solar units. A missing planet mass is filled
/// with `r³` — the predictor was fitted with that imputation, not the
/// rocky/gas relation the heuristics use.
pub fn dataset_feature_row(target: &CanonicalTarget, features: &DerivedFeatures) -> Vec<f64> {
    let mass_earth = target
        .planet_mass
        .unwrap_or_else(|| features.radius_earth.powi(3));

    let radius_m = features.radius_earth * EARTH_RADIUS_M;
    let mass_kg = mass_earth * EARTH_MASS_KG;

    let (density, surface_gravity) = if radius_m > 0.0 {
        (
            mass_kg / ((4.0 / 3.0) * std::f64::consts::PI * radius_m.powi(3)),
            G_SI * mass_kg / radius_m.powi(2),
        )
    } else {
        (0.0, 0.0)
    };

    let stellar_teff = features::stellar_effective_temp(target.stellar_mass);
    let stellar_radius_m = target.stellar_mass * SUN_RADIUS_M;

    let (stellar_flux, orbital_velocity) = if target.orbital_period > 0.0 {
        let period_s = target.orbital_period * SECONDS_PER_DAY;
        let stellar_mass_kg = target.stellar_mass * SUN_MASS_KG;
        // Kepler's third law in SI for the semi-major axis.
        let a_m = (G_SI * stellar_mass_kg * period_s.powi(2)
            / (4.0 * std::f64::consts::PI.powi(2)))
        .cbrt();

        let flux = if a_m > 0.0 {
            STEFAN_BOLTZMANN * stellar_teff.powi(4) * stellar_radius_m.powi(2) / a_m.powi(2)
        } else {
            0.0
        };
        (flux, 2.0 * std::f64::consts::PI * a_m / period_s)
    } else {
        (0.0, 0.0)
    };

    let row = vec![
        features.radius_earth,
        mass_earth,
        features.equilibrium_temp,
        stellar_teff,
        target.orbital_period,
        target.distance,
        density,
        surface_gravity,
        stellar_flux,
        orbital_velocity,
    ];

    features::fit_feature_width(row, DATASET_FEATURE_WIDTH)
}

/// Assemble the dataset-wide feature matrix for a batch of targets,
/// preserving input order.
pub fn dataset_feature_matrix(targets: &[CanonicalTarget]) -> DMatrix<f64> {
    let rows: Vec<Vec<f64>> = targets
        .iter()
        .map(|target| {
            let features = DerivedFeatures::from_target(target);
            dataset_feature_row(target, &features)
        })
        .collect();

    DMatrix::from_fn(targets.len(), DATASET_FEATURE_WIDTH, |r, c| rows[r][c])
}
