//! # CDHS — Comprehensive Distance Habitability Score
//!
//! Alternative habitability composite using distance-from-optimum linear
//! decay, normalized by the interval half-widths. Outside the acceptable
//! interval a component scores 0; at the optimum it scores 1.
//!
//! Components: temperature (0.35), radius (0.25), stellar flux (0.20), and
//! orbital stability (0.20) — stability blending eccentricity (lower is
//! better, 0.6) with period proximity to a 100–1000-day band (0.4).
//!
//! Exposed alongside [SEPHI](super::sephi); callers choose which definition
//! of "habitability" applies.

use serde::Serialize;

use crate::constants::{Days, EarthRadius, Kelvin};

/// Habitability criteria thresholds and weights.
///
/// Defaults are the liquid-water ranges relative to Earth = 1 units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HabitabilityCriteria {
    pub temp_min: Kelvin,
    pub temp_max: Kelvin,
    pub temp_optimal: Kelvin,

    pub radius_min: EarthRadius,
    pub radius_max: EarthRadius,
    pub radius_optimal: EarthRadius,

    /// Stellar flux at the planet, Earth = 1.
    pub flux_min: f64,
    pub flux_max: f64,
    pub flux_optimal: f64,

    pub temp_weight: f64,
    pub radius_weight: f64,
    pub flux_weight: f64,
    pub stability_weight: f64,
}

impl Default for HabitabilityCriteria {
    fn default() -> Self {
        HabitabilityCriteria {
            temp_min: 273.0,
            temp_max: 373.0,
            temp_optimal: 288.0,
            radius_min: 0.5,
            radius_max: 1.5,
            radius_optimal: 1.0,
            flux_min: 0.5,
            flux_max: 2.0,
            flux_optimal: 1.0,
            temp_weight: 0.35,
            radius_weight: 0.25,
            flux_weight: 0.20,
            stability_weight: 0.20,
        }
    }
}

/// Per-component CDHS breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CdhsBreakdown {
    pub temperature_score: f64,
    pub radius_score: f64,
    pub flux_score: f64,
    pub stability_score: f64,
    /// Weighted composite in `[0, 1]`.
    pub cdhs_total: f64,
}

/// The CDHS algorithm with its criteria.
#[derive(Debug, Clone, Default)]
pub struct CdhsAlgorithm {
    criteria: HabitabilityCriteria,
}

/// Linear distance-from-optimum score over `[min, max]`, 1 at the optimum.
fn distance_score(value: f64, min: f64, max: f64, optimal: f64) -> f64 {
    if value < min || value > max {
        return 0.0;
    }
    let distance = (value - optimal).abs();
    let max_distance = (optimal - min).max(max - optimal);
    (1.0 - distance / max_distance).max(0.0)
}

impl CdhsAlgorithm {
    pub fn new(criteria: HabitabilityCriteria) -> Self {
        CdhsAlgorithm { criteria }
    }

    pub fn temperature_score(&self, temp: Kelvin) -> f64 {
        let c = &self.criteria;
        distance_score(temp, c.temp_min, c.temp_max, c.temp_optimal)
    }

    pub fn radius_score(&self, radius: EarthRadius) -> f64 {
        let c = &self.criteria;
        distance_score(radius, c.radius_min, c.radius_max, c.radius_optimal)
    }

    pub fn flux_score(&self, flux: f64) -> f64 {
        let c = &self.criteria;
        distance_score(flux, c.flux_min, c.flux_max, c.flux_optimal)
    }

    /// Orbital-stability score from eccentricity and period.
    ///
    /// Eccentricity contributes `1 − e` (weight 0.6); the period contributes
    /// 1 inside the 100–1000-day band, otherwise a linear penalty on the
    /// deviation from 365 days (weight 0.4).
    pub fn stability_score(&self, eccentricity: f64, orbital_period: Days) -> f64 {
        let ecc_score = (1.0 - eccentricity).max(0.0);

        let period_score = if orbital_period > 0.0 {
            if (100.0..=1000.0).contains(&orbital_period) {
                1.0
            } else {
                (1.0 - (orbital_period - 365.0).abs() / 1000.0).max(0.0)
            }
        } else {
            1.0
        };

        ecc_score * 0.6 + period_score * 0.4
    }

    /// Weighted CDHS composite in `[0, 1]`.
    ///
    /// Arguments
    /// -----------------
    /// * `temperature`: equilibrium temperature in Kelvin.
    /// * `radius`: planet radius in Earth radii.
    /// * `stellar_flux`: flux at the planet, Earth = 1.
    /// * `eccentricity`: orbital eccentricity in `[0, 1]`.
    /// * `orbital_period`: orbital period in days.
    pub fn cdhs(
        &self,
        temperature: Kelvin,
        radius: EarthRadius,
        stellar_flux: f64,
        eccentricity: f64,
        orbital_period: Days,
    ) -> f64 {
        let c = &self.criteria;
        let score = self.temperature_score(temperature) * c.temp_weight
            + self.radius_score(radius) * c.radius_weight
            + self.flux_score(stellar_flux) * c.flux_weight
            + self.stability_score(eccentricity, orbital_period) * c.stability_weight;
        score.clamp(0.0, 1.0)
    }

    /// Composite plus its component breakdown.
    pub fn breakdown(
        &self,
        temperature: Kelvin,
        radius: EarthRadius,
        stellar_flux: f64,
        eccentricity: f64,
        orbital_period: Days,
    ) -> CdhsBreakdown {
        CdhsBreakdown {
            temperature_score: self.temperature_score(temperature),
            radius_score: self.radius_score(radius),
            flux_score: self.flux_score(stellar_flux),
            stability_score: self.stability_score(eccentricity, orbital_period),
            cdhs_total: self.cdhs(temperature, radius, stellar_flux, eccentricity, orbital_period),
        }
    }
}
