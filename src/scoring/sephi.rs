//! # SEPHI — Standard Exoplanet Planetary Habitability Index
//!
//! Composite habitability index over four components, each clamped to
//! `[0, 1]` and combined with fixed weights:
//!
//! | component   | weight | optimum          |
//! |-------------|--------|------------------|
//! | temperature | 0.35   | 288 K            |
//! | size        | 0.25   | 1 R⊕             |
//! | stellar     | 0.20   | 5778 K           |
//! | orbital     | 0.20   | 365 d            |
//!
//! Each component has an optimal band scoring near 1 and a broader band
//! scoring around 0.5, decaying linearly with distance from the Earth-like
//! optimum; outside the broad band the component is 0. The size component is
//! further scaled by a density-ratio plausibility check when a mass is
//! available, and the stellar component by an age plausibility check when a
//! stellar age (Gyr) is known.

use serde::Serialize;

use crate::constants::{Days, EarthRadius, Kelvin, EARTH_ORBIT_DAYS, EARTH_TEMP_K, SOL_TEMP_K};

const TEMPERATURE_WEIGHT: f64 = 0.35;
const SIZE_WEIGHT: f64 = 0.25;
const STELLAR_WEIGHT: f64 = 0.20;
const ORBITAL_WEIGHT: f64 = 0.20;

/// Per-component SEPHI scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SephiComponents {
    pub temperature: f64,
    pub size: f64,
    pub stellar: f64,
    pub orbital: f64,
}

/// SEPHI verdict: weighted composite plus its component breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SephiScore {
    /// Weighted composite in `[0, 1]`.
    pub score: f64,
    pub components: SephiComponents,
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Temperature component: liquid-water potential.
///
/// Optimal 250–350 K peaking at 288 K; 150–450 K might support exotic
/// biochemistry and scores at most 0.5; outside that, 0.
pub fn temperature_score(equilibrium_temp: Kelvin) -> f64 {
    let deviation = (equilibrium_temp - EARTH_TEMP_K).abs();
    let score = if (250.0..=350.0).contains(&equilibrium_temp) {
        1.0 - deviation / 100.0
    } else if (150.0..=450.0).contains(&equilibrium_temp) {
        0.5 - deviation / 200.0
    } else {
        0.0
    };
    clamp01(score)
}

/// Size component: atmosphere retention and surface gravity.
///
/// Optimal 0.8–1.4 R⊕; super-Earths and mini-Neptunes up to 2.5 R⊕ score at
/// most 0.5. When a mass is available, an implausible Earth-relative density
/// ratio (`m/r³` outside 0.7–1.5) halves the score.
pub fn size_score(radius: EarthRadius, mass: Option<f64>) -> f64 {
    let deviation = (radius - 1.0).abs();
    let mut score = if (0.8..=1.4).contains(&radius) {
        1.0 - deviation / 0.6
    } else if (0.5..=2.5).contains(&radius) {
        0.5 - deviation / 2.0
    } else {
        0.0
    };

    if let Some(mass) = mass {
        let density_ratio = mass / radius.powi(3);
        if !(0.7..=1.5).contains(&density_ratio) {
            score *= 0.5;
        }
    }

    clamp01(score)
}

/// Stellar component: stable conditions for life.
///
/// Optimal 4500–6500 K (K to F stars) peaking at 5778 K; 2400–7500 K scores
/// at most 0.5. When the stellar age (Gyr) is known, 1–10 Gyr is fully
/// plausible, 0.5–12 Gyr scales by 0.7, anything else by 0.3.
pub fn stellar_score(stellar_temp: Kelvin, stellar_age: Option<f64>) -> f64 {
    let deviation = (stellar_temp - SOL_TEMP_K).abs();
    let mut score = if (4500.0..=6500.0).contains(&stellar_temp) {
        1.0 - deviation / 2000.0
    } else if (2400.0..=7500.0).contains(&stellar_temp) {
        0.5 - deviation / 4000.0
    } else {
        0.0
    };

    if let Some(age) = stellar_age {
        score *= if (1.0..=10.0).contains(&age) {
            1.0
        } else if (0.5..=12.0).contains(&age) {
            0.7
        } else {
            0.3
        };
    }

    clamp01(score)
}

/// Orbital component: stable climate cycles.
///
/// Optimal 200–500 d peaking at 365 d; 50–700 d scores at most 0.5.
pub fn orbital_score(orbital_period: Days) -> f64 {
    let deviation = (orbital_period - EARTH_ORBIT_DAYS).abs();
    let score = if (200.0..=500.0).contains(&orbital_period) {
        1.0 - deviation / 300.0
    } else if (50.0..=700.0).contains(&orbital_period) {
        0.5 - deviation / 600.0
    } else {
        0.0
    };
    clamp01(score)
}

/// Overall SEPHI score for one planet.
///
/// Arguments
/// -----------------
/// * `equilibrium_temp`: planet equilibrium temperature in Kelvin.
/// * `radius`: planet radius in Earth radii.
/// * `stellar_temp`: host star effective temperature in Kelvin.
/// * `orbital_period`: orbital period in days.
/// * `mass`: optional planet mass in Earth masses.
/// * `stellar_age`: optional stellar age in Gyr.
///
/// Return
/// ----------
/// * A [`SephiScore`] with the weighted composite in `[0, 1]` and the four
///   component scores.
pub fn sephi_score(
    equilibrium_temp: Kelvin,
    radius: EarthRadius,
    stellar_temp: Kelvin,
    orbital_period: Days,
    mass: Option<f64>,
    stellar_age: Option<f64>,
) -> SephiScore {
    let components = SephiComponents {
        temperature: temperature_score(equilibrium_temp),
        size: size_score(radius, mass),
        stellar: stellar_score(stellar_temp, stellar_age),
        orbital: orbital_score(orbital_period),
    };

    let score = components.temperature * TEMPERATURE_WEIGHT
        + components.size * SIZE_WEIGHT
        + components.stellar * STELLAR_WEIGHT
        + components.orbital * ORBITAL_WEIGHT;

    SephiScore { score, components }
}

#[cfg(test)]
mod sephi_test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_earth_is_maximally_habitable() {
        let result = sephi_score(288.0, 1.0, 5778.0, 365.0, Some(1.0), Some(4.6));
        assert!((result.score - 1.0).abs() < 0.05, "score = {}", result.score);
        assert_relative_eq!(result.components.temperature, 1.0);
        assert_relative_eq!(result.components.size, 1.0);
        assert_relative_eq!(result.components.stellar, 1.0);
        assert_relative_eq!(result.components.orbital, 1.0);
    }

    #[test]
    fn test_components_stay_in_unit_interval() {
        for temp in [0.0, 150.0, 288.0, 449.0, 1200.0] {
            for radius in [0.1, 0.8, 1.0, 2.4, 12.0] {
                for period in [1.0, 51.0, 365.0, 699.0, 5000.0] {
                    let result = sephi_score(temp, radius, 5000.0, period, None, None);
                    let c = result.components;
                    for value in [c.temperature, c.size, c.stellar, c.orbital, result.score] {
                        assert!((0.0..=1.0).contains(&value), "{value} out of range");
                    }
                }
            }
        }
    }

    #[test]
    fn test_temperature_bands() {
        assert_relative_eq!(temperature_score(288.0), 1.0);
        assert_relative_eq!(temperature_score(338.0), 0.5);
        // Broader band is capped below the optimal band.
        assert!(temperature_score(200.0) <= 0.5);
        assert_eq!(temperature_score(1000.0), 0.0);
        assert_eq!(temperature_score(100.0), 0.0);
    }

    #[test]
    fn test_size_density_check() {
        // Earth-like radius and mass: density ratio 1, no penalty.
        assert_relative_eq!(size_score(1.0, Some(1.0)), 1.0);
        // Implausibly light for its size: halved.
        let puffy = size_score(1.0, Some(0.1));
        assert_relative_eq!(puffy, 0.5);
        assert_eq!(size_score(4.0, None), 0.0);
    }

    #[test]
    fn test_stellar_age_scaling() {
        let young = stellar_score(5778.0, Some(0.1));
        let mature = stellar_score(5778.0, Some(4.6));
        let borderline = stellar_score(5778.0, Some(11.0));
        assert_relative_eq!(mature, 1.0);
        assert_relative_eq!(borderline, 0.7);
        assert_relative_eq!(young, 0.3);
    }

    #[test]
    fn test_hot_jupiter_scores_poorly() {
        // 1200 K, 12 R⊕, 3-day orbit around an F star.
        let result = sephi_score(1200.0, 12.0, 6500.0, 3.0, None, None);
        assert!(result.score < 0.2, "hot Jupiter scored {}", result.score);
    }
}
