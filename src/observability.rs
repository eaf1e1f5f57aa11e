//! # Direct-imaging observability geometry
//!
//! A separate sub-pipeline estimating whether a target is feasible for
//! direct-imaging characterization with a given telescope: planet–star
//! angular separation, reflected-light contrast ratio, the diffraction-limit
//! diameter required to resolve the pair, and a combined feasibility score.
//!
//! ## Conventions
//!
//! - Separations in **milli-arcseconds**, distances in **parsecs**,
//!   semi-major axes in **AU**.
//! - The contrast model is reflected light only, `A · (R_p / R_star)²` with
//!   the star approximated as one solar radius.
//! - Scores are clamped to `[0, 1]`.

use serde::{Deserialize, Serialize};

use crate::catalog::CanonicalTarget;
use crate::constants::{
    Au, Mas, Meter, Parsec, AU_METERS, DIFFRACTION_COEFF, PARSEC_METERS, RAD_TO_MAS,
    SUN_RADIUS_EARTH,
};
use crate::features::DerivedFeatures;

/// Default Bond albedo for the reflected-light contrast estimate.
const DEFAULT_ALBEDO: f64 = 0.3;

/// Floor applied to the contrast ratio to keep the log mapping finite.
const CONTRAST_FLOOR: f64 = 1e-12;

/// Multiplier on the diffraction limit accounting for the coronagraph inner
/// working angle.
const DEFAULT_IWA_FACTOR: f64 = 2.0;

/// Spectral band used for the diffraction-limit estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavelengthBand {
    Uv,
    Visible,
    Nir,
}

impl WavelengthBand {
    /// Central wavelength of the band in microns.
    pub fn wavelength_micron(&self) -> f64 {
        match self {
            WavelengthBand::Uv => 0.25,
            WavelengthBand::Visible => 0.55,
            WavelengthBand::Nir => 1.6,
        }
    }
}

/// Telescope and coronagraph assumptions for feasibility scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityParams {
    pub telescope_diameter_m: Meter,
    pub wavelength_band: WavelengthBand,
    pub inner_working_angle_mas: Mas,
    /// Faintest planet/star contrast the instrument can detect.
    pub contrast_sensitivity: f64,
}

impl Default for ObservabilityParams {
    fn default() -> Self {
        ObservabilityParams {
            telescope_diameter_m: 6.0,
            wavelength_band: WavelengthBand::Visible,
            inner_working_angle_mas: 75.0,
            contrast_sensitivity: 1e-10,
        }
    }
}

/// Observability verdict for one target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservabilityResult {
    pub separation_mas: Mas,
    pub contrast_ratio: f64,
    pub required_diameter_m: Meter,
    pub spectroscopic_score: f64,
    pub iwa_score: f64,
    /// Combined feasibility in `[0, 1]`.
    pub observability_score: f64,
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Planet–star angular separation in milli-arcseconds.
///
/// Small-angle approximation `θ = a / d`, converted rad → mas. Non-physical
/// inputs (zero or negative distance/axis) yield 0.
pub fn angular_separation_mas(semi_major_axis: Au, distance: Parsec) -> Mas {
    if distance <= 0.0 || semi_major_axis <= 0.0 {
        return 0.0;
    }
    let theta_rad = (semi_major_axis * AU_METERS) / (distance * PARSEC_METERS);
    theta_rad * RAD_TO_MAS
}

/// Reflected-light planet/star contrast ratio.
///
/// `A · (R_p / R_star)²` with the host approximated as one solar radius
/// (109 Earth radii); floored at 1e-12 so the spectroscopic log mapping
/// stays finite. A non-positive radius yields 0.
pub fn contrast_ratio(planet_radius_earth: f64, albedo: f64) -> f64 {
    if planet_radius_earth <= 0.0 {
        return 0.0;
    }
    (albedo * (planet_radius_earth / SUN_RADIUS_EARTH).powi(2)).max(CONTRAST_FLOOR)
}

/// Telescope diameter required to resolve the separation.
///
/// Diffraction limit `θ = 1.22 λ / D` solved for `D`, scaled by the inner
/// working angle factor. An unresolvable (zero) separation requires an
/// infinite aperture.
pub fn required_telescope_diameter_m(
    separation: Mas,
    band: WavelengthBand,
    iwa_factor: f64,
) -> Meter {
    if separation <= 0.0 {
        return f64::INFINITY;
    }
    let theta_rad = separation / RAD_TO_MAS;
    let diameter = DIFFRACTION_COEFF * (band.wavelength_micron() * 1e-6) / theta_rad;
    diameter * iwa_factor
}

/// Spectroscopic feasibility in `[0, 1]` from the contrast margin.
///
/// Log-scale mapping: 1 when the contrast is 10× better than the
/// sensitivity limit, 0 when 10× worse.
pub fn spectroscopic_feasibility(contrast: f64, contrast_limit: f64) -> f64 {
    if contrast_limit <= 0.0 {
        return 0.0;
    }
    let ratio = contrast_limit / contrast.max(1e-20);
    clamp01((ratio.log10() + 1.0) / 2.0)
}

/// Inner-working-angle score in `[0, 1]`.
///
/// 0 below half the IWA, approaching 1 as the separation clears 1.5× IWA.
pub fn iwa_score(separation: Mas, inner_working_angle: Mas) -> f64 {
    if inner_working_angle <= 0.0 || separation <= 0.0 {
        return 0.0;
    }
    clamp01(separation / inner_working_angle - 0.5)
}

/// Full observability assessment for one target.
///
/// Combines the IWA score (0.4), spectroscopic feasibility (0.4), and an
/// aperture-margin term (0.2) comparing the required diameter against the
/// assumed telescope.
pub fn compute_observability(
    target: &CanonicalTarget,
    features: &DerivedFeatures,
    params: &ObservabilityParams,
) -> ObservabilityResult {
    let separation = angular_separation_mas(features.semi_major_axis, target.distance);
    let contrast = contrast_ratio(features.radius_earth, DEFAULT_ALBEDO);
    let required_diameter =
        required_telescope_diameter_m(separation, params.wavelength_band, DEFAULT_IWA_FACTOR);
    let spectroscopic = spectroscopic_feasibility(contrast, params.contrast_sensitivity);
    let iwa = iwa_score(separation, params.inner_working_angle_mas);

    // An unresolvable pair needs an infinite aperture; the margin term must
    // collapse to 0, not propagate inf/inf.
    let aperture_margin = if required_diameter.is_finite() {
        clamp01(
            1.0 - ((required_diameter - params.telescope_diameter_m).max(0.0)
                / required_diameter.max(1e-6)),
        )
    } else {
        0.0
    };
    let combined = 0.4 * iwa + 0.4 * spectroscopic + 0.2 * aperture_margin;

    ObservabilityResult {
        separation_mas: separation,
        contrast_ratio: contrast,
        required_diameter_m: required_diameter,
        spectroscopic_score: spectroscopic,
        iwa_score: iwa,
        observability_score: clamp01(combined),
    }
}

/// Score a batch of targets against one telescope configuration, preserving
/// input order.
pub fn score_batch(
    targets: &[CanonicalTarget],
    params: &ObservabilityParams,
) -> Vec<ObservabilityResult> {
    targets
        .iter()
        .map(|target| {
            let features = DerivedFeatures::from_target(target);
            compute_observability(target, &features, params)
        })
        .collect()
}
