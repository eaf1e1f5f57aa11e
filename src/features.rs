//! # Derived astrophysical features
//!
//! Pure functions turning raw catalog fields into the physical quantities
//! the scoring heuristics and the external model consume: semi-major axis
//! (Kepler's third law in solar units), stellar luminosity, habitable-zone
//! bounds, mass/temperature estimates, density, and the categorical
//! encodings for star type, detection method, and data quality.
//!
//! Everything here is stateless and deterministic — identical input yields
//! identical output, no I/O. All outputs are sanitized: `NaN` becomes `0`,
//! `±∞` becomes `±1e6`, so downstream arithmetic never sees a non-finite
//! value.

use log::warn;

use crate::catalog::CanonicalTarget;
use crate::constants::{
    Au, Days, EarthMass, EarthRadius, JupiterRadius, Kelvin, SolarMass, AU_METERS,
    DAYS_PER_YEAR, EARTH_RADII_PER_JUPITER, EQ_TEMP_COEFF_K, INNER_HZ_COEFF, NEG_INF_CLAMP,
    OUTER_HZ_COEFF, POS_INF_CLAMP, SECONDS_PER_DAY,
};

/// Width of the characterization feature vector expected by the trained model.
pub const CHARACTERIZATION_FEATURE_WIDTH: usize = 18;

/// Fallback discovery year when the catalog does not provide one.
const DEFAULT_DISCOVERY_YEAR: f64 = 2020.0;

/// Replace non-finite values before they reach downstream arithmetic.
pub fn sanitize(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else if value == f64::INFINITY {
        POS_INF_CLAMP
    } else if value == f64::NEG_INFINITY {
        NEG_INF_CLAMP
    } else {
        value
    }
}

/// Convert a planet radius from Jupiter radii to Earth radii.
pub fn planet_radius_earth(radius: JupiterRadius) -> EarthRadius {
    radius * EARTH_RADII_PER_JUPITER
}

/// Semi-major axis from Kepler's third law in solar units.
///
/// `a = ((P / 365.25)² · M_star)^⅓` with `P` in days, `M_star` in solar
/// masses, result in AU.
pub fn semi_major_axis_au(orbital_period: Days, stellar_mass: SolarMass) -> Au {
    ((orbital_period / DAYS_PER_YEAR).powi(2) * stellar_mass).cbrt()
}

/// Planet mass in Earth masses, estimated from radius when not provided.
///
/// Rocky regime `r ≤ 1.5 R⊕`: `m = r^3.7`; gas regime: `m = r^1.8`.
pub fn estimate_planet_mass(
    radius_earth: EarthRadius,
    provided_mass: Option<EarthMass>,
) -> EarthMass {
    match provided_mass {
        Some(mass) => mass,
        None if radius_earth <= 1.5 => radius_earth.powf(3.7),
        None => radius_earth.powf(1.8),
    }
}

/// Main-sequence luminosity approximation `L = M^3.5` (solar units).
pub fn stellar_luminosity(stellar_mass: SolarMass) -> f64 {
    stellar_mass.powf(3.5)
}

/// Equilibrium temperature, estimated when the catalog lacks one.
///
/// `T = 278 K · (L / a²)^¼` — Earth-like albedo assumption.
pub fn estimate_equilibrium_temp(
    luminosity: f64,
    semi_major_axis: Au,
    provided_temp: Option<Kelvin>,
) -> Kelvin {
    match provided_temp {
        Some(temp) => temp,
        None => EQ_TEMP_COEFF_K * (luminosity / semi_major_axis.powi(2)).powf(0.25),
    }
}

/// Bulk density relative to Earth (`m/r³` in Earth units).
///
/// A zero radius would divide by zero; the original pipeline substitutes a
/// neutral 1.0 there.
pub fn planet_density(mass_earth: EarthMass, radius_earth: EarthRadius) -> f64 {
    if radius_earth > 0.0 {
        mass_earth / radius_earth.powi(3)
    } else {
        1.0
    }
}

/// Conservative habitable-zone bounds `(inner, outer)` in AU.
pub fn habitable_zone_bounds(luminosity: f64) -> (Au, Au) {
    let sqrt_l = luminosity.sqrt();
    (INNER_HZ_COEFF * sqrt_l, OUTER_HZ_COEFF * sqrt_l)
}

/// Main-sequence effective temperature estimate from stellar mass.
///
/// Uses `L = M^3.5` and `R ≈ M` in solar units, so
/// `T = T_sun · (L / R²)^¼ = T_sun · M^0.375`.
pub fn stellar_effective_temp(stellar_mass: SolarMass) -> Kelvin {
    crate::constants::SOL_TEMP_K * stellar_mass.powf(0.375)
}

/// Stellar flux at the planet relative to Earth: `L / a²`.
pub fn stellar_flux_relative(luminosity: f64, semi_major_axis: Au) -> f64 {
    luminosity / semi_major_axis.powi(2)
}

/// Circular orbital velocity `2πa / P` in km/s.
pub fn orbital_velocity_kms(semi_major_axis: Au, orbital_period: Days) -> f64 {
    let circumference_m = 2.0 * std::f64::consts::PI * semi_major_axis * AU_METERS;
    circumference_m / (orbital_period * SECONDS_PER_DAY) / 1000.0
}

/// Numeric code of a spectral class, keyed on its first letter.
///
/// `{O: 0.1, B: 0.2, A: 0.3, F: 0.5, G: 0.8, K: 0.9, M: 1.0}`; unknown or
/// empty types get a neutral 0.5.
pub fn encode_star_type(star_type: &str) -> f64 {
    match star_type.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('O') => 0.1,
        Some('B') => 0.2,
        Some('A') => 0.3,
        Some('F') => 0.5,
        Some('G') => 0.8,
        Some('K') => 0.9,
        Some('M') => 1.0,
        _ => 0.5,
    }
}

/// Numeric code of a detection method (case-insensitive substring match).
pub fn encode_detection_method(method: Option<&str>) -> f64 {
    let Some(method) = method else { return 0.5 };
    let method = method.to_lowercase();
    if method.contains("transit") {
        1.0
    } else if method.contains("radial") || method.contains("velocity") {
        0.8
    } else if method.contains("imaging") {
        0.6
    } else if method.contains("microlensing") {
        0.4
    } else {
        0.5
    }
}

/// Numeric code of a data-quality flag (case-insensitive substring match).
pub fn encode_data_quality(quality: Option<&str>) -> f64 {
    let Some(quality) = quality else { return 0.6 };
    let quality = quality.to_lowercase();
    if quality.contains("excellent") {
        1.0
    } else if quality.contains("good") {
        0.8
    } else if quality.contains("fair") {
        0.6
    } else if quality.contains("limited") || quality.contains("poor") {
        0.4
    } else {
        0.6
    }
}

/// Derived quantities attached to one [`CanonicalTarget`].
///
/// Recomputed fresh on every scoring call and never mutated — pure function
/// output. All values are sanitized at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFeatures {
    pub radius_earth: EarthRadius,
    pub semi_major_axis: Au,
    pub mass_earth: EarthMass,
    pub luminosity: f64,
    pub equilibrium_temp: Kelvin,
    pub density: f64,
    pub inner_hz: Au,
    pub outer_hz: Au,
    pub hz_distance: Au,
    pub hz_ratio: f64,
    pub stellar_flux: f64,
    pub orbital_velocity: f64,
    pub star_type_code: f64,
    pub detection_method_code: f64,
    pub data_quality_code: f64,
}

impl DerivedFeatures {
    /// Derive all features for one target.
    pub fn from_target(target: &CanonicalTarget) -> Self {
        let radius_earth = planet_radius_earth(target.planet_radius);
        let semi_major_axis = semi_major_axis_au(target.orbital_period, target.stellar_mass);
        let mass_earth = estimate_planet_mass(radius_earth, target.planet_mass);
        let luminosity = stellar_luminosity(target.stellar_mass);
        let equilibrium_temp =
            estimate_equilibrium_temp(luminosity, semi_major_axis, target.temperature);
        let density = planet_density(mass_earth, radius_earth);
        let (inner_hz, outer_hz) = habitable_zone_bounds(luminosity);
        let hz_distance = (inner_hz + outer_hz) / 2.0;
        let hz_ratio = if hz_distance > 0.0 {
            semi_major_axis / hz_distance
        } else {
            1.0
        };

        DerivedFeatures {
            radius_earth: sanitize(radius_earth),
            semi_major_axis: sanitize(semi_major_axis),
            mass_earth: sanitize(mass_earth),
            luminosity: sanitize(luminosity),
            equilibrium_temp: sanitize(equilibrium_temp),
            density: sanitize(density),
            inner_hz: sanitize(inner_hz),
            outer_hz: sanitize(outer_hz),
            hz_distance: sanitize(hz_distance),
            hz_ratio: sanitize(hz_ratio),
            stellar_flux: sanitize(stellar_flux_relative(luminosity, semi_major_axis)),
            orbital_velocity: sanitize(orbital_velocity_kms(
                semi_major_axis,
                target.orbital_period,
            )),
            star_type_code: encode_star_type(&target.star_type),
            detection_method_code: encode_detection_method(target.detection_method.as_deref()),
            data_quality_code: encode_data_quality(target.data_quality.as_deref()),
        }
    }

    /// Assemble the 18-feature characterization vector, in the exact order
    /// the trained model was fitted with.
    pub fn characterization_vector(&self, target: &CanonicalTarget) -> Vec<f64> {
        let features = vec![
            target.distance,
            self.radius_earth,
            self.mass_earth,
            target.orbital_period,
            self.semi_major_axis,
            self.equilibrium_temp,
            target.stellar_mass,
            self.luminosity,
            self.density,
            self.inner_hz,
            self.outer_hz,
            self.hz_distance,
            self.hz_ratio,
            self.star_type_code,
            target
                .discovery_year
                .map(f64::from)
                .unwrap_or(DEFAULT_DISCOVERY_YEAR),
            self.detection_method_code,
            self.data_quality_code,
            1.0,
        ];

        fit_feature_width(features, CHARACTERIZATION_FEATURE_WIDTH)
    }
}

/// Pad with zeros or truncate a feature vector to the model's expected
/// width, sanitizing every entry on the way.
pub fn fit_feature_width(mut features: Vec<f64>, width: usize) -> Vec<f64> {
    if features.len() != width {
        warn!(
            "feature vector length {} != {width}, padding/truncating",
            features.len()
        );
        features.resize(width, 0.0);
    }
    features.iter_mut().for_each(|v| *v = sanitize(*v));
    features
}
