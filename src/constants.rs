//! # Constants and type definitions for exoscore
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `exoscore` library.
//!
//! ## Overview
//!
//! - Astronomical constants and unit conversions (AU ↔ m, parsec ↔ m, rad ↔ mas)
//! - Earth/Sun reference quantities used by the scoring heuristics
//! - SI constants for the dataset-wide feature builder
//! - Core type aliases used across the crate
//!
//! These definitions are used by all main modules, including the derived-feature
//! calculator, the observability geometry, and the habitability composites.

use std::collections::HashMap;

use ahash::RandomState;

// -------------------------------------------------------------------------------------------------
// Astronomical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// Astronomical Unit in meters
pub const AU_METERS: f64 = 1.496e11;

/// Parsec in meters
pub const PARSEC_METERS: f64 = 3.086e16;

/// Radians → milli-arcseconds
pub const RAD_TO_MAS: f64 = 206_265_000.0;

/// Number of days in a Julian year
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Earth radii per Jupiter radius (catalog radii arrive in Jupiter units)
pub const EARTH_RADII_PER_JUPITER: f64 = 11.2;

/// Solar radius expressed in Earth radii (used by the contrast-ratio estimate)
pub const SUN_RADIUS_EARTH: f64 = 109.0;

/// Earth equilibrium temperature coefficient: T_eq = 278 K · (L/a²)^¼
pub const EQ_TEMP_COEFF_K: f64 = 278.0;

/// Inner habitable-zone boundary coefficient (conservative, in √L_sun)
pub const INNER_HZ_COEFF: f64 = 0.95;

/// Outer habitable-zone boundary coefficient (conservative, in √L_sun)
pub const OUTER_HZ_COEFF: f64 = 1.37;

/// Rayleigh diffraction-limit coefficient: θ = 1.22 λ / D
pub const DIFFRACTION_COEFF: f64 = 1.22;

/// Mean Earth surface temperature in Kelvin (habitability optimum)
pub const EARTH_TEMP_K: f64 = 288.0;

/// Solar effective temperature in Kelvin
pub const SOL_TEMP_K: f64 = 5778.0;

/// Earth orbital period in days (habitability optimum)
pub const EARTH_ORBIT_DAYS: f64 = 365.0;

// -------------------------------------------------------------------------------------------------
// SI constants (dataset-wide feature engineering)
// -------------------------------------------------------------------------------------------------

/// Newtonian gravitational constant in m³ kg⁻¹ s⁻²
pub const G_SI: f64 = 6.67430e-11;

/// Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6.371e6;

/// Earth mass in kilograms
pub const EARTH_MASS_KG: f64 = 5.97219e24;

/// Solar radius in meters
pub const SUN_RADIUS_M: f64 = 6.957e8;

/// Solar mass in kilograms
pub const SUN_MASS_KG: f64 = 1.98847e30;

/// Stefan–Boltzmann constant in W m⁻² K⁻⁴
pub const STEFAN_BOLTZMANN: f64 = 5.670374419e-8;

// -------------------------------------------------------------------------------------------------
// Numerical sanitation bounds
// -------------------------------------------------------------------------------------------------

/// Replacement value for `+∞` in derived-feature vectors
pub const POS_INF_CLAMP: f64 = 1e6;

/// Replacement value for `-∞` in derived-feature vectors
pub const NEG_INF_CLAMP: f64 = -1e6;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Distance in parsecs
pub type Parsec = f64;
/// Temperature in Kelvin
pub type Kelvin = f64;
/// Duration in days
pub type Days = f64;
/// Mass in solar masses
pub type SolarMass = f64;
/// Mass in Earth masses
pub type EarthMass = f64;
/// Radius in Earth radii
pub type EarthRadius = f64;
/// Radius in Jupiter radii
pub type JupiterRadius = f64;
/// Distance in astronomical units
pub type Au = f64;
/// Angle in milli-arcseconds
pub type Mas = f64;
/// Length in meters
pub type Meter = f64;

/// Hash map with the fast `ahash` hasher, used for row data and score breakdowns
pub type FastHashMap<K, V> = HashMap<K, V, RandomState>;
