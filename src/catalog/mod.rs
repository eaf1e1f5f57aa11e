//! # Catalog records
//!
//! Types bridging raw CSV rows and the canonical target record the scoring
//! engine consumes.
//!
//! ## Overview
//!
//! - [`RawRow`] — one CSV line as header → raw cell text; empty cells are
//!   absent, never empty-string placeholders.
//! - [`CanonicalTarget`] — the fixed-shape record with required numeric
//!   fields and explicitly optional extras. Built from a [`RawRow`] through a
//!   [`ColumnMapping`](crate::columns::ColumnMapping), with documented
//!   defaults for required fields that are missing from the row.
//!
//! CSV decoding lives in [`csv_reader`].

pub mod csv_reader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::columns::{CanonicalField, ColumnMapping};
use crate::constants::{Days, FastHashMap, JupiterRadius, Kelvin, Parsec, SolarMass};
use crate::exoscore_errors::ExoscoreError;

/// One CSV data line: header → raw cell content.
///
/// Cells that are empty after trimming are not stored, so `get` cleanly
/// distinguishes "column absent or blank" from "value present".
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    values: FastHashMap<String, String>,
}

impl RawRow {
    /// Build a row from a header list and the matching record cells.
    ///
    /// Records shorter than the header list are padded with absent cells;
    /// extra cells beyond the headers are dropped.
    pub fn from_cells<'a, I>(headers: &[String], cells: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values = FastHashMap::default();
        for (header, cell) in headers.iter().zip(cells) {
            let cell = cell.trim();
            if !cell.is_empty() {
                values.insert(header.clone(), cell.to_string());
            }
        }
        RawRow { values }
    }

    /// Raw cell under `header`, if present and non-empty.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.values.get(header).map(String::as_str)
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Untouched source row for the `original_data` passthrough.
    pub fn to_original_data(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// A fixed-shape exoplanet target record.
///
/// Required fields are always present (pipeline defaults applied when the
/// source row lacks them); optional fields are a typed value or explicitly
/// absent. Immutable once scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTarget {
    pub name: String,
    /// Distance in parsecs.
    pub distance: Parsec,
    /// Stellar classification, e.g. `G2V`, `M3V`.
    pub star_type: String,
    /// Planet radius in Jupiter radii.
    pub planet_radius: JupiterRadius,
    /// Orbital period in days.
    pub orbital_period: Days,
    /// Host star mass in solar masses.
    pub stellar_mass: SolarMass,
    /// Planet mass in Earth masses.
    pub planet_mass: Option<f64>,
    /// Equilibrium temperature in Kelvin.
    pub temperature: Option<Kelvin>,
    pub discovery_year: Option<i32>,
    pub detection_method: Option<String>,
    pub data_quality: Option<String>,
}

/// Parse a numeric cell, surfacing the offending field and value on failure.
fn parse_numeric(field: CanonicalField, value: &str) -> Result<f64, ExoscoreError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ExoscoreError::NonNumericField {
            field: field.as_str().to_string(),
            value: value.to_string(),
        })
}

impl CanonicalTarget {
    /// Build a canonical target from a raw row through a column mapping.
    ///
    /// Required fields missing from the row get field-specific defaults:
    /// name `Target-{row_index + 1}`, distance `0`, star type `Unknown`,
    /// planet radius `0`, orbital period `0`, stellar mass `1`, and data
    /// quality `Good`. Other optional fields are left absent. A present but
    /// non-numeric cell for a numeric field is a conversion error.
    ///
    /// Arguments
    /// -----------------
    /// * `row`: the source row.
    /// * `mapping`: canonical field → source header resolution.
    /// * `row_index`: 0-based row index, used for the fallback name.
    ///
    /// Return
    /// ----------
    /// * The canonical target, or [`ExoscoreError::NonNumericField`] on the
    ///   first cell that fails numeric coercion.
    pub fn from_row(
        row: &RawRow,
        mapping: &ColumnMapping,
        row_index: usize,
    ) -> Result<Self, ExoscoreError> {
        let cell = |field: CanonicalField| -> Option<&str> {
            mapping.header_for(field).and_then(|header| row.get(header))
        };

        let numeric = |field: CanonicalField, default: f64| -> Result<f64, ExoscoreError> {
            match cell(field) {
                Some(value) => parse_numeric(field, value),
                None => Ok(default),
            }
        };

        let optional_numeric = |field: CanonicalField| -> Result<Option<f64>, ExoscoreError> {
            cell(field).map(|value| parse_numeric(field, value)).transpose()
        };

        let name = cell(CanonicalField::Name)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Target-{}", row_index + 1));

        let star_type = cell(CanonicalField::StarType)
            .map(str::to_string)
            .unwrap_or_else(|| "Unknown".to_string());

        let data_quality = cell(CanonicalField::DataQuality)
            .map(str::to_string)
            .or_else(|| Some("Good".to_string()));

        Ok(CanonicalTarget {
            name,
            distance: numeric(CanonicalField::Distance, 0.0)?,
            star_type,
            planet_radius: numeric(CanonicalField::PlanetRadius, 0.0)?,
            orbital_period: numeric(CanonicalField::OrbitalPeriod, 0.0)?,
            stellar_mass: numeric(CanonicalField::StellarMass, 1.0)?,
            planet_mass: optional_numeric(CanonicalField::PlanetMass)?,
            temperature: optional_numeric(CanonicalField::Temperature)?,
            discovery_year: optional_numeric(CanonicalField::DiscoveryYear)?
                .map(|year| year as i32),
            detection_method: cell(CanonicalField::DetectionMethod).map(str::to_string),
            data_quality,
        })
    }
}
