//! # Canonical fields and CSV column mapping
//!
//! Exoplanet catalogs name their columns freely (`pl_rade`, `radius_earth`,
//! `Planet Radius`, …). This module defines the fixed set of **canonical
//! fields** the scoring engine expects, the synonym table used to recognize
//! them, and the [`ColumnMapping`]/[`MappingReport`] types produced by the
//! detector.
//!
//! ## Overview
//!
//! - [`CanonicalField`] — the 11 target attributes (6 required, 5 optional).
//! - [`ColumnMapping`] — canonical field → source header, with per-field
//!   confidence in `[0, 1]`.
//! - [`MappingReport`] — the full validation answer: detected mapping,
//!   missing fields, suggestions for unmapped fields, and an overall
//!   [`ValidationStatus`].
//!
//! Detection itself lives in [`detector`].

pub mod detector;
pub(crate) mod synonyms;

use std::collections::BTreeMap;

use serde::Serialize;
use smallvec::SmallVec;

use crate::constants::FastHashMap;

/// A canonical target attribute, independent of source column naming.
///
/// The declaration order is the detection order: fields earlier in the list
/// get first pick of the headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Name,
    Distance,
    StarType,
    PlanetRadius,
    OrbitalPeriod,
    StellarMass,
    PlanetMass,
    Temperature,
    DiscoveryYear,
    DetectionMethod,
    DataQuality,
}

impl CanonicalField {
    /// All canonical fields, in detection order.
    pub const ALL: [CanonicalField; 11] = [
        CanonicalField::Name,
        CanonicalField::Distance,
        CanonicalField::StarType,
        CanonicalField::PlanetRadius,
        CanonicalField::OrbitalPeriod,
        CanonicalField::StellarMass,
        CanonicalField::PlanetMass,
        CanonicalField::Temperature,
        CanonicalField::DiscoveryYear,
        CanonicalField::DetectionMethod,
        CanonicalField::DataQuality,
    ];

    /// Fields that must be mapped before any scoring is attempted.
    pub const REQUIRED: [CanonicalField; 6] = [
        CanonicalField::Name,
        CanonicalField::Distance,
        CanonicalField::StarType,
        CanonicalField::PlanetRadius,
        CanonicalField::OrbitalPeriod,
        CanonicalField::StellarMass,
    ];

    /// Fields that enrich scoring when present but are never required.
    pub const OPTIONAL: [CanonicalField; 5] = [
        CanonicalField::PlanetMass,
        CanonicalField::Temperature,
        CanonicalField::DiscoveryYear,
        CanonicalField::DetectionMethod,
        CanonicalField::DataQuality,
    ];

    pub fn is_required(&self) -> bool {
        CanonicalField::REQUIRED.contains(self)
    }

    /// Stable snake_case name of the field, as used in reports and summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Name => "name",
            CanonicalField::Distance => "distance",
            CanonicalField::StarType => "star_type",
            CanonicalField::PlanetRadius => "planet_radius",
            CanonicalField::OrbitalPeriod => "orbital_period",
            CanonicalField::StellarMass => "stellar_mass",
            CanonicalField::PlanetMass => "planet_mass",
            CanonicalField::Temperature => "temperature",
            CanonicalField::DiscoveryYear => "discovery_year",
            CanonicalField::DetectionMethod => "detection_method",
            CanonicalField::DataQuality => "data_quality",
        }
    }

    /// Known source column names for this field (lowercase, underscored).
    pub fn synonyms(&self) -> &'static [&'static str] {
        synonyms::synonyms_for(*self)
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of column detection over one header list.
///
/// Invariants:
/// - every mapped header exists verbatim in the source header list,
/// - a header is mapped to at most one canonical field,
/// - confidences are in `[0, 1]` (1.0 for exact synonym matches).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMapping {
    mapped: FastHashMap<CanonicalField, String>,
    confidence: FastHashMap<CanonicalField, f64>,
}

impl ColumnMapping {
    pub(crate) fn insert(&mut self, field: CanonicalField, header: String, confidence: f64) {
        self.mapped.insert(field, header);
        self.confidence.insert(field, confidence);
    }

    /// Source header mapped to `field`, if any.
    pub fn header_for(&self, field: CanonicalField) -> Option<&str> {
        self.mapped.get(&field).map(String::as_str)
    }

    /// Detection confidence for `field`, if mapped.
    pub fn confidence_for(&self, field: CanonicalField) -> Option<f64> {
        self.confidence.get(&field).copied()
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.mapped.contains_key(&field)
    }

    /// Whether `header` has been claimed by any canonical field.
    pub fn claims_header(&self, header: &str) -> bool {
        self.mapped.values().any(|h| h == header)
    }

    /// Number of mapped canonical fields.
    pub fn len(&self) -> usize {
        self.mapped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapped.is_empty()
    }

    /// Required fields with no mapped header, in declaration order.
    pub fn missing_required(&self) -> Vec<CanonicalField> {
        CanonicalField::REQUIRED
            .into_iter()
            .filter(|f| !self.contains(*f))
            .collect()
    }

    /// Optional fields with no mapped header, in declaration order.
    pub fn missing_optional(&self) -> Vec<CanonicalField> {
        CanonicalField::OPTIONAL
            .into_iter()
            .filter(|f| !self.contains(*f))
            .collect()
    }

    /// Fraction of all canonical fields (required + optional) that are mapped.
    pub fn mapping_quality(&self) -> f64 {
        self.mapped.len() as f64 / CanonicalField::ALL.len() as f64
    }

    /// Iterate over `(field, header)` pairs in field declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> + '_ {
        CanonicalField::ALL
            .into_iter()
            .filter_map(|f| self.header_for(f).map(|h| (f, h)))
    }
}

/// Overall verdict of column validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// All required fields mapped and quality is acceptable.
    Valid,
    /// At least one required field could not be mapped.
    MissingRequiredFields,
    /// Fewer than half of the canonical fields were recognized.
    LowConfidence,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::MissingRequiredFields => "missing_required_fields",
            ValidationStatus::LowConfidence => "low_confidence",
        };
        f.write_str(s)
    }
}

/// Full answer to "can this header list drive the pipeline?".
///
/// Produced by [`detector::build_report`]; also carried inside
/// [`ExoscoreError::MissingRequiredColumns`](crate::exoscore_errors::ExoscoreError::MissingRequiredColumns)
/// so a caller can retry with an explicit mapping.
#[derive(Debug, Clone, Serialize)]
pub struct MappingReport {
    /// Canonical field name → source header (verbatim).
    pub detected_mapping: BTreeMap<String, String>,
    /// Canonical field name → detection confidence in `[0, 1]`.
    pub confidence_scores: BTreeMap<String, f64>,
    pub missing_required: Vec<String>,
    pub missing_optional: Vec<String>,
    /// Source headers claimed by no canonical field, in input order.
    pub unmapped_headers: Vec<String>,
    /// Mapped fields / 11.
    pub mapping_quality: f64,
    /// For each unmapped field, up to 3 candidate headers in input order.
    pub suggestions: BTreeMap<String, SmallVec<[String; 3]>>,
    pub validation_status: ValidationStatus,
    pub can_proceed: bool,
}
