//! Curated synonym table for canonical field detection.
//!
//! Entries cover the NASA Exoplanet Archive short names (`pl_rade`,
//! `sy_dist`, …), spelled-out variants, and the abbreviations seen in
//! community catalogs. All entries are lowercase with underscores; incoming
//! headers are normalized the same way before comparison.

use once_cell::sync::Lazy;

use crate::constants::FastHashMap;

use super::CanonicalField;

static SYNONYM_TABLE: Lazy<FastHashMap<CanonicalField, &'static [&'static str]>> =
    Lazy::new(|| {
        let mut table: FastHashMap<CanonicalField, &'static [&'static str]> =
            FastHashMap::default();
        table.insert(
            CanonicalField::Name,
            &[
                "name",
                "planet_name",
                "pl_name",
                "target_name",
                "object_name",
                "identifier",
                "designation",
                "common_name",
                "planet",
                "target",
                "object",
                "source_name",
                "catalogue_name",
                "exoplanet_name",
            ][..],
        );
        table.insert(
            CanonicalField::Distance,
            &[
                "distance",
                "dist",
                "sy_dist",
                "distance_pc",
                "dist_pc",
                "parallax_distance",
                "stellar_distance",
                "star_distance",
                "system_distance",
                "parsecs",
                "pc",
                "d",
                "dist_parsec",
            ][..],
        );
        table.insert(
            CanonicalField::StarType,
            &[
                "star_type",
                "stellar_type",
                "st_spectype",
                "spectral_type",
                "spec_type",
                "stellar_class",
                "star_class",
                "classification",
                "sptype",
                "spectype",
                "st_type",
                "host_star_type",
                "host_type",
            ][..],
        );
        table.insert(
            CanonicalField::PlanetRadius,
            &[
                "planet_radius",
                "pl_rade",
                "radius",
                "pl_radius",
                "r_planet",
                "planet_r",
                "radius_earth",
                "earth_radius",
                "r_earth",
                "re",
                "planet_size",
                "size",
                "pl_rad",
                "radius_e",
            ][..],
        );
        table.insert(
            CanonicalField::OrbitalPeriod,
            &[
                "orbital_period",
                "period",
                "pl_orbper",
                "orbit_period",
                "period_days",
                "orbital_period_days",
                "pl_period",
                "p",
                "orbit_p",
                "period_d",
                "days",
                "pl_orbperdur1",
            ][..],
        );
        table.insert(
            CanonicalField::StellarMass,
            &[
                "stellar_mass",
                "star_mass",
                "st_mass",
                "host_mass",
                "host_star_mass",
                "m_star",
                "mass_star",
                "stellar_m",
                "st_m",
                "ms",
                "mass_stellar",
                "host_m",
            ][..],
        );
        table.insert(
            CanonicalField::PlanetMass,
            &[
                "planet_mass",
                "pl_masse",
                "mass",
                "pl_mass",
                "m_planet",
                "planet_m",
                "mass_earth",
                "earth_mass",
                "m_earth",
                "me",
                "pl_m",
                "mass_e",
                "planet_masse",
            ][..],
        );
        table.insert(
            CanonicalField::Temperature,
            &[
                "temperature",
                "temp",
                "pl_eqt",
                "equilibrium_temperature",
                "eq_temp",
                "teq",
                "t_eq",
                "planet_temp",
                "pl_temp",
                "effective_temperature",
                "t_eff",
                "temp_eq",
                "kelvin",
            ][..],
        );
        table.insert(
            CanonicalField::DiscoveryYear,
            &[
                "discovery_year",
                "disc_year",
                "year",
                "discovery_date",
                "found_year",
                "detected_year",
                "publication_year",
                "announce_year",
                "year_discovered",
                "yr",
            ][..],
        );
        table.insert(
            CanonicalField::DetectionMethod,
            &[
                "detection_method",
                "discovery_method",
                "method",
                "discoverymethod",
                "detection_technique",
                "discovery_technique",
                "technique",
                "method_detection",
                "detect_method",
                "disc_method",
            ][..],
        );
        table.insert(
            CanonicalField::DataQuality,
            &[
                "data_quality",
                "quality",
                "data_flag",
                "flag",
                "reliability",
                "confidence",
                "quality_flag",
                "grade",
                "rating",
                "status",
                "validation_status",
                "verified",
            ][..],
        );
        table
    });

/// Synonym list for one canonical field.
pub(crate) fn synonyms_for(field: CanonicalField) -> &'static [&'static str] {
    SYNONYM_TABLE
        .get(&field)
        .copied()
        .unwrap_or_else(|| unreachable!("every canonical field has a synonym list"))
}
