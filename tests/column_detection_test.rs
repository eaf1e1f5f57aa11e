use exoscore::columns::detector::{build_report, detect_columns};
use exoscore::columns::{CanonicalField, ValidationStatus};
use exoscore::Exoscore;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn nasa_archive_headers_map_completely() {
    let headers = headers(&[
        "pl_name",
        "sy_dist",
        "st_spectype",
        "pl_rade",
        "pl_orbper",
        "st_mass",
        "pl_masse",
        "pl_eqt",
        "disc_year",
        "discoverymethod",
    ]);
    let report = build_report(&headers);

    assert_eq!(report.validation_status, ValidationStatus::Valid);
    assert!(report.can_proceed);
    assert!(report.missing_required.is_empty());
    assert_eq!(
        report.detected_mapping.get("planet_radius").map(String::as_str),
        Some("pl_rade")
    );
    assert_eq!(
        report.detected_mapping.get("detection_method").map(String::as_str),
        Some("discoverymethod")
    );
    // Exact synonym hits carry full confidence.
    assert_eq!(report.confidence_scores.get("name"), Some(&1.0));
    // data_quality has no column here, so 10 of 11 fields map.
    assert!((report.mapping_quality - 10.0 / 11.0).abs() < 1e-9);
}

#[test]
fn human_readable_headers_map_too() {
    let headers = headers(&[
        "Planet Name",
        "Distance (pc)",
        "Spectral Type",
        "Planet Radius",
        "Orbital Period",
        "Stellar Mass",
    ]);
    let mapping = detect_columns(&headers);

    for field in CanonicalField::REQUIRED {
        assert!(mapping.contains(field), "unmapped: {field}");
    }
    assert_eq!(mapping.header_for(CanonicalField::Name), Some("Planet Name"));
    assert_eq!(
        mapping.header_for(CanonicalField::Distance),
        Some("Distance (pc)")
    );
}

#[test]
fn each_header_is_claimed_at_most_once() {
    // "mass" alone could plausibly serve both stellar_mass and planet_mass;
    // the first field to finalize keeps it.
    let headers = headers(&["name", "dist", "spectype", "radius", "period", "mass"]);
    let mapping = detect_columns(&headers);

    let claimed: Vec<&str> = CanonicalField::ALL
        .iter()
        .filter_map(|f| mapping.header_for(*f))
        .collect();
    let mut deduped = claimed.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(claimed.len(), deduped.len(), "a header was claimed twice");
}

#[test]
fn unrelated_headers_produce_suggestions() {
    let report = build_report(&headers(&["object_id", "ra", "dec", "magnitude"]));

    // So few fields map that low confidence takes precedence over the
    // missing-required status.
    assert_eq!(report.validation_status, ValidationStatus::LowConfidence);
    assert!(!report.can_proceed);
    assert!(report.missing_required.contains(&"distance".to_string()));
    for candidates in report.suggestions.values() {
        assert!(candidates.len() <= 3);
    }
    assert_eq!(report.unmapped_headers.len(), 4 - report.detected_mapping.len());
}

#[test]
fn facade_validation_matches_detector() {
    let exoscore = Exoscore::default();
    let headers = headers(&["pl_name", "sy_dist", "st_spectype"]);

    let report = exoscore.validate_columns(&headers);
    let direct = build_report(&headers);
    assert_eq!(report.detected_mapping, direct.detected_mapping);
    assert_eq!(report.validation_status, direct.validation_status);
}

#[test]
fn report_serializes_to_json() {
    let report = build_report(&headers(&["pl_name", "sy_dist"]));
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["can_proceed"], false);
    assert_eq!(json["validation_status"], "low_confidence");
    assert!(json["detected_mapping"]["name"].is_string());
}
