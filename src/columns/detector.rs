//! # Fuzzy header-to-field detection
//!
//! Maps arbitrary CSV headers to [`CanonicalField`]s using a three-step
//! precedence per field, walked in field declaration order:
//!
//! 1. **Exact match** — the normalized header equals one of the field's
//!    synonyms. Confidence 1.0, detection for that field stops immediately.
//! 2. **Substring match** — header and synonym contain one another; the
//!    candidate is scored by character-set overlap and must exceed 0.6.
//! 3. **Pattern-normalized match** — catalog prefix/suffix pairs
//!    (`pl_`/`planet_`, `_pc`/`_parsec`, …) are stripped from both sides;
//!    equality after stripping scores a flat 0.8, overriding a weaker
//!    substring candidate.
//!
//! A header claimed by a finalized field is excluded from the candidate sets
//! of all later fields, so the final mapping never shares a header between
//! two fields and `detect_columns` is idempotent.

use std::collections::{BTreeMap, HashSet};

use itertools::Itertools;
use smallvec::SmallVec;

use super::{CanonicalField, ColumnMapping, MappingReport, ValidationStatus};

/// Substring candidates below this similarity are discarded.
const SUBSTRING_THRESHOLD: f64 = 0.6;

/// Flat confidence assigned by the pattern-normalized step.
const FUZZY_CONFIDENCE: f64 = 0.8;

/// Prefix/suffix pairs stripped by the pattern-normalized step.
const FUZZY_PATTERNS: [(&str, &str); 9] = [
    ("pl_", "planet_"),
    ("st_", "star_"),
    ("st_", "stellar_"),
    ("sy_", "system_"),
    ("_pc", "_parsec"),
    ("_e", "_earth"),
    ("_j", "_jupiter"),
    ("_d", "_days"),
    ("_yr", "_year"),
];

/// Normalize a header for comparison against the synonym table.
///
/// Lowercases, trims, and converts spaces and hyphens to underscores, so
/// `" Planet Radius "` and `planet-radius` both become `planet_radius`.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Character-set similarity between a synonym and a normalized header.
///
/// Size of the character-set intersection divided by the longer string's
/// character count. Cheap, order-insensitive, and good enough to rank
/// substring candidates.
fn charset_similarity(synonym: &str, header: &str) -> f64 {
    let syn_chars: HashSet<char> = synonym.chars().collect();
    let header_chars: HashSet<char> = header.chars().collect();
    let intersection = syn_chars.intersection(&header_chars).count();
    let max_len = synonym.chars().count().max(header.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    intersection as f64 / max_len as f64
}

/// Pattern-normalized equality between a header and a synonym.
///
/// For each known prefix/suffix pair, both strings are stripped of both
/// members of the pair; equality of the stripped forms is a match
/// (`pl_rade` ↔ `planet_rade`, `dist_pc` ↔ `dist_parsec`).
fn fuzzy_match(header: &str, synonym: &str) -> bool {
    FUZZY_PATTERNS.iter().any(|(short, long)| {
        let header_clean = header.replace(short, "").replace(long, "");
        let synonym_clean = synonym.replace(short, "").replace(long, "");
        header_clean == synonym_clean
    })
}

/// Whether `header` (normalized) is a plausible candidate for any synonym of
/// a field, by the substring-or-fuzzy test. Used for suggestions only.
fn is_candidate(header: &str, synonyms: &[&str]) -> bool {
    synonyms.iter().any(|syn| {
        syn.contains(header) || header.contains(syn) || fuzzy_match(header, syn)
    })
}

/// Detect and map CSV headers to canonical fields.
///
/// Arguments
/// -----------------
/// * `headers`: the source header list, verbatim, in file order.
///
/// Return
/// ----------
/// * A [`ColumnMapping`] holding, for each recognized canonical field, the
///   verbatim source header and a confidence in `[0, 1]`.
///
/// See also
/// ------------
/// * [`build_report`] – Full validation report with suggestions.
pub fn detect_columns(headers: &[String]) -> ColumnMapping {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

    let mut mapping = ColumnMapping::default();
    let mut claimed: HashSet<usize> = HashSet::new();

    for field in CanonicalField::ALL {
        let synonyms = field.synonyms();

        let mut exact: Option<usize> = None;
        let mut best: Option<(usize, f64)> = None;

        for (idx, header_norm) in normalized.iter().enumerate() {
            if claimed.contains(&idx) {
                continue;
            }

            if synonyms.contains(&header_norm.as_str()) {
                exact = Some(idx);
                break;
            }

            for synonym in synonyms {
                if synonym.contains(header_norm.as_str()) || header_norm.contains(synonym) {
                    let score = charset_similarity(synonym, header_norm);
                    if score > SUBSTRING_THRESHOLD
                        && best.is_none_or(|(_, current)| score > current)
                    {
                        best = Some((idx, score));
                    }
                }
            }

            for synonym in synonyms {
                if fuzzy_match(header_norm, synonym)
                    && best.is_none_or(|(_, current)| FUZZY_CONFIDENCE > current)
                {
                    best = Some((idx, FUZZY_CONFIDENCE));
                }
            }
        }

        if let Some(idx) = exact {
            mapping.insert(field, headers[idx].clone(), 1.0);
            claimed.insert(idx);
        } else if let Some((idx, score)) = best {
            mapping.insert(field, headers[idx].clone(), score);
            claimed.insert(idx);
        }
    }

    mapping
}

/// Generate up to 3 candidate headers for each unmapped field.
///
/// Candidates are taken from the unmapped headers in input order and pass the
/// substring-or-fuzzy test against any synonym of the field.
fn generate_suggestions(
    missing_fields: &[CanonicalField],
    unmapped_headers: &[String],
) -> BTreeMap<String, SmallVec<[String; 3]>> {
    let mut suggestions = BTreeMap::new();

    for field in missing_fields {
        let synonyms = field.synonyms();
        let candidates: SmallVec<[String; 3]> = unmapped_headers
            .iter()
            .filter(|header| is_candidate(&normalize_header(header), synonyms))
            .take(3)
            .cloned()
            .collect();

        if !candidates.is_empty() {
            suggestions.insert(field.as_str().to_string(), candidates);
        }
    }

    suggestions
}

/// Build the full validation report for a header list.
///
/// Runs [`detect_columns`], then derives missing required/optional fields,
/// unmapped headers, mapping quality, per-field suggestions, and the overall
/// [`ValidationStatus`]. A quality below 0.5 downgrades the status to
/// [`ValidationStatus::LowConfidence`] even when all required fields mapped.
pub fn build_report(headers: &[String]) -> MappingReport {
    let mapping = detect_columns(headers);

    let missing_required = mapping.missing_required();
    let missing_optional = mapping.missing_optional();
    let missing_all: Vec<CanonicalField> = missing_required
        .iter()
        .chain(missing_optional.iter())
        .copied()
        .collect();

    let unmapped_headers: Vec<String> = headers
        .iter()
        .filter(|h| !mapping.claims_header(h))
        .cloned()
        .collect();

    let mapping_quality = mapping.mapping_quality();
    let suggestions = generate_suggestions(&missing_all, &unmapped_headers);
    let can_proceed = missing_required.is_empty();

    let validation_status = if mapping_quality < 0.5 {
        ValidationStatus::LowConfidence
    } else if can_proceed {
        ValidationStatus::Valid
    } else {
        ValidationStatus::MissingRequiredFields
    };

    let detected_mapping: BTreeMap<String, String> = mapping
        .iter()
        .map(|(f, h)| (f.as_str().to_string(), h.to_string()))
        .collect();
    let confidence_scores: BTreeMap<String, f64> = mapping
        .iter()
        .filter_map(|(f, _)| {
            mapping
                .confidence_for(f)
                .map(|c| (f.as_str().to_string(), c))
        })
        .collect();

    MappingReport {
        detected_mapping,
        confidence_scores,
        missing_required: missing_required.iter().map(|f| f.to_string()).collect_vec(),
        missing_optional: missing_optional.iter().map(|f| f.to_string()).collect_vec(),
        unmapped_headers,
        mapping_quality,
        suggestions,
        validation_status,
        can_proceed,
    }
}
