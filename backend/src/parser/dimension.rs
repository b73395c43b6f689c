//! Tire dimension parser
//!
//! Extracts size, load index, speed rating, season, and brand from a
//! loosely structured supplier description line. A description that does
//! not contain the dimension pattern yields an invalid result carrying the
//! original text; parsing never fails.

use regex::Captures;
use shared::types::Season;

use super::patterns::{CANONICAL_DIMENSION, RAW_DIMENSION};

/// Result of parsing one description line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionInfo {
    pub valid: bool,
    /// Canonical "{width}/{height} R{diameter} {load}{speed}" form when
    /// valid; the original text otherwise.
    pub dimension: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub diameter: Option<i32>,
    pub load_index: String,
    pub speed_rating: String,
    pub season: Season,
    pub brand: String,
}

impl DimensionInfo {
    fn invalid(original: &str) -> Self {
        Self {
            valid: false,
            dimension: original.to_string(),
            width: None,
            height: None,
            diameter: None,
            load_index: String::new(),
            speed_rating: String::new(),
            season: Season::Summer,
            brand: "Unknown".to_string(),
        }
    }
}

/// Parse a free-text description line.
///
/// Both the supplier form ("205 55 ZR 16 91 V ...") and the canonical form
/// produced by this parser ("205/55 R16 91V") are accepted, so canonical
/// strings round-trip.
pub fn parse_description(description: &str) -> DimensionInfo {
    let caps = match RAW_DIMENSION
        .captures(description)
        .or_else(|| CANONICAL_DIMENSION.captures(description))
    {
        Some(caps) => caps,
        None => return DimensionInfo::invalid(description),
    };

    let (width, height, diameter) = match dimensions_from(&caps) {
        Some(parts) => parts,
        None => return DimensionInfo::invalid(description),
    };

    let load_index = caps["load"].to_string();
    let speed_rating = caps["speed"].to_string();
    let dimension = format!(
        "{}/{} R{} {}{}",
        width, height, diameter, load_index, speed_rating
    );

    DimensionInfo {
        valid: true,
        dimension,
        width: Some(width),
        height: Some(height),
        diameter: Some(diameter),
        load_index,
        speed_rating,
        season: classify_season(description),
        brand: extract_brand(description),
    }
}

fn dimensions_from(caps: &Captures) -> Option<(i32, i32, i32)> {
    let width = caps["width"].parse().ok()?;
    let height = caps["height"].parse().ok()?;
    let diameter = caps["diameter"].parse().ok()?;
    Some((width, height, diameter))
}

/// Classify the season from the description tokens.
///
/// The brand token (first token) is excluded from the scan, and "AS"/"4S"
/// must match as whole tokens; this prevents a brand or model code from
/// reclassifying a summer tire while keeping the marker conventions
/// suppliers actually print ("AS", "4S", "ALLSEASON", "WINTER", "HIVER").
/// All-season markers take priority over winter markers.
fn classify_season(description: &str) -> Season {
    let upper = description.to_uppercase();
    let tokens: Vec<&str> = upper.split_whitespace().skip(1).collect();

    let all_season = tokens
        .iter()
        .any(|t| *t == "AS" || *t == "4S" || t.contains("ALL"));
    if all_season {
        return Season::AllSeason;
    }

    let winter = tokens
        .iter()
        .any(|t| t.contains("WINTER") || t.contains("HIVER"));
    if winter {
        return Season::Winter;
    }

    Season::Summer
}

/// The brand is the first whitespace-delimited token of the description.
fn extract_brand(description: &str) -> String {
    description
        .split_whitespace()
        .next()
        .map(str::to_string)
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supplier_description() {
        let info = parse_description("MICHELIN 205 55 R 16 91 V");
        assert!(info.valid);
        assert_eq!(info.dimension, "205/55 R16 91V");
        assert_eq!(info.width, Some(205));
        assert_eq!(info.height, Some(55));
        assert_eq!(info.diameter, Some(16));
        assert_eq!(info.load_index, "91");
        assert_eq!(info.speed_rating, "V");
        assert_eq!(info.brand, "MICHELIN");
        assert_eq!(info.season, Season::Summer);
    }

    #[test]
    fn invalid_preserves_original_text() {
        let info = parse_description("FRAIS DE PORT FORFAITAIRES");
        assert!(!info.valid);
        assert_eq!(info.dimension, "FRAIS DE PORT FORFAITAIRES");
        assert_eq!(info.width, None);
        assert_eq!(info.brand, "Unknown");
    }

    #[test]
    fn brand_token_does_not_trigger_all_season() {
        // "ALLIANCE" contains "ALL" but is the brand token
        let info = parse_description("ALLIANCE 195 65 R 15 91 T");
        assert!(info.valid);
        assert_eq!(info.season, Season::Summer);
    }

    #[test]
    fn winter_marker_detected() {
        let info = parse_description("NOKIAN 205 55 R 16 91 H WINTERPROOF");
        assert_eq!(info.season, Season::Winter);
    }
}
