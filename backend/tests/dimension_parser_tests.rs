//! Dimension parser behavior across supplier description shapes

use proptest::prelude::*;
use shared::types::Season;
use tireshop_backend::parser::parse_description;

struct Case {
    input: &'static str,
    dimension: &'static str,
    brand: &'static str,
    season: Season,
}

#[test]
fn parses_supplier_description_matrix() {
    let cases = [
        Case {
            input: "MICHELIN 205 55 R 16 91 V PRIMACY",
            dimension: "205/55 R16 91V",
            brand: "MICHELIN",
            season: Season::Summer,
        },
        Case {
            input: "CONTINENTAL 225 45 ZR 17 94 Y SPORTCONTACT",
            dimension: "225/45 R17 94Y",
            brand: "CONTINENTAL",
            season: Season::Summer,
        },
        Case {
            input: "NOKIAN 195 65 R 15 95 T WR SNOWPROOF HIVER",
            dimension: "195/65 R15 95T",
            brand: "NOKIAN",
            season: Season::Winter,
        },
        Case {
            input: "MICHELIN 205 55 R 16 94 V CROSSCLIMATE AS",
            dimension: "205/55 R16 94V",
            brand: "MICHELIN",
            season: Season::AllSeason,
        },
        Case {
            input: "HANKOOK 235 35 R 19 105 W 4S",
            dimension: "235/35 R19 105W",
            brand: "HANKOOK",
            season: Season::AllSeason,
        },
        Case {
            input: "GOODYEAR 175 70 R 14 84 T VECTOR ALLSEASON",
            dimension: "175/70 R14 84T",
            brand: "GOODYEAR",
            season: Season::AllSeason,
        },
    ];

    for case in &cases {
        let info = parse_description(case.input);
        assert!(info.valid, "should parse: {}", case.input);
        assert_eq!(info.dimension, case.dimension, "input: {}", case.input);
        assert_eq!(info.brand, case.brand, "input: {}", case.input);
        assert_eq!(info.season, case.season, "input: {}", case.input);
    }
}

#[test]
fn rejects_descriptions_without_dimension() {
    for input in [
        "FRAIS DE PORT FORFAITAIRES",
        "MONTAGE EQUILIBRAGE",
        "",
        "205 55",
        "MICHELIN PRIMACY 4",
    ] {
        let info = parse_description(input);
        assert!(!info.valid, "should not parse: {:?}", input);
        assert_eq!(info.dimension, input);
    }
}

#[test]
fn brand_containing_marker_does_not_reclassify() {
    // Brand token is excluded from the season scan
    let info = parse_description("ALLIANCE 195 65 R 15 91 T");
    assert_eq!(info.season, Season::Summer);

    // "AS" must be a whole token
    let info = parse_description("MICHELIN 205 55 R 16 91 V PASSAT");
    assert_eq!(info.season, Season::Summer);
}

#[test]
fn all_season_marker_wins_over_winter_marker() {
    let info = parse_description("VREDESTEIN 205 55 R 16 91 H QUATRAC ALLSEASON WINTER");
    assert_eq!(info.season, Season::AllSeason);
}

proptest! {
    /// The canonical form emitted by the parser parses back to the same
    /// dimension fields.
    #[test]
    fn canonical_form_round_trips(
        width in 100..1000i32,
        height in 10..100i32,
        diameter in 10..100i32,
        load in 10..1000i32,
        speed in prop::char::range('A', 'Z'),
    ) {
        let canonical = format!("{}/{} R{} {}{}", width, height, diameter, load, speed);
        let info = parse_description(&format!("BRANDX {}", canonical));

        prop_assert!(info.valid);
        prop_assert_eq!(info.dimension, canonical);
        prop_assert_eq!(info.width, Some(width));
        prop_assert_eq!(info.height, Some(height));
        prop_assert_eq!(info.diameter, Some(diameter));
        prop_assert_eq!(info.load_index, load.to_string());
        prop_assert_eq!(info.speed_rating, speed.to_string());
    }

    /// Parsing never panics, whatever the input.
    #[test]
    fn never_panics_on_arbitrary_input(input in ".*") {
        let info = parse_description(&input);
        if !info.valid {
            prop_assert_eq!(info.dimension, input);
        }
    }
}
