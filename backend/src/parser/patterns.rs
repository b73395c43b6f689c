//! Regex patterns for supplier invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One transaction line of the supplier invoice, anchored at both ends:
    /// quantity, free-text description, unit purchase price, then a
    /// secondary supplier amount that is discarded.
    pub static ref SUPPLIER_LINE: Regex = Regex::new(
        r"^(?P<qty>\d+)\s+(?P<desc>.+)\s+(?P<unit_price>\d+\.\d{2})\s+(?P<gross_price>\d+\.\d{2})$"
    ).unwrap();

    /// Tire dimension as it appears in supplier descriptions:
    /// width, height, construction code (discarded), diameter, load index,
    /// speed rating. The rating may end the string.
    pub static ref RAW_DIMENSION: Regex = Regex::new(
        r"(?P<width>\d{3})\s+(?P<height>\d{2})\s+[A-Z]+\s+(?P<diameter>\d{2})\s+(?P<load>\d{2,3})\s+(?P<speed>[A-Z])(?:\s|$)"
    ).unwrap();

    /// Canonical dimension form produced by the parser itself,
    /// e.g. "205/55 R16 91V". Accepted so canonical strings re-parse.
    pub static ref CANONICAL_DIMENSION: Regex = Regex::new(
        r"(?P<width>\d{3})/(?P<height>\d{2})\s+R(?P<diameter>\d{2})\s+(?P<load>\d{2,3})(?P<speed>[A-Z])(?:\s|$)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplier_line_matches_fixture() {
        let caps = SUPPLIER_LINE
            .captures("4 MICHELIN 205 55 R 16 91 V 58.50 62.00")
            .expect("fixture line must match");
        assert_eq!(&caps["qty"], "4");
        assert_eq!(&caps["desc"], "MICHELIN 205 55 R 16 91 V");
        assert_eq!(&caps["unit_price"], "58.50");
        assert_eq!(&caps["gross_price"], "62.00");
    }

    #[test]
    fn supplier_line_is_anchored() {
        assert!(SUPPLIER_LINE
            .captures("TOTAL 4 MICHELIN 205 55 R 16 91 V 58.50 62.00 EUR")
            .is_none());
    }

    #[test]
    fn raw_dimension_accepts_end_of_string() {
        assert!(RAW_DIMENSION.is_match("MICHELIN 205 55 R 16 91 V"));
        assert!(RAW_DIMENSION.is_match("MICHELIN 205 55 R 16 91 V TL"));
    }

    #[test]
    fn canonical_dimension_matches_parser_output() {
        let caps = CANONICAL_DIMENSION.captures("205/55 R16 91V").unwrap();
        assert_eq!(&caps["width"], "205");
        assert_eq!(&caps["load"], "91");
        assert_eq!(&caps["speed"], "V");
    }
}
