//! Shared type-spec grammar used by `VRBL` and `FIELD` declarations.
//!
//! Grounded on `CMS2SemanticParser._create_variable`. Each rule below is an
//! independent match attempt in the same order as the original (not a
//! single alternation), so that the STATUS check at the end can still
//! override an earlier integer/fixed/float/boolean/char match when the
//! type spec also contains quoted enumerator literals — exactly as the
//! original's sequence of un-chained `if` statements behaves.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Mode;

#[derive(Debug, Clone, Default)]
pub struct TypeSpec {
    pub mode: Mode,
    pub bits: Option<u32>,
    pub signed: bool,
    pub frac_bits: Option<u32>,
    pub char_length: Option<u32>,
    pub status_values: Vec<String>,
    pub preset_value: Option<String>,
}

static INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^I\s+(\d+)\s+(S|U)").unwrap());
static FIXED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^A\s+(\d+)\s+(S|U)\s+(\d+)").unwrap());
static FLOAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^F(\s*\([TRSD]\))?").unwrap());
static CHAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[HC]\s*(\d+)").unwrap());
static STATUS_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)'([A-Za-z][A-Za-z0-9]*)'").unwrap());
static PRESET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bP\s+(\S+)").unwrap());

/// Parse a CMS-2 type specification (the text following a `VRBL`/`FIELD`
/// name) into its mode and associated attributes.
pub fn parse_type_spec(type_spec: &str) -> TypeSpec {
    let type_upper = type_spec.to_ascii_uppercase();
    let type_upper = type_upper.trim();

    let mut spec = TypeSpec {
        signed: true,
        ..Default::default()
    };

    let int_match = INT_RE.captures(type_upper);
    if let Some(caps) = &int_match {
        spec.mode = Mode::Integer;
        spec.bits = caps.get(1).and_then(|m| m.as_str().parse().ok());
        spec.signed = caps.get(2).map(|m| m.as_str()) == Some("S");
    }

    let fixed_match = FIXED_RE.captures(type_upper);
    if let Some(caps) = &fixed_match {
        spec.mode = Mode::Fixed;
        spec.bits = caps.get(1).and_then(|m| m.as_str().parse().ok());
        spec.signed = caps.get(2).map(|m| m.as_str()) == Some("S");
        spec.frac_bits = caps.get(3).and_then(|m| m.as_str().parse().ok());
    }

    if int_match.is_none() && fixed_match.is_none() && FLOAT_RE.is_match(type_upper) {
        spec.mode = Mode::Float;
    }

    if type_upper.starts_with('B') && !type_upper.starts_with("BY") {
        spec.mode = Mode::Boolean;
    }

    if let Some(caps) = CHAR_RE.captures(type_upper) {
        spec.mode = Mode::Char;
        spec.char_length = caps.get(1).and_then(|m| m.as_str().parse().ok());
    }

    if type_spec.contains('\'') {
        let values: Vec<String> = STATUS_VALUE_RE
            .captures_iter(type_spec)
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_ascii_uppercase()))
            .collect();
        if !values.is_empty() {
            spec.mode = Mode::Status;
            spec.status_values = values;
        }
    }

    if let Some(caps) = PRESET_RE.captures(type_spec) {
        spec.preset_value = caps.get(1).map(|m| m.as_str().to_string());
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_type_spec() {
        let spec = parse_type_spec("I 16 S");
        assert!(matches!(spec.mode, Mode::Integer));
        assert_eq!(spec.bits, Some(16));
        assert!(spec.signed);
    }

    #[test]
    fn unsigned_integer() {
        let spec = parse_type_spec("I 8 U");
        assert!(!spec.signed);
    }

    #[test]
    fn fixed_point_type_spec() {
        let spec = parse_type_spec("A 32 S 16");
        assert!(matches!(spec.mode, Mode::Fixed));
        assert_eq!(spec.bits, Some(32));
        assert_eq!(spec.frac_bits, Some(16));
    }

    #[test]
    fn float_with_precision_tag() {
        let spec = parse_type_spec("F(T)");
        assert!(matches!(spec.mode, Mode::Float));
    }

    #[test]
    fn bare_float() {
        let spec = parse_type_spec("F");
        assert!(matches!(spec.mode, Mode::Float));
    }

    #[test]
    fn boolean_not_confused_with_by() {
        assert!(matches!(parse_type_spec("B").mode, Mode::Boolean));
        assert!(!matches!(parse_type_spec("BY 4").mode, Mode::Boolean));
    }

    #[test]
    fn char_type_h_and_c() {
        assert_eq!(parse_type_spec("H 20").char_length, Some(20));
        assert_eq!(parse_type_spec("C 8").char_length, Some(8));
    }

    #[test]
    fn status_type_overrides_mode() {
        let spec = parse_type_spec("'OFF','STANDBY','ACTIVE'");
        assert!(matches!(spec.mode, Mode::Status));
        assert_eq!(spec.status_values, vec!["OFF", "STANDBY", "ACTIVE"]);
    }

    #[test]
    fn preset_value_preserves_original_case() {
        let spec = parse_type_spec("I 16 S P 0Ah");
        assert_eq!(spec.preset_value.as_deref(), Some("0Ah"));
    }

    #[test]
    fn unknown_when_nothing_matches() {
        let spec = parse_type_spec("???");
        assert!(matches!(spec.mode, Mode::Unknown));
    }
}
