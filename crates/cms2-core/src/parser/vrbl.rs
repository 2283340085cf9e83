//! `VRBL` declaration parsing.
//!
//! Grounded on `_parse_vrbl_declaration`/`_create_variable` in
//! `original_source/cms2_semantic_parser.py`. Two surface forms: a single
//! name, or a parenthesised group of names sharing one type spec.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Modifier;

use super::type_spec::{parse_type_spec, TypeSpec};

static MULTI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^VRBL\s*\(([^)]+)\)\s+(.+)").unwrap());
static SINGLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^VRBL\s+([A-Za-z][A-Za-z0-9_]*)\s+(.+)").unwrap());

/// One name bound to a parsed type spec, out of a (possibly grouped) VRBL
/// statement.
pub struct ParsedVrbl {
    pub name: String,
    pub type_spec: TypeSpec,
    pub modifier: Option<Modifier>,
}

/// Parse a `VRBL` statement (with any leading modifier already present in
/// `statement`) into one `ParsedVrbl` per declared name.
pub fn parse_vrbl(statement: &str) -> Vec<ParsedVrbl> {
    let (modifier, stmt) = Modifier::strip_leading(statement);

    if let Some(caps) = MULTI_RE.captures(stmt) {
        let names = caps.get(1).unwrap().as_str();
        let type_spec_text = caps.get(2).unwrap().as_str();
        let parsed = parse_type_spec(type_spec_text);
        return names
            .split(',')
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(|name| ParsedVrbl {
                name: name.to_ascii_uppercase(),
                type_spec: parsed.clone(),
                modifier,
            })
            .collect();
    }

    if let Some(caps) = SINGLE_RE.captures(stmt) {
        let name = caps.get(1).unwrap().as_str().to_ascii_uppercase();
        let type_spec_text = caps.get(2).unwrap().as_str();
        return vec![ParsedVrbl {
            name,
            type_spec: parse_type_spec(type_spec_text),
            modifier,
        }];
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Mode;

    #[test]
    fn single_integer_variable() {
        let parsed = parse_vrbl("VRBL ALT I 16 S");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "ALT");
        assert!(matches!(parsed[0].type_spec.mode, Mode::Integer));
        assert_eq!(parsed[0].type_spec.bits, Some(16));
    }

    #[test]
    fn grouped_fixed_point_variables() {
        let parsed = parse_vrbl("VRBL (LAT, LON) A 32 S 16");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "LAT");
        assert_eq!(parsed[1].name, "LON");
        assert!(matches!(parsed[0].type_spec.mode, Mode::Fixed));
        assert_eq!(parsed[0].type_spec.frac_bits, Some(16));
    }

    #[test]
    fn modifier_is_stripped_and_recorded() {
        let parsed = parse_vrbl("(EXTDEF) VRBL FLAG B");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "FLAG");
        assert_eq!(parsed[0].modifier, Some(Modifier::ExtDef));
    }

    #[test]
    fn malformed_statement_yields_nothing() {
        assert!(parse_vrbl("VRBL").is_empty());
    }
}
