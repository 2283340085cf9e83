//! `TYPE` declaration parsing: status (enumeration) and structured forms.
//!
//! Grounded on `_parse_type_declaration` in
//! `original_source/cms2_semantic_parser.py`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Packing;

static STATUS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^TYPE\s+([A-Za-z][A-Za-z0-9_]*)\s+(.+)").unwrap());
static STRUCTURED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^TYPE\s+([A-Za-z][A-Za-z0-9_]*)\s*(NONE|MEDIUM|DENSE)?").unwrap());
static STATUS_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)'([A-Za-z][A-Za-z0-9]*)'").unwrap());

pub enum ParsedType {
    /// A status (enumeration) type — fully resolved, no open block.
    Status {
        name: String,
        values: Vec<String>,
    },
    /// A structured type — opens a block closed by `END-TYPE`.
    Structured { name: String, packing: Packing },
}

/// Parse a `TYPE` declaration statement.
pub fn parse_type(statement: &str) -> Option<ParsedType> {
    if statement.contains('\'') {
        let caps = STATUS_RE.captures(statement)?;
        let name = caps.get(1)?.as_str().to_ascii_uppercase();
        let rest = caps.get(2)?.as_str();
        let values: Vec<String> = STATUS_VALUE_RE
            .captures_iter(rest)
            .filter_map(|c| c.get(1).map(|m| m.as_str().to_ascii_uppercase()))
            .collect();
        return Some(ParsedType::Status { name, values });
    }

    let caps = STRUCTURED_RE.captures(statement)?;
    let name = caps.get(1)?.as_str().to_ascii_uppercase();
    let packing = match caps.get(2).map(|m| m.as_str().to_ascii_uppercase()).as_deref() {
        Some("MEDIUM") => Packing::Medium,
        Some("DENSE") => Packing::Dense,
        _ => Packing::None,
    };
    Some(ParsedType::Structured { name, packing })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_type_with_enumerators() {
        match parse_type("TYPE MODE 'OFF','STANDBY','ACTIVE'").unwrap() {
            ParsedType::Status { name, values } => {
                assert_eq!(name, "MODE");
                assert_eq!(values, vec!["OFF", "STANDBY", "ACTIVE"]);
            }
            _ => panic!("expected a status type"),
        }
    }

    #[test]
    fn structured_type_opens_a_block() {
        match parse_type("TYPE POINT DENSE").unwrap() {
            ParsedType::Structured { name, packing } => {
                assert_eq!(name, "POINT");
                assert_eq!(packing, Packing::Dense);
            }
            _ => panic!("expected a structured type"),
        }
    }
}
