//! `TABLE` declaration parsing.
//!
//! Grounded on `_parse_table_declaration` in
//! `original_source/cms2_semantic_parser.py`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Packing, TableKind};

static TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^TABLE\s+([A-Za-z][A-Za-z0-9_]*)\s+([VH])\s*(NONE|MEDIUM|DENSE)?\s*(?:\(([^)]+)\))?\s*(?:INDIRECT\s+)?(\d+|[A-Za-z][A-Za-z0-9_]*)?",
    )
    .unwrap()
});
static MJ_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bMJ\s+([A-Za-z][A-Za-z0-9]*)").unwrap());

pub struct ParsedTable {
    pub name: String,
    pub table_type: TableKind,
    pub packing: Packing,
    pub type_spec: Option<String>,
    pub item_count: Option<u64>,
    pub is_indirect: bool,
    pub major_index: Option<String>,
}

/// Parse a `TABLE` declaration statement, or `None` if it doesn't match the
/// expected grammar.
pub fn parse_table(statement: &str) -> Option<ParsedTable> {
    let caps = TABLE_RE.captures(statement)?;

    let name = caps.get(1)?.as_str().to_ascii_uppercase();
    let table_type = match caps.get(2).map(|m| m.as_str().to_ascii_uppercase()).as_deref() {
        Some("H") => TableKind::Horizontal,
        _ => TableKind::Vertical,
    };
    let packing = match caps.get(3).map(|m| m.as_str().to_ascii_uppercase()).as_deref() {
        Some("MEDIUM") => Packing::Medium,
        Some("DENSE") => Packing::Dense,
        _ => Packing::None,
    };
    let type_spec = caps.get(4).map(|m| m.as_str().to_string());
    let count_str = caps.get(5).map(|m| m.as_str());
    let item_count = count_str
        .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
        .and_then(|s| s.parse().ok());
    let is_indirect = statement.to_ascii_uppercase().contains("INDIRECT");
    let major_index = MJ_RE
        .captures(statement)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_uppercase());

    Some(ParsedTable {
        name,
        table_type,
        packing,
        type_spec,
        item_count,
        is_indirect,
        major_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_with_packing_and_count() {
        let table = parse_table("TABLE WP V MEDIUM 100").unwrap();
        assert_eq!(table.name, "WP");
        assert_eq!(table.table_type, TableKind::Vertical);
        assert_eq!(table.packing, Packing::Medium);
        assert_eq!(table.item_count, Some(100));
    }

    #[test]
    fn defaults_to_vertical_none_packing() {
        let table = parse_table("TABLE SIMPLE H").unwrap();
        assert_eq!(table.table_type, TableKind::Horizontal);
        assert_eq!(table.packing, Packing::None);
    }

    #[test]
    fn named_count_is_not_parsed_as_integer() {
        let table = parse_table("TABLE WP V NMAX").unwrap();
        assert_eq!(table.item_count, None);
    }

    #[test]
    fn major_index_extracted_anywhere_in_statement() {
        let table = parse_table("TABLE WP V MEDIUM 100 MJ IDX").unwrap();
        assert_eq!(table.major_index.as_deref(), Some("IDX"));
    }

    #[test]
    fn indirect_flag() {
        let table = parse_table("TABLE WP V INDIRECT 10").unwrap();
        assert!(table.is_indirect);
    }
}
