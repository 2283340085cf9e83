//! `FUNCTION` declaration parsing.
//!
//! Grounded on `_parse_function_declaration` in
//! `original_source/cms2_semantic_parser.py`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Modifier;

static FUNCTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^FUNCTION\s+([A-Za-z][A-Za-z0-9_]*)\s*\(([^)]*)\)\s*(.+)?").unwrap()
});

pub struct ParsedFunction {
    pub name: String,
    pub input_params: Vec<String>,
    pub return_type: Option<String>,
    pub modifier: Option<Modifier>,
}

/// Parse a `FUNCTION` declaration: `FUNCTION NAME(p1, p2, ...) return_type`.
/// The parameter list is mandatory, matching the original grammar.
pub fn parse_function(statement: &str) -> Option<ParsedFunction> {
    let (modifier, stmt) = Modifier::strip_leading(statement);
    let caps = FUNCTION_RE.captures(stmt)?;
    let name = caps.get(1)?.as_str().to_ascii_uppercase();
    let input_params = caps
        .get(2)
        .map(|m| {
            m.as_str()
                .split(',')
                .map(|p| p.trim().to_ascii_uppercase())
                .filter(|p| !p.is_empty())
                .collect()
        })
        .unwrap_or_default();
    let return_type = caps
        .get(3)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    Some(ParsedFunction {
        name,
        input_params,
        return_type,
        modifier,
    })
}
