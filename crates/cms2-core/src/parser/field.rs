//! `FIELD` declaration parsing (only meaningful inside an open `TABLE`).
//!
//! Grounded on `_parse_field_declaration` in
//! `original_source/cms2_semantic_parser.py`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Mode;

static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^FIELD\s+([A-Za-z][A-Za-z0-9_]*)\s+([IAFBHC])\s*(\d+)?\s*(S|U)?\s*(\d+)?\s*(?:(\d+)\s+(\d+))?\s*(?:P\s+(.+))?",
    )
    .unwrap()
});

pub struct ParsedField {
    pub name: String,
    pub mode: Mode,
    pub bits: Option<u32>,
    pub signed: bool,
    pub frac_bits: Option<u32>,
    pub char_length: Option<u32>,
    pub start_word: Option<u32>,
    pub start_bit: Option<u32>,
    pub preset_values: Vec<String>,
}

/// Parse a `FIELD` statement. Returns `None` if the grammar doesn't match;
/// the caller is responsible for discarding the result when no table is
/// currently open (a `FIELD` outside a table is a no-op).
pub fn parse_field(statement: &str) -> Option<ParsedField> {
    let caps = FIELD_RE.captures(statement)?;

    let name = caps.get(1)?.as_str().to_ascii_uppercase();
    let type_char = caps.get(2)?.as_str().to_ascii_uppercase();
    let bits: Option<u32> = caps.get(3).and_then(|m| m.as_str().parse().ok());
    let signed = caps.get(4).map(|m| m.as_str().to_ascii_uppercase()) != Some("U".to_string());
    let frac_bits = caps.get(5).and_then(|m| m.as_str().parse().ok());
    let start_word = caps.get(6).and_then(|m| m.as_str().parse().ok());
    let start_bit = caps.get(7).and_then(|m| m.as_str().parse().ok());
    let preset_values = caps
        .get(8)
        .map(|m| vec![m.as_str().to_string()])
        .unwrap_or_default();

    let mode = match type_char.as_str() {
        "I" => Mode::Integer,
        "A" => Mode::Fixed,
        "F" => Mode::Float,
        "B" => Mode::Boolean,
        "H" | "C" => Mode::Char,
        _ => Mode::Unknown,
    };
    let char_length = if matches!(mode, Mode::Char) { bits } else { None };

    Some(ParsedField {
        name,
        mode,
        bits,
        signed,
        frac_bits,
        char_length,
        start_word,
        start_bit,
        preset_values,
    })
}
