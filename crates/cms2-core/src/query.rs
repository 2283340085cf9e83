//! Positional queries over a parsed document: identifier-at-position,
//! completion candidates, hover payloads, definition lookup, and reference
//! scanning.
//!
//! Grounded on `get_completions_at_position`/`get_hover_info`/`_format_type`
//! in `original_source/cms2_semantic_parser.py` and the handler bodies in
//! `original_source/cms2_lsp_server.py`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::keywords::{self, PREDEFINED_FUNCTIONS, RESERVED_WORDS};
use crate::model::{Mode, SemanticModel, VariableDefinition};

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([A-Za-z][A-Za-z0-9_]*)\b").unwrap());

fn char_slice(line: &str, end: usize) -> String {
    line.chars().take(end).collect()
}

/// The identifier touching `character` (inclusive on both ends, matching
/// the original's `match.start() <= column <= match.end()`), upper-cased.
pub fn word_at_position(line: &str, character: usize) -> Option<String> {
    for m in WORD_RE.find_iter(line) {
        let start = line[..m.start()].chars().count();
        let end = line[..m.end()].chars().count();
        if start <= character && character <= end {
            return Some(m.as_str().to_ascii_uppercase());
        }
    }
    None
}

/// The last whitespace-delimited token before `character`, used to filter
/// completion candidates by prefix.
pub fn completion_prefix(line: &str, character: usize) -> String {
    let upto = char_slice(line, character);
    let trimmed = upto.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    trimmed
        .split_whitespace()
        .last()
        .unwrap_or("")
        .to_ascii_uppercase()
}

/// LSP `CompletionItemKind` codes used below, named for readability.
pub mod completion_kind {
    pub const KEYWORD: i32 = 14;
    pub const FUNCTION: i32 = 3;
    pub const VARIABLE: i32 = 6;
    pub const STRUCT: i32 = 22;
    pub const METHOD: i32 = 2;
    pub const TYPE_PARAMETER: i32 = 25;
}

pub struct CompletionItem {
    pub label: String,
    pub kind: i32,
    pub detail: String,
    pub documentation: String,
}

/// Render the CMS-2 type header text for a variable (e.g. `I 16 S`).
pub fn format_type(var: &VariableDefinition) -> String {
    match var.mode {
        Mode::Integer => format!("I {} {}", var.bits.unwrap_or(0), if var.signed { "S" } else { "U" }),
        Mode::Fixed => format!(
            "A {} {} {}",
            var.bits.unwrap_or(0),
            if var.signed { "S" } else { "U" },
            var.frac_bits.unwrap_or(0)
        ),
        Mode::Float => "F".to_string(),
        Mode::Boolean => "B".to_string(),
        Mode::Char => format!("H {}", var.char_length.unwrap_or(0)),
        Mode::Status => {
            let mut vals = var
                .status_values
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            if var.status_values.len() > 3 {
                vals.push_str("...");
            }
            format!("STATUS ({vals})")
        }
        other => other.as_str().to_string(),
    }
}

/// Enumerate completion candidates for a prefix already extracted by
/// [`completion_prefix`]. Ordering matches the original: keywords, then
/// predefined functions, then variables/tables/procedures/functions/types.
pub fn completions(model: &SemanticModel, prefix: &str) -> Vec<CompletionItem> {
    let mut items = Vec::new();
    let matches_prefix = |candidate: &str| prefix.is_empty() || candidate.starts_with(prefix);

    for kw in RESERVED_WORDS {
        if matches_prefix(kw) {
            items.push(CompletionItem {
                label: kw.to_string(),
                kind: completion_kind::KEYWORD,
                detail: "CMS-2 keyword".to_string(),
                documentation: keywords::keyword_description(kw),
            });
        }
    }

    for func in PREDEFINED_FUNCTIONS {
        if matches_prefix(func) {
            items.push(CompletionItem {
                label: func.to_string(),
                kind: completion_kind::FUNCTION,
                detail: "Predefined function".to_string(),
                documentation: keywords::predefined_description(func),
            });
        }
    }

    for (name, var) in &model.variables {
        if name.contains('.') {
            continue;
        }
        if matches_prefix(name) {
            items.push(CompletionItem {
                label: name.clone(),
                kind: completion_kind::VARIABLE,
                detail: format_type(var),
                documentation: format!("Variable declared at line {}", var.line_number + 1),
            });
        }
    }

    for (name, table) in &model.tables {
        if matches_prefix(name) {
            items.push(CompletionItem {
                label: name.clone(),
                kind: completion_kind::STRUCT,
                detail: format!("TABLE {} {}", table.table_type.as_str(), table.packing.as_str()),
                documentation: format!("Table with {} fields", table.fields.len()),
            });
        }
    }

    for (name, proc) in &model.procedures {
        if matches_prefix(name) {
            let params: Vec<&str> = proc
                .input_params
                .iter()
                .chain(proc.output_params.iter())
                .map(|s| s.as_str())
                .collect();
            items.push(CompletionItem {
                label: name.clone(),
                kind: completion_kind::METHOD,
                detail: format!("PROCEDURE ({})", params.join(", ")),
                documentation: format!("Procedure at line {}", proc.line_start + 1),
            });
        }
    }

    for (name, func) in &model.functions {
        if matches_prefix(name) {
            items.push(CompletionItem {
                label: name.clone(),
                kind: completion_kind::FUNCTION,
                detail: format!("FUNCTION -> {}", func.return_type.as_deref().unwrap_or("void")),
                documentation: format!("Function at line {}", func.line_start + 1),
            });
        }
    }

    for (name, typedef) in &model.types {
        if matches_prefix(name) {
            items.push(CompletionItem {
                label: name.clone(),
                kind: completion_kind::TYPE_PARAMETER,
                detail: "TYPE".to_string(),
                documentation: format!("Type defined at line {}", typedef.line_start + 1),
            });
        }
    }

    items
}

/// Resolved hover subject, tagged by entity kind. Markdown rendering is a
/// dispatcher concern (see `cms2-lsp`); this is the structured payload.
pub enum HoverInfo<'a> {
    Variable {
        name: &'a str,
        cms2_type: String,
        modifier: Option<&'a str>,
        line: usize,
    },
    Table {
        name: &'a str,
        table_type: &'static str,
        packing: &'static str,
        item_count: Option<u64>,
        fields: Vec<&'a str>,
    },
    Procedure {
        name: &'a str,
        is_exec: bool,
        input_params: &'a [String],
        output_params: &'a [String],
    },
    Function {
        name: &'a str,
        input_params: &'a [String],
        return_type: Option<&'a str>,
    },
    Type {
        name: &'a str,
        status_values: &'a [String],
        packing: &'static str,
    },
    Keyword { name: String, description: String },
    PredefinedFunction { name: String, description: String },
}

/// Resolve the hover subject for `word`, checking variables, tables,
/// procedures, functions, types, keywords, and predefined functions in
/// that order.
pub fn hover_info<'a>(model: &'a SemanticModel, word: &str) -> Option<HoverInfo<'a>> {
    if let Some(var) = model.get_variable(word) {
        return Some(HoverInfo::Variable {
            name: &var.name,
            cms2_type: format_type(var),
            modifier: var.modifier.map(|m| m.as_str()),
            line: var.line_number,
        });
    }
    if let Some(table) = model.get_table(word) {
        return Some(HoverInfo::Table {
            name: &table.name,
            table_type: table.table_type.as_str(),
            packing: table.packing.as_str(),
            item_count: table.item_count,
            fields: table.fields.keys().map(|s| s.as_str()).collect(),
        });
    }
    if let Some(proc) = model.get_procedure(word) {
        return Some(HoverInfo::Procedure {
            name: &proc.name,
            is_exec: proc.is_exec,
            input_params: &proc.input_params,
            output_params: &proc.output_params,
        });
    }
    if let Some(func) = model.get_function(word) {
        return Some(HoverInfo::Function {
            name: &func.name,
            input_params: &func.input_params,
            return_type: func.return_type.as_deref(),
        });
    }
    if let Some(typedef) = model.get_type(word) {
        return Some(HoverInfo::Type {
            name: &typedef.name,
            status_values: &typedef.status_values,
            packing: typedef.packing.as_str(),
        });
    }
    if RESERVED_WORDS.contains(&word) {
        return Some(HoverInfo::Keyword {
            name: word.to_string(),
            description: keywords::keyword_description(word),
        });
    }
    if PREDEFINED_FUNCTIONS.contains(&word) {
        return Some(HoverInfo::PredefinedFunction {
            name: word.to_string(),
            description: keywords::predefined_description(word),
        });
    }
    None
}

/// Find the declaring line for `name`, checking variables, tables,
/// procedures, functions, then types.
pub fn find_definition(model: &SemanticModel, name: &str) -> Option<usize> {
    model
        .get_variable(name)
        .map(|v| v.line_number)
        .or_else(|| model.get_table(name).map(|t| t.line_start))
        .or_else(|| model.get_procedure(name).map(|p| p.line_start))
        .or_else(|| model.get_function(name).map(|f| f.line_start))
        .or_else(|| model.get_type(name).map(|t| t.line_start))
}

/// One occurrence of `word` in the document, as a (line, start_char, end_char)
/// triple (character offsets, matching LSP `Range` semantics).
pub struct Occurrence {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

/// Every case-insensitive, whole-word occurrence of `word` across `lines`.
pub fn find_references(lines: &[&str], word: &str) -> Vec<Occurrence> {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(word));
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };
    let mut out = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        for m in re.find_iter(line) {
            let start = line[..m.start()].chars().count();
            let end = line[..m.end()].chars().count();
            out.push(Occurrence { line: i, start, end });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConstantMode, VariableDefinition};

    #[test]
    fn word_at_position_finds_touching_identifier() {
        assert_eq!(word_at_position("VRBL ALTITUDE I 16 S", 6).as_deref(), Some("ALTITUDE"));
    }

    #[test]
    fn completion_prefix_takes_last_token() {
        assert_eq!(completion_prefix("VRBL ALT", 8), "ALT");
        assert_eq!(completion_prefix("VRBL ALT", 4), "VRBL");
    }

    #[test]
    fn completion_prefix_empty_when_line_is_blank_up_to_cursor() {
        assert_eq!(completion_prefix("   ", 2), "");
    }

    #[test]
    fn format_type_integer() {
        let mut var = VariableDefinition::new("ALT", 0);
        var.mode = Mode::Integer;
        var.bits = Some(16);
        var.signed = true;
        assert_eq!(format_type(&var), "I 16 S");
    }

    #[test]
    fn format_type_status_truncates_after_three() {
        let mut var = VariableDefinition::new("MODE", 0);
        var.mode = Mode::Status;
        var.status_values = vec!["A".into(), "B".into(), "C".into(), "D".into()];
        assert_eq!(format_type(&var), "STATUS (A, B, C...)");
    }

    #[test]
    fn completions_filters_by_prefix() {
        let mut model = SemanticModel::new();
        model.add_variable(VariableDefinition::new("ALTITUDE", 0));
        let items = completions(&model, "ALT");
        assert!(items.iter().any(|i| i.label == "ALTITUDE"));
        assert!(!items.iter().any(|i| i.label == "VRBL"));
    }

    #[test]
    fn find_references_is_whole_word_case_insensitive() {
        let lines = vec!["VRBL alt I 16 S $", "SET ALT TO ALTITUDE $"];
        let refs = find_references(&lines, "ALT");
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn constant_mode_default_is_decimal() {
        assert_eq!(SemanticModel::new().constant_mode, ConstantMode::Decimal);
    }
}
