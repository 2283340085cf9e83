//! `PROCEDURE`/`EXEC-PROC` declaration parsing.
//!
//! Grounded on `_parse_procedure_declaration`/`_parse_exec_proc_declaration`
//! in `original_source/cms2_semantic_parser.py`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Modifier;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:EXEC-PROC|PROCEDURE)\s+([A-Za-z][A-Za-z0-9_]*)").unwrap());
static INPUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bINPUT\s+(.+?)(?:\s+OUTPUT\b|\s+EXIT\b|$)").unwrap());
static OUTPUT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bOUTPUT\s+(.+?)(?:\s+EXIT\b|$)").unwrap());
static EXIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bEXIT\s+(.+)$").unwrap());

pub struct ParsedProcedure {
    pub name: String,
    pub is_exec: bool,
    pub input_params: Vec<String>,
    pub output_params: Vec<String>,
    pub exit_params: Vec<String>,
    pub modifier: Option<Modifier>,
}

fn split_params(text: &str) -> Vec<String> {
    text.split(',')
        .map(|p| p.trim().to_ascii_uppercase())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Parse a `PROCEDURE` or `EXEC-PROC` declaration. `EXEC-PROC` only
/// recognises `INPUT` parameters; `OUTPUT`/`EXIT` are a `PROCEDURE`-only
/// concept.
pub fn parse_procedure(statement: &str) -> Option<ParsedProcedure> {
    let (modifier, stmt) = Modifier::strip_leading(statement);
    let is_exec = stmt.to_ascii_uppercase().starts_with("EXEC-PROC");

    let caps = NAME_RE.captures(stmt)?;
    let name = caps.get(1)?.as_str().to_ascii_uppercase();

    let input_params = INPUT_RE
        .captures(stmt)
        .and_then(|c| c.get(1))
        .map(|m| split_params(m.as_str()))
        .unwrap_or_default();

    let (output_params, exit_params) = if is_exec {
        (Vec::new(), Vec::new())
    } else {
        let output = OUTPUT_RE
            .captures(stmt)
            .and_then(|c| c.get(1))
            .map(|m| split_params(m.as_str()))
            .unwrap_or_default();
        let exit = EXIT_RE
            .captures(stmt)
            .and_then(|c| c.get(1))
            .map(|m| split_params(m.as_str()))
            .unwrap_or_default();
        (output, exit)
    };

    Some(ParsedProcedure {
        name,
        is_exec,
        input_params,
        output_params,
        exit_params,
        modifier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procedure_with_input_output_exit() {
        let p = parse_procedure("PROCEDURE UPDATE INPUT A, B OUTPUT C EXIT D").unwrap();
        assert_eq!(p.name, "UPDATE");
        assert!(!p.is_exec);
        assert_eq!(p.input_params, vec!["A", "B"]);
        assert_eq!(p.output_params, vec!["C"]);
        assert_eq!(p.exit_params, vec!["D"]);
    }

    #[test]
    fn exec_proc_only_recognises_input() {
        let p = parse_procedure("EXEC-PROC RUN INPUT X").unwrap();
        assert!(p.is_exec);
        assert_eq!(p.input_params, vec!["X"]);
        assert!(p.output_params.is_empty());
        assert!(p.exit_params.is_empty());
    }

    #[test]
    fn procedure_with_no_params() {
        let p = parse_procedure("PROCEDURE INIT").unwrap();
        assert!(p.input_params.is_empty());
    }

    #[test]
    fn modifier_is_recorded() {
        let p = parse_procedure("(EXTDEF) PROCEDURE BOOT INPUT X").unwrap();
        assert_eq!(p.modifier, Some(Modifier::ExtDef));
    }
}
