//! `SYS-DD`/`SYS-PROC`/`LOC-DD` block-opener name extraction.
//!
//! Grounded on `_parse_sys_dd_start`/`_parse_sys_proc_start` in
//! `original_source/cms2_semantic_parser.py`. The block-closing behavior
//! itself (closing the most-recently-opened block regardless of any
//! trailing name on the `END-*` statement) lives in the orchestrator.

use once_cell::sync::Lazy;
use regex::Regex;

static SYS_DD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([A-Za-z][A-Za-z0-9_]*)\s+SYS-DD").unwrap());
static SYS_PROC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([A-Za-z][A-Za-z0-9_]*)\s+SYS-PROC").unwrap());

/// Extract the name from a `<name> SYS-DD` opener.
pub fn parse_sys_dd_start(statement: &str) -> Option<String> {
    SYS_DD_RE
        .captures(statement)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_uppercase())
}

/// Extract the name and reentrancy flag from a `<name> SYS-PROC`/
/// `<name> SYS-PROC-REN` opener.
pub fn parse_sys_proc_start(statement: &str) -> Option<(String, bool)> {
    let is_reentrant = statement.to_ascii_uppercase().contains("SYS-PROC-REN");
    let caps = SYS_PROC_RE.captures(statement)?;
    let name = caps.get(1)?.as_str().to_ascii_uppercase();
    Some((name, is_reentrant))
}
