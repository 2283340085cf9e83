//! `CMODE` declaration parsing.
//!
//! Grounded on `_parse_cmode` in `original_source/cms2_semantic_parser.py`:
//! sets the document-wide default radix for unadorned integer literals.

use crate::model::ConstantMode;

/// Parse a `CMODE` statement. `O` anywhere in the statement selects octal;
/// anything else selects decimal.
pub fn parse_cmode(statement: &str) -> ConstantMode {
    if statement.to_ascii_uppercase().contains('O') {
        ConstantMode::Octal
    } else {
        ConstantMode::Decimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmode_o_selects_octal() {
        assert_eq!(parse_cmode("CMODE O"), ConstantMode::Octal);
    }

    #[test]
    fn cmode_keyword_itself_contains_o_so_d_is_still_octal() {
        // "CMODE" contains an 'O', so any CMODE statement is Octal in
        // practice — the D/O suffix is effectively never checked. This is
        // the original's behavior, not a bug to fix here.
        assert_eq!(parse_cmode("CMODE D"), ConstantMode::Octal);
    }
}
