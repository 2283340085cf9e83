//! Statement classifier: routes one logical statement to a declaration
//! handler based on leading/embedded keywords.
//!
//! Grounded on `CMS2SemanticParser._parse_statement`'s `if/elif` chain;
//! the precedence order below is copied from it verbatim, including the
//! `'END-X' not in upper` guards that keep an opener from also matching
//! its own closer's substring.

/// Which declaration handler a statement routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    SysDdStart,
    EndSysDd,
    SysProcStart,
    EndSysProc,
    LocDdStart,
    EndLocDd,
    Vrbl,
    Table,
    EndTable,
    Field,
    Type,
    EndType,
    Procedure,
    ExecProc,
    EndProc,
    Function,
    EndFunction,
    Cmode,
    Unrecognised,
}

/// Classify an already-uppercased statement.
pub fn classify(upper: &str) -> Kind {
    if upper.contains("SYS-DD") && !upper.contains("END-SYS-DD") {
        Kind::SysDdStart
    } else if upper.contains("END-SYS-DD") {
        Kind::EndSysDd
    } else if upper.contains("SYS-PROC") && !upper.contains("END-SYS-PROC") {
        Kind::SysProcStart
    } else if upper.contains("END-SYS-PROC") {
        Kind::EndSysProc
    } else if upper.starts_with("LOC-DD") || upper.contains(" LOC-DD") {
        Kind::LocDdStart
    } else if upper.contains("END-LOC-DD") {
        Kind::EndLocDd
    } else if is_vrbl(upper) {
        Kind::Vrbl
    } else if is_table(upper) {
        Kind::Table
    } else if upper.contains("END-TABLE") {
        Kind::EndTable
    } else if upper.starts_with("FIELD") {
        Kind::Field
    } else if upper.starts_with("TYPE") && !upper.contains("END-TYPE") {
        Kind::Type
    } else if upper.contains("END-TYPE") {
        Kind::EndType
    } else if is_procedure(upper) {
        Kind::Procedure
    } else if is_exec_proc(upper) {
        Kind::ExecProc
    } else if upper.contains("END-PROC") {
        Kind::EndProc
    } else if is_function(upper) {
        Kind::Function
    } else if upper.contains("END-FUNCTION") {
        Kind::EndFunction
    } else if upper.starts_with("CMODE") {
        Kind::Cmode
    } else {
        Kind::Unrecognised
    }
}

fn is_vrbl(upper: &str) -> bool {
    upper.starts_with("VRBL")
        || upper.contains(" VRBL ")
        || upper.starts_with("(EXTDEF) VRBL")
        || upper.starts_with("(EXTREF) VRBL")
        || upper.starts_with("(LOCREF) VRBL")
        || upper.starts_with("(TRANSREF) VRBL")
}

fn is_table(upper: &str) -> bool {
    upper.starts_with("TABLE") || upper.contains(" TABLE ")
}

fn is_procedure(upper: &str) -> bool {
    upper.starts_with("PROCEDURE")
        || upper.contains(" PROCEDURE ")
        || upper.starts_with("(EXTDEF) PROCEDURE")
        || upper.starts_with("(EXTREF) PROCEDURE")
}

fn is_exec_proc(upper: &str) -> bool {
    upper.starts_with("EXEC-PROC") || upper.contains(" EXEC-PROC ")
}

fn is_function(upper: &str) -> bool {
    upper.starts_with("FUNCTION") || upper.contains(" FUNCTION ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_block_openers_and_closers() {
        assert_eq!(classify("DDX SYS-DD"), Kind::SysDdStart);
        assert_eq!(classify("END-SYS-DD DDX"), Kind::EndSysDd);
        assert_eq!(classify("TESTSP SYS-PROC"), Kind::SysProcStart);
        assert_eq!(classify("TESTSP SYS-PROC-REN"), Kind::SysProcStart);
        assert_eq!(classify("END-SYS-PROC TESTSP"), Kind::EndSysProc);
    }

    #[test]
    fn routes_declarations() {
        assert_eq!(classify("VRBL ALT I 16 S"), Kind::Vrbl);
        assert_eq!(classify("(EXTDEF) VRBL ALT I 16 S"), Kind::Vrbl);
        assert_eq!(classify("TABLE WP V MEDIUM 100"), Kind::Table);
        assert_eq!(classify("END-TABLE WP"), Kind::EndTable);
        assert_eq!(classify("FIELD X I 16 S"), Kind::Field);
        assert_eq!(classify("TYPE MODE 'OFF'"), Kind::Type);
        assert_eq!(classify("END-TYPE MODE"), Kind::EndType);
        assert_eq!(classify("PROCEDURE UPDATE INPUT A"), Kind::Procedure);
        assert_eq!(classify("EXEC-PROC BOOT INPUT A"), Kind::ExecProc);
        assert_eq!(classify("END-PROC UPDATE"), Kind::EndProc);
        assert_eq!(classify("FUNCTION CALC(P1)"), Kind::Function);
        assert_eq!(classify("END-FUNCTION CALC"), Kind::EndFunction);
        assert_eq!(classify("CMODE O"), Kind::Cmode);
    }

    #[test]
    fn unrecognised_falls_through() {
        assert_eq!(classify("SET ALTITUDE TO ALTITUDE + 1"), Kind::Unrecognised);
    }
}
