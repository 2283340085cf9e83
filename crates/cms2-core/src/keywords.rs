//! Reserved-word and predefined-function tables.
//!
//! Reproduced verbatim (same membership) from `RESERVED_WORDS` and
//! `PREDEFINED_FUNCTIONS` in `original_source/cms2_semantic_parser.py`.
//! Completions and hover expose these directly, so the lists and
//! descriptions below are shipped as-is rather than re-derived.

/// CMS-2 reserved words (CMS-2Y Reference Manual M-5049, Section 3.3).
pub const RESERVED_WORDS: &[&str] = &[
    "ABS", "ALG", "AND", "BASE", "BEGIN", "BIT", "BY", "CAT", "CHAR", "CHECKID", "CIRC", "CLOSE",
    "CMODE", "COMMENT", "COMP", "CORAD", "CORRECT", "CSWITCH", "DATA", "DATAPOOL", "DEBUG",
    "DECODE", "DEFID", "DENSE", "DEP", "DIRECT", "DISPLAY", "ELSE", "ELSIF", "ENCODE", "END",
    "ENDFILE", "EQ", "EQUALS", "EVENP", "EXCHANGE", "EXEC", "EXIT", "FIELD", "FILE", "FIND",
    "FOR", "FORMAT", "FROM", "FUNCTION", "GOTO", "GT", "GTEQ", "HEAD", "IF", "INDIRECT", "INPUT",
    "INTO", "INVALID", "LIBS", "LOG", "LT", "LTEQ", "MEANS", "MEDIUM", "MODE", "NITEMS", "NONE",
    "NOT", "OCM", "OODP", "OPEN", "OPTIONS", "OR", "OUTPUT", "OVERFLOW", "OVERLAY", "PRINT",
    "PTRACE", "PUNCH", "RANGE", "READ", "REGS", "RESUME", "RETURN", "SAVING", "SET", "SHIFT",
    "SNAP", "SPILL", "STOP", "SWAP", "SWITCH", "SYSTEM", "TABLE", "THEN", "THRU", "TO", "TRACE",
    "TYPE", "UNTIL", "USING", "VALID", "VARY", "VARYING", "VRBL", "WHILE", "WITH", "WITHIN",
    "XOR", "SYS-DD", "SYS-PROC", "SYS-PROC-REN", "END-SYS-DD", "END-SYS-PROC", "LOC-DD",
    "END-LOC-DD", "AUTO-DD", "END-AUTO-DD", "PROCEDURE", "END-PROC", "EXEC-PROC", "END-FUNCTION",
    "END-TABLE", "END-TYPE", "END-SWITCH", "EXTDEF", "EXTREF", "LOCREF", "TRANSREF", "CONVERTIN",
    "CONVERTOUT", "STRINGFORM", "INPUTLIST", "OUTPUTLIST", "P-SWITCH", "END-P-SW", "L-SWITCH",
    "SYS-INDEX", "LOC-INDEX", "LOAD-VRBL", "NOTFOUND", "FOUND", "CASE", "LOOP", "KEY1", "KEY2",
    "KEY3",
];

/// Predefined (universal-scope) CMS-2 functions.
pub const PREDEFINED_FUNCTIONS: &[&str] = &[
    "ACDS2", "BAMS", "FIRST", "DRF", "SCALF", "ACDS", "CNT", "ICDS", "POS", "SIN", "ALDG",
    "COMPF", "IEXP", "PRED", "SUCC", "ANDF", "CONF", "ISIN", "RAD", "TDEF", "ASIN2", "COS",
    "LAST", "ROTATEHP", "VECTORHP", "ASIN", "EXP", "LENGTH", "REM", "VECTORP", "ATAN2", "FIL",
    "LN", "ROTATEP", "XORF", "ATAN", "ICOS", "ALOG", "ACOS", "ACOS2",
];

/// Human-readable description for a reserved word, used by completion
/// `documentation` fields and hover text.
pub fn keyword_description(keyword: &str) -> String {
    match keyword {
        "VRBL" => "Variable declaration".to_string(),
        "TABLE" => "Table (array/structure) declaration".to_string(),
        "FIELD" => "Field within a table or type".to_string(),
        "TYPE" => "Type definition".to_string(),
        "PROCEDURE" => "Procedure (subroutine) declaration".to_string(),
        "FUNCTION" => "Function declaration".to_string(),
        "EXEC-PROC" => "Executive procedure (runs in task state from executive)".to_string(),
        "SYS-DD" => "System Data Division - global data declarations".to_string(),
        "SYS-PROC" => "System Procedure block".to_string(),
        "SYS-PROC-REN" => "Re-entrant System Procedure block".to_string(),
        "LOC-DD" => "Local Data Division".to_string(),
        "SET" => "Assignment statement".to_string(),
        "IF" => "Conditional statement".to_string(),
        "THEN" => "Then clause of IF".to_string(),
        "ELSE" => "Else clause of IF".to_string(),
        "ELSIF" => "Else-if clause".to_string(),
        "GOTO" => "Unconditional branch".to_string(),
        "RETURN" => "Return from procedure/function".to_string(),
        "EXIT" => "Exit from loop".to_string(),
        "STOP" => "Stop program execution".to_string(),
        "BEGIN" => "Begin block".to_string(),
        "END" => "End block or loop".to_string(),
        "VARY" => "Counted loop (FOR loop)".to_string(),
        "WHILE" => "While loop".to_string(),
        "LOOP" => "General loop construct".to_string(),
        "CASE" => "Case/switch statement".to_string(),
        "FIND" => "Table search operation".to_string(),
        "DIRECT" => "Begin direct (assembly) code block".to_string(),
        "INPUT" => "Input parameter list".to_string(),
        "OUTPUT" => "Output parameter/statement".to_string(),
        "CORAD" => "Core address (memory address) function".to_string(),
        "DENSE" => "Dense packing mode".to_string(),
        "MEDIUM" => "Medium packing mode".to_string(),
        "NONE" => "No packing (word-aligned)".to_string(),
        "INDIRECT" => "Indirect table (pointer-based)".to_string(),
        "EXTDEF" => "External definition (exported)".to_string(),
        "EXTREF" => "External reference (imported)".to_string(),
        "LOCREF" => "Local reference".to_string(),
        "TRANSREF" => "Transient reference (uses transient base register)".to_string(),
        other => format!("CMS-2 keyword: {other}"),
    }
}

/// Human-readable description for a predefined function.
pub fn predefined_description(name: &str) -> String {
    match name {
        "SIN" => "Sine function (floating-point)".to_string(),
        "COS" => "Cosine function (floating-point)".to_string(),
        "ASIN" => "Arcsine function".to_string(),
        "ACOS" => "Arccosine function".to_string(),
        "ATAN" => "Arctangent function".to_string(),
        "ATAN2" => "Two-argument arctangent".to_string(),
        "EXP" => "Exponential function (e^x)".to_string(),
        "LN" => "Natural logarithm".to_string(),
        "ALOG" => "Natural logarithm (alias)".to_string(),
        "IEXP" => "Fixed-point exponential".to_string(),
        "ISIN" => "Fixed-point sine".to_string(),
        "ICOS" => "Fixed-point cosine".to_string(),
        "BAMS" => "Radians to BAMS conversion".to_string(),
        "RAD" => "BAMS to radians conversion".to_string(),
        "ABS" => "Absolute value".to_string(),
        "FIRST" => "First value of status type".to_string(),
        "LAST" => "Last value of status type".to_string(),
        "PRED" => "Predecessor value".to_string(),
        "SUCC" => "Successor value".to_string(),
        "LENGTH" => "Length of character string".to_string(),
        "CNT" => "Count function".to_string(),
        "REM" => "Remainder function".to_string(),
        "POS" => "Position function".to_string(),
        other => format!("Predefined function: {other}"),
    }
}
