//! Entities and the semantic model they live in.
//!
//! Mirrors the dataclasses in the original CMS-2 semantic parser one for
//! one: [`VariableDefinition`], [`TableDefinition`], [`FieldDefinition`],
//! [`ProcedureDefinition`], [`FunctionDefinition`], [`TypeDefinition`],
//! [`SystemDataBlock`], [`SystemProcBlock`].

use std::hash::BuildHasherDefault;

use indexmap::IndexMap;

/// Insertion-order-preserving map keyed by canonical (uppercase) name.
pub type NameMap<V> = IndexMap<String, V, BuildHasherDefault<ahash::AHasher>>;

/// CMS-2 linkage modifier: exported, imported, local, transient-relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    ExtDef,
    ExtRef,
    LocRef,
    TransRef,
}

impl Modifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::ExtDef => "EXTDEF",
            Modifier::ExtRef => "EXTREF",
            Modifier::LocRef => "LOCREF",
            Modifier::TransRef => "TRANSREF",
        }
    }

    /// Recognise a leading `(EXTDEF)`-style modifier, returning the
    /// modifier and the remainder of the statement with it stripped.
    pub fn strip_leading<'a>(stmt: &'a str) -> (Option<Modifier>, &'a str) {
        const MODS: &[(&str, Modifier)] = &[
            ("(EXTDEF)", Modifier::ExtDef),
            ("(EXTREF)", Modifier::ExtRef),
            ("(LOCREF)", Modifier::LocRef),
            ("(TRANSREF)", Modifier::TransRef),
        ];
        let trimmed = stmt.trim_start();
        let upper_prefix_len = 12usize.min(trimmed.len());
        let upper = trimmed[..upper_prefix_len].to_ascii_uppercase();
        for (tag, modifier) in MODS {
            if upper.starts_with(tag) {
                return (Some(*modifier), trimmed[tag.len()..].trim_start());
            }
        }
        (None, trimmed)
    }
}

/// CMS-2 data type ("mode" in the manual's terminology).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Integer,
    Fixed,
    Float,
    Boolean,
    Char,
    Status,
    Universal,
    Table,
    #[default]
    Unknown,
}

impl Mode {
    /// The CMS-2 type-tag spelling used as a hover/completion fallback.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Integer => "I",
            Mode::Fixed => "A",
            Mode::Float => "F",
            Mode::Boolean => "B",
            Mode::Char => "H",
            Mode::Status => "STATUS",
            Mode::Universal => "UNIV",
            Mode::Table => "TABLE",
            Mode::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VariableDefinition {
    pub name: String,
    pub mode: Mode,
    pub bits: Option<u32>,
    pub signed: bool,
    pub frac_bits: Option<u32>,
    pub char_length: Option<u32>,
    pub status_values: Vec<String>,
    pub preset_value: Option<String>,
    pub modifier: Option<Modifier>,
    pub line_number: usize,
    pub column_start: Option<usize>,
    pub column_end: Option<usize>,
    pub parent_block: Option<String>,
}

impl VariableDefinition {
    pub fn new(name: impl Into<String>, line_number: usize) -> Self {
        Self {
            name: name.into(),
            signed: true,
            line_number,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldDefinition {
    pub name: String,
    pub mode: Mode,
    pub bits: Option<u32>,
    pub signed: bool,
    pub frac_bits: Option<u32>,
    pub char_length: Option<u32>,
    pub start_word: Option<u32>,
    pub start_bit: Option<u32>,
    pub preset_values: Vec<String>,
    pub line_number: usize,
    pub parent_table: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Vertical,
    Horizontal,
}

impl TableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TableKind::Vertical => "V",
            TableKind::Horizontal => "H",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packing {
    None,
    Medium,
    Dense,
}

impl Default for Packing {
    fn default() -> Self {
        Packing::None
    }
}

impl Packing {
    pub fn as_str(self) -> &'static str {
        match self {
            Packing::None => "NONE",
            Packing::Medium => "MEDIUM",
            Packing::Dense => "DENSE",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableDefinition {
    pub name: String,
    pub table_type: TableKind,
    pub packing: Packing,
    pub item_count: Option<u64>,
    pub type_spec: Option<String>,
    pub is_indirect: bool,
    pub major_index: Option<String>,
    pub modifier: Option<Modifier>,
    pub fields: NameMap<FieldDefinition>,
    pub line_start: usize,
    pub line_end: Option<usize>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>, line_start: usize) -> Self {
        Self {
            name: name.into(),
            table_type: TableKind::Vertical,
            packing: Packing::None,
            item_count: None,
            type_spec: None,
            is_indirect: false,
            major_index: None,
            modifier: None,
            fields: NameMap::default(),
            line_start,
            line_end: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcedureDefinition {
    pub name: String,
    pub is_exec: bool,
    pub input_params: Vec<String>,
    pub output_params: Vec<String>,
    pub exit_params: Vec<String>,
    pub modifier: Option<Modifier>,
    pub local_vars: NameMap<VariableDefinition>,
    pub line_start: usize,
    pub line_end: Option<usize>,
}

impl ProcedureDefinition {
    pub fn new(name: impl Into<String>, line_start: usize) -> Self {
        Self {
            name: name.into(),
            is_exec: false,
            input_params: Vec::new(),
            output_params: Vec::new(),
            exit_params: Vec::new(),
            modifier: None,
            local_vars: NameMap::default(),
            line_start,
            line_end: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FunctionDefinition {
    pub name: String,
    pub input_params: Vec<String>,
    pub return_type: Option<String>,
    pub modifier: Option<Modifier>,
    pub local_vars: NameMap<VariableDefinition>,
    pub line_start: usize,
    pub line_end: Option<usize>,
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>, line_start: usize) -> Self {
        Self {
            name: name.into(),
            input_params: Vec::new(),
            return_type: None,
            modifier: None,
            local_vars: NameMap::default(),
            line_start,
            line_end: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeDefinition {
    pub name: String,
    pub base_type: Option<String>,
    pub packing: Packing,
    pub status_values: Vec<String>,
    pub fields: NameMap<FieldDefinition>,
    pub line_start: usize,
    pub line_end: Option<usize>,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, line_start: usize) -> Self {
        Self {
            name: name.into(),
            base_type: None,
            packing: Packing::None,
            status_values: Vec::new(),
            fields: NameMap::default(),
            line_start,
            line_end: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SystemDataBlock {
    pub name: String,
    pub variables: NameMap<VariableDefinition>,
    pub tables: NameMap<TableDefinition>,
    pub types: NameMap<TypeDefinition>,
    pub line_start: usize,
    pub line_end: Option<usize>,
}

impl SystemDataBlock {
    pub fn new(name: impl Into<String>, line_start: usize) -> Self {
        Self {
            name: name.into(),
            variables: NameMap::default(),
            tables: NameMap::default(),
            types: NameMap::default(),
            line_start,
            line_end: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SystemProcBlock {
    pub name: String,
    pub is_reentrant: bool,
    pub procedures: NameMap<ProcedureDefinition>,
    pub functions: NameMap<FunctionDefinition>,
    pub local_data: NameMap<VariableDefinition>,
    pub line_start: usize,
    pub line_end: Option<usize>,
}

impl SystemProcBlock {
    pub fn new(name: impl Into<String>, is_reentrant: bool, line_start: usize) -> Self {
        Self {
            name: name.into(),
            is_reentrant,
            procedures: NameMap::default(),
            functions: NameMap::default(),
            local_data: NameMap::default(),
            line_start,
            line_end: None,
        }
    }
}

/// Constant radix used by `CMODE` statements: decimal or octal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantMode {
    Decimal,
    Octal,
}

impl Default for ConstantMode {
    fn default() -> Self {
        ConstantMode::Decimal
    }
}

/// The semantic model produced by parsing one document.
///
/// Each parse produces a fresh model; there is no incremental reparsing.
/// Registries are last-writer-wins: re-declaring a name overwrites the
/// previous entity under that key without error.
#[derive(Debug, Clone, Default)]
pub struct SemanticModel {
    pub variables: NameMap<VariableDefinition>,
    pub tables: NameMap<TableDefinition>,
    pub types: NameMap<TypeDefinition>,
    pub procedures: NameMap<ProcedureDefinition>,
    pub functions: NameMap<FunctionDefinition>,
    pub sys_data_blocks: NameMap<SystemDataBlock>,
    pub sys_proc_blocks: NameMap<SystemProcBlock>,

    pub current_scope: String,
    pub scope_stack: Vec<String>,
    pub constant_mode: ConstantMode,
}

pub const GLOBAL_SCOPE: &str = "GLOBAL";

impl SemanticModel {
    pub fn new() -> Self {
        Self {
            current_scope: GLOBAL_SCOPE.to_string(),
            ..Default::default()
        }
    }

    /// Add a variable under both its bare name and its scope-qualified name
    /// (iff currently inside a block). Last writer wins on either key.
    pub fn add_variable(&mut self, var: VariableDefinition) {
        let key = if self.current_scope != GLOBAL_SCOPE {
            format!("{}.{}", self.current_scope, var.name)
        } else {
            var.name.clone()
        };
        self.variables.insert(var.name.clone(), var.clone());
        self.variables.insert(key, var);
    }

    /// Look up a variable: scope-qualified name first, then bare name.
    pub fn get_variable(&self, name: &str) -> Option<&VariableDefinition> {
        let scoped = format!("{}.{}", self.current_scope, name);
        self.variables
            .get(&scoped)
            .or_else(|| self.variables.get(name))
    }

    pub fn add_table(&mut self, table: TableDefinition) {
        self.tables.insert(table.name.clone(), table);
    }

    pub fn get_table(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.get(name)
    }

    pub fn add_procedure(&mut self, proc: ProcedureDefinition) {
        self.procedures.insert(proc.name.clone(), proc);
    }

    pub fn get_procedure(&self, name: &str) -> Option<&ProcedureDefinition> {
        self.procedures.get(name)
    }

    pub fn add_function(&mut self, func: FunctionDefinition) {
        self.functions.insert(func.name.clone(), func);
    }

    pub fn get_function(&self, name: &str) -> Option<&FunctionDefinition> {
        self.functions.get(name)
    }

    pub fn add_type(&mut self, typedef: TypeDefinition) {
        self.types.insert(typedef.name.clone(), typedef);
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// All top-level symbol names (for completion/outline dedup), with
    /// scope-qualified (`SCOPE.NAME`) keys filtered out.
    pub fn get_all_symbols(&self) -> Vec<&str> {
        let mut seen = crate::collections::NameSet::default();
        let mut out = Vec::new();
        for name in self
            .variables
            .keys()
            .chain(self.tables.keys())
            .chain(self.procedures.keys())
            .chain(self.functions.keys())
            .chain(self.types.keys())
        {
            if name.contains('.') {
                continue;
            }
            if seen.insert(name.as_str()) {
                out.push(name.as_str());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_variable_reachable_under_both_keys() {
        let mut model = SemanticModel::new();
        model.current_scope = "UPDATE".to_string();
        model.add_variable(VariableDefinition::new("X", 3));

        assert!(model.variables.contains_key("X"));
        assert!(model.variables.contains_key("UPDATE.X"));

        // Lookup from inside the scope prefers the qualified entry.
        assert_eq!(model.get_variable("X").unwrap().line_number, 3);

        model.current_scope = GLOBAL_SCOPE.to_string();
        assert_eq!(model.get_variable("X").unwrap().line_number, 3);
    }

    #[test]
    fn redeclaration_overwrites_last_writer_wins() {
        let mut model = SemanticModel::new();
        model.add_variable(VariableDefinition::new("ALT", 1));
        model.add_variable(VariableDefinition::new("ALT", 9));
        assert_eq!(model.get_variable("ALT").unwrap().line_number, 9);
        assert_eq!(model.variables.len(), 1);
    }

    #[test]
    fn get_all_symbols_excludes_dotted_keys() {
        let mut model = SemanticModel::new();
        model.current_scope = "PROC".to_string();
        model.add_variable(VariableDefinition::new("X", 0));
        let symbols = model.get_all_symbols();
        assert_eq!(symbols, vec!["X"]);
    }
}
