//! Declaration parsers and the orchestrating statement dispatcher.
//!
//! Grounded on `CMS2SemanticParser.parse`/`_parse_statement` in
//! `original_source/cms2_semantic_parser.py`: each statement produced by
//! [`crate::lexer::assemble_statements`] is classified, then routed to the
//! matching submodule below. A statement that doesn't match its handler's
//! grammar is silently dropped, mirroring the original's unconditional
//! `if match:` guards — the parser never panics on malformed input.

pub mod blocks;
pub mod cmode;
pub mod field;
pub mod function;
pub mod procedure;
pub mod table;
pub mod type_decl;
pub mod type_spec;
pub mod vrbl;

use crate::classifier::{classify, Kind};
use crate::lexer::assemble_statements;
use crate::model::{
    FieldDefinition, FunctionDefinition, ProcedureDefinition, SemanticModel, SystemDataBlock,
    SystemProcBlock, TableDefinition, TypeDefinition, VariableDefinition, GLOBAL_SCOPE,
};

/// Parse a complete CMS-2 source document into a fresh [`SemanticModel`].
/// Each call starts from a blank model; there is no incremental reparsing.
pub fn parse(source: &str) -> SemanticModel {
    let mut model = SemanticModel::new();

    let mut current_sys_dd: Option<String> = None;
    let mut current_sys_proc: Option<String> = None;
    let mut current_table: Option<String> = None;
    let mut current_type: Option<String> = None;
    let mut current_procedure: Option<String> = None;
    let mut current_function: Option<String> = None;

    for stmt in assemble_statements(source) {
        let upper = stmt.text.to_ascii_uppercase();
        let line_num = stmt.line_number;

        match classify(&upper) {
            Kind::SysDdStart => {
                if let Some(name) = blocks::parse_sys_dd_start(&stmt.text) {
                    model
                        .sys_data_blocks
                        .insert(name.clone(), SystemDataBlock::new(&name, line_num));
                    current_sys_dd = Some(name.clone());
                    model.current_scope = name;
                }
            }
            Kind::EndSysDd => {
                if let Some(name) = &current_sys_dd {
                    if let Some(block) = model.sys_data_blocks.get_mut(name) {
                        block.line_end = Some(line_num);
                    }
                }
                current_sys_dd = None;
                model.current_scope = GLOBAL_SCOPE.to_string();
            }
            Kind::SysProcStart => {
                if let Some((name, is_reentrant)) = blocks::parse_sys_proc_start(&stmt.text) {
                    model.sys_proc_blocks.insert(
                        name.clone(),
                        SystemProcBlock::new(&name, is_reentrant, line_num),
                    );
                    current_sys_proc = Some(name.clone());
                    model.current_scope = name;
                }
            }
            Kind::EndSysProc => {
                if let Some(name) = &current_sys_proc {
                    if let Some(block) = model.sys_proc_blocks.get_mut(name) {
                        block.line_end = Some(line_num);
                    }
                }
                current_sys_proc = None;
                model.current_scope = GLOBAL_SCOPE.to_string();
            }
            // LOC-DD only toggles a flag in the original that nothing else
            // reads; tracked here for parity but has no further effect.
            Kind::LocDdStart | Kind::EndLocDd => {}
            Kind::Vrbl => {
                for parsed in vrbl::parse_vrbl(&stmt.text) {
                    let mut var = VariableDefinition::new(parsed.name, line_num);
                    var.mode = parsed.type_spec.mode;
                    var.bits = parsed.type_spec.bits;
                    var.signed = parsed.type_spec.signed;
                    var.frac_bits = parsed.type_spec.frac_bits;
                    var.char_length = parsed.type_spec.char_length;
                    var.status_values = parsed.type_spec.status_values;
                    var.preset_value = parsed.type_spec.preset_value;
                    var.modifier = parsed.modifier;
                    var.parent_block = current_sys_dd.clone().or_else(|| current_sys_proc.clone());

                    model.add_variable(var.clone());
                    if let Some(name) = &current_sys_dd {
                        if let Some(block) = model.sys_data_blocks.get_mut(name) {
                            block.variables.insert(var.name.clone(), var.clone());
                        }
                    }
                    if let Some(name) = &current_procedure {
                        if let Some(proc) = model.procedures.get_mut(name) {
                            proc.local_vars.insert(var.name.clone(), var);
                        }
                    }
                }
            }
            Kind::Table => {
                if let Some(parsed) = table::parse_table(&stmt.text) {
                    let mut t = TableDefinition::new(parsed.name, line_num);
                    t.table_type = parsed.table_type;
                    t.packing = parsed.packing;
                    t.item_count = parsed.item_count;
                    t.type_spec = parsed.type_spec;
                    t.is_indirect = parsed.is_indirect;
                    t.major_index = parsed.major_index;

                    current_table = Some(t.name.clone());
                    model.add_table(t.clone());
                    if let Some(name) = &current_sys_dd {
                        if let Some(block) = model.sys_data_blocks.get_mut(name) {
                            block.tables.insert(t.name.clone(), t);
                        }
                    }
                }
            }
            Kind::EndTable => {
                if let Some(name) = &current_table {
                    if let Some(t) = model.tables.get_mut(name) {
                        t.line_end = Some(line_num);
                    }
                }
                current_table = None;
            }
            Kind::Field => {
                // A FIELD outside an open TABLE is a no-op.
                if let Some(table_name) = current_table.clone() {
                    if let Some(parsed) = field::parse_field(&stmt.text) {
                        if let Some(t) = model.tables.get_mut(&table_name) {
                            let field_def = FieldDefinition {
                                name: parsed.name,
                                mode: parsed.mode,
                                bits: parsed.bits,
                                signed: parsed.signed,
                                frac_bits: parsed.frac_bits,
                                char_length: parsed.char_length,
                                start_word: parsed.start_word,
                                start_bit: parsed.start_bit,
                                preset_values: parsed.preset_values,
                                line_number: line_num,
                                parent_table: table_name,
                            };
                            t.fields.insert(field_def.name.clone(), field_def);
                        }
                    }
                }
            }
            Kind::Type => match type_decl::parse_type(&stmt.text) {
                Some(type_decl::ParsedType::Status { name, values }) => {
                    let mut t = TypeDefinition::new(name, line_num);
                    t.status_values = values;
                    model.add_type(t.clone());
                    if let Some(sd) = &current_sys_dd {
                        if let Some(block) = model.sys_data_blocks.get_mut(sd) {
                            block.types.insert(t.name.clone(), t);
                        }
                    }
                }
                Some(type_decl::ParsedType::Structured { name, packing }) => {
                    let mut t = TypeDefinition::new(name, line_num);
                    t.packing = packing;
                    current_type = Some(t.name.clone());
                    model.add_type(t);
                }
                None => {}
            },
            Kind::EndType => {
                if let Some(name) = &current_type {
                    if let Some(t) = model.types.get_mut(name) {
                        t.line_end = Some(line_num);
                    }
                }
                current_type = None;
            }
            Kind::Procedure => {
                if let Some(parsed) = procedure::parse_procedure(&stmt.text) {
                    if !parsed.is_exec {
                        let mut p = ProcedureDefinition::new(parsed.name, line_num);
                        p.input_params = parsed.input_params;
                        p.output_params = parsed.output_params;
                        p.exit_params = parsed.exit_params;
                        p.modifier = parsed.modifier;

                        current_procedure = Some(p.name.clone());
                        model.add_procedure(p.clone());
                        if let Some(sp) = &current_sys_proc {
                            if let Some(block) = model.sys_proc_blocks.get_mut(sp) {
                                block.procedures.insert(p.name.clone(), p);
                            }
                        }
                    }
                }
            }
            Kind::ExecProc => {
                if let Some(parsed) = procedure::parse_procedure(&stmt.text) {
                    let mut p = ProcedureDefinition::new(parsed.name, line_num);
                    p.is_exec = true;
                    p.input_params = parsed.input_params;
                    p.modifier = parsed.modifier;

                    current_procedure = Some(p.name.clone());
                    model.add_procedure(p);
                }
            }
            Kind::EndProc => {
                if let Some(name) = &current_procedure {
                    if let Some(p) = model.procedures.get_mut(name) {
                        p.line_end = Some(line_num);
                    }
                }
                current_procedure = None;
            }
            Kind::Function => {
                if let Some(parsed) = function::parse_function(&stmt.text) {
                    let mut f = FunctionDefinition::new(parsed.name, line_num);
                    f.input_params = parsed.input_params;
                    f.return_type = parsed.return_type;
                    f.modifier = parsed.modifier;

                    current_function = Some(f.name.clone());
                    model.add_function(f.clone());
                    if let Some(sp) = &current_sys_proc {
                        if let Some(block) = model.sys_proc_blocks.get_mut(sp) {
                            block.functions.insert(f.name.clone(), f);
                        }
                    }
                }
            }
            Kind::EndFunction => {
                if let Some(name) = &current_function {
                    if let Some(f) = model.functions.get_mut(name) {
                        f.line_end = Some(line_num);
                    }
                }
                current_function = None;
            }
            Kind::Cmode => {
                model.constant_mode = cmode::parse_cmode(&stmt.text);
            }
            Kind::Unrecognised => {}
        }
    }

    model
}
