//! Hover Markdown rendering.
//!
//! Grounded on `CMS2LanguageServer._format_hover_markdown` in
//! `original_source/cms2_lsp_server.py`: a fenced `cms2` code block
//! reconstructing the declaration header, followed by supplementary
//! Markdown. The query layer (`cms2_core::query::HoverInfo`) resolves
//! *what* to show; rendering *how* to show it is this dispatcher's concern.

use cms2_core::query::HoverInfo;

pub fn render(info: &HoverInfo<'_>) -> String {
    match info {
        HoverInfo::Variable { name, cms2_type, modifier, line } => {
            let mut md = format!("```cms2\nVRBL {name} {cms2_type}\n```\n");
            if let Some(modifier) = modifier {
                md.push_str(&format!("**Modifier:** ({modifier})\n\n"));
            }
            md.push_str(&format!("*Declared at line {}*", line + 1));
            md
        }
        HoverInfo::Table { name, table_type, packing, item_count, fields } => {
            let mut md = format!(
                "```cms2\nTABLE {name} {table_type} {packing} {}\n```\n",
                item_count.unwrap_or(0)
            );
            if !fields.is_empty() {
                md.push_str("**Fields:** ");
                md.push_str(&fields.iter().take(5).copied().collect::<Vec<_>>().join(", "));
                if fields.len() > 5 {
                    md.push_str(&format!(" (+{} more)", fields.len() - 5));
                }
            }
            md
        }
        HoverInfo::Procedure { name, is_exec, input_params, output_params } => {
            let proc_type = if *is_exec { "EXEC-PROC" } else { "PROCEDURE" };
            let mut md = format!("```cms2\n{proc_type} {name}");
            if !input_params.is_empty() {
                md.push_str(&format!(" INPUT {}", input_params.join(", ")));
            }
            if !output_params.is_empty() {
                md.push_str(&format!(" OUTPUT {}", output_params.join(", ")));
            }
            md.push_str("\n```");
            md
        }
        HoverInfo::Function { name, input_params, return_type } => {
            format!(
                "```cms2\nFUNCTION {name}({}) {}\n```",
                input_params.join(", "),
                return_type.unwrap_or("void")
            )
        }
        HoverInfo::Type { name, status_values, packing } => {
            if !status_values.is_empty() {
                let mut md = format!(
                    "```cms2\nTYPE {name} {}",
                    status_values.iter().take(4).cloned().collect::<Vec<_>>().join(", ")
                );
                if status_values.len() > 4 {
                    md.push_str("...");
                }
                md.push_str("\n```");
                md
            } else {
                format!("```cms2\nTYPE {name} {packing}\n```")
            }
        }
        HoverInfo::Keyword { name, description } => {
            format!("**{name}**\n\n{description}")
        }
        HoverInfo::PredefinedFunction { name, description } => {
            format!("**{name}**\n\n{description}\n\n*Predefined CMS-2 function*")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_hover_includes_declaration_line() {
        let info = HoverInfo::Variable { name: "ALT", cms2_type: "I 16 S".to_string(), modifier: None, line: 4 };
        let md = render(&info);
        assert!(md.contains("VRBL ALT I 16 S"));
        assert!(md.contains("*Declared at line 5*"));
    }

    #[test]
    fn table_hover_truncates_fields_after_five() {
        let fields = vec!["A", "B", "C", "D", "E", "F"];
        let info = HoverInfo::Table {
            name: "WP",
            table_type: "V",
            packing: "MEDIUM",
            item_count: Some(100),
            fields,
        };
        let md = render(&info);
        assert!(md.contains("(+1 more)"));
    }

    #[test]
    fn keyword_hover_is_bold_name_plus_description() {
        let info = HoverInfo::Keyword { name: "VRBL".to_string(), description: "Variable declaration".to_string() };
        assert_eq!(render(&info), "**VRBL**\n\nVariable declaration");
    }
}
