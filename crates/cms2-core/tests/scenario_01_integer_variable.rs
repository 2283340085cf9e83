use cms2_core::model::Mode;
use cms2_core::query::{completion_prefix, completions, find_definition, hover_info, HoverInfo};

const SOURCE: &str = "DDX SYS-DD $\nVRBL ALT I 16 S $\nEND-SYS-DD DDX $\n";

#[test]
fn sys_dd_block_and_variable_are_recorded() {
    let model = cms2_core::parse(SOURCE);

    let block = model.sys_data_blocks.get("DDX").expect("DDX block");
    assert_eq!(block.line_start, 0);
    assert_eq!(block.line_end, Some(2));

    let var = model.get_variable("ALT").expect("ALT variable");
    assert!(matches!(var.mode, Mode::Integer));
    assert_eq!(var.bits, Some(16));
    assert!(var.signed);
    assert_eq!(var.parent_block.as_deref(), Some("DDX"));
    assert_eq!(var.line_number, 1);
}

#[test]
fn completion_prefix_matches_variable() {
    let model = cms2_core::parse(SOURCE);
    // Column 6 lands just past the "A" in "VRBL ALT..."; column 5 is still
    // inside the trailing space after "VRBL" and yields that token instead.
    let prefix = completion_prefix("VRBL ALT I 16 S $", 6);
    assert_eq!(prefix, "A");

    let items = completions(&model, &prefix);
    let alt = items
        .iter()
        .find(|i| i.label == "ALT")
        .expect("ALT completion");
    assert_eq!(alt.kind, cms2_core::query::completion_kind::VARIABLE);
}

#[test]
fn hover_and_definition_resolve_the_variable() {
    let model = cms2_core::parse(SOURCE);

    match hover_info(&model, "ALT").expect("hover info") {
        HoverInfo::Variable { name, .. } => assert_eq!(name, "ALT"),
        _ => panic!("expected a variable hover payload"),
    }

    assert_eq!(find_definition(&model, "ALT"), Some(1));
}
