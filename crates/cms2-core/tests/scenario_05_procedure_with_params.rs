const SOURCE: &str = "PROCEDURE UPDATE INPUT A, B OUTPUT C $\nEND-PROC UPDATE $";

#[test]
fn procedure_params_are_split_and_recorded() {
    let model = cms2_core::parse(SOURCE);
    let proc = model.get_procedure("UPDATE").expect("UPDATE procedure");

    assert!(!proc.is_exec);
    assert_eq!(proc.input_params, vec!["A", "B"]);
    assert_eq!(proc.output_params, vec!["C"]);
    assert!(proc.exit_params.is_empty());
    assert_eq!(proc.line_end, Some(1));
}
