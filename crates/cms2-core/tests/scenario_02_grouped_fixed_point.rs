use cms2_core::model::Mode;

const SOURCE: &str = "VRBL (LAT, LON) A 32 S 16 $";

#[test]
fn both_names_share_the_fixed_point_type() {
    let model = cms2_core::parse(SOURCE);

    for name in ["LAT", "LON"] {
        let var = model.get_variable(name).unwrap_or_else(|| panic!("{name} variable"));
        assert!(matches!(var.mode, Mode::Fixed));
        assert_eq!(var.bits, Some(32));
        assert!(var.signed);
        assert_eq!(var.frac_bits, Some(16));
    }
}
