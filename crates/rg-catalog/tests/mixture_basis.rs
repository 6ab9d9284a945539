use rg_catalog::*;
use rg_core::units::constants::R_UNIVERSAL;
use rg_core::units::{k, pa};
use rg_eos::{EosModel, EquationOfState, ModelKind};

fn methane_ethane() -> rg_eos::GasDescription {
    let spec = MixtureSpec::from_pairs([("methane", 0.9), ("ethane", 0.1)]);
    Catalog::builtin().gas(&GasDef::Mixture(spec)).unwrap()
}

#[test]
fn ideal_gas_limit_uses_mixture_molar_mass() {
    let gas = methane_ethane();
    let m_mix = 0.9 * 16.043 + 0.1 * 30.069;
    let expected = 1000.0 * R_UNIVERSAL / m_mix;

    for kind in [
        ModelKind::RedlichKwong,
        ModelKind::RedlichKwongSoave,
        ModelKind::PengRobinson,
    ] {
        let model = EosModel::derive(kind, &gas).unwrap();
        let v = model.solve_volume(pa(100.0), k(300.0)).unwrap();
        let r_apparent = 100.0 * v / 300.0;
        let rel = (r_apparent - expected).abs() / expected;
        assert!(rel < 1e-3, "{kind}: P·v/T = {r_apparent}, R_u/M = {expected}");
    }
}

#[test]
fn reduced_constants_carry_mixture_molar_mass() {
    let reduced = methane_ethane().reduced_constants().unwrap();
    let m_mix = 0.9 * 16.043 + 0.1 * 30.069;
    assert!((reduced.molar_mass().unwrap() - m_mix).abs() < 1e-12);
    assert!((reduced.gas_constant() * m_mix - 1000.0 * R_UNIVERSAL).abs() < 1e-9);
}
