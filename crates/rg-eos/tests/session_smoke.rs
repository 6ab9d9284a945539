//! End-to-end session scenarios.
//!
//! Methane-like constants with a molar gas constant, so volumes are m³/mol.

use rg_core::units::{k, pa};
use rg_eos::{
    CalculationSession, DynamicState, EquationOfState, ErrorKind, GasDescription, InitReason,
    MixtureComponent, MixtureComposition, ModelKind, ModelSpec, StatePoint, SubstanceConstants,
};

fn methane() -> SubstanceConstants {
    SubstanceConstants::new("methane", pa(4.6e6), k(190.6), 8.314)
        .unwrap()
        .with_acentric(0.011)
        .unwrap()
}

fn seed(p: f64, t: f64, cv: f64, cp: f64) -> DynamicState {
    let point = StatePoint::new(pa(p), 8.314 * t / p, k(t)).unwrap();
    DynamicState::seed(point, cv * t, cv, cp).unwrap()
}

#[test]
fn methane_rk_path() {
    let mut session = CalculationSession::new(
        GasDescription::Pure(methane()),
        seed(3e6, 350.0, 29.0, 38.0),
        &[ModelSpec::with_default_priority(ModelKind::RedlichKwong)],
    )
    .unwrap();

    let first = *session.state().unwrap();
    assert!(first.point().volume() > 0.0);

    let next = *session.set_state_pt(pa(5e5), k(250.0)).unwrap();
    let delta = next.delta_from(&first);
    assert!(delta.du.is_finite() && delta.du != 0.0, "du = {}", delta.du);
    assert!(delta.dcv.is_finite() && delta.dcv != 0.0, "dcv = {}", delta.dcv);
    // Enthalpy bookkeeping
    let h = next.internal_energy() + 5e5 * next.point().volume();
    assert!((next.enthalpy() - h).abs() <= 1e-9 * h.abs());
}

#[test]
fn repeated_request_is_idempotent() {
    let mut session = CalculationSession::new(
        GasDescription::Pure(methane()),
        seed(1e5, 300.0, 27.0, 35.3),
        &[
            ModelSpec::with_default_priority(ModelKind::PengRobinson),
            ModelSpec::with_default_priority(ModelKind::RedlichKwongSoave),
        ],
    )
    .unwrap();
    let a = *session.set_state_pt(pa(2e6), k(320.0)).unwrap();
    let b = *session.set_state_pt(pa(2e6), k(320.0)).unwrap();
    assert!(b.delta_from(&a).is_zero(0.0));
    assert_eq!(a.point(), b.point());
}

#[test]
fn swap_to_second_model_returns_its_solution() {
    let mut session = CalculationSession::new(
        GasDescription::Pure(methane()),
        seed(1e5, 300.0, 27.0, 35.3),
        &[
            ModelSpec::new(ModelKind::RedlichKwong, 100),
            ModelSpec::new(ModelKind::PengRobinson, 1),
        ],
    )
    .unwrap();
    assert_eq!(session.active_kind(), ModelKind::RedlichKwong);

    // P/Pc = 1.087 > 0.5·T/Tc = 0.656: outside Redlich-Kwong, fine for Peng-Robinson
    let st = *session.set_state_pt(pa(5e6), k(250.0)).unwrap();
    assert_eq!(session.active_kind(), ModelKind::PengRobinson);

    let pr = session.active_model().model();
    let v = pr.solve_volume(pa(5e6), k(250.0)).unwrap();
    assert_eq!(st.point().volume(), v);
    assert_eq!(session.last_request().map(|r| r.temperature().value), Some(250.0));
}

#[test]
fn natural_gas_mixture_session() {
    let ambient = seed(101_325.0, 293.15, 27.0, 35.3);
    let part = |name: &str, x: f64, tc: f64, pc: f64, omega: f64| MixtureComponent {
        fraction: x,
        constants: SubstanceConstants::new(name, pa(pc), k(tc), 8.314)
            .unwrap()
            .with_acentric(omega)
            .unwrap(),
        seed: ambient,
    };
    let mix = MixtureComposition::new(vec![
        part("methane", 0.9, 190.56, 4.599e6, 0.011),
        part("ethane", 0.06, 305.32, 4.872e6, 0.099),
        part("nitrogen", 0.04, 126.2, 3.39e6, 0.037),
    ])
    .unwrap();
    let start = mix.seed_at(pa(1e6), k(290.0)).unwrap();
    let mut session = CalculationSession::new(
        GasDescription::Mixture(mix),
        start,
        &[
            ModelSpec::with_default_priority(ModelKind::GostNaturalGas),
            ModelSpec::with_default_priority(ModelKind::PengRobinson),
        ],
    )
    .unwrap();
    assert_eq!(session.active_kind(), ModelKind::GostNaturalGas);

    // outside the GOST temperature window
    session.set_state_pt(pa(1e6), k(400.0)).unwrap();
    assert_eq!(session.active_kind(), ModelKind::PengRobinson);

    let reduced = session.reduced_constants();
    assert!(reduced.tc() > 180.0 && reduced.tc() < 210.0);
}

#[test]
fn fraction_sum_tolerance() {
    let ambient = seed(101_325.0, 293.15, 27.0, 35.3);
    let build = |x1: f64| {
        MixtureComposition::new(vec![
            MixtureComponent {
                fraction: x1,
                constants: methane(),
                seed: ambient,
            },
            MixtureComponent {
                fraction: 0.5,
                constants: SubstanceConstants::new("ethane", pa(4.87e6), k(305.3), 8.314).unwrap(),
                seed: ambient,
            },
        ])
    };
    assert!(build(0.50003).is_ok());
    match build(0.51).unwrap_err() {
        rg_eos::EosError::Init { reason, .. } => assert_eq!(reason, InitReason::FractionSum),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn gost_excluded_for_non_natural_gas() {
    let argon = SubstanceConstants::new("argon", pa(4.863e6), k(150.69), 8.314)
        .unwrap()
        .with_acentric(-0.002)
        .unwrap();
    let session = CalculationSession::new(
        GasDescription::Pure(argon),
        seed(1e5, 300.0, 12.5, 20.8),
        &[
            ModelSpec::with_default_priority(ModelKind::GostNaturalGas),
            ModelSpec::with_default_priority(ModelKind::RedlichKwongSoave),
        ],
    )
    .unwrap();
    assert_eq!(session.active_kind(), ModelKind::RedlichKwongSoave);
    assert_eq!(session.excluded().len(), 1);
    assert_eq!(session.excluded()[0].1.kind(), ErrorKind::Init);
}
