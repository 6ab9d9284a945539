//! Natural-gas model on GOST reference data.
//!
//! Pseudo-critical constants of the gas come from the GOST R 56851 mixing rule
//! over the standard's component table; the Peng-Robinson body is then applied
//! to those constants. The model is applicable only inside the standard's
//! pressure, temperature and composition window.

use super::peng_robinson::PengRobinson;
use crate::composition::GasDescription;
use crate::constants::SubstanceConstants;
use crate::dynamic::DynamicState;
use crate::error::{EosError, EosResult, InitReason};
use crate::model::{EquationOfState, ModelKind};
use crate::state::{StatePoint, Volume};
use rg_core::numeric::Real;
use rg_core::units::constants::R_UNIVERSAL;
use rg_core::units::{Pressure, Temperature, k, pa};
use tracing::debug;

/// Pressure window, Pa.
pub const GOST_PRESSURE_RANGE: (Real, Real) = (1.0e5, 3.0e7);
/// Temperature window, K.
pub const GOST_TEMPERATURE_RANGE: (Real, Real) = (250.0, 350.0);

/// Reference data of one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GostComponent<'a> {
    pub name: &'a str,
    /// kg/kmol
    pub molar_mass: Real,
    /// K
    pub tc: Real,
    /// kg/m³
    pub critical_density: Real,
    pub acentric: Real,
}

impl<'a> GostComponent<'a> {
    /// Reference data for a component outside the table, estimated from its
    /// own constants with `Zc = 0.291 − 0.08ω`.
    pub fn estimate(c: &'a SubstanceConstants) -> EosResult<Self> {
        let (Some(molar_mass), Some(acentric)) = (c.molar_mass(), c.acentric()) else {
            return Err(EosError::init(
                InitReason::UnsupportedComponent,
                format!(
                    "'{}' is not in the GOST component table and lacks a molar mass or acentric factor",
                    c.name()
                ),
            ));
        };
        let zc = 0.291 - 0.08 * acentric;
        let vc = 1000.0 * R_UNIVERSAL * zc * c.tc() / c.pc();
        Ok(Self {
            name: c.name(),
            molar_mass,
            tc: c.tc(),
            critical_density: molar_mass / vc,
            acentric,
        })
    }

    /// Critical molar volume, m³/kmol.
    pub fn critical_volume(&self) -> Real {
        self.molar_mass / self.critical_density
    }
}

const fn comp(
    name: &'static str,
    molar_mass: Real,
    tc: Real,
    critical_density: Real,
    acentric: Real,
) -> GostComponent<'static> {
    GostComponent {
        name,
        molar_mass,
        tc,
        critical_density,
        acentric,
    }
}

static COMPONENTS: [GostComponent<'static>; 12] = [
    comp("methane", 16.043, 190.564, 162.66, 0.064294),
    comp("ethane", 30.07, 305.32, 206.58, 0.10958),
    comp("propane", 44.097, 369.825, 220.49, 0.18426),
    comp("i_butane", 58.123, 407.85, 224.36, 0.16157),
    comp("n_butane", 58.123, 425.16, 227.85, 0.2134),
    comp("i_pentane", 72.15, 460.39, 236.0, 0.26196),
    comp("n_pentane", 72.15, 469.65, 232.0, 0.29556),
    comp("hexane", 86.177, 507.85, 233.6, 0.29965),
    comp("nitrogen", 28.0135, 126.2, 313.1, 0.013592),
    comp("carbon_dioxide", 44.01, 304.2, 468.0, 0.20625),
    comp("helium", 4.0026, 5.19, 69.64, -0.14949),
    comp("hydrogen", 2.0159, 32.938, 31.36, -0.12916),
];

/// Binary coefficients (a_ij for volume, b_ij for temperature); unlisted pairs are (1, 1).
static BINARY: [(&str, &str, Real, Real); 7] = [
    ("methane", "ethane", 0.9939062, 0.9932865),
    ("methane", "propane", 1.010338, 0.9964106),
    ("methane", "i_butane", 1.029222, 0.9798303),
    ("methane", "n_butane", 1.049264, 0.9709773),
    ("methane", "i_pentane", 1.339956, 0.8788424),
    ("methane", "n_pentane", 1.17434, 0.9302709),
    ("methane", "nitrogen", 1.007886, 0.9417593),
];

/// Allowed mole-fraction range of a component group.
struct Limit {
    names: &'static [&'static str],
    min: Real,
    max: Real,
}

const fn limit(names: &'static [&'static str], min: Real, max: Real) -> Limit {
    Limit { names, min, max }
}

static LIMITS: [Limit; 10] = [
    limit(&["methane"], 0.7, 1.0),
    limit(&["ethane"], 0.0, 0.1),
    limit(&["propane"], 0.0, 0.035),
    limit(&["i_butane", "n_butane"], 0.0, 0.015),
    limit(&["i_pentane", "n_pentane"], 0.0, 0.005),
    limit(&["hexane"], 0.0, 0.001),
    limit(&["nitrogen"], 0.0, 0.2),
    limit(&["carbon_dioxide"], 0.0, 0.2),
    limit(&["helium"], 0.0, 0.005),
    limit(&["hydrogen"], 0.0, 0.1),
];

/// Combined mole fraction allowed for components outside the table.
pub const GOST_OTHERS_MAX: Real = 0.0015;

pub fn component(name: &str) -> Option<&'static GostComponent<'static>> {
    COMPONENTS.iter().find(|c| c.name == name)
}

pub fn binary_coefficients(i: &str, j: &str) -> (Real, Real) {
    BINARY
        .iter()
        .find(|(a, b, _, _)| (*a == i && *b == j) || (*a == j && *b == i))
        .map(|(_, _, av, bt)| (*av, *bt))
        .unwrap_or((1.0, 1.0))
}

/// Pseudo-critical constants of a gas by the GOST R 56851 rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PseudoCritical {
    pub tc: Real,
    pub pc: Real,
    /// m³/kmol
    pub vc: Real,
    pub zc: Real,
    pub acentric: Real,
}

pub fn pseudo_critical(parts: &[(Real, GostComponent<'_>)]) -> PseudoCritical {
    let mut sum_v = 0.0;
    let mut sum_t = 0.0;
    for (xi, ci) in parts {
        for (xj, cj) in parts {
            let (a_ij, b_ij) = binary_coefficients(ci.name, cj.name);
            let edge = ci.critical_volume().cbrt() + cj.critical_volume().cbrt();
            let term = xi * xj * edge * edge * edge * a_ij;
            sum_v += term;
            sum_t += term * (ci.tc * cj.tc).sqrt() * b_ij;
        }
    }
    let vc = 0.125 * sum_v;
    let tc = sum_t / sum_v;
    let acentric: Real = parts.iter().map(|(x, c)| x * c.acentric).sum();
    let zc = 0.291 - 0.08 * acentric;
    let pc = 1000.0 * R_UNIVERSAL * tc * zc / vc;
    PseudoCritical {
        tc,
        pc,
        vc,
        zc,
        acentric,
    }
}

fn reference_data(c: &SubstanceConstants) -> EosResult<GostComponent<'_>> {
    match component(c.name()) {
        Some(reference) => Ok(*reference),
        None => GostComponent::estimate(c),
    }
}

fn check_limits(parts: &[(Real, GostComponent<'_>)]) -> EosResult<()> {
    let others: Real = parts
        .iter()
        .filter(|(_, c)| component(c.name).is_none())
        .map(|(x, _)| *x)
        .sum();
    if others > GOST_OTHERS_MAX {
        return Err(EosError::init(
            InitReason::CompositionOutOfRange,
            format!("components outside the GOST table total {others}, above {GOST_OTHERS_MAX}"),
        ));
    }
    for limit in &LIMITS {
        let x: Real = parts
            .iter()
            .filter(|(_, c)| limit.names.iter().any(|n| *n == c.name))
            .map(|(x, _)| *x)
            .sum();
        if x < limit.min || x > limit.max {
            return Err(EosError::init(
                InitReason::CompositionOutOfRange,
                format!(
                    "{} fraction {x} outside [{}, {}]",
                    limit.names.join("+"),
                    limit.min,
                    limit.max
                ),
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct GostNaturalGas {
    body: PengRobinson,
    pseudo: PseudoCritical,
}

impl GostNaturalGas {
    pub fn derive(gas: &GasDescription) -> EosResult<Self> {
        let parts: Vec<(Real, GostComponent)> = match gas {
            GasDescription::Pure(c) => vec![(1.0, reference_data(c)?)],
            GasDescription::Mixture(mix) => mix
                .iter()
                .map(|c| Ok((c.fraction, reference_data(&c.constants)?)))
                .collect::<EosResult<_>>()?,
        };
        check_limits(&parts)?;

        let pseudo = pseudo_critical(&parts);
        let r = gas.reduced_constants()?.gas_constant();
        let constants = SubstanceConstants::new(
            format!("{} (pseudo-critical)", gas.name()),
            pa(pseudo.pc),
            k(pseudo.tc),
            r,
        )?
        .with_acentric(pseudo.acentric)?;
        debug!(tc = pseudo.tc, pc = pseudo.pc, omega = pseudo.acentric, "derived GOST pseudo-critical constants");
        Ok(Self {
            body: PengRobinson::derive(&GasDescription::Pure(constants))?,
            pseudo,
        })
    }

    pub fn pseudo_critical(&self) -> &PseudoCritical {
        &self.pseudo
    }

    pub fn reduced_constants(&self) -> &SubstanceConstants {
        self.body.reduced_constants()
    }
}

impl EquationOfState for GostNaturalGas {
    fn kind(&self) -> ModelKind {
        ModelKind::GostNaturalGas
    }

    fn solve_volume(&self, p: Pressure, t: Temperature) -> EosResult<Volume> {
        self.body.solve_volume(p, t)
    }

    fn solve_pressure(&self, v: Volume, t: Temperature) -> EosResult<Pressure> {
        self.body.solve_pressure(v, t)
    }

    fn is_valid(&self, point: &StatePoint) -> bool {
        let (p_lo, p_hi) = GOST_PRESSURE_RANGE;
        let (t_lo, t_hi) = GOST_TEMPERATURE_RANGE;
        (p_lo..=p_hi).contains(&point.p_pa()) && (t_lo..=t_hi).contains(&point.t_k())
    }

    fn update_state(&self, prev: &DynamicState, next: StatePoint) -> EosResult<DynamicState> {
        self.body.update_state(prev, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::MixtureComposition;
    use crate::composition::test_support::component as mix_component;
    use crate::error::ErrorKind;
    use crate::models::test_support::{methane, pure_methane};

    fn init_reason(err: EosError) -> InitReason {
        match err {
            EosError::Init { reason, .. } => reason,
            other => panic!("expected init error, got {other:?}"),
        }
    }

    #[test]
    fn pure_methane_reproduces_critical_pressure() {
        let m = GostNaturalGas::derive(&pure_methane()).unwrap();
        let pc = m.pseudo_critical();
        assert!((pc.tc - 190.564).abs() < 1e-9);
        assert!((pc.pc - 4.5992e6).abs() / 4.5992e6 < 0.01, "pc = {}", pc.pc);
        assert!((pc.vc - 16.043 / 162.66).abs() < 1e-12);
    }

    #[test]
    fn natural_gas_mixture() {
        let mix = MixtureComposition::new(vec![
            mix_component("methane", 0.92, 190.6, 4.6e6, 0.011),
            mix_component("ethane", 0.05, 305.3, 4.87e6, 0.099),
            mix_component("nitrogen", 0.03, 126.2, 3.39e6, 0.039),
        ])
        .unwrap();
        let m = GostNaturalGas::derive(&GasDescription::Mixture(mix)).unwrap();
        let pc = m.pseudo_critical();
        assert!(pc.tc > 180.0 && pc.tc < 210.0, "tc = {}", pc.tc);
        assert!(pc.pc > 4.0e6 && pc.pc < 5.5e6, "pc = {}", pc.pc);

        let v = m.solve_volume(pa(5e6), k(280.0)).unwrap();
        let point = StatePoint::new(pa(5e6), v, k(280.0)).unwrap();
        assert!(m.is_valid(&point));
        let back = m.solve_pressure(v, k(280.0)).unwrap();
        assert!((back.value - 5e6).abs() <= 1e-5 * 5e6);
    }

    #[test]
    fn window_edges() {
        let m = GostNaturalGas::derive(&pure_methane()).unwrap();
        let inside = StatePoint::new(pa(1e5), 0.1, k(350.0)).unwrap();
        let hot = StatePoint::new(pa(1e6), 0.1, k(351.0)).unwrap();
        let high = StatePoint::new(pa(3.1e7), 0.1, k(300.0)).unwrap();
        assert!(m.is_valid(&inside));
        assert!(!m.is_valid(&hot));
        assert!(!m.is_valid(&high));
    }

    #[test]
    fn rejects_unknown_component_and_rich_gas() {
        let argon = SubstanceConstants::new("argon", pa(4.86e6), k(150.7), 8.314).unwrap();
        let err = GostNaturalGas::derive(&GasDescription::Pure(argon)).unwrap_err();
        assert_eq!(init_reason(err), InitReason::UnsupportedComponent);

        let rich = MixtureComposition::new(vec![
            mix_component("methane", 0.8, 190.6, 4.6e6, 0.011),
            mix_component("ethane", 0.2, 305.3, 4.87e6, 0.099),
        ])
        .unwrap();
        let err = GostNaturalGas::derive(&GasDescription::Mixture(rich)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Init);
        assert_eq!(init_reason(err), InitReason::CompositionOutOfRange);
    }

    #[test]
    fn trace_components_outside_table_are_estimated() {
        let co = SubstanceConstants::new("carbon_monoxide", pa(3.494e6), k(132.86), 296.84)
            .unwrap()
            .with_molar_mass(28.010)
            .unwrap()
            .with_acentric(0.045)
            .unwrap();
        let reference = GostComponent::estimate(&co).unwrap();
        let zc = 0.291 - 0.08 * 0.045;
        let z = reference.critical_volume() * 3.494e6 / (1000.0 * R_UNIVERSAL * 132.86);
        assert!((z - zc).abs() < 1e-12);

        let mut trace = mix_component("carbon_monoxide", 0.001, 132.86, 3.494e6, 0.045);
        trace.constants = co;
        let mix = MixtureComposition::new(vec![
            mix_component("methane", 0.949, 190.6, 4.6e6, 0.011),
            mix_component("ethane", 0.05, 305.3, 4.87e6, 0.099),
            trace,
        ])
        .unwrap();
        let m = GostNaturalGas::derive(&GasDescription::Mixture(mix)).unwrap();
        assert!(m.pseudo_critical().tc > 190.0);
    }

    #[test]
    fn unlisted_share_above_budget_is_out_of_range() {
        let argon = || {
            SubstanceConstants::new("argon", pa(4.86e6), k(150.7), 208.13)
                .unwrap()
                .with_molar_mass(39.948)
                .unwrap()
                .with_acentric(0.0)
                .unwrap()
        };
        let mut trace = mix_component("argon", 0.01, 150.7, 4.86e6, 0.0);
        trace.constants = argon();
        let mix = MixtureComposition::new(vec![
            mix_component("methane", 0.94, 190.6, 4.6e6, 0.011),
            mix_component("ethane", 0.05, 305.3, 4.87e6, 0.099),
            trace,
        ])
        .unwrap();
        let err = GostNaturalGas::derive(&GasDescription::Mixture(mix)).unwrap_err();
        assert_eq!(init_reason(err), InitReason::CompositionOutOfRange);

        let err = GostNaturalGas::derive(&GasDescription::Pure(argon())).unwrap_err();
        assert_eq!(init_reason(err), InitReason::CompositionOutOfRange);
    }

    #[test]
    fn binary_coefficients_default_to_one() {
        assert_eq!(binary_coefficients("ethane", "methane"), (0.9939062, 0.9932865));
        assert_eq!(binary_coefficients("ethane", "propane"), (1.0, 1.0));
        assert_eq!(methane().name(), "methane");
    }
}
