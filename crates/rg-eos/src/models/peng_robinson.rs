//! Peng-Robinson: `P = RT/(V−b) − a·α(T)/(V² + 2bV − b²)`,
//! `α(T) = (1 + κ(1 − √(T/Tc)))²`, `κ = 0.37464 + 1.54226ω − 0.26992ω²`.

use super::{Attraction, CubicBody, Denominator};
use crate::composition::GasDescription;
use crate::constants::SubstanceConstants;
use crate::dynamic::DynamicState;
use crate::error::EosResult;
use crate::mixing::{BinaryInteractionTable, CriticalCoefficients, MixtureCombiner};
use crate::model::{EquationOfState, ModelKind, check_pt, check_vt};
use crate::state::{StatePoint, Volume};
use rg_core::numeric::Real;
use rg_core::units::{Pressure, Temperature, pa};
use tracing::debug;

/// Critical compressibility of the Peng-Robinson equation.
pub const PR_CRITICAL_Z: Real = 0.3074;

#[derive(Debug, Clone, PartialEq)]
pub struct PengRobinson {
    body: CubicBody,
    a_c: Real,
    kappa: Real,
    vc: Real,
    reduced: SubstanceConstants,
}

pub fn pr_kappa(omega: Real) -> Real {
    0.37464 + 1.54226 * omega - 0.26992 * omega * omega
}

impl PengRobinson {
    pub fn critical_coefficients(c: &SubstanceConstants) -> CriticalCoefficients {
        let (r, tc, pc) = (c.gas_constant(), c.tc(), c.pc());
        CriticalCoefficients {
            a: 0.45724 * r * r * tc * tc / pc,
            b: 0.07780 * r * tc / pc,
        }
    }

    pub fn derive(gas: &GasDescription) -> EosResult<Self> {
        let coefs = match gas {
            GasDescription::Pure(c) => Self::critical_coefficients(c),
            GasDescription::Mixture(mix) => MixtureCombiner::new(mix)
                .with_interactions(BinaryInteractionTable::soave())
                .combine(|c| {
                    c.require_acentric("Peng-Robinson")?;
                    Ok(Self::critical_coefficients(c))
                })?,
        };
        let reduced = gas.reduced_constants()?;
        let kappa = pr_kappa(reduced.require_acentric("Peng-Robinson")?);
        let vc = PR_CRITICAL_Z * reduced.gas_constant() * reduced.tc() / reduced.pc();
        debug!(gas = %reduced.name(), a = coefs.a, b = coefs.b, kappa, "derived Peng-Robinson coefficients");
        Ok(Self {
            body: CubicBody {
                r: reduced.gas_constant(),
                b: coefs.b,
                attraction: Attraction::Soave {
                    a_c: coefs.a,
                    m: kappa,
                    tc: reduced.tc(),
                },
                shape: Denominator::PengRobinson,
            },
            a_c: coefs.a,
            kappa,
            vc,
            reduced,
        })
    }

    pub fn a(&self) -> Real {
        self.a_c
    }

    pub fn b(&self) -> Real {
        self.body.b
    }

    pub fn kappa(&self) -> Real {
        self.kappa
    }

    /// Critical volume implied by the equation, `Zc·R·Tc/Pc`.
    pub fn critical_volume(&self) -> Real {
        self.vc
    }

    pub fn reduced_constants(&self) -> &SubstanceConstants {
        &self.reduced
    }
}

impl EquationOfState for PengRobinson {
    fn kind(&self) -> ModelKind {
        ModelKind::PengRobinson
    }

    fn solve_volume(&self, p: Pressure, t: Temperature) -> EosResult<Volume> {
        let (p, t) = check_pt(p, t)?;
        self.body.volume(p, t)
    }

    fn solve_pressure(&self, v: Volume, t: Temperature) -> EosResult<Pressure> {
        let (v, t) = check_vt(v, t)?;
        self.body.pressure(v, t).map(pa)
    }

    /// Gas-like states only: supercritical temperature, or a volume above the
    /// critical volume.
    fn is_valid(&self, point: &StatePoint) -> bool {
        point.t_k() >= self.reduced.tc() || point.volume() > self.vc
    }

    fn update_state(&self, prev: &DynamicState, next: StatePoint) -> EosResult<DynamicState> {
        self.body.update(prev, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::{pure_methane, seed_at};
    use crate::state::StateRequest;
    use rg_core::units::k;
    use std::f64::consts::SQRT_2;

    fn model() -> PengRobinson {
        PengRobinson::derive(&pure_methane()).unwrap()
    }

    #[test]
    fn round_trip_including_dense_supercritical() {
        let m = model();
        for (p, t) in [(1e5, 150.0), (5e6, 250.0), (2e7, 300.0)] {
            let v = m.solve_volume(pa(p), k(t)).unwrap();
            let point = StatePoint::new(pa(p), v, k(t)).unwrap();
            assert!(m.is_valid(&point), "P={p} T={t}");
            let back = m.solve_pressure(v, k(t)).unwrap();
            assert!((back.value - p).abs() <= 1e-5 * p);
        }
    }

    #[test]
    fn compressed_liquid_is_invalid() {
        let m = model();
        // subcritical, at a pressure well above saturation the only root is liquid-like
        let v = m.solve_volume(pa(2e7), k(120.0)).unwrap();
        let point = StatePoint::new(pa(2e7), v, k(120.0)).unwrap();
        assert!(v < m.critical_volume());
        assert!(!m.is_valid(&point));
    }

    #[test]
    fn path_integrals_match_closed_form() {
        let m = model();
        let start = seed_at(&m, 5e6, 250.0);
        let next = m
            .transition(
                &start,
                StateRequest::PT {
                    p: pa(1e6),
                    t: k(300.0),
                },
            )
            .unwrap();
        let (v0, vf, t) = (start.point().volume(), next.point().volume(), 300.0f64);
        let (a, b, kap) = (m.a(), m.b(), m.kappa());
        let tr_sqrt = (t / 190.6).sqrt();
        let lam = ((vf + (1.0 - SQRT_2) * b) * (v0 + (1.0 + SQRT_2) * b)
            / ((vf + (1.0 + SQRT_2) * b) * (v0 + (1.0 - SQRT_2) * b)))
            .ln()
            / (2.0 * SQRT_2 * b);
        let du = a * (1.0 + kap) * (1.0 + kap * (1.0 - tr_sqrt)) * lam;
        let dcv = -a * kap * (1.0 + kap) * tr_sqrt / (2.0 * t) * lam;
        let delta = next.delta_from(&start);
        assert!((delta.du - du).abs() <= 1e-9 * du.abs());
        assert!((delta.dcv - dcv).abs() <= 1e-9 * dcv.abs());
        // expansion at constant-ish temperature raises internal energy
        assert!(delta.du > 0.0);
    }
}
