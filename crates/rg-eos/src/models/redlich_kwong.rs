//! Classic Redlich-Kwong: `P = RT/(V−b) − a/(√T·V(V+b))`.

use super::{Attraction, CubicBody, Denominator};
use crate::composition::GasDescription;
use crate::constants::SubstanceConstants;
use crate::dynamic::DynamicState;
use crate::error::EosResult;
use crate::mixing::{CriticalCoefficients, MixtureCombiner};
use crate::model::{EquationOfState, ModelKind, check_pt, check_vt};
use crate::state::{StatePoint, Volume};
use rg_core::numeric::Real;
use rg_core::units::{Pressure, Temperature, pa};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct RedlichKwong {
    body: CubicBody,
    a: Real,
    reduced: SubstanceConstants,
}

impl RedlichKwong {
    pub fn critical_coefficients(c: &SubstanceConstants) -> CriticalCoefficients {
        let (r, tc, pc) = (c.gas_constant(), c.tc(), c.pc());
        CriticalCoefficients {
            a: 0.42748 * r * r * tc.powf(2.5) / pc,
            b: 0.08664 * r * tc / pc,
        }
    }

    pub fn derive(gas: &GasDescription) -> EosResult<Self> {
        let coefs = match gas {
            GasDescription::Pure(c) => Self::critical_coefficients(c),
            GasDescription::Mixture(m) => {
                MixtureCombiner::new(m).combine(|c| Ok(Self::critical_coefficients(c)))?
            }
        };
        let reduced = gas.reduced_constants()?;
        debug!(gas = %reduced.name(), a = coefs.a, b = coefs.b, "derived Redlich-Kwong coefficients");
        Ok(Self {
            body: CubicBody {
                r: reduced.gas_constant(),
                b: coefs.b,
                attraction: Attraction::InverseSqrt { a: coefs.a },
                shape: Denominator::RedlichKwong,
            },
            a: coefs.a,
            reduced,
        })
    }

    pub fn a(&self) -> Real {
        self.a
    }

    pub fn b(&self) -> Real {
        self.body.b
    }

    pub fn reduced_constants(&self) -> &SubstanceConstants {
        &self.reduced
    }
}

/// Redlich-Kwong applicability: `P/Pc < 0.5·T/Tc`.
pub(crate) fn rk_region(reduced: &SubstanceConstants, point: &StatePoint) -> bool {
    point.p_pa() / reduced.pc() < 0.5 * point.t_k() / reduced.tc()
}

impl EquationOfState for RedlichKwong {
    fn kind(&self) -> ModelKind {
        ModelKind::RedlichKwong
    }

    fn solve_volume(&self, p: Pressure, t: Temperature) -> EosResult<Volume> {
        let (p, t) = check_pt(p, t)?;
        self.body.volume(p, t)
    }

    fn solve_pressure(&self, v: Volume, t: Temperature) -> EosResult<Pressure> {
        let (v, t) = check_vt(v, t)?;
        self.body.pressure(v, t).map(pa)
    }

    fn is_valid(&self, point: &StatePoint) -> bool {
        rk_region(&self.reduced, point)
    }

    fn update_state(&self, prev: &DynamicState, next: StatePoint) -> EosResult<DynamicState> {
        self.body.update(prev, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::test_support::{pure_methane, seed_at};
    use crate::state::StateRequest;
    use rg_core::units::k;

    fn model() -> RedlichKwong {
        RedlichKwong::derive(&pure_methane()).unwrap()
    }

    #[test]
    fn coefficients_from_critical_constants() {
        let m = model();
        let expected_a = 0.42748 * 8.314 * 8.314 * 190.6f64.powf(2.5) / 4.6e6;
        let expected_b = 0.08664 * 8.314 * 190.6 / 4.6e6;
        assert!((m.a() - expected_a).abs() <= 1e-12 * expected_a);
        assert!((m.b() - expected_b).abs() <= 1e-12 * expected_b);
    }

    #[test]
    fn methane_volume_is_positive_and_round_trips() {
        let m = model();
        let v = m.solve_volume(pa(3e6), k(350.0)).unwrap();
        assert!(v > m.b());
        // compressibility of supercritical methane at 3 MPa is a bit below one
        let z = 3e6 * v / (8.314 * 350.0);
        assert!(z > 0.85 && z < 1.0, "z = {z}");
        let p = m.solve_pressure(v, k(350.0)).unwrap();
        assert!((p.value - 3e6).abs() <= 1e-5 * 3e6);
    }

    #[test]
    fn path_integrals_match_closed_form() {
        let m = model();
        let start = seed_at(&m, 3e6, 350.0);
        let next = m
            .transition(
                &start,
                StateRequest::PT {
                    p: pa(5e5),
                    t: k(250.0),
                },
            )
            .unwrap();
        let (v1, v2, t) = (start.point().volume(), next.point().volume(), 250.0f64);
        let (a, b) = (m.a(), m.b());
        let ln = (v2 * (v1 + b) / (v1 * (v2 + b))).ln();
        let du = 3.0 * a * ln / (2.0 * t.sqrt() * b);
        let dcv = -3.0 * a * ln / (4.0 * t.powf(1.5) * b);

        let delta = next.delta_from(&start);
        assert!(delta.du.is_finite() && delta.du != 0.0);
        assert!(delta.dcv.is_finite() && delta.dcv != 0.0);
        assert!((delta.du - du).abs() <= 1e-9 * du.abs());
        assert!((delta.dcv - dcv).abs() <= 1e-9 * dcv.abs());

        let num = -t * (8.314 / (v2 - b) + a / (2.0 * t.powf(1.5) * (b + v2) * v2)).powi(2);
        let dec = -8.314 * t / (v2 - b).powi(2)
            + a / (t.sqrt() * v2 * (b + v2).powi(2))
            + a / (t.sqrt() * v2 * v2 * (v2 + b));
        let gap = next.heat_capacity_p() - next.heat_capacity_v();
        assert!((gap - num / dec).abs() <= 1e-9 * gap.abs());
        assert!(gap > 8.314 * 0.9);
    }

    #[test]
    fn repeated_request_changes_nothing() {
        let m = model();
        let start = seed_at(&m, 3e6, 350.0);
        let req = StateRequest::PT {
            p: pa(2e6),
            t: k(300.0),
        };
        let first = m.transition(&start, req).unwrap();
        let second = m.transition(&first, req).unwrap();
        assert!(second.delta_from(&first).is_zero(0.0));
    }

    #[test]
    fn validity_region() {
        let m = model();
        let ok = StatePoint::new(pa(3e6), 1e-3, k(350.0)).unwrap();
        let bad = StatePoint::new(pa(5e6), 1e-4, k(250.0)).unwrap();
        assert!(m.is_valid(&ok));
        assert!(!m.is_valid(&bad));
    }

    #[test]
    fn degenerate_requests() {
        let m = model();
        let err = m.solve_volume(pa(0.0), k(300.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
        let err = m.solve_pressure(1e-3, k(f64::NAN)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
    }
}
