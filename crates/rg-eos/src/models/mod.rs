//! The cubic EOS families.
//!
//! All four families share one body,
//! `P = RT/(V−b) − a(T)/(V² + u·b·V + w·b²)`, and differ in the denominator
//! shape `(u, w)`, in how `a(T)` depends on temperature, and in their validity
//! region. The residual path integrals follow from `a`, `a'` and `a''`:
//!
//! - `(∂U/∂V)_T = (a − T·a')/f(V)`
//! - `(∂Cv/∂V)_T = −T·a''/f(V)`
//! - `Cp − Cv = −T·(∂P/∂T)²_V / (∂P/∂V)_T`

pub mod gost;
pub mod peng_robinson;
pub mod redlich_kwong;
pub mod soave;

pub use gost::GostNaturalGas;
pub use peng_robinson::PengRobinson;
pub use redlich_kwong::RedlichKwong;
pub use soave::RedlichKwongSoave;

use crate::cubic;
use crate::dynamic::DynamicState;
use crate::error::{EosError, EosResult, ModelReason};
use crate::state::StatePoint;
use rg_core::numeric::Real;
use std::f64::consts::SQRT_2;

/// Attraction denominator `V² + u·b·V + w·b²`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Denominator {
    /// `V(V + b)`
    RedlichKwong,
    /// `V² + 2bV − b²`
    PengRobinson,
}

impl Denominator {
    fn uw(self) -> (Real, Real) {
        match self {
            Denominator::RedlichKwong => (1.0, 0.0),
            Denominator::PengRobinson => (2.0, -1.0),
        }
    }

    /// Roots of the denominator as multiples of b, larger first.
    fn roots(self) -> (Real, Real) {
        match self {
            Denominator::RedlichKwong => (0.0, -1.0),
            Denominator::PengRobinson => (SQRT_2 - 1.0, -(1.0 + SQRT_2)),
        }
    }
}

/// Temperature dependence of the attraction parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Attraction {
    /// `a(T) = a / √T`
    InverseSqrt { a: Real },
    /// `a(T) = a_c·(1 + m(1 − √(T/Tc)))²`
    Soave { a_c: Real, m: Real, tc: Real },
}

impl Attraction {
    /// `(a, a', a'')` at temperature `t`.
    fn eval(&self, t: Real) -> (Real, Real, Real) {
        match *self {
            Attraction::InverseSqrt { a } => {
                let st = t.sqrt();
                (a / st, -0.5 * a / (t * st), 0.75 * a / (t * t * st))
            }
            Attraction::Soave { a_c, m, tc } => {
                let s = (t * tc).sqrt();
                let g = 1.0 + m * (1.0 - (t / tc).sqrt());
                (
                    a_c * g * g,
                    -a_c * g * m / s,
                    a_c * m * (1.0 + m) / (2.0 * t * s),
                )
            }
        }
    }
}

/// Coefficients of one cubic EOS: gas constant, co-volume, attraction and
/// denominator shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CubicBody {
    pub r: Real,
    pub b: Real,
    pub attraction: Attraction,
    pub shape: Denominator,
}

impl CubicBody {
    fn denom(&self, v: Real) -> Real {
        let (u, w) = self.shape.uw();
        v * v + u * self.b * v + w * self.b * self.b
    }

    /// Vapor-branch volume at `(p, t)`: the single root or the largest of three.
    pub fn volume(&self, p: Real, t: Real) -> EosResult<Real> {
        let (u, w) = self.shape.uw();
        let (a, _, _) = self.attraction.eval(t);
        let b = self.b;
        let rt_p = self.r * t / p;
        let roots = cubic::solve_monic(
            (u - 1.0) * b - rt_p,
            (w - u) * b * b - u * rt_p * b + a / p,
            -w * b * b * b - w * rt_p * b * b - a * b / p,
        )?;
        let v = roots.largest();
        if !v.is_finite() {
            return Err(EosError::model(
                ModelReason::NonFiniteResult,
                format!("volume at P={p} T={t}"),
            ));
        }
        if v <= 0.0 {
            return Err(EosError::model(
                ModelReason::NoPositiveRoot,
                format!("largest root {v} at P={p} T={t}"),
            ));
        }
        Ok(v)
    }

    pub fn pressure(&self, v: Real, t: Real) -> EosResult<Real> {
        if v <= self.b {
            return Err(EosError::model(
                ModelReason::VolumeBelowCovolume,
                format!("V={v} <= b={}", self.b),
            ));
        }
        let (a, _, _) = self.attraction.eval(t);
        let p = self.r * t / (v - self.b) - a / self.denom(v);
        if !p.is_finite() {
            return Err(EosError::model(
                ModelReason::NonFiniteResult,
                format!("pressure at V={v} T={t}"),
            ));
        }
        Ok(p)
    }

    pub fn dp_dv(&self, v: Real, t: Real) -> Real {
        let (u, _) = self.shape.uw();
        let (a, _, _) = self.attraction.eval(t);
        let f = self.denom(v);
        let d = v - self.b;
        -self.r * t / (d * d) + a * (2.0 * v + u * self.b) / (f * f)
    }

    pub fn dp_dt(&self, v: Real, t: Real) -> Real {
        let (_, da, _) = self.attraction.eval(t);
        self.r / (v - self.b) - da / self.denom(v)
    }

    /// `∫ dV / f(V)` from `v1` to `v2`; exactly zero when `v1 == v2`.
    pub fn denom_integral(&self, v1: Real, v2: Real) -> Real {
        let (r1, r2) = self.shape.roots();
        let (r1, r2) = (r1 * self.b, r2 * self.b);
        let width = r1 - r2;
        (((v2 - r1) / (v1 - r1)).ln() - ((v2 - r2) / (v1 - r2)).ln()) / width
    }

    /// `Cp − Cv` at `(v, t)`.
    pub fn heat_capacity_gap(&self, v: Real, t: Real) -> Real {
        let dpdt = self.dp_dt(v, t);
        -t * dpdt * dpdt / self.dp_dv(v, t)
    }

    /// Integrate the dynamic state along the isotherm at `next.T`.
    pub fn update(&self, prev: &DynamicState, next: StatePoint) -> EosResult<DynamicState> {
        let t = next.t_k();
        let (a, da, d2a) = self.attraction.eval(t);
        let integral = self.denom_integral(prev.point().volume(), next.volume());
        let du = (a - t * da) * integral;
        let dcv = -t * d2a * integral;
        let gap = self.heat_capacity_gap(next.volume(), t);
        prev.advanced(next, du, dcv, gap)
    }
}


#[cfg(test)]
pub(crate) mod test_support {
    use crate::composition::GasDescription;
    use crate::constants::SubstanceConstants;
    use crate::dynamic::DynamicState;
    use crate::model::EquationOfState;
    use crate::state::StatePoint;
    use rg_core::units::{k, pa};

    /// Methane-like constants with a molar gas constant.
    pub fn methane() -> SubstanceConstants {
        SubstanceConstants::new("methane", pa(4.6e6), k(190.6), 8.314)
            .unwrap()
            .with_acentric(0.011)
            .unwrap()
    }

    pub fn pure_methane() -> GasDescription {
        GasDescription::Pure(methane())
    }

    /// Ideal-gas-like seed anchored on the model's own volume at (p, t).
    pub fn seed_at(model: &impl EquationOfState, p: f64, t: f64) -> DynamicState {
        let v = model.solve_volume(pa(p), k(t)).unwrap();
        let point = StatePoint::new(pa(p), v, k(t)).unwrap();
        DynamicState::seed(point, 27.0 * t, 27.0, 35.3).unwrap()
    }
}
