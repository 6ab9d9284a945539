//! Redlich-Kwong-Soave: the Redlich-Kwong body with the Soave alpha function,
//! `α(T) = (1 + m(1 − √(T/Tc)))²`, `m = 0.48 + 1.574ω − 0.176ω²`.

use super::redlich_kwong::rk_region;
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

#[derive(Debug, Clone, PartialEq)]
pub struct RedlichKwongSoave {
    body: CubicBody,
    a_c: Real,
    m: Real,
    reduced: SubstanceConstants,
}

pub fn soave_m(omega: Real) -> Real {
    0.48 + 1.574 * omega - 0.176 * omega * omega
}

impl RedlichKwongSoave {
    pub fn critical_coefficients(c: &SubstanceConstants) -> CriticalCoefficients {
        let (r, tc, pc) = (c.gas_constant(), c.tc(), c.pc());
        CriticalCoefficients {
            a: 0.42747 * r * r * tc * tc / pc,
            b: 0.08664 * r * tc / pc,
        }
    }

    /// The acentric factor is required for every component.
    pub fn derive(gas: &GasDescription) -> EosResult<Self> {
        let coefs = match gas {
            GasDescription::Pure(c) => Self::critical_coefficients(c),
            GasDescription::Mixture(mix) => MixtureCombiner::new(mix)
                .with_interactions(BinaryInteractionTable::soave())
                .combine(|c| {
                    c.require_acentric("Redlich-Kwong-Soave")?;
                    Ok(Self::critical_coefficients(c))
                })?,
        };
        let reduced = gas.reduced_constants()?;
        let m = soave_m(reduced.require_acentric("Redlich-Kwong-Soave")?);
        debug!(gas = %reduced.name(), a = coefs.a, b = coefs.b, m, "derived Redlich-Kwong-Soave coefficients");
        Ok(Self {
            body: CubicBody {
                r: reduced.gas_constant(),
                b: coefs.b,
                attraction: Attraction::Soave {
                    a_c: coefs.a,
                    m,
                    tc: reduced.tc(),
                },
                shape: Denominator::RedlichKwong,
            },
            a_c: coefs.a,
            m,
            reduced,
        })
    }

    pub fn a(&self) -> Real {
        self.a_c
    }

    pub fn b(&self) -> Real {
        self.body.b
    }

    pub fn m(&self) -> Real {
        self.m
    }

    pub fn alpha(&self, t: Real) -> Real {
        let g = 1.0 + self.m * (1.0 - (t / self.reduced.tc()).sqrt());
        g * g
    }

    pub fn reduced_constants(&self) -> &SubstanceConstants {
        &self.reduced
    }
}

impl EquationOfState for RedlichKwongSoave {
    fn kind(&self) -> ModelKind {
        ModelKind::RedlichKwongSoave
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
