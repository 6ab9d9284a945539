//! EOS model abstraction.
//!
//! [`EquationOfState`] is the capability every family provides; [`EosModel`]
//! is the closed set of families a session can hold.

use crate::composition::GasDescription;
use crate::dynamic::DynamicState;
use crate::error::{EosError, EosResult, ModelReason};
use crate::models::{GostNaturalGas, PengRobinson, RedlichKwong, RedlichKwongSoave};
use crate::state::{StatePoint, StateRequest, Volume};
use rg_core::units::{Pressure, Temperature};
use std::fmt;
use std::str::FromStr;

/// Model priority: higher is preferred.
pub type Priority = i8;

/// Model family tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    RedlichKwong,
    RedlichKwongSoave,
    PengRobinson,
    GostNaturalGas,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::RedlichKwong,
        ModelKind::RedlichKwongSoave,
        ModelKind::PengRobinson,
        ModelKind::GostNaturalGas,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::RedlichKwong => "redlich-kwong",
            ModelKind::RedlichKwongSoave => "redlich-kwong-soave",
            ModelKind::PengRobinson => "peng-robinson",
            ModelKind::GostNaturalGas => "gost-natural-gas",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            ModelKind::RedlichKwong => "rk",
            ModelKind::RedlichKwongSoave => "rks",
            ModelKind::PengRobinson => "pr",
            ModelKind::GostNaturalGas => "gost",
        }
    }

    pub fn default_priority(&self) -> Priority {
        match self {
            ModelKind::RedlichKwong => 50,
            ModelKind::PengRobinson => 60,
            ModelKind::RedlichKwongSoave => 75,
            ModelKind::GostNaturalGas => 100,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase().replace('_', "-");
        ModelKind::ALL
            .into_iter()
            .find(|k| k.name() == lower || k.short_name() == lower)
            .ok_or_else(|| format!("unknown model '{s}'"))
    }
}

/// What every EOS family can do.
pub trait EquationOfState {
    fn kind(&self) -> ModelKind;

    /// Solve for volume at pressure and temperature (vapor branch).
    fn solve_volume(&self, p: Pressure, t: Temperature) -> EosResult<Volume>;

    /// Closed-form pressure at volume and temperature.
    fn solve_pressure(&self, v: Volume, t: Temperature) -> EosResult<Pressure>;

    /// Whether the model is physically applicable at `point`.
    fn is_valid(&self, point: &StatePoint) -> bool;

    /// Integrate U, Cv, Cp from `prev` to `next`.
    fn update_state(&self, prev: &DynamicState, next: StatePoint) -> EosResult<DynamicState>;

    /// Resolve a request into a full state point.
    fn state_at(&self, request: StateRequest) -> EosResult<StatePoint> {
        request.validate()?;
        match request {
            StateRequest::PT { p, t } => {
                let v = self.solve_volume(p, t)?;
                StatePoint::new(p, v, t)
            }
            StateRequest::VT { v, t } => {
                let p = self.solve_pressure(v, t)?;
                if p.value <= 0.0 {
                    return Err(EosError::model(
                        ModelReason::NoPositiveRoot,
                        format!("non-positive pressure {} Pa at V={v} T={}", p.value, t.value),
                    ));
                }
                StatePoint::new(p, v, t)
            }
        }
    }

    /// Proposed state after `request`, computed from `prev` without committing.
    fn transition(&self, prev: &DynamicState, request: StateRequest) -> EosResult<DynamicState> {
        let next = self.state_at(request)?;
        self.update_state(prev, next)
    }
}

/// Closed set of EOS families.
#[derive(Debug, Clone, PartialEq)]
pub enum EosModel {
    RedlichKwong(RedlichKwong),
    RedlichKwongSoave(RedlichKwongSoave),
    PengRobinson(PengRobinson),
    GostNaturalGas(GostNaturalGas),
}

impl EosModel {
    /// Derive the coefficients of `kind` for `gas`.
    pub fn derive(kind: ModelKind, gas: &GasDescription) -> EosResult<Self> {
        Ok(match kind {
            ModelKind::RedlichKwong => EosModel::RedlichKwong(RedlichKwong::derive(gas)?),
            ModelKind::RedlichKwongSoave => {
                EosModel::RedlichKwongSoave(RedlichKwongSoave::derive(gas)?)
            }
            ModelKind::PengRobinson => EosModel::PengRobinson(PengRobinson::derive(gas)?),
            ModelKind::GostNaturalGas => EosModel::GostNaturalGas(GostNaturalGas::derive(gas)?),
        })
    }

    fn inner(&self) -> &dyn EquationOfState {
        match self {
            EosModel::RedlichKwong(m) => m,
            EosModel::RedlichKwongSoave(m) => m,
            EosModel::PengRobinson(m) => m,
            EosModel::GostNaturalGas(m) => m,
        }
    }
}

impl EquationOfState for EosModel {
    fn kind(&self) -> ModelKind {
        self.inner().kind()
    }

    fn solve_volume(&self, p: Pressure, t: Temperature) -> EosResult<Volume> {
        self.inner().solve_volume(p, t)
    }

    fn solve_pressure(&self, v: Volume, t: Temperature) -> EosResult<Pressure> {
        self.inner().solve_pressure(v, t)
    }

    fn is_valid(&self, point: &StatePoint) -> bool {
        self.inner().is_valid(point)
    }

    fn update_state(&self, prev: &DynamicState, next: StatePoint) -> EosResult<DynamicState> {
        self.inner().update_state(prev, next)
    }
}

/// Reject non-positive or non-finite (P, T) before touching coefficients.
pub(crate) fn check_pt(p: Pressure, t: Temperature) -> EosResult<(f64, f64)> {
    StateRequest::PT { p, t }.validate()?;
    Ok((p.value, t.value))
}

/// Reject non-positive or non-finite (V, T).
pub(crate) fn check_vt(v: Volume, t: Temperature) -> EosResult<(f64, f64)> {
    StateRequest::VT { v, t }.validate()?;
    Ok((v, t.value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parsing() {
        assert_eq!("rk".parse::<ModelKind>().unwrap(), ModelKind::RedlichKwong);
        assert_eq!(
            "Peng_Robinson".parse::<ModelKind>().unwrap(),
            ModelKind::PengRobinson
        );
        assert_eq!(
            "gost-natural-gas".parse::<ModelKind>().unwrap(),
            ModelKind::GostNaturalGas
        );
        assert!("van-der-waals".parse::<ModelKind>().is_err());
    }

    #[test]
    fn default_priorities_order() {
        let mut kinds = ModelKind::ALL.to_vec();
        kinds.sort_by_key(|k| std::cmp::Reverse(k.default_priority()));
        assert_eq!(
            kinds,
            vec![
                ModelKind::GostNaturalGas,
                ModelKind::RedlichKwongSoave,
                ModelKind::PengRobinson,
                ModelKind::RedlichKwong
            ]
        );
    }
}
