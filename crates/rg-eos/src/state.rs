//! State point definitions.

use crate::error::EosResult;
use rg_core::numeric::{Real, Tolerances, ensure_positive, nearly_equal};
use rg_core::units::{Pressure, Temperature};

/// Specific (or molar) volume; the unit follows the gas constant in use.
pub type Volume = Real;

/// Pressure, volume and temperature of one equilibrium state.
///
/// Values are replaced on every update, never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatePoint {
    p: Pressure,
    v: Volume,
    t: Temperature,
}

impl StatePoint {
    /// Validates that all three values are positive and finite.
    pub fn new(p: Pressure, v: Volume, t: Temperature) -> EosResult<Self> {
        ensure_positive(p.value, "pressure")?;
        ensure_positive(v, "volume")?;
        ensure_positive(t.value, "temperature")?;
        Ok(Self { p, v, t })
    }

    pub fn pressure(&self) -> Pressure {
        self.p
    }

    pub fn temperature(&self) -> Temperature {
        self.t
    }

    pub fn volume(&self) -> Volume {
        self.v
    }

    pub fn p_pa(&self) -> Real {
        self.p.value
    }

    pub fn t_k(&self) -> Real {
        self.t.value
    }

    /// Compare two points with `FLOAT_ACCURACY` relative tolerance.
    pub fn approx_eq(&self, other: &StatePoint) -> bool {
        let tol = Tolerances::physical();
        nearly_equal(self.p_pa(), other.p_pa(), tol)
            && nearly_equal(self.v, other.v, tol)
            && nearly_equal(self.t_k(), other.t_k(), tol)
    }
}

/// A request to move a session to a new state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateRequest {
    /// Solve for V at the given pressure and temperature.
    PT { p: Pressure, t: Temperature },
    /// Solve for P at the given volume and temperature.
    VT { v: Volume, t: Temperature },
}

impl StateRequest {
    /// Reject non-positive or non-finite inputs before any model sees them.
    pub fn validate(&self) -> EosResult<()> {
        match *self {
            StateRequest::PT { p, t } => {
                ensure_positive(p.value, "pressure")?;
                ensure_positive(t.value, "temperature")?;
            }
            StateRequest::VT { v, t } => {
                ensure_positive(v, "volume")?;
                ensure_positive(t.value, "temperature")?;
            }
        }
        Ok(())
    }

    pub fn temperature(&self) -> Temperature {
        match *self {
            StateRequest::PT { t, .. } | StateRequest::VT { t, .. } => t,
        }
    }
}

impl std::fmt::Display for StateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateRequest::PT { p, t } => write!(f, "P={} Pa, T={} K", p.value, t.value),
            StateRequest::VT { v, t } => write!(f, "V={v}, T={} K", t.value),
        }
    }
}
