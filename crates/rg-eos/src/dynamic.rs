//! Path-dependent state quantities.
//!
//! Internal energy and heat capacities are not recomputed from scratch: they are
//! seeded once and then carried along the path by the active model's residual
//! integrals. Enthalpy is derived, `H = U + P·V`.

use crate::error::{EosError, EosResult, ModelReason};
use crate::state::StatePoint;
use rg_core::numeric::{DOUBLE_ACCURACY, Real};

/// U, Cv and Cp at a [`StatePoint`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicState {
    internal_energy: Real,
    heat_capacity_v: Real,
    heat_capacity_p: Real,
    point: StatePoint,
}

/// Change of the integrated quantities between two dynamic states.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DynamicDelta {
    pub du: Real,
    pub dcv: Real,
    pub dcp: Real,
}

impl DynamicDelta {
    pub fn is_zero(&self, tol: Real) -> bool {
        self.du.abs() <= tol && self.dcv.abs() <= tol && self.dcp.abs() <= tol
    }
}

impl DynamicState {
    /// Seed values at a reference point. Heat capacities must be positive.
    pub fn seed(point: StatePoint, u: Real, cv: Real, cp: Real) -> EosResult<Self> {
        if !u.is_finite() {
            return Err(EosError::degenerate(format!(
                "seed internal energy must be finite, got {u}"
            )));
        }
        for (what, v) in [("Cv", cv), ("Cp", cp)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(EosError::degenerate(format!(
                    "seed {what} must be positive and finite, got {v}"
                )));
            }
        }
        Ok(Self {
            internal_energy: u,
            heat_capacity_v: cv,
            heat_capacity_p: cp,
            point,
        })
    }

    /// Move to `point` applying residual increments.
    ///
    /// `cp_minus_cv` is evaluated at the new point; `Cp` of the result is
    /// `Cv_new + cp_minus_cv`.
    pub(crate) fn advanced(
        &self,
        point: StatePoint,
        du: Real,
        dcv: Real,
        cp_minus_cv: Real,
    ) -> EosResult<Self> {
        let u = self.internal_energy + du;
        let cv = self.heat_capacity_v + dcv;
        let cp = cv + cp_minus_cv;
        if !(u.is_finite() && cv.is_finite() && cp.is_finite()) {
            return Err(EosError::model(
                ModelReason::NonFiniteResult,
                format!(
                    "integration to V={} T={} produced U={u} Cv={cv} Cp={cp}",
                    point.volume(),
                    point.t_k()
                ),
            ));
        }
        Ok(Self {
            internal_energy: u,
            heat_capacity_v: cv,
            heat_capacity_p: cp,
            point,
        })
    }

    /// Fraction-weighted combination of component states at `point`.
    pub fn weighted_average(parts: &[(Real, DynamicState)], point: StatePoint) -> EosResult<Self> {
        if parts.is_empty() {
            return Err(EosError::degenerate("no dynamic states to average"));
        }
        let (mut u, mut cv, mut cp) = (0.0, 0.0, 0.0);
        for (x, st) in parts {
            u += x * st.internal_energy;
            cv += x * st.heat_capacity_v;
            cp += x * st.heat_capacity_p;
        }
        Self::seed(point, u, cv, cp)
    }

    pub fn point(&self) -> &StatePoint {
        &self.point
    }

    pub fn internal_energy(&self) -> Real {
        self.internal_energy
    }

    pub fn heat_capacity_v(&self) -> Real {
        self.heat_capacity_v
    }

    pub fn heat_capacity_p(&self) -> Real {
        self.heat_capacity_p
    }

    pub fn enthalpy(&self) -> Real {
        self.internal_energy + self.point.p_pa() * self.point.volume()
    }

    /// `k = Cp / Cv`.
    pub fn adiabatic_index(&self) -> Real {
        self.heat_capacity_p / self.heat_capacity_v
    }

    /// Critical pressure ratio `β = (2/(k+1))^(k/(k-1))` of an isentropic nozzle.
    pub fn critical_pressure_ratio(&self) -> Real {
        let k = self.adiabatic_index();
        if (k - 1.0).abs() < DOUBLE_ACCURACY {
            // limit k -> 1
            return (-0.5f64).exp();
        }
        (2.0 / (k + 1.0)).powf(k / (k - 1.0))
    }

    pub fn delta_from(&self, earlier: &DynamicState) -> DynamicDelta {
        DynamicDelta {
            du: self.internal_energy - earlier.internal_energy,
            dcv: self.heat_capacity_v - earlier.heat_capacity_v,
            dcp: self.heat_capacity_p - earlier.heat_capacity_p,
        }
    }
}
