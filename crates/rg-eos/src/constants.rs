//! Critical constants of a pure substance.

use crate::error::{EosError, EosResult, InitReason};
use rg_core::numeric::{Real, is_above0};
use rg_core::units::{Pressure, Temperature, k, pa};

/// Immutable critical constants of one component.
///
/// The volume unit of every state computed from these constants follows `R`:
/// a specific gas constant (J/(kg·K)) gives m³/kg, a molar one (J/(mol·K))
/// gives m³/mol.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstanceConstants {
    name: String,
    pc: Real,
    tc: Real,
    r: Real,
    acentric: Option<Real>,
    molar_mass: Option<Real>,
    binary_interaction: bool,
}

impl SubstanceConstants {
    /// Validates `Pc > 0`, `Tc > 0` and `R > 0`, all finite.
    pub fn new(
        name: impl Into<String>,
        pc: Pressure,
        tc: Temperature,
        r: Real,
    ) -> EosResult<Self> {
        let name = name.into();
        for (what, v) in [("Pc", pc.value), ("Tc", tc.value), ("R", r)] {
            if !is_above0(v) {
                return Err(EosError::init(
                    InitReason::InvalidConstants,
                    format!("{what} of '{name}' must be positive and finite, got {v}"),
                ));
            }
        }
        Ok(Self {
            name,
            pc: pc.value,
            tc: tc.value,
            r,
            acentric: None,
            molar_mass: None,
            binary_interaction: false,
        })
    }

    pub fn with_acentric(mut self, omega: Real) -> EosResult<Self> {
        if !omega.is_finite() {
            return Err(EosError::init(
                InitReason::InvalidConstants,
                format!("acentric factor of '{}' is not finite", self.name),
            ));
        }
        self.acentric = Some(omega);
        Ok(self)
    }

    /// Molar mass in kg/kmol.
    pub fn with_molar_mass(mut self, molar_mass: Real) -> EosResult<Self> {
        if !is_above0(molar_mass) {
            return Err(EosError::init(
                InitReason::InvalidConstants,
                format!("molar mass of '{}' must be positive", self.name),
            ));
        }
        self.molar_mass = Some(molar_mass);
        Ok(self)
    }

    pub fn with_binary_interaction(mut self, enabled: bool) -> Self {
        self.binary_interaction = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn critical_pressure(&self) -> Pressure {
        pa(self.pc)
    }

    pub fn critical_temperature(&self) -> Temperature {
        k(self.tc)
    }

    pub fn pc(&self) -> Real {
        self.pc
    }

    pub fn tc(&self) -> Real {
        self.tc
    }

    pub fn gas_constant(&self) -> Real {
        self.r
    }

    pub fn acentric(&self) -> Option<Real> {
        self.acentric
    }

    pub fn molar_mass(&self) -> Option<Real> {
        self.molar_mass
    }

    pub fn binary_interaction(&self) -> bool {
        self.binary_interaction
    }

    /// Acentric factor, or `InitError` naming the model that needs it.
    pub fn require_acentric(&self, needed_by: &str) -> EosResult<Real> {
        self.acentric.ok_or_else(|| {
            EosError::init(
                InitReason::MissingConstant,
                format!("{needed_by} needs the acentric factor of '{}'", self.name),
            )
        })
    }
}
