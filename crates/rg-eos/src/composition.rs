//! Gas descriptions: pure substances and mixtures.

use crate::constants::SubstanceConstants;
use crate::dynamic::DynamicState;
use crate::error::{EosError, EosResult, InitReason};
use crate::state::StatePoint;
use rg_core::numeric::{Real, Tolerances, nearly_equal};
use rg_core::units::constants::R_UNIVERSAL;
use rg_core::units::{Pressure, Temperature, k, pa};

/// Allowed deviation of the mole-fraction sum from one.
pub const GAS_MIX_PERCENT_EPS: Real = 1e-4;

/// One entry of a mixture.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureComponent {
    pub fraction: Real,
    pub constants: SubstanceConstants,
    /// Dynamic state of the pure component at its own reference point.
    pub seed: DynamicState,
}

/// Mole fractions with their constants and seeds.
///
/// Fractions are validated, not normalized: each must lie in `(0, 1]` and
/// their sum must be within [`GAS_MIX_PERCENT_EPS`] of one.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureComposition {
    items: Vec<MixtureComponent>,
}

impl MixtureComposition {
    pub fn new(items: Vec<MixtureComponent>) -> EosResult<Self> {
        if items.is_empty() {
            return Err(EosError::init(
                InitReason::EmptyMixture,
                "mixture has no components",
            ));
        }

        let mut sum = 0.0;
        for (i, item) in items.iter().enumerate() {
            let x = item.fraction;
            if !(x.is_finite() && x > 0.0 && x <= 1.0) {
                return Err(EosError::init(
                    InitReason::InvalidFraction,
                    format!(
                        "fraction of '{}' must be in (0, 1], got {x}",
                        item.constants.name()
                    ),
                ));
            }
            if items[..i]
                .iter()
                .any(|o| o.constants.name() == item.constants.name())
            {
                return Err(EosError::init(
                    InitReason::DuplicateComponent,
                    format!("'{}' listed twice", item.constants.name()),
                ));
            }
            sum += x;
        }

        if (sum - 1.0).abs() > GAS_MIX_PERCENT_EPS {
            return Err(EosError::init(
                InitReason::FractionSum,
                format!("mole fractions sum to {sum}"),
            ));
        }

        Ok(Self { items })
    }

    pub fn iter(&self) -> impl Iterator<Item = &MixtureComponent> + '_ {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn fraction_sum(&self) -> Real {
        self.items.iter().map(|c| c.fraction).sum()
    }

    /// Mole fraction of a component by name (0.0 if absent).
    pub fn mole_fraction(&self, name: &str) -> Real {
        self.items
            .iter()
            .find(|c| c.constants.name() == name)
            .map(|c| c.fraction)
            .unwrap_or(0.0)
    }

    /// `Σ xᵢ·f(constantsᵢ)`.
    pub fn weighted(&self, f: impl Fn(&SubstanceConstants) -> Real) -> Real {
        self.items.iter().map(|c| c.fraction * f(&c.constants)).sum()
    }

    /// Whether the gas constants are specific (J/(kg·K)).
    ///
    /// True when every component carries a molar mass `M` (kg/kmol) with
    /// `R·M = 1000·R_u`. Otherwise the gas constants are taken as molar.
    pub fn is_specific(&self) -> bool {
        let tol = Tolerances {
            abs: 0.0,
            rel: 1e-3,
        };
        self.items.iter().all(|c| {
            c.constants.molar_mass().is_some_and(|m| {
                nearly_equal(c.constants.gas_constant() * m, 1000.0 * R_UNIVERSAL, tol)
            })
        })
    }

    /// Mole-fraction average of the molar masses, if every component has one.
    pub fn molar_mass(&self) -> Option<Real> {
        self.items
            .iter()
            .map(|c| c.constants.molar_mass().map(|m| c.fraction * m))
            .sum()
    }

    /// Weights for per-amount properties in the basis of the gas constants:
    /// mass fractions for specific constants, mole fractions for molar ones.
    pub fn basis_fractions(&self) -> Vec<Real> {
        match self.molar_mass().filter(|_| self.is_specific()) {
            Some(m_mix) => self
                .items
                .iter()
                .map(|c| c.fraction * c.constants.molar_mass().unwrap_or(0.0) / m_mix)
                .collect(),
            None => self.items.iter().map(|c| c.fraction).collect(),
        }
    }

    /// Mixture seed at `(p, t)`: component seeds averaged with
    /// [`basis_fractions`](Self::basis_fractions).
    ///
    /// The volume is a placeholder (weighted seed volumes); a model integrates
    /// the seed to its own volume.
    pub fn seed_at(&self, p: Pressure, t: Temperature) -> EosResult<DynamicState> {
        let weights = self.basis_fractions();
        let v = self
            .items
            .iter()
            .zip(&weights)
            .map(|(c, w)| w * c.seed.point().volume())
            .sum();
        let point = StatePoint::new(p, v, t)?;
        let parts: Vec<(Real, DynamicState)> = self
            .items
            .iter()
            .zip(weights)
            .map(|(c, w)| (w, c.seed))
            .collect();
        DynamicState::weighted_average(&parts, point)
    }

    /// Pseudo-critical constants by Kay's rule (linear in mole fraction).
    ///
    /// The acentric factor and molar mass are averaged only when every
    /// component carries one. The gas constant is `1000·R_u / Σ xM` for
    /// specific constants and `Σ xR` for molar ones.
    pub fn pseudo_critical(&self) -> EosResult<SubstanceConstants> {
        let name = self
            .items
            .iter()
            .map(|c| c.constants.name())
            .collect::<Vec<_>>()
            .join("+");
        let pc = self.weighted(SubstanceConstants::pc);
        let tc = self.weighted(SubstanceConstants::tc);
        let r = match self.molar_mass().filter(|_| self.is_specific()) {
            Some(m_mix) => 1000.0 * R_UNIVERSAL / m_mix,
            None => self.weighted(SubstanceConstants::gas_constant),
        };

        let mut out = SubstanceConstants::new(name, pa(pc), k(tc), r)?;
        let omegas: Option<Vec<Real>> = self.items.iter().map(|c| c.constants.acentric()).collect();
        if let Some(omegas) = omegas {
            let omega = self
                .items
                .iter()
                .zip(omegas)
                .map(|(c, w)| c.fraction * w)
                .sum();
            out = out.with_acentric(omega)?;
        }
        if let Some(m) = self.molar_mass() {
            out = out.with_molar_mass(m)?;
        }
        Ok(out)
    }
}

/// What a session calculates: a pure substance or a mixture.
#[derive(Debug, Clone, PartialEq)]
pub enum GasDescription {
    Pure(SubstanceConstants),
    Mixture(MixtureComposition),
}

impl GasDescription {
    /// Constants used by validity predicates: the pure constants, or the
    /// pseudo-critical constants of a mixture.
    pub fn reduced_constants(&self) -> EosResult<SubstanceConstants> {
        match self {
            GasDescription::Pure(c) => Ok(c.clone()),
            GasDescription::Mixture(m) => m.pseudo_critical(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            GasDescription::Pure(c) => c.name().to_string(),
            GasDescription::Mixture(m) => m
                .iter()
                .map(|c| format!("{}:{}", c.constants.name(), c.fraction))
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn seed(t: Real) -> DynamicState {
        let point = StatePoint::new(pa(101_325.0), 1.0, k(t)).unwrap();
        DynamicState::seed(point, 1700.0 * t, 1700.0, 2200.0).unwrap()
    }

    /// Component with a specific gas constant derived from its molar mass (kg/kmol).
    pub fn specific_component(name: &str, x: Real, molar_mass: Real, cp: Real) -> MixtureComponent {
        let r = 1000.0 * R_UNIVERSAL / molar_mass;
        let point = StatePoint::new(pa(101_325.0), r * 300.0 / 101_325.0, k(300.0)).unwrap();
        MixtureComponent {
            fraction: x,
            constants: SubstanceConstants::new(name, pa(4e6), k(200.0), r)
                .unwrap()
                .with_molar_mass(molar_mass)
                .unwrap(),
            seed: DynamicState::seed(point, (cp - r) * 300.0, cp - r, cp).unwrap(),
        }
    }

    pub fn component(name: &str, x: Real, tc: Real, pc: Real, omega: Real) -> MixtureComponent {
        MixtureComponent {
            fraction: x,
            constants: SubstanceConstants::new(name, pa(pc), k(tc), 8.314)
                .unwrap()
                .with_acentric(omega)
                .unwrap(),
            seed: seed(300.0),
        }
    }
}
