//! Mixing rules: from per-component critical coefficients to one-fluid
//! mixture coefficients.

use crate::composition::MixtureComposition;
use crate::constants::SubstanceConstants;
use crate::error::EosResult;
use rg_core::numeric::Real;
use tracing::debug;

/// Attraction parameter `a` and co-volume `b` of a cubic EOS at the critical
/// point (temperature factors applied separately by each family).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalCoefficients {
    pub a: Real,
    pub b: Real,
}

/// Symmetric table of binary interaction parameters kᵢⱼ keyed by component id.
#[derive(Debug, Clone, Copy)]
pub struct BinaryInteractionTable {
    entries: &'static [(&'static str, &'static str, Real)],
}

impl BinaryInteractionTable {
    pub const fn new(entries: &'static [(&'static str, &'static str, Real)]) -> Self {
        Self { entries }
    }

    /// Soave-family values for acid gases, nitrogen and carbon monoxide with
    /// hydrocarbons.
    pub const fn soave() -> Self {
        Self::new(SOAVE_KIJ)
    }

    /// kᵢⱼ for a pair, 0.0 when the pair is not listed.
    pub fn lookup(&self, i: &str, j: &str) -> Real {
        self.entries
            .iter()
            .find(|(a, b, _)| (*a == i && *b == j) || (*a == j && *b == i))
            .map(|(_, _, k)| *k)
            .unwrap_or(0.0)
    }
}

static SOAVE_KIJ: &[(&str, &str, Real)] = &[
    ("carbon_dioxide", "methane", 0.12),
    ("carbon_dioxide", "ethylene", 0.15),
    ("carbon_dioxide", "ethane", 0.15),
    ("carbon_dioxide", "propylene", 0.08),
    ("carbon_dioxide", "propane", 0.15),
    ("carbon_dioxide", "i_butane", 0.15),
    ("carbon_dioxide", "n_butane", 0.15),
    ("carbon_dioxide", "i_pentane", 0.15),
    ("carbon_dioxide", "n_pentane", 0.15),
    ("carbon_dioxide", "hexane", 0.15),
    ("carbon_dioxide", "heptane", 0.15),
    ("carbon_dioxide", "octane", 0.15),
    ("carbon_dioxide", "nonane", 0.15),
    ("carbon_dioxide", "decane", 0.15),
    ("carbon_dioxide", "cyclohexane", 0.15),
    ("carbon_dioxide", "methylcyclohexane", 0.15),
    ("carbon_dioxide", "benzene", 0.15),
    ("carbon_dioxide", "toluene", 0.15),
    ("carbon_dioxide", "ethylbenzene", 0.15),
    ("hydrogen_sulfide", "methane", 0.08),
    ("hydrogen_sulfide", "ethylene", 0.07),
    ("hydrogen_sulfide", "ethane", 0.07),
    ("hydrogen_sulfide", "propylene", 0.07),
    ("hydrogen_sulfide", "propane", 0.07),
    ("hydrogen_sulfide", "i_butane", 0.06),
    ("hydrogen_sulfide", "n_butane", 0.06),
    ("hydrogen_sulfide", "i_pentane", 0.06),
    ("hydrogen_sulfide", "n_pentane", 0.06),
    ("hydrogen_sulfide", "hexane", 0.05),
    ("hydrogen_sulfide", "heptane", 0.04),
    ("hydrogen_sulfide", "octane", 0.04),
    ("hydrogen_sulfide", "nonane", 0.03),
    ("hydrogen_sulfide", "decane", 0.03),
    ("hydrogen_sulfide", "carbon_dioxide", 0.12),
    ("hydrogen_sulfide", "cyclohexane", 0.03),
    ("hydrogen_sulfide", "methylcyclohexane", 0.03),
    ("hydrogen_sulfide", "benzene", 0.03),
    ("hydrogen_sulfide", "toluene", 0.03),
    ("hydrogen_sulfide", "ethylbenzene", 0.03),
    ("nitrogen", "methane", 0.02),
    ("nitrogen", "ethylene", 0.04),
    ("nitrogen", "ethane", 0.06),
    ("nitrogen", "propylene", 0.06),
    ("nitrogen", "propane", 0.08),
    ("nitrogen", "i_butane", 0.08),
    ("nitrogen", "n_butane", 0.08),
    ("nitrogen", "i_pentane", 0.08),
    ("nitrogen", "n_pentane", 0.08),
    ("nitrogen", "hexane", 0.08),
    ("nitrogen", "heptane", 0.08),
    ("nitrogen", "octane", 0.08),
    ("nitrogen", "nonane", 0.08),
    ("nitrogen", "decane", 0.08),
    ("nitrogen", "cyclohexane", 0.08),
    ("nitrogen", "methylcyclohexane", 0.08),
    ("nitrogen", "benzene", 0.08),
    ("nitrogen", "toluene", 0.08),
    ("nitrogen", "ethylbenzene", 0.08),
    ("carbon_monoxide", "methane", -0.02),
    ("carbon_monoxide", "carbon_dioxide", -0.04),
];

/// van der Waals one-fluid combination over a composition.
///
/// `a = ΣᵢΣⱼ xᵢxⱼ√(aᵢaⱼ)(1 − kᵢⱼ)`, `b = Σᵢ xᵢbᵢ`. kᵢⱼ is taken from the
/// interaction table only when both components enable binary interaction.
///
/// `xᵢ` are the composition's basis fractions: mole fractions for molar
/// coefficients, mass fractions for specific ones (per-kg `aᵢ` and `bᵢ`
/// scale as `1/Mᵢ²` and `1/Mᵢ`).
pub struct MixtureCombiner<'a> {
    composition: &'a MixtureComposition,
    interactions: Option<BinaryInteractionTable>,
}

impl<'a> MixtureCombiner<'a> {
    pub fn new(composition: &'a MixtureComposition) -> Self {
        Self {
            composition,
            interactions: None,
        }
    }

    pub fn with_interactions(mut self, table: BinaryInteractionTable) -> Self {
        self.interactions = Some(table);
        self
    }

    pub fn interaction(&self, ci: &SubstanceConstants, cj: &SubstanceConstants) -> Real {
        match &self.interactions {
            Some(table) if ci.binary_interaction() && cj.binary_interaction() => {
                table.lookup(ci.name(), cj.name())
            }
            _ => 0.0,
        }
    }

    /// Combine per-component coefficients produced by `pure`.
    ///
    /// An error from `pure` (missing constant) aborts the combination.
    pub fn combine(
        &self,
        pure: impl Fn(&SubstanceConstants) -> EosResult<CriticalCoefficients>,
    ) -> EosResult<CriticalCoefficients> {
        let parts = self
            .composition
            .iter()
            .zip(self.composition.basis_fractions())
            .map(|(c, x)| Ok((x, &c.constants, pure(&c.constants)?)))
            .collect::<EosResult<Vec<_>>>()?;

        let mut a = 0.0;
        let mut b = 0.0;
        for (xi, ci, pi) in &parts {
            b += xi * pi.b;
            for (xj, cj, pj) in &parts {
                a += xi * xj * (pi.a * pj.a).sqrt() * (1.0 - self.interaction(ci, cj));
            }
        }
        debug!(components = parts.len(), a, b, "combined mixture coefficients");
        Ok(CriticalCoefficients { a, b })
    }
}
