//! Component data source.

use crate::schema::{CatalogDef, ComponentDef, GasDef, InitialStateDef, MixtureSpec};
use crate::{CatalogError, CatalogResult};
use rg_core::units::constants::R_UNIVERSAL;
use rg_core::units::{k, pa};
use rg_eos::{
    DynamicState, GasDescription, MixtureComponent, MixtureComposition, StatePoint,
    SubstanceConstants,
};
use std::collections::BTreeMap;

/// Lookup of component constants and reference states by id.
pub trait ComponentSource {
    fn constants(&self, id: &str) -> CatalogResult<SubstanceConstants>;

    fn initial_state(&self, id: &str) -> CatalogResult<StatePoint>;

    /// U, Cv, Cp at the component's initial state.
    fn dynamic_seed(&self, id: &str) -> CatalogResult<DynamicState>;

    /// Resolve a mixture specification; fractions are validated, not normalized.
    fn composition(&self, spec: &MixtureSpec) -> CatalogResult<MixtureComposition> {
        let items = spec
            .components
            .iter()
            .map(|c| {
                Ok(MixtureComponent {
                    fraction: c.fraction,
                    constants: self.constants(&c.id)?,
                    seed: self.dynamic_seed(&c.id)?,
                })
            })
            .collect::<CatalogResult<Vec<_>>>()?;
        Ok(MixtureComposition::new(items)?)
    }

    fn gas(&self, def: &GasDef) -> CatalogResult<GasDescription> {
        match def {
            GasDef::Pure { component } => Ok(GasDescription::Pure(self.constants(component)?)),
            GasDef::Mixture(spec) => Ok(GasDescription::Mixture(self.composition(spec)?)),
        }
    }
}

/// In-memory component table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: BTreeMap<String, ComponentDef>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records are validated on insert; a later record replaces an earlier one with the same id.
    pub fn from_def(def: CatalogDef) -> CatalogResult<Self> {
        let mut catalog = Self::new();
        for record in def.components {
            catalog.insert(record)?;
        }
        Ok(catalog)
    }

    pub fn from_yaml_str(content: &str) -> CatalogResult<Self> {
        let def: CatalogDef = serde_yaml::from_str(content)?;
        Self::from_def(def)
    }

    pub fn from_json_str(content: &str) -> CatalogResult<Self> {
        let def: CatalogDef = serde_json::from_str(content)?;
        Self::from_def(def)
    }

    pub fn insert(&mut self, record: ComponentDef) -> CatalogResult<()> {
        to_constants(&record)?;
        to_seed(&record)?;
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    /// Merge another catalog's records over this one.
    pub fn extend(&mut self, other: Catalog) {
        self.records.extend(other.records);
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    pub fn get(&self, id: &str) -> CatalogResult<&ComponentDef> {
        self.records.get(id).ok_or_else(|| CatalogError::NotFound {
            id: id.to_string(),
        })
    }

    pub fn to_def(&self) -> CatalogDef {
        CatalogDef {
            components: self.records.values().cloned().collect(),
        }
    }

    /// Common natural-gas components with specific gas constants (J/(kg·K)) and
    /// ideal-gas seeds at 300 K and 101 325 Pa.
    pub fn builtin() -> Self {
        const P0: f64 = 101_325.0;
        const T0: f64 = 300.0;
        let records = BUILTIN
            .iter()
            .map(|&(id, molar_mass, tc_k, pc_pa, acentric, cp)| {
                let r = 1000.0 * R_UNIVERSAL / molar_mass;
                let cv = cp - r;
                let record = ComponentDef {
                    id: id.to_string(),
                    pc_pa,
                    tc_k,
                    r,
                    acentric: Some(acentric),
                    molar_mass: Some(molar_mass),
                    binary_interaction: true,
                    initial: InitialStateDef {
                        p_pa: P0,
                        t_k: T0,
                        v: None,
                        u: cv * T0,
                        cv,
                        cp,
                    },
                };
                (id.to_string(), record)
            })
            .collect();
        Self { records }
    }
}

/// id, molar mass kg/kmol, Tc K, Pc Pa, acentric factor, ideal-gas cp J/(kg·K) at 300 K.
const BUILTIN: [(&str, f64, f64, f64, f64, f64); 14] = [
    ("methane", 16.043, 190.564, 4.5992e6, 0.01142, 2226.0),
    ("ethane", 30.069, 305.32, 4.8722e6, 0.0995, 1766.0),
    ("propane", 44.096, 369.83, 4.248e6, 0.1521, 1679.0),
    ("i_butane", 58.122, 407.81, 3.629e6, 0.184, 1680.0),
    ("n_butane", 58.122, 425.12, 3.796e6, 0.201, 1716.0),
    ("i_pentane", 72.149, 460.35, 3.378e6, 0.2274, 1660.0),
    ("n_pentane", 72.149, 469.7, 3.37e6, 0.251, 1664.0),
    ("hexane", 86.175, 507.82, 3.034e6, 0.299, 1660.0),
    ("nitrogen", 28.013, 126.19, 3.3958e6, 0.0372, 1040.0),
    ("carbon_dioxide", 44.01, 304.13, 7.3773e6, 0.2239, 846.0),
    ("hydrogen_sulfide", 34.081, 373.1, 9.0e6, 0.1005, 1003.0),
    ("carbon_monoxide", 28.01, 132.86, 3.4935e6, 0.0497, 1040.0),
    ("helium", 4.0026, 5.1953, 0.22746e6, -0.382, 5193.0),
    ("hydrogen", 2.016, 33.145, 1.2964e6, -0.219, 14310.0),
];

fn to_constants(record: &ComponentDef) -> CatalogResult<SubstanceConstants> {
    let mut c = SubstanceConstants::new(&record.id, pa(record.pc_pa), k(record.tc_k), record.r)?
        .with_binary_interaction(record.binary_interaction);
    if let Some(omega) = record.acentric {
        c = c.with_acentric(omega)?;
    }
    if let Some(m) = record.molar_mass {
        c = c.with_molar_mass(m)?;
    }
    Ok(c)
}

fn to_point(record: &ComponentDef) -> CatalogResult<StatePoint> {
    let init = &record.initial;
    let v = init
        .v
        .unwrap_or_else(|| record.r * init.t_k / init.p_pa);
    Ok(StatePoint::new(pa(init.p_pa), v, k(init.t_k))?)
}

fn to_seed(record: &ComponentDef) -> CatalogResult<DynamicState> {
    let init = &record.initial;
    Ok(DynamicState::seed(
        to_point(record)?,
        init.u,
        init.cv,
        init.cp,
    )?)
}

impl ComponentSource for Catalog {
    fn constants(&self, id: &str) -> CatalogResult<SubstanceConstants> {
        to_constants(self.get(id)?)
    }

    fn initial_state(&self, id: &str) -> CatalogResult<StatePoint> {
        to_point(self.get(id)?)
    }

    fn dynamic_seed(&self, id: &str) -> CatalogResult<DynamicState> {
        to_seed(self.get(id)?)
    }
}
