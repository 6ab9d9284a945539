//! Serialized forms: component records and session configuration.

use serde::{Deserialize, Serialize};

/// One component as stored in a component file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDef {
    pub id: String,
    pub pc_pa: f64,
    pub tc_k: f64,
    /// Gas constant; J/(kg·K) gives specific volumes, J/(mol·K) molar ones.
    pub r: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acentric: Option<f64>,
    /// kg/kmol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molar_mass: Option<f64>,
    #[serde(default)]
    pub binary_interaction: bool,
    pub initial: InitialStateDef,
}

/// Reference point of a component and its dynamic seed there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitialStateDef {
    pub p_pa: f64,
    pub t_k: f64,
    /// Volume at the reference point; estimated from the ideal gas when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<f64>,
    pub u: f64,
    pub cv: f64,
    pub cp: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogDef {
    #[serde(default)]
    pub components: Vec<ComponentDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FractionDef {
    pub id: String,
    pub fraction: f64,
}

/// Mixture specification: component ids with mole fractions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MixtureSpec {
    pub components: Vec<FractionDef>,
}

impl MixtureSpec {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            components: pairs
                .into_iter()
                .map(|(id, fraction)| FractionDef {
                    id: id.into(),
                    fraction,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GasDef {
    Pure { component: String },
    Mixture(MixtureSpec),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKindDef {
    #[serde(alias = "rk")]
    RedlichKwong,
    #[serde(alias = "rks")]
    RedlichKwongSoave,
    #[serde(alias = "pr")]
    PengRobinson,
    #[serde(alias = "gost")]
    GostNaturalGas,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDef {
    pub kind: ModelKindDef,
    /// Family default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i8>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointDef {
    pub p_pa: f64,
    pub t_k: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestDef {
    Pt { p_pa: f64, t_k: f64 },
    Vt { v: f64, t_k: f64 },
    /// Isotherm from `p_from_pa` to `p_to_pa` in `points` steps.
    Isotherm {
        t_k: f64,
        p_from_pa: f64,
        p_to_pa: f64,
        points: usize,
    },
}

/// Everything needed to build and drive one calculation session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub name: String,
    pub gas: GasDef,
    /// Where the session starts; the data source's reference point when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<PointDef>,
    pub models: Vec<ModelDef>,
    #[serde(default)]
    pub requests: Vec<RequestDef>,
}
