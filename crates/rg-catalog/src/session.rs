//! Session construction from configuration.

use crate::schema::{GasDef, ModelDef, ModelKindDef, RequestDef, SessionConfig};
use crate::source::ComponentSource;
use crate::{CatalogError, CatalogResult};
use rg_core::units::{k, pa};
use rg_eos::batch::isotherm;
use rg_eos::{CalculationSession, DynamicState, ModelKind, ModelSpec, StateRequest};
use tracing::debug;

impl From<ModelKindDef> for ModelKind {
    fn from(def: ModelKindDef) -> Self {
        match def {
            ModelKindDef::RedlichKwong => ModelKind::RedlichKwong,
            ModelKindDef::RedlichKwongSoave => ModelKind::RedlichKwongSoave,
            ModelKindDef::PengRobinson => ModelKind::PengRobinson,
            ModelKindDef::GostNaturalGas => ModelKind::GostNaturalGas,
        }
    }
}

impl From<ModelKind> for ModelKindDef {
    fn from(kind: ModelKind) -> Self {
        match kind {
            ModelKind::RedlichKwong => ModelKindDef::RedlichKwong,
            ModelKind::RedlichKwongSoave => ModelKindDef::RedlichKwongSoave,
            ModelKind::PengRobinson => ModelKindDef::PengRobinson,
            ModelKind::GostNaturalGas => ModelKindDef::GostNaturalGas,
        }
    }
}

impl ModelDef {
    pub fn to_spec(&self) -> ModelSpec {
        let kind = ModelKind::from(self.kind);
        ModelSpec::new(kind, self.priority.unwrap_or(kind.default_priority()))
    }
}

impl RequestDef {
    pub fn expand(&self) -> Vec<StateRequest> {
        match *self {
            RequestDef::Pt { p_pa, t_k } => vec![StateRequest::PT {
                p: pa(p_pa),
                t: k(t_k),
            }],
            RequestDef::Vt { v, t_k } => vec![StateRequest::VT { v, t: k(t_k) }],
            RequestDef::Isotherm {
                t_k,
                p_from_pa,
                p_to_pa,
                points,
            } => isotherm(k(t_k), pa(p_from_pa), pa(p_to_pa), points),
        }
    }
}

impl SessionConfig {
    /// Build the session and move it to the configured initial point.
    ///
    /// A pure gas starts from its data-source seed and, when `initial` is set,
    /// is integrated from there. A mixture is seeded directly at `initial`, or
    /// at the fraction-weighted reference point of its components.
    pub fn build_session(&self, source: &impl ComponentSource) -> CatalogResult<CalculationSession> {
        if self.models.is_empty() {
            return Err(CatalogError::Invalid {
                what: format!("session '{}' lists no models", self.name),
            });
        }
        let gas = source.gas(&self.gas)?;
        let specs: Vec<ModelSpec> = self.models.iter().map(ModelDef::to_spec).collect();

        let seed: DynamicState = match &self.gas {
            GasDef::Pure { component } => source.dynamic_seed(component)?,
            GasDef::Mixture(spec) => {
                let (p, t) = match self.initial {
                    Some(point) => (point.p_pa, point.t_k),
                    None => {
                        let mut p = 0.0;
                        let mut t = 0.0;
                        for c in &spec.components {
                            let st = source.initial_state(&c.id)?;
                            p += c.fraction * st.p_pa();
                            t += c.fraction * st.t_k();
                        }
                        (p, t)
                    }
                };
                match &gas {
                    rg_eos::GasDescription::Mixture(mix) => mix.seed_at(pa(p), k(t))?,
                    rg_eos::GasDescription::Pure(_) => {
                        return Err(CatalogError::Invalid {
                            what: "mixture definition resolved to a pure gas".to_string(),
                        });
                    }
                }
            }
        };

        let mut session = CalculationSession::new(gas, seed, &specs)?;
        if let (GasDef::Pure { .. }, Some(point)) = (&self.gas, self.initial) {
            session.set_state_pt(pa(point.p_pa), k(point.t_k))?;
        }
        debug!(session = %self.name, model = %session.active_kind(), "session built");
        Ok(session)
    }

    /// All requests, isotherms expanded.
    pub fn state_requests(&self) -> Vec<StateRequest> {
        self.requests.iter().flat_map(RequestDef::expand).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PointDef;
    use crate::source::Catalog;

    fn config(gas: GasDef, initial: Option<PointDef>) -> SessionConfig {
        SessionConfig {
            name: "test".to_string(),
            gas,
            initial,
            models: vec![
                ModelDef {
                    kind: ModelKindDef::PengRobinson,
                    priority: None,
                },
                ModelDef {
                    kind: ModelKindDef::RedlichKwong,
                    priority: Some(90),
                },
            ],
            requests: vec![],
        }
    }

    #[test]
    fn pure_gas_moves_to_initial_point() {
        let cfg = config(
            GasDef::Pure {
                component: "methane".to_string(),
            },
            Some(PointDef {
                p_pa: 2e6,
                t_k: 320.0,
            }),
        );
        let session = cfg.build_session(&Catalog::builtin()).unwrap();
        assert_eq!(session.active_kind(), ModelKind::RedlichKwong);
        let st = session.state().unwrap();
        assert_eq!(st.point().p_pa(), 2e6);
        assert_eq!(st.point().t_k(), 320.0);
    }

    #[test]
    fn mixture_seeded_at_weighted_reference_point() {
        let cfg = config(
            GasDef::Mixture(crate::schema::MixtureSpec::from_pairs([
                ("methane", 0.9),
                ("ethane", 0.1),
            ])),
            None,
        );
        let session = cfg.build_session(&Catalog::builtin()).unwrap();
        let st = session.state().unwrap();
        assert!((st.point().p_pa() - 101_325.0).abs() < 1e-6);
        assert!((st.point().t_k() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn empty_model_list_is_invalid() {
        let mut cfg = config(
            GasDef::Pure {
                component: "methane".to_string(),
            },
            None,
        );
        cfg.models.clear();
        assert!(matches!(
            cfg.build_session(&Catalog::builtin()),
            Err(CatalogError::Invalid { .. })
        ));
    }

    #[test]
    fn default_priority_and_request_expansion() {
        let def = ModelDef {
            kind: ModelKindDef::GostNaturalGas,
            priority: None,
        };
        assert_eq!(def.to_spec().priority, 100);

        let mut cfg = config(
            GasDef::Pure {
                component: "methane".to_string(),
            },
            None,
        );
        cfg.requests = vec![
            RequestDef::Pt {
                p_pa: 1e6,
                t_k: 300.0,
            },
            RequestDef::Isotherm {
                t_k: 300.0,
                p_from_pa: 1e5,
                p_to_pa: 1e6,
                points: 4,
            },
        ];
        assert_eq!(cfg.state_requests().len(), 5);
    }
}
