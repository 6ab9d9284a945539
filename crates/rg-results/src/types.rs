//! Snapshot records.

use rg_eos::{CalculationSession, DynamicState, ModelKind, PathResult, SubstanceConstants};
use serde::{Deserialize, Serialize};

/// One evaluated state with the context needed to interpret it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub label: String,
    pub gas: String,
    pub model: String,
    pub pc_pa: f64,
    pub tc_k: f64,
    pub r: f64,
    pub p_pa: f64,
    pub v: f64,
    pub t_k: f64,
    pub u: f64,
    pub cv: f64,
    pub cp: f64,
    pub h: f64,
    /// Adiabatic index cp/cv.
    pub k: f64,
    /// Critical pressure ratio.
    pub beta: f64,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

impl Snapshot {
    pub fn new(
        label: impl Into<String>,
        constants: &SubstanceConstants,
        model: ModelKind,
        state: &DynamicState,
    ) -> Self {
        let point = state.point();
        Self {
            label: label.into(),
            gas: constants.name().to_string(),
            model: model.name().to_string(),
            pc_pa: constants.pc(),
            tc_k: constants.tc(),
            r: constants.gas_constant(),
            p_pa: point.p_pa(),
            v: point.volume(),
            t_k: point.t_k(),
            u: state.internal_energy(),
            cv: state.heat_capacity_v(),
            cp: state.heat_capacity_p(),
            h: state.enthalpy(),
            k: state.adiabatic_index(),
            beta: state.critical_pressure_ratio(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Current state of the session's active model.
    pub fn capture(session: &CalculationSession, label: impl Into<String>) -> crate::ResultsResult<Self> {
        let state = session.state()?;
        Ok(Self::new(
            label,
            session.reduced_constants(),
            session.active_kind(),
            state,
        ))
    }

    /// Snapshots of the successful points of a path; labels are `label#index`.
    pub fn from_path(session: &CalculationSession, label: &str, path: &PathResult) -> Vec<Self> {
        path.points
            .iter()
            .enumerate()
            .filter_map(|(i, point)| {
                let outcome = point.outcome.as_ref().ok()?;
                Some(Self::new(
                    format!("{label}#{i}"),
                    session.reduced_constants(),
                    outcome.model,
                    &outcome.state,
                ))
            })
            .collect()
    }
}
