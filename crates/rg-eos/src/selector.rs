//! Model selection for one calculation session.
//!
//! A session owns every candidate model, ordered by priority (higher first,
//! ties keep insertion order), and an index of the active one. Requests go to
//! the active model; when the resulting state falls outside its validity
//! region the same request is replayed against the other candidates, starting
//! from a copy of the active model's last valid state, and the first valid
//! result wins.

use crate::composition::GasDescription;
use crate::constants::SubstanceConstants;
use crate::dynamic::DynamicState;
use crate::error::{EosError, EosResult, InitReason, ModelReason};
use crate::model::{EosModel, EquationOfState, ModelKind, Priority};
use crate::state::{StatePoint, StateRequest, Volume};
use rg_core::units::{Pressure, Temperature};
use std::cmp::Reverse;
use tracing::{debug, error, info, warn};

/// A candidate model and its priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    pub kind: ModelKind,
    pub priority: Priority,
}

impl ModelSpec {
    pub fn new(kind: ModelKind, priority: Priority) -> Self {
        Self { kind, priority }
    }

    /// Candidate with the family's default priority.
    pub fn with_default_priority(kind: ModelKind) -> Self {
        Self::new(kind, kind.default_priority())
    }
}

/// Lifecycle of one model instance.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelState {
    /// Could not be anchored at the initial point.
    Uninitialized,
    Valid(DynamicState),
    /// `last` is the most recent committed state; `rejected` the point that
    /// failed validation.
    Invalid {
        last: DynamicState,
        rejected: StatePoint,
    },
}

#[derive(Debug, Clone)]
pub struct ModelInstance {
    model: EosModel,
    priority: Priority,
    state: ModelState,
}

impl ModelInstance {
    fn new(model: EosModel, priority: Priority) -> Self {
        Self {
            model,
            priority,
            state: ModelState::Uninitialized,
        }
    }

    pub fn kind(&self) -> ModelKind {
        self.model.kind()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn model(&self) -> &EosModel {
        &self.model
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    /// Last committed dynamic state, if any.
    pub fn current(&self) -> Option<&DynamicState> {
        match &self.state {
            ModelState::Uninitialized => None,
            ModelState::Valid(st) => Some(st),
            ModelState::Invalid { last, .. } => Some(last),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.state, ModelState::Valid(_))
    }

    /// Solve this model's volume at the seed's (P, T) and integrate the seed to it.
    fn initialize(&mut self, seed: &DynamicState) {
        let request = StateRequest::PT {
            p: seed.point().pressure(),
            t: seed.point().temperature(),
        };
        self.state = match self.model.transition(seed, request) {
            Ok(anchored) => {
                let point = *anchored.point();
                if self.model.is_valid(&point) {
                    ModelState::Valid(anchored)
                } else {
                    ModelState::Invalid {
                        last: anchored,
                        rejected: point,
                    }
                }
            }
            Err(err) => {
                warn!(model = %self.kind(), %err, "model could not be anchored at the initial point");
                ModelState::Uninitialized
            }
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Ready,
    /// No candidate was valid for the last request; every call fails until reset.
    NoApplicableModel,
}

/// One gas, its candidate models and the active selection.
#[derive(Debug, Clone)]
pub struct CalculationSession {
    gas: GasDescription,
    reduced: SubstanceConstants,
    seed: DynamicState,
    models: Vec<ModelInstance>,
    active: usize,
    status: SessionStatus,
    last_request: Option<StateRequest>,
    excluded: Vec<(ModelKind, EosError)>,
}

impl CalculationSession {
    /// Build every candidate for `gas` and anchor them on `seed`.
    ///
    /// A candidate whose coefficients cannot be derived is excluded, not fatal.
    /// Fails with `InitError` when no candidate can be built and with
    /// `NoApplicableModel` when none is valid at the seed's point.
    pub fn new(
        gas: GasDescription,
        seed: DynamicState,
        candidates: &[ModelSpec],
    ) -> EosResult<Self> {
        let reduced = gas.reduced_constants()?;
        let mut models = Vec::with_capacity(candidates.len());
        let mut excluded = Vec::new();
        for spec in candidates {
            match EosModel::derive(spec.kind, &gas) {
                Ok(model) => models.push(ModelInstance::new(model, spec.priority)),
                Err(err) => {
                    warn!(model = %spec.kind, %err, "excluding candidate model");
                    excluded.push((spec.kind, err));
                }
            }
        }
        if models.is_empty() {
            return Err(EosError::init(
                InitReason::NoCandidates,
                format!(
                    "no model could be built for '{}' ({} excluded)",
                    gas.name(),
                    excluded.len()
                ),
            ));
        }
        models.sort_by_key(|m| Reverse(m.priority));

        let mut session = Self {
            gas,
            reduced,
            seed,
            models,
            active: 0,
            status: SessionStatus::Ready,
            last_request: None,
            excluded,
        };
        session.anchor_all()?;
        Ok(session)
    }

    fn anchor_all(&mut self) -> EosResult<()> {
        for m in &mut self.models {
            m.initialize(&self.seed);
        }
        match self.models.iter().position(ModelInstance::is_valid) {
            Some(idx) => {
                self.active = idx;
                self.status = SessionStatus::Ready;
                debug!(model = %self.models[idx].kind(), gas = %self.gas.name(), "session ready");
                Ok(())
            }
            None => {
                self.status = SessionStatus::NoApplicableModel;
                Err(EosError::NoApplicableModel {
                    message: format!(
                        "no candidate is valid at the initial point of '{}'",
                        self.gas.name()
                    ),
                })
            }
        }
    }

    /// Re-anchor every candidate on the initial seed and clear a fatal status.
    pub fn reset(&mut self) -> EosResult<()> {
        self.last_request = None;
        self.anchor_all()
    }

    pub fn set_state_pt(&mut self, p: Pressure, t: Temperature) -> EosResult<&DynamicState> {
        self.set_state(StateRequest::PT { p, t })
    }

    pub fn set_state_vt(&mut self, v: Volume, t: Temperature) -> EosResult<&DynamicState> {
        self.set_state(StateRequest::VT { v, t })
    }

    /// Move the session to a new state.
    ///
    /// A `ModelError` from the active model is returned unchanged and never
    /// triggers a swap.
    pub fn set_state(&mut self, request: StateRequest) -> EosResult<&DynamicState> {
        if self.status == SessionStatus::NoApplicableModel {
            return Err(EosError::NoApplicableModel {
                message: "session has no applicable model; reset required".to_string(),
            });
        }
        request.validate()?;
        self.last_request = Some(request);

        let idx = self.active;
        let current = *self.models[idx].current().ok_or_else(|| {
            EosError::model(ModelReason::NotInitialized, "active model has no state")
        })?;
        let proposed = self.models[idx].model.transition(&current, request)?;
        if self.models[idx].model.is_valid(proposed.point()) {
            self.models[idx].state = ModelState::Valid(proposed);
            return self.state();
        }

        let from = self.models[idx].kind();
        debug!(model = %from, %request, "active model invalid, trying candidates");
        self.models[idx].state = ModelState::Invalid {
            last: current,
            rejected: *proposed.point(),
        };

        for i in (0..self.models.len()).filter(|&i| i != idx) {
            let candidate = &mut self.models[i];
            match candidate.model.transition(&current, request) {
                Ok(next) if candidate.model.is_valid(next.point()) => {
                    candidate.state = ModelState::Valid(next);
                    self.active = i;
                    info!(from = %from, to = %self.models[i].kind(), %request, "switched model");
                    return self.state();
                }
                Ok(next) => {
                    debug!(model = %candidate.kind(), point = ?next.point(), "candidate invalid");
                }
                Err(err) => {
                    debug!(model = %candidate.kind(), %err, "candidate failed");
                }
            }
        }

        self.status = SessionStatus::NoApplicableModel;
        error!(gas = %self.gas.name(), %request, "no applicable model");
        Err(EosError::NoApplicableModel {
            message: format!("no candidate model is valid at {request}"),
        })
    }

    /// Committed state of the active model.
    pub fn state(&self) -> EosResult<&DynamicState> {
        self.models[self.active].current().ok_or_else(|| {
            EosError::model(ModelReason::NotInitialized, "active model has no state")
        })
    }

    pub fn active_kind(&self) -> ModelKind {
        self.models[self.active].kind()
    }

    pub fn active_model(&self) -> &ModelInstance {
        &self.models[self.active]
    }

    /// Candidates in priority order.
    pub fn models(&self) -> &[ModelInstance] {
        &self.models
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn last_request(&self) -> Option<&StateRequest> {
        self.last_request.as_ref()
    }

    /// Candidates dropped at construction, with the reason.
    pub fn excluded(&self) -> &[(ModelKind, EosError)] {
        &self.excluded
    }

    pub fn gas(&self) -> &GasDescription {
        &self.gas
    }

    /// Pure or pseudo-critical constants of the gas.
    pub fn reduced_constants(&self) -> &SubstanceConstants {
        &self.reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::test_support::{methane, pure_methane};
    use rg_core::units::{k, pa};

    fn seed(p: f64, t: f64) -> DynamicState {
        let point = StatePoint::new(pa(p), 8.314 * t / p, k(t)).unwrap();
        DynamicState::seed(point, 27.0 * t, 27.0, 35.3).unwrap()
    }

    fn rk_then_pr() -> CalculationSession {
        CalculationSession::new(
            pure_methane(),
            seed(1e5, 300.0),
            &[
                ModelSpec::new(ModelKind::PengRobinson, 10),
                ModelSpec::new(ModelKind::RedlichKwong, 90),
            ],
        )
        .unwrap()
    }

    #[test]
    fn highest_priority_valid_model_is_active() {
        let s = rk_then_pr();
        assert_eq!(s.active_kind(), ModelKind::RedlichKwong);
        assert_eq!(s.models()[1].kind(), ModelKind::PengRobinson);
        assert_eq!(s.status(), SessionStatus::Ready);
        // anchored on the model's own volume
        let rk = s.models()[0].model();
        let v = rk.solve_volume(pa(1e5), k(300.0)).unwrap();
        assert_eq!(s.state().unwrap().point().volume(), v);
    }

    #[test]
    fn swaps_when_active_becomes_invalid() {
        let mut s = rk_then_pr();
        let st = *s.set_state_pt(pa(5e6), k(250.0)).unwrap();
        assert_eq!(s.active_kind(), ModelKind::PengRobinson);

        let pr = EosModel::derive(ModelKind::PengRobinson, &pure_methane()).unwrap();
        let v = pr.solve_volume(pa(5e6), k(250.0)).unwrap();
        assert_eq!(st.point().volume(), v);
        assert!(matches!(s.models()[0].state(), ModelState::Invalid { .. }));
        // the rejected model keeps its last valid state
        assert_eq!(s.models()[0].current().unwrap().point().p_pa(), 1e5);
    }

    #[test]
    fn model_error_does_not_swap() {
        let mut s = rk_then_pr();
        let before = *s.state().unwrap();
        // volume inside the co-volume
        let err = s.set_state_vt(1e-6, k(300.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Model);
        assert_eq!(s.active_kind(), ModelKind::RedlichKwong);
        assert_eq!(*s.state().unwrap(), before);
    }

    #[test]
    fn no_applicable_model_is_sticky_until_reset() {
        let mut s = CalculationSession::new(
            pure_methane(),
            seed(1e5, 300.0),
            &[ModelSpec::with_default_priority(ModelKind::RedlichKwong)],
        )
        .unwrap();
        let err = s.set_state_pt(pa(5e6), k(250.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoApplicableModel);
        assert_eq!(s.status(), SessionStatus::NoApplicableModel);

        let err = s.set_state_pt(pa(1e5), k(300.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoApplicableModel);

        s.reset().unwrap();
        assert_eq!(s.status(), SessionStatus::Ready);
        assert!(s.set_state_pt(pa(2e5), k(300.0)).is_ok());
    }

    #[test]
    fn init_error_excludes_candidate_only() {
        let no_omega = SubstanceConstants::new("methane", pa(4.6e6), k(190.6), 8.314).unwrap();
        let s = CalculationSession::new(
            GasDescription::Pure(no_omega),
            seed(1e5, 300.0),
            &[
                ModelSpec::with_default_priority(ModelKind::PengRobinson),
                ModelSpec::with_default_priority(ModelKind::RedlichKwong),
            ],
        )
        .unwrap();
        assert_eq!(s.models().len(), 1);
        assert_eq!(s.excluded().len(), 1);
        assert_eq!(s.excluded()[0].0, ModelKind::PengRobinson);
        assert_eq!(s.excluded()[0].1.kind(), ErrorKind::Init);
    }

    #[test]
    fn no_constructible_candidate_is_init_error() {
        let no_omega = SubstanceConstants::new("methane", pa(4.6e6), k(190.6), 8.314).unwrap();
        let err = CalculationSession::new(
            GasDescription::Pure(no_omega),
            seed(1e5, 300.0),
            &[ModelSpec::with_default_priority(ModelKind::PengRobinson)],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Init);
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        let s = CalculationSession::new(
            GasDescription::Pure(methane()),
            seed(1e5, 300.0),
            &[
                ModelSpec::new(ModelKind::RedlichKwongSoave, 50),
                ModelSpec::new(ModelKind::RedlichKwong, 50),
            ],
        )
        .unwrap();
        assert_eq!(s.models()[0].kind(), ModelKind::RedlichKwongSoave);
        assert_eq!(s.active_kind(), ModelKind::RedlichKwongSoave);
    }

    #[test]
    fn degenerate_request_leaves_state() {
        let mut s = rk_then_pr();
        let err = s.set_state_pt(pa(-1.0), k(300.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
        assert_eq!(s.status(), SessionStatus::Ready);
    }
}
