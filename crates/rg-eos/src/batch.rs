//! Evaluation of request sequences.
//!
//! A path is an ordered list of requests fed through one session, so each point
//! integrates from the previous one. Independent sessions (different gases or
//! candidate sets) share nothing and run in parallel.

use crate::dynamic::DynamicState;
use crate::error::{EosError, EosResult};
use crate::model::ModelKind;
use crate::selector::{CalculationSession, SessionStatus};
use crate::state::StateRequest;
use rayon::prelude::*;
use rg_core::units::{Pressure, Temperature, pa};

/// Successful evaluation of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOutcome {
    pub model: ModelKind,
    pub state: DynamicState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathPoint {
    pub request: StateRequest,
    pub outcome: EosResult<PointOutcome>,
}

/// Result of running a path through a session.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub points: Vec<PathPoint>,
    pub num_successful: usize,
    pub num_failed: usize,
    /// The session became fatal and the remaining requests were not evaluated.
    pub halted: bool,
}

impl PathResult {
    pub fn states(&self) -> impl Iterator<Item = &DynamicState> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.outcome.as_ref().ok().map(|o| &o.state))
    }

    pub fn errors(&self) -> impl Iterator<Item = &EosError> + '_ {
        self.points.iter().filter_map(|p| p.outcome.as_ref().err())
    }
}

/// Feed `requests` through `session` in order.
///
/// A failed point does not stop the path; a session that has no applicable
/// model does.
pub fn run_path(session: &mut CalculationSession, requests: &[StateRequest]) -> PathResult {
    let mut points = Vec::with_capacity(requests.len());
    let mut num_successful = 0;
    let mut num_failed = 0;
    let mut halted = false;

    for &request in requests {
        let outcome = session
            .set_state(request)
            .map(|st| *st)
            .map(|state| PointOutcome {
                model: session.active_kind(),
                state,
            });
        if outcome.is_ok() {
            num_successful += 1;
        } else {
            num_failed += 1;
        }
        points.push(PathPoint { request, outcome });
        if session.status() == SessionStatus::NoApplicableModel {
            halted = true;
            break;
        }
    }

    PathResult {
        points,
        num_successful,
        num_failed,
        halted,
    }
}

/// Run the same path through every session, one session per worker.
pub fn run_sessions_parallel(
    sessions: &mut [CalculationSession],
    requests: &[StateRequest],
) -> Vec<PathResult> {
    sessions
        .par_iter_mut()
        .map(|session| run_path(session, requests))
        .collect()
}

/// `n` (P, T) requests on an isotherm, linearly spaced from `p_from` to `p_to`.
pub fn isotherm(t: Temperature, p_from: Pressure, p_to: Pressure, n: usize) -> Vec<StateRequest> {
    match n {
        0 => Vec::new(),
        1 => vec![StateRequest::PT { p: p_from, t }],
        _ => {
            let step = (p_to.value - p_from.value) / (n - 1) as f64;
            (0..n)
                .map(|i| StateRequest::PT {
                    p: pa(p_from.value + step * i as f64),
                    t,
                })
                .collect()
        }
    }
}
