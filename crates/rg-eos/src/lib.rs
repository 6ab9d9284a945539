//! rg-eos: real-gas state calculation with cubic equations of state.
//!
//! Contains:
//! - cubic (real roots of cubic polynomials)
//! - constants, composition, mixing (gas descriptions and mixing rules)
//! - state, dynamic (state points and path-integrated quantities)
//! - model, models (the EOS families)
//! - selector (per-session model selection and swapping)
//! - batch (paths through a session, parallel sessions)

pub mod batch;
pub mod composition;
pub mod constants;
pub mod cubic;
pub mod dynamic;
pub mod error;
pub mod mixing;
pub mod model;
pub mod models;
pub mod selector;
pub mod state;

pub use batch::{PathPoint, PathResult, PointOutcome, run_path, run_sessions_parallel};
pub use composition::{GAS_MIX_PERCENT_EPS, GasDescription, MixtureComponent, MixtureComposition};
pub use constants::SubstanceConstants;
pub use cubic::CubicRoots;
pub use dynamic::{DynamicDelta, DynamicState};
pub use error::{EosError, EosResult, ErrorKind, InitReason, ModelReason};
pub use mixing::{BinaryInteractionTable, CriticalCoefficients, MixtureCombiner};
pub use model::{EosModel, EquationOfState, ModelKind, Priority};
pub use selector::{CalculationSession, ModelInstance, ModelSpec, ModelState, SessionStatus};
pub use state::{StatePoint, StateRequest, Volume};
