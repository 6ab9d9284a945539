//! Equation-of-state errors.
//!
//! Errors are two-level: a top-level kind that decides how the caller reacts
//! (fatal for a model, recoverable by the caller, fatal for a session) and a
//! reason carrying the detail.

use rg_core::RgError;
use std::fmt;
use thiserror::Error;

/// Result type for EOS operations.
pub type EosResult<T> = Result<T, EosError>;

/// Top-level error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Init,
    Model,
    NoApplicableModel,
    DegenerateInput,
}

/// Why a model (or composition) could not be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitReason {
    /// Pc, Tc or R is non-positive or non-finite.
    InvalidConstants,
    /// A constant the model family needs (acentric factor, molar mass) is absent.
    MissingConstant,
    EmptyMixture,
    InvalidFraction,
    FractionSum,
    DuplicateComponent,
    /// Component not covered by the model's reference tables.
    UnsupportedComponent,
    /// Mole fraction outside the range a standard allows.
    CompositionOutOfRange,
    NoCandidates,
}

/// Why a solve or an integration failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelReason {
    NoPositiveRoot,
    NonFiniteResult,
    /// Requested volume is at or below the co-volume.
    VolumeBelowCovolume,
    NotInitialized,
}

impl fmt::Display for InitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InitReason::InvalidConstants => "invalid constants",
            InitReason::MissingConstant => "missing constant",
            InitReason::EmptyMixture => "empty mixture",
            InitReason::InvalidFraction => "invalid mole fraction",
            InitReason::FractionSum => "mole fractions do not sum to one",
            InitReason::DuplicateComponent => "duplicate component",
            InitReason::UnsupportedComponent => "unsupported component",
            InitReason::CompositionOutOfRange => "composition out of range",
            InitReason::NoCandidates => "no candidate models",
        };
        f.write_str(s)
    }
}

impl fmt::Display for ModelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModelReason::NoPositiveRoot => "no positive root",
            ModelReason::NonFiniteResult => "non-finite result",
            ModelReason::VolumeBelowCovolume => "volume below co-volume",
            ModelReason::NotInitialized => "model not initialized",
        };
        f.write_str(s)
    }
}

/// Errors raised by the EOS engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EosError {
    /// Fatal to a model instance; the session excludes the candidate.
    #[error("Initialization error ({reason}): {message}")]
    Init { reason: InitReason, message: String },

    /// Returned to the caller; the state is unchanged.
    #[error("Model error ({reason}): {message}")]
    Model { reason: ModelReason, message: String },

    /// Fatal to the session until it is reset.
    #[error("No applicable model: {message}")]
    NoApplicableModel { message: String },

    #[error("Degenerate input: {message}")]
    DegenerateInput { message: String },
}

impl EosError {
    pub fn init(reason: InitReason, message: impl Into<String>) -> Self {
        EosError::Init {
            reason,
            message: message.into(),
        }
    }

    pub fn model(reason: ModelReason, message: impl Into<String>) -> Self {
        EosError::Model {
            reason,
            message: message.into(),
        }
    }

    pub fn degenerate(message: impl Into<String>) -> Self {
        EosError::DegenerateInput {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EosError::Init { .. } => ErrorKind::Init,
            EosError::Model { .. } => ErrorKind::Model,
            EosError::NoApplicableModel { .. } => ErrorKind::NoApplicableModel,
            EosError::DegenerateInput { .. } => ErrorKind::DegenerateInput,
        }
    }
}

impl From<RgError> for EosError {
    fn from(err: RgError) -> Self {
        EosError::DegenerateInput {
            message: err.to_string(),
        }
    }
}
