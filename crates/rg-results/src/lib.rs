//! rg-results: state snapshots and result sinks.

pub mod sink;
pub mod types;

pub use sink::{JsonLinesSink, MemorySink, ResultSink, load_snapshots};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Eos(#[from] rg_eos::EosError),
}
