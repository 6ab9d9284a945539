use thiserror::Error;

pub type RgResult<T> = Result<T, RgError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RgError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Non-positive value for {what}: {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
