//! rg-core: numeric foundation for the realgas workspace.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real, tolerances, accuracy constants, float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{RgError, RgResult};
pub use numeric::*;
pub use units::*;
