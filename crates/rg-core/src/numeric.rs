use crate::RgError;

/// Floating point type used throughout the workspace
pub type Real = f64;

/// Accuracy for comparisons of measured quantities (relative).
pub const FLOAT_ACCURACY: Real = 1e-5;

/// Accuracy for comparisons of algebraic results such as polynomial residuals.
pub const DOUBLE_ACCURACY: Real = 1e-9;

#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    /// Loose tolerance for physical state comparisons.
    pub const fn physical() -> Self {
        Self {
            abs: DOUBLE_ACCURACY,
            rel: FLOAT_ACCURACY,
        }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: DOUBLE_ACCURACY,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// True if `v` is finite and strictly greater than zero.
#[inline]
pub fn is_above0(v: Real) -> bool {
    v.is_finite() && v > 0.0
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RgError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RgError::NonFinite { what, value: v })
    }
}

pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, RgError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(RgError::NonPositive { what, value: v })
    }
}
