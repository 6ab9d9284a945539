//! Real roots of cubic polynomials.
//!
//! Every EOS family in this crate reduces "find V at (P, T)" to a cubic in V,
//! so this solver sits under all of them. The discriminant of the depressed
//! cubic decides the path: one real root through Cardano's formula, or three
//! real roots through the trigonometric form. A double or triple root is
//! reported as three roots with duplicates, never as two.

use crate::error::{EosError, EosResult};
use rg_core::numeric::{DOUBLE_ACCURACY, FLOAT_ACCURACY, Real};
use std::f64::consts::PI;

const POLISH_STEPS: usize = 3;

/// Real roots of a cubic, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CubicRoots {
    One(Real),
    Three([Real; 3]),
}

impl CubicRoots {
    pub fn count(&self) -> usize {
        match self {
            CubicRoots::One(_) => 1,
            CubicRoots::Three(_) => 3,
        }
    }

    pub fn as_slice(&self) -> &[Real] {
        match self {
            CubicRoots::One(x) => std::slice::from_ref(x),
            CubicRoots::Three(xs) => xs,
        }
    }

    pub fn largest(&self) -> Real {
        match self {
            CubicRoots::One(x) => *x,
            CubicRoots::Three(xs) => xs[2],
        }
    }

    pub fn smallest(&self) -> Real {
        match self {
            CubicRoots::One(x) => *x,
            CubicRoots::Three(xs) => xs[0],
        }
    }

    /// Roots with repeated values collapsed.
    ///
    /// Repeated roots are ill-conditioned (a perturbation of order ε moves them
    /// by order √ε), so duplicates are matched with `FLOAT_ACCURACY` relative
    /// tolerance.
    pub fn distinct(&self) -> Vec<Real> {
        let mut out: Vec<Real> = Vec::with_capacity(3);
        for &x in self.as_slice() {
            let dup = out
                .iter()
                .any(|&y| (x - y).abs() <= FLOAT_ACCURACY * x.abs().max(y.abs()).max(1.0));
            if !dup {
                out.push(x);
            }
        }
        out
    }
}

/// Solve `c[0]·x³ + c[1]·x² + c[2]·x + c[3] = 0`.
pub fn solve(coefs: [Real; 4]) -> EosResult<CubicRoots> {
    if let Some(bad) = coefs.iter().find(|c| !c.is_finite()) {
        return Err(EosError::degenerate(format!(
            "non-finite cubic coefficient {bad}"
        )));
    }
    if coefs.iter().all(|c| *c == 0.0) {
        return Err(EosError::degenerate("all cubic coefficients are zero"));
    }
    let lead = coefs[0];
    if lead == 0.0 {
        return Err(EosError::degenerate("leading cubic coefficient is zero"));
    }
    solve_monic(coefs[1] / lead, coefs[2] / lead, coefs[3] / lead)
}

/// Solve the monic cubic `x³ + a·x² + b·x + c = 0`.
pub fn solve_monic(a: Real, b: Real, c: Real) -> EosResult<CubicRoots> {
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return Err(EosError::degenerate(format!(
            "non-finite monic cubic coefficients ({a}, {b}, {c})"
        )));
    }

    // x = t - a/3 gives t³ + p·t + q = 0
    let shift = a / 3.0;
    let p = b - a * a / 3.0;
    let q = 2.0 * a * a * a / 27.0 - a * b / 3.0 + c;

    let half_q = q / 2.0;
    let third_p = p / 3.0;
    let disc = half_q * half_q + third_p * third_p * third_p;
    let scale = (half_q * half_q).max(third_p.abs().powi(3));

    if disc > DOUBLE_ACCURACY * scale {
        // Take the cube root of the larger-magnitude term to avoid cancellation.
        let sq = disc.sqrt();
        let u = if half_q >= 0.0 {
            (-half_q - sq).cbrt()
        } else {
            (-half_q + sq).cbrt()
        };
        let v = if u != 0.0 { -third_p / u } else { 0.0 };
        let x = polish(u + v - shift, a, b, c);
        return Ok(CubicRoots::One(x));
    }

    if third_p >= 0.0 {
        let x = -shift;
        return Ok(CubicRoots::Three([x, x, x]));
    }

    let r = (-third_p).sqrt();
    let cos_arg = (-half_q / (r * r * r)).clamp(-1.0, 1.0);
    let theta = cos_arg.acos();
    let mut roots = [0.0; 3];
    for (k, root) in roots.iter_mut().enumerate() {
        let t = 2.0 * r * ((theta - 2.0 * PI * k as Real) / 3.0).cos();
        *root = polish(t - shift, a, b, c);
    }
    roots.sort_by(|x, y| x.total_cmp(y));
    Ok(CubicRoots::Three(roots))
}

/// Evaluate the monic cubic at `x`.
#[inline]
pub fn eval_monic(x: Real, a: Real, b: Real, c: Real) -> Real {
    ((x + a) * x + b) * x + c
}

/// A few Newton steps; a step is kept only if it shrinks the residual.
fn polish(mut x: Real, a: Real, b: Real, c: Real) -> Real {
    let mut fx = eval_monic(x, a, b, c);
    for _ in 0..POLISH_STEPS {
        if fx == 0.0 {
            break;
        }
        let dfx = (3.0 * x + 2.0 * a) * x + b;
        if dfx == 0.0 || !dfx.is_finite() {
            break;
        }
        let candidate = x - fx / dfx;
        let fc = eval_monic(candidate, a, b, c);
        if fc.abs() < fx.abs() {
            x = candidate;
            fx = fc;
        } else {
            break;
        }
    }
    x
}
