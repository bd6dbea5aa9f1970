//! Bounded bracket-and-bisect root finding.
//!
//! The same solver finds normal depth and critical depth; the residual is a closure so it can also
//! be used, and tested, on plain functions. Every loop has a cap, so a solve always terminates
//! with either a root or an error.

use num::Float;
use serde::Deserialize;
use tracing::debug;

use crate::error::ChannelError;

/// Limits and tolerances for [`find_root`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverOptions {
    /// Relative tolerance on the root: stop once the bracket is narrower than `rtol * |root|`.
    pub rtol: f64,
    /// Maximum number of bisection iterations.
    pub max_iter: usize,
    /// Maximum number of times the upper bound is doubled looking for a sign change.
    pub max_expansions: usize,
    /// Fixed lower end of the bracket.
    pub lower: f64,
    /// Upper end of the first bracket tried.
    pub initial_upper: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            rtol: 1e-10,
            max_iter: 200,
            max_expansions: 64,
            lower: 1e-6,
            initial_upper: 1.0,
        }
    }
}

impl SolverOptions {
    /// Checks every option is finite and usable.
    pub fn validate(&self) -> Result<(), ChannelError> {
        if !self.rtol.is_finite() || self.rtol <= 0.0 {
            return Err(ChannelError::InvalidParameter {
                name: "solver.rtol",
                value: self.rtol,
                expected: "finite and > 0",
            });
        }
        if self.max_iter == 0 {
            return Err(ChannelError::InvalidParameter {
                name: "solver.max_iter",
                value: 0.0,
                expected: ">= 1",
            });
        }
        if !self.lower.is_finite() || self.lower <= 0.0 {
            return Err(ChannelError::InvalidParameter {
                name: "solver.lower",
                value: self.lower,
                expected: "finite and > 0",
            });
        }
        if !self.initial_upper.is_finite() || self.initial_upper <= self.lower {
            return Err(ChannelError::InvalidParameter {
                name: "solver.initial_upper",
                value: self.initial_upper,
                expected: "finite and > solver.lower",
            });
        }
        Ok(())
    }
}

fn cast<T: Float>(v: f64) -> T {
    T::from(v).unwrap_or_else(T::nan)
}

fn same_sign<T: Float>(a: T, b: T) -> bool {
    (a > T::zero() && b > T::zero()) || (a < T::zero() && b < T::zero())
}

/// Finds an interval `[lo, hi]` over which `f` changes sign.
///
/// `lo` stays at `opts.lower` and `hi` starts at `opts.initial_upper`, doubling until the sign
/// differs from `f(lo)`.
pub fn bracket<T, F>(f: F, opts: &SolverOptions) -> Result<(T, T), ChannelError>
where
    T: Float,
    F: Fn(T) -> T,
{
    let lo: T = cast(opts.lower);
    let mut hi: T = cast(opts.initial_upper);
    let flo = f(lo);
    if !flo.is_finite() {
        return Err(ChannelError::NoBracket {
            expansions: 0,
            upper: opts.initial_upper,
        });
    }
    if flo == T::zero() {
        return Ok((lo, lo));
    }

    let two = T::one() + T::one();
    for expansions in 0..=opts.max_expansions {
        let fhi = f(hi);
        if !fhi.is_finite() {
            return Err(ChannelError::NoBracket {
                expansions,
                upper: hi.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !same_sign(flo, fhi) {
            return Ok((lo, hi));
        }
        if expansions < opts.max_expansions {
            hi = hi * two;
        }
    }

    Err(ChannelError::NoBracket {
        expansions: opts.max_expansions,
        upper: hi.to_f64().unwrap_or(f64::NAN),
    })
}

/// Bisects `[lo, hi]`, which must already bracket a sign change of `f`.
pub fn bisect<T, F>(f: F, lo: T, hi: T, opts: &SolverOptions) -> Result<T, ChannelError>
where
    T: Float,
    F: Fn(T) -> T,
{
    let rtol: T = cast(opts.rtol);
    let half: T = cast(0.5);
    let (mut lo, mut hi) = (lo, hi);
    let mut flo = f(lo);
    if flo == T::zero() {
        return Ok(lo);
    }

    for i in 1..=opts.max_iter {
        let mid = lo + (hi - lo) * half;
        let fmid = f(mid);
        if fmid == T::zero() || (hi - lo).abs() <= rtol * mid.abs() {
            debug!(iterations = i, root = mid.to_f64(), "bisection converged");
            return Ok(mid);
        }
        if same_sign(flo, fmid) {
            lo = mid;
            flo = fmid;
        } else {
            hi = mid;
        }
    }

    Err(ChannelError::NotConverged {
        iterations: opts.max_iter,
    })
}

/// Brackets and then bisects the positive root of `f`.
pub fn find_root<T, F>(f: F, opts: &SolverOptions) -> Result<T, ChannelError>
where
    T: Float,
    F: Fn(T) -> T,
{
    let (lo, hi) = bracket(&f, opts)?;
    if lo == hi {
        return Ok(lo);
    }
    bisect(&f, lo, hi, opts)
}
