//! Numerical tolerances

use crate::numeric::cast;
use ndarray::NdFloat;

/// Absolute tolerances used by the feasibility tests and zero-norm guards.
///
/// For `f64` the defaults are `1e-10` for feasibility and `1e-16` for the
/// zero-norm guard, which is what downstream convergence checks assume.
/// Coarser types get a floor tied to their machine epsilon: `1024 ε` for
/// feasibility (about `1.2e-4` for `f32`) and `ε²` for the zero-norm guard.
/// Change them only if the solver's own stopping criteria are adjusted to
/// match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances<A> {
    /// Slack allowed when testing whether a point lies in a set.
    pub feasibility: A,
    /// Norms below this are treated as exactly zero.
    pub zero_norm: A,
}

impl<A: NdFloat> Default for Tolerances<A> {
    fn default() -> Self {
        // rounding in sums of a few hundred entries stays below 1024 ε
        let eps = A::epsilon();
        Tolerances {
            feasibility: cast::<A>(1e-10).max(eps * cast(1024.)),
            zero_norm: cast::<A>(1e-16).max(eps * eps),
        }
    }
}
