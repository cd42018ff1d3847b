//! Sparsity-Inducing Regularisers
//!
//! For a convex, non-smooth penalty $`R`$ the composite methods in this
//! family only ever need three things:
//! - the penalty value $`R(x)`$,
//! - a subgradient $`g \in \partial R(x)`$,
//! - the proximal operator
//! ```math
//! \mathrm{prox}_{tR}(x) = \mathrm{arg}\!\min_z\ t R(z) + \frac12 \|z - x\|_2^2
//! ```
//!
//! [`Lasso`] promotes sparsity in individual entries, [`GroupLasso`] zeroes
//! whole groups of entries jointly. Both have closed-form proximal
//! operators, so nothing here iterates.

use ndarray::prelude::*;
use ndarray::NdFloat;

use crate::error::{check_len, Error, Result};
use crate::numeric::cast;

mod lasso;
pub use lasso::*;

mod grouping;
pub use grouping::*;

mod group_lasso;
pub use group_lasso::*;

/// A convex penalty with a known proximal operator.
pub trait Regulariser<A: NdFloat> {
    /// Evaluate the penalty $`R(x)`$.
    fn penalty(&self, x: ArrayView1<A>) -> Result<A>;

    /// A subgradient of the penalty at `x`.
    ///
    /// At non-smooth points the element of the subdifferential closest to
    /// zero is returned, so `subgradient(prox(x)) + prox(x) == x` holds
    /// whenever no entry or group is shrunk all the way to zero.
    fn subgradient(&self, x: ArrayView1<A>) -> Result<Array1<A>>;

    /// Proximal operator of the scaled penalty $`tR`$.
    ///
    /// This is what a proximal gradient method with step size `t` calls;
    /// `step` must be positive.
    fn prox_step(&self, x: ArrayView1<A>, step: A) -> Result<Array1<A>>;

    /// Proximal operator $`\mathrm{arg}\!\min_z R(z) + \frac12\|z - x\|_2^2`$.
    fn prox(&self, x: ArrayView1<A>) -> Result<Array1<A>> {
        self.prox_step(x, A::one())
    }

    /// The proximal loss $`R(x) + \frac12\|x - y\|_2^2`$, minimised over
    /// `x` by `prox(y)`.
    fn prox_loss(&self, x: ArrayView1<A>, y: ArrayView1<A>) -> Result<A> {
        check_len("point", x.len(), y.len())?;
        let diff = &x - &y;
        Ok(self.penalty(x)? + cast::<A>(0.5) * diff.dot(&diff))
    }
}

/// Regularisation strength, either shared or given per entry / per group.
#[derive(Debug, Clone, PartialEq)]
pub enum Coefficient<A> {
    Scalar(A),
    Weights(Array1<A>),
}

impl<A: NdFloat> Coefficient<A> {
    /// A shared coefficient must be positive; individual weights may be zero
    /// to leave an entry or group unpenalised.
    pub(crate) fn validated(self) -> Result<Self> {
        match &self {
            Coefficient::Scalar(r) => {
                crate::error::check_positive("regularisation coefficient", *r)?;
            }
            Coefficient::Weights(w) => {
                if let Some(bad) = w.iter().find(|v| !(v.is_finite() && **v >= A::zero())) {
                    return Err(Error::invalid_parameter(format!(
                        "regularisation weights must be finite and nonnegative, got {}",
                        bad
                    )));
                }
            }
        }
        Ok(self)
    }
}

/// Any of the supported regularisers.
#[derive(Debug, Clone, PartialEq)]
pub enum RegulariserSpec<A> {
    L1(Lasso<A>),
    GroupLasso(GroupLasso<A>),
}

impl<A: NdFloat> RegulariserSpec<A> {
    pub fn l1(coefficient: A) -> Result<Self> {
        Ok(RegulariserSpec::L1(Lasso::new(coefficient)?))
    }

    pub fn weighted_l1(weights: Array1<A>) -> Result<Self> {
        Ok(RegulariserSpec::L1(Lasso::weighted(weights)?))
    }

    pub fn group_lasso(coefficient: A, grouping: Grouping) -> Result<Self> {
        Ok(RegulariserSpec::GroupLasso(GroupLasso::new(
            coefficient,
            grouping,
        )?))
    }

    pub fn weighted_group_lasso(weights: Array1<A>, grouping: Grouping) -> Result<Self> {
        Ok(RegulariserSpec::GroupLasso(GroupLasso::weighted(
            weights, grouping,
        )?))
    }
}

impl<A: NdFloat> Regulariser<A> for RegulariserSpec<A> {
    fn penalty(&self, x: ArrayView1<A>) -> Result<A> {
        match self {
            RegulariserSpec::L1(reg) => reg.penalty(x),
            RegulariserSpec::GroupLasso(reg) => reg.penalty(x),
        }
    }

    fn subgradient(&self, x: ArrayView1<A>) -> Result<Array1<A>> {
        match self {
            RegulariserSpec::L1(reg) => reg.subgradient(x),
            RegulariserSpec::GroupLasso(reg) => reg.subgradient(x),
        }
    }

    fn prox_step(&self, x: ArrayView1<A>, step: A) -> Result<Array1<A>> {
        match self {
            RegulariserSpec::L1(reg) => reg.prox_step(x, step),
            RegulariserSpec::GroupLasso(reg) => reg.prox_step(x, step),
        }
    }
}

impl<A> From<Lasso<A>> for RegulariserSpec<A> {
    fn from(reg: Lasso<A>) -> Self {
        RegulariserSpec::L1(reg)
    }
}

impl<A> From<GroupLasso<A>> for RegulariserSpec<A> {
    fn from(reg: GroupLasso<A>) -> Self {
        RegulariserSpec::GroupLasso(reg)
    }
}
