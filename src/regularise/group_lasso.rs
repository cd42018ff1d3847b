//! Group Lasso with Non-overlapping Groups

use std::collections::BTreeMap;

use ndarray::prelude::*;
use ndarray::{NdFloat, RemoveAxis};

use super::{Coefficient, GroupIter, Grouping, Regulariser};
use crate::error::{check_len, check_positive, Result};
use crate::numeric::norm_l2;
use crate::tolerance::Tolerances;

/// The group Lasso penalty $`R(x) = \sum_g r_g \|x_g\|_2`$.
///
/// With a shared coefficient $`r`$, group $`g`$ is penalised with
/// $`r_g = r\sqrt{|g|}`$; per-group weights are used as given. The proximal
/// operator is block soft-thresholding,
/// ```math
/// \mathrm{prox}_{tR}(x)_g = \max\Big(1 - \frac{t r_g}{\|x_g\|_2}, 0\Big) x_g
/// ```
/// which sets whole groups to zero at once.
///
/// The `*_rows` methods apply the same penalty to a coefficient matrix whose
/// rows are grouped, e.g. one row per feature shared across several tasks.
/// There $`\|x_g\|_2`$ is the Frobenius norm of the group's rows.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLasso<A> {
    coefficient: Coefficient<A>,
    grouping: Grouping,
    tol: Tolerances<A>,
}

impl<A: NdFloat> GroupLasso<A> {
    /// Group Lasso with a shared coefficient, scaled by each group's size.
    pub fn new(coefficient: A, grouping: Grouping) -> Result<Self> {
        Self::from_coefficient(Coefficient::Scalar(coefficient), grouping)
    }

    /// Group Lasso with one weight per group, in the grouping's order.
    ///
    /// That order is ascending label for [`Grouping::from_labels`], so
    /// labels `[3, 1, 3]` take the weight of group `1` first. Use
    /// [`GroupLasso::weighted_by_label`] to key weights by label instead.
    pub fn weighted(weights: Array1<A>, grouping: Grouping) -> Result<Self> {
        Self::from_coefficient(Coefficient::Weights(weights), grouping)
    }

    /// Group Lasso with weights looked up by group label.
    pub fn weighted_by_label(weights: &BTreeMap<usize, A>, grouping: Grouping) -> Result<Self> {
        let weights = grouping.weights_by_label(weights)?;
        Self::weighted(weights, grouping)
    }

    pub fn from_coefficient(coefficient: Coefficient<A>, grouping: Grouping) -> Result<Self> {
        let coefficient = coefficient.validated()?;
        if let (Coefficient::Weights(w), Some(len)) = (&coefficient, grouping.len()) {
            check_len("per-group weights", grouping.num_groups(len), w.len())?;
        }
        log::debug!(
            "group lasso with coefficient {:?} over {:?}",
            coefficient,
            grouping.labels()
        );
        Ok(GroupLasso {
            coefficient,
            grouping,
            tol: Tolerances::default(),
        })
    }

    #[must_use]
    pub fn with_tolerances(mut self, tol: Tolerances<A>) -> Self {
        self.tol = tol;
        self
    }

    pub fn coefficient(&self) -> &Coefficient<A> {
        &self.coefficient
    }

    pub fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    /// Groups of `x` along its first axis, with their effective coefficients.
    pub fn groups<'a, D>(&'a self, x: ArrayView<'a, A, D>) -> Result<GroupIter<'a, A, D>>
    where
        D: RemoveAxis,
    {
        self.grouping.iter(x, &self.coefficient)
    }

    pub fn penalty_rows(&self, x: ArrayView2<A>) -> Result<A> {
        self.penalty_along(x)
    }

    pub fn subgradient_rows(&self, x: ArrayView2<A>) -> Result<Array2<A>> {
        self.subgradient_along(x)
    }

    pub fn prox_rows(&self, x: ArrayView2<A>) -> Result<Array2<A>> {
        self.prox_along(x, A::one())
    }

    pub fn prox_step_rows(&self, x: ArrayView2<A>, step: A) -> Result<Array2<A>> {
        self.prox_along(x, step)
    }

    fn penalty_along<D: RemoveAxis>(&self, x: ArrayView<A, D>) -> Result<A> {
        let mut total = A::zero();
        for group in self.groups(x.view())? {
            total += group.coefficient * norm_l2(&group.values);
        }
        Ok(total)
    }

    fn subgradient_along<D: RemoveAxis>(&self, x: ArrayView<A, D>) -> Result<Array<A, D>> {
        let mut out = Array::zeros(x.raw_dim());
        for group in self.groups(x.view())? {
            let norm = norm_l2(&group.values);
            if norm < self.tol.zero_norm {
                continue;
            }
            let scale = group.coefficient / norm;
            group.scatter(&mut out, &group.values.mapv(|v| v * scale));
        }
        Ok(out)
    }

    fn prox_along<D: RemoveAxis>(&self, x: ArrayView<A, D>, step: A) -> Result<Array<A, D>> {
        let step = check_positive("proximal step", step)?;
        let mut out = Array::zeros(x.raw_dim());
        for group in self.groups(x.view())? {
            let norm = norm_l2(&group.values);
            let threshold = step * group.coefficient;
            if norm <= threshold {
                continue;
            }
            let scale = A::one() - threshold / norm;
            group.scatter(&mut out, &group.values.mapv(|v| v * scale));
        }
        Ok(out)
    }
}

impl<A: NdFloat> Regulariser<A> for GroupLasso<A> {
    fn penalty(&self, x: ArrayView1<A>) -> Result<A> {
        self.penalty_along(x)
    }

    fn subgradient(&self, x: ArrayView1<A>) -> Result<Array1<A>> {
        self.subgradient_along(x)
    }

    fn prox_step(&self, x: ArrayView1<A>, step: A) -> Result<Array1<A>> {
        self.prox_along(x, step)
    }
}
