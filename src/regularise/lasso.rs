//! (Weighted) L1 Regularisation

use ndarray::prelude::*;
use ndarray::NdFloat;

use super::{Coefficient, Regulariser};
use crate::error::{check_len, check_positive, Result};
use crate::numeric::{norm_l1, sign};

/// The (weighted) Lasso penalty $`R(x) = \|r \odot x\|_1`$.
///
/// The proximal operator is elementwise soft-thresholding,
/// ```math
/// \mathrm{prox}_{tR}(x)_i = \mathrm{sign}(x_i) \max(|x_i| - t r_i, 0)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lasso<A> {
    coefficient: Coefficient<A>,
}

impl<A: NdFloat> Lasso<A> {
    /// Lasso with the same coefficient on every entry.
    pub fn new(coefficient: A) -> Result<Self> {
        Self::from_coefficient(Coefficient::Scalar(coefficient))
    }

    /// Lasso with one weight per entry. Inputs must have the same length.
    pub fn weighted(weights: Array1<A>) -> Result<Self> {
        Self::from_coefficient(Coefficient::Weights(weights))
    }

    pub fn from_coefficient(coefficient: Coefficient<A>) -> Result<Self> {
        let coefficient = coefficient.validated()?;
        log::debug!("lasso with coefficient {:?}", coefficient);
        Ok(Lasso { coefficient })
    }

    pub fn coefficient(&self) -> &Coefficient<A> {
        &self.coefficient
    }

    fn check_weights(&self, x: &ArrayView1<A>) -> Result<()> {
        match &self.coefficient {
            Coefficient::Scalar(_) => Ok(()),
            Coefficient::Weights(w) => check_len("weight vector", w.len(), x.len()),
        }
    }
}

#[inline]
fn soft_threshold<A: NdFloat>(v: A, threshold: A) -> A {
    sign(v) * (v.abs() - threshold).max(A::zero())
}

impl<A: NdFloat> Regulariser<A> for Lasso<A> {
    fn penalty(&self, x: ArrayView1<A>) -> Result<A> {
        self.check_weights(&x)?;
        Ok(match &self.coefficient {
            Coefficient::Scalar(r) => *r * norm_l1(&x),
            Coefficient::Weights(w) => norm_l1(&(w * &x)),
        })
    }

    fn subgradient(&self, x: ArrayView1<A>) -> Result<Array1<A>> {
        self.check_weights(&x)?;
        Ok(match &self.coefficient {
            Coefficient::Scalar(r) => {
                let r = *r;
                x.mapv(|v| r * sign(v))
            }
            Coefficient::Weights(w) => x.mapv(sign) * w,
        })
    }

    fn prox_step(&self, x: ArrayView1<A>, step: A) -> Result<Array1<A>> {
        let step = check_positive("proximal step", step)?;
        self.check_weights(&x)?;
        Ok(match &self.coefficient {
            Coefficient::Scalar(r) => {
                let threshold = step * *r;
                x.mapv(|v| soft_threshold(v, threshold))
            }
            Coefficient::Weights(w) => {
                Array1::from_shape_fn(x.len(), |i| soft_threshold(x[i], step * w[i]))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_abs_diff_eq;

    #[test]
    fn soft_thresholds() {
        let lasso = Lasso::new(1.).unwrap();
        let y = lasso.prox(array![3., -0.5].view()).unwrap();
        assert_abs_diff_eq!(y, array![2., 0.]);

        let y = lasso.prox(array![-3., 1., 0.].view()).unwrap();
        assert_abs_diff_eq!(y, array![-2., 0., 0.]);
    }

    #[test]
    fn step_scales_threshold() {
        let lasso = Lasso::new(2.).unwrap();
        let y = lasso.prox_step(array![3., -0.5, -1.5].view(), 0.5).unwrap();
        assert_abs_diff_eq!(y, array![2., 0., -0.5]);
    }

    #[test]
    fn weighted() {
        let lasso = Lasso::weighted(array![1., 0., 2.]).unwrap();
        let x = array![-3., -3., 3.];
        assert_abs_diff_eq!(lasso.penalty(x.view()).unwrap(), 9.);
        assert_abs_diff_eq!(lasso.subgradient(x.view()).unwrap(), array![-1., 0., 2.]);
        assert_abs_diff_eq!(lasso.prox(x.view()).unwrap(), array![-2., -3., 1.]);
    }

    #[test]
    fn weight_length_must_match() {
        let lasso = Lasso::weighted(array![1., 2.]).unwrap();
        let x = array![1., 2., 3.];
        assert!(matches!(
            lasso.penalty(x.view()),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(lasso.subgradient(x.view()).is_err());
        assert!(lasso.prox(x.view()).is_err());
    }

    #[test]
    fn subgradient_is_zero_at_zero() {
        let lasso = Lasso::new(0.7).unwrap();
        let g = lasso.subgradient(array![0., -2., 5.].view()).unwrap();
        assert_abs_diff_eq!(g, array![0., -0.7, 0.7]);
    }

    #[test]
    fn penalty() {
        let lasso = Lasso::new(0.5).unwrap();
        assert_abs_diff_eq!(lasso.penalty(array![1., -2., 3.].view()).unwrap(), 3.);
    }
}
