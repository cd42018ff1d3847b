//! Nonnegative Orthant

use ndarray::prelude::*;
use ndarray::NdFloat;

use super::Projection;
use crate::error::Result;

/// The set $`\{x : x_i \geq 0\}`$.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonNegativeOrthant;

impl NonNegativeOrthant {
    /// Clip negative entries to zero. Infallible, unlike the trait method.
    pub fn clip<A: NdFloat>(x: ArrayView1<A>) -> Array1<A> {
        x.mapv(|v| if v > A::zero() { v } else { A::zero() })
    }
}

impl<A: NdFloat> Projection<A> for NonNegativeOrthant {
    fn project(&self, x: ArrayView1<A>) -> Result<Array1<A>> {
        Ok(Self::clip(x))
    }

    fn is_feasible(&self, x: ArrayView1<A>) -> bool {
        x.iter().all(|&v| v >= A::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clips_negatives() {
        let x = array![1., -2., 0., -0., 3.5];
        let y = NonNegativeOrthant.project(x.view()).unwrap();
        assert_eq!(y, array![1., 0., 0., 0., 3.5]);
        assert!(NonNegativeOrthant.is_feasible(y.view()));
        assert!(!NonNegativeOrthant.is_feasible(x.view()));
    }

    #[test]
    fn empty_is_feasible() {
        let x = Array1::<f64>::zeros(0);
        assert!(NonNegativeOrthant.is_feasible(x.view()));
        assert_eq!(NonNegativeOrthant.project(x.view()).unwrap().len(), 0);
    }
}
