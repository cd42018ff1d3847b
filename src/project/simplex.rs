//! Projection onto the Simplex

use ndarray::prelude::*;
use ndarray::NdFloat;

use super::{NonNegativeOrthant, Projection};
use crate::error::{check_positive, Error, Result};
use crate::numeric::cast;
use crate::tolerance::Tolerances;

/// The scaled simplex $`\{x : \sum_i x_i = s,\ x_i \geq 0\}`$.
///
/// Algorithm
/// ---------
/// The projection is $`\max(y - \rho, 0)`$ for $`y = \max(x, 0)`$ and the
/// unique threshold $`\rho`$ with $`\sum_i \max(y_i - \rho, 0) = s`$.
/// The threshold is found by support reduction (Michelot, 1986):
/// ```math
/// \begin{aligned}
/// \rho_k &= \frac{1}{|V_k|}\Big(\sum_{v \in V_k} v - s\Big) \\
/// V_{k+1} &= \{ v \in V_k : v > \rho_k \}
/// \end{aligned}
/// ```
/// starting from $`V_0 = y`$ and stopping once the support stops shrinking.
/// The support shrinks every round until then, so at most $`n`$ rounds of
/// $`O(n)`$ work are needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Simplex<A> {
    size: A,
    tol: Tolerances<A>,
}

impl<A: NdFloat> Simplex<A> {
    pub fn new(size: A) -> Result<Self> {
        let size = check_positive("simplex size", size)?;
        log::debug!("simplex projection with size {}", size);
        Ok(Simplex {
            size,
            tol: Tolerances::default(),
        })
    }

    #[must_use]
    pub fn with_tolerances(mut self, tol: Tolerances<A>) -> Self {
        self.tol = tol;
        self
    }

    /// Required sum of the entries.
    pub fn size(&self) -> A {
        self.size
    }

    pub fn tolerances(&self) -> &Tolerances<A> {
        &self.tol
    }
}

impl<A: NdFloat> Projection<A> for Simplex<A> {
    fn project(&self, x: ArrayView1<A>) -> Result<Array1<A>> {
        if x.is_empty() {
            return Err(Error::shape_mismatch("a non-empty vector", "length 0"));
        }
        let y = NonNegativeOrthant::clip(x);
        let rho = threshold(&y, self.size);
        Ok(y.mapv_into(|v| (v - rho).max(A::zero())))
    }

    fn is_feasible(&self, x: ArrayView1<A>) -> bool {
        (x.sum() - self.size).abs() < self.tol.feasibility && x.iter().all(|&v| v >= A::zero())
    }
}

/// Support-reduction threshold for a nonnegative, non-empty `y`.
pub(crate) fn threshold<A: NdFloat>(y: &Array1<A>, size: A) -> A {
    let mut support = y.to_vec();
    let mut rounds = 0;
    loop {
        rounds += 1;
        let n = support.len();
        let total = support.iter().fold(A::zero(), |acc, &v| acc + v);
        let rho = (total - size) / cast::<A>(n as f64);
        support.retain(|&v| v > rho);
        // the largest entry always survives in exact arithmetic;
        // rounding can only empty the support when every entry is tied
        if support.len() == n || support.is_empty() {
            log::trace!("simplex threshold {} after {} rounds", rho, rounds);
            return rho;
        }
    }
}


#[cfg(all(rustc_nightly, test))]
mod bench {
    use super::*;
    use test::Bencher;

    #[bench]
    fn simplex_1000(b: &mut Bencher) {
        let x = Array1::linspace(-1., 1., 1000);
        let simplex = Simplex::new(1.).unwrap();
        b.iter(|| simplex.project(x.view()).unwrap());
    }
}
