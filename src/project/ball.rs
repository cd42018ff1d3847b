//! Projections onto Norm Balls
//!
//! Balls $`\{x : \|x\|_p \leq a\}`$ for $`p = 1, 2, \infty`$. Points that
//! are already inside a ball, up to the feasibility tolerance, are returned
//! unchanged so that `project` and `is_feasible` always agree.

use ndarray::prelude::*;
use ndarray::NdFloat;

use super::{Projection, Simplex};
use crate::error::{check_positive, Result};
use crate::numeric::{norm_l1, norm_l2, norm_max, sign};
use crate::tolerance::Tolerances;

/// The L1 ball $`\{x : \|x\|_1 \leq a\}`$.
///
/// Points outside are mapped to $`\mathrm{sign}(x) \odot P_\Delta(|x|)`$,
/// where $`P_\Delta`$ projects onto the simplex of size $`a`$.
#[derive(Debug, Clone, PartialEq)]
pub struct L1Ball<A> {
    simplex: Simplex<A>,
}

impl<A: NdFloat> L1Ball<A> {
    pub fn new(radius: A) -> Result<Self> {
        let radius = check_positive("L1 ball radius", radius)?;
        Ok(L1Ball {
            simplex: Simplex::new(radius)?,
        })
    }

    #[must_use]
    pub fn with_tolerances(self, tol: Tolerances<A>) -> Self {
        L1Ball {
            simplex: self.simplex.with_tolerances(tol),
        }
    }

    pub fn radius(&self) -> A {
        self.simplex.size()
    }
}

impl<A: NdFloat> Projection<A> for L1Ball<A> {
    fn project(&self, x: ArrayView1<A>) -> Result<Array1<A>> {
        // the simplex projection lands on the sphere, so interior points
        // must be caught before it
        if self.is_feasible(x) {
            return Ok(x.to_owned());
        }
        let magnitude = self.simplex.project(x.mapv(A::abs).view())?;
        Ok(x.mapv(sign) * &magnitude)
    }

    fn is_feasible(&self, x: ArrayView1<A>) -> bool {
        norm_l1(&x) <= self.radius() + self.simplex.tolerances().feasibility
    }
}

/// The L2 ball $`\{x : \|x\|_2 \leq a\}`$.
#[derive(Debug, Clone, PartialEq)]
pub struct L2Ball<A> {
    radius: A,
    tol: Tolerances<A>,
}

impl<A: NdFloat> L2Ball<A> {
    pub fn new(radius: A) -> Result<Self> {
        let radius = check_positive("L2 ball radius", radius)?;
        log::debug!("L2 ball projection with radius {}", radius);
        Ok(L2Ball {
            radius,
            tol: Tolerances::default(),
        })
    }

    #[must_use]
    pub fn with_tolerances(mut self, tol: Tolerances<A>) -> Self {
        self.tol = tol;
        self
    }

    pub fn radius(&self) -> A {
        self.radius
    }
}

impl<A: NdFloat> Projection<A> for L2Ball<A> {
    fn project(&self, x: ArrayView1<A>) -> Result<Array1<A>> {
        let norm = norm_l2(&x);
        // a zero vector always takes this branch, so the scaling below
        // never divides by zero
        if norm <= self.radius + self.tol.feasibility {
            return Ok(x.to_owned());
        }
        let scale = self.radius / norm;
        Ok(x.mapv(|v| v * scale))
    }

    fn is_feasible(&self, x: ArrayView1<A>) -> bool {
        norm_l2(&x) <= self.radius + self.tol.feasibility
    }
}

/// The L-infinity ball $`\{x : \max_i |x_i| \leq a\}`$, i.e. a box.
#[derive(Debug, Clone, PartialEq)]
pub struct LInfBall<A> {
    radius: A,
    tol: Tolerances<A>,
}

impl<A: NdFloat> LInfBall<A> {
    pub fn new(radius: A) -> Result<Self> {
        let radius = check_positive("L-infinity ball radius", radius)?;
        log::debug!("L-infinity ball projection with radius {}", radius);
        Ok(LInfBall {
            radius,
            tol: Tolerances::default(),
        })
    }

    #[must_use]
    pub fn with_tolerances(mut self, tol: Tolerances<A>) -> Self {
        self.tol = tol;
        self
    }

    pub fn radius(&self) -> A {
        self.radius
    }
}

impl<A: NdFloat> Projection<A> for LInfBall<A> {
    fn project(&self, x: ArrayView1<A>) -> Result<Array1<A>> {
        let radius = self.radius;
        Ok(x.mapv(|v| sign(v) * v.abs().min(radius)))
    }

    fn is_feasible(&self, x: ArrayView1<A>) -> bool {
        norm_max(&x) <= self.radius + self.tol.feasibility
    }
}
