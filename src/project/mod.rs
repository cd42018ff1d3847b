//! Euclidean Projections onto Convex Sets
//!
//! A projection maps a point $`x`$ to the closest point of a convex set
//! $`C`$,
//! ```math
//! P_C(x) = \mathrm{arg}\!\min_{y \in C} \|x - y\|_2
//! ```
//! which is also the proximal operator of the indicator function of $`C`$.
//! Projected gradient methods are therefore the special case of proximal
//! gradient methods where the non-smooth term is a constraint, and every
//! [`Projection`] can be handed to a solver through
//! [`Projection::prox_step`].
//!
//! Every set here has a closed form or a finite algorithm; none of them
//! iterate to a tolerance.

use ndarray::prelude::*;
use ndarray::NdFloat;

use crate::error::Result;
use crate::tolerance::Tolerances;

mod orthant;
pub use orthant::*;

mod simplex;
pub use simplex::*;

mod ball;
pub use ball::*;

/// A convex set that points can be projected onto.
pub trait Projection<A: NdFloat> {
    /// The point of the set closest to `x` in Euclidean distance.
    fn project(&self, x: ArrayView1<A>) -> Result<Array1<A>>;

    /// Whether `x` lies in the set, up to the feasibility tolerance.
    fn is_feasible(&self, x: ArrayView1<A>) -> bool;

    /// Proximal operator of the set's indicator function.
    ///
    /// The indicator is invariant to scaling, so the step is ignored.
    fn prox_step(&self, x: ArrayView1<A>, _step: A) -> Result<Array1<A>> {
        self.project(x)
    }
}

/// Any of the supported convex sets.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionSet<A> {
    NonNegativeOrthant(NonNegativeOrthant),
    Simplex(Simplex<A>),
    L1Ball(L1Ball<A>),
    L2Ball(L2Ball<A>),
    LInfBall(LInfBall<A>),
}

impl<A: NdFloat> ProjectionSet<A> {
    pub fn non_negative_orthant() -> Self {
        ProjectionSet::NonNegativeOrthant(NonNegativeOrthant)
    }

    pub fn simplex(size: A) -> Result<Self> {
        Ok(ProjectionSet::Simplex(Simplex::new(size)?))
    }

    pub fn l1_ball(radius: A) -> Result<Self> {
        Ok(ProjectionSet::L1Ball(L1Ball::new(radius)?))
    }

    pub fn l2_ball(radius: A) -> Result<Self> {
        Ok(ProjectionSet::L2Ball(L2Ball::new(radius)?))
    }

    pub fn linf_ball(radius: A) -> Result<Self> {
        Ok(ProjectionSet::LInfBall(LInfBall::new(radius)?))
    }

    /// Replace the tolerances of the underlying set.
    ///
    /// The orthant test is exact and has nothing to replace.
    #[must_use]
    pub fn with_tolerances(self, tol: Tolerances<A>) -> Self {
        match self {
            ProjectionSet::NonNegativeOrthant(set) => ProjectionSet::NonNegativeOrthant(set),
            ProjectionSet::Simplex(set) => ProjectionSet::Simplex(set.with_tolerances(tol)),
            ProjectionSet::L1Ball(set) => ProjectionSet::L1Ball(set.with_tolerances(tol)),
            ProjectionSet::L2Ball(set) => ProjectionSet::L2Ball(set.with_tolerances(tol)),
            ProjectionSet::LInfBall(set) => ProjectionSet::LInfBall(set.with_tolerances(tol)),
        }
    }
}

impl<A: NdFloat> Projection<A> for ProjectionSet<A> {
    fn project(&self, x: ArrayView1<A>) -> Result<Array1<A>> {
        match self {
            ProjectionSet::NonNegativeOrthant(set) => set.project(x),
            ProjectionSet::Simplex(set) => set.project(x),
            ProjectionSet::L1Ball(set) => set.project(x),
            ProjectionSet::L2Ball(set) => set.project(x),
            ProjectionSet::LInfBall(set) => set.project(x),
        }
    }

    fn is_feasible(&self, x: ArrayView1<A>) -> bool {
        match self {
            ProjectionSet::NonNegativeOrthant(set) => set.is_feasible(x),
            ProjectionSet::Simplex(set) => set.is_feasible(x),
            ProjectionSet::L1Ball(set) => set.is_feasible(x),
            ProjectionSet::L2Ball(set) => set.is_feasible(x),
            ProjectionSet::LInfBall(set) => set.is_feasible(x),
        }
    }
}

impl<A> From<NonNegativeOrthant> for ProjectionSet<A> {
    fn from(set: NonNegativeOrthant) -> Self {
        ProjectionSet::NonNegativeOrthant(set)
    }
}

impl<A> From<Simplex<A>> for ProjectionSet<A> {
    fn from(set: Simplex<A>) -> Self {
        ProjectionSet::Simplex(set)
    }
}

impl<A> From<L1Ball<A>> for ProjectionSet<A> {
    fn from(set: L1Ball<A>) -> Self {
        ProjectionSet::L1Ball(set)
    }
}

impl<A> From<L2Ball<A>> for ProjectionSet<A> {
    fn from(set: L2Ball<A>) -> Self {
        ProjectionSet::L2Ball(set)
    }
}

impl<A> From<LInfBall<A>> for ProjectionSet<A> {
    fn from(set: LInfBall<A>) -> Self {
        ProjectionSet::LInfBall(set)
    }
}
