//! The `sparse-prox` crate provides the non-smooth building blocks of
//! proximal and projected gradient methods for sparse learning on `ndarray`s.
//!
//! It includes:
//! - Euclidean projections onto the nonnegative orthant, the simplex and
//!   L1, L2 and L-infinity balls
//! - Penalties, subgradients and proximal operators for the (weighted)
//!   Lasso and the non-overlapping group Lasso
//!
//! Every operation is a pure function of an immutable descriptor and an
//! input view, and returns a freshly allocated result. Descriptors are
//! validated when they are built, so a misconfigured solver fails before
//! its first iteration. The solver loop itself (gradients, step sizes,
//! stopping rules) is left to the caller; a prox or projection plugs in
//! wherever a method expects `gprox(x, step)`:
//!
//! ```
//! use ndarray::prelude::*;
//! use sparse_prox::regularise::{Lasso, Regulariser};
//!
//! let lasso = Lasso::new(1.0).unwrap();
//! let gprox = |x: ArrayView1<f64>, step: f64| lasso.prox_step(x, step).unwrap();
//! assert_eq!(gprox(array![3.0, -0.5].view(), 1.0), array![2.0, 0.0]);
//! ```
//!
//! All computations are in the caller's float type (`f32` or `f64`).
//! Default tolerances are `1e-10` for `f64` and are raised to a multiple of
//! machine epsilon for `f32`, see [`Tolerances`].

#![cfg_attr(all(rustc_nightly, test), feature(test))]
#[cfg(all(rustc_nightly, test))]
extern crate test;

pub mod error;
mod numeric;
pub mod project;
pub mod regularise;
pub mod tolerance;

pub use error::{Error, Result};
pub use project::{Projection, ProjectionSet};
pub use regularise::{Coefficient, Grouping, Regulariser, RegulariserSpec};
pub use tolerance::Tolerances;
