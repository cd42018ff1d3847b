//! Scalar casts, vector norms and the three-way sign used throughout the crate

use ndarray::prelude::*;
use ndarray::{Data, NdFloat};
use num_traits::NumCast;

/// Convert an `f64` constant into the working float type.
///
/// Every `NdFloat` (`f32`, `f64`) can represent any finite `f64`,
/// possibly after rounding, so the conversion never fails.
#[inline]
pub(crate) fn cast<A: NdFloat>(v: f64) -> A {
    <A as NumCast>::from(v).unwrap()
}

/// Sign with `sign(0) = 0`.
///
/// `Float::signum` maps `+0.0` to `1`, which would leak mass into
/// coordinates that must stay zero.
#[inline]
pub(crate) fn sign<A: NdFloat>(v: A) -> A {
    if v > A::zero() {
        A::one()
    } else if v < A::zero() {
        -A::one()
    } else {
        A::zero()
    }
}

#[inline]
pub(crate) fn norm_l1<A, S, D>(x: &ArrayBase<S, D>) -> A
where
    A: NdFloat,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.fold(A::zero(), |acc, &v| acc + v.abs())
}

#[inline]
pub(crate) fn norm_l2<A, S, D>(x: &ArrayBase<S, D>) -> A
where
    A: NdFloat,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.fold(A::zero(), |acc, &v| acc + v * v).sqrt()
}

#[inline]
pub(crate) fn norm_max<A, S, D>(x: &ArrayBase<S, D>) -> A
where
    A: NdFloat,
    S: Data<Elem = A>,
    D: Dimension,
{
    x.fold(A::zero(), |acc, &v| acc.max(v.abs()))
}
