// Copyright 2025 Irreducible Inc.

//! Lane-parallel transcendental functions.
//!
//! `exp` reduces `x = n·ln2 + r` with `|r| <= ln2 / 2` and evaluates a degree-13 Taylor
//! polynomial in `r`, which is accurate to a few ulp in both `f32` and `f64`.

use super::lanes::{Lanes, SimdScalar};
use crate::Scalar;

type LanesOf<T> = <T as SimdScalar>::Lanes;

/// `1 / k!` for `k = 0..=13`.
const INV_FACTORIALS: [f64; 14] = [
	1.0,
	1.0,
	1.0 / 2.0,
	1.0 / 6.0,
	1.0 / 24.0,
	1.0 / 120.0,
	1.0 / 720.0,
	1.0 / 5040.0,
	1.0 / 40320.0,
	1.0 / 362880.0,
	1.0 / 3628800.0,
	1.0 / 39916800.0,
	1.0 / 479001600.0,
	1.0 / 6227020800.0,
];

/// Below this magnitude `tanh` switches to the `expm1` form, which has no cancellation.
///
/// `2 · TANH_SMALL` must stay within the `exp` polynomial's reduced range.
const TANH_SMALL: f64 = 0.17;

#[inline(always)]
fn splat<T: Scalar>(val: f64) -> LanesOf<T> {
	LanesOf::<T>::splat(T::from_f64(val))
}

/// `Σ_{k=first..=13} r^{k-first} / k!`
#[inline(always)]
fn taylor_tail<T: Scalar>(r: LanesOf<T>, first: usize) -> LanesOf<T> {
	let mut acc = splat::<T>(INV_FACTORIALS[INV_FACTORIALS.len() - 1]);
	for &coeff in INV_FACTORIALS[first..INV_FACTORIALS.len() - 1].iter().rev() {
		acc = acc * r + splat::<T>(coeff);
	}
	acc
}

#[inline(always)]
pub fn exp<T: Scalar>(x: LanesOf<T>) -> LanesOf<T> {
	let x = x
		.max(LanesOf::<T>::splat(T::EXP_MIN))
		.min(LanesOf::<T>::splat(T::EXP_MAX));
	let n = (x * splat::<T>(std::f64::consts::LOG2_E)).round();
	let r = x - n * LanesOf::<T>::splat(T::LN2_HI) - n * LanesOf::<T>::splat(T::LN2_LO);
	taylor_tail::<T>(r, 0) * n.pow2i()
}

/// `e^x - 1` for `|x| <= ln2 / 2`, without the cancellation of `exp(x) - 1`.
#[inline(always)]
fn expm1_reduced<T: Scalar>(x: LanesOf<T>) -> LanesOf<T> {
	taylor_tail::<T>(x, 1) * x
}

#[inline(always)]
pub fn sigmoid<T: Scalar>(x: LanesOf<T>) -> LanesOf<T> {
	let one = LanesOf::<T>::splat(T::ONE);
	one / (one + exp::<T>(LanesOf::<T>::splat(T::ZERO) - x))
}

#[inline(always)]
pub fn tanh<T: Scalar>(x: LanesOf<T>) -> LanesOf<T> {
	let one = LanesOf::<T>::splat(T::ONE);
	let two = one + one;

	let abs_x = x.abs();
	let two_abs_x = abs_x + abs_x;

	let small = {
		let q = expm1_reduced::<T>(two_abs_x);
		q / (q + two)
	};
	let large = one - two / (exp::<T>(two_abs_x) + one);

	abs_x
		.select_lt(splat::<T>(TANH_SMALL), small, large)
		.copysign(x)
}
