// Copyright 2025 Irreducible Inc.

use std::{
	fmt::{Debug, Display},
	ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use bytemuck::{Pod, Zeroable};

use crate::arch::SimdScalar;

/// Floating-point element type of a model.
///
/// A model uses one element type for all of its layers. The trait is implemented for `f32` and
/// `f64`; the `Pod + Zeroable` bounds let weight and state buffers be allocated zeroed in a
/// single step.
pub trait Scalar:
	Copy
	+ Debug
	+ Display
	+ Default
	+ PartialEq
	+ PartialOrd
	+ Send
	+ Sync
	+ Pod
	+ Zeroable
	+ Add<Output = Self>
	+ Sub<Output = Self>
	+ Mul<Output = Self>
	+ Div<Output = Self>
	+ Neg<Output = Self>
	+ AddAssign
	+ SubAssign
	+ MulAssign
	+ DivAssign
	+ SimdScalar
	+ 'static
{
	const ZERO: Self;
	const ONE: Self;
	const NEG_INFINITY: Self;

	fn from_f64(val: f64) -> Self;

	fn to_f64(self) -> f64;

	fn exp(self) -> Self;

	fn tanh(self) -> Self;

	fn max(self, other: Self) -> Self;
}

macro_rules! impl_scalar {
	($($t:ty),*) => {
		$(
			impl Scalar for $t {
				const ZERO: Self = 0.0;
				const ONE: Self = 1.0;
				const NEG_INFINITY: Self = <$t>::NEG_INFINITY;

				#[inline(always)]
				fn from_f64(val: f64) -> Self {
					val as $t
				}

				#[inline(always)]
				fn to_f64(self) -> f64 {
					self as f64
				}

				#[inline(always)]
				fn exp(self) -> Self {
					<$t>::exp(self)
				}

				#[inline(always)]
				fn tanh(self) -> Self {
					<$t>::tanh(self)
				}

				#[inline(always)]
				fn max(self, other: Self) -> Self {
					<$t>::max(self, other)
				}
			}
		)*
	};
}

impl_scalar!(f32, f64);
