// Copyright 2025 Irreducible Inc.

use std::ops::{Add, Div, Mul, Sub};

/// Widest lane count of any lane type on any supported target.
pub const MAX_LANES: usize = 8;

/// A SIMD register holding `WIDTH` scalars of type `T`.
///
/// The methods are the primitives the vectorized kernels and the polynomial approximations in
/// `simd_math` are written in. All of them are lane-wise except the `reduce_*` methods.
pub trait Lanes<T: Copy + Default>:
	Copy + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self>
{
	const WIDTH: usize;

	/// Loads the first `WIDTH` elements of `src`.
	///
	/// Panics if `src` is shorter than `WIDTH`.
	fn load(src: &[T]) -> Self;

	/// Stores all lanes into the first `WIDTH` elements of `dst`.
	///
	/// Panics if `dst` is shorter than `WIDTH`.
	fn store(self, dst: &mut [T]);

	fn splat(val: T) -> Self;

	fn min(self, rhs: Self) -> Self;

	fn max(self, rhs: Self) -> Self;

	fn abs(self) -> Self;

	/// Rounds to the nearest integer, ties to even.
	fn round(self) -> Self;

	/// Computes `2^n` for lanes holding integral values within the normal exponent range.
	fn pow2i(self) -> Self;

	/// Lane-wise `if self < threshold { if_less } else { otherwise }`.
	fn select_lt(self, threshold: Self, if_less: Self, otherwise: Self) -> Self;

	/// Magnitude of `self` with the sign of `sign`.
	fn copysign(self, sign: Self) -> Self;

	fn reduce_sum(self) -> T;

	fn reduce_max(self) -> T;

	/// Loads a slice shorter than `WIDTH`, padding the missing lanes with `T::default()`.
	#[inline(always)]
	fn load_partial(src: &[T]) -> Self {
		debug_assert!(src.len() <= Self::WIDTH);
		let mut buffer = [T::default(); MAX_LANES];
		buffer[..src.len()].copy_from_slice(src);
		Self::load(&buffer)
	}

	/// Stores the first `dst.len()` lanes into `dst`.
	#[inline(always)]
	fn store_partial(self, dst: &mut [T]) {
		debug_assert!(dst.len() <= Self::WIDTH);
		let mut buffer = [T::default(); MAX_LANES];
		self.store(&mut buffer);
		let len = dst.len();
		dst.copy_from_slice(&buffer[..len]);
	}
}

/// Scalar types with a lane representation and the constants of the vectorized `exp`.
pub trait SimdScalar: Copy + Default + 'static {
	type Lanes: Lanes<Self>;

	/// High part of `ln 2`, exactly representable so that `n · LN2_HI` is exact.
	const LN2_HI: Self;
	/// `ln 2 - LN2_HI`
	const LN2_LO: Self;
	/// Inputs are clamped to `[EXP_MIN, EXP_MAX]` so that `2^n` stays a normal number.
	const EXP_MIN: Self;
	const EXP_MAX: Self;
}

impl SimdScalar for f32 {
	type Lanes = super::F32Lanes;

	const LN2_HI: Self = 0.693_359_4;
	const LN2_LO: Self = -2.121_944_4e-4;
	const EXP_MIN: Self = -87.0;
	const EXP_MAX: Self = 88.0;
}

impl SimdScalar for f64 {
	type Lanes = super::F64Lanes;

	const LN2_HI: Self = 6.931_457_519_531_25e-1;
	const LN2_LO: Self = 1.428_606_820_309_417_232_1e-6;
	const EXP_MIN: Self = -708.0;
	const EXP_MAX: Self = 709.0;
}

/// Implements the arithmetic operators of a lane newtype with the given intrinsics.
macro_rules! impl_arith_ops {
	($name:ty, $add:ident, $sub:ident, $mul:ident, $div:ident) => {
		impl std::ops::Add for $name {
			type Output = Self;

			#[inline(always)]
			fn add(self, rhs: Self) -> Self {
				Self(unsafe { $add(self.0, rhs.0) })
			}
		}

		impl std::ops::Sub for $name {
			type Output = Self;

			#[inline(always)]
			fn sub(self, rhs: Self) -> Self {
				Self(unsafe { $sub(self.0, rhs.0) })
			}
		}

		impl std::ops::Mul for $name {
			type Output = Self;

			#[inline(always)]
			fn mul(self, rhs: Self) -> Self {
				Self(unsafe { $mul(self.0, rhs.0) })
			}
		}

		impl std::ops::Div for $name {
			type Output = Self;

			#[inline(always)]
			fn div(self, rhs: Self) -> Self {
				Self(unsafe { $div(self.0, rhs.0) })
			}
		}
	};
}

pub(crate) use impl_arith_ops;
