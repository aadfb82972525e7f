// Copyright 2025 Irreducible Inc.

use std::fmt::Debug;

use crate::Scalar;

/// Allocation-free vector primitives that every layer is built from.
///
/// Implementors are zero-sized strategy types: all operations are associated functions, so a
/// layer generic over `K: VectorKernels<T>` is monomorphized for one backend at build time.
///
/// All slices passed to one call must have the same length. This is a caller contract; it is
/// checked with debug assertions only.
///
/// Backends agree with [`crate::Portable`] up to floating-point rounding: vectorized reductions
/// sum in a different order and vectorized transcendentals use polynomial approximations.
pub trait VectorKernels<T: Scalar>: Copy + Debug + Default + Send + Sync + 'static {
	/// Short backend name, used in diagnostics and benchmark labels.
	const NAME: &'static str;

	/// Returns `Σ a_i · b_i`.
	fn dot(a: &[T], b: &[T]) -> T;

	/// `out_i = a_i + b_i`
	fn add(a: &[T], b: &[T], out: &mut [T]);

	/// `out_i = a_i - b_i`
	fn sub(a: &[T], b: &[T], out: &mut [T]);

	/// `out_i = a_i · b_i`
	fn mul(a: &[T], b: &[T], out: &mut [T]);

	/// `acc_i += x_i`
	fn add_assign(acc: &mut [T], x: &[T]);

	/// `acc_i *= x_i`
	fn mul_assign(acc: &mut [T], x: &[T]);

	#[inline]
	fn copy(src: &[T], dst: &mut [T]) {
		dst.copy_from_slice(src);
	}

	/// `x_i = 1 / (1 + e^{-x_i})`
	fn sigmoid_inplace(x: &mut [T]);

	fn tanh_inplace(x: &mut [T]);

	/// `x_i = e^{x_i} / Σ_j e^{x_j}`
	///
	/// The maximum element is subtracted before exponentiation, which leaves the result
	/// unchanged mathematically and keeps large inputs finite.
	fn softmax_inplace(x: &mut [T]);

	#[inline]
	fn sigmoid(input: &[T], out: &mut [T]) {
		Self::copy(input, out);
		Self::sigmoid_inplace(out);
	}

	#[inline]
	fn tanh(input: &[T], out: &mut [T]) {
		Self::copy(input, out);
		Self::tanh_inplace(out);
	}

	#[inline]
	fn softmax(input: &[T], out: &mut [T]) {
		Self::copy(input, out);
		Self::softmax_inplace(out);
	}
}
