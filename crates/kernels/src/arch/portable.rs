// Copyright 2025 Irreducible Inc.

use itertools::izip;

use crate::{Scalar, VectorKernels};

/// Scalar reference backend.
///
/// Sequential loops and the standard library's transcendental functions. Every other backend
/// is tested against this one.
#[derive(Debug, Default, Clone, Copy)]
pub struct Portable;

impl<T: Scalar> VectorKernels<T> for Portable {
	const NAME: &'static str = "portable";

	#[inline]
	fn dot(a: &[T], b: &[T]) -> T {
		debug_assert_eq!(a.len(), b.len());
		a.iter()
			.zip(b)
			.fold(T::ZERO, |acc, (&a_i, &b_i)| acc + a_i * b_i)
	}

	#[inline]
	fn add(a: &[T], b: &[T], out: &mut [T]) {
		debug_assert_eq!(a.len(), b.len());
		debug_assert_eq!(a.len(), out.len());
		for (out, &a, &b) in izip!(out, a, b) {
			*out = a + b;
		}
	}

	#[inline]
	fn sub(a: &[T], b: &[T], out: &mut [T]) {
		debug_assert_eq!(a.len(), b.len());
		debug_assert_eq!(a.len(), out.len());
		for (out, &a, &b) in izip!(out, a, b) {
			*out = a - b;
		}
	}

	#[inline]
	fn mul(a: &[T], b: &[T], out: &mut [T]) {
		debug_assert_eq!(a.len(), b.len());
		debug_assert_eq!(a.len(), out.len());
		for (out, &a, &b) in izip!(out, a, b) {
			*out = a * b;
		}
	}

	#[inline]
	fn add_assign(acc: &mut [T], x: &[T]) {
		debug_assert_eq!(acc.len(), x.len());
		for (acc, &x) in acc.iter_mut().zip(x) {
			*acc += x;
		}
	}

	#[inline]
	fn mul_assign(acc: &mut [T], x: &[T]) {
		debug_assert_eq!(acc.len(), x.len());
		for (acc, &x) in acc.iter_mut().zip(x) {
			*acc *= x;
		}
	}

	#[inline]
	fn sigmoid_inplace(x: &mut [T]) {
		for x_i in x {
			*x_i = T::ONE / (T::ONE + (-*x_i).exp());
		}
	}

	#[inline]
	fn tanh_inplace(x: &mut [T]) {
		for x_i in x {
			*x_i = x_i.tanh();
		}
	}

	#[inline]
	fn softmax_inplace(x: &mut [T]) {
		let max = x.iter().fold(T::NEG_INFINITY, |max, &x_i| max.max(x_i));

		let mut exp_sum = T::ZERO;
		for x_i in x.iter_mut() {
			*x_i = (*x_i - max).exp();
			exp_sum += *x_i;
		}

		for x_i in x.iter_mut() {
			*x_i /= exp_sum;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_dot() {
		assert_eq!(<Portable as VectorKernels<f64>>::dot(&[1.0, 2.0, 3.0], &[4.0, -5.0, 6.0]), 12.0);
		assert_eq!(<Portable as VectorKernels<f32>>::dot(&[], &[]), 0.0);
	}

	#[test]
	fn test_elementwise() {
		let a = [1.0f64, 2.0, 3.0];
		let b = [0.5f64, -1.0, 2.0];
		let mut out = [0.0; 3];

		Portable::add(&a, &b, &mut out);
		assert_eq!(out, [1.5, 1.0, 5.0]);
		Portable::sub(&a, &b, &mut out);
		assert_eq!(out, [0.5, 3.0, 1.0]);
		Portable::mul(&a, &b, &mut out);
		assert_eq!(out, [0.5, -2.0, 6.0]);

		let mut acc = a;
		Portable::add_assign(&mut acc, &b);
		assert_eq!(acc, [1.5, 1.0, 5.0]);
		Portable::mul_assign(&mut acc, &b);
		assert_eq!(acc, [0.75, -1.0, 10.0]);
	}

	#[test]
	fn test_sigmoid() {
		let mut x = [0.0f64, 2.0, -2.0];
		Portable::sigmoid_inplace(&mut x);
		assert_eq!(x[0], 0.5);
		assert!((x[1] - 0.8807970779778823).abs() < 1e-15);
		assert!((x[1] + x[2] - 1.0).abs() < 1e-15);
	}

	#[test]
	fn test_softmax() {
		let input = [1.0f64, 2.0, 3.0];
		let mut out = [0.0; 3];
		Portable::softmax(&input, &mut out);

		let denom = 1f64.exp() + 2f64.exp() + 3f64.exp();
		for (o, x) in out.iter().zip(input) {
			assert!((o - x.exp() / denom).abs() < 1e-15);
		}
		assert!((out.iter().sum::<f64>() - 1.0).abs() < 1e-15);
	}

	#[test]
	fn test_softmax_large_inputs_stay_finite() {
		let mut x = [1000.0f32, 1000.0];
		Portable::softmax_inplace(&mut x);
		assert_eq!(x, [0.5, 0.5]);
	}
}
