// Copyright 2025 Irreducible Inc.

//! Every backend must agree with the scalar reference backend to within floating-point
//! reordering and approximation error.

use proptest::prelude::*;
use rtnn_kernels::{OptimalKernels, Portable, Scalar, VectorKernels};
use rtnn_test_utils::tolerance::{assert_close, assert_dot_close};

const REL_TOL: f64 = 1e-5;

fn check_backend<T: Scalar, K: VectorKernels<T>>(a: &[T], b: &[T]) {
	assert_dot_close(K::dot(a, b), Portable::dot(a, b), a, b, REL_TOL);

	let len = a.len();
	let mut expected = vec![T::ZERO; len];
	let mut actual = vec![T::ZERO; len];

	Portable::add(a, b, &mut expected);
	K::add(a, b, &mut actual);
	assert_close(&actual, &expected, REL_TOL);

	Portable::sub(a, b, &mut expected);
	K::sub(a, b, &mut actual);
	assert_close(&actual, &expected, REL_TOL);

	Portable::mul(a, b, &mut expected);
	K::mul(a, b, &mut actual);
	assert_close(&actual, &expected, REL_TOL);

	Portable::sigmoid(a, &mut expected);
	K::sigmoid(a, &mut actual);
	assert_close(&actual, &expected, REL_TOL);

	Portable::tanh(a, &mut expected);
	K::tanh(a, &mut actual);
	assert_close(&actual, &expected, REL_TOL);

	Portable::softmax(a, &mut expected);
	K::softmax(a, &mut actual);
	assert_close(&actual, &expected, REL_TOL);
}

fn check_all_backends<T: Scalar>(a: &[T], b: &[T]) {
	check_backend::<T, OptimalKernels>(a, b);
	#[cfg(any(target_arch = "x86_64", all(target_arch = "aarch64", target_feature = "neon")))]
	check_backend::<T, rtnn_kernels::Simd>(a, b);
}

fn pair_strategy(max_len: usize, magnitude: f64) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
	(0..=max_len).prop_flat_map(move |len| {
		(
			prop::collection::vec(-magnitude..magnitude, len),
			prop::collection::vec(-magnitude..magnitude, len),
		)
	})
}

fn to_f32(values: &[f64]) -> Vec<f32> {
	values.iter().map(|&v| v as f32).collect()
}

proptest! {
	#[test]
	fn backends_agree_f64((a, b) in pair_strategy(37, 4.0)) {
		check_all_backends(&a, &b);
	}

	#[test]
	fn backends_agree_f32((a, b) in pair_strategy(37, 4.0)) {
		check_all_backends(&to_f32(&a), &to_f32(&b));
	}

	#[test]
	fn backends_agree_on_large_inputs_f64((a, b) in pair_strategy(19, 60.0)) {
		check_all_backends(&a, &b);
	}

	#[test]
	fn backends_agree_on_large_inputs_f32((a, b) in pair_strategy(19, 60.0)) {
		check_all_backends(&to_f32(&a), &to_f32(&b));
	}
}

#[test]
fn test_boundary_lengths() {
	// Every length around the 2-, 4- and 8-wide lane boundaries.
	for len in 0..=17 {
		let a = (0..len).map(|i| i as f64 * 0.37 - 2.0).collect::<Vec<_>>();
		let b = (0..len).map(|i| 1.5 - i as f64 * 0.21).collect::<Vec<_>>();
		check_all_backends(&a, &b);
		check_all_backends(&to_f32(&a), &to_f32(&b));
	}
}

#[test]
fn test_special_inputs() {
	let zeros = [0.0f64; 9];
	check_all_backends(&zeros, &zeros);

	let negative = [-1e-7f64, -0.5, -3.0, -20.0, -45.0, -80.0, -1.0, -0.17, -0.16];
	check_all_backends(&negative, &zeros);

	let large = [90.0f32, -90.0, 500.0, -500.0, 1e4, -1e4, 88.5];
	check_all_backends(&large, &large);
}
