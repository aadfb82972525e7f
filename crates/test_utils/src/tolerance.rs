// Copyright 2025 Irreducible Inc.

use approx::relative_eq;
use rtnn_kernels::Scalar;

/// Differences below this are treated as equal regardless of relative size, so that values
/// which underflow differently in two backends still compare.
pub const ABS_FLOOR: f64 = 1e-30;

pub fn rel_close(actual: f64, expected: f64, rel_tol: f64) -> bool {
	relative_eq!(actual, expected, epsilon = ABS_FLOOR, max_relative = rel_tol)
}

/// Asserts elementwise relative closeness.
pub fn assert_close<T: Scalar>(actual: &[T], expected: &[T], rel_tol: f64) {
	assert_eq!(actual.len(), expected.len(), "length mismatch");
	for (i, (&a, &e)) in actual.iter().zip(expected).enumerate() {
		assert!(
			rel_close(a.to_f64(), e.to_f64(), rel_tol),
			"index {i}: {a} vs expected {e} (relative tolerance {rel_tol})"
		);
	}
}

/// Asserts closeness of two dot products of `a` and `b`.
///
/// The error of a reordered sum is bounded relative to `Σ |a_i · b_i|`, not to the result,
/// which can be arbitrarily close to zero.
pub fn assert_dot_close<T: Scalar>(actual: T, expected: T, a: &[T], b: &[T], rel_tol: f64) {
	let magnitude: f64 = a
		.iter()
		.zip(b)
		.map(|(&a_i, &b_i)| (a_i.to_f64() * b_i.to_f64()).abs())
		.sum();
	let diff = (actual.to_f64() - expected.to_f64()).abs();
	assert!(
		diff <= ABS_FLOOR || diff <= rel_tol * magnitude,
		"dot product {actual} vs expected {expected} (magnitude {magnitude})"
	);
}

/// Per-sequence comparison summary, as reported when checking against exported references.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorReport {
	pub max_error: f64,
	pub n_errors: usize,
}

impl ErrorReport {
	pub fn passed(&self) -> bool {
		self.n_errors == 0
	}
}

/// Counts samples whose absolute error exceeds `threshold` and tracks the largest error.
pub fn compare_sequences<T: Scalar>(actual: &[T], expected: &[T], threshold: f64) -> ErrorReport {
	assert_eq!(actual.len(), expected.len(), "length mismatch");
	actual
		.iter()
		.zip(expected)
		.map(|(&a, &e)| (a.to_f64() - e.to_f64()).abs())
		.fold(
			ErrorReport {
				max_error: 0.0,
				n_errors: 0,
			},
			|report, err| ErrorReport {
				max_error: report.max_error.max(err),
				n_errors: report.n_errors + usize::from(err > threshold),
			},
		)
}
