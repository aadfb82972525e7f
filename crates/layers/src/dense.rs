// Copyright 2025 Irreducible Inc.

use std::marker::PhantomData;

use bytemuck::zeroed_slice_box;
use getset::CopyGetters;
use rtnn_kernels::{Matrix, OptimalKernels, Scalar, VectorKernels};
use tracing::debug;

use crate::{
	layer::{check_len, check_positive, check_table},
	Error, Layer,
};

/// Fully connected layer, `output = W · input + b`, with no activation.
#[derive(Debug, CopyGetters)]
pub struct Dense<T: Scalar, K: VectorKernels<T> = OptimalKernels> {
	#[getset(get_copy = "pub")]
	in_size: usize,
	#[getset(get_copy = "pub")]
	out_size: usize,
	/// `out_size × in_size`
	weights: Matrix<T>,
	bias: Box<[T]>,
	_marker: PhantomData<K>,
}

impl<T: Scalar, K: VectorKernels<T>> Dense<T, K> {
	/// Creates a layer with all weights and biases set to zero.
	pub fn new(in_size: usize, out_size: usize) -> Result<Self, Error> {
		check_positive("in_size", in_size)?;
		check_positive("out_size", out_size)?;
		debug!(in_size, out_size, backend = K::NAME, "created dense layer");
		Ok(Self::zeroed(in_size, out_size))
	}

	pub(crate) fn zeroed(in_size: usize, out_size: usize) -> Self {
		Self {
			in_size,
			out_size,
			weights: Matrix::zeros(out_size, in_size),
			bias: zeroed_slice_box(out_size),
			_marker: PhantomData,
		}
	}

	/// A layer of the same shape with zero weights.
	pub fn fresh_copy(&self) -> Self {
		Self::zeroed(self.in_size, self.out_size)
	}

	/// Loads `out_size` rows of `in_size` weights.
	pub fn set_weights<R: AsRef<[T]>>(&mut self, weights: &[R]) -> Result<(), Error> {
		check_table("weights", weights, self.out_size, self.in_size)?;
		for (i, row) in weights.iter().enumerate() {
			self.weights.set_row(i, row.as_ref())?;
		}
		Ok(())
	}

	pub fn set_bias(&mut self, bias: &[T]) -> Result<(), Error> {
		check_len("bias", self.out_size, bias.len())?;
		self.bias.copy_from_slice(bias);
		Ok(())
	}

	/// Weight connecting input `k` to output `i`.
	pub fn weight(&self, i: usize, k: usize) -> T {
		self.weights[(i, k)]
	}

	pub fn bias(&self, i: usize) -> T {
		self.bias[i]
	}

	pub(crate) fn weights_mut(&mut self) -> &mut Matrix<T> {
		&mut self.weights
	}
}

impl<T: Scalar, K: VectorKernels<T>> Layer<T> for Dense<T, K> {
	fn name(&self) -> &'static str {
		"dense"
	}

	fn in_size(&self) -> usize {
		self.in_size
	}

	fn out_size(&self) -> usize {
		self.out_size
	}

	fn reset(&mut self) {}

	#[inline]
	fn forward(&mut self, input: &[T], output: &mut [T]) {
		debug_assert_eq!(input.len(), self.in_size);
		debug_assert_eq!(output.len(), self.out_size);

		self.weights.mul_vec_into::<K>(input, output);
		K::add_assign(output, &self.bias);
	}
}
