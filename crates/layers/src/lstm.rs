// Copyright 2025 Irreducible Inc.

use std::marker::PhantomData;

use bytemuck::zeroed_slice_box;
use getset::CopyGetters;
use rtnn_kernels::{Matrix, OptimalKernels, Scalar, VectorKernels};
use tracing::debug;

use crate::{
	gru::load_transposed,
	layer::{check_len, check_positive, check_table},
	Error, Layer, RecurrentState,
};

/// Long short-term memory layer.
///
/// Gates are packed in input, forget, cell, output order at offsets `0`, `o`, `2·o`, `3·o`
/// with `o = out_size`. One step computes
///
/// ```text
/// i = σ(W_i·x + U_i·h + b_i)
/// f = σ(W_f·x + U_f·h + b_f)
/// c̃ = tanh(W_c·x + U_c·h + b_c)
/// o = σ(W_o·x + U_o·h + b_o)
/// c = f ⊙ c + i ⊙ c̃
/// h = o ⊙ tanh(c)
/// ```
///
/// and outputs the new `h`.
#[derive(Debug, CopyGetters)]
pub struct Lstm<T: Scalar, K: VectorKernels<T> = OptimalKernels> {
	#[getset(get_copy = "pub")]
	in_size: usize,
	#[getset(get_copy = "pub")]
	out_size: usize,
	/// `4·o × in_size`
	w: Matrix<T>,
	/// `4·o × o`
	u: Matrix<T>,
	b: Box<[T]>,
	h: Box<[T]>,
	c: Box<[T]>,
	gates: Box<[T]>,
	uh: Box<[T]>,
	#[getset(get_copy = "pub")]
	state: RecurrentState,
	_marker: PhantomData<K>,
}

impl<T: Scalar, K: VectorKernels<T>> Lstm<T, K> {
	pub const N_GATES: usize = 4;

	pub fn new(in_size: usize, out_size: usize) -> Result<Self, Error> {
		check_positive("in_size", in_size)?;
		check_positive("out_size", out_size)?;
		debug!(in_size, out_size, backend = K::NAME, "created lstm layer");
		Ok(Self::zeroed(in_size, out_size))
	}

	fn zeroed(in_size: usize, out_size: usize) -> Self {
		let n_cols = Self::N_GATES * out_size;
		Self {
			in_size,
			out_size,
			w: Matrix::zeros(n_cols, in_size),
			u: Matrix::zeros(n_cols, out_size),
			b: zeroed_slice_box(n_cols),
			h: zeroed_slice_box(out_size),
			c: zeroed_slice_box(out_size),
			gates: zeroed_slice_box(n_cols),
			uh: zeroed_slice_box(n_cols),
			state: RecurrentState::Fresh,
			_marker: PhantomData,
		}
	}

	/// A layer of the same shape with zero weights in the fresh state.
	pub fn fresh_copy(&self) -> Self {
		Self::zeroed(self.in_size, self.out_size)
	}

	/// Loads the input kernel as `in_size` rows of `4 · out_size` packed gate columns.
	pub fn set_w_vals<R: AsRef<[T]>>(&mut self, w: &[R]) -> Result<(), Error> {
		check_table("w", w, self.in_size, Self::N_GATES * self.out_size)?;
		load_transposed(&mut self.w, w);
		debug!(in_size = self.in_size, out_size = self.out_size, "loaded lstm input kernel");
		Ok(())
	}

	/// Loads the recurrent kernel as `out_size` rows of `4 · out_size` packed gate columns.
	pub fn set_u_vals<R: AsRef<[T]>>(&mut self, u: &[R]) -> Result<(), Error> {
		check_table("u", u, self.out_size, Self::N_GATES * self.out_size)?;
		load_transposed(&mut self.u, u);
		debug!(out_size = self.out_size, "loaded lstm recurrent kernel");
		Ok(())
	}

	pub fn set_b_vals(&mut self, b: &[T]) -> Result<(), Error> {
		check_len("b", Self::N_GATES * self.out_size, b.len())?;
		self.b.copy_from_slice(b);
		Ok(())
	}

	pub fn w_val(&self, i: usize, k: usize) -> T {
		self.w[(k, i)]
	}

	pub fn u_val(&self, i: usize, k: usize) -> T {
		self.u[(k, i)]
	}

	pub fn b_val(&self, k: usize) -> T {
		self.b[k]
	}

	pub fn hidden(&self) -> &[T] {
		&self.h
	}

	pub fn cell(&self) -> &[T] {
		&self.c
	}
}

impl<T: Scalar, K: VectorKernels<T>> Layer<T> for Lstm<T, K> {
	fn name(&self) -> &'static str {
		"lstm"
	}

	fn in_size(&self) -> usize {
		self.in_size
	}

	fn out_size(&self) -> usize {
		self.out_size
	}

	fn reset(&mut self) {
		self.h.fill(T::ZERO);
		self.c.fill(T::ZERO);
		self.state = RecurrentState::Fresh;
	}

	fn forward(&mut self, input: &[T], output: &mut [T]) {
		debug_assert_eq!(input.len(), self.in_size);
		debug_assert_eq!(output.len(), self.out_size);

		let o = self.out_size;
		self.w.mul_vec_into::<K>(input, &mut self.gates);
		self.u.mul_vec_into::<K>(&self.h, &mut self.uh);
		K::add_assign(&mut self.gates, &self.uh);
		K::add_assign(&mut self.gates, &self.b);

		let (input_forget, rest) = self.gates.split_at_mut(2 * o);
		let (candidate, output_gate) = rest.split_at_mut(o);
		K::sigmoid_inplace(input_forget);
		K::tanh_inplace(candidate);
		K::sigmoid_inplace(output_gate);
		let (input_gate, forget_gate) = input_forget.split_at(o);

		K::mul_assign(&mut self.c, forget_gate);
		K::mul_assign(candidate, input_gate);
		K::add_assign(&mut self.c, candidate);

		K::tanh(&self.c, &mut self.h);
		K::mul_assign(&mut self.h, output_gate);

		K::copy(&self.h, output);
		self.state = RecurrentState::Running;
	}
}
