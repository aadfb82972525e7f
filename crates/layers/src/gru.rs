// Copyright 2025 Irreducible Inc.

use std::marker::PhantomData;

use bytemuck::zeroed_slice_box;
use getset::CopyGetters;
use rtnn_kernels::{Matrix, OptimalKernels, Scalar, VectorKernels};
use tracing::debug;

use crate::{
	layer::{check_len, check_positive, check_table},
	Error, Layer, RecurrentState,
};

/// Gated recurrent unit.
///
/// Gates are packed in update, reset, candidate order. With `o = out_size`, gate `g` unit
/// `j` lives at packed column `g · o + j` of every weight and bias buffer. One step computes
///
/// ```text
/// z = σ(W_z·x + U_z·h + b_z)
/// r = σ(W_r·x + U_r·h + b_r)
/// c = tanh(W_c·x + r ⊙ (U_c·h) + b_c)
/// h = (1 - z) ⊙ h + z ⊙ c
/// ```
///
/// and outputs the new `h`.
#[derive(Debug, CopyGetters)]
pub struct Gru<T: Scalar, K: VectorKernels<T> = OptimalKernels> {
	#[getset(get_copy = "pub")]
	in_size: usize,
	#[getset(get_copy = "pub")]
	out_size: usize,
	/// Input kernel, `3·o × in_size`.
	w: Matrix<T>,
	/// Recurrent kernel, `3·o × o`.
	u: Matrix<T>,
	/// Input-side and recurrent-side biases, summed.
	b: Box<[T]>,
	h: Box<[T]>,
	wx: Box<[T]>,
	uh: Box<[T]>,
	#[getset(get_copy = "pub")]
	state: RecurrentState,
	_marker: PhantomData<K>,
}

impl<T: Scalar, K: VectorKernels<T>> Gru<T, K> {
	pub const N_GATES: usize = 3;

	pub fn new(in_size: usize, out_size: usize) -> Result<Self, Error> {
		check_positive("in_size", in_size)?;
		check_positive("out_size", out_size)?;
		debug!(in_size, out_size, backend = K::NAME, "created gru layer");
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
			wx: zeroed_slice_box(n_cols),
			uh: zeroed_slice_box(n_cols),
			state: RecurrentState::Fresh,
			_marker: PhantomData,
		}
	}

	/// A layer of the same shape with zero weights in the fresh state.
	pub fn fresh_copy(&self) -> Self {
		Self::zeroed(self.in_size, self.out_size)
	}

	/// Loads the input kernel as `in_size` rows of `3 · out_size` packed gate columns.
	pub fn set_w_vals<R: AsRef<[T]>>(&mut self, w: &[R]) -> Result<(), Error> {
		check_table("w", w, self.in_size, Self::N_GATES * self.out_size)?;
		load_transposed(&mut self.w, w);
		debug!(in_size = self.in_size, out_size = self.out_size, "loaded gru input kernel");
		Ok(())
	}

	/// Loads the recurrent kernel as `out_size` rows of `3 · out_size` packed gate columns.
	pub fn set_u_vals<R: AsRef<[T]>>(&mut self, u: &[R]) -> Result<(), Error> {
		check_table("u", u, self.out_size, Self::N_GATES * self.out_size)?;
		load_transposed(&mut self.u, u);
		debug!(out_size = self.out_size, "loaded gru recurrent kernel");
		Ok(())
	}

	/// Loads biases of `3 · out_size` packed gate columns.
	///
	/// Accepts either one row of combined biases or two rows (input-side, recurrent-side),
	/// which are summed.
	pub fn set_b_vals<R: AsRef<[T]>>(&mut self, b: &[R]) -> Result<(), Error> {
		let n_rows = if b.len() == 1 { 1 } else { 2 };
		check_table("b", b, n_rows, Self::N_GATES * self.out_size)?;

		self.b.fill(T::ZERO);
		for row in b {
			K::add_assign(&mut self.b, row.as_ref());
		}
		Ok(())
	}

	/// Input kernel entry for input `i` and packed column `k`.
	pub fn w_val(&self, i: usize, k: usize) -> T {
		self.w[(k, i)]
	}

	/// Recurrent kernel entry for hidden unit `i` and packed column `k`.
	pub fn u_val(&self, i: usize, k: usize) -> T {
		self.u[(k, i)]
	}

	/// Combined bias of packed column `k`.
	pub fn b_val(&self, k: usize) -> T {
		self.b[k]
	}

	/// The hidden state `h`.
	pub fn hidden(&self) -> &[T] {
		&self.h
	}
}

/// Writes `rows[i][k]` to `matrix[(k, i)]`.
pub(crate) fn load_transposed<T: Scalar, R: AsRef<[T]>>(matrix: &mut Matrix<T>, rows: &[R]) {
	for (i, row) in rows.iter().enumerate() {
		for (k, &value) in row.as_ref().iter().enumerate() {
			matrix[(k, i)] = value;
		}
	}
}

impl<T: Scalar, K: VectorKernels<T>> Layer<T> for Gru<T, K> {
	fn name(&self) -> &'static str {
		"gru"
	}

	fn in_size(&self) -> usize {
		self.in_size
	}

	fn out_size(&self) -> usize {
		self.out_size
	}

	fn reset(&mut self) {
		self.h.fill(T::ZERO);
		self.state = RecurrentState::Fresh;
	}

	fn forward(&mut self, input: &[T], output: &mut [T]) {
		debug_assert_eq!(input.len(), self.in_size);
		debug_assert_eq!(output.len(), self.out_size);

		let o = self.out_size;
		self.w.mul_vec_into::<K>(input, &mut self.wx);
		K::add_assign(&mut self.wx, &self.b);
		self.u.mul_vec_into::<K>(&self.h, &mut self.uh);

		let (zr, c) = self.wx.split_at_mut(2 * o);
		let (zr_h, c_h) = self.uh.split_at_mut(2 * o);
		K::add_assign(zr, zr_h);
		K::sigmoid_inplace(zr);
		let (z, r) = zr.split_at(o);

		K::mul_assign(c_h, r);
		K::add_assign(c, c_h);
		K::tanh_inplace(c);

		// h += z ⊙ (c - h), with the spent update-gate recurrent slice as scratch
		let delta = &mut zr_h[..o];
		K::sub(c, &self.h, delta);
		K::mul_assign(delta, z);
		K::add_assign(&mut self.h, delta);

		K::copy(&self.h, output);
		self.state = RecurrentState::Running;
	}
}
