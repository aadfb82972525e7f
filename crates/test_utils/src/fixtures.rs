// Copyright 2025 Irreducible Inc.

//! Seeded weight and signal generators in the packed external layouts the layers load.

use std::iter::repeat_with;

use rand::Rng;
use rtnn_kernels::Scalar;

/// Magnitude of generated weights, roughly that of a small trained network.
pub const WEIGHT_SCALE: f64 = 0.5;

pub fn random_vec<T: Scalar>(rng: &mut impl Rng, len: usize, scale: f64) -> Vec<T> {
	repeat_with(|| T::from_f64(rng.gen_range(-scale..scale)))
		.take(len)
		.collect()
}

pub fn random_rows<T: Scalar>(
	rng: &mut impl Rng,
	n_rows: usize,
	n_cols: usize,
	scale: f64,
) -> Vec<Vec<T>> {
	repeat_with(|| random_vec(rng, n_cols, scale))
		.take(n_rows)
		.collect()
}

/// A deterministic two-tone test signal in `[-1, 1]`.
pub fn test_signal<T: Scalar>(len: usize) -> Vec<T> {
	(0..len)
		.map(|n| {
			let n = n as f64;
			T::from_f64(0.8 * (0.05 * n).sin() + 0.2 * (0.31 * n).sin())
		})
		.collect()
}

/// Swaps column blocks `g0` and `g1` (each `block` wide) in every row.
fn swap_column_blocks<T: Copy>(rows: &mut [Vec<T>], block: usize, g0: usize, g1: usize) {
	for row in rows {
		for j in 0..block {
			row.swap(g0 * block + j, g1 * block + j);
		}
	}
}

/// Dense weights: `weights[out][in]`, `bias[out]`.
#[derive(Debug, Clone)]
pub struct DenseWeights<T> {
	pub weights: Vec<Vec<T>>,
	pub bias: Vec<T>,
}

impl<T: Scalar> DenseWeights<T> {
	pub fn random(rng: &mut impl Rng, in_size: usize, out_size: usize) -> Self {
		Self {
			weights: random_rows(rng, out_size, in_size, WEIGHT_SCALE),
			bias: random_vec(rng, out_size, WEIGHT_SCALE),
		}
	}
}

/// Conv1D weights: `weights[out][in][tap]` with tap 0 the oldest frame, `bias[out]`.
#[derive(Debug, Clone)]
pub struct Conv1DWeights<T> {
	pub weights: Vec<Vec<Vec<T>>>,
	pub bias: Vec<T>,
}

impl<T: Scalar> Conv1DWeights<T> {
	pub fn random(rng: &mut impl Rng, in_size: usize, out_size: usize, kernel_size: usize) -> Self {
		Self {
			weights: repeat_with(|| random_rows(rng, in_size, kernel_size, WEIGHT_SCALE))
				.take(out_size)
				.collect(),
			bias: random_vec(rng, out_size, WEIGHT_SCALE),
		}
	}
}

/// GRU weights in update, reset, candidate order.
///
/// `w[in][3·out]`, `u[out][3·out]`, `b[2][3·out]` (input-side row, recurrent-side row).
#[derive(Debug, Clone)]
pub struct GruWeights<T> {
	pub w: Vec<Vec<T>>,
	pub u: Vec<Vec<T>>,
	pub b: Vec<Vec<T>>,
}

impl<T: Scalar> GruWeights<T> {
	pub const N_GATES: usize = 3;

	pub fn random(rng: &mut impl Rng, in_size: usize, out_size: usize) -> Self {
		let cols = Self::N_GATES * out_size;
		Self {
			w: random_rows(rng, in_size, cols, WEIGHT_SCALE),
			u: random_rows(rng, out_size, cols, WEIGHT_SCALE),
			b: random_rows(rng, 2, cols, WEIGHT_SCALE),
		}
	}

	pub fn out_size(&self) -> usize {
		self.u.len()
	}

	/// Swaps the slices of gates `g0` and `g1` in every packed buffer.
	pub fn swap_gates(&mut self, g0: usize, g1: usize) {
		let out_size = self.out_size();
		swap_column_blocks(&mut self.w, out_size, g0, g1);
		swap_column_blocks(&mut self.u, out_size, g0, g1);
		swap_column_blocks(&mut self.b, out_size, g0, g1);
	}
}

/// LSTM weights in input, forget, cell, output order.
///
/// `w[in][4·out]`, `u[out][4·out]`, `b[4·out]`.
#[derive(Debug, Clone)]
pub struct LstmWeights<T> {
	pub w: Vec<Vec<T>>,
	pub u: Vec<Vec<T>>,
	pub b: Vec<T>,
}

impl<T: Scalar> LstmWeights<T> {
	pub const N_GATES: usize = 4;

	pub fn random(rng: &mut impl Rng, in_size: usize, out_size: usize) -> Self {
		let cols = Self::N_GATES * out_size;
		Self {
			w: random_rows(rng, in_size, cols, WEIGHT_SCALE),
			u: random_rows(rng, out_size, cols, WEIGHT_SCALE),
			b: random_vec(rng, cols, WEIGHT_SCALE),
		}
	}

	pub fn out_size(&self) -> usize {
		self.u.len()
	}

	/// Swaps the slices of gates `g0` and `g1` in every packed buffer.
	pub fn swap_gates(&mut self, g0: usize, g1: usize) {
		let out_size = self.out_size();
		swap_column_blocks(&mut self.w, out_size, g0, g1);
		swap_column_blocks(&mut self.u, out_size, g0, g1);
		swap_column_blocks(std::slice::from_mut(&mut self.b), out_size, g0, g1);
	}
}
