// Copyright 2025 Irreducible Inc.

//! Straightforward `f64` implementations of each layer, computed term by term from the layer
//! equations.

use std::collections::VecDeque;

use itertools::izip;
use rtnn_kernels::Scalar;

use crate::fixtures::{Conv1DWeights, DenseWeights, GruWeights, LstmWeights};

fn to_f64_vec<T: Scalar>(values: &[T]) -> Vec<f64> {
	values.iter().map(|v| v.to_f64()).collect()
}

fn to_f64_rows<T: Scalar>(rows: &[Vec<T>]) -> Vec<Vec<f64>> {
	rows.iter().map(|row| to_f64_vec(row)).collect()
}

pub fn sigmoid(x: f64) -> f64 {
	1.0 / (1.0 + (-x).exp())
}

/// Runs `forward` over a scalar input sequence and returns the first output of every step.
pub fn run_scalar_sequence(mut forward: impl FnMut(&[f64]) -> Vec<f64>, xs: &[f64]) -> Vec<f64> {
	xs.iter().map(|&x| forward(&[x])[0]).collect()
}

#[derive(Debug, Clone)]
pub struct ReferenceDense {
	weights: Vec<Vec<f64>>,
	bias: Vec<f64>,
}

impl ReferenceDense {
	pub fn new<T: Scalar>(weights: &DenseWeights<T>) -> Self {
		Self {
			weights: to_f64_rows(&weights.weights),
			bias: to_f64_vec(&weights.bias),
		}
	}

	pub fn forward(&self, x: &[f64]) -> Vec<f64> {
		self.weights
			.iter()
			.zip(&self.bias)
			.map(|(row, &b)| row.iter().zip(x).map(|(w, x)| w * x).sum::<f64>() + b)
			.collect()
	}
}

#[derive(Debug, Clone)]
pub struct ReferenceConv1D {
	weights: Vec<Vec<Vec<f64>>>,
	bias: Vec<f64>,
	dilation: usize,
	in_size: usize,
	/// Oldest frame at the front.
	history: VecDeque<Vec<f64>>,
}

impl ReferenceConv1D {
	pub fn new<T: Scalar>(weights: &Conv1DWeights<T>, dilation: usize) -> Self {
		let in_size = weights.weights[0].len();
		let kernel_size = weights.weights[0][0].len();
		Self {
			weights: weights.weights.iter().map(|w| to_f64_rows(w)).collect(),
			bias: to_f64_vec(&weights.bias),
			dilation,
			in_size,
			history: VecDeque::from(vec![vec![0.0; in_size]; (kernel_size - 1) * dilation + 1]),
		}
	}

	pub fn reset(&mut self) {
		for frame in &mut self.history {
			frame.iter_mut().for_each(|v| *v = 0.0);
		}
	}

	pub fn forward(&mut self, x: &[f64]) -> Vec<f64> {
		assert_eq!(x.len(), self.in_size);
		self.history.pop_front();
		self.history.push_back(x.to_vec());

		self.weights
			.iter()
			.zip(&self.bias)
			.map(|(w_out, &b)| {
				let mut acc = b;
				for (w_in, i) in w_out.iter().zip(0..) {
					for (tap, &w) in w_in.iter().enumerate() {
						acc += w * self.history[tap * self.dilation][i];
					}
				}
				acc
			})
			.collect()
	}
}

#[derive(Debug, Clone)]
pub struct ReferenceGru {
	w: Vec<Vec<f64>>,
	u: Vec<Vec<f64>>,
	b_in: Vec<f64>,
	b_rec: Vec<f64>,
	h: Vec<f64>,
}

impl ReferenceGru {
	pub fn new<T: Scalar>(weights: &GruWeights<T>) -> Self {
		Self {
			w: to_f64_rows(&weights.w),
			u: to_f64_rows(&weights.u),
			b_in: to_f64_vec(&weights.b[0]),
			b_rec: to_f64_vec(&weights.b[1]),
			h: vec![0.0; weights.out_size()],
		}
	}

	pub fn reset(&mut self) {
		self.h.iter_mut().for_each(|v| *v = 0.0);
	}

	pub fn forward(&mut self, x: &[f64]) -> Vec<f64> {
		let out_size = self.h.len();
		let input = |col: usize| -> f64 {
			x.iter().zip(&self.w).map(|(x_i, row)| x_i * row[col]).sum::<f64>()
				+ self.b_in[col]
				+ self.b_rec[col]
		};
		let recurrent = |col: usize| -> f64 {
			self.h.iter().zip(&self.u).map(|(h_k, row)| h_k * row[col]).sum()
		};

		let h_new = (0..out_size)
			.map(|j| {
				let z = sigmoid(input(j) + recurrent(j));
				let r = sigmoid(input(out_size + j) + recurrent(out_size + j));
				let c = (input(2 * out_size + j) + r * recurrent(2 * out_size + j)).tanh();
				(1.0 - z) * self.h[j] + z * c
			})
			.collect::<Vec<_>>();

		self.h = h_new;
		self.h.clone()
	}
}

#[derive(Debug, Clone)]
pub struct ReferenceLstm {
	w: Vec<Vec<f64>>,
	u: Vec<Vec<f64>>,
	b: Vec<f64>,
	h: Vec<f64>,
	c: Vec<f64>,
}

impl ReferenceLstm {
	pub fn new<T: Scalar>(weights: &LstmWeights<T>) -> Self {
		let out_size = weights.out_size();
		Self {
			w: to_f64_rows(&weights.w),
			u: to_f64_rows(&weights.u),
			b: to_f64_vec(&weights.b),
			h: vec![0.0; out_size],
			c: vec![0.0; out_size],
		}
	}

	pub fn reset(&mut self) {
		self.h.iter_mut().for_each(|v| *v = 0.0);
		self.c.iter_mut().for_each(|v| *v = 0.0);
	}

	pub fn forward(&mut self, x: &[f64]) -> Vec<f64> {
		let out_size = self.h.len();
		let pre_activation = |col: usize| -> f64 {
			x.iter().zip(&self.w).map(|(x_i, row)| x_i * row[col]).sum::<f64>()
				+ self.h.iter().zip(&self.u).map(|(h_k, row)| h_k * row[col]).sum::<f64>()
				+ self.b[col]
		};

		let mut h_new = vec![0.0; out_size];
		let mut c_new = vec![0.0; out_size];
		for (j, h_j, c_j, &c_prev) in izip!(0.., &mut h_new, &mut c_new, &self.c) {
			let i = sigmoid(pre_activation(j));
			let f = sigmoid(pre_activation(out_size + j));
			let c_tilde = pre_activation(2 * out_size + j).tanh();
			let o = sigmoid(pre_activation(3 * out_size + j));

			*c_j = f * c_prev + i * c_tilde;
			*h_j = o * c_j.tanh();
		}

		self.h = h_new;
		self.c = c_new;
		self.h.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_dense_formula() {
		let layer = ReferenceDense::new(&DenseWeights {
			weights: vec![vec![1.0f64, 2.0], vec![-1.0, 0.5]],
			bias: vec![0.5, 0.0],
		});
		assert_eq!(layer.forward(&[1.0, 1.0]), vec![3.5, -0.5]);
	}

	#[test]
	fn test_conv_taps_are_oldest_first() {
		// One channel, three taps, dilation one: y_t = 1·x_{t-2} + 10·x_{t-1} + 100·x_t.
		let mut layer = ReferenceConv1D::new(
			&Conv1DWeights {
				weights: vec![vec![vec![1.0f64, 10.0, 100.0]]],
				bias: vec![0.0],
			},
			1,
		);
		assert_eq!(layer.forward(&[1.0]), vec![100.0]);
		assert_eq!(layer.forward(&[0.0]), vec![10.0]);
		assert_eq!(layer.forward(&[0.0]), vec![1.0]);
		assert_eq!(layer.forward(&[0.0]), vec![0.0]);
	}

	#[test]
	fn test_zero_weight_gru_keeps_zero_state() {
		let mut layer = ReferenceGru::new(&GruWeights {
			w: vec![vec![0.0f64; 6]],
			u: vec![vec![0.0; 6]; 2],
			b: vec![vec![0.0; 6]; 2],
		});
		assert_eq!(layer.forward(&[1.0]), vec![0.0, 0.0]);
	}
}
