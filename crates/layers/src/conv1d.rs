// Copyright 2025 Irreducible Inc.

use bytemuck::zeroed_slice_box;
use getset::CopyGetters;
use rtnn_kernels::{Matrix, OptimalKernels, Scalar, VectorKernels};
use tracing::debug;

use crate::{
	layer::{check_len, check_positive, check_table},
	Dense, Error, Layer,
};

/// Causal 1-D convolution over a stream of input frames.
///
/// The layer keeps the last `(kernel_size - 1) · dilation + 1` input frames in a ring buffer.
/// Each `forward` call pushes one frame, gathers the `kernel_size` frames of the receptive
/// field into a flat window ordered oldest to newest, and runs a dense layer of width
/// `kernel_size · in_size` over it. Tap `j` reads the frame `(kernel_size - 1 - j) · dilation`
/// steps behind the newest one, so tap 0 is the oldest.
#[derive(Debug, CopyGetters)]
pub struct Conv1D<T: Scalar, K: VectorKernels<T> = OptimalKernels> {
	#[getset(get_copy = "pub")]
	in_size: usize,
	#[getset(get_copy = "pub")]
	out_size: usize,
	#[getset(get_copy = "pub")]
	kernel_size: usize,
	#[getset(get_copy = "pub")]
	dilation: usize,
	/// Weights laid out tap-major: column `j · in_size + i` is channel `i` of tap `j`.
	dense: Dense<T, K>,
	/// One frame per row.
	history: Matrix<T>,
	/// Row the next frame is written to.
	write_pos: usize,
	window: Box<[T]>,
}

impl<T: Scalar, K: VectorKernels<T>> Conv1D<T, K> {
	/// Creates a convolution with dilation 1 and zero weights.
	pub fn new(in_size: usize, out_size: usize, kernel_size: usize) -> Result<Self, Error> {
		Self::with_dilation(in_size, out_size, kernel_size, 1)
	}

	pub fn with_dilation(
		in_size: usize,
		out_size: usize,
		kernel_size: usize,
		dilation: usize,
	) -> Result<Self, Error> {
		check_positive("in_size", in_size)?;
		check_positive("out_size", out_size)?;
		check_positive("kernel_size", kernel_size)?;
		check_positive("dilation", dilation)?;
		debug!(in_size, out_size, kernel_size, dilation, "created conv1d layer");
		Ok(Self::zeroed(in_size, out_size, kernel_size, dilation))
	}

	fn zeroed(in_size: usize, out_size: usize, kernel_size: usize, dilation: usize) -> Self {
		let n_frames = (kernel_size - 1) * dilation + 1;
		Self {
			in_size,
			out_size,
			kernel_size,
			dilation,
			dense: Dense::zeroed(kernel_size * in_size, out_size),
			history: Matrix::zeros(n_frames, in_size),
			write_pos: 0,
			window: zeroed_slice_box(kernel_size * in_size),
		}
	}

	/// A layer of the same shape with zero weights and empty history.
	pub fn fresh_copy(&self) -> Self {
		Self::zeroed(self.in_size, self.out_size, self.kernel_size, self.dilation)
	}

	/// Number of past frames the layer remembers, the newest included.
	pub fn receptive_field(&self) -> usize {
		self.history.n_rows()
	}

	/// Loads weights given as `weights[out][in][tap]`, tap 0 being the oldest frame.
	pub fn set_weights<W, R>(&mut self, weights: &[W]) -> Result<(), Error>
	where
		W: AsRef<[R]>,
		R: AsRef<[T]>,
	{
		check_len("weights", self.out_size, weights.len())?;
		for (o, per_input) in weights.iter().enumerate() {
			check_table(&format!("weights[{o}]"), per_input.as_ref(), self.in_size, self.kernel_size)?;
		}

		let in_size = self.in_size;
		let dense_weights = self.dense.weights_mut();
		for (o, per_input) in weights.iter().enumerate() {
			for (i, taps) in per_input.as_ref().iter().enumerate() {
				for (j, &w) in taps.as_ref().iter().enumerate() {
					dense_weights[(o, j * in_size + i)] = w;
				}
			}
		}
		debug!(out_size = self.out_size, "loaded conv1d weights");
		Ok(())
	}

	pub fn set_bias(&mut self, bias: &[T]) -> Result<(), Error> {
		self.dense.set_bias(bias)
	}

	/// Weight of input channel `i` at tap `tap` for output channel `o`.
	pub fn weight(&self, o: usize, i: usize, tap: usize) -> T {
		assert!(i < self.in_size);
		self.dense.weight(o, tap * self.in_size + i)
	}

	pub fn bias(&self, o: usize) -> T {
		self.dense.bias(o)
	}
}

impl<T: Scalar, K: VectorKernels<T>> Layer<T> for Conv1D<T, K> {
	fn name(&self) -> &'static str {
		"conv1d"
	}

	fn in_size(&self) -> usize {
		self.in_size
	}

	fn out_size(&self) -> usize {
		self.out_size
	}

	fn reset(&mut self) {
		self.history.fill(T::ZERO);
		self.write_pos = 0;
	}

	fn forward(&mut self, input: &[T], output: &mut [T]) {
		debug_assert_eq!(input.len(), self.in_size);
		debug_assert_eq!(output.len(), self.out_size);

		let n_frames = self.history.n_rows();
		let newest = self.write_pos;
		K::copy(input, self.history.row_mut(newest));
		self.write_pos = (newest + 1) % n_frames;

		for (j, slot) in self.window.chunks_exact_mut(self.in_size).enumerate() {
			let behind = (self.kernel_size - 1 - j) * self.dilation;
			let frame = (newest + n_frames - behind) % n_frames;
			K::copy(self.history.row(frame), slot);
		}

		self.dense.forward(&self.window, output);
	}
}
