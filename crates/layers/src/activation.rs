// Copyright 2025 Irreducible Inc.

use std::marker::PhantomData;

use getset::CopyGetters;
use rtnn_kernels::{OptimalKernels, Scalar, VectorKernels};

use crate::{layer::check_positive, Error, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationKind {
	Tanh,
	/// `max(x, 0)`
	ReLu,
	Sigmoid,
	Softmax,
}

impl ActivationKind {
	pub const fn name(self) -> &'static str {
		match self {
			Self::Tanh => "tanh",
			Self::ReLu => "relu",
			Self::Sigmoid => "sigmoid",
			Self::Softmax => "softmax",
		}
	}
}

/// Stateless elementwise nonlinearity with equal input and output widths.
#[derive(Debug, CopyGetters)]
pub struct Activation<T: Scalar, K: VectorKernels<T> = OptimalKernels> {
	#[getset(get_copy = "pub")]
	kind: ActivationKind,
	#[getset(get_copy = "pub")]
	size: usize,
	_marker: PhantomData<(T, K)>,
}

impl<T: Scalar, K: VectorKernels<T>> Activation<T, K> {
	pub fn new(kind: ActivationKind, size: usize) -> Result<Self, Error> {
		check_positive("size", size)?;
		Ok(Self {
			kind,
			size,
			_marker: PhantomData,
		})
	}

	pub fn fresh_copy(&self) -> Self {
		Self {
			kind: self.kind,
			size: self.size,
			_marker: PhantomData,
		}
	}
}

impl<T: Scalar, K: VectorKernels<T>> Layer<T> for Activation<T, K> {
	fn name(&self) -> &'static str {
		self.kind.name()
	}

	fn in_size(&self) -> usize {
		self.size
	}

	fn out_size(&self) -> usize {
		self.size
	}

	fn reset(&mut self) {}

	fn forward(&mut self, input: &[T], output: &mut [T]) {
		debug_assert_eq!(input.len(), self.size);
		debug_assert_eq!(output.len(), self.size);

		K::copy(input, output);
		match self.kind {
			ActivationKind::Tanh => K::tanh_inplace(output),
			ActivationKind::ReLu => output.iter_mut().for_each(|x| *x = Scalar::max(*x, T::ZERO)),
			ActivationKind::Sigmoid => K::sigmoid_inplace(output),
			ActivationKind::Softmax => K::softmax_inplace(output),
		}
	}
}
