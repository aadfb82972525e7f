// Copyright 2025 Irreducible Inc.

use rtnn_kernels::{Scalar, VectorKernels};

use crate::{Activation, ActivationKind, Conv1D, Dense, Error, Gru, Lstm, ModelLayer};

/// Shape of one layer in a [`ModelConfig`]. The input width is that of the preceding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerConfig {
	Dense {
		out_size: usize,
	},
	Conv1D {
		out_size: usize,
		kernel_size: usize,
		dilation: usize,
	},
	Gru {
		out_size: usize,
	},
	Lstm {
		out_size: usize,
	},
	Activation {
		kind: ActivationKind,
	},
}

impl LayerConfig {
	/// Builds the zero-weight layer this descriptor names.
	pub fn build<T: Scalar, K: VectorKernels<T>>(
		&self,
		in_size: usize,
	) -> Result<ModelLayer<T, K>, Error> {
		let layer = match *self {
			Self::Dense { out_size } => Dense::new(in_size, out_size)?.into(),
			Self::Conv1D {
				out_size,
				kernel_size,
				dilation,
			} => Conv1D::with_dilation(in_size, out_size, kernel_size, dilation)?.into(),
			Self::Gru { out_size } => Gru::new(in_size, out_size)?.into(),
			Self::Lstm { out_size } => Lstm::new(in_size, out_size)?.into(),
			Self::Activation { kind } => Activation::new(kind, in_size)?.into(),
		};
		Ok(layer)
	}
}

/// Shape of a layer chain, without weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
	pub in_size: usize,
	pub layers: Vec<LayerConfig>,
}

impl ModelConfig {
	pub fn new(in_size: usize) -> Self {
		Self {
			in_size,
			layers: Vec::new(),
		}
	}

	pub fn with_layer(mut self, layer: LayerConfig) -> Self {
		self.layers.push(layer);
		self
	}
}
