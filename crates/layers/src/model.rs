// Copyright 2025 Irreducible Inc.

use bytemuck::zeroed_slice_box;
use rtnn_kernels::{OptimalKernels, Scalar, VectorKernels};
use rtnn_utils::ensure;
use tracing::{debug, instrument};

use crate::{
	layer::check_positive, Activation, Conv1D, Dense, Error, Gru, Layer, Lstm, ModelConfig,
};

/// Any layer that can be placed in a [`Model`].
#[derive(Debug)]
pub enum ModelLayer<T: Scalar, K: VectorKernels<T> = OptimalKernels> {
	Dense(Dense<T, K>),
	Conv1D(Conv1D<T, K>),
	Gru(Gru<T, K>),
	Lstm(Lstm<T, K>),
	Activation(Activation<T, K>),
}

macro_rules! dispatch {
	($self:expr, $layer:ident => $body:expr) => {
		match $self {
			ModelLayer::Dense($layer) => $body,
			ModelLayer::Conv1D($layer) => $body,
			ModelLayer::Gru($layer) => $body,
			ModelLayer::Lstm($layer) => $body,
			ModelLayer::Activation($layer) => $body,
		}
	};
}

impl<T: Scalar, K: VectorKernels<T>> ModelLayer<T, K> {
	/// A layer of the same shape and type with zero weights in the fresh state.
	pub fn fresh_copy(&self) -> Self {
		match self {
			Self::Dense(layer) => Self::Dense(layer.fresh_copy()),
			Self::Conv1D(layer) => Self::Conv1D(layer.fresh_copy()),
			Self::Gru(layer) => Self::Gru(layer.fresh_copy()),
			Self::Lstm(layer) => Self::Lstm(layer.fresh_copy()),
			Self::Activation(layer) => Self::Activation(layer.fresh_copy()),
		}
	}
}

impl<T: Scalar, K: VectorKernels<T>> Layer<T> for ModelLayer<T, K> {
	fn name(&self) -> &'static str {
		dispatch!(self, layer => Layer::<T>::name(layer))
	}

	fn in_size(&self) -> usize {
		dispatch!(self, layer => Layer::<T>::in_size(layer))
	}

	fn out_size(&self) -> usize {
		dispatch!(self, layer => Layer::<T>::out_size(layer))
	}

	fn reset(&mut self) {
		dispatch!(self, layer => layer.reset())
	}

	#[inline]
	fn forward(&mut self, input: &[T], output: &mut [T]) {
		dispatch!(self, layer => layer.forward(input, output))
	}
}

macro_rules! impl_from_layer {
	($($variant:ident),*) => {
		$(
			impl<T: Scalar, K: VectorKernels<T>> From<$variant<T, K>> for ModelLayer<T, K> {
				fn from(layer: $variant<T, K>) -> Self {
					Self::$variant(layer)
				}
			}
		)*
	};
}

impl_from_layer!(Dense, Conv1D, Gru, Lstm, Activation);

/// A chain of layers evaluated one after another.
///
/// Intermediate results live in two buffers sized for the widest layer output, which the
/// layers write to alternately. Both are allocated while layers are added, so
/// [`Model::forward`] does not allocate.
#[derive(Debug)]
pub struct Model<T: Scalar, K: VectorKernels<T> = OptimalKernels> {
	in_size: usize,
	layers: Vec<ModelLayer<T, K>>,
	ping: Box<[T]>,
	pong: Box<[T]>,
}

impl<T: Scalar, K: VectorKernels<T>> Model<T, K> {
	/// Creates an empty chain, which passes its input through unchanged.
	pub fn new(in_size: usize) -> Result<Self, Error> {
		check_positive("in_size", in_size)?;
		Ok(Self {
			in_size,
			layers: Vec::new(),
			ping: zeroed_slice_box(in_size),
			pong: zeroed_slice_box(in_size),
		})
	}

	/// Builds a chain of zero-weight layers.
	#[instrument(skip_all, level = "debug")]
	pub fn from_config(config: &ModelConfig) -> Result<Self, Error> {
		ensure!(!config.layers.is_empty(), Error::EmptyModel);

		let mut model = Self::new(config.in_size)?;
		for layer in &config.layers {
			model.add_layer(layer.build::<T, K>(model.out_size())?)?;
		}
		debug!(
			in_size = model.in_size,
			out_size = model.out_size(),
			n_layers = model.num_layers(),
			backend = K::NAME,
			"built model from config"
		);
		Ok(model)
	}

	/// Appends a layer to the end of the chain.
	///
	/// Fails if the layer's input width differs from the chain's current output width.
	pub fn add_layer(&mut self, layer: impl Into<ModelLayer<T, K>>) -> Result<(), Error> {
		let layer = layer.into();
		let expected = self.out_size();
		ensure!(
			layer.in_size() == expected,
			Error::LayerSizeMismatch {
				index: self.layers.len(),
				expected,
				actual: layer.in_size(),
			}
		);

		let out_size = layer.out_size();
		if out_size > self.ping.len() {
			self.ping = zeroed_slice_box(out_size);
			self.pong = zeroed_slice_box(out_size);
		}
		debug!(index = self.layers.len(), layer = layer.name(), out_size, "added layer");
		self.layers.push(layer);
		Ok(())
	}

	pub fn in_size(&self) -> usize {
		self.in_size
	}

	/// Output width of the last layer, or the input width for an empty chain.
	pub fn out_size(&self) -> usize {
		self.layers
			.last()
			.map_or(self.in_size, |layer| layer.out_size())
	}

	pub fn num_layers(&self) -> usize {
		self.layers.len()
	}

	pub fn layer(&self, index: usize) -> Option<&ModelLayer<T, K>> {
		self.layers.get(index)
	}

	pub fn layer_mut(&mut self, index: usize) -> Option<&mut ModelLayer<T, K>> {
		self.layers.get_mut(index)
	}

	pub fn layers(&self) -> &[ModelLayer<T, K>] {
		&self.layers
	}

	/// A chain of the same shape with zero weights.
	pub fn fresh_copy(&self) -> Self {
		Self {
			in_size: self.in_size,
			layers: self.layers.iter().map(ModelLayer::fresh_copy).collect(),
			ping: zeroed_slice_box(self.ping.len()),
			pong: zeroed_slice_box(self.pong.len()),
		}
	}

	pub fn reset(&mut self) {
		for layer in &mut self.layers {
			layer.reset();
		}
	}

	/// Runs one input frame through every layer and returns the last layer's output.
	pub fn forward(&mut self, input: &[T]) -> &[T] {
		debug_assert_eq!(input.len(), self.in_size);

		let mut src: &mut [T] = &mut self.ping;
		let mut dst: &mut [T] = &mut self.pong;
		K::copy(input, &mut src[..self.in_size]);

		let mut len = self.in_size;
		for layer in &mut self.layers {
			let out_size = layer.out_size();
			layer.forward(&src[..len], &mut dst[..out_size]);
			std::mem::swap(&mut src, &mut dst);
			len = out_size;
		}

		let output: &[T] = src;
		&output[..len]
	}

	/// Runs one input frame and returns the first element of the output.
	pub fn forward_scalar(&mut self, input: &[T]) -> T {
		self.forward(input)[0]
	}
}
