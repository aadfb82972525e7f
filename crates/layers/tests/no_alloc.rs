// Copyright 2025 Irreducible Inc.

//! `forward` and `reset` must not touch the heap once a model is built.

use std::{
	alloc::{GlobalAlloc, Layout, System},
	cell::Cell,
};

use rand::{rngs::StdRng, SeedableRng};
use rtnn_layers::{ActivationKind, LayerConfig, Model, ModelConfig, ModelLayer};
use rtnn_test_utils::fixtures::{
	test_signal, Conv1DWeights, DenseWeights, GruWeights, LstmWeights,
};

struct CountingAllocator;

thread_local! {
	static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for CountingAllocator {
	unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
		ALLOCATIONS.with(|count| count.set(count.get() + 1));
		unsafe { System.alloc(layout) }
	}

	unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
		unsafe { System.dealloc(ptr, layout) }
	}

	unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
		ALLOCATIONS.with(|count| count.set(count.get() + 1));
		unsafe { System.realloc(ptr, layout, new_size) }
	}
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

fn allocations_on_this_thread() -> usize {
	ALLOCATIONS.with(Cell::get)
}

fn configured_model() -> Model<f32> {
	let config = ModelConfig::new(1)
		.with_layer(LayerConfig::Conv1D {
			out_size: 4,
			kernel_size: 3,
			dilation: 2,
		})
		.with_layer(LayerConfig::Lstm { out_size: 8 })
		.with_layer(LayerConfig::Gru { out_size: 8 })
		.with_layer(LayerConfig::Activation {
			kind: ActivationKind::Softmax,
		})
		.with_layer(LayerConfig::Dense { out_size: 1 });
	let mut model = Model::<f32>::from_config(&config).unwrap();

	let mut rng = StdRng::seed_from_u64(0);
	for index in 0..model.num_layers() {
		match model.layer_mut(index) {
			Some(ModelLayer::Conv1D(conv)) => {
				let weights = Conv1DWeights::random(&mut rng, conv.in_size(), 4, 3);
				conv.set_weights(&weights.weights).unwrap();
				conv.set_bias(&weights.bias).unwrap();
			}
			Some(ModelLayer::Lstm(lstm)) => {
				let weights = LstmWeights::random(&mut rng, lstm.in_size(), lstm.out_size());
				lstm.set_w_vals(&weights.w).unwrap();
				lstm.set_u_vals(&weights.u).unwrap();
				lstm.set_b_vals(&weights.b).unwrap();
			}
			Some(ModelLayer::Gru(gru)) => {
				let weights = GruWeights::random(&mut rng, gru.in_size(), gru.out_size());
				gru.set_w_vals(&weights.w).unwrap();
				gru.set_u_vals(&weights.u).unwrap();
				gru.set_b_vals(&weights.b).unwrap();
			}
			Some(ModelLayer::Dense(dense)) => {
				let weights = DenseWeights::random(&mut rng, dense.in_size(), dense.out_size());
				dense.set_weights(&weights.weights).unwrap();
				dense.set_bias(&weights.bias).unwrap();
			}
			_ => {}
		}
	}
	model
}

#[test]
fn test_forward_and_reset_do_not_allocate() {
	let mut model = configured_model();
	let xs = test_signal::<f32>(100);
	let mut outputs = vec![0.0f32; xs.len()];

	let before = allocations_on_this_thread();
	for (x, y) in xs.iter().zip(outputs.iter_mut()) {
		*y = model.forward_scalar(&[*x]);
	}
	model.reset();
	for (x, y) in xs.iter().zip(outputs.iter_mut()) {
		*y += model.forward_scalar(&[*x]);
	}
	model.reset();
	let after = allocations_on_this_thread();

	assert_eq!(after - before, 0, "forward/reset allocated {} times", after - before);
	assert!(outputs.iter().all(|y| y.is_finite()));
}

#[test]
fn test_counter_sees_allocations() {
	let before = allocations_on_this_thread();
	let buffer = std::hint::black_box(vec![0u8; 64]);
	assert!(allocations_on_this_thread() > before);
	drop(buffer);
}
