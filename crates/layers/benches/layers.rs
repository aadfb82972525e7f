// Copyright 2025 Irreducible Inc.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use rtnn_layers::{
	ActivationKind, Conv1D, Dense, Gru, Layer, LayerConfig, Lstm, Model, ModelConfig,
	OptimalKernels, Portable, VectorKernels,
};
use rtnn_test_utils::fixtures::{
	random_vec, Conv1DWeights, DenseWeights, GruWeights, LstmWeights,
};

const SIZES: [usize; 3] = [8, 16, 32];

fn bench_layer<L: Layer<f32>>(c: &mut Criterion, label: String, mut layer: L) {
	let mut rng = StdRng::seed_from_u64(0);
	let input = random_vec::<f32>(&mut rng, layer.in_size(), 1.0);
	let mut output = vec![0.0f32; layer.out_size()];
	c.bench_function(&label, |bench| bench.iter(|| layer.forward(&input, &mut output)));
}

fn bench_backend<K: VectorKernels<f32>>(c: &mut Criterion) {
	let mut rng = StdRng::seed_from_u64(1);
	for size in SIZES {
		let weights = DenseWeights::<f32>::random(&mut rng, size, size);
		let mut dense = Dense::<f32, K>::new(size, size).unwrap();
		dense.set_weights(&weights.weights).unwrap();
		dense.set_bias(&weights.bias).unwrap();
		bench_layer(c, format!("dense/{}/{size}", K::NAME), dense);

		let weights = Conv1DWeights::<f32>::random(&mut rng, size, size, 3);
		let mut conv = Conv1D::<f32, K>::with_dilation(size, size, 3, 2).unwrap();
		conv.set_weights(&weights.weights).unwrap();
		conv.set_bias(&weights.bias).unwrap();
		bench_layer(c, format!("conv1d/{}/{size}", K::NAME), conv);

		let weights = GruWeights::<f32>::random(&mut rng, size, size);
		let mut gru = Gru::<f32, K>::new(size, size).unwrap();
		gru.set_w_vals(&weights.w).unwrap();
		gru.set_u_vals(&weights.u).unwrap();
		gru.set_b_vals(&weights.b).unwrap();
		bench_layer(c, format!("gru/{}/{size}", K::NAME), gru);

		let weights = LstmWeights::<f32>::random(&mut rng, size, size);
		let mut lstm = Lstm::<f32, K>::new(size, size).unwrap();
		lstm.set_w_vals(&weights.w).unwrap();
		lstm.set_u_vals(&weights.u).unwrap();
		lstm.set_b_vals(&weights.b).unwrap();
		bench_layer(c, format!("lstm/{}/{size}", K::NAME), lstm);
	}
}

fn bench_layers(c: &mut Criterion) {
	bench_backend::<Portable>(c);
	if <OptimalKernels as VectorKernels<f32>>::NAME != <Portable as VectorKernels<f32>>::NAME {
		bench_backend::<OptimalKernels>(c);
	}
}

fn bench_model(c: &mut Criterion) {
	let config = ModelConfig::new(1)
		.with_layer(LayerConfig::Conv1D {
			out_size: 8,
			kernel_size: 3,
			dilation: 1,
		})
		.with_layer(LayerConfig::Activation {
			kind: ActivationKind::Tanh,
		})
		.with_layer(LayerConfig::Gru { out_size: 16 })
		.with_layer(LayerConfig::Dense { out_size: 1 });
	let mut model = Model::<f32>::from_config(&config).unwrap();
	c.bench_function("model/conv_gru_dense", |bench| {
		bench.iter(|| model.forward_scalar(&[0.5]))
	});
}

criterion_group!(layers, bench_layers, bench_model);
criterion_main!(layers);
