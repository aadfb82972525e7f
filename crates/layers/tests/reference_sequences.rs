// Copyright 2025 Irreducible Inc.

//! Layer outputs over long input sequences against the formula-level references.

use rand::{rngs::StdRng, SeedableRng};
use rtnn_layers::{Conv1D, Dense, Gru, Layer, Lstm, Model};
use rtnn_test_utils::{
	fixtures::{
		random_rows, test_signal, Conv1DWeights, DenseWeights, GruWeights, LstmWeights,
		WEIGHT_SCALE,
	},
	reference::{
		run_scalar_sequence, ReferenceConv1D, ReferenceDense, ReferenceGru, ReferenceLstm,
	},
	tolerance::compare_sequences,
};

const N_STEPS: usize = 1000;

fn run_layer(layer: &mut impl Layer<f64>, inputs: &[Vec<f64>]) -> Vec<f64> {
	let mut out = vec![0.0; layer.out_size()];
	inputs
		.iter()
		.flat_map(|x| {
			layer.forward(x, &mut out);
			out.clone()
		})
		.collect()
}

fn check(actual: &[f64], expected: &[f64], threshold: f64) {
	let report = compare_sequences(actual, expected, threshold);
	assert!(
		report.passed(),
		"{} samples above {threshold}, max error {}",
		report.n_errors,
		report.max_error
	);
}

#[test]
fn test_dense_matches_reference() {
	let mut rng = StdRng::seed_from_u64(0);
	let weights = DenseWeights::<f64>::random(&mut rng, 13, 7);
	let mut layer = Dense::<f64>::new(13, 7).unwrap();
	layer.set_weights(&weights.weights).unwrap();
	layer.set_bias(&weights.bias).unwrap();

	let inputs = random_rows::<f64>(&mut rng, 200, 13, 2.0);
	let reference = ReferenceDense::new(&weights);
	let expected = inputs
		.iter()
		.flat_map(|x| reference.forward(x))
		.collect::<Vec<_>>();
	check(&run_layer(&mut layer, &inputs), &expected, 2e-8);
}

#[test]
fn test_conv1d_matches_reference() {
	let mut rng = StdRng::seed_from_u64(1);
	for (kernel_size, dilation) in [(1, 1), (3, 1), (4, 2), (2, 5)] {
		let weights = Conv1DWeights::<f64>::random(&mut rng, 3, 5, kernel_size);
		let mut layer = Conv1D::<f64>::with_dilation(3, 5, kernel_size, dilation).unwrap();
		layer.set_weights(&weights.weights).unwrap();
		layer.set_bias(&weights.bias).unwrap();

		let inputs = random_rows::<f64>(&mut rng, 300, 3, 1.0);
		let mut reference = ReferenceConv1D::new(&weights, dilation);
		let expected = inputs
			.iter()
			.flat_map(|x| reference.forward(x))
			.collect::<Vec<_>>();
		check(&run_layer(&mut layer, &inputs), &expected, 1e-6);
	}
}

#[test]
fn test_gru_matches_reference() {
	rtnn_utils::tracing::init_tracing();
	let mut rng = StdRng::seed_from_u64(2);
	let gru_weights = GruWeights::<f64>::random(&mut rng, 1, 8);
	let dense_weights = DenseWeights::<f64>::random(&mut rng, 8, 1);

	let mut gru = Gru::<f64>::new(1, 8).unwrap();
	gru.set_w_vals(&gru_weights.w).unwrap();
	gru.set_u_vals(&gru_weights.u).unwrap();
	gru.set_b_vals(&gru_weights.b).unwrap();
	let mut dense = Dense::<f64>::new(8, 1).unwrap();
	dense.set_weights(&dense_weights.weights).unwrap();
	dense.set_bias(&dense_weights.bias).unwrap();

	let mut model = Model::<f64>::new(1).unwrap();
	model.add_layer(gru).unwrap();
	model.add_layer(dense).unwrap();
	model.reset();

	let xs = test_signal::<f64>(N_STEPS);
	let mut reference_gru = ReferenceGru::new(&gru_weights);
	let reference_dense = ReferenceDense::new(&dense_weights);
	let expected =
		run_scalar_sequence(|x| reference_dense.forward(&reference_gru.forward(x)), &xs);
	let actual = xs
		.iter()
		.map(|&x| model.forward_scalar(&[x]))
		.collect::<Vec<_>>();
	check(&actual, &expected, 5e-6);
}

#[test]
fn test_lstm_matches_reference() {
	rtnn_utils::tracing::init_tracing();
	let mut rng = StdRng::seed_from_u64(3);
	let lstm_weights = LstmWeights::<f64>::random(&mut rng, 1, 8);
	let dense_weights = DenseWeights::<f64>::random(&mut rng, 8, 1);

	let mut lstm = Lstm::<f64>::new(1, 8).unwrap();
	lstm.set_w_vals(&lstm_weights.w).unwrap();
	lstm.set_u_vals(&lstm_weights.u).unwrap();
	lstm.set_b_vals(&lstm_weights.b).unwrap();
	let mut dense = Dense::<f64>::new(8, 1).unwrap();
	dense.set_weights(&dense_weights.weights).unwrap();
	dense.set_bias(&dense_weights.bias).unwrap();

	let mut model = Model::<f64>::new(1).unwrap();
	model.add_layer(lstm).unwrap();
	model.add_layer(dense).unwrap();
	model.reset();

	let xs = test_signal::<f64>(N_STEPS);
	let mut reference_lstm = ReferenceLstm::new(&lstm_weights);
	let reference_dense = ReferenceDense::new(&dense_weights);
	let expected =
		run_scalar_sequence(|x| reference_dense.forward(&reference_lstm.forward(x)), &xs);
	let actual = xs
		.iter()
		.map(|&x| model.forward_scalar(&[x]))
		.collect::<Vec<_>>();
	check(&actual, &expected, 1e-6);
}

#[test]
fn test_wide_recurrent_layers_match_reference() {
	let mut rng = StdRng::seed_from_u64(4);
	let inputs = random_rows::<f64>(&mut rng, 200, 5, WEIGHT_SCALE);

	let gru_weights = GruWeights::<f64>::random(&mut rng, 5, 11);
	let mut gru = Gru::<f64>::new(5, 11).unwrap();
	gru.set_w_vals(&gru_weights.w).unwrap();
	gru.set_u_vals(&gru_weights.u).unwrap();
	gru.set_b_vals(&gru_weights.b).unwrap();
	let mut reference_gru = ReferenceGru::new(&gru_weights);
	let expected = inputs
		.iter()
		.flat_map(|x| reference_gru.forward(x))
		.collect::<Vec<_>>();
	check(&run_layer(&mut gru, &inputs), &expected, 5e-6);

	let lstm_weights = LstmWeights::<f64>::random(&mut rng, 5, 11);
	let mut lstm = Lstm::<f64>::new(5, 11).unwrap();
	lstm.set_w_vals(&lstm_weights.w).unwrap();
	lstm.set_u_vals(&lstm_weights.u).unwrap();
	lstm.set_b_vals(&lstm_weights.b).unwrap();
	let mut reference_lstm = ReferenceLstm::new(&lstm_weights);
	let expected = inputs
		.iter()
		.flat_map(|x| reference_lstm.forward(x))
		.collect::<Vec<_>>();
	check(&run_layer(&mut lstm, &inputs), &expected, 1e-6);
}

#[test]
fn test_f32_gru_tracks_f64_reference() {
	let mut rng = StdRng::seed_from_u64(5);
	let weights = GruWeights::<f32>::random(&mut rng, 1, 8);
	let mut gru = Gru::<f32>::new(1, 8).unwrap();
	gru.set_w_vals(&weights.w).unwrap();
	gru.set_u_vals(&weights.u).unwrap();
	gru.set_b_vals(&weights.b).unwrap();

	let xs = test_signal::<f32>(N_STEPS);
	let mut reference = ReferenceGru::new(&weights);
	let mut out = [0.0f32; 8];
	for &x in &xs {
		gru.forward(&[x], &mut out);
		let expected = reference.forward(&[x as f64]);
		let actual = out.iter().map(|&v| v as f64).collect::<Vec<_>>();
		check(&actual, &expected, 1e-4);
	}
}
