// Copyright 2025 Irreducible Inc.

use super::{
	lanes::{Lanes, SimdScalar},
	simd_math,
};
use crate::{Scalar, VectorKernels};

type LanesOf<T> = <T as SimdScalar>::Lanes;

/// Lane-parallel backend.
///
/// Each slice is processed in chunks of the target's lane width. The tail that does not fill a
/// register goes through a zero-padded stack buffer, so every element sees the same lane
/// algorithm and nothing is heap-allocated.
#[derive(Debug, Default, Clone, Copy)]
pub struct Simd;

#[inline(always)]
fn width<T: Scalar>() -> usize {
	<LanesOf<T> as Lanes<T>>::WIDTH
}

#[inline(always)]
fn map_inplace<T: Scalar>(x: &mut [T], f: impl Fn(LanesOf<T>) -> LanesOf<T>) {
	let mut chunks = x.chunks_exact_mut(width::<T>());
	for chunk in &mut chunks {
		f(LanesOf::<T>::load(chunk)).store(chunk);
	}

	let tail = chunks.into_remainder();
	if !tail.is_empty() {
		f(LanesOf::<T>::load_partial(tail)).store_partial(tail);
	}
}

#[inline(always)]
fn zip_map<T: Scalar>(
	a: &[T],
	b: &[T],
	out: &mut [T],
	f: impl Fn(LanesOf<T>, LanesOf<T>) -> LanesOf<T>,
) {
	debug_assert_eq!(a.len(), b.len());
	debug_assert_eq!(a.len(), out.len());

	let width = width::<T>();
	let split = out.len() - out.len() % width;
	let (a_body, a_tail) = a.split_at(split);
	let (b_body, b_tail) = b.split_at(split);
	let (out_body, out_tail) = out.split_at_mut(split);

	for ((a, b), out) in a_body
		.chunks_exact(width)
		.zip(b_body.chunks_exact(width))
		.zip(out_body.chunks_exact_mut(width))
	{
		f(LanesOf::<T>::load(a), LanesOf::<T>::load(b)).store(out);
	}

	if !out_tail.is_empty() {
		f(LanesOf::<T>::load_partial(a_tail), LanesOf::<T>::load_partial(b_tail))
			.store_partial(out_tail);
	}
}

#[inline(always)]
fn zip_map_inplace<T: Scalar>(
	acc: &mut [T],
	x: &[T],
	f: impl Fn(LanesOf<T>, LanesOf<T>) -> LanesOf<T>,
) {
	debug_assert_eq!(acc.len(), x.len());

	let width = width::<T>();
	let split = acc.len() - acc.len() % width;
	let (acc_body, acc_tail) = acc.split_at_mut(split);
	let (x_body, x_tail) = x.split_at(split);

	for (acc, x) in acc_body
		.chunks_exact_mut(width)
		.zip(x_body.chunks_exact(width))
	{
		f(LanesOf::<T>::load(acc), LanesOf::<T>::load(x)).store(acc);
	}

	if !acc_tail.is_empty() {
		f(LanesOf::<T>::load_partial(acc_tail), LanesOf::<T>::load_partial(x_tail))
			.store_partial(acc_tail);
	}
}

impl<T: Scalar> VectorKernels<T> for Simd {
	const NAME: &'static str = "simd";

	#[inline]
	fn dot(a: &[T], b: &[T]) -> T {
		debug_assert_eq!(a.len(), b.len());

		let width = width::<T>();
		let a_chunks = a.chunks_exact(width);
		let b_chunks = b.chunks_exact(width);
		let (a_tail, b_tail) = (a_chunks.remainder(), b_chunks.remainder());

		let mut acc = LanesOf::<T>::splat(T::ZERO);
		for (a, b) in a_chunks.zip(b_chunks) {
			acc = acc + LanesOf::<T>::load(a) * LanesOf::<T>::load(b);
		}
		if !a_tail.is_empty() {
			// Padding lanes are zero on both sides and contribute nothing.
			acc = acc + LanesOf::<T>::load_partial(a_tail) * LanesOf::<T>::load_partial(b_tail);
		}
		acc.reduce_sum()
	}

	#[inline]
	fn add(a: &[T], b: &[T], out: &mut [T]) {
		zip_map(a, b, out, |a, b| a + b);
	}

	#[inline]
	fn sub(a: &[T], b: &[T], out: &mut [T]) {
		zip_map(a, b, out, |a, b| a - b);
	}

	#[inline]
	fn mul(a: &[T], b: &[T], out: &mut [T]) {
		zip_map(a, b, out, |a, b| a * b);
	}

	#[inline]
	fn add_assign(acc: &mut [T], x: &[T]) {
		zip_map_inplace(acc, x, |acc, x| acc + x);
	}

	#[inline]
	fn mul_assign(acc: &mut [T], x: &[T]) {
		zip_map_inplace(acc, x, |acc, x| acc * x);
	}

	#[inline]
	fn sigmoid_inplace(x: &mut [T]) {
		map_inplace(x, simd_math::sigmoid::<T>);
	}

	#[inline]
	fn tanh_inplace(x: &mut [T]) {
		map_inplace(x, simd_math::tanh::<T>);
	}

	#[inline]
	fn softmax_inplace(x: &mut [T]) {
		let Some(&first) = x.first() else {
			return;
		};
		let width = width::<T>();

		let mut chunks = x.chunks_exact(width);
		let mut max_lanes = LanesOf::<T>::splat(first);
		for chunk in &mut chunks {
			max_lanes = max_lanes.max(LanesOf::<T>::load(chunk));
		}
		let max = chunks
			.remainder()
			.iter()
			.fold(max_lanes.reduce_max(), |max, &x_i| max.max(x_i));
		let max_lanes = LanesOf::<T>::splat(max);

		let mut sum_lanes = LanesOf::<T>::splat(T::ZERO);
		let mut chunks = x.chunks_exact_mut(width);
		for chunk in &mut chunks {
			let exps = simd_math::exp::<T>(LanesOf::<T>::load(chunk) - max_lanes);
			exps.store(chunk);
			sum_lanes = sum_lanes + exps;
		}
		let mut exp_sum = sum_lanes.reduce_sum();

		let tail = chunks.into_remainder();
		if !tail.is_empty() {
			simd_math::exp::<T>(LanesOf::<T>::load_partial(tail) - max_lanes).store_partial(tail);
			for &e in tail.iter() {
				exp_sum += e;
			}
		}

		let exp_sum = LanesOf::<T>::splat(exp_sum);
		map_inplace(x, |e| e / exp_sum);
	}
}
