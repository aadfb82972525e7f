// Copyright 2025 Irreducible Inc.

use std::arch::x86_64::*;

use crate::arch::lanes::{impl_arith_ops, Lanes};

/// Four `f32` lanes in an SSE register.
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct F32x4(__m128);

impl_arith_ops!(F32x4, _mm_add_ps, _mm_sub_ps, _mm_mul_ps, _mm_div_ps);

impl Lanes<f32> for F32x4 {
	const WIDTH: usize = 4;

	#[inline(always)]
	fn load(src: &[f32]) -> Self {
		assert!(src.len() >= Self::WIDTH);
		Self(unsafe { _mm_loadu_ps(src.as_ptr()) })
	}

	#[inline(always)]
	fn store(self, dst: &mut [f32]) {
		assert!(dst.len() >= Self::WIDTH);
		unsafe { _mm_storeu_ps(dst.as_mut_ptr(), self.0) }
	}

	#[inline(always)]
	fn splat(val: f32) -> Self {
		Self(unsafe { _mm_set1_ps(val) })
	}

	#[inline(always)]
	fn min(self, rhs: Self) -> Self {
		Self(unsafe { _mm_min_ps(self.0, rhs.0) })
	}

	#[inline(always)]
	fn max(self, rhs: Self) -> Self {
		Self(unsafe { _mm_max_ps(self.0, rhs.0) })
	}

	#[inline(always)]
	fn abs(self) -> Self {
		Self(unsafe { _mm_andnot_ps(_mm_set1_ps(-0.0), self.0) })
	}

	#[inline(always)]
	fn round(self) -> Self {
		// The conversion uses the MXCSR rounding mode, which defaults to nearest-even.
		Self(unsafe { _mm_cvtepi32_ps(_mm_cvtps_epi32(self.0)) })
	}

	#[inline(always)]
	fn pow2i(self) -> Self {
		Self(unsafe {
			let biased = _mm_add_epi32(_mm_cvtps_epi32(self.0), _mm_set1_epi32(127));
			_mm_castsi128_ps(_mm_slli_epi32::<23>(biased))
		})
	}

	#[inline(always)]
	fn select_lt(self, threshold: Self, if_less: Self, otherwise: Self) -> Self {
		Self(unsafe {
			let mask = _mm_cmplt_ps(self.0, threshold.0);
			_mm_or_ps(_mm_and_ps(mask, if_less.0), _mm_andnot_ps(mask, otherwise.0))
		})
	}

	#[inline(always)]
	fn copysign(self, sign: Self) -> Self {
		Self(unsafe {
			let sign_bit = _mm_set1_ps(-0.0);
			_mm_or_ps(_mm_andnot_ps(sign_bit, self.0), _mm_and_ps(sign_bit, sign.0))
		})
	}

	#[inline(always)]
	fn reduce_sum(self) -> f32 {
		let mut lanes = [0.0f32; 4];
		self.store(&mut lanes);
		(lanes[0] + lanes[1]) + (lanes[2] + lanes[3])
	}

	#[inline(always)]
	fn reduce_max(self) -> f32 {
		let mut lanes = [0.0f32; 4];
		self.store(&mut lanes);
		lanes[0].max(lanes[1]).max(lanes[2].max(lanes[3]))
	}
}

/// Two `f64` lanes in an SSE register.
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct F64x2(__m128d);

impl_arith_ops!(F64x2, _mm_add_pd, _mm_sub_pd, _mm_mul_pd, _mm_div_pd);

impl Lanes<f64> for F64x2 {
	const WIDTH: usize = 2;

	#[inline(always)]
	fn load(src: &[f64]) -> Self {
		assert!(src.len() >= Self::WIDTH);
		Self(unsafe { _mm_loadu_pd(src.as_ptr()) })
	}

	#[inline(always)]
	fn store(self, dst: &mut [f64]) {
		assert!(dst.len() >= Self::WIDTH);
		unsafe { _mm_storeu_pd(dst.as_mut_ptr(), self.0) }
	}

	#[inline(always)]
	fn splat(val: f64) -> Self {
		Self(unsafe { _mm_set1_pd(val) })
	}

	#[inline(always)]
	fn min(self, rhs: Self) -> Self {
		Self(unsafe { _mm_min_pd(self.0, rhs.0) })
	}

	#[inline(always)]
	fn max(self, rhs: Self) -> Self {
		Self(unsafe { _mm_max_pd(self.0, rhs.0) })
	}

	#[inline(always)]
	fn abs(self) -> Self {
		Self(unsafe { _mm_andnot_pd(_mm_set1_pd(-0.0), self.0) })
	}

	#[inline(always)]
	fn round(self) -> Self {
		Self(unsafe { _mm_cvtepi32_pd(_mm_cvtpd_epi32(self.0)) })
	}

	#[inline(always)]
	fn pow2i(self) -> Self {
		Self(unsafe {
			// Both biased exponents are positive, so zero-extending to 64 bits is exact.
			let biased = _mm_add_epi32(_mm_cvtpd_epi32(self.0), _mm_set1_epi32(1023));
			let widened = _mm_unpacklo_epi32(biased, _mm_setzero_si128());
			_mm_castsi128_pd(_mm_slli_epi64::<52>(widened))
		})
	}

	#[inline(always)]
	fn select_lt(self, threshold: Self, if_less: Self, otherwise: Self) -> Self {
		Self(unsafe {
			let mask = _mm_cmplt_pd(self.0, threshold.0);
			_mm_or_pd(_mm_and_pd(mask, if_less.0), _mm_andnot_pd(mask, otherwise.0))
		})
	}

	#[inline(always)]
	fn copysign(self, sign: Self) -> Self {
		Self(unsafe {
			let sign_bit = _mm_set1_pd(-0.0);
			_mm_or_pd(_mm_andnot_pd(sign_bit, self.0), _mm_and_pd(sign_bit, sign.0))
		})
	}

	#[inline(always)]
	fn reduce_sum(self) -> f64 {
		let mut lanes = [0.0f64; 2];
		self.store(&mut lanes);
		lanes[0] + lanes[1]
	}

	#[inline(always)]
	fn reduce_max(self) -> f64 {
		let mut lanes = [0.0f64; 2];
		self.store(&mut lanes);
		lanes[0].max(lanes[1])
	}
}
