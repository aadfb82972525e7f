// Copyright 2025 Irreducible Inc.

use std::arch::x86_64::*;

use crate::arch::lanes::{impl_arith_ops, Lanes};

/// Eight `f32` lanes in an AVX register.
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct F32x8(__m256);

impl_arith_ops!(F32x8, _mm256_add_ps, _mm256_sub_ps, _mm256_mul_ps, _mm256_div_ps);

impl Lanes<f32> for F32x8 {
	const WIDTH: usize = 8;

	#[inline(always)]
	fn load(src: &[f32]) -> Self {
		assert!(src.len() >= Self::WIDTH);
		Self(unsafe { _mm256_loadu_ps(src.as_ptr()) })
	}

	#[inline(always)]
	fn store(self, dst: &mut [f32]) {
		assert!(dst.len() >= Self::WIDTH);
		unsafe { _mm256_storeu_ps(dst.as_mut_ptr(), self.0) }
	}

	#[inline(always)]
	fn splat(val: f32) -> Self {
		Self(unsafe { _mm256_set1_ps(val) })
	}

	#[inline(always)]
	fn min(self, rhs: Self) -> Self {
		Self(unsafe { _mm256_min_ps(self.0, rhs.0) })
	}

	#[inline(always)]
	fn max(self, rhs: Self) -> Self {
		Self(unsafe { _mm256_max_ps(self.0, rhs.0) })
	}

	#[inline(always)]
	fn abs(self) -> Self {
		Self(unsafe { _mm256_andnot_ps(_mm256_set1_ps(-0.0), self.0) })
	}

	#[inline(always)]
	fn round(self) -> Self {
		Self(unsafe { _mm256_cvtepi32_ps(_mm256_cvtps_epi32(self.0)) })
	}

	#[inline(always)]
	fn pow2i(self) -> Self {
		Self(unsafe {
			let biased = _mm256_add_epi32(_mm256_cvtps_epi32(self.0), _mm256_set1_epi32(127));
			_mm256_castsi256_ps(_mm256_slli_epi32::<23>(biased))
		})
	}

	#[inline(always)]
	fn select_lt(self, threshold: Self, if_less: Self, otherwise: Self) -> Self {
		Self(unsafe {
			let mask = _mm256_cmp_ps::<_CMP_LT_OQ>(self.0, threshold.0);
			_mm256_blendv_ps(otherwise.0, if_less.0, mask)
		})
	}

	#[inline(always)]
	fn copysign(self, sign: Self) -> Self {
		Self(unsafe {
			let sign_bit = _mm256_set1_ps(-0.0);
			_mm256_or_ps(_mm256_andnot_ps(sign_bit, self.0), _mm256_and_ps(sign_bit, sign.0))
		})
	}

	#[inline(always)]
	fn reduce_sum(self) -> f32 {
		let mut lanes = [0.0f32; 8];
		self.store(&mut lanes);
		((lanes[0] + lanes[1]) + (lanes[2] + lanes[3]))
			+ ((lanes[4] + lanes[5]) + (lanes[6] + lanes[7]))
	}

	#[inline(always)]
	fn reduce_max(self) -> f32 {
		let mut lanes = [0.0f32; 8];
		self.store(&mut lanes);
		lanes.into_iter().fold(f32::NEG_INFINITY, f32::max)
	}
}

/// Four `f64` lanes in an AVX register.
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct F64x4(__m256d);

impl_arith_ops!(F64x4, _mm256_add_pd, _mm256_sub_pd, _mm256_mul_pd, _mm256_div_pd);

impl Lanes<f64> for F64x4 {
	const WIDTH: usize = 4;

	#[inline(always)]
	fn load(src: &[f64]) -> Self {
		assert!(src.len() >= Self::WIDTH);
		Self(unsafe { _mm256_loadu_pd(src.as_ptr()) })
	}

	#[inline(always)]
	fn store(self, dst: &mut [f64]) {
		assert!(dst.len() >= Self::WIDTH);
		unsafe { _mm256_storeu_pd(dst.as_mut_ptr(), self.0) }
	}

	#[inline(always)]
	fn splat(val: f64) -> Self {
		Self(unsafe { _mm256_set1_pd(val) })
	}

	#[inline(always)]
	fn min(self, rhs: Self) -> Self {
		Self(unsafe { _mm256_min_pd(self.0, rhs.0) })
	}

	#[inline(always)]
	fn max(self, rhs: Self) -> Self {
		Self(unsafe { _mm256_max_pd(self.0, rhs.0) })
	}

	#[inline(always)]
	fn abs(self) -> Self {
		Self(unsafe { _mm256_andnot_pd(_mm256_set1_pd(-0.0), self.0) })
	}

	#[inline(always)]
	fn round(self) -> Self {
		Self(unsafe { _mm256_cvtepi32_pd(_mm256_cvtpd_epi32(self.0)) })
	}

	#[inline(always)]
	fn pow2i(self) -> Self {
		Self(unsafe {
			let exponent = _mm256_cvtepi32_epi64(_mm256_cvtpd_epi32(self.0));
			let biased = _mm256_add_epi64(exponent, _mm256_set1_epi64x(1023));
			_mm256_castsi256_pd(_mm256_slli_epi64::<52>(biased))
		})
	}

	#[inline(always)]
	fn select_lt(self, threshold: Self, if_less: Self, otherwise: Self) -> Self {
		Self(unsafe {
			let mask = _mm256_cmp_pd::<_CMP_LT_OQ>(self.0, threshold.0);
			_mm256_blendv_pd(otherwise.0, if_less.0, mask)
		})
	}

	#[inline(always)]
	fn copysign(self, sign: Self) -> Self {
		Self(unsafe {
			let sign_bit = _mm256_set1_pd(-0.0);
			_mm256_or_pd(_mm256_andnot_pd(sign_bit, self.0), _mm256_and_pd(sign_bit, sign.0))
		})
	}

	#[inline(always)]
	fn reduce_sum(self) -> f64 {
		let mut lanes = [0.0f64; 4];
		self.store(&mut lanes);
		(lanes[0] + lanes[1]) + (lanes[2] + lanes[3])
	}

	#[inline(always)]
	fn reduce_max(self) -> f64 {
		let mut lanes = [0.0f64; 4];
		self.store(&mut lanes);
		lanes[0].max(lanes[1]).max(lanes[2].max(lanes[3]))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_f32x8_tail_padding() {
		let x = F32x8::load_partial(&[1.0, -2.0, 3.0]);
		assert_eq!(x.reduce_sum(), 2.0);
		assert_eq!(x.reduce_max(), 3.0);

		let mut out = [0.0f32; 8];
		x.abs().store(&mut out);
		assert_eq!(out, [1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
	}

	#[test]
	fn test_f64x4_primitives() {
		let x = F64x4::load(&[-0.5, 1.5, 2.5, -1022.0]);
		let mut out = [0.0f64; 4];

		x.round().store(&mut out);
		assert_eq!(out, [-0.0, 2.0, 2.0, -1022.0]);

		F64x4::load(&[0.0, 3.0, -2.0, -1022.0]).pow2i().store(&mut out);
		assert_eq!(out, [1.0, 8.0, 0.25, 2f64.powi(-1022)]);

		x.select_lt(F64x4::splat(0.0), F64x4::splat(-1.0), F64x4::splat(1.0))
			.store(&mut out);
		assert_eq!(out, [-1.0, 1.0, 1.0, -1.0]);
	}
}
