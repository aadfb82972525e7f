// Copyright 2025 Irreducible Inc.

use std::arch::aarch64::*;

use crate::arch::lanes::{impl_arith_ops, Lanes};

/// Four `f32` lanes in a NEON register.
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct F32x4(float32x4_t);

impl_arith_ops!(F32x4, vaddq_f32, vsubq_f32, vmulq_f32, vdivq_f32);

impl Lanes<f32> for F32x4 {
	const WIDTH: usize = 4;

	#[inline(always)]
	fn load(src: &[f32]) -> Self {
		assert!(src.len() >= Self::WIDTH);
		Self(unsafe { vld1q_f32(src.as_ptr()) })
	}

	#[inline(always)]
	fn store(self, dst: &mut [f32]) {
		assert!(dst.len() >= Self::WIDTH);
		unsafe { vst1q_f32(dst.as_mut_ptr(), self.0) }
	}

	#[inline(always)]
	fn splat(val: f32) -> Self {
		Self(unsafe { vdupq_n_f32(val) })
	}

	#[inline(always)]
	fn min(self, rhs: Self) -> Self {
		Self(unsafe { vminq_f32(self.0, rhs.0) })
	}

	#[inline(always)]
	fn max(self, rhs: Self) -> Self {
		Self(unsafe { vmaxq_f32(self.0, rhs.0) })
	}

	#[inline(always)]
	fn abs(self) -> Self {
		Self(unsafe { vabsq_f32(self.0) })
	}

	#[inline(always)]
	fn round(self) -> Self {
		Self(unsafe { vrndnq_f32(self.0) })
	}

	#[inline(always)]
	fn pow2i(self) -> Self {
		Self(unsafe {
			let biased = vaddq_s32(vcvtnq_s32_f32(self.0), vdupq_n_s32(127));
			vreinterpretq_f32_s32(vshlq_n_s32::<23>(biased))
		})
	}

	#[inline(always)]
	fn select_lt(self, threshold: Self, if_less: Self, otherwise: Self) -> Self {
		Self(unsafe { vbslq_f32(vcltq_f32(self.0, threshold.0), if_less.0, otherwise.0) })
	}

	#[inline(always)]
	fn copysign(self, sign: Self) -> Self {
		Self(unsafe { vbslq_f32(vdupq_n_u32(0x8000_0000), sign.0, self.0) })
	}

	#[inline(always)]
	fn reduce_sum(self) -> f32 {
		unsafe { vaddvq_f32(self.0) }
	}

	#[inline(always)]
	fn reduce_max(self) -> f32 {
		unsafe { vmaxvq_f32(self.0) }
	}
}

/// Two `f64` lanes in a NEON register.
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct F64x2(float64x2_t);

impl_arith_ops!(F64x2, vaddq_f64, vsubq_f64, vmulq_f64, vdivq_f64);

impl Lanes<f64> for F64x2 {
	const WIDTH: usize = 2;

	#[inline(always)]
	fn load(src: &[f64]) -> Self {
		assert!(src.len() >= Self::WIDTH);
		Self(unsafe { vld1q_f64(src.as_ptr()) })
	}

	#[inline(always)]
	fn store(self, dst: &mut [f64]) {
		assert!(dst.len() >= Self::WIDTH);
		unsafe { vst1q_f64(dst.as_mut_ptr(), self.0) }
	}

	#[inline(always)]
	fn splat(val: f64) -> Self {
		Self(unsafe { vdupq_n_f64(val) })
	}

	#[inline(always)]
	fn min(self, rhs: Self) -> Self {
		Self(unsafe { vminq_f64(self.0, rhs.0) })
	}

	#[inline(always)]
	fn max(self, rhs: Self) -> Self {
		Self(unsafe { vmaxq_f64(self.0, rhs.0) })
	}

	#[inline(always)]
	fn abs(self) -> Self {
		Self(unsafe { vabsq_f64(self.0) })
	}

	#[inline(always)]
	fn round(self) -> Self {
		Self(unsafe { vrndnq_f64(self.0) })
	}

	#[inline(always)]
	fn pow2i(self) -> Self {
		Self(unsafe {
			let biased = vaddq_s64(vcvtnq_s64_f64(self.0), vdupq_n_s64(1023));
			vreinterpretq_f64_s64(vshlq_n_s64::<52>(biased))
		})
	}

	#[inline(always)]
	fn select_lt(self, threshold: Self, if_less: Self, otherwise: Self) -> Self {
		Self(unsafe { vbslq_f64(vcltq_f64(self.0, threshold.0), if_less.0, otherwise.0) })
	}

	#[inline(always)]
	fn copysign(self, sign: Self) -> Self {
		Self(unsafe { vbslq_f64(vdupq_n_u64(0x8000_0000_0000_0000), sign.0, self.0) })
	}

	#[inline(always)]
	fn reduce_sum(self) -> f64 {
		unsafe { vaddvq_f64(self.0) }
	}

	#[inline(always)]
	fn reduce_max(self) -> f64 {
		unsafe { vmaxvq_f64(self.0) }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_f32x4_primitives() {
		let x = F32x4::load(&[-1.5, 2.5, 3.4, -0.0]);
		let mut out = [0.0f32; 4];

		x.round().store(&mut out);
		assert_eq!(out, [-2.0, 2.0, 3.0, 0.0]);

		F32x4::splat(3.0).copysign(x).store(&mut out);
		assert_eq!(out, [-3.0, 3.0, 3.0, -3.0]);

		F32x4::load(&[0.0, 1.0, -3.0, 10.0]).pow2i().store(&mut out);
		assert_eq!(out, [1.0, 2.0, 0.125, 1024.0]);
	}

	#[test]
	fn test_f64x2_primitives() {
		let x = F64x2::load(&[-2.5, 7.0]);
		assert_eq!(x.reduce_sum(), 4.5);
		assert_eq!(x.reduce_max(), 7.0);

		let mut out = [0.0f64; 2];
		F64x2::load(&[-1022.0, 1023.0]).pow2i().store(&mut out);
		assert_eq!(out, [2f64.powi(-1022), 2f64.powi(1023)]);
	}
}
