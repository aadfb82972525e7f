// Copyright 2025 Irreducible Inc.

//! Backend implementations of [`crate::VectorKernels`].
//!
//! [`Portable`] is always compiled. The lane-parallel [`Simd`] backend exists on x86_64 (SSE2
//! baseline, 256-bit lanes when `avx2` is enabled) and on aarch64 with NEON.

use cfg_if::cfg_if;

mod arch_optimal;
mod portable;

pub use arch_optimal::OptimalKernels;
pub use portable::Portable;

cfg_if! {
	if #[cfg(target_arch = "x86_64")] {
		mod x86_64;
		mod lanes;
		mod simd;
		mod simd_math;

		pub use x86_64::{F32Lanes, F64Lanes, m128::{F32x4, F64x2}};
		#[cfg(target_feature = "avx2")]
		pub use x86_64::m256::{F32x8, F64x4};
		pub use lanes::{Lanes, SimdScalar, MAX_LANES};
		pub use simd::Simd;
	} else if #[cfg(all(target_arch = "aarch64", target_feature = "neon"))] {
		mod aarch64;
		mod lanes;
		mod simd;
		mod simd_math;

		pub use aarch64::{F32Lanes, F64Lanes, neon::{F32x4, F64x2}};
		pub use lanes::{Lanes, SimdScalar, MAX_LANES};
		pub use simd::Simd;
	} else {
		/// Marker bound; this target has no SIMD backend.
		pub trait SimdScalar {}

		impl SimdScalar for f32 {}
		impl SimdScalar for f64 {}
	}
}
