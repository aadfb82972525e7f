// Copyright 2025 Irreducible Inc.

use cfg_if::cfg_if;

// SSE2 is part of the x86_64 baseline, so 128-bit lanes are always available.
pub mod m128;
#[cfg(target_feature = "avx2")]
pub mod m256;

cfg_if! {
	if #[cfg(target_feature = "avx2")] {
		pub type F32Lanes = m256::F32x8;
		pub type F64Lanes = m256::F64x4;
	} else {
		pub type F32Lanes = m128::F32x4;
		pub type F64Lanes = m128::F64x2;
	}
}
