// Copyright 2025 Irreducible Inc.

use cfg_if::cfg_if;

cfg_if! {
	if #[cfg(all(
		not(feature = "portable_only"),
		any(target_arch = "x86_64", all(target_arch = "aarch64", target_feature = "neon"))
	))] {
		/// The fastest backend available for the build target.
		pub type OptimalKernels = super::Simd;
	} else {
		/// The fastest backend available for the build target.
		pub type OptimalKernels = super::Portable;
	}
}
