// Copyright 2025 Irreducible Inc.

use crate::env::boolean_env_flag_set;

/// Environment flag that switches the log output to a compact single-line format.
pub const COMPACT_LOG_FLAG: &str = "RTNN_COMPACT_LOG";

/// Installs a global `tracing` subscriber that prints events filtered by `RUST_LOG`.
///
/// Calling this more than once is harmless; later calls are ignored. Layers only log while they
/// are built and configured, never from `forward` or `reset`.
pub fn init_tracing() {
	use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

	if boolean_env_flag_set(COMPACT_LOG_FLAG) {
		let _ = tracing_subscriber::registry()
			.with(filter)
			.with(tracing_subscriber::fmt::layer().compact())
			.try_init();
	} else {
		let _ = tracing_subscriber::registry()
			.with(filter)
			.with(tracing_subscriber::fmt::layer())
			.try_init();
	}
}
