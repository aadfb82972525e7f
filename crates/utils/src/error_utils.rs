// Copyright 2025 Irreducible Inc.

/// Returns early with the given error converted via `Into`.
///
/// With the `bail_panic` feature enabled the macro panics instead, which gives a backtrace at
/// the exact configuration call that went wrong.
#[cfg(feature = "bail_panic")]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		panic!("{}", $err);
	};
}

/// Returns early with the given error converted via `Into`.
#[cfg(not(feature = "bail_panic"))]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into());
	};
}

#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}
