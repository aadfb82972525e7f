// Copyright 2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("argument {arg} does not have expected length {expected} (got {actual})")]
	IncorrectArgumentLength {
		arg: String,
		expected: usize,
		actual: usize,
	},
}
