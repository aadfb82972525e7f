// Copyright 2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("argument {arg} must be positive")]
	ZeroSize { arg: &'static str },
	#[error("argument {arg} does not have expected length {expected} (got {actual})")]
	IncorrectArgumentLength {
		arg: String,
		expected: usize,
		actual: usize,
	},
	#[error("layer {index} takes {actual} inputs but the preceding layer produces {expected}")]
	LayerSizeMismatch {
		index: usize,
		expected: usize,
		actual: usize,
	},
	#[error("a model needs at least one layer")]
	EmptyModel,
	#[error("{0}")]
	KernelError(#[from] rtnn_kernels::Error),
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;

	#[test]
	fn test_kernel_error_converts() {
		let err: Error = rtnn_kernels::Error::IncorrectArgumentLength {
			arg: "row 0".into(),
			expected: 3,
			actual: 2,
		}
		.into();
		assert_matches!(
			&err,
			Error::KernelError(rtnn_kernels::Error::IncorrectArgumentLength { expected: 3, .. })
		);
		assert_eq!(
			err.to_string(),
			"argument row 0 does not have expected length 3 (got 2)"
		);
	}
}
