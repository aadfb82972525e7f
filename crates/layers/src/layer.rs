// Copyright 2025 Irreducible Inc.

use rtnn_kernels::Scalar;
use rtnn_utils::ensure;

use crate::Error;

/// A neural network layer with fixed input and output widths.
///
/// ## Caller contract
///
/// `forward` must be called with `input.len() == self.in_size()` and
/// `output.len() == self.out_size()`. Mismatched lengths are programming errors; they are
/// caught by debug assertions and never lead to out-of-bounds reads.
pub trait Layer<T: Scalar>: Send {
	/// Short lowercase layer type name, e.g. `"gru"`.
	fn name(&self) -> &'static str;

	fn in_size(&self) -> usize;

	fn out_size(&self) -> usize;

	/// Clears all recurrent state.
	///
	/// After a reset the layer produces exactly the outputs of a freshly constructed layer
	/// with the same weights. Stateless layers do nothing.
	fn reset(&mut self);

	/// Computes one output frame from one input frame.
	fn forward(&mut self, input: &[T], output: &mut [T]);
}

/// History condition of a recurrent layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecurrentState {
	/// Zero history: the layer was just constructed or reset.
	#[default]
	Fresh,
	/// At least one `forward` call since the last reset.
	Running,
}

pub(crate) fn check_positive(arg: &'static str, value: usize) -> Result<(), Error> {
	ensure!(value > 0, Error::ZeroSize { arg });
	Ok(())
}

pub(crate) fn check_len(arg: impl Into<String>, expected: usize, actual: usize) -> Result<(), Error> {
	if expected != actual {
		rtnn_utils::bail!(Error::IncorrectArgumentLength {
			arg: arg.into(),
			expected,
			actual,
		});
	}
	Ok(())
}

/// Checks that `rows` is a `n_rows × n_cols` table.
pub(crate) fn check_table<T, R: AsRef<[T]>>(
	arg: &str,
	rows: &[R],
	n_rows: usize,
	n_cols: usize,
) -> Result<(), Error> {
	check_len(arg, n_rows, rows.len())?;
	for (i, row) in rows.iter().enumerate() {
		check_len(format!("{arg}[{i}]"), n_cols, row.as_ref().len())?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;

	#[test]
	fn test_check_table() {
		let table = [vec![1.0f32, 2.0], vec![3.0, 4.0]];
		assert!(check_table::<f32, _>("w", &table, 2, 2).is_ok());
		assert_matches!(
			check_table::<f32, _>("w", &table, 3, 2),
			Err(Error::IncorrectArgumentLength {
				expected: 3,
				actual: 2,
				..
			})
		);
		assert_matches!(
			check_table::<f32, _>("w", &table, 2, 3),
			Err(Error::IncorrectArgumentLength { arg, .. }) if arg == "w[0]"
		);
	}

	#[test]
	fn test_check_positive() {
		assert!(check_positive("in_size", 1).is_ok());
		assert_matches!(check_positive("in_size", 0), Err(Error::ZeroSize { arg: "in_size" }));
	}
}
