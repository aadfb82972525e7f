// Copyright 2025 Irreducible Inc.

use std::ops::{Index, IndexMut};

use bytemuck::zeroed_slice_box;
use getset::CopyGetters;
use rtnn_utils::{bail, ensure};

use super::error::Error;
use crate::{Scalar, VectorKernels};

/// A dense row-major matrix with a fixed shape.
///
/// The element buffer is allocated once, zeroed, when the matrix is created. Row loads and
/// matrix-vector products never reallocate it.
#[derive(Debug, PartialEq, CopyGetters)]
pub struct Matrix<T: Scalar> {
	#[getset(get_copy = "pub")]
	n_rows: usize,
	#[getset(get_copy = "pub")]
	n_cols: usize,
	elements: Box<[T]>,
}

impl<T: Scalar> Matrix<T> {
	pub fn new(n_rows: usize, n_cols: usize, elements: &[T]) -> Result<Self, Error> {
		if elements.len() != n_rows * n_cols {
			bail!(Error::IncorrectArgumentLength {
				arg: "elements".into(),
				expected: n_rows * n_cols,
				actual: elements.len(),
			});
		}
		Ok(Self {
			n_rows,
			n_cols,
			elements: elements.into(),
		})
	}

	pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
		Self {
			n_rows,
			n_cols,
			elements: zeroed_slice_box(n_rows * n_cols),
		}
	}

	pub fn dim(&self) -> (usize, usize) {
		(self.n_rows, self.n_cols)
	}

	pub fn elements(&self) -> &[T] {
		&self.elements
	}

	pub fn row(&self, i: usize) -> &[T] {
		assert!(i < self.n_rows);
		&self.elements[i * self.n_cols..(i + 1) * self.n_cols]
	}

	pub fn row_mut(&mut self, i: usize) -> &mut [T] {
		assert!(i < self.n_rows);
		&mut self.elements[i * self.n_cols..(i + 1) * self.n_cols]
	}

	/// Overwrites row `i` with `values`.
	pub fn set_row(&mut self, i: usize, values: &[T]) -> Result<(), Error> {
		ensure!(
			values.len() == self.n_cols,
			Error::IncorrectArgumentLength {
				arg: format!("row {i}"),
				expected: self.n_cols,
				actual: values.len(),
			}
		);
		self.row_mut(i).copy_from_slice(values);
		Ok(())
	}

	pub fn fill(&mut self, value: T) {
		self.elements.fill(value);
	}

	/// Computes `y = self · x` with one kernel dot product per row.
	///
	/// ## Preconditions
	///
	/// * `x.len() == self.n_cols()`
	/// * `y.len() == self.n_rows()`
	#[inline]
	pub fn mul_vec_into<K: VectorKernels<T>>(&self, x: &[T], y: &mut [T]) {
		debug_assert_eq!(self.n_cols, x.len());
		debug_assert_eq!(self.n_rows, y.len());

		if self.n_cols == 0 {
			y.fill(T::ZERO);
			return;
		}
		for (y_i, row) in y.iter_mut().zip(self.elements.chunks_exact(self.n_cols)) {
			*y_i = K::dot(row, x);
		}
	}
}

impl<T: Scalar> Index<(usize, usize)> for Matrix<T> {
	type Output = T;

	fn index(&self, index: (usize, usize)) -> &Self::Output {
		let (i, j) = index;
		assert!(i < self.n_rows);
		assert!(j < self.n_cols);
		&self.elements[i * self.n_cols + j]
	}
}

impl<T: Scalar> IndexMut<(usize, usize)> for Matrix<T> {
	fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
		let (i, j) = index;
		assert!(i < self.n_rows);
		assert!(j < self.n_cols);
		&mut self.elements[i * self.n_cols + j]
	}
}
