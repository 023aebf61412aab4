// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **DenseMatrix** - *Column-major owned matrix buffer*
//!
//! The unit of exchange between the marshaling layer and the numerical kernels.
//! Element `(i, j)` lives at `data[i + rows * j]`, matching the BLAS/LAPACK
//! convention with leading dimension `rows`.
//!
//! Matrices are created fresh per operation, own their buffer exclusively, and are
//! never aliased; copies are explicit through `Clone`.

use std::mem::size_of;

use crate::errors::{KernelError, log_length_mismatch};
use crate::traits::scalar::Scalar;

/// Owned column-major matrix with `data.len() == rows * cols` at all times.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Element count of a `rows x cols` buffer of `T`.
///
/// Rejects shapes whose element count overflows `usize` or whose byte size
/// exceeds `isize::MAX`, the largest allocation a `Vec` can hold.
pub fn checked_len<T>(rows: usize, cols: usize) -> Result<usize, KernelError> {
    let elem = size_of::<T>().max(1);
    rows.checked_mul(cols)
        .filter(|&n| n.checked_mul(elem).is_some_and(|bytes| bytes <= isize::MAX as usize))
        .ok_or_else(|| {
            KernelError::InvalidArguments(format!(
                "{}x{} matrix exceeds the addressable size",
                rows, cols
            ))
        })
}

impl<T: Scalar> DenseMatrix<T> {
    /// Zero-filled `rows x cols` matrix. Panics when `rows * cols` overflows.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let len = rows
            .checked_mul(cols)
            .unwrap_or_else(|| panic!("DenseMatrix::zeros: {rows}x{cols} overflows usize"));
        Self {
            rows,
            cols,
            data: vec![T::zero(); len],
        }
    }

    /// Zero-filled `rows x cols` matrix, failing instead of allocating an
    /// unaddressable buffer.
    pub fn try_zeros(rows: usize, cols: usize) -> Result<Self, KernelError> {
        let len = checked_len::<T>(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![T::zero(); len],
        })
    }

    /// `n x n` identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i + n * i] = T::one();
        }
        m
    }

    /// Wraps an existing column-major buffer, validating its length.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, KernelError> {
        let len = checked_len::<T>(rows, cols)?;
        if data.len() != len {
            return Err(KernelError::LengthMismatch(log_length_mismatch(
                "DenseMatrix::from_vec",
                len,
                data.len(),
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Wraps a buffer the caller already sized to `rows * cols`.
    #[inline]
    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Builds a matrix by evaluating `f(i, j)` for every element, column by column.
    pub fn from_fn<F: FnMut(usize, usize) -> T>(rows: usize, cols: usize, mut f: F) -> Self {
        let len = rows
            .checked_mul(cols)
            .unwrap_or_else(|| panic!("DenseMatrix::from_fn: {rows}x{cols} overflows usize"));
        let mut data = Vec::with_capacity(len);
        for j in 0..cols {
            for i in 0..rows {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }
}

impl<T> DenseMatrix<T> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of elements, `rows * cols`.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when either dimension is zero. Every kernel treats such a matrix as a no-op.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Copy> DenseMatrix<T> {
    /// Element `(i, j)`. Panics when out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        assert!(i < self.rows && j < self.cols, "DenseMatrix::get: ({i}, {j}) out of range");
        self.data[i + self.rows * j]
    }

    /// Sets element `(i, j)`. Panics when out of range.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        assert!(i < self.rows && j < self.cols, "DenseMatrix::set: ({i}, {j}) out of range");
        self.data[i + self.rows * j] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn column_major_indexing() {
        // [[1, 3, 5],
        //  [2, 4, 6]]
        let m = DenseMatrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 0), 2.0);
        assert_eq!(m.get(0, 2), 5.0);
        assert_eq!(m.get(1, 2), 6.0);
        assert_eq!(m.shape(), (2, 3));
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = DenseMatrix::<f64>::from_vec(2, 2, vec![1.0; 3]).unwrap_err();
        assert!(matches!(err, KernelError::LengthMismatch(_)));
    }

    #[test]
    fn overflowing_shape_is_rejected() {
        let huge = 1usize << 36;
        let err = DenseMatrix::<f64>::from_vec(huge, huge, Vec::new()).unwrap_err();
        assert!(matches!(err, KernelError::InvalidArguments(_)));
        assert!(DenseMatrix::<f64>::try_zeros(usize::MAX, 2).is_err());
        assert!(checked_len::<Complex64>(usize::MAX / 16, 2).is_err());
        assert_eq!(checked_len::<f64>(3, 4).unwrap(), 12);
        assert_eq!(checked_len::<f64>(huge, 0).unwrap(), 0);
    }

    #[test]
    fn empty_shapes() {
        let m = DenseMatrix::<f64>::zeros(0, 5);
        assert!(m.is_empty());
        assert_eq!(m.len(), 0);
        let m = DenseMatrix::<Complex64>::zeros(3, 0);
        assert!(m.is_empty());
        assert!(m.data().is_empty());
    }

    #[test]
    fn identity_and_from_fn_agree() {
        let eye = DenseMatrix::<Complex64>::identity(3);
        let built = DenseMatrix::from_fn(3, 3, |i, j| {
            if i == j {
                Complex64::new(1.0, 0.0)
            } else {
                Complex64::new(0.0, 0.0)
            }
        });
        assert_eq!(eye, built);
    }

    #[test]
    fn set_then_get() {
        let mut m = DenseMatrix::<f32>::zeros(3, 2);
        m.set(2, 1, 7.5);
        assert_eq!(m.get(2, 1), 7.5);
        assert_eq!(m.data()[2 + 3], 7.5);
    }
}
