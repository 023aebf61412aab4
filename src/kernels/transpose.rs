// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Blocked Transpose Kernels** - *Cache-tiled transpose and conjugate transpose*
//!
//! Transposes a column-major `rows x cols` buffer into a `cols x rows` buffer with
//! `B[j + cols*i] = f(A[i + rows*j])`, where `f` is the identity (transpose) or
//! [`Scalar::conjugate`] (Hermitian transpose).
//!
//! The `(i, j)` index space is walked in square tiles of edge [`TRANSPOSE_BLOCK`] so
//! that both the reads and the writes of a tile stay resident in cache. The inner
//! loops are bounded by the true dimensions, so ragged edge tiles are handled
//! without padding. Tiling only changes the visiting order: the output is
//! bit-identical to the naive double loop for every tile size.
//!
//! For real domains conjugation is the identity and the Hermitian transpose
//! degenerates to the plain transpose.

include!(concat!(env!("OUT_DIR"), "/transpose_block.rs"));

use crate::structs::dense::DenseMatrix;
use crate::traits::scalar::Scalar;

/// Tiled transpose of `src` (`rows x cols`, column-major) into `dst` (`cols x rows`),
/// applying `map` to every element.
///
/// `block` is the tile edge; zero is treated as one.
///
/// # Panics
/// When either buffer is shorter than `rows * cols`.
#[inline]
pub fn blocked_transpose_with<T, F>(
    src: &[T],
    dst: &mut [T],
    rows: usize,
    cols: usize,
    block: usize,
    map: F,
) where
    T: Copy,
    F: Fn(T) -> T,
{
    let n = rows * cols;
    assert!(src.len() >= n && dst.len() >= n, "blocked_transpose_with: buffer too small");
    let block = block.max(1);

    let mut i0 = 0;
    while i0 < rows {
        let i_end = (i0 + block).min(rows);
        let mut j0 = 0;
        while j0 < cols {
            let j_end = (j0 + block).min(cols);
            for j in j0..j_end {
                for i in i0..i_end {
                    dst[j + cols * i] = map(src[i + rows * j]);
                }
            }
            j0 += block;
        }
        i0 += block;
    }
}

/// Transposes a column-major `rows x cols` buffer into a new `cols x rows` buffer.
#[inline]
pub fn blocked_transpose<T: Scalar>(src: &[T], rows: usize, cols: usize) -> Vec<T> {
    let mut dst = vec![T::zero(); rows * cols];
    blocked_transpose_with(src, &mut dst, rows, cols, TRANSPOSE_BLOCK, |x| x);
    dst
}

/// Conjugate-transposes a column-major `rows x cols` buffer into a new `cols x rows` buffer.
#[inline]
pub fn blocked_hermitian<T: Scalar>(src: &[T], rows: usize, cols: usize) -> Vec<T> {
    let mut dst = vec![T::zero(); rows * cols];
    blocked_transpose_with(src, &mut dst, rows, cols, TRANSPOSE_BLOCK, T::conjugate);
    dst
}

/// `Aᵀ`
pub fn transpose<T: Scalar>(a: &DenseMatrix<T>) -> DenseMatrix<T> {
    let (rows, cols) = a.shape();
    if a.is_empty() {
        return DenseMatrix::zeros(cols, rows);
    }
    DenseMatrix::from_raw(cols, rows, blocked_transpose(a.data(), rows, cols))
}

/// `Aᴴ`
pub fn hermitian<T: Scalar>(a: &DenseMatrix<T>) -> DenseMatrix<T> {
    let (rows, cols) = a.shape();
    if a.is_empty() {
        return DenseMatrix::zeros(cols, rows);
    }
    DenseMatrix::from_raw(cols, rows, blocked_hermitian(a.data(), rows, cols))
}
