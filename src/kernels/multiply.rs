// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Matrix Multiply** - *Dense GEMM entry point*
//!
//! `C = A·B` for real and complex dense matrices, delegated to `xGEMM` with unit
//! alpha and zero beta. The result is always freshly allocated; nothing accumulates
//! into prior contents.

use crate::errors::{KernelError, log_shape_mismatch};
use crate::kernels::blas_lapack::{LapackScalar, blas_int, gemm};
use crate::structs::dense::DenseMatrix;

/// Matrix–matrix product `C = A·B` (column-major).
///
/// Requires `A.cols == B.rows`; the result has shape `(A.rows, B.cols)`.
///
/// Returns
/// - `Ok(C)` on success. An empty inner dimension yields the zero matrix.
/// - `Err(KernelError::ShapeMismatch)` if the operands do not conform.
/// - `Err(KernelError::InvalidArguments)` if `A.rows x B.cols` is not addressable.
pub fn multiply<T: LapackScalar>(
    a: &DenseMatrix<T>,
    b: &DenseMatrix<T>,
) -> Result<DenseMatrix<T>, KernelError> {
    if a.cols() != b.rows() {
        return Err(KernelError::ShapeMismatch(log_shape_mismatch(
            "multiply",
            a.shape(),
            b.shape(),
        )));
    }

    let (m, k) = a.shape();
    let n = b.cols();
    let mut c = DenseMatrix::try_zeros(m, n)?;
    if m == 0 || n == 0 || k == 0 {
        return Ok(c);
    }

    let to_err = |e: &'static str| KernelError::InvalidArguments(e.to_string());
    let (mi, ni, ki) = (
        blas_int(m).map_err(to_err)?,
        blas_int(n).map_err(to_err)?,
        blas_int(k).map_err(to_err)?,
    );
    gemm(mi, ni, ki, a.data(), mi, b.data(), ki, c.data_mut(), mi).map_err(to_err)?;
    Ok(c)
}
