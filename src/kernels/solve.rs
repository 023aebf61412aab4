// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Dense Solve Dispatcher** - *Square and least-squares linear solves*
//!
//! Solves `A·X = B` for `A` (`m x n`) and `B` (`m x k`), returning `X` (`n x k`).
//!
//! ## Dispatch
//! - **Square** (`m == n`): equilibrated expert driver `xGESVX`. Rows and columns are
//!   scaled before the LU factorisation, the solution is iteratively refined and a
//!   reciprocal condition estimate `RCOND` is produced.
//! - **Rectangular** (`m != n`): rank-revealing `xGELSY`, giving the minimum-norm
//!   least-squares solution for both over- and underdetermined systems. The
//!   right-hand side is padded to `max(m, n)` rows as the routine requires.
//!
//! ## Degeneracy
//! A singular or rank deficient system is not an error. One
//! [`NumericalWarning`] is delivered to the caller's [`WarningSink`] and the best
//! achievable result is still returned. Only unexpected LAPACK status codes fail.
//!
//! The caller's matrices are never modified; both paths factor private copies.

use crate::config::LOG_TARGET;
use crate::errors::{KernelError, log_shape_mismatch};
use crate::kernels::blas_lapack::{
    LapackScalar, blas_int, equilibrated_solve, pivoted_least_squares,
};
use crate::kernels::diagnostics::{NumericalWarning, WarningSink, emit};
use crate::kernels::transpose::transpose;
use crate::structs::dense::{DenseMatrix, checked_len};
use crate::utils::change_stride;

#[inline]
fn wrapper_err(e: &'static str) -> KernelError {
    KernelError::InvalidArguments(e.to_string())
}

/// Solves `A·X = B`, choosing the square or least-squares path from the shape of `A`.
///
/// Returns an `n x k` matrix. When `m`, `n` or `k` is zero the zero matrix of that
/// shape is returned without calling into LAPACK.
///
/// # Errors
/// - `ShapeMismatch` when `A.rows != B.rows`.
/// - `InvalidArguments` when the `n x k` result is not addressable.
/// - `KernelFailure` when LAPACK reports a status outside the singular and rank
///   deficient cases.
pub fn solve<T, W>(
    a: &DenseMatrix<T>,
    b: &DenseMatrix<T>,
    sink: &mut W,
) -> Result<DenseMatrix<T>, KernelError>
where
    T: LapackScalar,
    W: WarningSink + ?Sized,
{
    if a.rows() != b.rows() {
        return Err(KernelError::ShapeMismatch(log_shape_mismatch(
            "solve",
            a.shape(),
            b.shape(),
        )));
    }

    let (m, n) = a.shape();
    let k = b.cols();
    if m == 0 || n == 0 || k == 0 {
        return DenseMatrix::try_zeros(n, k);
    }

    if m == n {
        log::trace!(target: LOG_TARGET, "solve: {m}x{n} square, {k} rhs -> GESVX");
        solve_square(a, b, sink)
    } else {
        log::trace!(target: LOG_TARGET, "solve: {m}x{n} rectangular, {k} rhs -> GELSY");
        solve_least_squares(a, b, sink)
    }
}

/// `A \ B`
#[inline]
pub fn left_divide<T, W>(
    a: &DenseMatrix<T>,
    b: &DenseMatrix<T>,
    sink: &mut W,
) -> Result<DenseMatrix<T>, KernelError>
where
    T: LapackScalar,
    W: WarningSink + ?Sized,
{
    solve(a, b, sink)
}

/// `A / B`, the solution of `X·B = A`, computed as `(Bᵀ \ Aᵀ)ᵀ`.
///
/// Requires `A.cols == B.cols`. The result is `A.rows x B.rows`.
pub fn right_divide<T, W>(
    a: &DenseMatrix<T>,
    b: &DenseMatrix<T>,
    sink: &mut W,
) -> Result<DenseMatrix<T>, KernelError>
where
    T: LapackScalar,
    W: WarningSink + ?Sized,
{
    if a.cols() != b.cols() {
        return Err(KernelError::ShapeMismatch(log_shape_mismatch(
            "right_divide",
            a.shape(),
            b.shape(),
        )));
    }
    let x = solve(&transpose(b), &transpose(a), sink)?;
    Ok(transpose(&x))
}

fn solve_square<T, W>(
    a: &DenseMatrix<T>,
    b: &DenseMatrix<T>,
    sink: &mut W,
) -> Result<DenseMatrix<T>, KernelError>
where
    T: LapackScalar,
    W: WarningSink + ?Sized,
{
    let n = a.rows();
    let k = b.cols();
    let ni = blas_int(n).map_err(wrapper_err)?;
    let ki = blas_int(k).map_err(wrapper_err)?;

    let mut a_work = a.data().to_vec();
    let mut b_work = b.data().to_vec();
    let mut x = vec![T::zero(); checked_len::<T>(n, k)?];

    let status = equilibrated_solve(ni, ki, &mut a_work, &mut b_work, &mut x)
        .map_err(wrapper_err)?;

    if status.info < 0 || status.info > ni + 1 {
        log::error!(target: LOG_TARGET, "GESVX returned INFO = {}", status.info);
        return Err(KernelError::KernelFailure(format!(
            "GESVX returned INFO = {} for a {n}x{n} system",
            status.info
        )));
    }

    log::trace!(
        target: LOG_TARGET,
        "GESVX: info = {}, equed = {}, rcond = {:e}",
        status.info,
        status.equed as char,
        status.rcond
    );

    // INFO in 1..=N: exactly singular pivot; N + 1: RCOND below working precision.
    if status.info > 0 || status.rcond < T::machine_epsilon() {
        emit(sink, NumericalWarning::Singular { rcond: status.rcond });
    }

    Ok(DenseMatrix::from_raw(n, k, x))
}

fn solve_least_squares<T, W>(
    a: &DenseMatrix<T>,
    b: &DenseMatrix<T>,
    sink: &mut W,
) -> Result<DenseMatrix<T>, KernelError>
where
    T: LapackScalar,
    W: WarningSink + ?Sized,
{
    let (m, n) = a.shape();
    let k = b.cols();
    let ld = m.max(n);
    let mi = blas_int(m).map_err(wrapper_err)?;
    let ni = blas_int(n).map_err(wrapper_err)?;
    let ki = blas_int(k).map_err(wrapper_err)?;
    let ldi = blas_int(ld).map_err(wrapper_err)?;

    let mut a_work = a.data().to_vec();
    // B padded to max(m, n) rows; the solution comes back in its top n rows.
    let mut b_pad = vec![T::zero(); checked_len::<T>(ld, k)?];
    change_stride(b.data(), m, &mut b_pad, ld, m, k);

    let status = pivoted_least_squares(
        mi,
        ni,
        ki,
        &mut a_work,
        mi,
        &mut b_pad,
        ldi,
        T::machine_epsilon(),
    )
    .map_err(wrapper_err)?;

    if status.info != 0 {
        log::error!(target: LOG_TARGET, "GELSY returned INFO = {}", status.info);
        return Err(KernelError::KernelFailure(format!(
            "GELSY returned INFO = {} for a {m}x{n} system",
            status.info
        )));
    }

    log::trace!(target: LOG_TARGET, "GELSY: rank = {}", status.rank);

    if status.rank < mi.min(ni) {
        emit(sink, NumericalWarning::<T::Real>::RankDeficient { rank: status.rank });
    }

    let mut c = DenseMatrix::try_zeros(n, k)?;
    change_stride(&b_pad, ld, c.data_mut(), n, n, k);
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-10 * (1.0 + b.abs())
    }

    #[test]
    fn diagonal_square_system() {
        let a = DenseMatrix::from_vec(2, 2, vec![2.0, 0.0, 0.0, 2.0]).unwrap();
        let b = DenseMatrix::from_vec(2, 1, vec![4.0, 6.0]).unwrap();
        let mut warnings: Vec<String> = Vec::new();
        let c = solve(&a, &b, &mut warnings).unwrap();
        assert_eq!(c.shape(), (2, 1));
        assert!(close(c.get(0, 0), 2.0));
        assert!(close(c.get(1, 0), 3.0));
        assert!(warnings.is_empty());
    }

    #[test]
    fn singular_square_warns_once() {
        let a = DenseMatrix::from_vec(2, 2, vec![1.0, 2.0, 2.0, 4.0]).unwrap();
        let b = DenseMatrix::from_vec(2, 1, vec![1.0, 2.0]).unwrap();
        let mut warnings: Vec<String> = Vec::new();
        let c = solve(&a, &b, &mut warnings).unwrap();
        assert_eq!(c.shape(), (2, 1));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("singular"));
        assert!(warnings[0].starts_with("Matrix is singular to working precision.  RCOND = "));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let a = DenseMatrix::from_vec(2, 2, vec![4.0, 1.0, 2.0, 3.0]).unwrap();
        let b = DenseMatrix::from_vec(2, 1, vec![1.0, 2.0]).unwrap();
        let (a0, b0) = (a.clone(), b.clone());
        let mut sink = |_: &str| {};
        solve(&a, &b, &mut sink).unwrap();
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn overdetermined_least_squares() {
        // A = [[1, 0], [0, 1], [1, 1]], b = [1, 2, 3] -> x = [2/3, 5/3]
        let a = DenseMatrix::from_vec(3, 2, vec![1.0, 0.0, 1.0, 0.0, 1.0, 1.0]).unwrap();
        let b = DenseMatrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let mut warnings: Vec<String> = Vec::new();
        let c = solve(&a, &b, &mut warnings).unwrap();
        assert_eq!(c.shape(), (2, 1));
        assert!(close(c.get(0, 0), 2.0 / 3.0));
        assert!(close(c.get(1, 0), 5.0 / 3.0));
        assert!(warnings.is_empty());
    }

    #[test]
    fn duplicate_column_is_rank_deficient() {
        // Both columns are e1, so the pivoted QR sees an exactly zero trailing block.
        let a = DenseMatrix::from_vec(3, 2, vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
        let b = DenseMatrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let mut warnings: Vec<String> = Vec::new();
        let c = solve(&a, &b, &mut warnings).unwrap();
        assert_eq!(warnings, vec![
            "Matrix is rank deficient to machine precision.  RANK = 1".to_string()
        ]);
        // Minimum-norm solution splits the weight evenly.
        assert!(close(c.get(0, 0), 0.5));
        assert!(close(c.get(1, 0), 0.5));
    }

    #[test]
    fn underdetermined_minimum_norm() {
        // x + y = 2 -> minimum-norm solution [1, 1]
        let a = DenseMatrix::from_vec(1, 2, vec![1.0, 1.0]).unwrap();
        let b = DenseMatrix::from_vec(1, 1, vec![2.0]).unwrap();
        let mut warnings: Vec<String> = Vec::new();
        let c = solve(&a, &b, &mut warnings).unwrap();
        assert_eq!(c.shape(), (2, 1));
        assert!(close(c.get(0, 0), 1.0));
        assert!(close(c.get(1, 0), 1.0));
        assert!(warnings.is_empty());
    }

    #[test]
    fn complex_square_system() {
        // (1 + i) x = 2i -> x = 1 + i
        let a = DenseMatrix::from_vec(1, 1, vec![Complex64::new(1.0, 1.0)]).unwrap();
        let b = DenseMatrix::from_vec(1, 1, vec![Complex64::new(0.0, 2.0)]).unwrap();
        let mut warnings: Vec<String> = Vec::new();
        let c = solve(&a, &b, &mut warnings).unwrap();
        assert!(close(c.get(0, 0).re, 1.0));
        assert!(close(c.get(0, 0).im, 1.0));
        assert!(warnings.is_empty());
    }

    #[test]
    fn row_mismatch_is_rejected() {
        let a = DenseMatrix::<f64>::zeros(3, 3);
        let b = DenseMatrix::<f64>::zeros(2, 1);
        let mut sink: Vec<String> = Vec::new();
        assert!(matches!(
            solve(&a, &b, &mut sink),
            Err(KernelError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn empty_system_is_noop() {
        let a = DenseMatrix::<f64>::zeros(0, 3);
        let b = DenseMatrix::<f64>::zeros(0, 2);
        let mut sink: Vec<String> = Vec::new();
        let c = solve(&a, &b, &mut sink).unwrap();
        assert_eq!(c.shape(), (3, 2));
        assert!(sink.is_empty());
    }

    #[test]
    fn buffer_contract_violation_is_invalid_arguments() {
        let mut a = [1.0; 3];
        let mut b = [1.0; 2];
        let mut x = [0.0; 2];
        let err = equilibrated_solve(2, 1, &mut a, &mut b, &mut x)
            .map_err(wrapper_err)
            .unwrap_err();
        assert!(matches!(err, KernelError::InvalidArguments(ref m) if m.contains("A too small")));
    }

    #[test]
    fn right_divide_solves_from_the_right() {
        // X·B = A with B = diag(2, 4), A = [[2, 8]] -> X = [[1, 2]]
        let a = DenseMatrix::from_vec(1, 2, vec![2.0, 8.0]).unwrap();
        let b = DenseMatrix::from_vec(2, 2, vec![2.0, 0.0, 0.0, 4.0]).unwrap();
        let mut sink: Vec<String> = Vec::new();
        let x = right_divide(&a, &b, &mut sink).unwrap();
        assert_eq!(x.shape(), (1, 2));
        assert!(close(x.get(0, 0), 1.0));
        assert!(close(x.get(0, 1), 2.0));
    }
}
