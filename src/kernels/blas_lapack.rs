// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **BLAS/LAPACK Integration Module** - *Trusted numerical primitives*
//!
//! Thin, buffer-checked wrappers over the three external routines the dense kernels
//! rely on, generic over the four LAPACK precisions through [`LapackScalar`]:
//!
//! - **GEMM** (`xGEMM`): `C ← A·B`, column-major, no transposes, `alpha = 1`, `beta = 0`
//! - **Equilibrated expert solve** (`xGESVX`, `FACT = 'E'`): row/column scaling,
//!   LU factorisation, iterative refinement and a reciprocal condition estimate
//! - **Rank-revealing least squares** (`xGELSY`): complete orthogonal factorisation
//!   with column pivoting, minimum-norm solution for any `m x n`
//!
//! The routines are treated as black boxes with documented contracts. Wrappers
//! only validate the buffer contract and return the raw LAPACK status; interpreting
//! singularity, rank deficiency and failure is the job of
//! [`crate::kernels::solve`].
//!
//! ## External Dependencies
//!
//! This module requires linking against BLAS and LAPACK. The default `openblas`
//! feature links OpenBLAS; Intel MKL, Accelerate, or system reference libraries
//! work as well.
//!
//! ## Reentrancy
//!
//! Every call allocates its own workspace. Concurrent calls on independent buffers
//! are safe provided the linked BLAS/LAPACK is itself reentrant, which holds for
//! the usual OpenBLAS/MKL builds but is a property of the linked library.

use blas::{cgemm, dgemm, sgemm, zgemm};
use lapack::{cgelsy, cgesvx, dgelsy, dgesvx, dlamch, sgelsy, sgesvx, slamch, zgelsy, zgesvx};
use num_complex::Complex;
use num_traits::ToPrimitive;

use crate::traits::scalar::Scalar;

/// Scalar domain with a BLAS/LAPACK binding.
///
/// The `*_raw` functions forward straight to the Fortran routine of the matching
/// precision. Arguments a domain does not take (`RWORK` for real types, `IWORK`
/// for complex types) are ignored.
#[allow(clippy::too_many_arguments)]
pub trait LapackScalar: Scalar {
    /// Relative machine precision, `xLAMCH('E')`.
    fn machine_epsilon() -> Self::Real;

    /// Reads an optimal workspace size out of a `LWORK = -1` query result.
    /// Complex routines report it in the real component.
    #[inline]
    fn workspace_len(probe: Self) -> Option<usize> {
        probe.re().to_usize()
    }

    /// # Safety
    /// Buffers must satisfy the `xGEMM` contract for the given dimensions.
    unsafe fn gemm_raw(
        m: i32,
        n: i32,
        k: i32,
        a: &[Self],
        lda: i32,
        b: &[Self],
        ldb: i32,
        c: &mut [Self],
        ldc: i32,
    );

    /// # Safety
    /// Buffers must satisfy the `xGESVX` contract for the given dimensions.
    unsafe fn gesvx_raw(
        n: i32,
        nrhs: i32,
        a: &mut [Self],
        lda: i32,
        af: &mut [Self],
        ldaf: i32,
        ipiv: &mut [i32],
        equed: &mut u8,
        r: &mut [Self::Real],
        c: &mut [Self::Real],
        b: &mut [Self],
        ldb: i32,
        x: &mut [Self],
        ldx: i32,
        rcond: &mut Self::Real,
        ferr: &mut [Self::Real],
        berr: &mut [Self::Real],
        work: &mut [Self],
        rwork: &mut [Self::Real],
        iwork: &mut [i32],
        info: &mut i32,
    );

    /// # Safety
    /// Buffers must satisfy the `xGELSY` contract for the given dimensions.
    unsafe fn gelsy_raw(
        m: i32,
        n: i32,
        nrhs: i32,
        a: &mut [Self],
        lda: i32,
        b: &mut [Self],
        ldb: i32,
        jpvt: &mut [i32],
        rcond: Self::Real,
        rank: &mut i32,
        work: &mut [Self],
        lwork: i32,
        rwork: &mut [Self::Real],
        info: &mut i32,
    );
}

macro_rules! impl_lapack_real {
    ($t:ty, $gemm:ident, $gesvx:ident, $gelsy:ident, $lamch:ident) => {
        impl LapackScalar for $t {
            #[inline]
            fn machine_epsilon() -> $t {
                unsafe { $lamch(b'E') }
            }

            unsafe fn gemm_raw(
                m: i32,
                n: i32,
                k: i32,
                a: &[$t],
                lda: i32,
                b: &[$t],
                ldb: i32,
                c: &mut [$t],
                ldc: i32,
            ) {
                $gemm(b'N', b'N', m, n, k, 1.0, a, lda, b, ldb, 0.0, c, ldc);
            }

            unsafe fn gesvx_raw(
                n: i32,
                nrhs: i32,
                a: &mut [$t],
                lda: i32,
                af: &mut [$t],
                ldaf: i32,
                ipiv: &mut [i32],
                equed: &mut u8,
                r: &mut [$t],
                c: &mut [$t],
                b: &mut [$t],
                ldb: i32,
                x: &mut [$t],
                ldx: i32,
                rcond: &mut $t,
                ferr: &mut [$t],
                berr: &mut [$t],
                work: &mut [$t],
                _rwork: &mut [$t],
                iwork: &mut [i32],
                info: &mut i32,
            ) {
                $gesvx(
                    b'E', // FACT: equilibrate, then factor
                    b'N', // TRANS: A·X = B
                    n, nrhs, a, lda, af, ldaf, ipiv, equed, r, c, b, ldb, x, ldx, rcond, ferr,
                    berr, work, iwork, info,
                );
            }

            unsafe fn gelsy_raw(
                m: i32,
                n: i32,
                nrhs: i32,
                a: &mut [$t],
                lda: i32,
                b: &mut [$t],
                ldb: i32,
                jpvt: &mut [i32],
                rcond: $t,
                rank: &mut i32,
                work: &mut [$t],
                lwork: i32,
                _rwork: &mut [$t],
                info: &mut i32,
            ) {
                $gelsy(m, n, nrhs, a, lda, b, ldb, jpvt, rcond, rank, work, lwork, info);
            }
        }
    };
}

macro_rules! impl_lapack_complex {
    ($t:ty, $gemm:ident, $gesvx:ident, $gelsy:ident, $lamch:ident) => {
        impl LapackScalar for Complex<$t> {
            #[inline]
            fn machine_epsilon() -> $t {
                unsafe { $lamch(b'E') }
            }

            unsafe fn gemm_raw(
                m: i32,
                n: i32,
                k: i32,
                a: &[Complex<$t>],
                lda: i32,
                b: &[Complex<$t>],
                ldb: i32,
                c: &mut [Complex<$t>],
                ldc: i32,
            ) {
                let alpha = Complex::new(1.0, 0.0);
                let beta = Complex::new(0.0, 0.0);
                $gemm(b'N', b'N', m, n, k, alpha, a, lda, b, ldb, beta, c, ldc);
            }

            unsafe fn gesvx_raw(
                n: i32,
                nrhs: i32,
                a: &mut [Complex<$t>],
                lda: i32,
                af: &mut [Complex<$t>],
                ldaf: i32,
                ipiv: &mut [i32],
                equed: &mut u8,
                r: &mut [$t],
                c: &mut [$t],
                b: &mut [Complex<$t>],
                ldb: i32,
                x: &mut [Complex<$t>],
                ldx: i32,
                rcond: &mut $t,
                ferr: &mut [$t],
                berr: &mut [$t],
                work: &mut [Complex<$t>],
                rwork: &mut [$t],
                _iwork: &mut [i32],
                info: &mut i32,
            ) {
                $gesvx(
                    b'E', b'N', n, nrhs, a, lda, af, ldaf, ipiv, equed, r, c, b, ldb, x, ldx,
                    rcond, ferr, berr, work, rwork, info,
                );
            }

            unsafe fn gelsy_raw(
                m: i32,
                n: i32,
                nrhs: i32,
                a: &mut [Complex<$t>],
                lda: i32,
                b: &mut [Complex<$t>],
                ldb: i32,
                jpvt: &mut [i32],
                rcond: $t,
                rank: &mut i32,
                work: &mut [Complex<$t>],
                lwork: i32,
                rwork: &mut [$t],
                info: &mut i32,
            ) {
                $gelsy(
                    m, n, nrhs, a, lda, b, ldb, jpvt, rcond, rank, work, lwork, rwork, info,
                );
            }
        }
    };
}

impl_lapack_real!(f32, sgemm, sgesvx, sgelsy, slamch);
impl_lapack_real!(f64, dgemm, dgesvx, dgelsy, dlamch);
impl_lapack_complex!(f32, cgemm, cgesvx, cgelsy, slamch);
impl_lapack_complex!(f64, zgemm, zgesvx, zgelsy, dlamch);

/// Converts a validated dimension to a BLAS integer.
#[inline]
pub fn blas_int(dim: usize) -> Result<i32, &'static str> {
    i32::try_from(dim).map_err(|_| "dimension exceeds BLAS integer range")
}

/// GEMM (C ← A·B), column-major, unit alpha and zero beta.
///
/// Prior contents of `c` are ignored and overwritten.
#[inline(always)]
pub fn gemm<T: LapackScalar>(
    m: i32,
    n: i32,
    k: i32,
    a: &[T], // len ≥ lda * k
    lda: i32,
    b: &[T], // len ≥ ldb * n
    ldb: i32,
    c: &mut [T], // len ≥ ldc * n
    ldc: i32,
) -> Result<(), &'static str> {
    if m <= 0 || n <= 0 || k <= 0 {
        return Err("m, n and k must be positive");
    }
    if lda < m {
        return Err("lda must be ≥ m");
    }
    if ldb < k {
        return Err("ldb must be ≥ k");
    }
    if ldc < m {
        return Err("ldc must be ≥ m");
    }
    if a.len() < (lda * k) as usize {
        return Err("A too small");
    }
    if b.len() < (ldb * n) as usize {
        return Err("B too small");
    }
    if c.len() < (ldc * n) as usize {
        return Err("C too small");
    }

    unsafe { T::gemm_raw(m, n, k, a, lda, b, ldb, c, ldc) };
    Ok(())
}

/// Outcome of an equilibrated solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GesvxStatus<R> {
    /// Reciprocal condition number estimate of the equilibrated matrix.
    pub rcond: R,
    /// Raw `INFO`: 0 on success, `i ≤ N` for an exactly singular `U(i,i)`,
    /// `N + 1` when `RCOND` is below machine precision, negative for a bad argument.
    pub info: i32,
    /// Equilibration applied: `b'N'`, `b'R'`, `b'C'` or `b'B'`.
    pub equed: u8,
}

/// Solves the square system `A·X = B` with `xGESVX` (`FACT = 'E'`).
///
/// `a` (n×n) and `b` (n×nrhs) are working copies and are overwritten with the
/// scaled system. The solution is written to `x` (n×nrhs, leading dimension n).
/// All factorisation workspace is allocated here and released on return.
pub fn equilibrated_solve<T: LapackScalar>(
    n: i32,
    nrhs: i32,
    a: &mut [T],
    b: &mut [T],
    x: &mut [T],
) -> Result<GesvxStatus<T::Real>, &'static str> {
    if n <= 0 || nrhs <= 0 {
        return Err("n and nrhs must be positive");
    }
    let nu = n as usize;
    let ku = nrhs as usize;
    if a.len() < nu * nu {
        return Err("A too small for GESVX");
    }
    if b.len() < nu * ku {
        return Err("B too small for GESVX");
    }
    if x.len() < nu * ku {
        return Err("X too small for GESVX");
    }

    let zero = <T::Real as num_traits::Zero>::zero();
    let mut af = vec![T::zero(); nu * nu];
    let mut ipiv = vec![0i32; nu];
    let mut equed = b'N';
    let mut r = vec![zero; nu];
    let mut c = vec![zero; nu];
    let mut rcond = zero;
    let mut ferr = vec![zero; ku];
    let mut berr = vec![zero; ku];
    let mut work = vec![T::zero(); T::WORK_FACTOR * nu];
    let mut rwork = vec![zero; T::RWORK_FACTOR * nu];
    let mut iwork = vec![0i32; T::IWORK_FACTOR * nu];
    let mut info = 0;

    unsafe {
        T::gesvx_raw(
            n, nrhs, a, n, &mut af, n, &mut ipiv, &mut equed, &mut r, &mut c, b, n, x, n,
            &mut rcond, &mut ferr, &mut berr, &mut work, &mut rwork, &mut iwork, &mut info,
        );
    }

    Ok(GesvxStatus { rcond, info, equed })
}

/// Outcome of a rank-revealing least-squares solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GelsyStatus {
    /// Effective numerical rank found by the pivoted factorisation.
    pub rank: i32,
    /// Raw `INFO`: 0 on success, negative for a bad argument.
    pub info: i32,
}

/// Minimum-norm least-squares solve `min ‖A·X − B‖` with `xGELSY`.
///
/// `a` is m×n (overwritten). `b` must already be padded to `ldb ≥ max(m, n)` rows;
/// on exit its top `n` rows of each column hold the solution. The optimal workspace
/// is found with an `LWORK = -1` size probe first.
pub fn pivoted_least_squares<T: LapackScalar>(
    m: i32,
    n: i32,
    nrhs: i32,
    a: &mut [T],
    lda: i32,
    b: &mut [T],
    ldb: i32,
    rcond: T::Real,
) -> Result<GelsyStatus, &'static str> {
    if m <= 0 || n <= 0 || nrhs <= 0 {
        return Err("m, n and nrhs must be positive");
    }
    if lda < m {
        return Err("lda must be ≥ m");
    }
    if ldb < m.max(n) {
        return Err("ldb must be ≥ max(m, n)");
    }
    if a.len() < (lda * n) as usize {
        return Err("A too small for GELSY");
    }
    if b.len() < (ldb * nrhs) as usize {
        return Err("B too small for GELSY");
    }

    let zero = <T::Real as num_traits::Zero>::zero();
    // Column pivots: zero marks every column as free.
    let mut jpvt = vec![0i32; n as usize];
    let mut rwork = vec![zero; T::RWORK_FACTOR * n as usize];
    let mut rank = 0;
    let mut info = 0;

    // Workspace query: call with lwork = -1 to get optimal size
    let mut work_query = [T::zero()];
    unsafe {
        T::gelsy_raw(
            m, n, nrhs, a, lda, b, ldb, &mut jpvt, rcond, &mut rank, &mut work_query, -1,
            &mut rwork, &mut info,
        );
    }
    if info != 0 {
        return Err("GELSY workspace query failed");
    }

    // Allocate the optimal amount returned in work_query[0]
    let lwork = T::workspace_len(work_query[0])
        .ok_or("GELSY workspace query returned a non-finite size")?
        .max(1);
    let mut work = vec![T::zero(); lwork];

    unsafe {
        T::gelsy_raw(
            m,
            n,
            nrhs,
            a,
            lda,
            b,
            ldb,
            &mut jpvt,
            rcond,
            &mut rank,
            &mut work,
            lwork as i32,
            &mut rwork,
            &mut info,
        );
    }

    Ok(GelsyStatus { rank, info })
}
