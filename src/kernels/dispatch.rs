// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Host Dispatch** - *Decode, compute, encode*
//!
//! Entry points that take host matrix objects, run a dense kernel in the requested
//! precision and hand the result back through a [`MatrixMaker`].
//!
//! - Typed entry points (`multiply_host::<T>`, `solve_host::<T>`, ...) fix the
//!   scalar domain at compile time.
//! - [`apply`] routes a [`MatrixOperator`] over untyped operands. It validates the
//!   argument count first, then works in `Complex<f64>` when any operand carries an
//!   `imag` field and in `f64` otherwise.

use num_complex::Complex64;

use crate::config::LOG_TARGET;
use crate::errors::KernelError;
use crate::kernels::blas_lapack::LapackScalar;
use crate::kernels::diagnostics::WarningSink;
use crate::kernels::marshal::HostElement;
use crate::kernels::multiply::multiply;
use crate::kernels::solve::{left_divide, right_divide};
use crate::kernels::transpose::{hermitian, transpose};
use crate::operators::MatrixOperator;
use crate::traits::host::{HostObject, MatrixMaker};

/// `A * B` over host objects.
pub fn multiply_host<T, A, B, M>(a: &A, b: &B, maker: &mut M) -> Result<M::Output, KernelError>
where
    T: LapackScalar + HostElement,
    A: HostObject + ?Sized,
    B: HostObject + ?Sized,
    M: MatrixMaker + ?Sized,
{
    let a = T::decode(a)?;
    let b = T::decode(b)?;
    let c = multiply(&a, &b)?;
    Ok(T::encode(&c, maker))
}

/// `A \ B` over host objects. Numerical warnings go to `sink`.
pub fn solve_host<T, A, B, W, M>(
    a: &A,
    b: &B,
    sink: &mut W,
    maker: &mut M,
) -> Result<M::Output, KernelError>
where
    T: LapackScalar + HostElement,
    A: HostObject + ?Sized,
    B: HostObject + ?Sized,
    W: WarningSink + ?Sized,
    M: MatrixMaker + ?Sized,
{
    let a = T::decode(a)?;
    let b = T::decode(b)?;
    let c = left_divide(&a, &b, sink)?;
    Ok(T::encode(&c, maker))
}

/// `A / B` over host objects. Numerical warnings go to `sink`.
pub fn right_divide_host<T, A, B, W, M>(
    a: &A,
    b: &B,
    sink: &mut W,
    maker: &mut M,
) -> Result<M::Output, KernelError>
where
    T: LapackScalar + HostElement,
    A: HostObject + ?Sized,
    B: HostObject + ?Sized,
    W: WarningSink + ?Sized,
    M: MatrixMaker + ?Sized,
{
    let a = T::decode(a)?;
    let b = T::decode(b)?;
    let c = right_divide(&a, &b, sink)?;
    Ok(T::encode(&c, maker))
}

/// `Aᵀ` over a host object.
pub fn transpose_host<T, A, M>(a: &A, maker: &mut M) -> Result<M::Output, KernelError>
where
    T: LapackScalar + HostElement,
    A: HostObject + ?Sized,
    M: MatrixMaker + ?Sized,
{
    let a = T::decode(a)?;
    Ok(T::encode(&transpose(&a), maker))
}

/// `Aᴴ` over a host object.
pub fn hermitian_host<T, A, M>(a: &A, maker: &mut M) -> Result<M::Output, KernelError>
where
    T: LapackScalar + HostElement,
    A: HostObject + ?Sized,
    M: MatrixMaker + ?Sized,
{
    let a = T::decode(a)?;
    Ok(T::encode(&hermitian(&a), maker))
}

/// Applies `op` to `args`, picking the scalar domain from the operands.
///
/// # Errors
/// `InvalidArguments` when `args.len()` differs from `op.arity()`; nothing is
/// decoded in that case. Otherwise whatever the routed entry point reports.
pub fn apply<W, M>(
    op: MatrixOperator,
    args: &[&dyn HostObject],
    sink: &mut W,
    maker: &mut M,
) -> Result<M::Output, KernelError>
where
    W: WarningSink + ?Sized,
    M: MatrixMaker + ?Sized,
{
    if args.len() != op.arity() {
        return Err(KernelError::InvalidArguments(format!(
            "{} expects {} argument(s), got {}",
            op.name(),
            op.arity(),
            args.len()
        )));
    }

    let complex = args.iter().any(|a| a.is_complex());
    log::trace!(
        target: LOG_TARGET,
        "apply: {} on {} operand(s), complex = {}",
        op.name(),
        args.len(),
        complex
    );

    if complex {
        route::<Complex64, W, M>(op, args, sink, maker)
    } else {
        // Conjugation is the identity on reals.
        let op = match op {
            MatrixOperator::Hermitian => MatrixOperator::Transpose,
            other => other,
        };
        route::<f64, W, M>(op, args, sink, maker)
    }
}

fn route<T, W, M>(
    op: MatrixOperator,
    args: &[&dyn HostObject],
    sink: &mut W,
    maker: &mut M,
) -> Result<M::Output, KernelError>
where
    T: LapackScalar + HostElement,
    W: WarningSink + ?Sized,
    M: MatrixMaker + ?Sized,
{
    match (op, args) {
        (MatrixOperator::Multiply, [a, b]) => multiply_host::<T, _, _, M>(*a, *b, maker),
        (MatrixOperator::LeftDivide, [a, b]) => solve_host::<T, _, _, W, M>(*a, *b, sink, maker),
        (MatrixOperator::RightDivide, [a, b]) => {
            right_divide_host::<T, _, _, W, M>(*a, *b, sink, maker)
        }
        (MatrixOperator::Transpose, [a]) => transpose_host::<T, _, M>(*a, maker),
        (MatrixOperator::Hermitian, [a]) => hermitian_host::<T, _, M>(*a, maker),
        _ => Err(KernelError::InvalidArguments(format!(
            "{}: unexpected argument count {}",
            op.name(),
            args.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::host::{HostMatrix, HostMatrixMaker};

    #[test]
    fn arity_checked_before_decode() {
        // The malformed operand is never decoded.
        let bad = HostMatrix::real_f64(5, 5, &[]);
        let mut sink: Vec<String> = Vec::new();
        let err = apply(MatrixOperator::Multiply, &[&bad], &mut sink, &mut HostMatrixMaker)
            .unwrap_err();
        assert!(matches!(err, KernelError::InvalidArguments(_)));
        assert!(err.to_string().contains("multiply expects 2"));

        let err = apply(
            MatrixOperator::Transpose,
            &[&bad, &bad],
            &mut sink,
            &mut HostMatrixMaker,
        )
        .unwrap_err();
        assert!(matches!(err, KernelError::InvalidArguments(_)));
    }

    #[test]
    fn real_operands_stay_real() {
        let a = HostMatrix::real_f64(2, 2, &[2.0, 0.0, 0.0, 2.0]);
        let b = HostMatrix::real_f64(2, 1, &[4.0, 6.0]);
        let mut sink: Vec<String> = Vec::new();
        let c = apply(MatrixOperator::LeftDivide, &[&a, &b], &mut sink, &mut HostMatrixMaker)
            .unwrap();
        assert!(c.imag.is_none());
        let x = c.real_values().unwrap();
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
        assert!(sink.is_empty());
    }

    #[test]
    fn any_complex_operand_promotes() {
        let a = HostMatrix::real_f64(1, 1, &[2.0]);
        let b = HostMatrix::complex_f64(1, 1, &[1.0], &[1.0]);
        let mut sink: Vec<String> = Vec::new();
        let c = apply(MatrixOperator::Multiply, &[&a, &b], &mut sink, &mut HostMatrixMaker)
            .unwrap();
        assert_eq!(c.real_values(), Some(&[2.0][..]));
        assert_eq!(c.imag_values(), Some(&[2.0][..]));
    }

    #[test]
    fn hermitian_of_real_is_transpose() {
        let a = HostMatrix::real_f64(1, 3, &[1.0, 2.0, 3.0]);
        let mut sink: Vec<String> = Vec::new();
        let h = apply(MatrixOperator::Hermitian, &[&a], &mut sink, &mut HostMatrixMaker)
            .unwrap();
        assert!(h.imag.is_none());
        assert_eq!(h.dims_values(), Some(&[3.0, 1.0][..]));
        assert_eq!(h.real_values(), Some(&[1.0, 2.0, 3.0][..]));
    }

    #[test]
    fn hermitian_of_complex_conjugates() {
        let a = HostMatrix::complex_f64(1, 2, &[1.0, 2.0], &[3.0, -4.0]);
        let mut sink: Vec<String> = Vec::new();
        let h = apply(MatrixOperator::Hermitian, &[&a], &mut sink, &mut HostMatrixMaker)
            .unwrap();
        assert_eq!(h.dims_values(), Some(&[2.0, 1.0][..]));
        assert_eq!(h.imag_values(), Some(&[-3.0, 4.0][..]));
    }

    #[test]
    fn typed_single_precision_multiply() {
        let a = HostMatrix::real_f64(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let b = HostMatrix::real_f64(2, 1, &[0.25, -8.0]);
        let c = multiply_host::<f32, _, _, _>(&a, &b, &mut HostMatrixMaker).unwrap();
        assert_eq!(c.real_values(), Some(&[0.25, -8.0][..]));
    }
}
