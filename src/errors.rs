// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Dense Kernel Error Handling*
//!
//! Error types for dense matrix operations with structured error reporting.
//!
//! ## Error Categories
//! - **Argument Errors**: Malformed host objects, bad dimension descriptors, wrong arity
//! - **Shape Errors**: Operand dimensions that do not conform for the requested operation
//! - **Length Errors**: Buffers shorter than the shape they claim to hold
//! - **Type Errors**: Host buffers that cannot be coerced to floating point
//! - **Kernel Failures**: Unexpected status codes from the underlying LAPACK routines
//!
//! Numerical degeneracy (singular or rank deficient systems) is *not* an error.
//! It is reported through [`crate::kernels::diagnostics::WarningSink`] and the
//! best-effort result is still returned.

use core::fmt;
use std::error::Error;

/// Error type for all dense kernel operations.
///
/// Each variant includes a contextual message string providing specific details
/// about the error condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Invalid arguments provided to a kernel or entry point.
    InvalidArguments(String),

    /// Operand shapes do not conform, e.g. `A.cols != B.rows` in a multiply.
    ShapeMismatch(String),

    /// Buffer length does not match the declared shape.
    LengthMismatch(String),

    /// Unsupported host buffer type for the requested operation.
    UnsupportedType(String),

    /// The underlying BLAS/LAPACK routine reported a status it should never produce
    /// for validated input.
    KernelFailure(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            KernelError::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
            KernelError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            KernelError::UnsupportedType(msg) => write!(f, "Unsupported type: {}", msg),
            KernelError::KernelFailure(msg) => write!(f, "Kernel failure: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// Creates a formatted error message for length mismatches between left-hand side (LHS) and right-hand side (RHS) buffers.
///
/// # Arguments
/// * `fname` - Function name where the mismatch occurred
/// * `lhs` - Length of the left-hand side buffer
/// * `rhs` - Length of the right-hand side buffer
pub fn log_length_mismatch(fname: &str, lhs: usize, rhs: usize) -> String {
    format!("{} => Length mismatch: LHS {} RHS {}", fname, lhs, rhs)
}

/// Creates a formatted error message for non-conforming operand shapes.
///
/// # Arguments
/// * `fname` - Function name where the mismatch occurred
/// * `lhs` - `(rows, cols)` of the left operand
/// * `rhs` - `(rows, cols)` of the right operand
pub fn log_shape_mismatch(fname: &str, lhs: (usize, usize), rhs: (usize, usize)) -> String {
    format!(
        "{} => Shape mismatch: LHS {}x{} RHS {}x{}",
        fname, lhs.0, lhs.1, rhs.0, rhs.1
    )
}
