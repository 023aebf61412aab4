// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Host traits** - *Boundary between host matrix objects and the dense kernels*
//!
//! A host matrix is any object exposing named `minarrow` arrays:
//! `dims` (`[rows, cols]`), `real`, and optionally `imag`. The kernels only read
//! from it. Results travel back through a caller-supplied [`MatrixMaker`], so the
//! core never needs to know the concrete host type.

use minarrow::Array;

/// Read-only access to the named fields of a host matrix object.
pub trait HostObject {
    /// The array stored under `name`, or `None` when the field is absent.
    fn field(&self, name: &str) -> Option<&Array>;

    /// True when the object carries an imaginary component.
    #[inline]
    fn is_complex(&self) -> bool {
        self.field(crate::config::IMAG_FIELD).is_some()
    }
}

/// Constructs host result objects from encoded buffers.
///
/// `dims` is always the two-element descriptor `[rows, cols]`; the component buffers
/// hold `rows * cols` doubles in column-major order.
pub trait MatrixMaker {
    type Output;

    /// Builds a real matrix from `(dims, real)`.
    fn real(&mut self, dims: Array, real: Array) -> Self::Output;

    /// Builds a complex matrix from `(dims, real, imag)`.
    fn complex(&mut self, dims: Array, real: Array, imag: Array) -> Self::Output;
}

impl<O: HostObject + ?Sized> HostObject for &O {
    #[inline]
    fn field(&self, name: &str) -> Option<&Array> {
        (**self).field(name)
    }
}
