// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **HostMatrix** - *Concrete host matrix object*
//!
//! A plain `{dims, real, imag}` record of `minarrow` arrays implementing
//! [`HostObject`], together with [`HostMatrixMaker`], the matching
//! [`MatrixMaker`]. Hosts with their own object model implement the traits
//! directly instead.

use minarrow::{Array, FloatArray, NumericArray};

use crate::config::{DIMS_FIELD, IMAG_FIELD, REAL_FIELD};
use crate::traits::host::{HostObject, MatrixMaker};

/// Host matrix record. `imag` is `None` for real matrices.
#[derive(Debug, Clone)]
pub struct HostMatrix {
    pub dims: Array,
    pub real: Array,
    pub imag: Option<Array>,
}

#[inline]
fn f64_array(values: &[f64]) -> Array {
    Array::NumericArray(NumericArray::Float64(FloatArray::from_slice(values).into()))
}

impl HostMatrix {
    /// Real `rows x cols` matrix over column-major `real`.
    pub fn real_f64(rows: usize, cols: usize, real: &[f64]) -> Self {
        Self {
            dims: f64_array(&[rows as f64, cols as f64]),
            real: f64_array(real),
            imag: None,
        }
    }

    /// Complex `rows x cols` matrix over split column-major components.
    pub fn complex_f64(rows: usize, cols: usize, real: &[f64], imag: &[f64]) -> Self {
        Self {
            dims: f64_array(&[rows as f64, cols as f64]),
            real: f64_array(real),
            imag: Some(f64_array(imag)),
        }
    }

    /// The `real` component as doubles, when stored as a `Float64` array.
    pub fn real_values(&self) -> Option<&[f64]> {
        as_f64_slice(&self.real)
    }

    /// The `imag` component as doubles, when present and stored as a `Float64` array.
    pub fn imag_values(&self) -> Option<&[f64]> {
        self.imag.as_ref().and_then(as_f64_slice)
    }

    /// The dimension descriptor as doubles, when stored as a `Float64` array.
    pub fn dims_values(&self) -> Option<&[f64]> {
        as_f64_slice(&self.dims)
    }
}

fn as_f64_slice(arr: &Array) -> Option<&[f64]> {
    match arr {
        Array::NumericArray(NumericArray::Float64(a)) => Some(&a.data[..]),
        _ => None,
    }
}

impl HostObject for HostMatrix {
    fn field(&self, name: &str) -> Option<&Array> {
        match name {
            DIMS_FIELD => Some(&self.dims),
            REAL_FIELD => Some(&self.real),
            IMAG_FIELD => self.imag.as_ref(),
            _ => None,
        }
    }
}

/// Builds [`HostMatrix`] results.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostMatrixMaker;

impl MatrixMaker for HostMatrixMaker {
    type Output = HostMatrix;

    fn real(&mut self, dims: Array, real: Array) -> HostMatrix {
        HostMatrix {
            dims,
            real,
            imag: None,
        }
    }

    fn complex(&mut self, dims: Array, real: Array, imag: Array) -> HostMatrix {
        HostMatrix {
            dims,
            real,
            imag: Some(imag),
        }
    }
}
