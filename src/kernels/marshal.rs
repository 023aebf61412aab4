// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Marshaling Layer** - *Host objects to dense matrices and back*
//!
//! Converts host matrix objects (`{dims, real, imag}` of `minarrow` arrays) into
//! [`DenseMatrix`] buffers and encodes results back through a [`MatrixMaker`].
//!
//! ## Decoding
//! - `dims` is read as a numeric descriptor. One entry means a column vector,
//!   two entries are `[rows, cols]`; anything else is rejected. A descriptor longer
//!   than [`DIMS_LENGTH_CAP`] reads as empty and is therefore rejected too.
//! - Component buffers that are packed, null-free `Float64` arrays are bulk copied
//!   into `f64` matrices. Any other numeric array is coerced element by element,
//!   with nulls becoming `NaN`.
//! - Complex matrices decode `real` and `imag` as equal-shape real matrices and
//!   interleave them. A missing `imag` reads as zeros.
//!
//! ## Encoding
//! Results always leave as `Float64` arrays with a two-entry `dims`. Complex
//! results are split into separate `real` and `imag` buffers.

use std::borrow::Cow;

use minarrow::{Array, Bitmask, FloatArray, NumericArray};
use num_complex::Complex;

use crate::config::{DIMS_FIELD, DIMS_LENGTH_CAP, IMAG_FIELD, REAL_FIELD};
use crate::errors::{KernelError, log_length_mismatch, log_shape_mismatch};
use crate::structs::dense::{DenseMatrix, checked_len};
use crate::traits::host::{HostObject, MatrixMaker};
use crate::traits::scalar::Scalar;
use crate::utils::has_nulls;

/// Real precision that host buffers (always doubles) convert into.
pub trait HostReal: Scalar<Real = Self> {
    /// Appends `values` converted to `Self`.
    fn extend_from_host(out: &mut Vec<Self>, values: &[f64]);

    fn to_host(self) -> f64;
}

impl HostReal for f64 {
    #[inline]
    fn extend_from_host(out: &mut Vec<f64>, values: &[f64]) {
        out.extend_from_slice(values);
    }

    #[inline(always)]
    fn to_host(self) -> f64 {
        self
    }
}

impl HostReal for f32 {
    #[inline]
    fn extend_from_host(out: &mut Vec<f32>, values: &[f64]) {
        out.extend(values.iter().map(|&v| v as f32));
    }

    #[inline(always)]
    fn to_host(self) -> f64 {
        self as f64
    }
}

/// Element type that can round-trip through a host matrix object.
pub trait HostElement: Scalar {
    fn decode<O: HostObject + ?Sized>(obj: &O) -> Result<DenseMatrix<Self>, KernelError>;

    fn encode<M: MatrixMaker + ?Sized>(m: &DenseMatrix<Self>, maker: &mut M) -> M::Output;
}

impl<R: HostReal> HostElement for R {
    #[inline]
    fn decode<O: HostObject + ?Sized>(obj: &O) -> Result<DenseMatrix<R>, KernelError> {
        decode_real(obj, REAL_FIELD)
    }

    #[inline]
    fn encode<M: MatrixMaker + ?Sized>(m: &DenseMatrix<R>, maker: &mut M) -> M::Output {
        encode_real(m, maker)
    }
}

macro_rules! impl_host_complex {
    ($t:ty) => {
        impl HostElement for Complex<$t> {
            #[inline]
            fn decode<O: HostObject + ?Sized>(
                obj: &O,
            ) -> Result<DenseMatrix<Complex<$t>>, KernelError> {
                decode_complex(obj)
            }

            #[inline]
            fn encode<M: MatrixMaker + ?Sized>(
                m: &DenseMatrix<Complex<$t>>,
                maker: &mut M,
            ) -> M::Output {
                encode_complex(m, maker)
            }
        }
    };
}

impl_host_complex!(f32);
impl_host_complex!(f64);

#[inline(always)]
fn is_valid(mask: Option<&Bitmask>, i: usize) -> bool {
    match mask {
        Some(m) if i < m.len => unsafe { m.get_unchecked(i) },
        _ => true,
    }
}

macro_rules! coerce_to_f64 {
    ($arr:expr) => {{
        let mask = $arr.null_mask.as_ref();
        $arr.data
            .iter()
            .enumerate()
            .map(|(i, &v)| if is_valid(mask, i) { v as f64 } else { f64::NAN })
            .collect::<Vec<f64>>()
    }};
}

/// Reads a host array as doubles.
///
/// Borrows packed null-free `Float64` data; coerces every other numeric variant.
pub fn host_values<'a>(arr: &'a Array, label: &str) -> Result<Cow<'a, [f64]>, KernelError> {
    let values = match arr {
        Array::NumericArray(NumericArray::Float64(a)) => {
            if has_nulls(None, a.null_mask.as_ref()) {
                Cow::Owned(coerce_to_f64!(a))
            } else {
                Cow::Borrowed(&a.data[..])
            }
        }
        Array::NumericArray(NumericArray::Float32(a)) => Cow::Owned(coerce_to_f64!(a)),
        Array::NumericArray(NumericArray::Int32(a)) => Cow::Owned(coerce_to_f64!(a)),
        Array::NumericArray(NumericArray::Int64(a)) => Cow::Owned(coerce_to_f64!(a)),
        Array::NumericArray(NumericArray::UInt32(a)) => Cow::Owned(coerce_to_f64!(a)),
        Array::NumericArray(NumericArray::UInt64(a)) => Cow::Owned(coerce_to_f64!(a)),
        _ => {
            return Err(KernelError::UnsupportedType(format!(
                "{}: expected a numeric array",
                label
            )));
        }
    };
    Ok(values)
}

/// Reads a short numeric descriptor array, such as `dims`.
///
/// Arrays longer than [`DIMS_LENGTH_CAP`] read as empty.
pub fn read_number_array(arr: &Array, label: &str) -> Result<Vec<f64>, KernelError> {
    let values = host_values(arr, label)?;
    if values.len() > DIMS_LENGTH_CAP {
        return Ok(Vec::new());
    }
    Ok(values.into_owned())
}

fn dim_from(value: f64, label: &str) -> Result<usize, KernelError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= usize::MAX as f64 {
        return Err(KernelError::InvalidArguments(format!(
            "{}: dimension must be a non-negative integer, got {}",
            label, value
        )));
    }
    Ok(value as usize)
}

/// Reads `[rows, cols]` from the object's `dims` field.
///
/// Shapes whose element count overflows `usize` are rejected here, before any
/// buffer is sized from them.
pub fn decode_dims<O: HostObject + ?Sized>(obj: &O) -> Result<(usize, usize), KernelError> {
    let arr = obj.field(DIMS_FIELD).ok_or_else(|| {
        KernelError::InvalidArguments(format!("missing '{}' field", DIMS_FIELD))
    })?;
    let dims = read_number_array(arr, DIMS_FIELD)?;
    let (rows, cols) = match dims.as_slice() {
        [rows] => (dim_from(*rows, DIMS_FIELD)?, 1),
        [rows, cols] => (dim_from(*rows, DIMS_FIELD)?, dim_from(*cols, DIMS_FIELD)?),
        _ => {
            return Err(KernelError::InvalidArguments(format!(
                "'{}' must hold 1 or 2 entries, got {}",
                DIMS_FIELD,
                dims.len()
            )));
        }
    };
    if rows.checked_mul(cols).is_none() {
        return Err(KernelError::InvalidArguments(format!(
            "'{}': {}x{} overflows the element count",
            DIMS_FIELD, rows, cols
        )));
    }
    Ok((rows, cols))
}

/// Decodes the component buffer `name` into a real `rows x cols` matrix.
///
/// # Errors
/// - `InvalidArguments` for a missing or malformed `dims`, or a missing buffer.
/// - `UnsupportedType` for a non-numeric buffer.
/// - `LengthMismatch` when the buffer holds fewer than `rows * cols` values.
pub fn decode_real<R, O>(obj: &O, name: &str) -> Result<DenseMatrix<R>, KernelError>
where
    R: HostReal,
    O: HostObject + ?Sized,
{
    let (rows, cols) = decode_dims(obj)?;
    let arr = obj
        .field(name)
        .ok_or_else(|| KernelError::InvalidArguments(format!("missing '{}' field", name)))?;
    let values = host_values(arr, name)?;

    let count = checked_len::<R>(rows, cols)?;
    if values.len() < count {
        return Err(KernelError::LengthMismatch(log_length_mismatch(
            "decode_real",
            count,
            values.len(),
        )));
    }

    let mut data = Vec::with_capacity(count);
    R::extend_from_host(&mut data, &values[..count]);
    DenseMatrix::from_vec(rows, cols, data)
}

/// Pairs equal-shape real and imaginary parts element-wise.
pub fn interleave<R: HostReal>(
    re: &DenseMatrix<R>,
    im: &DenseMatrix<R>,
) -> Result<DenseMatrix<Complex<R>>, KernelError>
where
    Complex<R>: Scalar,
{
    if re.shape() != im.shape() {
        return Err(KernelError::ShapeMismatch(log_shape_mismatch(
            "interleave",
            re.shape(),
            im.shape(),
        )));
    }
    let data = re
        .data()
        .iter()
        .zip(im.data())
        .map(|(&r, &i)| Complex::new(r, i))
        .collect();
    DenseMatrix::from_vec(re.rows(), re.cols(), data)
}

/// Decodes `real` and `imag` and interleaves them. A missing `imag` reads as zeros.
pub fn decode_complex<R, O>(obj: &O) -> Result<DenseMatrix<Complex<R>>, KernelError>
where
    R: HostReal,
    Complex<R>: Scalar,
    O: HostObject + ?Sized,
{
    let re = decode_real::<R, O>(obj, REAL_FIELD)?;
    let im = if obj.field(IMAG_FIELD).is_some() {
        decode_real::<R, O>(obj, IMAG_FIELD)?
    } else {
        DenseMatrix::zeros(re.rows(), re.cols())
    };
    interleave(&re, &im)
}

#[inline]
fn f64_array(values: Vec<f64>) -> Array {
    Array::NumericArray(NumericArray::Float64(FloatArray::from_slice(&values).into()))
}

#[inline]
fn dims_array(rows: usize, cols: usize) -> Array {
    f64_array(vec![rows as f64, cols as f64])
}

/// Encodes a real matrix as `(dims, real)`.
pub fn encode_real<R, M>(m: &DenseMatrix<R>, maker: &mut M) -> M::Output
where
    R: HostReal,
    M: MatrixMaker + ?Sized,
{
    let real = m.data().iter().map(|&v| v.to_host()).collect();
    maker.real(dims_array(m.rows(), m.cols()), f64_array(real))
}

/// Encodes a complex matrix as `(dims, real, imag)` with split components.
pub fn encode_complex<R, M>(m: &DenseMatrix<Complex<R>>, maker: &mut M) -> M::Output
where
    R: HostReal,
    Complex<R>: Scalar,
    M: MatrixMaker + ?Sized,
{
    let mut real = Vec::with_capacity(m.len());
    let mut imag = Vec::with_capacity(m.len());
    for z in m.data() {
        real.push(z.re.to_host());
        imag.push(z.im.to_host());
    }
    maker.complex(dims_array(m.rows(), m.cols()), f64_array(real), f64_array(imag))
}
