// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration Constants** - *Marshaling and Diagnostics Parameters*
//!
//! Compile-time constants controlling how host matrix objects are read and how
//! diagnostics are tagged. The transpose tile edge lives in the build-generated
//! `TRANSPOSE_BLOCK` constant instead, see `build.rs`.

/// Maximum accepted length of a numeric descriptor array read from a host object.
///
/// Descriptor arrays (such as `dims`) that claim more entries than this are read as
/// empty, which the decoder then rejects as malformed. Callers probe this boundary
/// deliberately, so it is kept at exactly this value.
pub const DIMS_LENGTH_CAP: usize = 100;

/// Host field holding the dimension descriptor `[rows, cols]`.
pub const DIMS_FIELD: &str = "dims";

/// Host field holding the real components. Default buffer selector for decoding.
pub const REAL_FIELD: &str = "real";

/// Host field holding the imaginary components of a complex matrix.
pub const IMAG_FIELD: &str = "imag";

/// `log` target for numerical diagnostics and dispatch tracing.
pub const LOG_TARGET: &str = "dense_kernels";
