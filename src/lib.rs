// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

// Link OpenBLAS when the openblas feature is enabled.
// This forces the linker to include the OpenBLAS symbols.
#[cfg(feature = "openblas")]
extern crate openblas_src;

pub mod operators;

pub mod kernels {
    pub mod blas_lapack;
    pub mod diagnostics;
    pub mod dispatch;
    pub mod marshal;
    pub mod multiply;
    pub mod solve;
    pub mod transpose;
}

pub mod structs {
    pub mod dense;
    pub mod host;
}

pub mod traits {
    pub mod host;
    pub mod scalar;
}

pub mod config;

pub mod errors;

pub mod utils;

pub use errors::KernelError;
pub use kernels::diagnostics::{NumericalWarning, WarningSink};
pub use operators::MatrixOperator;
pub use structs::dense::DenseMatrix;
pub use structs::host::{HostMatrix, HostMatrixMaker};
pub use traits::host::{HostObject, MatrixMaker};
pub use traits::scalar::Scalar;
