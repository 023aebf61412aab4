// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Scalar trait** - *Real and complex element domains*
//!
//! Every dense kernel in this crate is written once, generically over [`Scalar`],
//! and monomorphised for the four LAPACK precisions:
//!
//! | Type          | LAPACK prefix |
//! |---------------|---------------|
//! | `f32`         | `S`           |
//! | `f64`         | `D`           |
//! | `Complex32`   | `C`           |
//! | `Complex64`   | `Z`           |
//!
//! Complex elements are `num_complex::Complex<T>`, which is `#[repr(C)]` `{re, im}`
//! and layout-compatible with the Fortran `COMPLEX`/`COMPLEX*16` types the
//! BLAS/LAPACK bindings expect. The default value is `(0, 0)`.

use std::fmt::{Debug, Display, LowerExp};

use num_complex::Complex;
use num_traits::{Float, FromPrimitive};

/// Element domain of a dense matrix.
///
/// Besides the arithmetic identities, the trait carries the per-domain workspace
/// multipliers of the equilibrated solve driver (`xGESVX`), so the dispatcher can
/// allocate its scratch buffers without branching on the concrete type.
pub trait Scalar: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Underlying real precision (`f32` or `f64`).
    type Real: Float + FromPrimitive + Debug + Display + LowerExp + Send + Sync + 'static;

    /// True for the complex domains.
    const IS_COMPLEX: bool;

    /// `WORK` length of `xGESVX`, as a multiple of `N`.
    const WORK_FACTOR: usize;

    /// Real-valued `RWORK` length of `xGESVX`/`xGELSY`, as a multiple of `N`.
    /// Zero for the real domains, which take no such buffer.
    const RWORK_FACTOR: usize;

    /// Integer `IWORK` length of `xGESVX`, as a multiple of `N`.
    /// Zero for the complex domains.
    const IWORK_FACTOR: usize;

    fn zero() -> Self;

    fn one() -> Self;

    /// Complex conjugate. The identity for real domains.
    fn conjugate(self) -> Self;

    /// Real part. The identity for real domains.
    fn re(self) -> Self::Real;
}

macro_rules! impl_scalar_real {
    ($t:ty) => {
        impl Scalar for $t {
            type Real = $t;
            const IS_COMPLEX: bool = false;
            const WORK_FACTOR: usize = 4;
            const RWORK_FACTOR: usize = 0;
            const IWORK_FACTOR: usize = 1;

            #[inline(always)]
            fn zero() -> Self {
                0.0
            }
            #[inline(always)]
            fn one() -> Self {
                1.0
            }
            #[inline(always)]
            fn conjugate(self) -> Self {
                self
            }
            #[inline(always)]
            fn re(self) -> $t {
                self
            }
        }
    };
}

macro_rules! impl_scalar_complex {
    ($t:ty) => {
        impl Scalar for Complex<$t> {
            type Real = $t;
            const IS_COMPLEX: bool = true;
            const WORK_FACTOR: usize = 2;
            const RWORK_FACTOR: usize = 2;
            const IWORK_FACTOR: usize = 0;

            #[inline(always)]
            fn zero() -> Self {
                Complex::new(0.0, 0.0)
            }
            #[inline(always)]
            fn one() -> Self {
                Complex::new(1.0, 0.0)
            }
            #[inline(always)]
            fn conjugate(self) -> Self {
                Complex::new(self.re, -self.im)
            }
            #[inline(always)]
            fn re(self) -> $t {
                self.re
            }
        }
    };
}

impl_scalar_real!(f32);
impl_scalar_real!(f64);
impl_scalar_complex!(f32);
impl_scalar_complex!(f64);

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::{Complex32, Complex64};

    #[test]
    fn default_complex_is_zero() {
        assert_eq!(Complex64::default(), <Complex64 as Scalar>::zero());
        assert_eq!(Complex32::default(), <Complex32 as Scalar>::zero());
    }

    #[test]
    fn conjugate_negates_imaginary_only() {
        let z = Complex64::new(1.5, -2.25);
        assert_eq!(z.conjugate(), Complex64::new(1.5, 2.25));
        assert_eq!(z.conjugate().conjugate(), z);
        assert_eq!(3.0_f64.conjugate(), 3.0);
        assert_eq!((-0.5_f32).conjugate(), -0.5);
    }

    #[test]
    fn real_part() {
        assert_eq!(Complex32::new(2.0, -7.0).re(), 2.0);
        assert_eq!(4.0_f64.re(), 4.0);
    }

    #[test]
    fn workspace_factors_match_lapack_drivers() {
        assert!(!<f64 as Scalar>::IS_COMPLEX);
        assert!(<Complex64 as Scalar>::IS_COMPLEX);
        assert_eq!(<f64 as Scalar>::WORK_FACTOR, 4);
        assert_eq!(<f64 as Scalar>::IWORK_FACTOR, 1);
        assert_eq!(<Complex64 as Scalar>::WORK_FACTOR, 2);
        assert_eq!(<Complex64 as Scalar>::RWORK_FACTOR, 2);
    }
}
