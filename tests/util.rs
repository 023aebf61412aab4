#![allow(unused)]

use dense_kernels::DenseMatrix;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn assert_close(a: f64, e: f64, tol: f64) {
    if e.is_nan() {
        assert!(a.is_nan(), "expected NaN, got {a}");
        return;
    }
    if e.is_infinite() {
        assert!(
            a.is_infinite() && a.is_sign_positive() == e.is_sign_positive(),
            "expected {e}, got {a}"
        );
        return;
    }
    let scale = 1.0_f64.max(e.abs());
    let ok = (a - e).abs() <= tol * scale;
    assert!(ok, "mismatch: got {a}, expect {e} (tol={tol})");
}

pub fn assert_slice_close(a: &[f64], e: &[f64], tol: f64) {
    assert_eq!(a.len(), e.len(), "len mismatch");
    for (i, (&ai, &ei)) in a.iter().zip(e.iter()).enumerate() {
        if ei.is_nan() {
            assert!(ai.is_nan(), "idx {i}: expected NaN, got {ai}");
            continue;
        }
        let scale = 1.0_f64.max(ei.abs());
        let ok = (ai - ei).abs() <= tol * scale;
        assert!(ok, "idx {i}: got {ai}, expect {ei} (tol={tol})");
    }
}

pub fn assert_complex_slice_close(a: &[Complex64], e: &[Complex64], tol: f64) {
    assert_eq!(a.len(), e.len(), "len mismatch");
    for (i, (ai, ei)) in a.iter().zip(e.iter()).enumerate() {
        let scale = 1.0_f64.max(ei.norm());
        let ok = (ai - ei).norm() <= tol * scale;
        assert!(ok, "idx {i}: got {ai}, expect {ei} (tol={tol})");
    }
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Uniform entries in [-1, 1).
pub fn random_real(rng: &mut StdRng, rows: usize, cols: usize) -> DenseMatrix<f64> {
    DenseMatrix::from_fn(rows, cols, |_, _| rng.random_range(-1.0..1.0))
}

pub fn random_complex(rng: &mut StdRng, rows: usize, cols: usize) -> DenseMatrix<Complex64> {
    DenseMatrix::from_fn(rows, cols, |_, _| {
        Complex64::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
    })
}

/// Random matrix plus `n` on the diagonal: strictly diagonally dominant, so
/// well conditioned.
pub fn well_conditioned_real(rng: &mut StdRng, n: usize) -> DenseMatrix<f64> {
    let mut a = random_real(rng, n, n);
    for i in 0..n {
        a.set(i, i, a.get(i, i) + n as f64);
    }
    a
}

pub fn well_conditioned_complex(rng: &mut StdRng, n: usize) -> DenseMatrix<Complex64> {
    let mut a = random_complex(rng, n, n);
    for i in 0..n {
        a.set(i, i, a.get(i, i) + Complex64::new(2.0 * n as f64, 0.0));
    }
    a
}

/// Frobenius norm of a real matrix.
pub fn frobenius(m: &DenseMatrix<f64>) -> f64 {
    m.data().iter().map(|v| v * v).sum::<f64>().sqrt()
}

pub fn frobenius_complex(m: &DenseMatrix<Complex64>) -> f64 {
    m.data().iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
}

/// Naive column-major product, independent of BLAS.
pub fn naive_product(a: &DenseMatrix<f64>, b: &DenseMatrix<f64>) -> DenseMatrix<f64> {
    DenseMatrix::from_fn(a.rows(), b.cols(), |i, j| {
        (0..a.cols()).map(|p| a.get(i, p) * b.get(p, j)).sum()
    })
}

pub fn naive_product_complex(
    a: &DenseMatrix<Complex64>,
    b: &DenseMatrix<Complex64>,
) -> DenseMatrix<Complex64> {
    DenseMatrix::from_fn(a.rows(), b.cols(), |i, j| {
        (0..a.cols()).map(|p| a.get(i, p) * b.get(p, j)).sum()
    })
}
