//! Common test utilities
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slu::SparseColMat;

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Symmetric tridiagonal matrix with 4 on the diagonal and -1 next to it.
pub fn tridiagonal(n: usize) -> SparseColMat {
    let mut triplets = vec![];
    for j in 0..n {
        triplets.push((j, j, 4.0));
        if j > 0 {
            triplets.push((j - 1, j, -1.0));
            triplets.push((j, j - 1, -1.0));
        }
    }
    SparseColMat::from_triplets(n, n, &triplets).unwrap()
}

/// Dense 4x4 circulant with first row [1, 2, 3, 4], determinant -160.
pub fn circulant4() -> SparseColMat {
    let mut triplets = vec![];
    for i in 0..4 {
        for j in 0..4 {
            triplets.push((i, j, ((j + 4 - i) % 4 + 1) as f64));
        }
    }
    SparseColMat::from_triplets(4, 4, &triplets).unwrap()
}

/// Random sparse matrix with about `per_col` off-diagonal entries per column.
/// With `dominant` set the diagonal dominates its column, otherwise it is
/// small and partial pivoting has to reorder the rows.
pub fn random_sparse(n: usize, per_col: usize, dominant: bool, seed: u64) -> SparseColMat {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut triplets = vec![];
    for j in 0..n {
        let mut sum = 0.0;
        for _ in 0..per_col {
            let i = rng.gen_range(0..n);
            if i != j {
                let v: f64 = rng.gen_range(-1.0..1.0);
                sum += v.abs();
                triplets.push((i, j, v));
            }
        }
        let d = if dominant {
            sum + 1.0
        } else {
            rng.gen_range(0.01..0.1)
        };
        triplets.push((j, j, d));
    }
    SparseColMat::from_triplets(n, n, &triplets).unwrap()
}

pub fn random_vec(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Dense column-major product of two matrices.
pub fn matmul(a: &SparseColMat, b: &SparseColMat) -> Vec<f64> {
    let (m, k, n) = (a.nrows(), a.ncols(), b.ncols());
    assert_eq!(k, b.nrows());
    let a = a.to_dense();
    let b = b.to_dense();
    let mut c = vec![0.0; m * n];
    for j in 0..n {
        for p in 0..k {
            let bpj = b[p + j * k];
            for i in 0..m {
                c[i + j * m] += a[i + p * m] * bpj;
            }
        }
    }
    c
}

/// Infinity norm of the residual `b - A*x`, scaled by `|A|*|x| + |b|`.
pub fn relative_residual(a: &SparseColMat, x: &[f64], b: &[f64]) -> f64 {
    let ax = a.as_ref().mul_vec(x);
    let r = ax
        .iter()
        .zip(b)
        .map(|(p, q)| (p - q).abs())
        .fold(0.0, f64::max);
    let norm_a = (0..a.ncols())
        .map(|j| a.as_ref().col(j).1.iter().map(|v| v.abs()).sum::<f64>())
        .fold(0.0, f64::max);
    let norm_x = x.iter().map(|v| v.abs()).fold(0.0, f64::max);
    let norm_b = b.iter().map(|v| v.abs()).fold(0.0, f64::max);
    r / (norm_a * norm_x + norm_b)
}
