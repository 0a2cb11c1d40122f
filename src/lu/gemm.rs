// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

const BLOCK_K: usize = 64;
const BLOCK_M: usize = 256;

/// Computes `C += A*B` for column-major blocks, `A` being `m`-by-`d`, `B`
/// `d`-by-`n` and `C` `m`-by-`n`.
///
/// The product is blocked by `BLOCK_K` columns of `A` and `BLOCK_M` rows so
/// that a panel of `A` stays in cache across the columns of `B`, and four
/// columns of `A` are applied per pass over a column of `C`.
pub(crate) fn sparselu_gemm(
    m: usize,
    n: usize,
    d: usize,
    a: &[f64],
    lda: usize,
    b: &[f64],
    ldb: usize,
    c: &mut [f64],
    ldc: usize,
) {
    if m == 0 || n == 0 || d == 0 {
        return;
    }

    for k0 in (0..d).step_by(BLOCK_K) {
        let k1 = usize::min(k0 + BLOCK_K, d);
        for i0 in (0..m).step_by(BLOCK_M) {
            let i1 = usize::min(i0 + BLOCK_M, m);
            let acol = |k: usize| &a[k * lda + i0..k * lda + i1];

            for j in 0..n {
                let bj = &b[j * ldb..j * ldb + d];
                let cj = &mut c[j * ldc + i0..j * ldc + i1];

                let mut k = k0;
                while k + 4 <= k1 {
                    let (b0, b1, b2, b3) = (bj[k], bj[k + 1], bj[k + 2], bj[k + 3]);
                    let (a0, a1, a2, a3) = (acol(k), acol(k + 1), acol(k + 2), acol(k + 3));
                    for (i, ci) in cj.iter_mut().enumerate() {
                        *ci += b0 * a0[i] + b1 * a1[i] + b2 * a2[i] + b3 * a3[i];
                    }
                    k += 4;
                }
                while k < k1 {
                    let bk = bj[k];
                    if bk != 0.0 {
                        for (ci, &ai) in cj.iter_mut().zip(acol(k)) {
                            *ci += bk * ai;
                        }
                    }
                    k += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(m: usize, n: usize, d: usize, a: &[f64], lda: usize, b: &[f64], ldb: usize, c: &mut [f64], ldc: usize) {
        for j in 0..n {
            for k in 0..d {
                for i in 0..m {
                    c[i + j * ldc] += a[i + k * lda] * b[k + j * ldb];
                }
            }
        }
    }

    #[test]
    fn test_gemm_matches_naive_product() {
        for &(m, n, d) in &[(1, 1, 1), (3, 2, 5), (7, 3, 9), (300, 2, 70)] {
            let lda = m + 1;
            let ldb = d + 2;
            let ldc = m + 3;
            let a: Vec<f64> = (0..lda * d).map(|x| ((x * 7) % 13) as f64 - 6.0).collect();
            let b: Vec<f64> = (0..ldb * n).map(|x| ((x * 5) % 11) as f64 - 5.0).collect();
            let mut c: Vec<f64> = (0..ldc * n).map(|x| x as f64).collect();
            let mut expected = c.clone();

            sparselu_gemm(m, n, d, &a, lda, &b, ldb, &mut c, ldc);
            naive(m, n, d, &a, lda, &b, ldb, &mut expected, ldc);

            for (x, y) in c.iter().zip(&expected) {
                assert!((x - y).abs() < 1e-9, "{} != {}", x, y);
            }
        }
    }
}
