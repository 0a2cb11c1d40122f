// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln
//
// Dense triangular kernels on column-major blocks inside the supernodal
// storage. A block of `n` columns with leading dimension `lda` starting at
// `a[0]` has element `(i, j)` at `a[i + j*lda]`.

/// Solve `L*x = b` in place, `L` the `n`-by-`n` unit lower triangle of `a`.
pub(crate) fn unit_lower_solve(n: usize, a: &[f64], lda: usize, x: &mut [f64]) {
    for j in 0..n {
        let xj = x[j];
        if xj != 0.0 {
            let col = &a[j * lda..j * lda + n];
            for i in j + 1..n {
                x[i] -= col[i] * xj;
            }
        }
    }
}

/// Solve `L*X = B` in place for `nrhs` columns of `b` with leading dimension
/// `ldb`.
pub(crate) fn unit_lower_solve_mat(
    n: usize,
    a: &[f64],
    lda: usize,
    b: &mut [f64],
    ldb: usize,
    nrhs: usize,
) {
    for k in 0..nrhs {
        unit_lower_solve(n, a, lda, &mut b[k * ldb..k * ldb + n]);
    }
}

/// Solve `U*x = b` in place, `U` the `n`-by-`n` upper triangle of `a`
/// including its diagonal.
pub(crate) fn upper_solve(n: usize, a: &[f64], lda: usize, x: &mut [f64]) {
    for j in (0..n).rev() {
        x[j] /= a[j + j * lda];
        let xj = x[j];
        if xj != 0.0 {
            let col = &a[j * lda..j * lda + j];
            for i in 0..j {
                x[i] -= col[i] * xj;
            }
        }
    }
}

pub(crate) fn upper_solve_mat(
    n: usize,
    a: &[f64],
    lda: usize,
    b: &mut [f64],
    ldb: usize,
    nrhs: usize,
) {
    for k in 0..nrhs {
        upper_solve(n, a, lda, &mut b[k * ldb..k * ldb + n]);
    }
}

/// Update column `jcol` of a supernode by the columns before it in the same
/// supernode.
///
/// The `nsupc` updating columns start at `lusup[luptr]` with leading
/// dimension `lda`; column `jcol` starts at `lusup[ufirst]` at the same row
/// offset. Its leading `nsupc` entries are solved with the unit lower
/// diagonal block, the next `nrow` entries are updated by the block below.
pub(crate) fn supernode_column_update(
    lusup: &mut [f64],
    luptr: usize,
    lda: usize,
    ufirst: usize,
    nsupc: usize,
    nrow: usize,
) {
    debug_assert!(luptr + (nsupc - 1) * lda + nsupc + nrow <= ufirst);
    let (block, col) = lusup.split_at_mut(ufirst);
    let (u, l) = col[..nsupc + nrow].split_at_mut(nsupc);

    unit_lower_solve(nsupc, &block[luptr..], lda, u);

    // l -= B*u
    for (c, &uc) in u.iter().enumerate() {
        if uc != 0.0 {
            let b = &block[luptr + nsupc + c * lda..luptr + nsupc + c * lda + nrow];
            for (li, &bi) in l.iter_mut().zip(b) {
                *li -= bi * uc;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_lower_solve() {
        // L = [1 0 0; 2 1 0; 3 4 1] stored with lda = 4
        let a = [1.0, 2.0, 3.0, 9.0, 0.0, 1.0, 4.0, 9.0, 0.0, 0.0, 1.0, 9.0];
        let mut x = [1.0, 4.0, 15.0];
        unit_lower_solve(3, &a, 4, &mut x);
        assert_eq!(x, [1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_upper_solve_mat() {
        // U = [2 1; 0 4]
        let a = [2.0, 0.0, 1.0, 4.0];
        let mut b = [4.0, 8.0, 3.0, 4.0];
        upper_solve_mat(2, &a, 2, &mut b, 2, 2);
        assert_eq!(b, [1.0, 2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_supernode_column_update() {
        // one updating column [1; 2; 3], updated column [4; 5; 6]
        let mut lusup = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        supernode_column_update(&mut lusup, 0, 3, 3, 1, 2);
        assert_eq!(lusup, vec![1.0, 2.0, 3.0, 4.0, -3.0, -6.0]);
    }
}
