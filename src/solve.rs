// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::{MatrixU, SupernodalMatrix};
use crate::{Error, Perm, Result};

/// Solve `A*X = B` with the factorization `P*A*Q = L*U`, overwriting `x`
/// (holding `B` on entry) with `X = Q*U^{-1}*L^{-1}*P*B`.
///
/// `x` holds `nrhs` right-hand sides of length `n` in column-major order.
pub(crate) fn solve(
    perm_r: &Perm,
    perm_c: &Perm,
    l: SupernodalMatrix<'_>,
    u: MatrixU<'_>,
    x: &mut [f64],
    nrhs: usize,
) -> Result<()> {
    let n = l.rows();
    if x.len() != n * nrhs {
        return Err(Error::invalid_argument(
            "b",
            format!("expected {} values ({} x {}), got {}", n * nrhs, n, nrhs, x.len()),
        ));
    }
    if n == 0 || nrhs == 0 {
        return Ok(());
    }

    let (_, pinv) = perm_r.arrays();
    let (qfwd, _) = perm_c.arrays();
    let mut work = vec![0.0; n * nrhs];

    // work = P*B
    for (wj, xj) in work.chunks_exact_mut(n).zip(x.chunks_exact(n)) {
        for (i, &xi) in xj.iter().enumerate() {
            wj[pinv[i]] = xi;
        }
    }

    l.solve_in_place(&mut work, nrhs);
    u.solve_in_place(&mut work, nrhs);

    // x = Q*work
    for (xj, wj) in x.chunks_exact_mut(n).zip(work.chunks_exact(n)) {
        for (k, &wk) in wj.iter().enumerate() {
            xj[qfwd[k]] = wk;
        }
    }

    Ok(())
}
