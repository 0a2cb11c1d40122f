// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::dense::unit_lower_solve;
use crate::lu::gemm::sparselu_gemm;

/// Update the column held in `dense` by one supernodal segment.
///
/// The segment covers `segsize` columns of a supernode whose row subscripts
/// start at `lsub[lptr]` and whose values start at `lusup[luptr]` with
/// leading dimension `lda`; `no_zeros` leading rows of the segment are zero
/// and `nrow` rows lie below the diagonal block.
///
/// The segment is gathered from `dense`, solved with the unit lower diagonal
/// block, multiplied by the rectangular block below it into `tempv` and
/// scattered back. `tempv` must hold at least `segsize + nrow` entries.
pub(crate) fn kernel_bmod(
    segsize: usize,
    dense: &mut [f64],
    tempv: &mut [f64],
    lusup: &[f64],
    luptr: usize,
    lda: usize,
    nrow: usize,
    lsub: &[usize],
    lptr: usize,
    no_zeros: usize,
) {
    if segsize == 1 {
        kernel_bmod_one(dense, lusup, luptr, lda, nrow, lsub, lptr, no_zeros);
    } else {
        kernel_bmod_general(segsize, dense, tempv, lusup, luptr, lda, nrow, lsub, lptr, no_zeros);
    }
}

pub(crate) fn kernel_bmod_general(
    segsize: usize,
    dense: &mut [f64],
    tempv: &mut [f64],
    lusup: &[f64],
    mut luptr: usize,
    lda: usize,
    nrow: usize,
    lsub: &[usize],
    lptr: usize,
    no_zeros: usize,
) {
    let (u, rest) = tempv.split_at_mut(segsize);
    let l = &mut rest[..nrow];

    // gather the U segment
    let rows = &lsub[lptr + no_zeros..lptr + no_zeros + segsize + nrow];
    for (ui, &irow) in u.iter_mut().zip(rows) {
        *ui = dense[irow];
    }

    // dense triangular solve from the start of the effective triangle
    luptr += lda * no_zeros + no_zeros;
    unit_lower_solve(segsize, &lusup[luptr..], lda, u);

    // l = B*u
    luptr += segsize;
    l.fill(0.0);
    sparselu_gemm(nrow, 1, segsize, &lusup[luptr..], lda, u, segsize, l, nrow);

    let (urows, lrows) = rows.split_at(segsize);
    for (&irow, &ui) in urows.iter().zip(u.iter()) {
        dense[irow] = ui;
    }
    for (&irow, li) in lrows.iter().zip(l.iter_mut()) {
        dense[irow] -= *li;
        *li = 0.0;
    }
}

/// Segment of size one: a scaled column subtraction, two rows per pass.
pub(crate) fn kernel_bmod_one(
    dense: &mut [f64],
    lusup: &[f64],
    luptr: usize,
    lda: usize,
    nrow: usize,
    lsub: &[usize],
    lptr: usize,
    no_zeros: usize,
) {
    let f = dense[lsub[lptr + no_zeros]];
    let start = luptr + lda * no_zeros + no_zeros + 1;
    let a = &lusup[start..start + nrow];
    let irow = &lsub[lptr + no_zeros + 1..lptr + no_zeros + 1 + nrow];

    let mut i = 0;
    while i + 1 < nrow {
        let (i0, i1) = (irow[i], irow[i + 1]);
        let d0 = dense[i0] - f * a[i];
        let d1 = dense[i1] - f * a[i + 1];
        dense[i0] = d0;
        dense[i1] = d1;
        i += 2;
    }
    if i < nrow {
        dense[irow[i]] -= f * a[i];
    }
}
