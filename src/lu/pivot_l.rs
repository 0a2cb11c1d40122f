// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::def::EMPTY;
use crate::lu::GlobalLU;
use crate::{Error, Result};

/// Threshold partial pivoting on column `jcol`.
///
/// The pivot is the entry of largest magnitude among the rows of `L(:,jcol)`,
/// unless the diagonal entry (row `iperm_c[jcol]` of `A`) is nonzero and at
/// least `diag_pivot_thresh` times as large, in which case the diagonal is
/// kept. The pivot row is moved to position `jcol - fsupc` of the supernode,
/// in the subscripts and in the values of all its columns, so that `L` is
/// indexed the same way as `A`. The entries below the pivot are divided by
/// it.
///
/// Returns the pivot row. A column without candidate rows, or with all
/// candidates zero, is reported as `SingularMatrix` with the index of the
/// column in `A`, i.e. `iperm_c[jcol]`.
pub(crate) fn pivot_l(
    jcol: usize,
    diag_pivot_thresh: f64,
    perm_r: &mut [usize],
    iperm_c: &[usize],
    glu: &mut GlobalLU,
) -> Result<usize> {
    let fsupc = glu.xsup[glu.supno[jcol]];
    let nsupc = jcol - fsupc; // columns before jcol in the supernode
    let lptr = glu.xlsub[fsupc];
    let nsupr = glu.xlsub[fsupc + 1] - lptr;
    let lda = glu.xlusup[fsupc + 1] - glu.xlusup[fsupc];
    let sup_ptr = glu.xlusup[fsupc];
    let col_ptr = glu.xlusup[jcol];
    let lsub = &mut glu.lsub[lptr..lptr + nsupr];
    let lusup = &mut glu.lusup;

    // largest magnitude for partial pivoting
    let diagind = iperm_c[jcol];
    let mut pivmax = -1.0;
    let mut pivptr = nsupc;
    let mut diag = EMPTY;
    for isub in nsupc..nsupr {
        let rtemp = f64::abs(lusup[col_ptr + isub]);
        if rtemp > pivmax {
            pivmax = rtemp;
            pivptr = isub;
        }
        if lsub[isub] == diagind {
            diag = isub;
        }
    }

    if pivmax <= 0.0 {
        // pivmax < 0: structurally empty, otherwise numerically zero
        let pivrow = if pivmax < 0.0 { diagind } else { lsub[pivptr] };
        perm_r[pivrow] = jcol;
        log::debug!(
            "zero pivot at step {}, column {} of A ({})",
            jcol,
            diagind,
            if pivmax < 0.0 { "structural" } else { "numerical" }
        );
        return Err(Error::SingularMatrix { column: diagind });
    }

    let thresh = diag_pivot_thresh * pivmax;
    if diag != EMPTY {
        let rtemp = f64::abs(lusup[col_ptr + diag]);
        if rtemp != 0.0 && rtemp >= thresh {
            pivptr = diag;
        }
    }
    let pivrow = lsub[pivptr];
    perm_r[pivrow] = jcol;

    if pivptr != nsupc {
        lsub.swap(pivptr, nsupc);
        // the two rows in the whole supernode
        for icol in 0..=nsupc {
            let itemp = sup_ptr + icol * lda;
            lusup.swap(itemp + pivptr, itemp + nsupc);
        }
    }

    let temp = 1.0 / lusup[col_ptr + nsupc];
    for x in &mut lusup[col_ptr + nsupc + 1..col_ptr + nsupr] {
        *x *= temp;
    }

    Ok(pivrow)
}
