// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::def::EMPTY;
use crate::lu::dense::unit_lower_solve_mat;
use crate::lu::gemm::sparselu_gemm;
use crate::lu::kernel_bmod::kernel_bmod;
use crate::lu::GlobalLU;

/// Numeric update of the panel `jcol..jcol+w` by the supernodes found by
/// [`panel_dfs()`](crate::lu::panel_dfs), taken in topological order.
///
/// For a supernode of two or more columns the segments of all panel columns
/// are gathered into a dense block `U` in `tempv`, solved with the unit
/// lower diagonal block and multiplied by the rectangular block below it in
/// one call to [`sparselu_gemm()`]. Single column supernodes update the
/// panel column by column through [`kernel_bmod()`].
pub(crate) fn panel_bmod(
    m: usize,
    w: usize,
    jcol: usize,
    nseg: usize,
    dense: &mut [f64],
    tempv: &mut [f64],
    segrep: &[usize],
    repfnz: &[usize],
    glu: &GlobalLU,
) {
    for &krep in segrep[..nseg].iter().rev() {
        let fsupc = glu.xsup[glu.supno[krep]];
        let nsupc = krep - fsupc + 1;
        let nsupr = glu.xlsub[fsupc + 1] - glu.xlsub[fsupc];
        let nrow = nsupr - nsupc;
        let lptr = glu.xlsub[fsupc];
        let lda = glu.xlusup[fsupc + 1] - glu.xlusup[fsupc];

        // first nonzero of the segment in each panel column
        let kfnz_of = |jj: usize| repfnz[(jj - jcol) * m + krep];

        if nsupc >= 2 {
            // actual size of the dense block
            let mut u_rows = 0;
            let mut u_cols = 0;
            for jj in jcol..jcol + w {
                let kfnz = kfnz_of(jj);
                if kfnz == EMPTY {
                    continue; // zero segment
                }
                u_cols += 1;
                u_rows = usize::max(u_rows, krep - kfnz + 1);
            }
            if u_cols == 0 {
                continue;
            }
            let ldu = u_rows;
            let (u, rest) = tempv.split_at_mut(w * ldu);
            let l = &mut rest[..nrow * u_cols];

            // gather U
            let mut u_col = 0;
            for jj in jcol..jcol + w {
                let kfnz = kfnz_of(jj);
                if kfnz == EMPTY {
                    continue;
                }
                let dense_col = &dense[(jj - jcol) * m..(jj - jcol + 1) * m];
                let segsize = krep - kfnz + 1;
                let off = u_rows - segsize;
                let isub = lptr + kfnz - fsupc;
                let ucol = &mut u[u_col * ldu..(u_col + 1) * ldu];
                ucol[..off].fill(0.0);
                for (ui, &irow) in ucol[off..].iter_mut().zip(&glu.lsub[isub..isub + segsize]) {
                    *ui = dense_col[irow];
                }
                u_col += 1;
            }

            // U = A \ U with the unit lower triangle ending at krep
            let no_zeros = krep + 1 - u_rows - fsupc;
            let luptr = glu.xlusup[fsupc] + lda * no_zeros + no_zeros;
            unit_lower_solve_mat(u_rows, &glu.lusup[luptr..], lda, u, ldu, u_cols);

            // L = B*U
            l.fill(0.0);
            sparselu_gemm(
                nrow,
                u_cols,
                u_rows,
                &glu.lusup[luptr + u_rows..],
                lda,
                u,
                ldu,
                l,
                nrow,
            );

            // scatter U and L
            let mut u_col = 0;
            for jj in jcol..jcol + w {
                let kfnz = kfnz_of(jj);
                if kfnz == EMPTY {
                    continue;
                }
                let dense_col = &mut dense[(jj - jcol) * m..(jj - jcol + 1) * m];
                let segsize = krep - kfnz + 1;
                let off = u_rows - segsize;
                let isub = lptr + kfnz - fsupc;
                let rows = &glu.lsub[isub..isub + segsize + nrow];

                let ucol = &mut u[u_col * ldu + off..(u_col + 1) * ldu];
                for (&irow, ui) in rows[..segsize].iter().zip(ucol.iter_mut()) {
                    dense_col[irow] = *ui;
                    *ui = 0.0;
                }
                let lcol = &mut l[u_col * nrow..(u_col + 1) * nrow];
                for (&irow, li) in rows[segsize..].iter().zip(lcol.iter_mut()) {
                    dense_col[irow] -= *li;
                    *li = 0.0;
                }
                u_col += 1;
            }
        } else {
            for jj in jcol..jcol + w {
                let kfnz = kfnz_of(jj);
                if kfnz == EMPTY {
                    continue;
                }
                let dense_col = &mut dense[(jj - jcol) * m..(jj - jcol + 1) * m];
                kernel_bmod(
                    krep - kfnz + 1,
                    dense_col,
                    tempv,
                    &glu.lusup,
                    glu.xlusup[fsupc],
                    lda,
                    nrow,
                    &glu.lsub,
                    lptr,
                    kfnz - fsupc,
                );
            }
        }
    }
}
