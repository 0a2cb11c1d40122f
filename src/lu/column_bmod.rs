// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::def::*;
use crate::lu::dense::supernode_column_update;
use crate::lu::kernel_bmod::kernel_bmod;
use crate::lu::{mem_xpand, GlobalLU};
use crate::Result;

/// Numeric update of column `jcol` inside the panel starting at `fpanelc`.
///
/// First applies the segments `segrep[..nseg]` found by the column dfs that
/// belong to other supernodes, restricted to their columns in the panel
/// (the columns before it were applied by the panel update). Then copies
/// `dense` into `L\U(:,jcol)` of the supernode of `jcol`, and finally
/// applies the columns of its own supernode from `max(fsupc, fpanelc)` on.
pub(crate) fn column_bmod(
    jcol: usize,
    nseg: usize,
    dense: &mut [f64],
    tempv: &mut [f64],
    segrep: &[usize],
    repfnz: &[usize],
    fpanelc: usize,
    glu: &mut GlobalLU,
    memory: &MemoryConfig,
) -> Result<()> {
    let jsupno = glu.supno[jcol];

    for &krep in segrep[..nseg].iter().rev() {
        let ksupno = glu.supno[krep];
        if ksupno == jsupno {
            continue;
        }
        // outside the rectangular supernode
        let fsupc = glu.xsup[ksupno];
        let fst_col = usize::max(fsupc, fpanelc);
        // distance from the supernode to the panel, zero if fsupc >= fpanelc
        let d_fsupc = fst_col - fsupc;

        let luptr = glu.xlusup[fst_col] + d_fsupc;
        let lptr = glu.xlsub[fsupc] + d_fsupc;
        let kfnz = usize::max(repfnz[krep], fpanelc);

        let segsize = krep - kfnz + 1;
        let nsupc = krep - fst_col + 1;
        let nsupr = glu.xlsub[fsupc + 1] - glu.xlsub[fsupc];
        let nrow = nsupr - d_fsupc - nsupc;
        let lda = glu.xlusup[fst_col + 1] - glu.xlusup[fst_col];

        kernel_bmod(
            segsize,
            dense,
            tempv,
            &glu.lusup,
            luptr,
            lda,
            nrow,
            &glu.lsub,
            lptr,
            kfnz - fst_col,
        );
    }

    // copy the SPA dense into L\U(:,jcol)
    let mut nextlu = glu.xlusup[jcol];
    let fsupc = glu.xsup[jsupno];
    let nsupr = glu.xlsub[fsupc + 1] - glu.xlsub[fsupc];
    let new_next = nextlu + nsupr;
    while new_next > glu.nzlumax {
        mem_xpand(
            &mut glu.lusup,
            &mut glu.nzlumax,
            nextlu,
            MemType::Lusup,
            &mut glu.num_expansions,
            memory,
        )?;
    }
    for isub in glu.xlsub[fsupc]..glu.xlsub[fsupc + 1] {
        let irow = glu.lsub[isub];
        glu.lusup[nextlu] = dense[irow];
        dense[irow] = 0.0;
        nextlu += 1;
    }
    glu.xlusup[jcol + 1] = nextlu;

    // updates within the supernode start at the first column of the panel
    // or of the supernode, whichever is bigger
    let fst_col = usize::max(fsupc, fpanelc);
    if fst_col < jcol {
        let d_fsupc = fst_col - fsupc;
        let luptr = glu.xlusup[fst_col] + d_fsupc;
        let nsupc = jcol - fst_col; // excluding jcol
        let nrow = nsupr - d_fsupc - nsupc;
        let ufirst = glu.xlusup[jcol] + d_fsupc;
        supernode_column_update(&mut glu.lusup, luptr, nsupr, ufirst, nsupc, nrow);
    }

    Ok(())
}
