// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::dense::supernode_column_update;
use crate::lu::GlobalLU;

/// Numeric update of column `jcol` of the relaxed supernode starting at
/// `fsupc`.
///
/// Gathers the column from `dense` into `lusup` (zeroing `dense`) and
/// applies the columns `fsupc..jcol` of the same supernode. Storage for the
/// whole supernode must have been reserved in `lusup`.
pub(crate) fn snode_bmod(jcol: usize, fsupc: usize, dense: &mut [f64], glu: &mut GlobalLU) {
    let mut nextlu = glu.xlusup[jcol];
    for isub in glu.xlsub[fsupc]..glu.xlsub[fsupc + 1] {
        let irow = glu.lsub[isub];
        glu.lusup[nextlu] = dense[irow];
        dense[irow] = 0.0;
        nextlu += 1;
    }
    glu.xlusup[jcol + 1] = nextlu;

    if fsupc < jcol {
        let luptr = glu.xlusup[fsupc];
        let nsupr = glu.xlsub[fsupc + 1] - glu.xlsub[fsupc];
        let nsupc = jcol - fsupc;
        let ufirst = glu.xlusup[jcol];
        supernode_column_update(&mut glu.lusup, luptr, nsupr, ufirst, nsupc, nsupr - nsupc);
    }
}
