// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::def::*;
use crate::lu::{mem_xpand, GlobalLU};
use crate::Result;

/// Move the `U` segments of column `jcol` that lie outside its own
/// supernode from `dense` into `ucol`/`usub`, zeroing `dense`.
///
/// Unlike `L`, the row indices of `U` are stored in their final (pivot)
/// order.
pub(crate) fn copy_to_ucol(
    jcol: usize,
    nseg: usize,
    segrep: &[usize],
    repfnz: &[usize],
    perm_r: &[usize],
    dense: &mut [f64],
    glu: &mut GlobalLU,
    memory: &MemoryConfig,
) -> Result<()> {
    let jsupno = glu.supno[jcol];
    let mut nextu = glu.xusub[jcol];

    for &krep in segrep[..nseg].iter().rev() {
        let ksupno = glu.supno[krep];
        if ksupno == jsupno {
            continue;
        }
        let kfnz = repfnz[krep];
        if kfnz == EMPTY {
            continue; // zero segment
        }
        let fsupc = glu.xsup[ksupno];
        let isub = glu.xlsub[fsupc] + kfnz - fsupc;
        let segsize = krep - kfnz + 1;
        let new_next = nextu + segsize;
        while new_next > glu.nzumax {
            mem_xpand(
                &mut glu.ucol,
                &mut glu.nzumax,
                nextu,
                MemType::Ucol,
                &mut glu.num_expansions,
                memory,
            )?;
            mem_xpand(
                &mut glu.usub,
                &mut glu.nzumax,
                nextu,
                MemType::Usub,
                &mut glu.num_expansions,
                memory,
            )?;
        }

        for &irow in &glu.lsub[isub..isub + segsize] {
            glu.usub[nextu] = perm_r[irow];
            glu.ucol[nextu] = dense[irow];
            dense[irow] = 0.0;
            nextu += 1;
        }
    }

    glu.xusub[jcol + 1] = nextu;
    Ok(())
}
