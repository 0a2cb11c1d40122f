// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::def::*;
use crate::lu::dfs::{dfs_kernel, DfsTraits};
use crate::lu::{mem_xpand, GlobalLU};
use crate::Result;

struct ColumnDfsTraits<'a> {
    jcol: usize,
    jsuper: usize,
    memory: &'a MemoryConfig,
}

impl DfsTraits for ColumnDfsTraits<'_> {
    fn store(
        &mut self,
        glu: &mut GlobalLU,
        nextl: &mut usize,
        krow: usize,
        kmark: usize,
    ) -> Result<()> {
        if *nextl >= glu.nzlmax {
            mem_xpand(
                &mut glu.lsub,
                &mut glu.nzlmax,
                *nextl,
                MemType::Lsub,
                &mut glu.num_expansions,
                self.memory,
            )?;
        }
        glu.lsub[*nextl] = krow;
        *nextl += 1;

        // a fill row that column jcol-1 did not have
        if self.jcol == 0 || kmark != self.jcol - 1 {
            self.jsuper = EMPTY;
        }
        Ok(())
    }

    fn update_segrep(&mut self, _: usize, _: usize) -> bool {
        true
    }
}

/// Symbolic factorization of column `jcol` inside its panel.
///
/// Continues the depth first search from the rows `lsub_col` left by the
/// panel dfs (consumed and reset to `EMPTY`), appending the rows of
/// `L(:,jcol)` directly to `glu.lsub`. New segments are appended to
/// `segrep[nseg..]`.
///
/// Then decides whether `jcol` joins the supernode of `jcol-1`: its row
/// structure must equal that of `jcol-1` minus the pivot row of `jcol-1`,
/// and the supernode must have fewer than `maxsuper` columns. When a new
/// supernode starts and the previous one has at least three columns, only
/// the subscripts of its first and last column are kept.
pub(crate) fn column_dfs(
    m: usize,
    jcol: usize,
    perm_r: &[usize],
    maxsuper: usize,
    nseg: &mut usize,
    lsub_col: &mut [usize],
    segrep: &mut [usize],
    repfnz: &mut [usize],
    xprune: &mut [usize],
    marker: &mut [usize],
    parent: &mut [usize],
    xplore: &mut [usize],
    glu: &mut GlobalLU,
    memory: &MemoryConfig,
) -> Result<()> {
    let mut nextl = glu.xlsub[jcol];
    let marker2 = &mut marker[2 * m..3 * m];
    let mut traits = ColumnDfsTraits {
        jcol,
        jsuper: glu.supno[jcol],
        memory,
    };

    for k in 0..m {
        let krow = lsub_col[k];
        if krow == EMPTY {
            break;
        }
        lsub_col[k] = EMPTY;
        if marker2[krow] == jcol {
            continue; // visited before
        }
        dfs_kernel(
            jcol,
            perm_r,
            nseg,
            segrep,
            repfnz,
            xprune,
            marker2,
            parent,
            xplore,
            glu,
            &mut nextl,
            krow,
            &mut traits,
        )?;
    }

    let mut jsuper = traits.jsuper;
    let mut nsuper = glu.supno[jcol];

    if jcol == 0 {
        nsuper = 0;
        glu.supno[0] = 0;
    } else {
        let jcolm1 = jcol - 1;
        let fsupc = glu.xsup[nsuper];
        let jptr = glu.xlsub[jcol]; // not yet compressed
        let jm1ptr = glu.xlsub[jcolm1];

        if nextl - jptr + 1 != jptr - jm1ptr {
            jsuper = EMPTY;
        }
        if jcol - fsupc >= maxsuper {
            jsuper = EMPTY;
        }

        if jsuper == EMPTY {
            // jcol starts a new supernode
            if fsupc + 1 < jcolm1 {
                // keep the subscripts of the first and last column of nsuper
                let ito = glu.xlsub[fsupc + 1];
                glu.xlsub[jcolm1] = ito;
                let istop = ito + jptr - jm1ptr;
                xprune[jcolm1] = istop;
                glu.xlsub[jcol] = istop;

                glu.lsub.copy_within(jm1ptr..nextl, ito);
                nextl = ito + (nextl - jm1ptr);
            }
            nsuper += 1;
            glu.supno[jcol] = nsuper;
        }
    }

    glu.xsup[nsuper + 1] = jcol + 1;
    glu.supno[jcol + 1] = nsuper;
    xprune[jcol] = nextl;
    glu.xlsub[jcol + 1] = nextl;

    Ok(())
}
