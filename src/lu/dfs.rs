// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln
//
// Depth first search in the graph of the supernodal L.

use crate::lu::def::EMPTY;
use crate::lu::GlobalLU;
use crate::Result;

/// The parts of the dfs that differ between the panel and the column search.
pub(crate) trait DfsTraits {
    /// Place row `krow` of `L` at `*nextl` and advance. `kmark` is the marker
    /// of `krow` before this visit.
    fn store(&mut self, glu: &mut GlobalLU, nextl: &mut usize, krow: usize, kmark: usize)
        -> Result<()>;

    /// Returns true if the finished representative `krep` must be appended to
    /// `segrep`.
    fn update_segrep(&mut self, krep: usize, jj: usize) -> bool;
}

/// Depth first search from row `krow` of column `jj` in the pruned graph of
/// the supernodal `L`.
///
/// A row that is not yet pivoted belongs to the structure of `L(:,jj)` and is
/// handed to `traits`. A pivoted row leads to the representative (last
/// column) of its supernode; the search continues from there along
/// `lsub[xlsub[krep]..xprune[krep]]` unless the supernode has been reached
/// before, in which case only `repfnz_col[krep]` is lowered. Finished
/// representatives are appended to `segrep` in topological order.
///
/// The recursion is replaced by an explicit stack: `parent[krep]` links each
/// representative to the one it was reached from (`EMPTY` at the bottom) and
/// `xplore[krep]` is the position at which its scan resumes.
///
/// Visited rows are marked with `marker[row] == jj`.
pub(crate) fn dfs_kernel<T: DfsTraits>(
    jj: usize,
    perm_r: &[usize],
    nseg: &mut usize,
    segrep: &mut [usize],
    repfnz_col: &mut [usize],
    xprune: &[usize],
    marker: &mut [usize],
    parent: &mut [usize],
    xplore: &mut [usize],
    glu: &mut GlobalLU,
    nextl_col: &mut usize,
    krow: usize,
    traits: &mut T,
) -> Result<()> {
    let kmark = marker[krow];
    marker[krow] = jj;
    let kperm = perm_r[krow];
    if kperm == EMPTY {
        // krow is in L
        return traits.store(glu, nextl_col, krow, kmark);
    }

    // krow is in U
    let mut krep = glu.rep_of(kperm);
    let myfnz = repfnz_col[krep];
    if myfnz != EMPTY {
        // representative visited before
        if myfnz > kperm {
            repfnz_col[krep] = kperm;
        }
        return Ok(());
    }

    parent[krep] = EMPTY;
    repfnz_col[krep] = kperm;
    let mut xdfs = glu.xlsub[krep];
    let mut maxdfs = xprune[krep];

    loop {
        while xdfs < maxdfs {
            let kchild = glu.lsub[xdfs];
            xdfs += 1;
            let chmark = marker[kchild];
            if chmark == jj {
                continue;
            }
            marker[kchild] = jj;
            let chperm = perm_r[kchild];

            if chperm == EMPTY {
                traits.store(glu, nextl_col, kchild, chmark)?;
            } else {
                let chrep = glu.rep_of(chperm);
                let myfnz = repfnz_col[chrep];
                if myfnz != EMPTY {
                    if myfnz > chperm {
                        repfnz_col[chrep] = chperm;
                    }
                } else {
                    // go deeper down G(L)
                    xplore[krep] = xdfs;
                    parent[chrep] = krep;
                    krep = chrep;
                    repfnz_col[krep] = chperm;
                    xdfs = glu.xlsub[krep];
                    maxdfs = xprune[krep];
                }
            }
        }

        // krep has no more unexplored neighbours: place it in postorder and
        // backtrack. repfnz_col[krep] may still be lowered later.
        if traits.update_segrep(krep, jj) {
            segrep[*nseg] = krep;
            *nseg += 1;
        }

        let kpar = parent[krep];
        if kpar == EMPTY {
            break;
        }
        krep = kpar;
        xdfs = xplore[krep];
        maxdfs = xprune[krep];
    }

    Ok(())
}
