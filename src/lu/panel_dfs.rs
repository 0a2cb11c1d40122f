// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::def::EMPTY;
use crate::lu::dfs::{dfs_kernel, DfsTraits};
use crate::lu::GlobalLU;
use crate::sparse::PermutedCols;
use crate::Result;

struct PanelDfsTraits<'a> {
    jcol: usize,
    marker1: &'a mut [usize],
    panel_lsub: &'a mut [usize],
}

impl DfsTraits for PanelDfsTraits<'_> {
    fn store(&mut self, _: &mut GlobalLU, nextl: &mut usize, krow: usize, _: usize) -> Result<()> {
        self.panel_lsub[*nextl] = krow;
        *nextl += 1;
        Ok(())
    }

    fn update_segrep(&mut self, krep: usize, jj: usize) -> bool {
        // first time this panel reaches krep
        let mark = self.marker1[krep];
        if mark == EMPTY || mark < self.jcol {
            self.marker1[krep] = jj;
            return true;
        }
        false
    }
}

/// Symbolic factorization of the panel `jcol..jcol+w`.
///
/// For each column `jj` of the panel, `A(:,jj)` is scattered into its chunk
/// of `dense` and a depth first search is started from each of its rows.
/// The rows of `L(:,jj)` found so far are written to the `jj`-th chunk of
/// `panel_lsub` (terminated by `EMPTY`), the first nonzero of each segment to
/// the `jj`-th chunk of `repfnz`.
///
/// On return `segrep[0..nseg]` holds the union of the segment
/// representatives of all panel columns in topological order, each listed
/// once.
pub(crate) fn panel_dfs(
    m: usize,
    w: usize,
    jcol: usize,
    a: PermutedCols<'_>,
    perm_r: &[usize],
    nseg: &mut usize,
    dense: &mut [f64],
    panel_lsub: &mut [usize],
    segrep: &mut [usize],
    repfnz: &mut [usize],
    xprune: &[usize],
    marker: &mut [usize],
    parent: &mut [usize],
    xplore: &mut [usize],
    glu: &mut GlobalLU,
) -> Result<()> {
    let (marker, rest) = marker.split_at_mut(m);
    let mut traits = PanelDfsTraits {
        jcol,
        marker1: &mut rest[..m],
        panel_lsub,
    };
    *nseg = 0;

    for jj in jcol..jcol + w {
        let mut nextl_col = (jj - jcol) * m;
        let repfnz_col = &mut repfnz[nextl_col..nextl_col + m];
        let dense_col = &mut dense[nextl_col..nextl_col + m];

        let (rows, values) = a.col(jj);
        for (&krow, &value) in rows.iter().zip(values) {
            dense_col[krow] = value;
            if marker[krow] == jj {
                continue; // visited before
            }
            dfs_kernel(
                jj,
                perm_r,
                nseg,
                segrep,
                repfnz_col,
                xprune,
                marker,
                parent,
                xplore,
                glu,
                &mut nextl_col,
                krow,
                &mut traits,
            )?;
        }
    }

    Ok(())
}
