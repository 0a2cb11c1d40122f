// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::def::*;
use crate::lu::*;
use crate::sparse::PermutedCols;
use crate::{Error, Perm, Result, SparseColMatRef};

/// Nonzero counts of a completed factorization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FactorStats {
    pub(crate) nnz_l: usize,
    pub(crate) nnz_u: usize,
}

fn check_params(params: &Params) -> Result<()> {
    if params.panel_size == 0 {
        return Err(Error::invalid_argument("panel_size", "must be positive"));
    }
    if params.maxsuper == 0 {
        return Err(Error::invalid_argument("maxsuper", "must be positive"));
    }
    if params.fillfactor == 0 {
        return Err(Error::invalid_argument("fillfactor", "must be positive"));
    }
    if !(0.0..=1.0).contains(&params.diag_pivot_thresh) {
        return Err(Error::invalid_argument(
            "diag_pivot_thresh",
            format!("{} is not in [0, 1]", params.diag_pivot_thresh),
        ));
    }
    if !(params.memory.alpha >= 1.0) {
        return Err(Error::invalid_argument(
            "memory.alpha",
            format!("{} is less than 1", params.memory.alpha),
        ));
    }
    Ok(())
}

/// Factorize `A*Q` into `P*A*Q = L*U` with supernodes.
///
/// `perm_c` and `etree` come from the analysis of the pattern of `A`. The
/// columns are processed left to right: a relaxed supernode (a small
/// subtree at the bottom of `etree`) is factorized as a whole with dense
/// updates inside it; other columns are processed in panels of up to
/// `params.panel_size` columns, stopping short of the next relaxed
/// supernode. A panel first runs the symbolic dfs and the updates from
/// supernodes to its left for all its columns at once, then each column is
/// finished by its own dfs, the updates from inside the panel, pivoting and
/// pruning.
///
/// On return `perm_r[i]` is the pivot step of row `i`, and `glu` holds `L`
/// in supernodal form with row indices of `P*A` and `U` in compressed
/// columns. On error the contents of `glu` and `perm_r` are undefined.
pub(crate) fn factorize(
    a: SparseColMatRef<'_>,
    perm_c: &Perm,
    etree: &[usize],
    params: &Params,
    perm_r: &mut Vec<usize>,
    glu: &mut GlobalLU,
) -> Result<FactorStats> {
    check_params(params)?;
    let m = a.nrows();
    let n = a.ncols();
    debug_assert_eq!(etree.len(), n);

    perm_r.clear();
    perm_r.resize(m, EMPTY);
    if n == 0 {
        *glu = GlobalLU::default();
        return Ok(FactorStats::default());
    }

    let memory = &params.memory;
    let maxsuper = params.maxsuper;
    let (iperm_c, _) = perm_c.arrays();
    let mat = PermutedCols::new(a, iperm_c);

    mem_init(m, n, a.nnz(), params.fillfactor, glu, memory)?;
    let tempv_len = num_temp_v(m, params.panel_size, usize::max(maxsuper, params.relax));
    let mut workspace = Workspace::new(m, n, params.panel_size, tempv_len)?;
    let Workspace {
        marker,
        parent,
        xplore,
        segrep,
        repfnz,
        panel_lsub,
        xprune,
        dense,
        tempv,
    } = &mut workspace;

    let relax_end = relax_snode(etree, params.relax);

    let mut jcol = 0;
    while jcol < n {
        if relax_end[jcol] != EMPTY {
            // relaxed supernode jcol..=kcol
            let kcol = relax_end[jcol];
            snode_dfs(jcol, kcol, mat, xprune, &mut marker[..m], glu, memory)?;

            let nextu = glu.xusub[jcol];
            let nextlu = glu.xlusup[jcol];
            let fsupc = glu.xsup[glu.supno[jcol]];
            let nsupr = glu.xlsub[fsupc + 1] - glu.xlsub[fsupc];
            let new_next = nextlu + nsupr * (kcol - jcol + 1);
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

            // left-looking factorization of each column inside the supernode
            for icol in jcol..=kcol {
                glu.xusub[icol + 1] = nextu;
                let (rows, values) = mat.col(icol);
                for (&i, &v) in rows.iter().zip(values) {
                    dense[i] = v;
                }
                snode_bmod(icol, fsupc, dense, glu);
                pivot_l(icol, params.diag_pivot_thresh, perm_r, iperm_c, glu)?;
            }

            jcol = kcol + 1;
        } else {
            // panel must not overlap the next relaxed supernode
            let mut w = usize::min(params.panel_size, n - jcol);
            for k in jcol + 1..jcol + w {
                if relax_end[k] != EMPTY {
                    w = k - jcol;
                    break;
                }
            }

            // symbolic factorization and updates from the left of the panel
            let mut nseg1 = 0;
            panel_dfs(
                m, w, jcol, mat, perm_r, &mut nseg1, dense, panel_lsub, segrep, repfnz, xprune,
                marker, parent, xplore, glu,
            )?;
            panel_bmod(m, w, jcol, nseg1, dense, tempv, segrep, repfnz, glu);

            for jj in jcol..jcol + w {
                let k = (jj - jcol) * m;
                let repfnz_k = &mut repfnz[k..k + m];
                let dense_k = &mut dense[k..k + m];

                // new segments are appended after the panel segments
                let mut nseg = nseg1;
                column_dfs(
                    m,
                    jj,
                    perm_r,
                    maxsuper,
                    &mut nseg,
                    &mut panel_lsub[k..k + m],
                    segrep,
                    repfnz_k,
                    xprune,
                    marker,
                    parent,
                    xplore,
                    glu,
                    memory,
                )?;

                column_bmod(
                    jj,
                    nseg - nseg1,
                    dense_k,
                    tempv,
                    &segrep[nseg1..],
                    repfnz_k,
                    jcol,
                    glu,
                    memory,
                )?;
                copy_to_ucol(jj, nseg, segrep, repfnz_k, perm_r, dense_k, glu, memory)?;

                let pivrow = pivot_l(jj, params.diag_pivot_thresh, perm_r, iperm_c, glu)?;
                prune_l(jj, perm_r, pivrow, nseg, segrep, repfnz_k, xprune, glu);

                for &irep in &segrep[..nseg] {
                    repfnz_k[irep] = EMPTY;
                }
            }

            jcol += w;
        }
    }

    let (nnz_l, nnz_u) = countnz(n, glu);
    fixup_l(n, perm_r, glu);

    if cfg!(feature = "debug") {
        assert!(glu.check_supernodes(n), "inconsistent supernode partition");
    }

    log::debug!(
        "factorized {}x{}: {} supernodes, nnz(L) = {}, nnz(U) = {}, {} expansions",
        m,
        n,
        glu.last_supno(n) + 1,
        nnz_l,
        nnz_u,
        glu.num_expansions
    );

    Ok(FactorStats { nnz_l, nnz_u })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use crate::SparseColMat;

    fn run(a: &SparseColMat, params: &Params) -> Result<(Vec<usize>, GlobalLU)> {
        let analysis = analyze(a.as_ref(), None)?;
        let mut perm_r = Vec::new();
        let mut glu = GlobalLU::default();
        factorize(a.as_ref(), &analysis.perm_c, &analysis.etree, params, &mut perm_r, &mut glu)?;
        Ok((perm_r, glu))
    }

    #[test]
    fn test_diagonal_matrix() {
        let a = SparseColMat::from_triplets(3, 3, &[(0, 0, 2.0), (1, 1, 3.0), (2, 2, 4.0)]).unwrap();
        let (perm_r, glu) = run(&a, &Params::default()).unwrap();

        assert_eq!(perm_r, vec![0, 1, 2]);
        assert_eq!(glu.last_supno(3), 2);
        assert_eq!(glu.lusup[..3], [2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_panel_path_without_relaxation() {
        // relax = 1 leaves only single column relaxed supernodes at the
        // leaves, the rest of the chain goes through panels
        let n = 6;
        let mut triplets = vec![];
        for j in 0..n {
            triplets.push((j, j, 4.0));
            if j > 0 {
                triplets.push((j - 1, j, -1.0));
                triplets.push((j, j - 1, -1.0));
            }
        }
        let a = SparseColMat::from_triplets(n, n, &triplets).unwrap();
        let params = Params {
            relax: 1,
            panel_size: 4,
            ..Default::default()
        };
        let (perm_r, glu) = run(&a, &params).unwrap();

        assert_eq!(perm_r, (0..n).collect::<Vec<_>>());
        assert!(glu.check_supernodes(n));
    }

    #[test]
    fn test_invalid_params() {
        let a = SparseColMat::from_triplets(1, 1, &[(0, 0, 1.0)]).unwrap();
        let params = Params {
            panel_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            run(&a, &params),
            Err(Error::InvalidArgument { arg: "panel_size", .. })
        ));
    }
}
