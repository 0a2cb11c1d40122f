// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::def::*;
use crate::lu::{mem_xpand, GlobalLU};
use crate::sparse::PermutedCols;
use crate::Result;

/// Determine the union of the row structures of the columns `jcol..=kcol` of
/// a relaxed supernode.
///
/// The structure is stored once at `xlsub[jcol]` for the numerical values
/// and, if the supernode has more than one column, a second time at
/// `xlsub[kcol]` for pruning. Visited rows are marked with
/// `marker[row] == kcol`.
pub(crate) fn snode_dfs(
    jcol: usize,
    kcol: usize,
    a: PermutedCols<'_>,
    xprune: &mut [usize],
    marker: &mut [usize],
    glu: &mut GlobalLU,
    memory: &MemoryConfig,
) -> Result<()> {
    let nsuper = if glu.supno[jcol] == EMPTY {
        0
    } else {
        glu.supno[jcol] + 1
    };
    glu.supno[jcol] = nsuper;
    let mut nextl = glu.xlsub[jcol];

    for i in jcol..=kcol {
        for &krow in a.col(i).0 {
            if marker[krow] != kcol {
                // first visit of krow
                marker[krow] = kcol;
                if nextl >= glu.nzlmax {
                    mem_xpand(
                        &mut glu.lsub,
                        &mut glu.nzlmax,
                        nextl,
                        MemType::Lsub,
                        &mut glu.num_expansions,
                        memory,
                    )?;
                }
                glu.lsub[nextl] = krow;
                nextl += 1;
            }
        }
        glu.supno[i] = nsuper;
    }

    if jcol < kcol {
        // copy of the subscripts for pruning
        let first = glu.xlsub[jcol];
        let new_next = nextl + (nextl - first);
        while new_next > glu.nzlmax {
            mem_xpand(
                &mut glu.lsub,
                &mut glu.nzlmax,
                nextl,
                MemType::Lsub,
                &mut glu.num_expansions,
                memory,
            )?;
        }
        glu.lsub.copy_within(first..nextl, nextl);
        for i in jcol + 1..=kcol {
            glu.xlsub[i] = nextl;
        }
        nextl = new_next;
    }

    glu.xsup[nsuper + 1] = kcol + 1;
    glu.supno[kcol + 1] = nsuper;
    xprune[kcol] = nextl;
    glu.xlsub[kcol + 1] = nextl;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lu::mem_init;
    use crate::SparseColMat;

    #[test]
    fn test_snode_dfs_union_and_copy() {
        // columns 0 and 1 form a relaxed supernode, column 1 has fill in row 3
        let a = SparseColMat::from_triplets(
            4,
            2,
            &[(0, 0, 1.0), (2, 0, 1.0), (1, 1, 1.0), (3, 1, 1.0), (0, 1, 1.0)],
        )
        .unwrap();
        let fwd = [0, 1];
        let cfg = MemoryConfig::default();
        let mut glu = GlobalLU::default();
        mem_init(4, 2, a.nnz(), 1, &mut glu, &cfg).unwrap();
        let mut xprune = vec![0; 2];
        let mut marker = vec![EMPTY; 4];

        snode_dfs(0, 1, PermutedCols::new(a.as_ref(), &fwd), &mut xprune, &mut marker, &mut glu, &cfg)
            .unwrap();

        assert_eq!(glu.supno[..3], [0, 0, 0]);
        assert_eq!(glu.xsup[..2], [0, 2]);
        assert_eq!(glu.xlsub[..3], [0, 4, 8]);
        assert_eq!(glu.lsub[..4], [0, 2, 1, 3]);
        assert_eq!(glu.lsub[4..8], [0, 2, 1, 3]);
        assert_eq!(xprune[1], 8);
        assert!(glu.nzlmax >= 8);
    }
}
