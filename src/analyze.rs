// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::{col_etree, renumber_etree, tree_postorder};
use crate::{Error, Perm, Result, SparseColMatRef};

/// Result of the symbolic analysis.
#[derive(Debug, Clone)]
pub(crate) struct Analysis {
    /// Column permutation `Q`: the fill-reducing ordering followed by the
    /// postorder of the column elimination tree.
    pub(crate) perm_c: Perm,
    /// Column elimination tree of `A*Q`, numbered in postorder
    /// (`etree[j] > j`, roots point to `n`).
    pub(crate) etree: Vec<usize>,
}

/// Compute the column elimination tree of `A` with its columns permuted by
/// `col_perm` (identity if `None`), postorder it and compose the postorder
/// into the column permutation.
///
/// Postordering keeps the columns of each subtree contiguous, so that
/// supernodes and relaxed supernodes are formed by consecutive columns.
pub(crate) fn analyze(a: SparseColMatRef<'_>, col_perm: Option<&Perm>) -> Result<Analysis> {
    let n = a.ncols();
    if a.nrows() != n {
        return Err(Error::invalid_argument(
            "a",
            format!("matrix must be square, got {}x{}", a.nrows(), n),
        ));
    }
    let perm_c = match col_perm {
        Some(perm) if perm.len() != n => {
            return Err(Error::invalid_argument(
                "col_perm",
                format!("expected length {}, got {}", n, perm.len()),
            ));
        }
        Some(perm) => perm.clone(),
        None => Perm::identity(n),
    };

    let (fwd, inv) = perm_c.arrays();
    let (parent, _) = col_etree(a, Some(fwd));
    let post = tree_postorder(&parent);
    let etree = renumber_etree(&parent, &post);

    // original column i goes to position post[inv[i]]
    let inv: Vec<usize> = inv.iter().map(|&k| post[k]).collect();
    let perm_c = Perm::from_inverse(inv)?;

    log::debug!(
        "analyzed {}x{} pattern with {} nonzeros, {} etree roots",
        n,
        n,
        a.nnz(),
        etree.iter().filter(|&&p| p == n).count()
    );

    Ok(Analysis { perm_c, etree })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SparseColMat;

    #[test]
    fn test_analyze_composes_postorder() {
        // reversed arrow: column 0 is dense, so the etree of the reversed
        // ordering is a chain that is already postordered
        let a = SparseColMat::from_triplets(
            3,
            3,
            &[(0, 0, 1.0), (1, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0), (2, 2, 1.0)],
        )
        .unwrap();
        let q = Perm::new_checked(vec![2, 1, 0]).unwrap();

        let analysis = analyze(a.as_ref(), Some(&q)).unwrap();

        assert_eq!(analysis.etree, vec![1, 2, 3]);
        assert_eq!(analysis.perm_c, q);
    }

    #[test]
    fn test_analyze_postorders_etree() {
        let n = 10;
        let mut triplets = vec![];
        for j in 0..n {
            triplets.push((j, j, 2.0));
            triplets.push(((j * 3 + 1) % n, j, 1.0));
        }
        let a = SparseColMat::from_triplets(n, n, &triplets).unwrap();

        let analysis = analyze(a.as_ref(), None).unwrap();

        for (j, &p) in analysis.etree.iter().enumerate() {
            assert!(p > j);
        }
        assert_eq!(analysis.perm_c.len(), n);
    }

    #[test]
    fn test_analyze_rejects_bad_input() {
        let a = SparseColMat::from_triplets(2, 3, &[(0, 0, 1.0)]).unwrap();
        assert!(analyze(a.as_ref(), None).is_err());

        let a = SparseColMat::from_triplets(2, 2, &[(0, 0, 1.0), (1, 1, 1.0)]).unwrap();
        let q = Perm::identity(3);
        assert!(matches!(
            analyze(a.as_ref(), Some(&q)),
            Err(Error::InvalidArgument { arg: "col_perm", .. })
        ));
    }
}
