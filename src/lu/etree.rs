// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln
//
// Column elimination tree, postordering and relaxed supernodes.

use crate::lu::def::EMPTY;
use crate::SparseColMatRef;

// Find the root of the set containing `i`. Parent pointers on the find path
// are changed to the former grand parent (path halving).
fn etree_find(mut i: usize, pp: &mut [usize]) -> usize {
    let mut p = pp[i];
    let mut gp = pp[p];
    while gp != p {
        pp[i] = gp;
        i = gp;
        p = pp[i];
        gp = pp[p];
    }
    p
}

/// Compute the column elimination tree of `A`, that is the elimination tree
/// of `A'*A`, without forming `A'*A`.
///
/// Column `k` of the tree is column `perm[k]` of `A` when `perm` is given.
/// Each row clique of `A'*A` is replaced by a star centered at its first
/// column `first_row_elt[r]`, which has the same fill (Liu's algorithm with
/// disjoint sets). The diagonal is treated as present even when it is not
/// stored.
///
/// Returns `(parent, first_row_elt)`. `parent[j] == n` marks a root of the
/// elimination forest; `first_row_elt[i] == n` marks an empty row.
pub(crate) fn col_etree(a: SparseColMatRef<'_>, perm: Option<&[usize]>) -> (Vec<usize>, Vec<usize>) {
    let nc = a.ncols();
    let m = a.nrows();
    let diag_size = usize::min(nc, m);

    let mut root = vec![0; nc]; // root of subtree of etree
    let mut pp = vec![0; nc]; // disjoint sets
    let mut parent = vec![nc; nc];

    // first nonzero column in each row
    let mut first_row_elt = vec![nc; m];
    for (i, first) in first_row_elt.iter_mut().take(diag_size).enumerate() {
        *first = i;
    }
    for col in 0..nc {
        let pcol = perm.map_or(col, |perm| perm[col]);
        for &row in a.col(pcol).0 {
            first_row_elt[row] = usize::min(first_row_elt[row], col);
        }
    }

    for col in 0..nc {
        let mut found_diag = col >= m;
        pp[col] = col;
        let mut cset = col;
        root[cset] = col;
        parent[col] = nc;

        let pcol = perm.map_or(col, |perm| perm[col]);
        let mut rows = a.col(pcol).0.iter();
        loop {
            // the diagonal is visited once more if it is not stored
            let i = match rows.next() {
                Some(&i) => i,
                None if !found_diag => col,
                None => break,
            };
            if i == col {
                found_diag = true;
            }

            let row = first_row_elt[i];
            if row >= col {
                continue;
            }
            let rset = etree_find(row, &mut pp);
            let rroot = root[rset];
            if rroot != col {
                parent[rroot] = col;
                pp[cset] = rset;
                cset = rset;
                root[cset] = col;
            }
        }
    }

    (parent, first_row_elt)
}

/// Postorder a forest given by parent pointers (`parent[root] == n`).
///
/// Returns `post` of length `n+1` such that vertex `v` is the `post[v]`-th
/// vertex in postorder; the virtual root is `post[n] == n`. Lower numbered
/// children are visited first, so a tree that is already numbered in
/// postorder keeps its order.
///
/// The depth first search runs without recursion, walking `first_kid` and
/// `next_kid` linked lists, since the depth of the tree may be `n`.
pub(crate) fn tree_postorder(parent: &[usize]) -> Vec<usize> {
    let n = parent.len();
    let mut first_kid = vec![EMPTY; n + 1];
    let mut next_kid = vec![EMPTY; n + 1];
    let mut post = vec![0; n + 1];

    for v in (0..n).rev() {
        let dad = parent[v];
        next_kid[v] = first_kid[dad];
        first_kid[dad] = v;
    }

    let mut postnum = 0;
    let mut current = n;
    loop {
        let first = first_kid[current];
        if first != EMPTY {
            current = first;
            continue;
        }

        // no kid: number this node, then climb up to the next sibling
        post[current] = postnum;
        postnum += 1;
        if current == n {
            break;
        }
        let mut next = next_kid[current];
        while next == EMPTY {
            current = parent[current];
            post[current] = postnum;
            postnum += 1;
            if current == n {
                return post;
            }
            next = next_kid[current];
        }
        current = next;
    }

    post
}

/// Renumber `parent` by the postorder `post` from [`tree_postorder()`].
pub(crate) fn renumber_etree(parent: &[usize], post: &[usize]) -> Vec<usize> {
    let mut etree = vec![0; parent.len()];
    for (i, &p) in parent.iter().enumerate() {
        etree[post[i]] = post[p];
    }
    etree
}

/// Identify the initial relaxed supernodes of a postordered elimination tree.
///
/// A relaxed supernode is a subtree at the bottom of the tree whose root has
/// fewer than `relax` descendants. On return `relax_end[j]` is the last
/// column of the relaxed supernode starting at `j`, or `EMPTY` if no relaxed
/// supernode starts at `j`.
pub(crate) fn relax_snode(etree: &[usize], relax: usize) -> Vec<usize> {
    let n = etree.len();
    let mut descendants = vec![0; n];
    let mut relax_end = vec![EMPTY; n];

    for j in 0..n {
        let parent = etree[j];
        if parent != n {
            descendants[parent] += descendants[j] + 1;
        }
    }

    let mut j = 0;
    while j < n {
        let snode_start = j;
        let mut parent = etree[j];
        while parent != n && descendants[parent] < relax {
            j = parent;
            parent = etree[j];
        }
        // j is the last column of the supernode
        relax_end[snode_start] = j;
        j += 1;
        // search for a new leaf
        while j < n && descendants[j] != 0 {
            j += 1;
        }
    }

    relax_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SparseColMat;

    fn tridiagonal(n: usize) -> SparseColMat {
        let mut triplets = vec![];
        for j in 0..n {
            triplets.push((j, j, 4.0));
            if j > 0 {
                triplets.push((j - 1, j, -1.0));
                triplets.push((j, j - 1, -1.0));
            }
        }
        SparseColMat::from_triplets(n, n, &triplets).unwrap()
    }

    #[test]
    fn test_col_etree_tridiagonal_is_chain() {
        let a = tridiagonal(4);
        let (parent, first_row_elt) = col_etree(a.as_ref(), None);
        assert_eq!(parent, vec![1, 2, 3, 4]);
        assert_eq!(first_row_elt, vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_col_etree_diagonal_is_forest_of_roots() {
        let a = SparseColMat::from_triplets(3, 3, &[(0, 0, 1.0), (1, 1, 1.0), (2, 2, 1.0)]).unwrap();
        let (parent, _) = col_etree(a.as_ref(), None);
        assert_eq!(parent, vec![3, 3, 3]);
    }

    #[test]
    fn test_col_etree_arrow() {
        let a = SparseColMat::from_triplets(
            3,
            3,
            &[(0, 0, 1.0), (1, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0), (2, 2, 1.0)],
        )
        .unwrap();
        let (parent, _) = col_etree(a.as_ref(), None);
        assert_eq!(parent, vec![2, 2, 3]);
        assert_eq!(tree_postorder(&parent), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_col_etree_missing_diagonal() {
        // column 1 has no stored diagonal, but row 0 links it to column 0
        let a = SparseColMat::from_triplets(2, 2, &[(0, 0, 1.0), (1, 0, 1.0), (0, 1, 1.0)]).unwrap();
        let (parent, _) = col_etree(a.as_ref(), None);
        assert_eq!(parent, vec![1, 2]);
    }

    #[test]
    fn test_col_etree_with_permutation() {
        // reversing the columns of the arrow matrix
        let a = SparseColMat::from_triplets(
            3,
            3,
            &[(0, 0, 1.0), (1, 1, 1.0), (0, 2, 1.0), (1, 2, 1.0), (2, 2, 1.0)],
        )
        .unwrap();
        let perm = [2, 1, 0];
        let (parent, _) = col_etree(a.as_ref(), Some(&perm));
        // column 0 (old 2) touches every row, so every later column hangs below it
        assert_eq!(parent, vec![1, 2, 3]);
    }

    #[test]
    fn test_tree_postorder() {
        let post = tree_postorder(&[3, 5, 1, 1, 3]);
        assert_eq!(post, vec![1, 4, 0, 3, 2, 5]);

        let etree = renumber_etree(&[3, 5, 1, 1, 3], &post);
        for (j, &p) in etree.iter().enumerate() {
            assert!(p > j);
        }
    }

    #[test]
    fn test_tree_postorder_empty() {
        assert_eq!(tree_postorder(&[]), vec![0]);
    }

    #[test]
    fn test_postorder_children_before_parents() {
        // pseudo random unsymmetric pattern
        let n = 12;
        let mut triplets = vec![];
        for j in 0..n {
            triplets.push((j, j, 1.0));
            triplets.push(((j * 7 + 3) % n, j, 1.0));
            triplets.push(((j * 5 + 1) % n, j, 1.0));
        }
        let a = SparseColMat::from_triplets(n, n, &triplets).unwrap();
        let perm: Vec<usize> = (0..n).map(|k| (k * 5) % n).collect();

        let (parent, _) = col_etree(a.as_ref(), Some(&perm));
        let post = tree_postorder(&parent);

        let mut seen = post[..n].to_vec();
        seen.sort_unstable();
        assert_eq!(seen, (0..n).collect::<Vec<_>>());

        for (j, &p) in parent.iter().enumerate() {
            if p != n {
                assert!(post[j] < post[p]);
            }
        }
        for (j, &p) in renumber_etree(&parent, &post).iter().enumerate() {
            assert!(p > j);
        }
    }

    #[test]
    fn test_relax_snode() {
        let chain = [1, 2, 3, 4];
        assert_eq!(relax_snode(&chain, 10), vec![3, EMPTY, EMPTY, EMPTY]);
        assert_eq!(relax_snode(&chain, 1), vec![0, EMPTY, EMPTY, EMPTY]);

        let arrow = [2, 2, 3];
        assert_eq!(relax_snode(&arrow, 2), vec![0, 1, EMPTY]);
        assert_eq!(relax_snode(&arrow, 3), vec![2, EMPTY, EMPTY]);
    }
}
