// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::GlobalLU;

/// Count the nonzeros of `L` and `U` after the last column, the diagonal
/// counted in both. Returns `(nnz_l, nnz_u)`.
pub(crate) fn countnz(n: usize, glu: &GlobalLU) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let mut nnz_l = 0;
    let mut nnz_u = glu.xusub[n];
    let nsuper = glu.last_supno(n);

    for s in 0..=nsuper {
        let fsupc = glu.xsup[s];
        let mut jlen = glu.xlsub[fsupc + 1] - glu.xlsub[fsupc];
        for j in fsupc..glu.xsup[s + 1] {
            nnz_l += jlen;
            nnz_u += j - fsupc + 1;
            jlen -= 1;
        }
    }
    (nnz_l, nnz_u)
}

/// Compact `lsub` to a single subscript set per supernode and renumber the
/// subscripts to the rows of `P*A`.
///
/// Afterwards the subscripts of supernode `s` are
/// `lsub[xlsub[fsupc]..xlsub[fsupc+1]]` with `fsupc = xsup[s]`, and the
/// other columns of the supernode point to the end of that range.
pub(crate) fn fixup_l(n: usize, perm_r: &[usize], glu: &mut GlobalLU) {
    if n == 0 {
        return;
    }
    let mut nextl = 0;
    let nsuper = glu.last_supno(n);

    for s in 0..=nsuper {
        let fsupc = glu.xsup[s];
        let jstart = glu.xlsub[fsupc];
        let jend = glu.xlsub[fsupc + 1];
        glu.xlsub[fsupc] = nextl;
        for j in jstart..jend {
            glu.lsub[nextl] = perm_r[glu.lsub[j]];
            nextl += 1;
        }
        for k in fsupc + 1..glu.xsup[s + 1] {
            glu.xlsub[k] = nextl;
        }
    }

    glu.xlsub[n] = nextl;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Two supernodes {0, 1} and {2} of a 3x3 factor. The first one keeps a
    // second subscript copy for column 1.
    fn factor() -> GlobalLU {
        GlobalLU {
            xsup: vec![0, 2, 3],
            supno: vec![0, 0, 1, 1],
            lsub: vec![2, 0, 1, 2, 0, 1, 1],
            xlsub: vec![0, 3, 6, 7],
            xusub: vec![0, 0, 0, 2],
            ..Default::default()
        }
    }

    #[test]
    fn test_countnz() {
        let glu = factor();
        assert_eq!(countnz(3, &glu), (3 + 2 + 1, 2 + 1 + 2 + 1));
    }

    #[test]
    fn test_fixup_l() {
        let mut glu = factor();
        let perm_r = vec![1, 2, 0];
        fixup_l(3, &perm_r, &mut glu);

        assert_eq!(glu.xlsub, vec![0, 3, 3, 4]);
        assert_eq!(glu.lsub[..4], [0, 1, 2, 2]);
    }
}
