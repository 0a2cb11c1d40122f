// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

/// The factor under construction.
///
/// Columns `fsupc..xsup[s+1]` of supernode `s = supno[fsupc]` share one row
/// pattern `lsub[xlsub[fsupc]..xlsub[fsupc+1]]`. Column `j` of the supernode
/// stores one value per pattern row in `lusup[xlusup[j]..xlusup[j+1]]`; the
/// leading `nsupc` rows hold the diagonal block (U above, unit L below the
/// diagonal), the remaining rows the rectangular part of `L`.
///
/// Column `j` of `U` outside the supernodal blocks is
/// `usub[xusub[j]..xusub[j+1]]`, `ucol[xusub[j]..xusub[j+1]]`, with row
/// indices already in pivot order.
///
/// During factorization `lsub` holds subscripts relative to the original rows
/// and keeps two copies of a supernode's pattern (first and last column). Once
/// the last column is done, [`fixup_l()`](crate::lu::fixup_l) compacts `lsub`
/// and moves it to pivot order.
#[derive(Debug, Default, Clone)]
pub(crate) struct GlobalLU {
    /// `xsup[s]` is the first column of supernode `s`.
    pub(crate) xsup: Vec<usize>,
    /// `supno[j]` is the supernode containing column `j`.
    pub(crate) supno: Vec<usize>,

    pub(crate) lusup: Vec<f64>,
    pub(crate) xlusup: Vec<usize>,

    pub(crate) lsub: Vec<usize>,
    pub(crate) xlsub: Vec<usize>,

    pub(crate) ucol: Vec<f64>,
    pub(crate) usub: Vec<usize>,
    pub(crate) xusub: Vec<usize>,

    /// allocated length of `lsub`
    pub(crate) nzlmax: usize,
    /// allocated length of `ucol` and `usub`
    pub(crate) nzumax: usize,
    /// allocated length of `lusup`
    pub(crate) nzlumax: usize,

    /// Number of arena expansions so far; zero until the first allocation has
    /// succeeded.
    pub(crate) num_expansions: usize,
}

impl GlobalLU {
    /// Index of the last supernode, valid once column `n-1` has been processed.
    pub(crate) fn last_supno(&self, n: usize) -> usize {
        self.supno[n]
    }

    /// Last column of the supernode containing pivot `kperm` at this stage.
    #[inline]
    pub(crate) fn rep_of(&self, kperm: usize) -> usize {
        self.xsup[self.supno[kperm] + 1] - 1
    }

    /// Checks the supernode partition once the factorization is complete.
    pub(crate) fn check_supernodes(&self, n: usize) -> bool {
        if n == 0 {
            return true;
        }
        let nsuper = self.last_supno(n);
        if self.xsup[0] != 0 || self.xsup[nsuper + 1] != n {
            return false;
        }
        for s in 0..=nsuper {
            if self.xsup[s] >= self.xsup[s + 1] {
                return false;
            }
            for j in self.xsup[s]..self.xsup[s + 1] {
                if self.supno[j] != s {
                    return false;
                }
            }
        }
        true
    }
}
