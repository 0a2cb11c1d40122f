// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::dense::upper_solve_mat;
use crate::lu::{GlobalLU, SupernodalMatrix};
use crate::SparseColMat;

/// Upper triangular factor `U`: the upper part of the supernodal diagonal
/// blocks together with the columns held in `ucol`/`usub`.
#[derive(Debug, Clone, Copy)]
pub struct MatrixU<'a> {
    l: SupernodalMatrix<'a>,
    ucol: &'a [f64],
    usub: &'a [usize],
    xusub: &'a [usize],
}

impl<'a> MatrixU<'a> {
    pub(crate) fn new(l: SupernodalMatrix<'a>, glu: &'a GlobalLU) -> Self {
        let n = l.cols();
        let nnz = if n == 0 { 0 } else { glu.xusub[n] };
        Self {
            l,
            ucol: &glu.ucol[..nnz],
            usub: &glu.usub[..nnz],
            xusub: if n == 0 { &[0] } else { &glu.xusub[..=n] },
        }
    }

    pub fn rows(&self) -> usize {
        self.l.rows()
    }

    pub fn cols(&self) -> usize {
        self.l.cols()
    }

    /// Entries of column `j` above its supernode, with row indices in pivot
    /// order.
    pub fn col(&self, j: usize) -> (&'a [usize], &'a [f64]) {
        let range = self.xusub[j]..self.xusub[j + 1];
        (&self.usub[range.clone()], &self.ucol[range])
    }

    /// Solve `U*X = B` in place by block back substitution, supernode by
    /// supernode in reverse order.
    ///
    /// `x` holds `nrhs` columns of length `rows()` in column-major order.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != rows() * nrhs`.
    pub fn solve_in_place(&self, x: &mut [f64], nrhs: usize) {
        let n = self.l.rows();
        assert_eq!(x.len(), n * nrhs);
        let values = self.l.values();
        let col_index_ptr = self.l.col_index_ptr();
        let sup_to_col = self.l.sup_to_col();

        for k in (0..self.l.nsuper()).rev() {
            let fsupc = sup_to_col[k];
            let nsupc = sup_to_col[k + 1] - fsupc;
            let luptr = col_index_ptr[fsupc];
            let lda = col_index_ptr[fsupc + 1] - luptr;

            if nsupc == 1 {
                for xj in x.chunks_exact_mut(n) {
                    xj[fsupc] /= values[luptr];
                }
            } else {
                upper_solve_mat(nsupc, &values[luptr..], lda, &mut x[fsupc..], n, nrhs);
            }

            for xj in x.chunks_exact_mut(n) {
                for jcol in fsupc..fsupc + nsupc {
                    let xjcol = xj[jcol];
                    let (rows, vals) = self.col(jcol);
                    for (&irow, &v) in rows.iter().zip(vals) {
                        xj[irow] -= xjcol * v;
                    }
                }
            }
        }
    }

    /// Extract `U` in compressed column form. The row indices of each
    /// column are sorted, the diagonal last.
    pub fn to_upper(&self) -> SparseColMat {
        let n = self.cols();
        let col_to_sup = self.l.col_to_sup();
        let sup_to_col = self.l.sup_to_col();
        let mut col_ptrs = Vec::with_capacity(n + 1);
        let mut row_indices = Vec::new();
        let mut values = Vec::new();
        let mut entries: Vec<(usize, f64)> = Vec::new();
        col_ptrs.push(0);

        for j in 0..n {
            let fsupc = sup_to_col[col_to_sup[j]];
            let (rows, vals) = self.col(j);
            entries.clear();
            entries.extend(rows.iter().copied().zip(vals.iter().copied()));
            entries.extend(self.l.inner_iter(j).take(j - fsupc + 1));
            entries.sort_by_key(|&(i, _)| i);
            for &(i, v) in &entries {
                row_indices.push(i);
                values.push(v);
            }
            col_ptrs.push(row_indices.len());
        }

        SparseColMat::from_parts_unchecked(self.rows(), n, col_ptrs, row_indices, values)
    }
}
