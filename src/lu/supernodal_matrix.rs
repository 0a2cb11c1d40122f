// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::dense::unit_lower_solve_mat;
use crate::lu::gemm::sparselu_gemm;
use crate::lu::GlobalLU;
use crate::SparseColMat;

/// Read-only view of the supernodal factor `L\U` after factorization.
///
/// Supernode `s` covers columns `sup_to_col[s]..sup_to_col[s+1]`. All its
/// columns share the row indices
///
/// ```txt
///     row_index[row_index_ptr[fsupc] .. row_index_ptr[fsupc+1]],  fsupc = sup_to_col[s],
/// ```
///
/// numbered as rows of `P*A`. Column `j` stores one value per row index in
/// `values[col_index_ptr[j] .. col_index_ptr[j+1]]`. The leading rows form
/// the dense diagonal block, holding the unit lower triangle of `L` below its
/// diagonal and the corresponding part of `U` on and above it.
#[derive(Debug, Clone, Copy)]
pub struct SupernodalMatrix<'a> {
    nrows: usize,
    ncols: usize,
    nsuper: usize,
    values: &'a [f64],
    col_index_ptr: &'a [usize],
    row_index: &'a [usize],
    row_index_ptr: &'a [usize],
    col_to_sup: &'a [usize],
    sup_to_col: &'a [usize],
}

/// Iterator over the `(row, value)` pairs of one column of a
/// [`SupernodalMatrix`], the diagonal block included.
#[derive(Debug, Clone)]
pub struct InnerIter<'a> {
    rows: std::slice::Iter<'a, usize>,
    values: std::slice::Iter<'a, f64>,
    col: usize,
    sup_index: usize,
}

impl InnerIter<'_> {
    pub fn col(&self) -> usize {
        self.col
    }

    /// Supernode of the column.
    pub fn sup_index(&self) -> usize {
        self.sup_index
    }
}

impl Iterator for InnerIter<'_> {
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        Some((*self.rows.next()?, *self.values.next()?))
    }
}

impl<'a> SupernodalMatrix<'a> {
    /// View of a factor completed by `fixup_l()`.
    pub(crate) fn new(nrows: usize, ncols: usize, glu: &'a GlobalLU) -> Self {
        let n = ncols;
        if n == 0 {
            return Self {
                nrows,
                ncols,
                nsuper: 0,
                values: &[],
                col_index_ptr: &[0],
                row_index: &[],
                row_index_ptr: &[0],
                col_to_sup: &[],
                sup_to_col: &[0],
            };
        }
        let nsuper = glu.last_supno(n) + 1;
        Self {
            nrows,
            ncols,
            nsuper,
            values: &glu.lusup[..glu.xlusup[n]],
            col_index_ptr: &glu.xlusup[..=n],
            row_index: &glu.lsub[..glu.xlsub[n]],
            row_index_ptr: &glu.xlsub[..=n],
            col_to_sup: &glu.supno[..n],
            sup_to_col: &glu.xsup[..=nsuper],
        }
    }

    pub fn rows(&self) -> usize {
        self.nrows
    }

    pub fn cols(&self) -> usize {
        self.ncols
    }

    /// Number of supernodes.
    pub fn nsuper(&self) -> usize {
        self.nsuper
    }

    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    pub fn col_index_ptr(&self) -> &'a [usize] {
        self.col_index_ptr
    }

    pub fn row_index(&self) -> &'a [usize] {
        self.row_index
    }

    pub fn row_index_ptr(&self) -> &'a [usize] {
        self.row_index_ptr
    }

    pub fn col_to_sup(&self) -> &'a [usize] {
        self.col_to_sup
    }

    pub fn sup_to_col(&self) -> &'a [usize] {
        self.sup_to_col
    }

    /// Number of stored values, diagonal blocks included.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn inner_iter(&self, outer: usize) -> InnerIter<'a> {
        let sup_index = self.col_to_sup[outer];
        let fsupc = self.sup_to_col[sup_index];
        let rows = &self.row_index[self.row_index_ptr[fsupc]..self.row_index_ptr[fsupc + 1]];
        let values = &self.values[self.col_index_ptr[outer]..self.col_index_ptr[outer + 1]];
        InnerIter {
            rows: rows.iter(),
            values: values.iter(),
            col: outer,
            sup_index,
        }
    }

    /// Solve `L*X = B` in place, `L` unit lower triangular.
    ///
    /// `x` holds `nrhs` columns of length `rows()` in column-major order.
    /// Supernodes are processed in order: single columns by a column
    /// subtraction, wider ones by a dense triangular solve with the diagonal
    /// block followed by a block update scattered through the row indices.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != rows() * nrhs`.
    pub fn solve_in_place(&self, x: &mut [f64], nrhs: usize) {
        let n = self.nrows;
        assert_eq!(x.len(), n * nrhs);
        let mut work = vec![0.0; n * nrhs];

        for k in 0..self.nsuper {
            let fsupc = self.sup_to_col[k];
            let istart = self.row_index_ptr[fsupc];
            let nsupr = self.row_index_ptr[fsupc + 1] - istart;
            let nsupc = self.sup_to_col[k + 1] - fsupc;
            let nrow = nsupr - nsupc;

            if nsupc == 1 {
                for xj in x.chunks_exact_mut(n) {
                    let xf = xj[fsupc];
                    // skip the diagonal
                    for (irow, value) in self.inner_iter(fsupc).skip(1) {
                        xj[irow] -= xf * value;
                    }
                }
            } else {
                let luptr = self.col_index_ptr[fsupc];
                let lda = self.col_index_ptr[fsupc + 1] - luptr;

                unit_lower_solve_mat(nsupc, &self.values[luptr..], lda, &mut x[fsupc..], n, nrhs);

                let work = &mut work[..nrow * nrhs];
                sparselu_gemm(
                    nrow,
                    nrhs,
                    nsupc,
                    &self.values[luptr + nsupc..],
                    lda,
                    &x[fsupc..],
                    n,
                    work,
                    nrow,
                );

                let rows = &self.row_index[istart + nsupc..istart + nsupr];
                for (xj, wj) in x.chunks_exact_mut(n).zip(work.chunks_exact_mut(nrow.max(1))) {
                    for (&irow, wi) in rows.iter().zip(wj.iter_mut()) {
                        xj[irow] -= *wi;
                        *wi = 0.0;
                    }
                }
            }
        }
    }

    /// Extract the unit lower triangular `L` in compressed column form. The
    /// row indices of each column are sorted, the unit diagonal first.
    pub fn to_lower(&self) -> SparseColMat {
        let n = self.ncols;
        let mut col_ptrs = Vec::with_capacity(n + 1);
        let mut row_indices = Vec::new();
        let mut values = Vec::new();
        let mut entries: Vec<(usize, f64)> = Vec::new();
        col_ptrs.push(0);

        for j in 0..n {
            let fsupc = self.sup_to_col[self.col_to_sup[j]];
            entries.clear();
            entries.extend(self.inner_iter(j).skip(j - fsupc + 1));
            entries.sort_by_key(|&(i, _)| i);

            row_indices.push(j);
            values.push(1.0);
            for &(i, v) in &entries {
                row_indices.push(i);
                values.push(v);
            }
            col_ptrs.push(row_indices.len());
        }

        SparseColMat::from_parts_unchecked(self.nrows, n, col_ptrs, row_indices, values)
    }
}
