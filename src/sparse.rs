// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::{Error, Result};

/// Borrowed sparse matrix in compressed column form.
///
/// Column `j` has elements
///
/// ```txt
///     row_indices[col_ptrs[j] .. col_ptrs[j+1]], values[col_ptrs[j] .. col_ptrs[j+1]].
/// ```
///
/// Row indices inside a column need not be sorted, but must not be duplicated.
#[derive(Debug, Clone, Copy)]
pub struct SparseColMatRef<'a> {
    nrows: usize,
    ncols: usize,
    col_ptrs: &'a [usize],
    row_indices: &'a [usize],
    values: &'a [f64],
}

impl<'a> SparseColMatRef<'a> {
    /// Wraps compressed column arrays after checking their invariants.
    pub fn new_checked(
        nrows: usize,
        ncols: usize,
        col_ptrs: &'a [usize],
        row_indices: &'a [usize],
        values: &'a [f64],
    ) -> Result<Self> {
        if col_ptrs.len() != ncols + 1 {
            return Err(Error::invalid_argument(
                "col_ptrs",
                format!("expected {} entries, got {}", ncols + 1, col_ptrs.len()),
            ));
        }
        if col_ptrs[0] != 0 || col_ptrs.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::invalid_argument(
                "col_ptrs",
                "must start at 0 and be non-decreasing",
            ));
        }
        let nnz = col_ptrs[ncols];
        if row_indices.len() != nnz || values.len() != nnz {
            return Err(Error::invalid_argument(
                "row_indices",
                format!(
                    "expected {} row indices and values, got {} and {}",
                    nnz,
                    row_indices.len(),
                    values.len()
                ),
            ));
        }
        if let Some(&i) = row_indices.iter().find(|&&i| i >= nrows) {
            return Err(Error::invalid_argument(
                "row_indices",
                format!("row index {} out of range for {} rows", i, nrows),
            ));
        }
        let mut marked = vec![usize::MAX; nrows];
        for j in 0..ncols {
            for &i in &row_indices[col_ptrs[j]..col_ptrs[j + 1]] {
                if marked[i] == j {
                    return Err(Error::invalid_argument(
                        "row_indices",
                        format!("duplicate entry ({}, {})", i, j),
                    ));
                }
                marked[i] = j;
            }
        }
        Ok(Self {
            nrows,
            ncols,
            col_ptrs,
            row_indices,
            values,
        })
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.col_ptrs[self.ncols]
    }

    pub fn col_ptrs(&self) -> &'a [usize] {
        self.col_ptrs
    }

    pub fn row_indices(&self) -> &'a [usize] {
        self.row_indices
    }

    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    /// Row indices and values of column `j`.
    pub fn col(&self, j: usize) -> (&'a [usize], &'a [f64]) {
        let range = self.col_ptrs[j]..self.col_ptrs[j + 1];
        (&self.row_indices[range.clone()], &self.values[range])
    }

    /// Computes `y = A*x`.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != ncols()`.
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(x.len(), self.ncols);
        let mut y = vec![0.0; self.nrows];
        for (j, &xj) in x.iter().enumerate() {
            let (rows, vals) = self.col(j);
            for (&i, &v) in rows.iter().zip(vals) {
                y[i] += v * xj;
            }
        }
        y
    }
}

/// Owned sparse matrix in compressed column form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseColMat {
    nrows: usize,
    ncols: usize,
    col_ptrs: Vec<usize>,
    row_indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseColMat {
    /// Takes ownership of compressed column arrays after checking them.
    pub fn new(
        nrows: usize,
        ncols: usize,
        col_ptrs: Vec<usize>,
        row_indices: Vec<usize>,
        values: Vec<f64>,
    ) -> Result<Self> {
        SparseColMatRef::new_checked(nrows, ncols, &col_ptrs, &row_indices, &values)?;
        Ok(Self {
            nrows,
            ncols,
            col_ptrs,
            row_indices,
            values,
        })
    }

    /// Builds a matrix from `(row, col, value)` triplets. Duplicate entries
    /// are summed; rows inside each column come out sorted.
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        triplets: &[(usize, usize, f64)],
    ) -> Result<Self> {
        let mut count = vec![0usize; ncols + 1];
        for &(i, j, _) in triplets {
            if i >= nrows || j >= ncols {
                return Err(Error::invalid_argument(
                    "triplets",
                    format!("entry ({}, {}) out of range for {}x{}", i, j, nrows, ncols),
                ));
            }
            count[j + 1] += 1;
        }
        for j in 0..ncols {
            count[j + 1] += count[j];
        }
        let mut next = count.clone();
        let mut rows = vec![0; triplets.len()];
        let mut vals = vec![0.0; triplets.len()];
        for &(i, j, v) in triplets {
            rows[next[j]] = i;
            vals[next[j]] = v;
            next[j] += 1;
        }

        // sort each column and merge duplicates
        let mut col_ptrs = Vec::with_capacity(ncols + 1);
        let mut row_indices = Vec::with_capacity(triplets.len());
        let mut values = Vec::with_capacity(triplets.len());
        col_ptrs.push(0);
        let mut entries: Vec<(usize, f64)> = Vec::new();
        for j in 0..ncols {
            entries.clear();
            entries.extend((count[j]..count[j + 1]).map(|p| (rows[p], vals[p])));
            entries.sort_by_key(|&(i, _)| i);
            for &(i, v) in &entries {
                if row_indices.len() > col_ptrs[j] && row_indices.last() == Some(&i) {
                    if let Some(last) = values.last_mut() {
                        *last += v;
                    }
                } else {
                    row_indices.push(i);
                    values.push(v);
                }
            }
            col_ptrs.push(row_indices.len());
        }

        Ok(Self {
            nrows,
            ncols,
            col_ptrs,
            row_indices,
            values,
        })
    }

    // Arrays built by the factorization are valid by construction.
    pub(crate) fn from_parts_unchecked(
        nrows: usize,
        ncols: usize,
        col_ptrs: Vec<usize>,
        row_indices: Vec<usize>,
        values: Vec<f64>,
    ) -> Self {
        debug_assert!(
            SparseColMatRef::new_checked(nrows, ncols, &col_ptrs, &row_indices, &values).is_ok()
        );
        Self {
            nrows,
            ncols,
            col_ptrs,
            row_indices,
            values,
        }
    }

    pub fn as_ref(&self) -> SparseColMatRef<'_> {
        SparseColMatRef {
            nrows: self.nrows,
            ncols: self.ncols,
            col_ptrs: &self.col_ptrs,
            row_indices: &self.row_indices,
            values: &self.values,
        }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn col_ptrs(&self) -> &[usize] {
        &self.col_ptrs
    }

    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at `(i, j)`, zero when not stored.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let (rows, vals) = self.as_ref().col(j);
        rows.iter()
            .zip(vals)
            .filter(|(&r, _)| r == i)
            .map(|(_, &v)| v)
            .sum()
    }

    /// Expands into a dense column-major array.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.nrows * self.ncols];
        for j in 0..self.ncols {
            let (rows, vals) = self.as_ref().col(j);
            for (&i, &v) in rows.iter().zip(vals) {
                dense[i + j * self.nrows] += v;
            }
        }
        dense
    }
}

/// Columns of `A` read through a column permutation: column `k` is column
/// `fwd[k]` of `A`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PermutedCols<'a> {
    mat: SparseColMatRef<'a>,
    fwd: &'a [usize],
}

impl<'a> PermutedCols<'a> {
    pub(crate) fn new(mat: SparseColMatRef<'a>, fwd: &'a [usize]) -> Self {
        debug_assert_eq!(mat.ncols(), fwd.len());
        Self { mat, fwd }
    }

    pub(crate) fn col(&self, k: usize) -> (&'a [usize], &'a [f64]) {
        self.mat.col(self.fwd[k])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_triplets_merges_duplicates() {
        let a = SparseColMat::from_triplets(
            3,
            2,
            &[(2, 0, 1.0), (0, 0, 2.0), (2, 0, 3.0), (1, 1, -1.0)],
        )
        .unwrap();
        assert_eq!(a.col_ptrs(), &[0, 2, 3]);
        assert_eq!(a.row_indices(), &[0, 2, 1]);
        assert_eq!(a.values(), &[2.0, 4.0, -1.0]);
        assert_eq!(a.get(2, 0), 4.0);
        assert_eq!(a.get(1, 0), 0.0);
    }

    #[test]
    fn test_new_checked_rejects_bad_input() {
        let rows = [0, 5];
        let vals = [1.0, 1.0];
        assert!(SparseColMatRef::new_checked(3, 1, &[0, 2], &rows, &vals).is_err());
        assert!(SparseColMatRef::new_checked(3, 2, &[0, 2, 1], &[0, 1], &vals).is_err());
        assert!(SparseColMatRef::new_checked(3, 1, &[0, 2], &[0, 1], &[1.0]).is_err());
        assert!(SparseColMatRef::new_checked(3, 1, &[0, 2], &[1, 1], &vals).is_err());
        assert!(SparseColMatRef::new_checked(3, 1, &[0, 2], &[0, 1], &vals).is_ok());
    }

    #[test]
    fn test_mul_vec() {
        let a = SparseColMat::from_triplets(2, 2, &[(0, 0, 3.0), (1, 0, 1.0), (0, 1, 1.0), (1, 1, 2.0)])
            .unwrap();
        assert_eq!(a.as_ref().mul_vec(&[2.0, 3.0]), vec![9.0, 8.0]);
    }
}
