// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use std::time::Instant;

use crate::analyze::analyze;
use crate::factorize::factorize;
use crate::lu::{GlobalLU, MatrixU, Params, SupernodalMatrix};
use crate::solve::solve;
use crate::{Error, Perm, Result, SparseColMat, SparseColMatRef};

/// Sparse LU factorization `P*A*Q = L*U` of a square matrix with
/// supernodes.
///
/// ```txt
///     let mut lu = SparseLU::new();
///     lu.analyze_pattern(a, None)?;
///     lu.factorize(a)?;
///     let x = lu.solve(&b, 1)?;
/// ```
///
/// The pattern analysis can be reused for matrices with the same pattern;
/// only `factorize()` has to be repeated when the values change.
#[derive(Debug, Clone, Default)]
pub struct SparseLU {
    /// Tuning parameters, read by `factorize()`.
    pub params: Params,

    n: usize,
    perm_c: Option<Perm>,
    etree: Vec<usize>,

    perm_r: Option<Perm>,
    glu: GlobalLU,
    nnz_l: usize,
    nnz_u: usize,

    /// Runtime of the last call to `factorize()` in seconds.
    pub time_factorize: f64,
}

impl SparseLU {
    /// Create an object with the default parameters and no factorization.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: Params) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Compute the column permutation `Q` and the column elimination tree of
    /// `A*Q` from the pattern of `A`. The values of `A` are not used. Any
    /// previous factorization is discarded.
    ///
    /// Return:
    ///
    /// ```txt
    ///     InvalidArgument
    ///
    ///         a is not square or col_perm does not have length n.
    /// ```
    ///
    /// Arguments:
    ///
    /// ```txt
    ///     a
    ///
    ///         The matrix pattern.
    ///
    ///     col_perm
    ///
    ///         Fill-reducing column ordering, applied before the postorder of
    ///         the elimination tree. Identity if None.
    /// ```
    pub fn analyze_pattern(&mut self, a: SparseColMatRef<'_>, col_perm: Option<&Perm>) -> Result<()> {
        self.perm_c = None;
        self.perm_r = None;

        let analysis = analyze(a, col_perm)?;
        self.n = a.ncols();
        self.perm_c = Some(analysis.perm_c);
        self.etree = analysis.etree;
        Ok(())
    }

    /// Factorize `A` numerically, using the permutation and elimination tree
    /// of the last `analyze_pattern()`. After an error the object holds no
    /// factorization.
    ///
    /// Return:
    ///
    /// ```txt
    ///     InvalidCall
    ///
    ///         analyze_pattern() has not been called.
    ///
    ///     InvalidArgument
    ///
    ///         the dimension of a differs from the analyzed pattern, or a
    ///         parameter is out of range.
    ///
    ///     SingularMatrix
    ///
    ///         no nonzero pivot in a column; the error holds the index of
    ///         that column in A.
    ///
    ///     OutOfMemory
    ///
    ///         the factor could not be stored.
    /// ```
    pub fn factorize(&mut self, a: SparseColMatRef<'_>) -> Result<()> {
        let tic = Instant::now();
        self.perm_r = None;
        self.nnz_l = 0;
        self.nnz_u = 0;

        let perm_c = self
            .perm_c
            .as_ref()
            .ok_or(Error::InvalidCall("factorize() called before analyze_pattern()"))?;
        if a.nrows() != self.n || a.ncols() != self.n {
            return Err(Error::invalid_argument(
                "a",
                format!(
                    "expected {}x{} matrix, got {}x{}",
                    self.n,
                    self.n,
                    a.nrows(),
                    a.ncols()
                ),
            ));
        }

        let mut perm_r = Vec::new();
        let result = factorize(a, perm_c, &self.etree, &self.params, &mut perm_r, &mut self.glu);
        self.time_factorize = tic.elapsed().as_secs_f64();

        let stats = match result {
            Ok(stats) => stats,
            Err(err) => {
                self.glu = GlobalLU::default();
                return Err(err);
            }
        };
        self.perm_r = Some(Perm::from_inverse(perm_r)?);
        self.nnz_l = stats.nnz_l;
        self.nnz_u = stats.nnz_u;
        Ok(())
    }

    /// `analyze_pattern()` followed by `factorize()`.
    pub fn compute(&mut self, a: SparseColMatRef<'_>, col_perm: Option<&Perm>) -> Result<()> {
        self.analyze_pattern(a, col_perm)?;
        self.factorize(a)
    }

    fn factors(&self) -> Result<(&Perm, &Perm, SupernodalMatrix<'_>, MatrixU<'_>)> {
        match (&self.perm_r, &self.perm_c) {
            (Some(perm_r), Some(perm_c)) => {
                let l = SupernodalMatrix::new(self.n, self.n, &self.glu);
                Ok((perm_r, perm_c, l, MatrixU::new(l, &self.glu)))
            }
            _ => Err(Error::InvalidCall("no factorization available")),
        }
    }

    /// Solve `A*X = B` for `nrhs` right-hand sides stored column by column in
    /// `b`.
    pub fn solve(&self, b: &[f64], nrhs: usize) -> Result<Vec<f64>> {
        let mut x = b.to_vec();
        self.solve_in_place(&mut x, nrhs)?;
        Ok(x)
    }

    /// Like `solve()`, overwriting the right-hand sides with the solution.
    pub fn solve_in_place(&self, x: &mut [f64], nrhs: usize) -> Result<()> {
        let (perm_r, perm_c, l, u) = self.factors()?;
        solve(perm_r, perm_c, l, u, x, nrhs)
    }

    /// Row permutation `P`: row `row_perm().arrays().0[k]` of `A` is pivot
    /// row `k`.
    pub fn row_perm(&self) -> Option<&Perm> {
        self.perm_r.as_ref()
    }

    /// Column permutation `Q`: column `col_perm().arrays().0[k]` of `A` is
    /// column `k` of the factorization.
    pub fn col_perm(&self) -> Option<&Perm> {
        self.perm_c.as_ref()
    }

    /// Supernodal view of `L`, the diagonal blocks of `U` included.
    pub fn matrix_l(&self) -> Result<SupernodalMatrix<'_>> {
        self.factors().map(|(_, _, l, _)| l)
    }

    pub fn matrix_u(&self) -> Result<MatrixU<'_>> {
        self.factors().map(|(_, _, _, u)| u)
    }

    /// Number of entries in `L`, the unit diagonal included.
    pub fn nnz_l(&self) -> usize {
        self.nnz_l
    }

    /// Number of entries in `U`, the diagonal included.
    pub fn nnz_u(&self) -> usize {
        self.nnz_u
    }

    /// Number of supernodes of the factorization.
    pub fn nsuper(&self) -> usize {
        self.matrix_l().map_or(0, |l| l.nsuper())
    }

    /// Number of times the storage of the factor had to grow during the last
    /// `factorize()`.
    pub fn num_expansions(&self) -> usize {
        self.glu.num_expansions
    }

    /// `L` as a compressed column matrix in pivot order.
    pub fn l_factor(&self) -> Result<SparseColMat> {
        Ok(self.matrix_l()?.to_lower())
    }

    /// `U` as a compressed column matrix in pivot order.
    pub fn u_factor(&self) -> Result<SparseColMat> {
        Ok(self.matrix_u()?.to_upper())
    }

    fn diagonal(&self) -> Result<Vec<f64>> {
        let l = self.matrix_l()?;
        let sup_to_col = l.sup_to_col();
        let col_to_sup = l.col_to_sup();
        Ok((0..l.cols())
            .map(|j| {
                let fsupc = sup_to_col[col_to_sup[j]];
                l.inner_iter(j).nth(j - fsupc).map_or(0.0, |(_, v)| v)
            })
            .collect())
    }

    fn perm_sign(&self) -> Result<f64> {
        let (perm_r, perm_c, _, _) = self.factors()?;
        Ok(perm_r.sign() * perm_c.sign())
    }

    pub fn determinant(&self) -> Result<f64> {
        let det: f64 = self.diagonal()?.iter().product();
        Ok(det * self.perm_sign()?)
    }

    pub fn abs_determinant(&self) -> Result<f64> {
        Ok(self.diagonal()?.iter().map(|d| d.abs()).product())
    }

    /// Natural logarithm of `|det(A)|`, safe from overflow.
    pub fn log_abs_determinant(&self) -> Result<f64> {
        Ok(self.diagonal()?.iter().map(|d| d.abs().ln()).sum())
    }

    /// Sign of `det(A)`: `1.0`, `-1.0` or `0.0`.
    pub fn sign_determinant(&self) -> Result<f64> {
        let mut sign = self.perm_sign()?;
        for d in self.diagonal()? {
            if d == 0.0 {
                return Ok(0.0);
            }
            if d < 0.0 {
                sign = -sign;
            }
        }
        Ok(sign)
    }
}
