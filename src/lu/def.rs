// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

/// Marks an unassigned pivot, an unexplored representative, or the bottom of
/// the dfs stack.
pub(crate) const EMPTY: usize = usize::MAX;

/// Number of `m`-sized marker chunks in the workspace.
pub(crate) const NO_MARKER: usize = 3;

/// Growable arrays of the factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MemType {
    Lusup,
    Ucol,
    Lsub,
    Usub,
}

/// Growth policy of the arrays holding `L` and `U`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryConfig {
    /// Arrays grow to `max(len+1, alpha*len)` when they run full. After an
    /// allocation failure `alpha` is moved towards 1 by `alpha = (alpha+1)/2`.
    /// Default: 1.5
    pub alpha: f64,

    /// Number of times a failed expansion is retried with a smaller `alpha`.
    /// Default: 10
    pub max_retries: usize,

    /// Largest single allocation, in bytes, that the factorization may make.
    /// Requests above it are treated as allocation failures.
    /// Default: None (unlimited)
    pub limit: Option<usize>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            alpha: 1.5,
            max_retries: 10,
            limit: None,
        }
    }
}

/// Tuning parameters of the factorization.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// Maximum number of columns in a panel. Default: 16
    pub panel_size: usize,

    /// Leaf subtrees of the elimination tree with fewer than `relax`
    /// descendants are factorized as one relaxed supernode. Default: 10
    pub relax: usize,

    /// Maximum number of columns in a supernode. Default: 128
    pub maxsuper: usize,

    /// Estimated fill ratio `nnz(L+U)/nnz(A)` used to size the factor before
    /// the first column is processed. Default: 20
    pub fillfactor: usize,

    /// The diagonal entry is used as pivot if its magnitude is at least
    /// `diag_pivot_thresh` times the largest candidate in its column. 1.0
    /// gives partial pivoting, 0.0 always keeps a nonzero diagonal.
    /// Default: 1.0
    pub diag_pivot_thresh: f64,

    /// Growth policy of the factor storage. Default: `MemoryConfig::default()`
    /// (alpha 1.5, 10 retries, no limit)
    pub memory: MemoryConfig,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            panel_size: 16,
            relax: 10,
            maxsuper: 128,
            fillfactor: 20,
            diag_pivot_thresh: 1.0,
            memory: MemoryConfig::default(),
        }
    }
}

/// Length of the scalar scratch vector for panel width `w`, supernode width
/// `t` and `m` rows.
pub(crate) fn num_temp_v(m: usize, w: usize, t: usize) -> usize {
    usize::max(m, (t + m) * w)
}
