// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::lu::def::*;
use crate::{Error, Result};

/// Scratch arrays of one factorization.
///
/// Index arrays start out `EMPTY` and are returned to that state as they are
/// consumed: `repfnz` is reset after each column, `panel_lsub` is cleared by
/// the column dfs and `dense` is zeroed when its values are copied out.
#[derive(Debug, Default)]
pub(crate) struct Workspace {
    /// Three chunks of `m`: visited in panel dfs, segment recorded in this
    /// panel, visited in column dfs.
    pub(crate) marker: Vec<usize>,
    /// dfs stack: parent representative of each representative.
    pub(crate) parent: Vec<usize>,
    /// dfs stack: resume position of each representative.
    pub(crate) xplore: Vec<usize>,
    /// Supernode representatives of the segments in topological order.
    pub(crate) segrep: Vec<usize>,
    /// First nonzero row of each segment, one chunk of `m` per panel column.
    pub(crate) repfnz: Vec<usize>,
    /// Rows of `L` found by the panel dfs, one chunk of `m` per panel column.
    pub(crate) panel_lsub: Vec<usize>,
    /// End of the pruned row structure of each column.
    pub(crate) xprune: Vec<usize>,
    /// Sparse accumulator, one chunk of `m` per panel column.
    pub(crate) dense: Vec<f64>,
    pub(crate) tempv: Vec<f64>,
}

fn try_alloc<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(len)
        .map_err(|_| Error::OutOfMemory { size: len })?;
    vec.resize(len, value);
    Ok(vec)
}

impl Workspace {
    pub(crate) fn new(m: usize, n: usize, panel_size: usize, tempv_len: usize) -> Result<Self> {
        let wm = panel_size * m;
        Ok(Self {
            marker: try_alloc(NO_MARKER * m, EMPTY)?,
            parent: try_alloc(m, EMPTY)?,
            xplore: try_alloc(m, 0)?,
            segrep: try_alloc(m, 0)?,
            repfnz: try_alloc(wm, EMPTY)?,
            panel_lsub: try_alloc(wm, EMPTY)?,
            xprune: try_alloc(n, 0)?,
            dense: try_alloc(wm, 0.0)?,
            tempv: try_alloc(tempv_len, 0.0)?,
        })
    }
}
