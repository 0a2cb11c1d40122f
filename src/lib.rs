// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

//! Supernodal sparse LU factorization.
//!
//! Computes `P*A*Q = L*U` for a square sparse matrix `A` stored in
//! compressed columns. Columns are grouped into supernodes (consecutive
//! columns of `L` with the same structure below the diagonal block) so that
//! the numerical updates run as dense triangular solves and matrix products.
//! The symbolic structure is found column by column and panel by panel with
//! depth-first searches on the pruned graph of `L`, and the storage of the
//! factor grows on demand.

mod analyze;
mod error;
mod factorize;
mod lu;
mod perm;
mod slu;
mod solve;
mod sparse;

pub use error::{Error, Result};
pub use lu::{InnerIter, MatrixU, MemoryConfig, Params, SupernodalMatrix};
pub use perm::Perm;
pub use slu::SparseLU;
pub use sparse::{SparseColMat, SparseColMatRef};
