pub(crate) mod def;
pub(crate) mod dense;
pub(crate) mod etree;
pub(crate) mod gemm;
pub(crate) mod global_lu;
pub(crate) mod kernel_bmod;
pub(crate) mod memory;
pub(crate) mod workspace;

mod column_bmod;
mod column_dfs;
mod copy_to_ucol;
mod countnz;
mod dfs;
mod matrix_u;
mod panel_bmod;
mod panel_dfs;
mod pivot_l;
mod prune_l;
mod snode_bmod;
mod snode_dfs;
mod supernodal_matrix;

pub use def::{MemoryConfig, Params};
pub use matrix_u::MatrixU;
pub use supernodal_matrix::{InnerIter, SupernodalMatrix};

pub(crate) use column_bmod::column_bmod;
pub(crate) use column_dfs::column_dfs;
pub(crate) use copy_to_ucol::copy_to_ucol;
pub(crate) use countnz::{countnz, fixup_l};
pub(crate) use etree::{col_etree, relax_snode, renumber_etree, tree_postorder};
pub(crate) use global_lu::GlobalLU;
pub(crate) use memory::{mem_init, mem_xpand};
pub(crate) use panel_bmod::panel_bmod;
pub(crate) use panel_dfs::panel_dfs;
pub(crate) use pivot_l::pivot_l;
pub(crate) use prune_l::prune_l;
pub(crate) use snode_bmod::snode_bmod;
pub(crate) use snode_dfs::snode_dfs;
pub(crate) use workspace::Workspace;
