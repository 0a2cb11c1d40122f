// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use thiserror::Error;

/// Result type alias using the factorization [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the analysis, factorization and solve routines.
///
/// Any error leaves the factor in an undefined, partially built state. The
/// caller must discard it; nothing is rolled back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The arena holding `L` and `U` could not be grown, even after backing
    /// off the growth factor.
    #[error("insufficient memory: could not allocate {size} elements")]
    OutOfMemory {
        /// Length of the allocation that failed.
        size: usize,
    },

    /// A zero pivot was met. The column is either structurally empty below
    /// the diagonal block or numerically zero.
    #[error("numerical issue: zero pivot at column {column}")]
    SingularMatrix {
        /// Column of `A` at which the zero pivot occurred.
        column: usize,
    },

    /// Invalid argument passed to the public interface.
    #[error("invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name.
        arg: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Routine called out of order.
    #[error("invalid call: {0}")]
    InvalidCall(&'static str),
}

impl Error {
    pub(crate) fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}
