// Copyright (C) 2016-2018 ERGO-Code
// Copyright (C) 2022-2023 Richard Lincoln

use crate::{Error, Result};

/// Permutation of `0..n` stored in both directions.
///
/// `fwd[k]` is the original index placed at position `k`, and `inv[i]` is the
/// position of original index `i`, so `inv[fwd[k]] == k`. Applied to the rows
/// of a matrix `B` this reads `B[fwd, :]`, the convention used for `rowperm`
/// and `colperm` by [`SparseLU`](crate::SparseLU).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Perm {
    fwd: Vec<usize>,
    inv: Vec<usize>,
}

impl Perm {
    pub fn identity(n: usize) -> Self {
        Self {
            fwd: (0..n).collect(),
            inv: (0..n).collect(),
        }
    }

    /// Builds a permutation from its forward array, checking that every index
    /// in `0..n` occurs exactly once.
    pub fn new_checked(fwd: Vec<usize>) -> Result<Self> {
        let n = fwd.len();
        let mut inv = vec![usize::MAX; n];
        for (k, &i) in fwd.iter().enumerate() {
            if i >= n || inv[i] != usize::MAX {
                return Err(Error::invalid_argument(
                    "perm",
                    format!("{:?} is not a permutation of 0..{}", fwd, n),
                ));
            }
            inv[i] = k;
        }
        Ok(Self { fwd, inv })
    }

    /// Builds a permutation from its inverse array.
    pub fn from_inverse(inv: Vec<usize>) -> Result<Self> {
        Ok(Self::new_checked(inv)?.inverse())
    }

    pub fn len(&self) -> usize {
        self.fwd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fwd.is_empty()
    }

    /// Forward and inverse arrays.
    pub fn arrays(&self) -> (&[usize], &[usize]) {
        (&self.fwd, &self.inv)
    }

    pub fn inverse(self) -> Self {
        Self {
            fwd: self.inv,
            inv: self.fwd,
        }
    }

    /// Sign of the permutation: `1.0` if even, `-1.0` if odd.
    pub fn sign(&self) -> f64 {
        let n = self.fwd.len();
        let mut visited = vec![false; n];
        let mut transpositions = 0;
        for start in 0..n {
            if visited[start] {
                continue;
            }
            let mut len = 0;
            let mut k = start;
            while !visited[k] {
                visited[k] = true;
                k = self.fwd[k];
                len += 1;
            }
            transpositions += len - 1;
        }
        if transpositions % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checked() {
        let p = Perm::new_checked(vec![2, 0, 1]).unwrap();
        assert_eq!(p.arrays().1, &[1, 2, 0]);
        assert!(Perm::new_checked(vec![0, 0, 1]).is_err());
        assert!(Perm::new_checked(vec![0, 3, 1]).is_err());
    }

    #[test]
    fn test_sign() {
        assert_eq!(Perm::identity(4).sign(), 1.0);
        assert_eq!(Perm::new_checked(vec![1, 0, 2]).unwrap().sign(), -1.0);
        assert_eq!(Perm::new_checked(vec![1, 2, 0]).unwrap().sign(), 1.0);
    }

    #[test]
    fn test_from_inverse() {
        let p = Perm::from_inverse(vec![1, 2, 0]).unwrap();
        assert_eq!(p.arrays().0, &[2, 0, 1]);
    }
}
