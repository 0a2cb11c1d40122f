//! Integration tests for the supernodal factorization
//!
//! Checks the structure of the factors, `P*A*Q = L*U`, determinants and
//! the error paths.

mod common;

use common::*;
use slu::{Error, MemoryConfig, Params, SparseColMat, SparseLU};

// Dense `P*A*Q` in column-major order.
fn permuted(lu: &SparseLU, a: &SparseColMat) -> Vec<f64> {
    let n = a.nrows();
    let (p, _) = lu.row_perm().unwrap().arrays();
    let (q, _) = lu.col_perm().unwrap().arrays();
    let mut paq = vec![0.0; n * n];
    for j in 0..n {
        for i in 0..n {
            paq[i + j * n] = a.get(p[i], q[j]);
        }
    }
    paq
}

fn check_factors(lu: &SparseLU, a: &SparseColMat, msg: &str) {
    let l = lu.l_factor().unwrap();
    let u = lu.u_factor().unwrap();
    let n = a.nrows();

    for j in 0..n {
        let (rows, vals) = l.as_ref().col(j);
        assert_eq!((rows[0], vals[0]), (j, 1.0), "{}: unit diagonal of L", msg);
        assert!(rows.iter().all(|&i| i >= j), "{}: L is lower", msg);
        let (rows, _) = u.as_ref().col(j);
        assert_eq!(rows.last(), Some(&j), "{}: diagonal of U", msg);
        assert!(rows.iter().all(|&i| i <= j), "{}: U is upper", msg);
    }

    assert_allclose_f64(&matmul(&l, &u), &permuted(lu, a), 1e-10, 1e-10, msg);
}

#[test]
fn test_tridiagonal_single_supernode() {
    let a = tridiagonal(4);
    let mut lu = SparseLU::new();
    lu.compute(a.as_ref(), None).unwrap();

    assert_eq!(lu.nsuper(), 1);
    assert_eq!(lu.matrix_l().unwrap().sup_to_col(), &[0, 4]);
    assert_eq!(lu.row_perm().unwrap().arrays().0, &[0, 1, 2, 3]);
    check_factors(&lu, &a, "tridiagonal");
    assert!((lu.determinant().unwrap() - 209.0).abs() < 1e-10);
}

#[test]
fn test_dense_with_partial_pivoting() {
    let a = circulant4();
    let mut lu = SparseLU::new();
    lu.compute(a.as_ref(), None).unwrap();

    // largest entry of the first column is in row 1
    assert_eq!(lu.row_perm().unwrap().arrays().0[0], 1);
    assert_eq!(lu.nnz_l(), 10);
    assert_eq!(lu.nnz_u(), 10);
    check_factors(&lu, &a, "circulant");

    assert!((lu.determinant().unwrap() + 160.0).abs() < 1e-10);
    assert!((lu.abs_determinant().unwrap() - 160.0).abs() < 1e-10);
    assert!((lu.log_abs_determinant().unwrap() - 160f64.ln()).abs() < 1e-12);
    assert_eq!(lu.sign_determinant().unwrap(), -1.0);
}

#[test]
fn test_diagonal_pivot_threshold() {
    let a = circulant4();
    let mut lu = SparseLU::with_params(Params {
        diag_pivot_thresh: 0.0,
        ..Default::default()
    });
    lu.compute(a.as_ref(), None).unwrap();

    assert_eq!(lu.row_perm().unwrap().arrays().0, &[0, 1, 2, 3]);
    check_factors(&lu, &a, "diagonal pivots");
    assert!((lu.determinant().unwrap() + 160.0).abs() < 1e-10);
}

#[test]
fn test_factors_match_permuted_matrix() {
    let params = [
        Params::default(),
        Params {
            relax: 1,
            panel_size: 4,
            ..Default::default()
        },
        Params {
            relax: 1,
            panel_size: 1,
            maxsuper: 1,
            ..Default::default()
        },
        Params {
            relax: 3,
            panel_size: 8,
            maxsuper: 2,
            ..Default::default()
        },
    ];
    let a = random_sparse(30, 3, false, 7);

    for (k, params) in params.into_iter().enumerate() {
        let mut lu = SparseLU::with_params(params);
        lu.compute(a.as_ref(), None).unwrap();
        check_factors(&lu, &a, &format!("params #{}", k));
    }
}

#[test]
fn test_factorize_reuses_analysis() {
    let a = random_sparse(20, 3, true, 11);
    let mut lu = SparseLU::new();
    lu.analyze_pattern(a.as_ref(), None).unwrap();

    lu.factorize(a.as_ref()).unwrap();
    let det = lu.determinant().unwrap();

    // same pattern, values scaled by 2
    let scaled = SparseColMat::new(
        a.nrows(),
        a.ncols(),
        a.col_ptrs().to_vec(),
        a.row_indices().to_vec(),
        a.values().iter().map(|v| 2.0 * v).collect(),
    )
    .unwrap();
    lu.factorize(scaled.as_ref()).unwrap();

    let expected = det * 2f64.powi(20);
    assert!((lu.determinant().unwrap() - expected).abs() <= 1e-10 * expected.abs());
}

#[test]
fn test_growth_from_small_estimate() {
    let a = random_sparse(60, 4, false, 3);
    let mut lu = SparseLU::with_params(Params {
        fillfactor: 1,
        relax: 2,
        ..Default::default()
    });
    lu.compute(a.as_ref(), None).unwrap();

    assert!(lu.num_expansions() > 1);
    check_factors(&lu, &a, "grown");
}

#[test]
fn test_numerically_singular() {
    let a = SparseColMat::from_triplets(
        2,
        2,
        &[(0, 0, 1.0), (1, 0, 1.0), (0, 1, 1.0), (1, 1, 1.0)],
    )
    .unwrap();
    let mut lu = SparseLU::new();

    assert_eq!(
        lu.compute(a.as_ref(), None),
        Err(Error::SingularMatrix { column: 1 })
    );
    assert!(lu.row_perm().is_none());
    assert!(matches!(lu.solve(&[1.0, 1.0], 1), Err(Error::InvalidCall(_))));
}

#[test]
fn test_structurally_singular() {
    // column 1 is empty
    let a = SparseColMat::from_triplets(
        3,
        3,
        &[(0, 0, 2.0), (2, 0, 1.0), (0, 2, 1.0), (1, 2, 1.0), (2, 2, 3.0)],
    )
    .unwrap();

    for relax in [1, 10] {
        let mut lu = SparseLU::with_params(Params {
            relax,
            ..Default::default()
        });
        assert_eq!(
            lu.compute(a.as_ref(), None),
            Err(Error::SingularMatrix { column: 1 })
        );
    }
}

#[test]
fn test_singular_column_reported_in_original_order() {
    // column 1 is empty and the postorder of the elimination tree moves it
    // to the first step
    let a = SparseColMat::from_triplets(
        4,
        4,
        &[
            (0, 0, 2.0),
            (2, 0, 1.0),
            (0, 2, 1.0),
            (2, 2, 3.0),
            (1, 3, 1.0),
            (2, 3, 1.0),
            (3, 3, 4.0),
        ],
    )
    .unwrap();
    let mut lu = SparseLU::new();

    assert_eq!(
        lu.compute(a.as_ref(), None),
        Err(Error::SingularMatrix { column: 1 })
    );
    assert_eq!(lu.col_perm().unwrap().arrays().0[0], 1);
    assert!(lu.row_perm().is_none());
}

#[test]
fn test_out_of_memory() {
    let a = tridiagonal(10);
    let mut lu = SparseLU::with_params(Params {
        memory: MemoryConfig {
            limit: Some(0),
            ..Default::default()
        },
        ..Default::default()
    });

    assert!(matches!(
        lu.compute(a.as_ref(), None),
        Err(Error::OutOfMemory { .. })
    ));
}

#[test]
fn test_invalid_params() {
    let a = tridiagonal(3);
    let mut lu = SparseLU::with_params(Params {
        diag_pivot_thresh: 1.5,
        ..Default::default()
    });

    assert!(matches!(
        lu.compute(a.as_ref(), None),
        Err(Error::InvalidArgument {
            arg: "diag_pivot_thresh",
            ..
        })
    ));
}
