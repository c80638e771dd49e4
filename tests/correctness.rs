//! Integration test suite to verify the mathematical correctness of the tridiagonal reduction.
//!
//! # Test Methodology
//!
//! The reduction has no closed-form output to compare against, so the tests check the
//! algebraic identities the factorization must satisfy:
//! 1.  **Orthogonality:** the reconstructed `Q` satisfies `QᵀQ = I`.
//! 2.  **Similarity:** `Qᵀ A₀ Q`, formed from the *original* matrix, equals the
//!     tridiagonal `T` read from the packed storage, and is zero outside the
//!     tridiagonal band.
//! 3.  **Spectrum:** `T` has the same eigenvalues as `A₀`, as computed independently
//!     by [`faer`]'s self-adjoint eigensolver.
//!
//! Inputs are random symmetric matrices from a fixed-seed generator, so the tests are
//! deterministic. Only their lower triangle is populated; the upper triangle is filled
//! with a sentinel value that would poison every identity above if it were ever read.

use anyhow::{Result, anyhow, ensure};
use faer::{Col, Mat, MatRef, Side};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tridiag_project::{
    TridiagErrorKind,
    blas::symmetrize,
    solvers::assemble_tridiagonal,
    symmtd_decomp, symmtd_unpack, symmtd_unpack_t,
};

/// Tolerance on `max |QᵀQ - I|` for double precision with N ≤ 50.
const ORTHOGONALITY_TOLERANCE: f64 = 1e-10;

/// Tolerance on `max |QᵀA₀Q - T|`, relative to the size of the entries of A₀ (≤ 1).
const SIMILARITY_TOLERANCE: f64 = 1e-10;

/// Value placed above the diagonal of the working copy to detect stray reads.
const UPPER_SENTINEL: f64 = 1.0e300;

fn max_abs_diff(lhs: MatRef<'_, f64>, rhs: MatRef<'_, f64>) -> f64 {
    let mut max = 0.0_f64;
    for j in 0..lhs.ncols() {
        for i in 0..lhs.nrows() {
            max = max.max((lhs[(i, j)] - rhs[(i, j)]).abs());
        }
    }
    max
}

fn col_to_vec(col: &Col<f64>) -> Vec<f64> {
    (0..col.nrows()).map(|i| col[i]).collect()
}

/// Creates a random symmetric test matrix with entries in [-1, 1).
///
/// Returns the full symmetric matrix and a working copy whose strict upper triangle
/// holds [`UPPER_SENTINEL`].
fn create_symmetric_problem(n: usize, seed: u64) -> (Mat<f64>, Mat<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut full = Mat::<f64>::zeros(n, n);
    for j in 0..n {
        for i in j..n {
            full[(i, j)] = rng.random_range(-1.0..1.0);
        }
    }
    symmetrize(Side::Lower, full.as_mut());

    let working = Mat::from_fn(n, n, |i, j| if i >= j { full[(i, j)] } else { UPPER_SENTINEL });
    (full, working)
}

/// Reduces `working` and unpacks it, returning `(Q, diag, sdiag, tau)`.
fn reduce_and_unpack(mut working: Mat<f64>) -> Result<(Mat<f64>, Vec<f64>, Vec<f64>, Vec<f64>)> {
    let n = working.nrows();
    let before = working.clone();
    let mut tau = Col::<f64>::zeros(n.saturating_sub(1));
    symmtd_decomp(working.as_mut(), tau.as_mut())?;

    for j in 0..n {
        for i in 0..j {
            ensure!(
                working[(i, j)] == before[(i, j)],
                "upper triangle entry ({i}, {j}) was modified"
            );
        }
    }

    let mut q = Mat::<f64>::zeros(n, n);
    let mut diag = Col::<f64>::zeros(n);
    let mut sdiag = Col::<f64>::zeros(n.saturating_sub(1));
    symmtd_unpack(
        working.as_ref(),
        tau.as_ref(),
        q.as_mut(),
        diag.as_mut(),
        sdiag.as_mut(),
    )?;

    Ok((q, col_to_vec(&diag), col_to_vec(&sdiag), col_to_vec(&tau)))
}

/// A macro to generate the boilerplate for each size-specific correctness test.
///
/// Each generated test:
/// 1. Builds a random symmetric matrix of order `$n`.
/// 2. Reduces and unpacks it.
/// 3. Checks orthogonality of `Q` and the similarity `QᵀA₀Q = T`.
/// 4. Compares the spectra of `A₀` and `T`.
macro_rules! generate_correctness_test {
    ($test_name:ident, $n:expr, $seed:expr) => {
        #[test]
        fn $test_name() -> Result<()> {
            let n: usize = $n;
            let (full, working) = create_symmetric_problem(n, $seed);
            let (q, diag, sdiag, tau) = reduce_and_unpack(working)?;

            ensure!(tau.len() == n - 1, "tau has length {}", tau.len());
            ensure!(tau[n - 2] == 0.0, "last tau entry must be zero");

            // 1. Orthogonality.
            let qtq = q.as_ref().transpose() * q.as_ref();
            let identity = Mat::<f64>::identity(n, n);
            let ortho_err = max_abs_diff(qtq.as_ref(), identity.as_ref());
            ensure!(
                ortho_err < ORTHOGONALITY_TOLERANCE,
                "n = {}: orthogonality loss too high: {}",
                n,
                ortho_err
            );

            // 2. Similarity, with T read from the packed storage.
            let aq = full.as_ref() * q.as_ref();
            let qtaq = q.as_ref().transpose() * aq.as_ref();
            let t = assemble_tridiagonal(&diag, &sdiag);
            let sim_err = max_abs_diff(qtaq.as_ref(), t.as_ref());
            ensure!(
                sim_err < SIMILARITY_TOLERANCE,
                "n = {}: similarity residual too high: {}",
                n,
                sim_err
            );

            // 3. Spectrum.
            let eigs_a = full
                .as_ref()
                .self_adjoint_eigen(Side::Lower)
                .map_err(|e| anyhow!("EVD of A failed: {:?}", e))?;
            let eigs_t = t
                .as_ref()
                .self_adjoint_eigen(Side::Lower)
                .map_err(|e| anyhow!("EVD of T failed: {:?}", e))?;
            let (s_a, s_t) = (eigs_a.S(), eigs_t.S());
            for i in 0..n {
                ensure!(
                    (s_a[i] - s_t[i]).abs() < 1e-10,
                    "n = {}: eigenvalue {} differs: {} vs {}",
                    n,
                    i,
                    s_a[i],
                    s_t[i]
                );
            }

            Ok(())
        }
    };
}

// --- Test Suite ---
// Sizes cover the smallest matrix with a real reflection (3), small odd/even orders,
// and the upper end of the range the tolerances are calibrated for.
generate_correctness_test!(test_random_symmetric_n3, 3, 3);
generate_correctness_test!(test_random_symmetric_n4, 4, 4);
generate_correctness_test!(test_random_symmetric_n7, 7, 7);
generate_correctness_test!(test_random_symmetric_n16, 16, 16);
generate_correctness_test!(test_random_symmetric_n33, 33, 33);
generate_correctness_test!(test_random_symmetric_n50, 50, 50);

#[test]
fn test_concrete_three_by_three() -> Result<()> {
    let full: Mat<f64> = faer::mat![[4.0, 1.0, 2.0], [1.0, 3.0, 0.0], [2.0, 0.0, 5.0],];
    let (q, diag, sdiag, tau) = reduce_and_unpack(full.clone())?;

    // The reflection eliminating A[2][0] below A[1][0]: x = [1, 2], beta = -sqrt(5).
    let sqrt5 = 5.0_f64.sqrt();
    ensure!((tau[0] - (1.0 + sqrt5) / sqrt5).abs() < 1e-12, "tau[0] = {}", tau[0]);
    ensure!((sdiag[0] + sqrt5).abs() < 1e-12, "sdiag[0] = {}", sdiag[0]);

    let aq = full.as_ref() * q.as_ref();
    let qtaq = q.as_ref().transpose() * aq.as_ref();
    let t = assemble_tridiagonal(&diag, &sdiag);
    ensure!(max_abs_diff(qtaq.as_ref(), t.as_ref()) < 1e-9);

    // The sub-diagonal of QᵀA₀Q, computed independently, matches sdiag.
    for i in 0..2 {
        ensure!((qtaq[(i + 1, i)] - sdiag[i]).abs() < 1e-12);
        ensure!((qtaq[(i, i + 1)] - sdiag[i]).abs() < 1e-12);
    }
    Ok(())
}

#[test]
fn test_reduce_rejects_non_square() -> Result<()> {
    let mut a = Mat::<f64>::zeros(3, 4);
    let mut tau = Col::<f64>::zeros(2);
    let err = symmtd_decomp(a.as_mut(), tau.as_mut())
        .err()
        .ok_or_else(|| anyhow!("3x4 input was accepted"))?;
    ensure!(matches!(err.kind(), TridiagErrorKind::NotSquare { .. }));
    Ok(())
}

#[test]
fn test_reduce_rejects_wrong_tau_length() -> Result<()> {
    let (_, mut working) = create_symmetric_problem(5, 1);
    let snapshot = working.clone();
    for len in [0, 3, 5, 6] {
        let mut tau = Col::<f64>::zeros(len);
        let err = symmtd_decomp(working.as_mut(), tau.as_mut())
            .err()
            .ok_or_else(|| anyhow!("tau of length {len} was accepted"))?;
        ensure!(matches!(
            err.kind(),
            TridiagErrorKind::LengthMismatch { param_name: "tau", .. }
        ));
    }
    ensure!(working == snapshot, "a failed call modified the matrix");
    Ok(())
}

#[test]
fn test_unpack_rejects_mismatched_outputs() -> Result<()> {
    const OUTPUT_SENTINEL: f64 = -7.0;

    let (_, mut working) = create_symmetric_problem(4, 2);
    let mut tau = Col::<f64>::zeros(3);
    symmtd_decomp(working.as_mut(), tau.as_mut())?;

    let cases: [(usize, usize, usize, usize, usize, &str); 6] = [
        (2, 4, 4, 4, 3, "tau"),
        (4, 4, 4, 4, 3, "tau"),
        (3, 3, 4, 4, 3, "q (rows)"),
        (3, 4, 5, 4, 3, "q (columns)"),
        (3, 4, 4, 3, 3, "diag"),
        (3, 4, 4, 4, 4, "sdiag"),
    ];
    for (tau_len, q_rows, q_cols, diag_len, sdiag_len, expected_param) in cases {
        let tau_arg = Col::from_fn(tau_len, |i| if i < 3 { tau[i] } else { 0.0 });
        let mut q = Mat::from_fn(q_rows, q_cols, |_, _| OUTPUT_SENTINEL);
        let mut diag = Col::from_fn(diag_len, |_| OUTPUT_SENTINEL);
        let mut sdiag = Col::from_fn(sdiag_len, |_| OUTPUT_SENTINEL);
        let err = symmtd_unpack(
            working.as_ref(),
            tau_arg.as_ref(),
            q.as_mut(),
            diag.as_mut(),
            sdiag.as_mut(),
        )
        .err()
        .ok_or_else(|| anyhow!("mismatched {expected_param} was accepted"))?;
        match err.kind() {
            TridiagErrorKind::LengthMismatch { param_name, .. } => {
                ensure!(*param_name == expected_param, "reported {param_name}")
            }
            other => return Err(anyhow!("unexpected error kind: {other:?}")),
        }
        ensure!(
            q == Mat::from_fn(q_rows, q_cols, |_, _| OUTPUT_SENTINEL),
            "failed unpack ({expected_param}) wrote to q"
        );
        ensure!(
            col_to_vec(&diag) == vec![OUTPUT_SENTINEL; diag_len],
            "failed unpack ({expected_param}) wrote to diag"
        );
        ensure!(
            col_to_vec(&sdiag) == vec![OUTPUT_SENTINEL; sdiag_len],
            "failed unpack ({expected_param}) wrote to sdiag"
        );
    }

    // A rectangular packed matrix is rejected before any output is touched.
    let rectangular = Mat::<f64>::zeros(3, 4);
    let tau = Col::<f64>::zeros(2);
    let mut q = Mat::from_fn(3, 3, |_, _| OUTPUT_SENTINEL);
    let mut diag = Col::from_fn(3, |_| OUTPUT_SENTINEL);
    let mut sdiag = Col::from_fn(2, |_| OUTPUT_SENTINEL);
    let err = symmtd_unpack(
        rectangular.as_ref(),
        tau.as_ref(),
        q.as_mut(),
        diag.as_mut(),
        sdiag.as_mut(),
    )
    .err()
    .ok_or_else(|| anyhow!("rectangular input was accepted"))?;
    ensure!(
        matches!(
            err.kind(),
            TridiagErrorKind::NotSquare {
                nrows: 3,
                ncols: 4,
                ..
            }
        ),
        "unexpected error kind: {:?}",
        err.kind()
    );
    ensure!(q == Mat::from_fn(3, 3, |_, _| OUTPUT_SENTINEL));
    ensure!(col_to_vec(&diag) == vec![OUTPUT_SENTINEL; 3]);
    ensure!(col_to_vec(&sdiag) == vec![OUTPUT_SENTINEL; 2]);
    Ok(())
}

#[test]
fn test_order_one_is_untouched() -> Result<()> {
    let mut a = Mat::from_fn(1, 1, |_, _| -2.5);
    let mut tau = Col::<f64>::zeros(0);
    symmtd_decomp(a.as_mut(), tau.as_mut())?;
    ensure!(a[(0, 0)] == -2.5);

    let (q, diag, sdiag, tau) = reduce_and_unpack(a)?;
    ensure!(q[(0, 0)] == 1.0);
    ensure!(diag == vec![-2.5]);
    ensure!(sdiag.is_empty() && tau.is_empty());
    Ok(())
}

#[test]
fn test_order_two_has_zero_tau() -> Result<()> {
    let (full, working) = create_symmetric_problem(2, 9);
    let (q, diag, sdiag, tau) = reduce_and_unpack(working)?;
    ensure!(tau == vec![0.0]);
    ensure!(q == Mat::<f64>::identity(2, 2));
    ensure!(diag == vec![full[(0, 0)], full[(1, 1)]]);
    ensure!(sdiag == vec![full[(1, 0)]]);
    Ok(())
}

#[test]
fn test_unpack_t_is_idempotent_and_matches_unpack() -> Result<()> {
    let (_, mut working) = create_symmetric_problem(8, 11);
    let mut tau = Col::<f64>::zeros(7);
    symmtd_decomp(working.as_mut(), tau.as_mut())?;

    let mut first = (Col::<f64>::zeros(8), Col::<f64>::zeros(7));
    let mut second = (Col::<f64>::zeros(8), Col::<f64>::zeros(7));
    symmtd_unpack_t(working.as_ref(), first.0.as_mut(), first.1.as_mut())?;
    symmtd_unpack_t(working.as_ref(), second.0.as_mut(), second.1.as_mut())?;
    ensure!(first == second, "unpack_t is not a pure function of A");

    let mut q = Mat::<f64>::zeros(8, 8);
    let mut diag = Col::<f64>::zeros(8);
    let mut sdiag = Col::<f64>::zeros(7);
    let snapshot = working.clone();
    symmtd_unpack(
        working.as_ref(),
        tau.as_ref(),
        q.as_mut(),
        diag.as_mut(),
        sdiag.as_mut(),
    )?;
    ensure!(working == snapshot, "unpack modified A");
    ensure!(diag == first.0 && sdiag == first.1);
    Ok(())
}

#[test]
fn test_non_finite_input_propagates() -> Result<()> {
    let (_, mut working) = create_symmetric_problem(4, 5);
    working[(2, 0)] = f64::NAN;
    let mut tau = Col::<f64>::zeros(3);
    symmtd_decomp(working.as_mut(), tau.as_mut())?;
    ensure!(tau[0].is_nan(), "NaN did not reach tau[0]");
    Ok(())
}
