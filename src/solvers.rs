//! This module provides a high-level, user-friendly API for tridiagonalizing a
//! symmetric matrix without managing the packed storage by hand.
//!
//! The functions here copy their input, run [`symmtd_decomp`] on the copy and
//! unpack the result into owned buffers. Use [`crate::algorithms::symmtd`]
//! directly to work in place.

use crate::{
    algorithms::symmtd::{symmtd_decomp, symmtd_unpack, symmtd_unpack_t},
    error::TridiagError,
};
use faer::{Col, Mat, MatRef};

/// An explicit factorization `A = Q T Qᵀ` with `T` symmetric tridiagonal.
#[derive(Debug, Clone)]
pub struct TridiagonalDecomposition {
    /// The orthogonal factor.
    pub q: Mat<f64>,
    /// Diagonal of `T`, length N.
    pub diag: Vec<f64>,
    /// Sub-diagonal (equivalently super-diagonal) of `T`, length N−1.
    pub sdiag: Vec<f64>,
}

impl TridiagonalDecomposition {
    /// Order of the factorized matrix.
    pub fn dim(&self) -> usize {
        self.diag.len()
    }

    /// The dense tridiagonal matrix `T`.
    pub fn t(&self) -> Mat<f64> {
        assemble_tridiagonal(&self.diag, &self.sdiag)
    }

    /// Recomputes `Q T Qᵀ`, which should reproduce the original matrix.
    pub fn reconstruct(&self) -> Mat<f64> {
        let qt = self.q.as_ref() * self.t().as_ref();
        qt.as_ref() * self.q.as_ref().transpose()
    }

    /// Loss of orthogonality of `Q`, measured as ‖I − QᵀQ‖_F.
    pub fn orthogonality_loss(&self) -> f64 {
        let n = self.dim();
        let identity = Mat::<f64>::identity(n, n);
        (&identity - self.q.as_ref().transpose() * self.q.as_ref()).norm_l2()
    }
}

/// Assembles a dense `faer::Mat` from a diagonal and a sub-diagonal:
///
/// ```text
/// T = | d_0 e_0  0  ... |
///     | e_0 d_1 e_1 ... |
///     |  0  e_1 d_2 ... |
///     | ... ... ... ... |
/// ```
///
/// # Panics
/// If `sdiag` does not have exactly one entry less than `diag` (both may be empty).
pub fn assemble_tridiagonal(diag: &[f64], sdiag: &[f64]) -> Mat<f64> {
    let n = diag.len();
    assert_eq!(
        sdiag.len(),
        n.saturating_sub(1),
        "Dimension mismatch: {} diagonal entries require {} sub-diagonal entries, got {}.",
        n,
        n.saturating_sub(1),
        sdiag.len(),
    );
    let mut t = Mat::zeros(n, n);
    for (i, &d) in diag.iter().enumerate() {
        t[(i, i)] = d;
    }
    for (i, &e) in sdiag.iter().enumerate() {
        t[(i + 1, i)] = e;
        t[(i, i + 1)] = e;
    }
    t
}

/// Computes `A = Q T Qᵀ` for a symmetric matrix.
///
/// Only the diagonal and lower triangle of `a` are read.
///
/// # Returns
/// The explicit factorization, or a [`TridiagError`] if `a` is not square.
pub fn tridiagonalize(a: MatRef<'_, f64>) -> Result<TridiagonalDecomposition, TridiagError> {
    let mut work = a.to_owned();
    let n = work.nrows();
    let mut tau = Col::<f64>::zeros(n.saturating_sub(1));
    symmtd_decomp(work.as_mut(), tau.as_mut())?;

    let mut q = Mat::<f64>::zeros(n, n);
    let mut diag = Col::<f64>::zeros(n);
    let mut sdiag = Col::<f64>::zeros(n.saturating_sub(1));
    symmtd_unpack(
        work.as_ref(),
        tau.as_ref(),
        q.as_mut(),
        diag.as_mut(),
        sdiag.as_mut(),
    )?;

    Ok(TridiagonalDecomposition {
        q,
        diag: col_to_vec(&diag),
        sdiag: col_to_vec(&sdiag),
    })
}

/// Computes only the tridiagonal matrix `T` similar to `a`, as its diagonal and
/// sub-diagonal. Cheaper than [`tridiagonalize`] since `Q` is never formed.
pub fn tridiagonal_form(a: MatRef<'_, f64>) -> Result<(Vec<f64>, Vec<f64>), TridiagError> {
    let mut work = a.to_owned();
    let n = work.nrows();
    let mut tau = Col::<f64>::zeros(n.saturating_sub(1));
    symmtd_decomp(work.as_mut(), tau.as_mut())?;

    let mut diag = Col::<f64>::zeros(n);
    let mut sdiag = Col::<f64>::zeros(n.saturating_sub(1));
    symmtd_unpack_t(work.as_ref(), diag.as_mut(), sdiag.as_mut())?;

    Ok((col_to_vec(&diag), col_to_vec(&sdiag)))
}

fn col_to_vec(col: &Col<f64>) -> Vec<f64> {
    (0..col.nrows()).map(|i| col[i]).collect()
}
