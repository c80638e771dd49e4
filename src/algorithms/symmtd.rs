//! Householder reduction of a real symmetric matrix to tridiagonal form.
//!
//! ** NOTE: We recommend using the high-level functions in [`crate::solvers`] instead. This
//! module works on caller-owned views and is intended for use cases where the packed
//! factorization itself is needed, or where the caller owns every buffer.
//!
//! The factorization is
//!
//! $$\mathbf{A} = \mathbf{Q}\mathbf{T}\mathbf{Q}^T, \qquad
//!   \mathbf{Q} = \mathbf{H}_0 \mathbf{H}_1 \cdots \mathbf{H}_{N-3}, \qquad
//!   \mathbf{H}_i = \mathbf{I} - \tau_i \mathbf{v}_i \mathbf{v}_i^T,$$
//!
//! where $\mathbf{v}_i = [1, A_{i+2,i}, \ldots, A_{N-1,i}]$ acts on rows `i+1..N`.
//!
//! ## Storage
//!
//! Only the diagonal and the strict lower triangle of `A` are referenced. On exit
//! the diagonal and first sub-diagonal hold T, and column `i` below the first
//! sub-diagonal holds the tail of `v_i`. This is the layout of LAPACK's `dsytd2`
//! with `uplo = 'L'`. Entries above the diagonal are never read or written.
//!
//! ## Cost
//!
//! Each step applies `H_i A H_i` to the trailing block through one symmetric
//! matrix-vector product and one symmetric rank-2 update, both restricted to the
//! lower triangle. The reduction is O(N³) overall, with half the arithmetic of an
//! unsymmetric Hessenberg reduction.

use super::{validate_decomp, validate_tridiagonal_out, validate_unpack};
use crate::{
    blas,
    error::TridiagError,
    householder::{UnitLeadGuard, apply_householder_on_the_left, make_householder_in_place},
};
use faer::{
    ColMut, ColRef, MatMut, MatRef, Side,
    prelude::{Reborrow, ReborrowMut},
    unzip, zip,
};

/// Reduces the symmetric matrix `a` to tridiagonal form in place.
///
/// # Arguments
/// * `a`: An N×N matrix whose diagonal and lower triangle hold the symmetric input.
///   Overwritten with T and the packed reflectors.
/// * `tau`: A vector of length N−1 receiving the reflector coefficients. `tau[i]`
///   belongs to the reflector that eliminated column `i`; the last entry is always
///   zero since nothing lies below the final sub-diagonal element.
///
/// # Returns
/// `Ok(())`, or a [`TridiagError`] if `a` is not square or `tau` has the wrong
/// length. On error neither buffer has been modified.
///
/// Non-finite input is not detected: NaN and infinities propagate into T.
pub fn symmtd_decomp(mut a: MatMut<'_, f64>, mut tau: ColMut<'_, f64>) -> Result<(), TridiagError> {
    let n = validate_decomp(a.rb(), tau.rb())?;
    log::debug!("Reducing a {n}x{n} symmetric matrix to tridiagonal form.");

    for i in 0..n.saturating_sub(2) {
        let len = n - i - 1;

        // Column i (left half) and the trailing block (right half) are disjoint.
        let (left, right) = a.rb_mut().split_at_col_mut(i + 1);
        let mut v = left.col_mut(i).subrows_mut(i + 1, len);
        let tau_i = make_householder_in_place(v.rb_mut());

        if tau_i != 0.0 {
            let m = right.submatrix_mut(i + 1, 0, len, len);
            // tau[i..] has not been written yet and serves as workspace for x.
            let x = tau.rb_mut().subrows_mut(i, len);
            apply_similarity(tau_i, v, x, m);
        } else {
            log::trace!("Step {i}: column already reduced, skipping update.");
        }

        tau[i] = tau_i;
    }

    if n >= 2 {
        tau[n - 2] = 0.0;
    }

    Ok(())
}

/// Performs `M ← H M H` for `H = I - tau * v * vᵀ`, touching only the lower
/// triangle of `m`.
///
/// `v` is the packed reflector whose first slot holds the sub-diagonal value of
/// T; it is replaced by the implicit one for the duration of the update. `x` is
/// scratch of the same length.
fn apply_similarity(tau: f64, v: ColMut<'_, f64>, mut x: ColMut<'_, f64>, mut m: MatMut<'_, f64>) {
    let lead = UnitLeadGuard::new(v);
    let v = lead.vector();

    // x = tau * M * v
    blas::symv(Side::Lower, tau, m.rb(), v, 0.0, x.rb_mut());

    // w = x - (tau / 2) * (xᵀv) * v
    let xv = x.rb().transpose() * v;
    let alpha = -0.5 * tau * xv;
    zip!(x.rb_mut(), v).for_each(|unzip!(x_i, v_i)| {
        *x_i += alpha * *v_i;
    });

    // M = M - v * wᵀ - w * vᵀ
    blas::syr2(Side::Lower, -1.0, v, x.rb(), m.rb_mut());
}

/// Forms the orthogonal factor `Q` and extracts T from a packed reduction.
///
/// # Arguments
/// * `a`: The N×N output of [`symmtd_decomp`]. Only read.
/// * `tau`: The N−1 reflector coefficients from [`symmtd_decomp`].
/// * `q`: An N×N matrix overwritten with `Q`, so that `Qᵀ A₀ Q = T`.
/// * `diag`: Length N, receives the diagonal of T.
/// * `sdiag`: Length N−1, receives the sub-diagonal of T.
///
/// # Returns
/// `Ok(())`, or a [`TridiagError`] naming the first nonconforming argument. All
/// shapes are checked before any output is written.
pub fn symmtd_unpack(
    a: MatRef<'_, f64>,
    tau: ColRef<'_, f64>,
    mut q: MatMut<'_, f64>,
    diag: ColMut<'_, f64>,
    sdiag: ColMut<'_, f64>,
) -> Result<(), TridiagError> {
    let n = validate_unpack(a, tau, q.rb(), diag.rb(), sdiag.rb())?;
    log::debug!("Unpacking Q and T of order {n}.");

    set_identity(q.rb_mut());

    // Q = H_0 H_1 ... H_{N-3}: accumulate from the innermost reflector outwards so
    // that each H_i only ever meets the trailing block it acts on.
    for i in (0..n.saturating_sub(2)).rev() {
        let len = n - i - 1;
        let v = a.col(i).subrows(i + 1, len);
        let block = q.rb_mut().submatrix_mut(i + 1, i + 1, len, len);
        apply_householder_on_the_left(tau[i], v, block);
    }

    copy_tridiagonal(a, diag, sdiag);
    Ok(())
}

/// Extracts the diagonal and sub-diagonal of T from a packed reduction, without
/// forming `Q`.
///
/// # Arguments
/// * `a`: The N×N output of [`symmtd_decomp`]. Only read.
/// * `diag`: Length N, receives the diagonal of T.
/// * `sdiag`: Length N−1, receives the sub-diagonal of T.
pub fn symmtd_unpack_t(
    a: MatRef<'_, f64>,
    diag: ColMut<'_, f64>,
    sdiag: ColMut<'_, f64>,
) -> Result<(), TridiagError> {
    let n = super::check_square(a, "tridiagonal unpacking")?;
    validate_tridiagonal_out(n, diag.rb(), sdiag.rb())?;

    copy_tridiagonal(a, diag, sdiag);
    Ok(())
}

fn set_identity(mut q: MatMut<'_, f64>) {
    q.fill(0.0);
    for i in 0..q.nrows().min(q.ncols()) {
        q[(i, i)] = 1.0;
    }
}

fn copy_tridiagonal(a: MatRef<'_, f64>, mut diag: ColMut<'_, f64>, mut sdiag: ColMut<'_, f64>) {
    for i in 0..diag.nrows() {
        diag[i] = a[(i, i)];
    }
    for i in 0..sdiag.nrows() {
        sdiag[i] = a[(i + 1, i)];
    }
}
