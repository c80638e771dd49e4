//! Elementary reflectors.
//!
//! A Householder reflector is stored as a scalar `tau` and a vector `v` whose
//! leading entry is implicitly one:
//!
//! $$\mathbf{H} = \mathbf{I} - \tau \mathbf{v}\mathbf{v}^T, \qquad v_0 = 1.$$
//!
//! The slot that would hold `v_0` is free to carry something else. In the packed
//! tridiagonal layout it holds the sub-diagonal entry of T, which is why the
//! reduction needs [`UnitLeadGuard`] when it hands the vector to the BLAS kernels.

use faer::{
    ColMut, ColRef, MatMut, Scale,
    prelude::{Reborrow, ReborrowMut},
    unzip, zip,
};

/// Builds, in place, the reflector that maps `x` onto a multiple of the first
/// unit vector, and returns its coefficient `tau`.
///
/// On exit `x[0]` holds `beta` (so that `Hx = beta * e_1`) and `x[1..]` holds the
/// tail of `v`. When the tail is already zero, or `x` has a single entry, `x` is
/// left untouched and `tau = 0`, i.e. `H = I`.
pub fn make_householder_in_place(mut x: ColMut<'_, f64>) -> f64 {
    let n = x.nrows();
    if n <= 1 {
        return 0.0;
    }

    let tail_norm = x.rb().subrows(1, n - 1).norm_l2();
    if tail_norm == 0.0 {
        return 0.0;
    }

    let alpha = x[0];
    let sign = if alpha >= 0.0 { 1.0 } else { -1.0 };
    let beta = -sign * alpha.hypot(tail_norm);
    let tau = (beta - alpha) / beta;

    // Scale the tail by 1 / (alpha - beta). When that divisor is subnormal its
    // reciprocal would overflow, so the scaling is split in two.
    let s = alpha - beta;
    let mut tail = x.rb_mut().subrows_mut(1, n - 1);
    if s.abs() > f64::MIN_POSITIVE {
        tail *= Scale(1.0 / s);
    } else {
        tail *= Scale(f64::EPSILON / s);
        tail *= Scale(1.0 / f64::EPSILON);
    }

    x[0] = beta;
    tau
}

/// Applies `H = I - tau * v * vᵀ` from the left: `A ← HA`.
///
/// `v[0]` is never read; the reflector's leading entry is taken to be one.
pub fn apply_householder_on_the_left(tau: f64, v: ColRef<'_, f64>, mut a: MatMut<'_, f64>) {
    assert_eq!(
        v.nrows(),
        a.nrows(),
        "Dimension mismatch: reflector of length {} applied to a matrix with {} rows.",
        v.nrows(),
        a.nrows(),
    );
    if tau == 0.0 {
        return;
    }

    let m = a.nrows();
    if m == 0 {
        return;
    }
    let v_tail = v.subrows(1, m - 1);
    for j in 0..a.ncols() {
        let (mut head, tail) = a.rb_mut().col_mut(j).split_at_row_mut(1);

        // w_j = (vᵀA)_j with v_0 = 1
        let wj = head[0] + v_tail.transpose() * tail.rb();
        let scaled = tau * wj;

        head[0] -= scaled;
        zip!(tail, v_tail).for_each(|unzip!(a_ij, v_i)| {
            *a_ij -= scaled * *v_i;
        });
    }
}

/// Temporarily materializes the implicit unit leading entry of a packed
/// reflector.
///
/// Construction saves `v[0]` and writes `1.0` in its place; dropping the guard
/// writes the saved value back, on every exit path of the enclosing scope.
pub(crate) struct UnitLeadGuard<'a> {
    v: ColMut<'a, f64>,
    saved: f64,
}

impl<'a> UnitLeadGuard<'a> {
    pub(crate) fn new(mut v: ColMut<'a, f64>) -> Self {
        let saved = v[0];
        v[0] = 1.0;
        Self { v, saved }
    }

    /// The reflector with its leading one in place.
    pub(crate) fn vector(&self) -> ColRef<'_, f64> {
        self.v.rb()
    }
}

impl Drop for UnitLeadGuard<'_> {
    fn drop(&mut self) {
        self.v[0] = self.saved;
    }
}
