//! Core algorithms: the Householder tridiagonal reduction and its unpacking.
//!
//! The entry points live in [`symmtd`]. This module holds the shape checks that
//! both halves share. Every check runs before the first write to a caller buffer,
//! so a failed call leaves its arguments exactly as it found them.

pub mod symmtd;

use crate::error::{TridiagError, TridiagErrorKind};
use faer::{ColRef, MatRef};

/// Checks that `a` is square and returns its order.
pub(crate) fn check_square(a: MatRef<'_, f64>, routine: &'static str) -> Result<usize, TridiagError> {
    if a.nrows() != a.ncols() {
        return Err(TridiagErrorKind::NotSquare {
            routine,
            nrows: a.nrows(),
            ncols: a.ncols(),
        }
        .into());
    }
    Ok(a.nrows())
}

/// Checks that a companion buffer named `param_name` has length `expected`.
pub(crate) fn check_len(
    param_name: &'static str,
    matrix_size: usize,
    expected: usize,
    actual: usize,
) -> Result<(), TridiagError> {
    if expected != actual {
        return Err(TridiagErrorKind::LengthMismatch {
            param_name,
            matrix_size,
            expected,
            actual,
        }
        .into());
    }
    Ok(())
}

/// Length of the off-diagonal companions (`tau`, `sdiag`) of an order-`n` matrix.
///
/// An empty matrix has empty companions.
#[inline]
pub(crate) fn off_diagonal_len(n: usize) -> usize {
    n.saturating_sub(1)
}

/// Validates the operands of the in-place reduction.
pub(crate) fn validate_decomp(a: MatRef<'_, f64>, tau: ColRef<'_, f64>) -> Result<usize, TridiagError> {
    let n = check_square(a, "symmetric tridiagonal decomposition")?;
    check_len("tau", n, off_diagonal_len(n), tau.nrows())?;
    Ok(n)
}

/// Validates the destination of the tridiagonal extraction.
pub(crate) fn validate_tridiagonal_out(
    n: usize,
    diag: ColRef<'_, f64>,
    sdiag: ColRef<'_, f64>,
) -> Result<(), TridiagError> {
    check_len("diag", n, n, diag.nrows())?;
    check_len("sdiag", n, off_diagonal_len(n), sdiag.nrows())
}

/// Validates every operand of the full unpacking, in the order the arguments
/// are passed.
pub(crate) fn validate_unpack(
    a: MatRef<'_, f64>,
    tau: ColRef<'_, f64>,
    q: MatRef<'_, f64>,
    diag: ColRef<'_, f64>,
    sdiag: ColRef<'_, f64>,
) -> Result<usize, TridiagError> {
    let n = check_square(a, "tridiagonal unpacking")?;
    check_len("tau", n, off_diagonal_len(n), tau.nrows())?;
    check_len("q (rows)", n, n, q.nrows())?;
    check_len("q (columns)", n, n, q.ncols())?;
    validate_tridiagonal_out(n, diag, sdiag)?;
    Ok(n)
}
