//! Symmetric level-2 kernels driving the tridiagonal reduction.
//!
//! Both kernels are thin wrappers over [`faer`]'s triangular matrix product, so
//! the arithmetic runs through faer's own SIMD kernels. They take a [`Side`]
//! selector and only ever touch that triangle of the matrix: the other triangle
//! may hold unrelated data (packed reflectors, user garbage) and is left alone.
//!
//! Dimension mismatches between the operands are programming errors inside the
//! crate and panic, like the dimension check of a matrix-vector product would.

use faer::{
    Accum, ColMut, ColRef, MatMut, MatRef, Par, Scale, Side,
    linalg::matmul::triangular::{BlockStructure, matmul},
    prelude::ReborrowMut,
};

/// Symmetric matrix-vector product `y ← αAx + βy`, reading only the `side`
/// triangle of `a` (diagonal included).
///
/// When `beta` is zero `y` is overwritten without being read.
pub fn symv(
    side: Side,
    alpha: f64,
    a: MatRef<'_, f64>,
    x: ColRef<'_, f64>,
    beta: f64,
    mut y: ColMut<'_, f64>,
) {
    let n = a.nrows();
    assert_eq!(a.ncols(), n, "symv requires a square matrix.");
    assert_eq!(x.nrows(), n, "Dimension mismatch: symv operand x.");
    assert_eq!(y.nrows(), n, "Dimension mismatch: symv destination y.");

    // The upper triangle of A is the lower triangle of Aᵀ.
    let a = match side {
        Side::Lower => a,
        Side::Upper => a.transpose(),
    };

    let accum = if beta == 0.0 {
        Accum::Replace
    } else {
        if beta != 1.0 {
            y *= Scale(beta);
        }
        Accum::Add
    };

    // y (+)= α L x, with L the lower triangle including the diagonal.
    matmul(
        y.rb_mut().as_mat_mut(),
        BlockStructure::Rectangular,
        accum,
        a,
        BlockStructure::TriangularLower,
        x.as_mat(),
        BlockStructure::Rectangular,
        alpha,
        Par::Seq,
    );
    // y += α Lₛᵀ x, with Lₛ the strict lower triangle.
    matmul(
        y.as_mat_mut(),
        BlockStructure::Rectangular,
        Accum::Add,
        a.transpose(),
        BlockStructure::StrictTriangularUpper,
        x.as_mat(),
        BlockStructure::Rectangular,
        alpha,
        Par::Seq,
    );
}

/// Symmetric rank-2 update `A ← A + α(xyᵀ + yxᵀ)`, writing only the `side`
/// triangle of `a` (diagonal included).
pub fn syr2(side: Side, alpha: f64, x: ColRef<'_, f64>, y: ColRef<'_, f64>, a: MatMut<'_, f64>) {
    let n = a.nrows();
    assert_eq!(a.ncols(), n, "syr2 requires a square matrix.");
    assert_eq!(x.nrows(), n, "Dimension mismatch: syr2 operand x.");
    assert_eq!(y.nrows(), n, "Dimension mismatch: syr2 operand y.");

    // xyᵀ + yxᵀ is symmetric, so updating the lower triangle of Aᵀ updates
    // the upper triangle of A.
    let mut a = match side {
        Side::Lower => a,
        Side::Upper => a.transpose_mut(),
    };

    matmul(
        a.rb_mut(),
        BlockStructure::TriangularLower,
        Accum::Add,
        x.as_mat(),
        BlockStructure::Rectangular,
        y.as_mat().transpose(),
        BlockStructure::Rectangular,
        alpha,
        Par::Seq,
    );
    matmul(
        a,
        BlockStructure::TriangularLower,
        Accum::Add,
        y.as_mat(),
        BlockStructure::Rectangular,
        x.as_mat().transpose(),
        BlockStructure::Rectangular,
        alpha,
        Par::Seq,
    );
}

/// Copies the `side` triangle of `a` into the other one, producing the full
/// symmetric matrix it represents.
pub fn symmetrize(side: Side, mut a: MatMut<'_, f64>) {
    let n = a.nrows();
    assert_eq!(a.ncols(), n, "symmetrize requires a square matrix.");
    for j in 0..n {
        for i in (j + 1)..n {
            match side {
                Side::Lower => {
                    let value = a[(i, j)];
                    a[(j, i)] = value;
                }
                Side::Upper => {
                    let value = a[(j, i)];
                    a[(i, j)] = value;
                }
            }
        }
    }
}
