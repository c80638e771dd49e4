//! Householder reduction of dense real symmetric matrices to tridiagonal form.
//!
//! Given a symmetric matrix A, this crate computes an orthogonal Q such that
//! QᵀAQ = T is symmetric tridiagonal. The reduction is the first stage of a dense
//! symmetric eigensolver: T keeps the eigenvalues of A, and Q maps the eigenvectors
//! of T back to those of A. Computing the eigenpairs of T is left to the caller.
//!
//! Built on the [`faer`] linear algebra framework. The in-place routines operate on
//! borrowed views ([`faer::MatMut`], [`faer::ColMut`], ...) and take no workspace
//! argument: the reduction keeps its scratch vector in the unused tail of `tau`.
//! The owned wrappers in [`solvers`] allocate their copies and outputs.
//!
//! ## Layers
//!
//! **In place** ([`symmtd_decomp`], [`symmtd_unpack`], [`symmtd_unpack_t`]): the
//! reduction overwrites A with T and a packed representation of Q, using the same
//! layout as LAPACK's `dsytd2` (lower triangle). Q and T are recovered on demand.
//! Only the diagonal and lower triangle of A are ever read or written.
//!
//! **Owned** ([`tridiagonalize`], [`tridiagonal_form`]): convenience wrappers that
//! copy the input and return the factors in owned buffers.
//!
//! ## Example Usage
//!
//! ```rust
//! use faer::{Col, Mat, mat};
//! use tridiag_project::{symmtd_decomp, symmtd_unpack};
//!
//! let a: Mat<f64> = mat![[4.0, 1.0, 2.0], [1.0, 3.0, 0.0], [2.0, 0.0, 5.0]];
//!
//! // Reduce a copy in place.
//! let mut packed = a.clone();
//! let mut tau = Col::<f64>::zeros(2);
//! symmtd_decomp(packed.as_mut(), tau.as_mut()).unwrap();
//!
//! // Recover Q and T.
//! let mut q = Mat::<f64>::zeros(3, 3);
//! let mut diag = Col::<f64>::zeros(3);
//! let mut sdiag = Col::<f64>::zeros(2);
//! symmtd_unpack(packed.as_ref(), tau.as_ref(), q.as_mut(), diag.as_mut(), sdiag.as_mut()).unwrap();
//!
//! // QᵀAQ is tridiagonal, with T on its diagonal and sub-diagonal.
//! let aq = a.as_ref() * q.as_ref();
//! let qtaq = q.as_ref().transpose() * aq.as_ref();
//! assert!((qtaq[(0, 0)] - diag[0]).abs() < 1e-12);
//! assert!((qtaq[(1, 0)] - sdiag[0]).abs() < 1e-12);
//! assert!(qtaq[(2, 0)].abs() < 1e-12);
//! ```
//!
//! ## Errors and numerics
//!
//! Shape violations are reported as [`TridiagError`] before any buffer is touched.
//! Numerical problems are not detected: NaN and infinities in the input propagate
//! into T, where a downstream eigensolver can inspect them.

// Declare the modules that form the crate's API structure.
pub mod algorithms;
pub mod blas;
pub mod error;
pub mod householder;
pub mod solvers;
pub mod utils;

// Re-export the main API for convenient access.
pub use algorithms::symmtd::{symmtd_decomp, symmtd_unpack, symmtd_unpack_t};
pub use error::{ErrorCode, TridiagError, TridiagErrorKind, strerror};
pub use solvers::{TridiagonalDecomposition, tridiagonal_form, tridiagonalize};
