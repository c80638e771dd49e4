//! This module defines the custom error types for the library.
//!
//! All precondition failures raised by the reduction and unpacking routines are
//! collected into a single enum, [`TridiagErrorKind`], wrapped by the public
//! [`TridiagError`]. Both are shape errors: they are detected from size fields
//! alone, before any caller buffer is written.
//!
//! The module also hosts the numeric status table ([`ErrorCode`], [`strerror`])
//! used when results have to cross a boundary that only understands integers,
//! such as a C caller or a log line.
use thiserror::Error;

/// Represents all possible errors that can occur while reducing or unpacking.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct TridiagError(#[from] TridiagErrorKind);

impl TridiagError {
    /// Returns the underlying kind, for callers that need to branch on it.
    pub fn kind(&self) -> &TridiagErrorKind {
        &self.0
    }

    /// Returns the numeric status code associated with this error.
    pub fn code(&self) -> ErrorCode {
        self.0.code()
    }
}

// Manually implement PartialEq for the public error type.
// We compare the inner `TridiagErrorKind`.
impl PartialEq for TridiagError {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// The distinct kinds of shape errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TridiagErrorKind {
    /// The input matrix has a different number of rows and columns.
    #[error("Matrix not square: {routine} requires a square matrix, got {nrows}x{ncols}.")]
    NotSquare {
        routine: &'static str,
        nrows: usize,
        ncols: usize,
    },

    /// A companion vector or matrix does not conform to the size of the input matrix.
    #[error(
        "Length mismatch: `{param_name}` must have length {expected} for a matrix of size {matrix_size}, but has length {actual}."
    )]
    LengthMismatch {
        param_name: &'static str,
        matrix_size: usize,
        expected: usize,
        actual: usize,
    },
}

impl TridiagErrorKind {
    /// Maps the kind onto the library-wide status table.
    pub fn code(&self) -> ErrorCode {
        match self {
            TridiagErrorKind::NotSquare { .. } => ErrorCode::NotSquare,
            TridiagErrorKind::LengthMismatch { .. } => ErrorCode::BadLength,
        }
    }
}

/// Numeric status codes shared across the library.
///
/// The discriminants are stable and may be handed to foreign callers. Only
/// [`ErrorCode::NotSquare`] and [`ErrorCode::BadLength`] are produced by the
/// tridiagonal routines; the rest of the table is kept complete so that codes
/// coming from other components can be rendered with [`strerror`].
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success = 0,
    Failure = -1,
    Domain = 1,
    Range = 2,
    Fault = 3,
    Invalid = 4,
    Failed = 5,
    Factorization = 6,
    Sanity = 7,
    NoMemory = 8,
    BadFunction = 9,
    Runaway = 10,
    MaxIterations = 11,
    ZeroDivision = 12,
    BadTolerance = 13,
    Tolerance = 14,
    Underflow = 15,
    Overflow = 16,
    Loss = 17,
    Round = 18,
    BadLength = 19,
    NotSquare = 20,
    Singular = 21,
    Unsupported = 23,
    Unimplemented = 24,
}

impl ErrorCode {
    const ALL: [ErrorCode; 25] = [
        ErrorCode::Success,
        ErrorCode::Failure,
        ErrorCode::Domain,
        ErrorCode::Range,
        ErrorCode::Fault,
        ErrorCode::Invalid,
        ErrorCode::Failed,
        ErrorCode::Factorization,
        ErrorCode::Sanity,
        ErrorCode::NoMemory,
        ErrorCode::BadFunction,
        ErrorCode::Runaway,
        ErrorCode::MaxIterations,
        ErrorCode::ZeroDivision,
        ErrorCode::BadTolerance,
        ErrorCode::Tolerance,
        ErrorCode::Underflow,
        ErrorCode::Overflow,
        ErrorCode::Loss,
        ErrorCode::Round,
        ErrorCode::BadLength,
        ErrorCode::NotSquare,
        ErrorCode::Singular,
        ErrorCode::Unsupported,
        ErrorCode::Unimplemented,
    ];

    /// Looks up the code with the given numeric value.
    pub fn from_code(code: i32) -> Option<ErrorCode> {
        Self::ALL.iter().copied().find(|c| *c as i32 == code)
    }

    /// The fixed description of this code.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::Success => "success",
            ErrorCode::Failure => "failure",
            ErrorCode::Domain => "input domain error",
            ErrorCode::Range => "output range error",
            ErrorCode::Fault => "invalid pointer",
            ErrorCode::Invalid => "invalid argument supplied by user",
            ErrorCode::Failed => "generic failure",
            ErrorCode::Factorization => "factorization failed",
            ErrorCode::Sanity => "sanity check failed - shouldn't happen",
            ErrorCode::NoMemory => "malloc failed",
            ErrorCode::BadFunction => "problem with user-supplied function",
            ErrorCode::Runaway => "iterative process is out of control",
            ErrorCode::MaxIterations => "exceeded max number of iterations",
            ErrorCode::ZeroDivision => "tried to divide by zero",
            ErrorCode::BadTolerance => {
                "specified tolerance is invalid or theoretically unattainable"
            }
            ErrorCode::Tolerance => "failed to reach the specified tolerance",
            ErrorCode::Underflow => "underflow",
            ErrorCode::Overflow => "overflow",
            ErrorCode::Loss => "loss of accuracy",
            ErrorCode::Round => "roundoff error",
            ErrorCode::BadLength => "matrix/vector sizes are not conformant",
            ErrorCode::NotSquare => "matrix not square",
            ErrorCode::Singular => "singularity or extremely bad function behavior detected",
            ErrorCode::Unsupported => {
                "the required feature is not supported by this hardware platform"
            }
            ErrorCode::Unimplemented => "the requested feature is not (yet) implemented",
        }
    }
}

/// Returns the fixed description of a numeric status code.
///
/// Total over `i32`: any value outside the table yields `"unknown error code"`.
pub fn strerror(code: i32) -> &'static str {
    match ErrorCode::from_code(code) {
        Some(code) => code.message(),
        None => "unknown error code",
    }
}
