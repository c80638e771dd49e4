//! This module provides utilities for loading dense test matrices from files.
//!
//! The format is plain text: one matrix row per line, entries separated by
//! whitespace or commas. Blank lines and lines starting with `#` are ignored.
//! Every row must have the same number of entries.
//!
//! ```text
//! # 3x3 symmetric example
//! 4 1 2
//! 1 3 0
//! 2 0 5
//! ```

use faer::{Mat, MatRef};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};
use thiserror::Error;

/// Represents all possible errors that can occur during data loading and parsing.
#[derive(Error, Debug)]
pub enum DataLoaderError {
    /// Wraps a standard I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Occurs when an entry cannot be parsed into a float.
    #[error("Parse error: Failed to parse float from '{token}' on line {line}")]
    ParseFloat { token: String, line: usize },
    /// Occurs when a row does not have as many entries as the first one.
    #[error("Format error: line {line} has {found} entries, but the first row has {expected}.")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Occurs when the input contains no matrix rows at all.
    #[error("Format error: no matrix rows were found.")]
    Empty,
}

/// Parses a dense matrix from any buffered reader.
///
/// # Returns
/// The parsed matrix. It is not required to be square or symmetric; those
/// properties are checked by the routines that need them.
pub fn parse_dense_matrix(reader: impl BufRead) -> Result<Mat<f64>, DataLoaderError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let row = trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<f64>().map_err(|_| DataLoaderError::ParseFloat {
                    token: token.to_string(),
                    line: line_no,
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(DataLoaderError::RaggedRow {
                    line: line_no,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(DataLoaderError::Empty);
    }

    let ncols = rows[0].len();
    Ok(Mat::from_fn(rows.len(), ncols, |i, j| rows[i][j]))
}

/// Loads a dense matrix from a text file. See [`parse_dense_matrix`] for the format.
pub fn load_dense_matrix(path: impl AsRef<Path>) -> Result<Mat<f64>, DataLoaderError> {
    let file = File::open(path)?;
    parse_dense_matrix(BufReader::new(file))
}

/// Returns the largest `|a_ij - a_ji|` over the matrix, or `None` if it is not square.
///
/// The reduction only reads the lower triangle, so an asymmetric input is not an
/// error there; callers loading data from disk use this to warn about it.
pub fn max_asymmetry(a: MatRef<'_, f64>) -> Option<f64> {
    if a.nrows() != a.ncols() {
        return None;
    }
    let mut max = 0.0_f64;
    for j in 0..a.ncols() {
        for i in (j + 1)..a.nrows() {
            max = max.max((a[(i, j)] - a[(j, i)]).abs());
        }
    }
    Some(max)
}
