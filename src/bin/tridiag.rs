//! Tridiagonalizes a dense symmetric matrix read from a text file.
//!
//! Writes the diagonal and sub-diagonal of T as CSV rows `index,diag,sdiag`
//! (the last row has an empty `sdiag`), and optionally the orthogonal factor Q.

use anyhow::{Context, Result, ensure};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tridiag_project::{
    solvers::{tridiagonal_form, tridiagonalize},
    utils::data_loader::{load_dense_matrix, max_asymmetry},
};

/// Command-line arguments for the tridiagonalization tool.
#[derive(Parser, Debug)]
#[clap(
    name = "tridiag",
    about = "Reduces a dense symmetric matrix to tridiagonal form."
)]
struct TridiagArgs {
    /// Path to the input matrix (whitespace- or comma-separated rows).
    #[clap(long, value_name = "PATH")]
    input: PathBuf,
    /// Path to the output CSV file for the diagonal and sub-diagonal of T.
    #[clap(long, value_name = "PATH")]
    output: PathBuf,
    /// Optional path for the orthogonal factor Q, written as a dense CSV.
    #[clap(long, value_name = "PATH")]
    q_output: Option<PathBuf>,
    /// Entries with |a_ij - a_ji| above this value trigger a warning.
    #[clap(long, default_value_t = 1e-12)]
    symmetry_tol: f64,
}

/// One row of the tridiagonal output.
#[derive(Debug, Serialize)]
struct TridiagonalRow {
    index: usize,
    diag: f64,
    sdiag: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;
    let args = TridiagArgs::parse();

    let a = load_dense_matrix(&args.input)
        .with_context(|| format!("failed to load matrix from {:?}", args.input))?;
    ensure!(
        a.nrows() == a.ncols(),
        "input matrix must be square, got {}x{}",
        a.nrows(),
        a.ncols()
    );
    log::info!("Loaded a {}x{} matrix from {:?}.", a.nrows(), a.ncols(), args.input);

    if let Some(asymmetry) = max_asymmetry(a.as_ref()) {
        if asymmetry > args.symmetry_tol {
            log::warn!(
                "Input is not symmetric (max |a_ij - a_ji| = {asymmetry:e}); only the lower triangle is used."
            );
        }
    }

    let (diag, sdiag) = match &args.q_output {
        Some(q_path) => {
            let decomposition = tridiagonalize(a.as_ref())?;
            let mut q_writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(q_path)?;
            for i in 0..decomposition.q.nrows() {
                let row: Vec<f64> = (0..decomposition.q.ncols())
                    .map(|j| decomposition.q[(i, j)])
                    .collect();
                q_writer.serialize(row)?;
            }
            q_writer.flush()?;
            log::info!(
                "Wrote Q to {:?} (orthogonality loss {:e}).",
                q_path,
                decomposition.orthogonality_loss()
            );
            (decomposition.diag, decomposition.sdiag)
        }
        None => tridiagonal_form(a.as_ref())?,
    };

    let mut writer = csv::Writer::from_path(&args.output)?;
    for (index, &d) in diag.iter().enumerate() {
        writer.serialize(TridiagonalRow {
            index,
            diag: d,
            sdiag: sdiag.get(index).copied(),
        })?;
    }
    writer.flush()?;

    log::info!("Tridiagonal form written to {:?}.", &args.output);
    Ok(())
}
