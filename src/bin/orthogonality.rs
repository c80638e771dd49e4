//! Experiment Runner for Orthogonality Analysis.
//!
//! This executable measures the numerical quality of the Householder tridiagonal
//! reduction as the matrix order grows: the loss of orthogonality of the unpacked
//! factor Q and the residual of the similarity QᵀAQ = T, alongside wall time and
//! peak memory. Test matrices are random symmetric matrices drawn from one of a few
//! spectral scenarios.

use anyhow::{Result, ensure};
use clap::{Parser, ValueEnum};
use faer::{Mat, Side};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use std::path::PathBuf;
use tridiag_project::{
    blas::symmetrize,
    solvers::tridiagonalize,
    utils::perf::{get_peak_rss_kb, timed},
};

/// Defines how the entries of the test matrix are drawn.
#[derive(ValueEnum, Clone, Debug, Copy)]
enum ProblemScenario {
    /// Independent entries, uniform in [-1, 1).
    Uniform,
    /// Entries spanning many orders of magnitude, which stresses the scaling
    /// inside the reflector construction.
    Graded,
    /// A matrix that is already nearly tridiagonal, so most reflections are tiny.
    NearTridiagonal,
}

/// Command-line arguments for the orthogonality analysis runner.
#[derive(Parser, Debug)]
#[clap(
    name = "orthogonality-runner",
    about = "Runs an analysis of the orthogonality and similarity residual of the tridiagonal reduction."
)]
struct OrthoArgs {
    /// The spectral scenario for the test problem.
    #[clap(long, value_enum, default_value_t = ProblemScenario::Uniform)]
    scenario: ProblemScenario,
    /// Smallest matrix order to test.
    #[clap(long, default_value_t = 10)]
    n_min: usize,
    /// Largest matrix order to test.
    #[clap(long, default_value_t = 500)]
    n_max: usize,
    /// Step size for iterating n.
    #[clap(long, default_value_t = 10)]
    n_step: usize,
    /// Seed for the random number generator.
    #[clap(long, default_value_t = 42)]
    seed: u64,
    /// Path to the output CSV file where results will be written.
    #[clap(long, value_name = "PATH")]
    output: PathBuf,
}

/// Represents a single row of data in the output CSV file.
#[derive(Debug, Serialize)]
struct OrthogonalityResult {
    /// Order of the test matrix.
    n: usize,
    /// Orthogonality loss of the unpacked factor, measured as ||I - QᵀQ||_F.
    ortho_loss: f64,
    /// Similarity residual ||A - Q T Qᵀ||_F relative to ||A||_F.
    relative_residual: f64,
    /// Wall time of reduction plus unpacking, in milliseconds.
    elapsed_ms: f64,
    /// Peak resident set size of the process so far, in kilobytes.
    peak_rss_kb: u64,
}

/// Creates a random symmetric matrix of order `n` for the given scenario.
fn create_symmetric_problem(n: usize, scenario: ProblemScenario, rng: &mut StdRng) -> Mat<f64> {
    let mut a = Mat::<f64>::zeros(n, n);
    for j in 0..n {
        for i in j..n {
            let entry: f64 = rng.random_range(-1.0..1.0);
            a[(i, j)] = match scenario {
                ProblemScenario::Uniform => entry,
                ProblemScenario::Graded => entry * 10f64.powi(-((i + j) as i32 % 16)),
                ProblemScenario::NearTridiagonal => {
                    if i - j <= 1 {
                        entry
                    } else {
                        entry * 1e-12
                    }
                }
            };
        }
    }
    symmetrize(Side::Lower, a.as_mut());
    a
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .try_init()?;
    let args = OrthoArgs::parse();
    ensure!(args.n_step > 0, "--n-step must be positive");
    log::info!(
        "Starting orthogonality analysis for scenario {:?}, n in {}..={} step {}",
        args.scenario,
        args.n_min,
        args.n_max,
        args.n_step
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut writer = csv::Writer::from_path(&args.output)?;

    for n in (args.n_min..=args.n_max).step_by(args.n_step) {
        if n == 0 {
            continue;
        }
        log::info!("Running for n = {}...", n);

        let a = create_symmetric_problem(n, args.scenario, &mut rng);
        let (decomposition, elapsed) = timed(|| tridiagonalize(a.as_ref()));
        let decomposition = decomposition?;

        let a_norm = a.norm_l2();
        let residual = (&decomposition.reconstruct() - &a).norm_l2();
        let relative_residual = if a_norm > 0.0 { residual / a_norm } else { residual };

        writer.serialize(OrthogonalityResult {
            n,
            ortho_loss: decomposition.orthogonality_loss(),
            relative_residual,
            elapsed_ms: elapsed.as_secs_f64() * 1e3,
            peak_rss_kb: get_peak_rss_kb(),
        })?;
    }

    writer.flush()?;
    log::info!(
        "Orthogonality analysis complete. Results saved to {:?}.",
        &args.output
    );
    Ok(())
}
