//! Common utilities for the experiment runners.
//!
//! - **`data_loader`**: Reads dense matrices from plain-text files and checks
//!   how far they are from symmetric.
//!
//! - **`perf`**: Wall-clock timing and, on Linux, the peak resident set size of
//!   the process.

pub mod data_loader;
pub mod perf;
