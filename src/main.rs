//! demostrar CLI - Numerically Verified Physics Demonstrations
//!
//! Command-line interface for running the demonstration suite.

use std::process::ExitCode;

use demostrar::cli::{run_cli, Args};

fn main() -> ExitCode {
    run_cli(Args::parse())
}
