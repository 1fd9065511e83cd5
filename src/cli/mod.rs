//! CLI module for demostrar.
//!
//! All CLI logic lives here rather than in main.rs so it has full test
//! coverage. The entry point `run_cli` is called from main.rs with
//! parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{
    execute, export_plots, list_demonstrations, run_cli, run_suite, validate_config,
};
pub use output::{print_demonstration_result, print_help, print_suite_summary, print_version};
