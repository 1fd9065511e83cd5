//! CLI argument parsing.
//!
//! Hand-rolled parser over `std::env::args()`; `parse_from` takes any
//! string iterator so every code path is testable.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the demonstration suite
    Run {
        /// Optional path to a configuration YAML file; defaults apply
        /// when absent.
        config_path: Option<PathBuf>,
        /// Restrict the run to demonstrations whose topic or name
        /// contains this string.
        only: Option<String>,
        /// Enable verbose output.
        verbose: bool,
    },
    /// Validate a configuration YAML file
    Validate {
        /// Path to the configuration file.
        config_path: PathBuf,
    },
    /// Export plot data for every enabled demonstration
    Export {
        /// Optional path to a configuration YAML file.
        config_path: Option<PathBuf>,
        /// Output directory override.
        out_dir: Option<PathBuf>,
        /// Format override ("csv" or "json-lines").
        format: Option<String>,
    },
    /// List available demonstrations
    List,
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(args),
            "validate" => Self::parse_validate_command(args),
            "export" => Self::parse_export_command(args),
            "list" => Command::List,
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse the 'run' command arguments.
    fn parse_run_command(args: &[String]) -> Command {
        let mut config_path = None;
        let mut only = None;
        let mut verbose = false;

        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--only" => {
                    if i + 1 < args.len() {
                        only = Some(args[i + 1].clone());
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                positional if !positional.starts_with('-') && config_path.is_none() => {
                    config_path = Some(PathBuf::from(positional));
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Run {
            config_path,
            only,
            verbose,
        }
    }

    /// Parse the 'validate' command arguments.
    fn parse_validate_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'validate' command requires a configuration path");
            return Command::Help;
        }

        Command::Validate {
            config_path: PathBuf::from(&args[2]),
        }
    }

    /// Parse the 'export' command arguments.
    fn parse_export_command(args: &[String]) -> Command {
        let mut config_path = None;
        let mut out_dir = None;
        let mut format = None;

        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--out" => {
                    if i + 1 < args.len() {
                        out_dir = Some(PathBuf::from(&args[i + 1]));
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "--format" => {
                    if i + 1 < args.len() {
                        format = Some(args[i + 1].clone());
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                positional if !positional.starts_with('-') && config_path.is_none() => {
                    config_path = Some(PathBuf::from(positional));
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Export {
            config_path,
            out_dir,
            format,
        }
    }
}
