//! CLI command handlers.
//!
//! Execution logic for each CLI command, separated from argument
//! parsing so command behavior is testable.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{DemoConfig, ExportFormat};
use crate::error::DemoResult;
use crate::numerics::{ExplicitEuler, RungeKutta4};
use crate::scenarios::{
    BeatsScenario, Demonstration, MaxwellScenario, MaxwellSpeedDistribution, RingsScenario,
    SpringScenario, StandingWaveScenario, WienScenario,
};
use crate::visualization::{CsvSink, JsonLinesSink, PlotSink, PlotSpec};

use super::output::{print_demonstration_result, print_help, print_suite_summary, print_version};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    ExitCode::from(execute(args))
}

/// Execute a parsed command, returning the process exit code.
#[must_use]
pub fn execute(args: Args) -> u8 {
    match args.command {
        Command::Run {
            config_path,
            only,
            verbose,
        } => run_suite(config_path.as_deref(), only.as_deref(), verbose),
        Command::Validate { config_path } => validate_config(&config_path),
        Command::Export {
            config_path,
            out_dir,
            format,
        } => export_plots(config_path.as_deref(), out_dir, format.as_deref()),
        Command::List => list_demonstrations(),
        Command::Help => {
            print_help();
            0
        }
        Command::Version => {
            print_version();
            0
        }
    }
}

/// Load configuration from an optional path, falling back to defaults.
fn load_config(path: Option<&Path>) -> DemoResult<DemoConfig> {
    path.map_or_else(|| Ok(DemoConfig::default()), DemoConfig::load)
}

/// Instantiate the enabled demonstrations in run order.
fn demonstrations(config: &DemoConfig) -> Vec<Box<dyn Demonstration>> {
    let mut demos: Vec<Box<dyn Demonstration>> = Vec::new();
    if config.beats.enabled {
        demos.push(Box::new(BeatsScenario::new(config.beats.clone())));
    }
    if config.maxwell.enabled {
        demos.push(Box::new(MaxwellScenario::new(config.maxwell.clone())));
    }
    if config.rings.enabled {
        demos.push(Box::new(RingsScenario::new(config.rings.clone())));
    }
    if config.spring.enabled {
        demos.push(Box::new(SpringScenario::new(config.spring.clone())));
    }
    if config.standing_wave.enabled {
        demos.push(Box::new(StandingWaveScenario::new(
            config.standing_wave.clone(),
        )));
    }
    if config.wien.enabled {
        demos.push(Box::new(WienScenario::new(config.wien.clone())));
    }
    demos
}

/// Run the demonstration suite.
///
/// # Arguments
///
/// * `config_path` - Optional configuration file; defaults apply when absent
/// * `only` - Optional topic/name filter
/// * `verbose` - Whether to show every verification criterion
#[must_use]
pub fn run_suite(config_path: Option<&Path>, only: Option<&str>, verbose: bool) -> u8 {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║        demostrar - Verified Physics Demonstrations            ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let mut demos = demonstrations(&config);
    if let Some(filter) = only {
        let needle = filter.to_lowercase();
        demos.retain(|demo| {
            demo.topic().contains(&needle) || demo.name().to_lowercase().contains(&needle)
        });
        if demos.is_empty() {
            eprintln!("Error: no enabled demonstration matches '{filter}'");
            return 1;
        }
    }

    let total = demos.len();
    let mut passed = 0;
    let mut failed = false;

    for demo in &demos {
        match demo.execute() {
            Ok(status) => {
                print_demonstration_result(demo.name(), demo.topic(), &status, verbose);
                if status.verified {
                    passed += 1;
                } else {
                    failed = true;
                }
            }
            Err(e) => {
                eprintln!("Error in {}: {e}", demo.name());
                failed = true;
            }
        }
    }

    print_suite_summary(total, passed);

    if config.export.enabled {
        let directory = PathBuf::from(&config.export.directory);
        match export_all(&config, &directory, config.export.format) {
            Ok(count) => {
                println!("Exported plot data for {count} demonstrations to {}", directory.display());
            }
            Err(e) => {
                eprintln!("Error exporting plot data: {e}");
                failed = true;
            }
        }
    }

    u8::from(failed)
}

/// Validate a configuration YAML file.
///
/// # Arguments
///
/// * `path` - Path to the configuration file
#[must_use]
pub fn validate_config(path: &Path) -> u8 {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║          demostrar - Configuration Validation                 ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    println!("Validating: {}\n", path.display());

    match DemoConfig::load(path) {
        Ok(config) => {
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("✓ Configuration VALID");
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

            println!("Schema version: {}", config.schema_version);
            println!("Enabled demonstrations:");
            for topic in config.enabled_topics() {
                println!("  ✓ {topic}");
            }
            println!("\nNext steps:");
            println!("  • Run: demostrar run {}", path.display());
            0
        }
        Err(e) => {
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("✗ Configuration INVALID");
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
            println!("Error: {e}");
            1
        }
    }
}

/// Export plot data for every enabled demonstration.
///
/// # Arguments
///
/// * `config_path` - Optional configuration file
/// * `out_dir` - Output directory override
/// * `format` - Format name override ("csv" or "json-lines")
#[must_use]
pub fn export_plots(
    config_path: Option<&Path>,
    out_dir: Option<PathBuf>,
    format: Option<&str>,
) -> u8 {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              demostrar - Plot Data Export                     ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let format = match format {
        Some(name) => match ExportFormat::parse(name) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        },
        None => config.export.format,
    };
    let directory = out_dir.unwrap_or_else(|| PathBuf::from(&config.export.directory));

    match export_all(&config, &directory, format) {
        Ok(count) => {
            println!(
                "✓ Exported plot data for {count} demonstrations to {} ({})",
                directory.display(),
                format.extension()
            );
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Write every enabled demonstration's plot data through a sink.
fn export_all(config: &DemoConfig, directory: &Path, format: ExportFormat) -> DemoResult<usize> {
    let mut sink: Box<dyn PlotSink> = match format {
        ExportFormat::Csv => Box::new(CsvSink::new(directory)?),
        ExportFormat::JsonLines => Box::new(JsonLinesSink::new(directory)?),
    };
    let mut count = 0;

    if config.beats.enabled {
        let scenario = BeatsScenario::new(config.beats.clone());
        let (tone_1, tone_2) = scenario.components();
        sink.plot(&PlotSpec::new(
            "Beat Superposition",
            "time (s)",
            "amplitude",
            vec![scenario.waveform(), tone_1, tone_2],
        ))?;
        count += 1;
    }

    if config.maxwell.enabled {
        let gas = MaxwellSpeedDistribution::new(config.maxwell.most_probable_speed)?;
        let series = gas.density_series(3.5 * gas.most_probable_speed(), 400)?;
        sink.plot(&PlotSpec::new(
            "Maxwell Speed Distribution",
            "speed (m/s)",
            "probability density",
            vec![series],
        ))?;
        count += 1;
    }

    if config.rings.enabled {
        let scenario = RingsScenario::new(config.rings.clone());
        sink.plot(&PlotSpec::new(
            "Newton Rings Radial Profile",
            "radius (m)",
            "intensity",
            vec![scenario.radial_profile()?],
        ))?;
        sink.heatmap(&scenario.intensity_grid()?, "Newton Rings Intensity Map")?;
        count += 1;
    }

    if config.spring.enabled {
        let scenario = SpringScenario::new(config.spring.clone());
        sink.plot(&PlotSpec::new(
            "Spring Mass Comparison",
            "time (s)",
            "position (m)",
            vec![
                scenario.solve(&ExplicitEuler)?.position_series(),
                scenario.solve(&RungeKutta4)?.position_series(),
                scenario.closed_form_trajectory().position_series(),
            ],
        ))?;
        count += 1;
    }

    if config.standing_wave.enabled {
        let scenario = StandingWaveScenario::new(config.standing_wave.clone());
        let frames = scenario.render_frames(4)?;
        sink.plot(&PlotSpec::new(
            "Standing Wave Frames",
            "position (m)",
            "displacement",
            frames
                .iter()
                .map(crate::scenarios::WaveFrame::superposition_series)
                .collect(),
        ))?;
        count += 1;
    }

    if config.wien.enabled {
        let (exponential, linear) = WienScenario::equation_series(200);
        sink.plot(&PlotSpec::new(
            "Wien Graphical Solution",
            "x",
            "y",
            vec![exponential, linear],
        ))?;
        count += 1;
    }

    Ok(count)
}

/// List all demonstrations the suite offers.
#[must_use]
pub fn list_demonstrations() -> u8 {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║            demostrar - Demonstration Catalog                  ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    let config = DemoConfig::default();
    let mut entries: Vec<(&'static str, &'static str)> = demonstrations(&config)
        .iter()
        .map(|demo| (demo.topic(), demo.name()))
        .collect();
    entries.sort_unstable();

    let mut current_domain = "";
    for (topic, name) in &entries {
        let domain = topic.split('/').next().unwrap_or("");
        if domain != current_domain {
            if !current_domain.is_empty() {
                println!();
            }
            println!("{}:", domain.to_uppercase());
            current_domain = domain;
        }
        println!("  - {topic} ({name})");
    }

    println!("\nUsage: demostrar run [config.yaml] [--only <topic>]");
    0
}
