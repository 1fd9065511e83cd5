//! CLI output formatting.
//!
//! All user-facing printing lives here so command handlers stay
//! testable without capturing stdout.

use crate::scenarios::VerificationStatus;

/// Print version information.
pub fn print_version() {
    println!("demostrar {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"demostrar - Numerically Verified Physics Demonstrations

USAGE:
    demostrar <COMMAND> [OPTIONS]

COMMANDS:
    run [config.yaml]           Run the demonstration suite
        --only <topic>          Run only demonstrations matching this string
        -v, --verbose           Show every verification criterion

    validate <config.yaml>      Validate a configuration file

    export [config.yaml]        Export plot data for enabled demonstrations
        --out <dir>             Output directory (default: plots)
        --format <fmt>          'csv' or 'json-lines' (default: csv)

    list                        List available demonstrations

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    demostrar run
    demostrar run demos/suite.yaml --only maxwell -v
    demostrar export --out plots --format json-lines

VERIFICATION:
    Every demonstration checks its numerical results against closed-form
    physics before reporting success. A run fails if any criterion does.
"
    );
}

/// Print one demonstration's verification outcome.
///
/// # Arguments
///
/// * `name` - Demonstration display name
/// * `topic` - Demonstration topic path
/// * `status` - The verification outcome
/// * `verbose` - Whether to show passing criteria as well as failures
pub fn print_demonstration_result(
    name: &str,
    topic: &str,
    status: &VerificationStatus,
    verbose: bool,
) {
    let result = if status.verified { "VERIFIED" } else { "FAILED" };
    let sym = if status.verified { "✓" } else { "✗" };

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{name} ({topic})");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("  {}", status.message);

    for criterion in &status.criteria {
        if verbose || !criterion.passed {
            let mark = if criterion.passed { "✓" } else { "✗" };
            println!(
                "  {} {}: {} (value {:.6e}, threshold {:.6e})",
                mark, criterion.id, criterion.name, criterion.value, criterion.threshold
            );
        }
    }

    println!("  {sym} {result}\n");
}

/// Print the closing suite summary.
///
/// # Arguments
///
/// * `total` - Number of demonstrations executed
/// * `passed` - Number that verified
pub fn print_suite_summary(total: usize, passed: usize) {
    let all_passed = passed == total;
    let status = if all_passed { "PASSED" } else { "FAILED" };
    let sym = if all_passed { "✓" } else { "✗" };

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{sym} Suite {status}: {passed}/{total} demonstrations verified");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}
