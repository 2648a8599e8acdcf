use std::path::PathBuf;

use clap::Parser;

use crate::io::format::liquidham_output;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a nicely formatted `liquidham` heading to the `liquidham-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    liquidham_output!("╭─────────────────────────────────────────────────────────────────────────────╮");
    liquidham_output!("│                                                                             │");
    liquidham_output!("│   liquidham                                                                 │");
    liquidham_output!("│   Orbital-integral Hamiltonians from LIQUiD text                            │");
    liquidham_output!("│   Reader for the LIQUiD Hamiltonian format                     {version:>12} │");
    liquidham_output!("│                                                                             │");
    liquidham_output!("╰─────────────────────────────────────────────────────────────────────────────╯");
    liquidham_output!("");
}

/// Command-line arguments of the `liquidham` binary.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// The YAML input configuration file.
    #[arg(short, long)]
    pub config: PathBuf,

    /// The file to which the main output is written. If absent, the main output is written to
    /// standard output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
