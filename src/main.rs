//! Tableau - DC operating point solver
//!
//! Interactive menu over netlist files, or a one-shot solve when a netlist
//! path is given.
//!
//! # Usage
//!
//! ```bash
//! tableau                          # menu, file names resolved under ./netlists
//! tableau --netlist-dir circuits   # menu, file names resolved under ./circuits
//! tableau divider.net              # solve once, print currents and voltages
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sparse_tableau::{
    console::{solve_once, Console, DEFAULT_NETLIST_DIR},
    error::Result,
    solver::DEFAULT_PIVOT_TOLERANCE,
    CircuitSession, SolverConfig,
};
use tracing_subscriber::EnvFilter;

/// DC operating point solver using the sparse tableau method
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Netlist to solve once instead of starting the menu
    #[arg(value_name = "NETLIST")]
    netlist: Option<PathBuf>,

    /// Directory the menu resolves netlist file names against
    #[arg(short = 'd', long, default_value = DEFAULT_NETLIST_DIR)]
    netlist_dir: PathBuf,

    /// Relative pivot size (against its column) at or below which the
    /// system counts as singular
    #[arg(short, long, default_value_t = DEFAULT_PIVOT_TOLERANCE)]
    tolerance: f64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so menu output stays clean
    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = SolverConfig::new().with_pivot_tolerance(args.tolerance);
    let mut session = CircuitSession::with_config(config);

    match args.netlist {
        Some(path) => {
            let stdout = io::stdout();
            if solve_once(&mut session, &path, &mut stdout.lock())? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut console = Console::new(stdin.lock(), stdout.lock(), args.netlist_dir, session);
            console.run()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
