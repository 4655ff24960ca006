//! probar-replay: validate and inspect expectation scripts
//!
//! ## Usage
//!
//! ```bash
//! probar-replay check flows/*.yaml            # Load, validate, lint
//! probar-replay check --deny-warnings a.yaml  # Lint findings are fatal
//! probar-replay show login.yaml --format json # Print expectations in order
//! ```

use clap::Parser;
use probar_replay_cli::{logging, run_check, run_show, Cli, CliResult, Commands};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet, cli.log_json);

    let stdout = io::stdout();
    let stderr = io::stderr();
    match cli.command {
        Commands::Check(args) => {
            run_check(&args, cli.quiet, &mut stdout.lock(), &mut stderr.lock())
        }
        Commands::Show(args) => run_show(&args, &mut stdout.lock()),
    }
}
