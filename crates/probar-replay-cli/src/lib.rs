//! probar-replay CLI Library
//!
//! Command-line checks for replay driver expectation scripts.

#![warn(missing_docs)]

mod commands;
mod error;
pub mod handlers;
pub mod logging;

pub use commands::{CheckArgs, Cli, Commands, ShowArgs, ShowFormat};
pub use error::{CliError, CliResult};
pub use handlers::{describe, run_check, run_show};
