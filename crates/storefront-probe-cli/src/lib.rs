//! storefront-probe CLI library
//!
//! Argument parsing, configuration and console reporting for the
//! `storefront-probe` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod output;

pub use commands::{Cli, ColorArg, Commands, ListArgs, LocatorsArgs, OutputFormat, RunArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::Reporter;
