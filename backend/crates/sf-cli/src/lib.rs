//! sf-cli library
//!
//! Argument parsing, logging setup and JSON output for the
//! `reconcile-identity` binary, exported for tests.

pub(crate) mod cli;
pub(crate) mod error;
pub mod logger;
pub(crate) mod output;


pub use cli::Cli;
pub use error::{CliError, Result as CliResult};
pub use output::{DryRunOutput, FailureOutput, SuccessOutput, to_json};
