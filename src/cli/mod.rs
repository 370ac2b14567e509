//! CLI module for querygate
//!
//! Provides command-line interface for:
//! - compile: print the compiled form of one filter request
//! - query: run one filter request against the data directory
//! - serve: start the REST server

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{compile, query, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, read_request_from, write_error, write_response};
