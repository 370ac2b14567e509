//! querygate CLI entry point
//!
//! Parses arguments and dispatches to the CLI module. Errors go to stderr
//! with a non-zero exit.

use querygate::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
