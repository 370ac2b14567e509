//! CLI argument definitions using clap
//!
//! Commands:
//! - querygate compile --config <path> --entity <name>
//! - querygate query --config <path> --entity <name>
//! - querygate serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// querygate - typed dynamic filters for collection queries
#[derive(Parser, Debug)]
#[command(name = "querygate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile one filter request read from stdin and print it
    Compile {
        /// Path to configuration file
        #[arg(long, default_value = "./querygate.json")]
        config: PathBuf,

        /// Entity whose schema the filters resolve against
        #[arg(long)]
        entity: String,
    },

    /// Compile one filter request from stdin and run it against the data directory
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./querygate.json")]
        config: PathBuf,

        /// Collection to query
        #[arg(long)]
        entity: String,
    },

    /// Start the REST server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./querygate.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
