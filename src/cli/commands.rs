//! CLI command implementations
//!
//! Every command loads the config, installs logging, then loads the schema
//! registry. Filter and lookup errors are reported on stdout as error
//! responses; only setup failures exit non-zero.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;

use crate::config::Config;
use crate::filter::{FilterCompiler, FilterRequest};
use crate::observability::init_logging;
use crate::rest_api::{QueryHandler, RestServer};
use crate::schema::SchemaRegistry;
use crate::store::{load_collections, Collection};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Compile { config, entity } => compile(&config, &entity),
        Command::Query { config, entity } => query(&config, &entity),
        Command::Serve { config, port } => serve(&config, port),
    }
}

fn boot(config_path: &Path) -> CliResult<(Config, SchemaRegistry)> {
    let config = Config::load(config_path)?;
    init_logging(&config.log_filter);

    let registry = SchemaRegistry::load_dir(&config.schema_dir)?;
    tracing::info!(entities = registry.schema_count(), "schemas loaded");

    Ok((config, registry))
}

fn collections(config: &Config) -> CliResult<HashMap<String, Collection>> {
    match &config.data_dir {
        Some(dir) => Ok(load_collections(dir)?),
        None => Ok(HashMap::new()),
    }
}

/// Compile one filter request from stdin and print the compiled query.
pub fn compile(config_path: &Path, entity: &str) -> CliResult<()> {
    let (config, registry) = boot(config_path)?;
    let request: FilterRequest = read_request()?;

    let denylist = config.denylist();
    let compiler = FilterCompiler::new(&registry).with_denylist(&denylist);

    match compiler.compile_request(entity, &request) {
        Ok(compiled) => write_response(serde_json::to_value(&compiled)?),
        Err(e) => write_error(e.code(), &e.to_string()),
    }
}

/// Compile one filter request from stdin and print the matching documents.
pub fn query(config_path: &Path, entity: &str) -> CliResult<()> {
    let (config, registry) = boot(config_path)?;

    if config.data_dir.is_none() {
        return Err(CliError::config_error("query requires data_dir"));
    }

    let handler = QueryHandler::new(registry, config.denylist(), collections(&config)?);
    let request: FilterRequest = read_request()?;

    match handler.query(entity, &request) {
        Ok(documents) => write_response(serde_json::Value::Array(documents)),
        Err(e) => write_error(e.code(), &e.to_string()),
    }
}

/// Start the REST server and block until it stops.
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let (mut config, registry) = boot(config_path)?;
    if let Some(port) = port {
        config.override_port(port)?;
    }

    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| CliError::config_error(format!("Invalid listen address: {}", e)))?;

    let handler = QueryHandler::new(registry, config.denylist(), collections(&config)?);
    let server = RestServer::new(handler).with_cors_origins(config.cors_allow_list()?);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .serve(addr)
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}
