//! JSON I/O handling for CLI
//!
//! - Input: single JSON object on one line of stdin
//! - Output: single JSON object on stdout
//! - UTF-8 only

use std::io::{self, BufRead, Write};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read one JSON request line from `reader`
pub fn read_request_from<R: BufRead, T: DeserializeOwned>(reader: &mut R) -> CliResult<T> {
    let mut line = String::new();
    reader.read_line(&mut line)?;

    if line.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    Ok(serde_json::from_str(&line)?)
}

/// Read a JSON request from stdin
pub fn read_request<T: DeserializeOwned>() -> CliResult<T> {
    read_request_from(&mut io::stdin().lock())
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_json(&serde_json::json!({
        "status": "ok",
        "data": data
    }))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_json(&serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    }))
}

fn write_json(response: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterRequest;
    use std::io::Cursor;

    #[test]
    fn test_read_request_line() {
        let mut input = Cursor::new(
            "{\"filters\": [{\"field\": \"id\", \"operator\": \"EQUALS\", \"value\": \"1\"}]}\n{}\n",
        );
        let request: FilterRequest = read_request_from(&mut input).unwrap();
        assert_eq!(request.filters.map(|f| f.len()), Some(1));
    }

    #[test]
    fn test_read_empty_input() {
        let mut input = Cursor::new("\n");
        let result: CliResult<FilterRequest> = read_request_from(&mut input);
        assert_eq!(result.unwrap_err().code_str(), "QG_CLI_IO_ERROR");
    }
}
