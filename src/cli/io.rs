//! JSON output for the CLI
//!
//! - Output: one JSON object per invocation on stdout
//! - UTF-8 only

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Success envelope
pub fn ok_response(data: Value) -> Value {
    serde_json::json!({
        "status": "ok",
        "data": data
    })
}

/// Error envelope
pub fn error_response(code: &str, message: &str) -> Value {
    serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

fn write_value(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_value(&ok_response(data))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_value(&error_response(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelopes() {
        let ok = ok_response(json!({"rank": 1}));
        assert_eq!(ok["status"], "ok");
        assert_eq!(ok["data"]["rank"], 1);

        let err = error_response("ACH_CLI_NOT_FOUND", "Hypothesis not found: H9");
        assert_eq!(err["status"], "error");
        assert_eq!(err["code"], "ACH_CLI_NOT_FOUND");
    }
}
