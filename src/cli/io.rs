//! Line-oriented JSON I/O for the CLI
//!
//! - Input: one phrase per stdin line
//! - Output: one JSON object per stdout line
//!
//! Writers are generic so commands can be exercised against a buffer.

use std::io::{BufRead, Write};

use serde::Serialize;

use super::errors::{CliError, CliResult};

/// Non-blank lines of `reader`, trimmed
pub fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<String>> {
    reader
        .lines()
        .map(|line| line.map_err(CliError::from))
        .filter_map(|line| match line {
            Ok(text) if text.trim().is_empty() => None,
            Ok(text) => Some(Ok(text.trim().to_string())),
            Err(e) => Some(Err(e)),
        })
}

/// Writes `value` as a single JSON line
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Writes a CLI failure as a JSON line
pub fn write_error<W: Write>(out: &mut W, error: &CliError) -> CliResult<()> {
    write_json(
        out,
        &serde_json::json!({
            "status": "error",
            "code": error.code_str(),
            "message": error.message(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_lines_skips_blank() {
        let input = Cursor::new("top 5 movies\n\n   \n  average rating  \n");
        let lines: Vec<String> = read_lines(input).collect::<CliResult<_>>().unwrap();
        assert_eq!(lines, vec!["top 5 movies", "average rating"]);
    }

    #[test]
    fn test_write_json_one_line() {
        let mut out = Vec::new();
        write_json(&mut out, &serde_json::json!({"a": 1})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"a\":1}\n");
    }

    #[test]
    fn test_write_error() {
        let mut out = Vec::new();
        write_error(&mut out, &CliError::io_error("closed")).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["code"], "REEL_CLI_IO_ERROR");
    }
}
