//! Structured JSON logger
//!
//! One line per event, `event` then `severity` then fields in key order.
//! Every line goes to stderr: stdout belongs to command output (`translate`
//! and `batch` print JSON results there).

use std::fmt;
use std::io::{self, Write};

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Trace = 0,
    Info = 1,
    /// Caller input that could not be served
    Warn = 2,
    Error = 3,
    /// Process exits
    Fatal = 4,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synchronous JSON line logger
pub struct Logger;

impl Logger {
    /// Writes one event line to stderr
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = Self::format_line(severity, event, fields);
        let mut stderr = io::stderr().lock();
        // A lost log line never fails the request it describes.
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }

    /// Formats a single newline-terminated JSON object
    pub(crate) fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut line = String::with_capacity(128);
        line.push_str("{\"event\":");
        push_json_string(&mut line, event);
        line.push_str(",\"severity\":");
        push_json_string(&mut line, severity.as_str());

        let mut ordered: Vec<&(&str, &str)> = fields.iter().collect();
        ordered.sort_by_key(|(key, _)| *key);
        for (key, value) in ordered {
            line.push(',');
            push_json_string(&mut line, key);
            line.push(':');
            push_json_string(&mut line, value);
        }

        line.push_str("}\n");
        line
    }
}

fn push_json_string(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    Logger::format_line(severity, event, fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
        assert_eq!(Severity::Warn.to_string(), "WARN");
    }

    #[test]
    fn test_line_is_json() {
        let line = capture_log(Severity::Warn, "TRANSLATE_FAILURE", &[("code", "REEL_NO_MATCH")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["event"], "TRANSLATE_FAILURE");
        assert_eq!(parsed["severity"], "WARN");
        assert_eq!(parsed["code"], "REEL_NO_MATCH");
    }

    #[test]
    fn test_fields_sorted_after_header() {
        let a = capture_log(Severity::Info, "E", &[("rule", "top_movies"), ("kind", "plan")]);
        let b = capture_log(Severity::Info, "E", &[("kind", "plan"), ("rule", "top_movies")]);
        assert_eq!(a, b);

        let severity = a.find("\"severity\"").unwrap();
        let kind = a.find("\"kind\"").unwrap();
        let rule = a.find("\"rule\"").unwrap();
        assert!(a.starts_with("{\"event\""));
        assert!(severity < kind && kind < rule);
    }

    #[test]
    fn test_user_text_is_escaped() {
        let text = "movies \"called\" x\nwith\ttabs \u{1}";
        let line = capture_log(Severity::Info, "E", &[("text", text)]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["text"], text);
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.ends_with('\n'));
    }
}
