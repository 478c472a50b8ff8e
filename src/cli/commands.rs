//! CLI command implementations
//!
//! Commands write to a caller-supplied writer; `run_command` passes stdout.
//! Translation failures are reported in the output, not as CLI errors.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dataset::DEFAULT_TABLE;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event_with_fields, Event};
use crate::render::{QueryReport, SqlRenderer, TableBinding};
use crate::translator::{ExplainPlan, Translator};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_lines, write_json};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Location of the ratings CSV (required)
    pub dataset_path: PathBuf,

    /// Logical table name plans refer to
    #[serde(default = "default_table_name")]
    pub table_name: String,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_table_name() -> String {
    DEFAULT_TABLE.to_string()
}

impl Config {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        let dataset_path = config.dataset_path.to_string_lossy();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("dataset_path", dataset_path.as_ref()),
                ("table_name", config.table_name.as_str()),
            ],
        );

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.dataset_path.as_os_str().is_empty() {
            return Err(CliError::config_error("dataset_path must not be empty"));
        }

        if self.table_name.trim().is_empty() {
            return Err(CliError::config_error("table_name must not be empty"));
        }

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        Ok(())
    }

    /// Binding of the logical table to the dataset
    pub fn binding(&self) -> TableBinding {
        TableBinding::new(self.table_name.clone(), self.dataset_path.clone())
    }
}

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Translate { text, config } => {
            translate(&text.join(" "), config.as_deref(), &mut io::stdout().lock())
        }
        Command::Explain { text } => explain(&text.join(" "), &mut io::stdout().lock()),
        Command::Batch { config } => batch(
            config.as_deref(),
            io::stdin().lock(),
            &mut io::stdout().lock(),
        ),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Translates one phrase and writes its report as a JSON line
pub fn translate<W: Write>(text: &str, config_path: Option<&Path>, out: &mut W) -> CliResult<()> {
    let renderer = renderer_for(config_path)?;
    let translator = Translator::new(renderer.binding().logical_name());

    let report = QueryReport::new(&translator.translate(text), &renderer);
    write_json(out, &report)
}

/// Writes the explain text for one phrase
pub fn explain<W: Write>(text: &str, out: &mut W) -> CliResult<()> {
    let plan = ExplainPlan::from_translation(&Translator::default().translate(text));
    write!(out, "{}", plan)?;
    out.flush()?;
    Ok(())
}

/// Translates each non-blank input line, one report per output line
pub fn batch<R: BufRead, W: Write>(
    config_path: Option<&Path>,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    let renderer = renderer_for(config_path)?;
    let translator = Translator::new(renderer.binding().logical_name());

    for line in read_lines(input) {
        let text = line?;
        let report = QueryReport::new(&translator.translate(&text), &renderer);
        write_json(out, &report)?;
    }

    Ok(())
}

/// Runs the HTTP server until interrupted
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let config = Config::load(config_path)?;

    let http_config = match port {
        Some(port) => config.http.clone().with_port(port),
        None => config.http.clone(),
    };
    let server = HttpServer::with_config(http_config, config.binding());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(server.start()).map_err(|e| {
        let reason = e.to_string();
        log_event_with_fields(Event::BootFailed, &[("error", reason.as_str())]);
        CliError::boot_failed(format!("HTTP server failed: {}", reason))
    })
}

fn renderer_for(config_path: Option<&Path>) -> CliResult<SqlRenderer> {
    let binding = match config_path {
        Some(path) => Config::load(path)?.binding(),
        None => TableBinding::default(),
    };
    Ok(SqlRenderer::new(binding))
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use serde_json::{json, Value};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn write_config(temp_dir: &TempDir, config: Value) -> PathBuf {
        let path = temp_dir.path().join("reelquery.json");
        fs::write(&path, config.to_string()).unwrap();
        path
    }

    fn output_lines(out: Vec<u8>) -> Vec<Value> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_config_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, json!({"dataset_path": "/data/ratings.csv"}));

        let config = Config::load(&path).unwrap();
        assert_eq!(config.table_name, "ratings.csv");
        assert_eq!(config.http, HttpServerConfig::default());
        assert_eq!(
            config.binding().resolve("ratings.csv"),
            "/data/ratings.csv"
        );
    }

    #[test]
    fn test_config_requires_dataset_path() {
        let temp_dir = TempDir::new().unwrap();

        let missing = write_config(&temp_dir, json!({"table_name": "ratings.csv"}));
        let err = Config::load(&missing).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ConfigError);

        let empty = write_config(&temp_dir, json!({"dataset_path": ""}));
        let err = Config::load(&empty).unwrap_err();
        assert!(err.message().contains("dataset_path"));
    }

    #[test]
    fn test_config_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load(&temp_dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::ConfigError);
    }

    #[test]
    fn test_translate_without_config() {
        let mut out = Vec::new();
        translate("Show me 10 movies", None, &mut out).unwrap();

        let report = &output_lines(out)[0];
        assert_eq!(report["success"], true);
        assert_eq!(report["rule"], "show_movies");
        assert_eq!(
            report["sql"],
            "SELECT * FROM 'ratings.csv' ORDER BY Date DESC LIMIT 10"
        );
    }

    #[test]
    fn test_translate_with_config_binds_dataset() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, json!({"dataset_path": "/srv/watch/ratings.csv"}));

        let mut out = Vec::new();
        translate("average rating", Some(&path), &mut out).unwrap();

        let report = &output_lines(out)[0];
        assert_eq!(
            report["sql"],
            "SELECT AVG(Rating) AS average_rating FROM '/srv/watch/ratings.csv'"
        );
    }

    #[test]
    fn test_translate_failure_is_reported() {
        let mut out = Vec::new();
        translate("asdf qwerty", None, &mut out).unwrap();

        let report = &output_lines(out)[0];
        assert_eq!(report["success"], false);
        assert_eq!(report["code"], "REEL_NO_MATCH");
    }

    #[test]
    fn test_explain_writes_text() {
        let mut out = Vec::new();
        explain("movies per year", &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("=== EXPLAIN PLAN ==="));
        assert!(text.contains("per_year"));
    }

    #[test]
    fn test_batch_one_report_per_line() {
        let input = Cursor::new("top 3 movies\n\nasdf qwerty\nmovies from 2024\n");
        let mut out = Vec::new();
        batch(None, input, &mut out).unwrap();

        let reports = output_lines(out);
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0]["rule"], "top_movies");
        assert_eq!(reports[1]["success"], false);
        assert_eq!(reports[2]["rule"], "from_year");
    }
}
