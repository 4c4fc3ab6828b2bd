use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_PORT: u16 = 3000;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

// ─── TOML config file ─────────────────────────────────────────────────────────

/// Optional config file — all fields are overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// HTTP server port (default: 3000).
    port: Option<u16>,
    /// Bind address (default: "127.0.0.1"; use "0.0.0.0" for LAN access).
    bind_address: Option<String>,
    /// Log level filter string, e.g. "debug", "info,taskd=trace" (default: "info").
    log: Option<String>,
    /// Log output format: "pretty" (default, human-readable) | "json" (structured for log aggregators).
    log_format: Option<String>,
    /// Write logs to this file path (rotated daily) in addition to stdout.
    log_file: Option<PathBuf>,
}

fn load_toml(path: &Path) -> Option<TomlConfig> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config file — using defaults");
            None
        }
    }
}

// ─── ServiceConfig ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    /// Bind address for the HTTP server (TASKD_BIND env var, default: "127.0.0.1").
    pub bind_address: String,
    /// Log level filter string (TASKD_LOG env var, default: "info").
    pub log: String,
    /// Log output format: "pretty" (default) | "json".
    pub log_format: String,
    /// Write logs to this file path (rotated daily). None = stdout only.
    pub log_file: Option<PathBuf>,
}

impl ServiceConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file at `config_path` (if given and readable)
    ///   3. Built-in defaults
    pub fn new(
        port: Option<u16>,
        bind_address: Option<String>,
        log: Option<String>,
        config_path: Option<PathBuf>,
    ) -> Self {
        let toml = config_path
            .as_deref()
            .and_then(load_toml)
            .unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);

        let bind_address = bind_address
            .or(std::env::var("TASKD_BIND").ok().filter(|s| !s.is_empty()))
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);

        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());

        let log_format = std::env::var("TASKD_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        let log_file = toml.log_file;

        Self {
            port,
            bind_address,
            log,
            log_format,
            log_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_file() {
        let cfg = ServiceConfig::new(None, None, None, None);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.bind_address, "127.0.0.1");
        assert_eq!(cfg.log, "info");
        assert_eq!(cfg.log_format, "pretty");
    }

    #[test]
    fn toml_overrides_defaults_and_cli_overrides_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "port = 4000\nlog = \"debug\"").unwrap();

        let cfg = ServiceConfig::new(None, None, None, Some(path.clone()));
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.log, "debug");

        let cfg = ServiceConfig::new(Some(5000), None, None, Some(path));
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.log, "debug");
    }

    #[test]
    fn bad_toml_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = \"not a number").unwrap();

        let cfg = ServiceConfig::new(None, None, None, Some(path));
        assert_eq!(cfg.port, DEFAULT_PORT);
    }
}
