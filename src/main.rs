use anyhow::{Context as _, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use taskd::{config::ServiceConfig, rest, AppContext};

#[derive(Parser)]
#[command(
    name = "taskd",
    about = "taskd — in-memory task-tracking service with token auth",
    version
)]
struct Args {
    /// HTTP server port
    #[arg(long, env = "TASKD_PORT")]
    port: Option<u16>,

    /// Bind address for the HTTP server (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "TASKD_BIND")]
    bind_address: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TASKD_LOG")]
    log: Option<String>,

    /// Path to a TOML config file
    #[arg(long, env = "TASKD_CONFIG")]
    config: Option<PathBuf>,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "TASKD_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServiceConfig::new(args.port, args.bind_address, args.log, args.config);

    // CLI flag wins over the config file for the log destination.
    let log_file = args.log_file.or_else(|| config.log_file.clone());
    let _guard = setup_logging(&config.log, log_file.as_deref(), &config.log_format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.port,
        bind = %config.bind_address,
        "starting taskd"
    );

    let ctx = Arc::new(AppContext::new(config));
    rest::start_rest_server(ctx)
        .await
        .context("REST server failed")?;
    Ok(())
}

/// Initialize the tracing subscriber.
/// If `log_file` is set, logs go to both stdout and a daily-rolling file.
/// Returns a `WorkerGuard` that must stay alive for the process lifetime.
///
/// `log_format` may be `"pretty"` (default, human-readable compact format) or
/// `"json"` (structured JSON for log aggregators).
///
/// If the log directory cannot be created, falls back to stdout-only logging
/// with a warning — never panics.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
    log_format: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("taskd.log"));

        // Ensure the directory exists before tracing-appender tries to open it.
        if let Err(e) = std::fs::create_dir_all(dir) {
            // Fall back to stdout-only — don't panic on a bad log path.
            eprintln!(
                "warn: could not create log directory '{}': {e} — falling back to stdout",
                dir.display()
            );
            if use_json {
                tracing_subscriber::fmt().json().with_env_filter(log_level).init();
            } else {
                tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
            }
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        if use_json {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().json())
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().compact())
                .with(fmt::layer().with_writer(non_blocking))
                .init();
        }

        Some(guard)
    } else if use_json {
        tracing_subscriber::fmt().json().with_env_filter(log_level).init();
        None
    } else {
        tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
        None
    }
}
