//! Tracing subscriber bootstrap.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `info,hl_assets=debug`.
    pub level: String,
    pub format: LogFormat,
    /// Optional daily-rotated log file in addition to the console.
    pub file: Option<FileSinkConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSinkConfig {
    pub dir: String,
    #[serde(default = "default_file_prefix")]
    pub prefix: String,
}

fn default_file_prefix() -> String {
    "homeledger.log".to_owned()
}

/// Filter directive for the given `-v` count; `None` keeps the configured level.
#[must_use]
pub fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("debug"),
        2 => Some("debug,tower_http=trace"),
        _ => Some("trace"),
    }
}

/// Build the filter. Precedence: `-v` flags, then `RUST_LOG`, then config.
fn build_filter(cfg: &LoggingConfig, verbose: u8) -> anyhow::Result<EnvFilter> {
    if let Some(directive) = verbosity_directive(verbose) {
        return EnvFilter::try_new(directive).context("invalid verbosity directive");
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&cfg.level)
        .with_context(|| format!("invalid logging.level '{}'", cfg.level))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file sink on drop; keep it alive for the
/// lifetime of the process.
///
/// # Errors
/// Fails on an invalid filter directive, an unusable log directory, or when
/// a global subscriber is already installed.
pub fn init_logging(cfg: &LoggingConfig, verbose: u8) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = build_filter(cfg, verbose)?;

    let console = match cfg.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .with_current_span(true)
            .boxed(),
    };

    let (file_layer, guard) = match &cfg.file {
        Some(file) => {
            std::fs::create_dir_all(&file.dir)
                .with_context(|| format!("failed to create log directory '{}'", file.dir))?;
            let appender = tracing_appender::rolling::daily(&file.dir, &file.prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(file) = &cfg.file {
        tracing::info!(dir = %file.dir, prefix = %file.prefix, "file logging enabled");
    }

    Ok(guard)
}
