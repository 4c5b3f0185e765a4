//! Process-wide logging setup.

use clap::ValueEnum;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "info,toolshelf=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human readable, multi-line output.
    #[default]
    #[value(name = "pretty")]
    Pretty,
    /// One JSON object per event.
    #[value(name = "json")]
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to install log bridge: {0}")]
    LogBridge(#[from] tracing_log::log::SetLoggerError),
    #[error("global subscriber already set: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Builds the filter from `RUST_LOG`, falling back to `default_directives`.
pub fn env_filter(default_directives: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(default_directives)?),
    }
}

/// Installs the global subscriber and routes `log` records into it.
///
/// Must be called once, before the first event is emitted.
pub fn init(format: LogFormat, default_directives: &str) -> Result<(), TelemetryError> {
    let filter = env_filter(default_directives)?;
    let registry = Registry::default().with(filter);

    match format {
        LogFormat::Pretty => {
            tracing::subscriber::set_global_default(registry.with(fmt::layer().pretty()))?
        }
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().json().flatten_event(true)),
        )?,
    }

    tracing_log::LogTracer::init()?;
    tracing::debug!(%format, "telemetry initialized");
    Ok(())
}
