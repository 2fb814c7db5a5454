//! Tracing initialization for Quill binaries.
use error_stack::{Result, ResultExt};
use quill_config::{Logging, LoggingStyle};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Debug, Error)]
#[error("Failed to initialize tracing")]
pub struct TracingInitError;

pub fn init(config: &Logging) -> Result<(), TracingInitError> {
    let targets = config
        .targets
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_default();

    let fmt = tracing_subscriber::fmt::layer().with_span_events(FmtSpan::NONE);
    let fmt = match config.style {
        LoggingStyle::Full => fmt.boxed(),
        LoggingStyle::Compact => fmt.compact().boxed(),
        LoggingStyle::Pretty => fmt.pretty().boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt.with_filter(make_env_filter(&targets)))
        .try_init()
        .change_context(TracingInitError)
        .attach_printable("already initialized tracing")?;

    Ok(())
}

/// Best-effort initialization for unit tests; repeated calls are fine.
pub fn init_for_tests() {
    let targets = std::env::var("RUST_LOG").ok().unwrap_or_default();
    let fmt = tracing_subscriber::fmt::layer()
        .with_test_writer()
        .with_filter(make_env_filter(&targets));

    tracing_subscriber::registry().with(fmt).try_init().ok();
}

fn make_env_filter(targets: &str) -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(targets)
}
