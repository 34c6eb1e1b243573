//! Tracing subscriber setup
//!
//! Shared tracing configuration for hosts embedding the session and for tests.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a global subscriber logging to `log_file_path`.
///
/// Filtering comes from `RUST_LOG`, with DEBUG as the default directive.
/// Fails if the file cannot be created or a global subscriber already exists.
pub fn init_global(log_file_path: &Path) -> anyhow::Result<()> {
    let log_file = File::create(log_file_path)?;
    build_subscriber(log_file).try_init()?;
    Ok(())
}

/// Build a subscriber with file logging.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into());

    let fmt_layer = fmt::layer().with_ansi(false).with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}
