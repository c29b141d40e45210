//! Logging setup.
//!
//! Events go to stderr: stdout carries the LSP channel. The filter is read from
//! `TAGSYNC_LOG` using `EnvFilter` directives and defaults to "info".

use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "TAGSYNC_LOG";

/// Install the global tracing subscriber.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_filter(env_filter);

    let _ = Registry::default().with(stderr_layer).try_init();
}
