// Start of file: /src/core/logging.rs

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::fmt::format::FmtSpan;

// Used when RUST_LOG is not set
const DEFAULT_LOG_FILTER: &str = "error_envelope_api=info,tower_http=debug,axum=trace";

// Installs the global tracing subscriber; fails if one is already set
pub fn init_tracing() -> Result<()> {
    let env_filter: EnvFilter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::CLOSE)
        .try_init()
        .map_err(|err| anyhow!("Failed to initialize tracing: {err}"))
}

// End of file: /src/core/logging.rs
