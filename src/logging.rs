//! Diagnostics go to standard error so they never mix with the prompts.
//!
//! Quiet by default; `RUST_LOG=debug factura` shows every accepted and
//! rejected answer.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
