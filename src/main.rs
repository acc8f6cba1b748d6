//! agrodash — a terminal dashboard for a simulated field sensor station.
//!
//! Run with:  `RUST_LOG=info agrodash`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with frames on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("agrodash v{} starting", env!("CARGO_PKG_VERSION"));

    agro_dashboard::run().map_err(Into::into)
}
