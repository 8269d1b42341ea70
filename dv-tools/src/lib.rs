//! Developer tooling for the DV workspace.
//!
//! - [`docs`]: serve a generated documentation tree over HTTP
//!   (`dv-serve-docs`).
//! - [`versions`]: keep package manifests in step with `VERSION.toml` and
//!   refuse versions that are already published (`dv-versions`).

pub mod docs;
pub mod versions;

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber used by both binaries.
///
/// `RUST_LOG` selects the filter; the default is `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
