//! Release version checker.
//!
//! Compares `Cargo.toml`, `pyproject.toml` and `cpp/CMakeLists.txt` against
//! `VERSION.toml` and rewrites them when they drift. A version that crates.io
//! or PyPI already publishes is refused.
//!
//! # Usage
//!
//! ```bash
//! # Report only; exits non-zero on any inconsistency
//! cargo run -p dv-tools --bin dv-versions -- --dry-run
//!
//! # Fix the Rust and Python manifests without contacting any registry
//! cargo run -p dv-tools --bin dv-versions -- --rust --python --offline
//! ```

use anyhow::bail;
use dv_tools::versions::{run, HttpRegistry, OfflineRegistry, Options, Registry};
use tracing::info;

fn main() -> anyhow::Result<()> {
    dv_tools::init_logging();

    let options = Options::parse(std::env::args().skip(1))?;
    info!("DV version check for {:?}", options.packages);

    let registry: Box<dyn Registry> = if options.offline {
        Box::new(OfflineRegistry)
    } else {
        Box::new(HttpRegistry::new()?)
    };

    if !run(&options, registry.as_ref())? {
        bail!("version inconsistencies detected; run dv-versions without --dry-run to fix what can be fixed");
    }
    info!("All version checks passed");
    Ok(())
}
