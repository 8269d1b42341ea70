//! Local documentation server.
//!
//! # Usage
//!
//! ```bash
//! cargo doc --workspace --no-deps
//! cargo run -p dv-tools --bin dv-serve-docs -- [port] [dir]
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: bind host (default: 127.0.0.1)
//! - `PORT`: first port to try (default: 8000); up to 20 higher ports are
//!   tried when it is busy
//! - `DOCS_DIR`: directory to serve (default: target/doc)
//! - `RUST_LOG`: log filter (default: info)

use dv_tools::docs::{serve, DocsConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dv_tools::init_logging();

    let config = DocsConfig::from_args(std::env::args().skip(1), |key| std::env::var(key).ok())?;
    info!("Starting documentation server for {}", config.dir.display());

    serve(config).await
}
