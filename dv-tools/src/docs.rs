//! Static documentation server.
//!
//! Serves a directory (normally `target/doc`) with `tower-http`'s `ServeDir`.
//! rustdoc output has no top-level `index.html`, only one per crate; when the
//! directory holds exactly one such crate, `/` and `/index.html` redirect to it.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use axum::{
    http::{header, StatusCode},
    routing::{get, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

/// Port used when neither an argument nor `PORT` is given.
pub const DEFAULT_PORT: u16 = 8000;
/// Host used when `HOST` is not set.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Directory served when neither an argument nor `DOCS_DIR` is given.
pub const DEFAULT_DOCS_DIR: &str = "target/doc";
/// How many successive ports are tried when the requested one is busy.
pub const MAX_PORT_INCREMENTS: u16 = 20;

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    pub dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DOCS_DIR),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl DocsConfig {
    /// Builds the configuration from `[port] [dir]` arguments, falling back to
    /// the `PORT`, `HOST` and `DOCS_DIR` environment variables.
    pub fn from_args<I>(args: I, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        if let Some(host) = env("HOST") {
            config.host = host;
        }
        if let Some(port) = env("PORT") {
            config.port = port.parse().with_context(|| format!("invalid PORT {port:?}"))?;
        }
        if let Some(dir) = env("DOCS_DIR") {
            config.dir = PathBuf::from(dir);
        }

        let mut args = args.into_iter();
        if let Some(port) = args.next() {
            config.port = port
                .parse()
                .with_context(|| format!("invalid port argument {port:?}"))?;
        }
        if let Some(dir) = args.next() {
            config.dir = PathBuf::from(dir);
        }
        if let Some(extra) = args.next() {
            bail!("unexpected argument {extra:?}; usage: dv-serve-docs [port] [dir]");
        }
        Ok(config)
    }
}

/// Returns `"<crate>/index.html"` when `dir` lacks an `index.html` but has
/// exactly one subdirectory that contains one.
pub fn choose_redirect(dir: &Path) -> Option<String> {
    if dir.join("index.html").is_file() {
        return None;
    }
    let entries = std::fs::read_dir(dir).ok()?;
    let mut candidates = entries
        .filter_map(Result::ok)
        .filter(|e| e.path().join("index.html").is_file())
        .filter_map(|e| e.file_name().into_string().ok());

    let first = candidates.next()?;
    if candidates.next().is_some() {
        return None;
    }
    Some(format!("{first}/index.html"))
}

fn found(location: String) -> MethodRouter {
    get(move || {
        let location = location.clone();
        async move { (StatusCode::FOUND, [(header::LOCATION, location)]) }
    })
}

/// Router serving `dir`, with the single-crate redirect when it applies.
pub fn create_router(dir: &Path) -> Router {
    let mut router = Router::new();
    if let Some(target) = choose_redirect(dir) {
        let location = format!("/{target}");
        info!("Redirecting / to {}", location);
        router = router
            .route("/", found(location.clone()))
            .route("/index.html", found(location));
    }
    router
        .fallback_service(ServeDir::new(dir))
        .layer(TraceLayer::new_for_http())
}

/// Binds `host:port`, moving up one port at a time while the address is in
/// use, at most `increments` times.
pub async fn bind_with_retry(
    host: &str,
    port: u16,
    increments: u16,
) -> anyhow::Result<(TcpListener, u16)> {
    for offset in 0..=increments {
        let Some(candidate) = port.checked_add(offset) else {
            break;
        };
        match TcpListener::bind((host, candidate)).await {
            Ok(listener) => return Ok((listener, candidate)),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                warn!("Port {} is in use, trying the next one", candidate);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to bind {host}:{candidate}"));
            }
        }
    }
    bail!("could not find a free port after {increments} increments from {port}")
}

/// Serves the configured directory until the process is stopped.
pub async fn serve(config: DocsConfig) -> anyhow::Result<()> {
    if !config.dir.is_dir() {
        bail!(
            "documentation directory {} does not exist; run `cargo doc` first",
            config.dir.display()
        );
    }

    let app = create_router(&config.dir);
    let (listener, port) = bind_with_retry(&config.host, config.port, MAX_PORT_INCREMENTS).await?;

    info!(
        "Serving docs from {} at http://{}:{}/",
        config.dir.display(),
        config.host,
        port
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Stopping server");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::fs;
    use tower::ServiceExt;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_config_defaults() {
        let config = DocsConfig::from_args(Vec::new(), no_env).unwrap();
        assert_eq!(config, DocsConfig::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.dir, PathBuf::from("target/doc"));
    }

    #[test]
    fn test_config_args_override_env() {
        let env = |key: &str| match key {
            "PORT" => Some("9000".to_string()),
            "HOST" => Some("0.0.0.0".to_string()),
            _ => None,
        };
        let config = DocsConfig::from_args(args(&["9100", "docs"]), env).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.dir, PathBuf::from("docs"));

        let config = DocsConfig::from_args(Vec::new(), env).unwrap();
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_config_rejects_bad_input() {
        assert!(DocsConfig::from_args(args(&["http"]), no_env).is_err());
        assert!(DocsConfig::from_args(args(&["1", "a", "b"]), no_env).is_err());
    }

    #[test]
    fn test_redirect_single_crate() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("dv_core")).unwrap();
        fs::write(dir.path().join("dv_core/index.html"), "<html/>").unwrap();
        fs::create_dir(dir.path().join("static.files")).unwrap();
        assert_eq!(
            choose_redirect(dir.path()).as_deref(),
            Some("dv_core/index.html")
        );
    }

    #[test]
    fn test_no_redirect_with_top_level_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html/>").unwrap();
        fs::create_dir(dir.path().join("dv_core")).unwrap();
        fs::write(dir.path().join("dv_core/index.html"), "<html/>").unwrap();
        assert_eq!(choose_redirect(dir.path()), None);
    }

    #[test]
    fn test_no_redirect_with_several_crates() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["dv_core", "dv_ffi"] {
            fs::create_dir(dir.path().join(name)).unwrap();
            fs::write(dir.path().join(name).join("index.html"), "<html/>").unwrap();
        }
        assert_eq!(choose_redirect(dir.path()), None);
    }

    #[tokio::test]
    async fn test_router_redirects_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("dv_core")).unwrap();
        fs::write(dir.path().join("dv_core/index.html"), "<html/>").unwrap();

        for path in ["/", "/index.html"] {
            let response = create_router(dir.path())
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::FOUND);
            assert_eq!(
                response.headers()[header::LOCATION],
                "/dv_core/index.html"
            );
        }

        let response = create_router(dir.path())
            .oneshot(
                Request::builder()
                    .uri("/dv_core/index.html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_router_serves_missing_as_404() {
        let dir = tempfile::tempdir().unwrap();
        let response = create_router(dir.path())
            .oneshot(Request::builder().uri("/nope.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bind_skips_busy_port() {
        let (busy, port) = bind_with_retry("127.0.0.1", 0, 0).await.unwrap();
        let taken = busy.local_addr().unwrap().port();
        assert_eq!(port, 0);

        let (_next, chosen) = bind_with_retry("127.0.0.1", taken, MAX_PORT_INCREMENTS)
            .await
            .unwrap();
        assert!(chosen > taken && chosen <= taken.saturating_add(MAX_PORT_INCREMENTS));
    }
}
