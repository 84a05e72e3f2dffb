//! Local hosting surface
//!
//! Serves the pre-built browser bundle from a static asset directory.
//! Requests carrying the deployment path prefix (bundles built for a
//! sub-path deployment keep absolute asset URLs) have the prefix stripped
//! before file resolution, and unmatched paths fall back to the entry
//! document so client-side routing keeps working.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::uri::{PathAndQuery, Uri},
    middleware::{self, Next},
    response::Response,
    Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::error::{HearthError, HearthResult};

/// Settings for one server run
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub port: u16,
    pub public_dir: PathBuf,
    pub path_prefix: String,
}

/// Run the server until interrupted
pub fn run(options: ServeOptions) -> HearthResult<()> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| HearthError::Server(format!("Failed to start runtime: {}", e)))?;
    runtime.block_on(serve(options))
}

async fn serve(options: ServeOptions) -> HearthResult<()> {
    if !options.public_dir.join("index.html").exists() {
        return Err(HearthError::Server(format!(
            "No index.html under {}; nothing to serve",
            options.public_dir.display()
        )));
    }

    let port = options.port;
    let app = router(&options);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|e| HearthError::Server(format!("Failed to bind port {}: {}", port, e)))?;

    tracing::info!("Hearth running at http://localhost:{}", port);

    axum::serve(listener, app)
        .await
        .map_err(|e| HearthError::Server(format!("Server failed: {}", e)))
}

/// Build the router: prefix rewrite, then static files with SPA fallback
pub fn router(options: &ServeOptions) -> Router {
    let serve_dir = ServeDir::new(&options.public_dir)
        .fallback(ServeFile::new(options.public_dir.join("index.html")));

    let prefix = Arc::new(options.path_prefix.clone());

    Router::new()
        .fallback_service(serve_dir)
        .layer(middleware::from_fn_with_state(prefix, rewrite_prefix))
        .layer(TraceLayer::new_for_http())
}

/// Strip the deployment prefix from a request path
///
/// Returns the rewritten path, or None when the path does not carry the
/// prefix and should be resolved as-is.
fn strip_deployment_prefix(path: &str, prefix: &str) -> Option<String> {
    if prefix.is_empty() || prefix == "/" {
        return None;
    }
    if path == prefix {
        return Some("/".to_string());
    }
    path.strip_prefix(&format!("{}/", prefix))
        .map(|rest| format!("/{}", rest))
}

async fn rewrite_prefix(
    State(prefix): State<Arc<String>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(new_path) = strip_deployment_prefix(request.uri().path(), &prefix) {
        let path_and_query = match request.uri().query() {
            Some(query) => format!("{}?{}", new_path, query),
            None => new_path,
        };

        let mut parts = request.uri().clone().into_parts();
        parts.path_and_query = path_and_query
            .parse::<PathAndQuery>()
            .ok()
            .or_else(|| Some(PathAndQuery::from_static("/")));

        if let Ok(uri) = Uri::from_parts(parts) {
            *request.uri_mut() = uri;
        }
    }
    next.run(request).await
}
