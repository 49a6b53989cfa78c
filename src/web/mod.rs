// Web server: axum-based headline categorization UI.
//
// Pages are rendered on the server from the caller's session, so each
// button only appears once its step is available: Scrape always,
// Categorize after a non-empty scrape, Download after categorization.
// Actions are plain HTML form POSTs that redirect back to `/`.
//
// The stylesheet is embedded at compile time via include_dir!.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::body::Body;
use axum::extract::Path;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use include_dir::{include_dir, Dir};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::classify::quantum::QuantumClassifier;
use crate::classify::traits::TopicClassifier;
use crate::config::Config;
use crate::preprocess::Preprocessor;
use crate::scrape::client::HeadlineClient;
use crate::session::SessionStore;

pub mod cookie;
pub mod handlers;
pub mod page;

static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/web/static");

/// How often the background sweep evicts idle sessions.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scraper: Arc<HeadlineClient>,
    pub classifier: Arc<dyn TopicClassifier>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        config: Config,
        scraper: HeadlineClient,
        classifier: Arc<dyn TopicClassifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            scraper: Arc::new(scraper),
            classifier,
            sessions: SessionStore::new(),
        }
    }

    /// Wire up the real scraper and quantum classifier from configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        config.require_weights()?;
        let scraper = HeadlineClient::new(&config.source_url, &config.heading_selector)?;
        let classifier =
            QuantumClassifier::from_config(&config, Arc::new(Preprocessor::english()))?;
        Ok(Self::new(config, scraper, Arc::new(classifier)))
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(config: Config, port: u16, bind: &str) -> Result<()> {
    let state = AppState::from_config(config)?;
    let source = state.config.source_url.clone();

    // Sessions whose cookie has expired are never touched again, so sweep
    // them out even when no new requests arrive.
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            tick.tick().await;
            sessions.prune_expired().await;
        }
    });

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!(source = %source, "Tidings listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    // Session-scoped routes (every request gets a session cookie)
    let session_routes = Router::new()
        .route("/", get(handlers::index::index))
        .route("/scrape", post(handlers::scrape::scrape_titles))
        .route("/categorize", post(handlers::categorize::categorize_titles))
        .route("/download", get(handlers::download::download_csv))
        .route("/api/session", get(handlers::session::get_session))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            cookie::with_session,
        ));

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/assets/{*path}", get(serve_asset));

    Router::new()
        .merge(session_routes)
        .merge(public_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check: always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Serve an embedded static asset, or 404.
async fn serve_asset(Path(path): Path<String>) -> Response {
    match ASSETS.get_file(&path) {
        Some(file) => {
            let mime = mime_type(&path);
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, HeaderValue::from_static(mime))
                .body(Body::from(file.contents()))
                .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
        None => api_error(StatusCode::NOT_FOUND, "Asset not found"),
    }
}

fn mime_type(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("");
    match ext {
        "css" => "text/css",
        "js" => "application/javascript",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
