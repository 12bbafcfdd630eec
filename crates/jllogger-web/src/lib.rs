//! jllogger Web - HTTP host for the log append route
//!
//! Serves a single authenticated POST route that appends a batch of lines
//! to `<log_dir>/<filename>.log`, plus a public health check.

mod client;
mod error;

pub use client::LogClient;
pub use error::ApiError;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, Request, State},
    http::{header, header::HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use jllogger_core::{constants, LogRequest, ServerConfig};
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    log_dir: Arc<PathBuf>,
    token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(log_dir: PathBuf, token: Option<String>) -> Self {
        Self {
            log_dir: Arc::new(log_dir),
            token: token.map(Arc::from),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.log_dir.clone(), config.token.clone())
    }
}

/// Extract the token a client presented, if any.
///
/// Accepts `Authorization: token <t>`, `Authorization: Bearer <t>` and a
/// `?token=<t>` query parameter.
fn presented_token(request: &Request) -> Option<String> {
    let from_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            let (scheme, value) = v.split_once(' ')?;
            let scheme = scheme.to_ascii_lowercase();
            (scheme == "token" || scheme == "bearer").then(|| value.trim().to_string())
        });

    from_header.or_else(|| {
        Query::<HashMap<String, String>>::try_from_uri(request.uri())
            .ok()
            .and_then(|Query(mut params)| params.remove("token"))
    })
}

/// Token authentication middleware
async fn token_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // If no token is configured, allow all requests
    let Some(expected) = &state.token else {
        return Ok(next.run(request).await);
    };

    match presented_token(&request) {
        Some(token) if token == **expected => Ok(next.run(request).await),
        _ => {
            warn!("Rejected unauthenticated request to {}", request.uri().path());
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

/// axum routes must be absolute
fn absolute_route(route: String) -> String {
    if route.starts_with('/') {
        route
    } else {
        format!("/{}", route)
    }
}

fn cors_layer(cors_origin: Option<&str>) -> CorsLayer {
    let default_origin = HeaderValue::from_static(constants::DEFAULT_CORS_ORIGIN);
    let origin = match cors_origin {
        Some(origin) => origin.parse::<HeaderValue>().unwrap_or_else(|_| {
            warn!("Invalid CORS origin {:?}, using {}", origin, constants::DEFAULT_CORS_ORIGIN);
            default_origin
        }),
        None => default_origin,
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Create the router for a server config
pub fn create_router(config: &ServerConfig) -> Router {
    let state = AppState::from_config(config);

    // Routes that require authentication
    let protected_routes = Router::new()
        .route(&absolute_route(config.log_route()), post(append_log))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .route_layer(middleware::from_fn_with_state(state.clone(), token_auth));

    // Public routes (no auth required)
    let public_routes =
        Router::new().route(&absolute_route(config.health_route()), get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors_layer(config.cors_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server and run until Ctrl-C
pub async fn start_server(config: ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(&config.bind).await?;
    serve(listener, config, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl-C, shutting down...");
    })
    .await
}

/// Serve on an already-bound listener until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, config: ServerConfig, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(&config);

    info!(
        "jllogger listening on {} (route {}, log dir {})",
        listener.local_addr()?,
        config.log_route(),
        config.log_dir.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

// === API Handlers ===

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    })))
}

/// Append a batch of lines. Success is an empty 200.
///
/// An empty body decodes as JSON `null` and fails as a missing-field error.
async fn append_log(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, ApiError> {
    let value: serde_json::Value = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON in body of request: {}", e)))?
    };
    let request = LogRequest::from_value(value)?;

    let name = request.log_name().map_err(|e| {
        warn!("{}", e);
        e
    })?;

    let dir = Arc::clone(&state.log_dir);
    let lines = request.log_content;
    let count = lines.len();
    let file_name = name.file_name();

    tokio::task::spawn_blocking(move || jllogger_logs::append_lines(&dir, &name, &lines))
        .await
        .map_err(|e| ApiError::internal(format!("Append task failed: {}", e)))??;

    info!("Appended {} lines to {}", count, file_name);
    Ok(StatusCode::OK)
}
