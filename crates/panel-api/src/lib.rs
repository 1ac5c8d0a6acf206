//! HTTP surface for the universal panel.
//!
//! Two independent routers share the response envelope in [`response`]:
//! [`db_access_router`] over a [`Gateway`] and [`mockdata_router`] over the
//! mock data services. [`serve`] wraps either with CORS and request tracing
//! and runs it until the process is stopped.

pub mod response;
pub mod routes;

pub use response::{ApiError, ApiResponse, ApiResult, Reply};
pub use routes::mockdata::MockdataState;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use db_access::Gateway;
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Origins allowed when none are configured.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "http://localhost:8081",
];

pub fn db_access_router(gateway: Gateway) -> Router {
    routes::db_access::router(gateway)
}

pub fn mockdata_router(state: MockdataState) -> Router {
    routes::mockdata::router(state)
}

/// CORS policy for the given origins. Origins that are not valid header
/// values are skipped with a warning.
pub fn cors_layer<S: AsRef<str>>(origins: &[S]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.as_ref()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin.as_ref());
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
}

/// Add request tracing and CORS to a router.
pub fn with_layers<S: AsRef<str>>(router: Router, cors_origins: &[S]) -> Router {
    router
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve `app`.
pub async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
