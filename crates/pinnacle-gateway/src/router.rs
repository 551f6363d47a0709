//! Axum router construction for the gateway.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`] with
//! CORS restricted to the portal's origins.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Largest accepted request body (5 MiB).
pub const BODY_LIMIT_BYTES: usize = 5_242_880;

/// Build the complete Axum router for the gateway.
///
/// The router includes:
/// - `GET /` -- liveness banner
/// - `POST /ai` -- prompt relay
/// - `GET /admin/stats` -- usage counters
/// - `POST /recon/event` -- recon run report
/// - `POST /forensics/event` -- forensics run report
/// - `POST /send-otp` -- OTP placeholder
/// - `GET /stream` -- `WebSocket` SOC event stream
///
/// Upgrade requests to any other path fall through to a 404 and are never
/// upgraded. Origins that are not valid header values are skipped with a
/// warning.
pub fn build_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .route("/", get(handlers::index))
        // WebSocket
        .route("/stream", get(ws::stream))
        // REST API
        .route("/ai", post(handlers::ask_ai))
        .route("/admin/stats", get(handlers::admin_stats))
        .route("/recon/event", post(handlers::recon_event))
        .route("/forensics/event", post(handlers::forensics_event))
        .route("/send-otp", post(handlers::send_otp))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
