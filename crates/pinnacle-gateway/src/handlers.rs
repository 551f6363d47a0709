//! HTTP endpoint handlers for the gateway.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Liveness banner |
//! | `POST` | `/ai` | Relay a prompt to the provider |
//! | `GET` | `/admin/stats` | Usage counters and last events |
//! | `POST` | `/recon/event` | Report a recon run |
//! | `POST` | `/forensics/event` | Report a forensics analysis |
//! | `POST` | `/send-otp` | OTP placeholder |
//!
//! Request bodies are extracted as `Result<Json<_>, JsonRejection>` so a
//! malformed or absent body is treated the same as a body with missing
//! fields. A body that cannot be read at all, such as one over the size
//! limit, is still rejected before anything is counted.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use pinnacle_types::{
    Ack, AskRequest, AskResponse, ForensicsEventRequest, OtpRequest, ReconEventRequest,
    StatsReport, StreamEvent, StreamEventKind,
};
use tracing::{error, info};

use crate::error::GatewayError;
use crate::state::AppState;

/// Banner served at `GET /`.
pub const BANNER: &str = "CyberPinnacle AI Backend Online";

/// Unwrap a JSON body, treating missing or unparseable JSON as empty.
///
/// A body that could not be read at all, such as one over the size limit,
/// is still an error.
fn body_or_default<T: Default>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, GatewayError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection @ JsonRejection::BytesRejection(_)) => Err(GatewayError::Body(rejection)),
        Err(_) => Ok(T::default()),
    }
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

/// Plain-text liveness banner.
pub async fn index() -> &'static str {
    BANNER
}

// ---------------------------------------------------------------------------
// POST /ai
// ---------------------------------------------------------------------------

/// Relay a prompt to the configured provider and return its text.
///
/// The chat counter and last-chat snapshot are updated before the provider
/// is called, so a prompt is counted even when the call then fails.
pub async fn ask_ai(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, GatewayError> {
    let request = body_or_default(payload)?;
    let prompt = request.prompt().ok_or(GatewayError::MissingPrompt)?;

    state.stats.record_chat(prompt).await;
    state.hub.broadcast(&StreamEvent::new(
        StreamEventKind::Chat,
        format!("AI prompt received ({} chars)", prompt.chars().count()),
    ));

    match state.provider.generate(prompt).await {
        Ok(response) => Ok(Json(AskResponse { response })),
        Err(e) => {
            error!(
                provider = state.provider.name(),
                model = state.provider.model(),
                error = %e,
                "AI request failed"
            );
            Err(GatewayError::Provider)
        }
    }
}

// ---------------------------------------------------------------------------
// GET /admin/stats
// ---------------------------------------------------------------------------

/// Return the usage counters and last-event snapshots.
pub async fn admin_stats(State(state): State<Arc<AppState>>) -> Json<StatsReport> {
    Json(state.stats.report().await)
}

// ---------------------------------------------------------------------------
// POST /recon/event
// ---------------------------------------------------------------------------

/// Count a recon run and announce it on the stream.
pub async fn recon_event(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReconEventRequest>, JsonRejection>,
) -> Result<Json<Ack>, GatewayError> {
    let ReconEventRequest { query, kind } = body_or_default(payload)?;

    let message = match query.as_deref() {
        Some(q) => format!("{}: {q}", kind.label()),
        None => kind.label().to_owned(),
    };

    state.stats.record_recon(kind, query).await;
    state
        .hub
        .broadcast(&StreamEvent::new(StreamEventKind::Recon, message));

    Ok(Json(Ack::OK))
}

// ---------------------------------------------------------------------------
// POST /forensics/event
// ---------------------------------------------------------------------------

/// Count a forensics analysis and announce it on the stream.
pub async fn forensics_event(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ForensicsEventRequest>, JsonRejection>,
) -> Result<Json<Ack>, GatewayError> {
    let ForensicsEventRequest { artifact } = body_or_default(payload)?;

    let message = match artifact.as_deref() {
        Some(name) => format!("Forensics analysis: {name}"),
        None => String::from("Forensics analysis"),
    };

    state.stats.record_forensics(artifact).await;
    state
        .hub
        .broadcast(&StreamEvent::new(StreamEventKind::Forensics, message));

    Ok(Json(Ack::OK))
}

// ---------------------------------------------------------------------------
// POST /send-otp
// ---------------------------------------------------------------------------

/// Placeholder: log the request and acknowledge. No code is sent.
pub async fn send_otp(
    payload: Result<Json<OtpRequest>, JsonRejection>,
) -> Result<Json<Ack>, GatewayError> {
    let request = body_or_default(payload)?;
    info!(
        email = request.email.as_deref().unwrap_or("<none>"),
        has_code = request.otp.is_some(),
        "OTP requested"
    );
    Ok(Json(Ack::OK))
}
