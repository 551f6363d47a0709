//! API gateway for the CyberPinnacle portal.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Prompt relay** (`POST /ai`) forwarding learner prompts to the
//!   configured provider (Groq or Gemini) and returning the generated text
//! - **Admin stats** (`GET /admin/stats`) with process-lifetime usage
//!   counters
//! - **Activity reports** (`POST /recon/event`, `POST /forensics/event`)
//!   that bump counters and notify the SOC stream
//! - **`WebSocket` endpoint** (`/stream`) pushing SOC events to every
//!   connected monitor via [`tokio::sync::broadcast`]
//!
//! # Architecture
//!
//! Handlers receive an [`AppState`] that owns the provider, the usage
//! counters and the event hub. Nothing lives in module-level statics, so
//! tests build their own state and drive the router directly.

pub mod config;
pub mod error;
pub mod handlers;
pub mod hub;
pub mod provider;
pub mod router;
pub mod server;
pub mod state;
pub mod stats;
pub mod ws;

// Re-export primary types for convenience.
pub use config::{GatewayConfig, ProviderConfig, ProviderKind};
pub use hub::EventHub;
pub use provider::{create_provider, LlmProvider};
pub use router::build_router;
pub use server::{start_server, ServerError};
pub use state::AppState;
pub use stats::UsageStats;
