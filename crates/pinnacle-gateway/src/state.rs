//! Shared application state for the gateway.
//!
//! [`AppState`] is wrapped in [`Arc`](std::sync::Arc) and injected via
//! Axum's `State` extractor. It owns everything a handler may touch: the
//! provider, the usage counters and the stream hub.

use crate::hub::EventHub;
use crate::provider::LlmProvider;
use crate::stats::UsageStats;

/// Shared state for the Axum application.
pub struct AppState {
    /// Provider that answers chat prompts.
    pub provider: LlmProvider,
    /// Admin usage counters.
    pub stats: UsageStats,
    /// Fan-out point for SOC stream events.
    pub hub: EventHub,
}

impl AppState {
    /// Create state with zeroed counters and no stream connections.
    pub fn new(provider: LlmProvider) -> Self {
        Self {
            provider,
            stats: UsageStats::new(),
            hub: EventHub::new(),
        }
    }
}
