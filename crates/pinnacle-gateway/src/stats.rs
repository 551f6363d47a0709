//! Admin usage counters.
//!
//! [`UsageStats`] is owned by [`AppState`](crate::state::AppState) and
//! handed to handlers through it, so tests can build one, drive requests
//! through the router and read the counters back. Values live for the
//! process lifetime only and never influence request handling.

use chrono::Utc;
use pinnacle_types::{LastChat, LastForensics, LastRecon, ReconKind, StatsReport};
use tokio::sync::RwLock;

/// Process-lifetime usage counters and last-event snapshots.
#[derive(Debug, Default)]
pub struct UsageStats {
    inner: RwLock<StatsReport>,
}

impl UsageStats {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a chat prompt and remember it as the latest one.
    pub async fn record_chat(&self, prompt: &str) {
        let mut report = self.inner.write().await;
        report.stats.total_chats = report.stats.total_chats.saturating_add(1);
        report.last_chat = Some(LastChat {
            prompt: prompt.to_owned(),
            timestamp: Utc::now(),
        });
    }

    /// Count a recon run of the given kind and remember it.
    pub async fn record_recon(&self, kind: ReconKind, input: Option<String>) {
        let mut report = self.inner.write().await;
        let counter = report.stats.recon_counter_mut(kind);
        *counter = counter.saturating_add(1);
        report.last_recon = Some(LastRecon::new(kind, input, Utc::now()));
    }

    /// Count a forensics analysis and remember it.
    pub async fn record_forensics(&self, artifact: Option<String>) {
        let mut report = self.inner.write().await;
        report.stats.total_forensics_analyses =
            report.stats.total_forensics_analyses.saturating_add(1);
        report.last_forensics = Some(LastForensics {
            artifact,
            timestamp: Utc::now(),
        });
    }

    /// A copy of the current counters and snapshots.
    pub async fn report(&self) -> StatsReport {
        self.inner.read().await.clone()
    }
}
