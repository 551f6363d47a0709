//! Record and snapshot structs.
//!
//! Covers the user record owned by the external document store, the admin
//! counters kept by the gateway, and the events fanned out to stream
//! clients. Field names are camelCase on the wire to match the front-end.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AccountStatus, ReconKind, Role, StreamEventKind};
use crate::ids::{CourseId, UserId};

// ---------------------------------------------------------------------------
// User record
// ---------------------------------------------------------------------------

/// A learner's record in the document store.
///
/// The application never treats a copy of this struct as authoritative;
/// callers re-fetch it from the store before every decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct UserRecord {
    /// Subject id from the auth provider.
    pub uid: UserId,
    /// Email address captured at sign-up, if any.
    pub email: Option<String>,
    /// Authorization role.
    #[serde(default)]
    pub role: Role,
    /// Whether the account is active or restricted.
    #[serde(default)]
    pub status: AccountStatus,
    /// Accumulated challenge score. Only ever incremented.
    #[serde(default)]
    pub score: u64,
    /// Badge identifiers in the order they were awarded.
    #[serde(default)]
    pub badges: Vec<String>,
    /// Completed challenge identifiers in completion order.
    #[serde(default)]
    pub completed: Vec<String>,
    /// Courses the learner enrolled in.
    #[serde(default)]
    pub enrolled_courses: BTreeSet<CourseId>,
    /// Courses the learner paid for.
    #[serde(default)]
    pub unlocked_courses: BTreeSet<CourseId>,
    /// When the record was first written.
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Build the default record for a newly signed-up user.
    pub const fn new(uid: UserId, email: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            uid,
            email,
            role: Role::User,
            status: AccountStatus::Active,
            score: 0,
            badges: Vec::new(),
            completed: Vec::new(),
            enrolled_courses: BTreeSet::new(),
            unlocked_courses: BTreeSet::new(),
            created_at,
        }
    }

    /// Whether this record grants access to the admin views.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether an administrator has restricted this account.
    pub fn is_restricted(&self) -> bool {
        self.status == AccountStatus::Restricted
    }

    /// Add points to the score, saturating at [`u64::MAX`].
    pub const fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Append a badge unless it was already awarded. Returns `true` if added.
    pub fn award_badge(&mut self, badge: &str) -> bool {
        if self.badges.iter().any(|b| b == badge) {
            return false;
        }
        self.badges.push(badge.to_owned());
        true
    }

    /// Mark a course as paid for. Returns `true` if it was not unlocked before.
    pub fn unlock_course(&mut self, course: CourseId) -> bool {
        self.unlocked_courses.insert(course)
    }

    /// Enroll in a course. Returns `true` if not already enrolled.
    pub fn enroll(&mut self, course: CourseId) -> bool {
        self.enrolled_courses.insert(course)
    }

    /// Whether the learner has paid for the given course.
    pub fn has_unlocked(&self, course: &CourseId) -> bool {
        self.unlocked_courses.contains(course)
    }
}

// ---------------------------------------------------------------------------
// Admin counters
// ---------------------------------------------------------------------------

/// Process-lifetime usage counters shown on the admin dashboard.
///
/// Zeroed at startup and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AdminStats {
    /// AI chat prompts received (including ones whose provider call failed).
    pub total_chats: u64,
    /// IP lookups run.
    #[serde(rename = "totalReconIP")]
    pub total_recon_ip: u64,
    /// DNS lookups run.
    #[serde(rename = "totalReconDNS")]
    pub total_recon_dns: u64,
    /// WHOIS lookups run.
    #[serde(rename = "totalReconWHOIS")]
    pub total_recon_whois: u64,
    /// Subdomain scans run.
    pub total_recon_subdomains: u64,
    /// Forensics analyses run.
    pub total_forensics_analyses: u64,
}

impl AdminStats {
    /// Mutable access to the counter for a recon kind.
    pub const fn recon_counter_mut(&mut self, kind: ReconKind) -> &mut u64 {
        match kind {
            ReconKind::Ip => &mut self.total_recon_ip,
            ReconKind::Dns => &mut self.total_recon_dns,
            ReconKind::Whois => &mut self.total_recon_whois,
            ReconKind::Subdomains => &mut self.total_recon_subdomains,
        }
    }

    /// Current value of the counter for a recon kind.
    pub const fn recon_count(&self, kind: ReconKind) -> u64 {
        match kind {
            ReconKind::Ip => self.total_recon_ip,
            ReconKind::Dns => self.total_recon_dns,
            ReconKind::Whois => self.total_recon_whois,
            ReconKind::Subdomains => self.total_recon_subdomains,
        }
    }
}

/// The most recent chat prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LastChat {
    /// Prompt text as submitted.
    pub prompt: String,
    /// When the prompt was received.
    pub timestamp: DateTime<Utc>,
}

/// The most recent recon run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LastRecon {
    /// Display label of the tool, e.g. `IP Lookup`. The admin dashboard
    /// shows this field as-is.
    #[serde(rename = "type")]
    pub label: String,
    /// Which recon tool ran.
    pub kind: ReconKind,
    /// The query the tool ran against, if one was supplied.
    pub input: Option<String>,
    /// When the run was reported.
    pub timestamp: DateTime<Utc>,
}

impl LastRecon {
    /// Snapshot a run, labelled from its kind.
    pub fn new(kind: ReconKind, input: Option<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            label: kind.label().to_owned(),
            kind,
            input,
            timestamp,
        }
    }
}

/// The most recent forensics analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LastForensics {
    /// Name of the analysed artifact, if one was supplied.
    pub artifact: Option<String>,
    /// When the analysis was reported.
    pub timestamp: DateTime<Utc>,
}

/// Response body of `GET /admin/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct StatsReport {
    /// Counter values.
    pub stats: AdminStats,
    /// Most recent chat, `null` until the first one.
    pub last_chat: Option<LastChat>,
    /// Most recent recon run, `null` until the first one.
    pub last_recon: Option<LastRecon>,
    /// Most recent forensics analysis, `null` until the first one.
    pub last_forensics: Option<LastForensics>,
}

// ---------------------------------------------------------------------------
// Stream events
// ---------------------------------------------------------------------------

/// An ephemeral notification fanned out to every open `/stream` connection.
///
/// Events are never stored, replayed, or acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StreamEvent {
    /// Event category.
    #[serde(rename = "type")]
    pub kind: StreamEventKind,
    /// One-line description rendered by the SOC monitor.
    pub message: String,
    /// When the triggering action happened.
    pub timestamp: DateTime<Utc>,
}

impl StreamEvent {
    /// Create an event stamped with the current time.
    pub fn new(kind: StreamEventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
