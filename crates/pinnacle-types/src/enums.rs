//! Enumeration types shared by the gateway and the portal.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Authorization role stored on a user record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Role {
    /// A regular learner.
    #[default]
    User,
    /// A platform administrator with access to the admin views.
    Admin,
}

/// Whether an account may use the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum AccountStatus {
    /// Normal access.
    #[default]
    Active,
    /// Access restricted by an administrator.
    Restricted,
}

// ---------------------------------------------------------------------------
// Recon tooling
// ---------------------------------------------------------------------------

/// The recon tool a learner ran, each with its own admin counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ReconKind {
    /// IP address lookup.
    #[default]
    Ip,
    /// DNS record lookup.
    Dns,
    /// WHOIS registration lookup.
    Whois,
    /// Subdomain enumeration.
    Subdomains,
}

impl ReconKind {
    /// Human-readable label shown on the SOC monitor.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ip => "IP Lookup",
            Self::Dns => "DNS Lookup",
            Self::Whois => "WHOIS Lookup",
            Self::Subdomains => "Subdomain Scan",
        }
    }
}

// ---------------------------------------------------------------------------
// Streaming
// ---------------------------------------------------------------------------

/// Tag carried by every event pushed over `/stream`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum StreamEventKind {
    /// An AI chat prompt was received.
    Chat,
    /// A recon tool was run.
    Recon,
    /// A forensics analysis was run.
    Forensics,
    /// Server lifecycle notices.
    System,
}
