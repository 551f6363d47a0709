//! Request and response bodies for the gateway's HTTP endpoints.
//!
//! Request fields are optional on purpose: a missing field is a client
//! input error reported by the handler with a fixed message, not a
//! deserialization failure.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::ReconKind;

/// Body of `POST /ai`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AskRequest {
    /// The learner's prompt.
    #[serde(default)]
    pub prompt: Option<String>,
}

impl AskRequest {
    /// The prompt, if present and not blank.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// Successful body of `POST /ai`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AskResponse {
    /// Text generated by the provider.
    pub response: String,
}

/// Error body returned by every gateway endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ErrorBody {
    /// Fixed, user-facing error message.
    pub error: String,
}

/// Acknowledgement body for fire-and-forget endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Ack {
    /// Always `true` when returned with a 2xx status.
    pub success: bool,
}

impl Ack {
    /// The positive acknowledgement.
    pub const OK: Self = Self { success: true };
}

/// Body of `POST /recon/event`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ReconEventRequest {
    /// Target of the recon run (IP, domain, ...).
    #[serde(default)]
    pub query: Option<String>,
    /// Which recon tool ran. Defaults to an IP lookup.
    #[serde(default, rename = "type")]
    pub kind: ReconKind,
}

/// Body of `POST /forensics/event`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ForensicsEventRequest {
    /// Name of the analysed artifact.
    #[serde(default)]
    pub artifact: Option<String>,
}

/// Body of `POST /send-otp`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OtpRequest {
    /// Address the code would be sent to.
    #[serde(default)]
    pub email: Option<String>,
    /// The one-time code. Never logged.
    #[serde(default)]
    pub otp: Option<String>,
}
