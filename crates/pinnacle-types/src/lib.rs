//! Shared type definitions for CyberPinnacle.
//!
//! This crate is the single source of truth for the wire and record types
//! exchanged between the API gateway, the portal logic, and the browser
//! front-end. Types flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- String-backed identifiers for users and courses
//! - [`enums`] -- Roles, account status, recon kinds, stream event kinds
//! - [`structs`] -- User records, admin counters, stream events
//! - [`api`] -- Request and response bodies for the gateway endpoints

pub mod api;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use api::{
    Ack, AskRequest, AskResponse, ErrorBody, ForensicsEventRequest, OtpRequest, ReconEventRequest,
};
pub use enums::{AccountStatus, ReconKind, Role, StreamEventKind};
pub use ids::{CourseId, UserId};
pub use structs::{
    AdminStats, LastChat, LastForensics, LastRecon, StatsReport, StreamEvent, UserRecord,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the front-end.

    use ts_rs::TS;

    /// Export each type, failing with its name if writing the binding fails.
    macro_rules! export {
        ($($ty:path),* $(,)?) => {
            $(
                let result = <$ty>::export_all();
                assert!(result.is_ok(), "{}: {:?}", stringify!($ty), result.err());
            )*
        };
    }

    #[test]
    fn export_bindings() {
        // Files are written to `bindings/` relative to the crate root.
        export!(
            crate::ids::UserId,
            crate::ids::CourseId,
            crate::enums::Role,
            crate::enums::AccountStatus,
            crate::enums::ReconKind,
            crate::enums::StreamEventKind,
            crate::structs::UserRecord,
            crate::structs::AdminStats,
            crate::structs::LastChat,
            crate::structs::LastRecon,
            crate::structs::LastForensics,
            crate::structs::StatsReport,
            crate::structs::StreamEvent,
            crate::api::AskRequest,
            crate::api::AskResponse,
            crate::api::ErrorBody,
            crate::api::Ack,
            crate::api::ReconEventRequest,
            crate::api::ForensicsEventRequest,
            crate::api::OtpRequest,
        );
    }
}
