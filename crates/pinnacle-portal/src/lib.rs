//! Learner-portal logic for CyberPinnacle.
//!
//! Everything the browser front-end decides on its own lives here, written
//! against seams rather than a concrete backend:
//!
//! - [`session`] -- follows sign-in changes and publishes [`AuthSnapshot`]s
//! - [`guard`] and [`routes`] -- the route table and its verification and
//!   admin gates
//! - [`records`] -- user-record operations over a [`DocumentStore`]
//! - [`catalog`], [`checkout`] -- course content and paid unlocks
//! - [`dashboard`] -- score, rank and badges
//! - [`lab`] -- Attack Lab script templates
//! - [`client`] -- typed calls to the API gateway
//!
//! Authorization failures never surface as errors; guards return a
//! redirect decision.

pub mod catalog;
pub mod checkout;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod guard;
pub mod lab;
pub mod records;
pub mod routes;
pub mod session;
pub mod store;

pub use checkout::{CheckoutConfig, CheckoutOutcome, CheckoutRequest};
pub use client::GatewayClient;
pub use dashboard::{DashboardSummary, Rank};
pub use error::{CheckoutError, ClientError, RecordError, StoreError};
pub use guard::{GateDecision, Guard, Redirect};
pub use lab::{LabLanguage, LabSelection};
pub use records::UserRecords;
pub use routes::{Navigation, View, resolve};
pub use session::{AuthProvider, AuthSnapshot, SessionUser};
pub use store::{DocumentStore, MemoryStore};
