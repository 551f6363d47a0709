//! Auth-state propagation.
//!
//! [`AuthProvider`] follows the external auth service's sign-in state. On
//! every change it re-reads the signed-in user's record from the document
//! store and publishes a fresh [`AuthSnapshot`] on a
//! [`tokio::sync::watch`] channel; views and guards read the latest value
//! from their receivers.
//!
//! Record loads are asynchronous, so a load can finish after the session
//! it was started for has ended. Every sign-in change and sign-out bumps a
//! generation counter; a load only publishes if the generation is still
//! the one it started under.

use std::sync::atomic::{AtomicU64, Ordering};

use pinnacle_types::{UserId, UserRecord};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::store::DocumentStore;

/// The authenticated user as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Subject id.
    pub uid: UserId,
    /// Sign-in email, if the provider exposes one.
    pub email: Option<String>,
    /// Whether the email address has been verified.
    pub email_verified: bool,
}

/// What the portal currently knows about who is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// The signed-in user, if any.
    pub user: Option<SessionUser>,
    /// That user's record, if it exists and could be loaded.
    pub record: Option<UserRecord>,
}

impl AuthSnapshot {
    /// Nobody signed in.
    pub const fn signed_out() -> Self {
        Self {
            user: None,
            record: None,
        }
    }
}

/// Publishes [`AuthSnapshot`]s as the sign-in state changes.
pub struct AuthProvider<S> {
    store: S,
    tx: watch::Sender<AuthSnapshot>,
    generation: AtomicU64,
}

impl<S: DocumentStore> AuthProvider<S> {
    /// Create a provider starting in the signed-out state.
    pub fn new(store: S) -> Self {
        let (tx, _) = watch::channel(AuthSnapshot::signed_out());
        Self {
            store,
            tx,
            generation: AtomicU64::new(0),
        }
    }

    /// Receive every snapshot published from now on.
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.tx.subscribe()
    }

    /// The latest published snapshot.
    pub fn current(&self) -> AuthSnapshot {
        self.tx.borrow().clone()
    }

    /// Handle one sign-in state change from the auth service.
    ///
    /// A signed-in user's record is fetched before publishing. If the
    /// fetch fails the user is still published, without a record, so
    /// record-dependent gates fail closed. A newer change or a sign-out
    /// that happens during the fetch wins.
    pub async fn on_auth_state_changed(&self, user: Option<SessionUser>) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel).wrapping_add(1);
        let snapshot = self.load_snapshot(user).await;
        self.publish(generation, snapshot);
    }

    /// Re-read the current user's record, e.g. after it was modified.
    ///
    /// Dropped if the session changes while the record is loading.
    pub async fn refresh(&self) {
        let generation = self.generation.load(Ordering::Acquire);
        let user = self.tx.borrow().user.clone();
        let snapshot = self.load_snapshot(user).await;
        self.publish(generation, snapshot);
    }

    /// Publish the signed-out state, superseding any load in flight.
    pub fn sign_out(&self) {
        self.tx.send_modify(|current| {
            self.generation.fetch_add(1, Ordering::AcqRel);
            *current = AuthSnapshot::signed_out();
        });
        debug!("user signed out");
    }

    async fn load_snapshot(&self, user: Option<SessionUser>) -> AuthSnapshot {
        let Some(user) = user else {
            return AuthSnapshot::signed_out();
        };
        let record = match self.store.get(&user.uid).await {
            Ok(record) => record,
            Err(e) => {
                warn!(uid = %user.uid, error = %e, "failed to load user record");
                None
            }
        };
        debug!(uid = %user.uid, has_record = record.is_some(), "user record loaded");
        AuthSnapshot {
            user: Some(user),
            record,
        }
    }

    /// Publish `snapshot` unless the session moved on since `generation`.
    ///
    /// The check runs under the channel's lock, the same lock
    /// [`sign_out`](Self::sign_out) bumps the generation under.
    fn publish(&self, generation: u64, snapshot: AuthSnapshot) {
        let published = self.tx.send_if_modified(|current| {
            if self.generation.load(Ordering::Acquire) != generation {
                return false;
            }
            *current = snapshot;
            true
        });
        if !published {
            debug!(generation, "stale auth snapshot dropped");
        }
    }

    /// Follow a stream of auth changes until the sender side closes.
    pub async fn run(&self, mut changes: mpsc::Receiver<Option<SessionUser>>) {
        info!("auth state listener started");
        while let Some(user) = changes.recv().await {
            self.on_auth_state_changed(user).await;
        }
        info!("auth state listener stopped");
    }
}
