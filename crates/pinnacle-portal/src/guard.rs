//! Route guards.
//!
//! Guards decide, from the current [`AuthSnapshot`], whether a protected
//! view may render or where the visitor is sent instead. They hold no state
//! and cache nothing: every call looks at the snapshot it is given.

use crate::session::AuthSnapshot;

/// Path of the login view.
pub const LOGIN_PATH: &str = "/login";
/// Path of the home view.
pub const HOME_PATH: &str = "/";
/// Reason attached when an unverified user is bounced to login.
pub const VERIFY_EMAIL_MESSAGE: &str = "Verify email first";

/// Where to send a visitor who may not see a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    /// Target path.
    pub to: &'static str,
    /// Informational reason shown on the target view, if any.
    pub message: Option<&'static str>,
}

impl Redirect {
    /// Redirect without a reason.
    pub const fn to(path: &'static str) -> Self {
        Self {
            to: path,
            message: None,
        }
    }
}

/// Outcome of evaluating a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the protected view unchanged.
    Allow,
    /// Navigate elsewhere instead.
    Redirect(Redirect),
}

/// Which check a route applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Anyone may view.
    Public,
    /// Signed in with a verified email.
    Verified,
    /// Signed in with an admin record.
    Admin,
}

impl Guard {
    /// Evaluate this guard against a snapshot.
    pub fn check(self, auth: &AuthSnapshot) -> GateDecision {
        match self {
            Self::Public => GateDecision::Allow,
            Self::Verified => require_verified(auth),
            Self::Admin => require_admin(auth),
        }
    }
}

/// Require a signed-in user whose email is verified.
///
/// Signed-out visitors go to login; signed-in but unverified users go to
/// login with [`VERIFY_EMAIL_MESSAGE`].
pub fn require_verified(auth: &AuthSnapshot) -> GateDecision {
    match &auth.user {
        None => GateDecision::Redirect(Redirect::to(LOGIN_PATH)),
        Some(user) if !user.email_verified => GateDecision::Redirect(Redirect {
            to: LOGIN_PATH,
            message: Some(VERIFY_EMAIL_MESSAGE),
        }),
        Some(_) => GateDecision::Allow,
    }
}

/// Require a signed-in user whose fetched record has the admin role.
///
/// Without a session or a loaded record the visitor goes to login; a
/// loaded non-admin record goes home.
pub fn require_admin(auth: &AuthSnapshot) -> GateDecision {
    if auth.user.is_none() {
        return GateDecision::Redirect(Redirect::to(LOGIN_PATH));
    }
    match &auth.record {
        None => GateDecision::Redirect(Redirect::to(LOGIN_PATH)),
        Some(record) if record.is_admin() => GateDecision::Allow,
        Some(_) => GateDecision::Redirect(Redirect::to(HOME_PATH)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pinnacle_types::{Role, UserId, UserRecord};

    use super::*;
    use crate::session::SessionUser;

    fn snapshot(verified: bool, role: Option<Role>) -> AuthSnapshot {
        let uid = UserId::from("u1");
        AuthSnapshot {
            user: Some(SessionUser {
                uid: uid.clone(),
                email: None,
                email_verified: verified,
            }),
            record: role.map(|role| {
                let mut record = UserRecord::new(uid.clone(), None, Utc::now());
                record.role = role;
                record
            }),
        }
    }

    #[test]
    fn verified_gate_redirects_signed_out_to_login() {
        let decision = require_verified(&AuthSnapshot::signed_out());
        assert_eq!(decision, GateDecision::Redirect(Redirect::to(LOGIN_PATH)));
    }

    #[test]
    fn verified_gate_attaches_reason_for_unverified() {
        let decision = require_verified(&snapshot(false, None));
        assert_eq!(
            decision,
            GateDecision::Redirect(Redirect {
                to: "/login",
                message: Some("Verify email first"),
            })
        );
    }

    #[test]
    fn verified_gate_allows_verified() {
        assert_eq!(require_verified(&snapshot(true, None)), GateDecision::Allow);
    }

    #[test]
    fn admin_gate() {
        assert_eq!(
            require_admin(&AuthSnapshot::signed_out()),
            GateDecision::Redirect(Redirect::to(LOGIN_PATH))
        );
        assert_eq!(
            require_admin(&snapshot(true, None)),
            GateDecision::Redirect(Redirect::to(LOGIN_PATH))
        );
        assert_eq!(
            require_admin(&snapshot(true, Some(Role::User))),
            GateDecision::Redirect(Redirect::to(HOME_PATH))
        );
        assert_eq!(require_admin(&snapshot(false, Some(Role::Admin))), GateDecision::Allow);
    }

    #[test]
    fn decision_follows_snapshot_changes() {
        let mut auth = snapshot(false, None);
        assert_ne!(Guard::Verified.check(&auth), GateDecision::Allow);
        if let Some(user) = auth.user.as_mut() {
            user.email_verified = true;
        }
        assert_eq!(Guard::Verified.check(&auth), GateDecision::Allow);
        assert_eq!(Guard::Public.check(&AuthSnapshot::signed_out()), GateDecision::Allow);
    }
}
