//! Course checkout.
//!
//! Builds the request handed to the hosted payment widget and applies the
//! widget's outcome. Amounts are held as [`Decimal`] naira and converted to
//! kobo (1/100 NGN) for the widget; no floating point is involved.

use chrono::Utc;
use pinnacle_types::{CourseId, UserId};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::Course;
use crate::error::{CheckoutError, RecordError};
use crate::records::UserRecords;
use crate::store::DocumentStore;

/// Currency every checkout is charged in.
pub const CURRENCY: &str = "NGN";

/// Environment variable holding the widget's public key.
pub const PUBLIC_KEY_VAR: &str = "PAYSTACK_PUBLIC_KEY";

/// Checkout settings.
#[derive(Debug, Clone, Default)]
pub struct CheckoutConfig {
    /// Public key for the payment widget. Checkout is disabled without it.
    pub public_key: Option<String>,
}

impl CheckoutConfig {
    /// Read [`PUBLIC_KEY_VAR`] from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            public_key: lookup(PUBLIC_KEY_VAR).filter(|k| !k.trim().is_empty()),
        }
    }
}

/// Data passed through the widget and echoed back on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutMetadata {
    /// Course being bought.
    pub course_id: CourseId,
    /// Its display title.
    pub course_title: String,
    /// Buyer.
    pub user_id: UserId,
}

/// The widget's initialization payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Transaction reference: the creation time in Unix milliseconds.
    pub reference: String,
    /// Buyer email.
    pub email: String,
    /// Amount in kobo.
    pub amount: u64,
    /// Always [`CURRENCY`].
    pub currency: &'static str,
    /// Widget public key.
    pub public_key: String,
    /// Pass-through metadata.
    pub metadata: CheckoutMetadata,
}

/// How the widget finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Payment went through.
    Success {
        /// Reference reported by the widget.
        reference: String,
    },
    /// The buyer closed the widget without paying.
    Closed,
}

/// Convert a naira amount to kobo.
///
/// Rejects zero, negative and sub-kobo amounts, and anything that does not
/// fit in a `u64`.
pub fn to_minor_units(amount: Decimal) -> Result<u64, CheckoutError> {
    if amount <= Decimal::ZERO {
        return Err(CheckoutError::InvalidAmount(amount.to_string()));
    }
    let kobo = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| CheckoutError::InvalidAmount(amount.to_string()))?;
    if !kobo.fract().is_zero() {
        return Err(CheckoutError::InvalidAmount(amount.to_string()));
    }
    kobo.to_u64()
        .ok_or_else(|| CheckoutError::InvalidAmount(amount.to_string()))
}

/// Build the widget request for `buyer` purchasing `course`.
pub fn build_checkout(
    config: &CheckoutConfig,
    course: &Course,
    buyer: &UserId,
    email: &str,
) -> Result<CheckoutRequest, CheckoutError> {
    let Some(public_key) = config.public_key.clone() else {
        warn!(course = course.id, "checkout requested without a public key");
        return Err(CheckoutError::Unavailable);
    };
    let amount = to_minor_units(course.price())?;

    Ok(CheckoutRequest {
        reference: Utc::now().timestamp_millis().to_string(),
        email: email.to_owned(),
        amount,
        currency: CURRENCY,
        public_key,
        metadata: CheckoutMetadata {
            course_id: course.course_id(),
            course_title: course.title.to_owned(),
            user_id: buyer.clone(),
        },
    })
}

/// Apply the widget outcome. Returns `true` if the course was newly unlocked.
pub async fn complete_checkout<S: DocumentStore>(
    records: &UserRecords<S>,
    request: &CheckoutRequest,
    outcome: &CheckoutOutcome,
) -> Result<bool, RecordError> {
    match outcome {
        CheckoutOutcome::Success { reference } => {
            info!(
                %reference,
                uid = %request.metadata.user_id,
                course = %request.metadata.course_id,
                "payment succeeded"
            );
            records
                .unlock_course(&request.metadata.user_id, &request.metadata.course_id)
                .await
        }
        CheckoutOutcome::Closed => {
            info!(reference = %request.reference, "payment window closed");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::*;
    use crate::catalog::{DEFAULT_COURSE, course_or_default};
    use crate::store::MemoryStore;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap_or_default()
    }

    fn keyed() -> CheckoutConfig {
        CheckoutConfig {
            public_key: Some(String::from("pk_test_123")),
        }
    }

    #[test]
    fn naira_to_kobo() {
        assert_eq!(to_minor_units(dec("15000")), Ok(1_500_000));
        assert_eq!(to_minor_units(dec("0.5")), Ok(50));
        assert_eq!(to_minor_units(dec("19.99")), Ok(1999));
    }

    #[test]
    fn bad_amounts_are_rejected() {
        assert!(matches!(to_minor_units(dec("0")), Err(CheckoutError::InvalidAmount(_))));
        assert!(matches!(to_minor_units(dec("-5")), Err(CheckoutError::InvalidAmount(_))));
        assert!(matches!(to_minor_units(dec("1.005")), Err(CheckoutError::InvalidAmount(_))));
    }

    #[test]
    fn missing_public_key_disables_checkout() {
        let config = CheckoutConfig::from_lookup(|_| Some(String::from("  ")));
        assert!(config.public_key.is_none());

        let Some(course) = course_or_default(DEFAULT_COURSE) else {
            return;
        };
        let result = build_checkout(&config, course, &UserId::from("u1"), "u1@example.com");
        assert_eq!(result, Err(CheckoutError::Unavailable));
    }

    #[test]
    fn request_serializes_for_the_widget() {
        let Some(course) = course_or_default(DEFAULT_COURSE) else {
            return;
        };
        let request = build_checkout(&keyed(), course, &UserId::from("u1"), "u1@example.com");
        assert!(request.is_ok());
        let json = request.ok().map(|r| serde_json::to_value(r).unwrap_or_default());
        let Some(json) = json else {
            return;
        };
        assert_eq!(json["amount"], 1_500_000);
        assert_eq!(json["currency"], "NGN");
        assert_eq!(json["publicKey"], "pk_test_123");
        assert_eq!(json["metadata"]["courseId"], "ethical-hacking");
        assert_eq!(json["metadata"]["userId"], "u1");
        assert!(json["reference"].as_str().is_some_and(|r| r.parse::<i64>().is_ok()));
    }

    #[tokio::test]
    async fn success_unlocks_close_does_not() {
        let records = UserRecords::new(MemoryStore::new());
        let uid = UserId::from("buyer");
        assert!(records.create_user_record(&uid, Some("b@example.com")).await.is_ok());

        let Some(course) = course_or_default(DEFAULT_COURSE) else {
            return;
        };
        let Ok(request) = build_checkout(&keyed(), course, &uid, "b@example.com") else {
            return;
        };

        let closed = complete_checkout(&records, &request, &CheckoutOutcome::Closed).await;
        assert!(matches!(closed, Ok(false)));
        assert!(records
            .load_record(&uid)
            .await
            .is_ok_and(|r| !r.has_unlocked(&course.course_id())));

        let paid = CheckoutOutcome::Success {
            reference: request.reference.clone(),
        };
        assert!(matches!(complete_checkout(&records, &request, &paid).await, Ok(true)));
        assert!(records
            .load_record(&uid)
            .await
            .is_ok_and(|r| r.has_unlocked(&course.course_id())));
    }
}
