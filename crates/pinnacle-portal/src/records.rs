//! User-record operations.
//!
//! Every operation goes to the [`DocumentStore`]; nothing is cached between
//! calls. Mutations run through [`DocumentStore::update`], so concurrent
//! score increments, badge awards and course unlocks all land.

use chrono::Utc;
use pinnacle_types::{AccountStatus, CourseId, UserId, UserRecord};
use tracing::{debug, info};

use crate::error::RecordError;
use crate::store::DocumentStore;

/// Record operations over a document store.
pub struct UserRecords<S> {
    store: S,
}

impl<S: DocumentStore> UserRecords<S> {
    /// Wrap a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Create the default record for a user unless one already exists.
    ///
    /// Returns `true` if a record was written.
    pub async fn create_user_record(
        &self,
        uid: &UserId,
        email: Option<&str>,
    ) -> Result<bool, RecordError> {
        let record = UserRecord::new(uid.clone(), email.map(ToOwned::to_owned), Utc::now());
        let created = self.store.create(record).await?;
        if created {
            info!(%uid, "user record created");
        }
        Ok(created)
    }

    /// Fetch a user's record.
    pub async fn load_record(&self, uid: &UserId) -> Result<UserRecord, RecordError> {
        self.store
            .get(uid)
            .await?
            .ok_or_else(|| RecordError::NotFound(uid.clone()))
    }

    /// A user's score, or 0 when no record exists.
    pub async fn get_score(&self, uid: &UserId) -> Result<u64, RecordError> {
        Ok(self.store.get(uid).await?.map_or(0, |r| r.score))
    }

    /// Add points to a user's score. Returns the new score.
    pub async fn add_score(&self, uid: &UserId, points: i64) -> Result<u64, RecordError> {
        if points < 0 {
            return Err(RecordError::NegativePoints(points));
        }
        let points = points.unsigned_abs();
        let score = self
            .modify(uid, |record| {
                record.add_score(points);
                record.score
            })
            .await?;
        debug!(%uid, points, score, "score added");
        Ok(score)
    }

    /// Award a badge once. Returns `true` if it was new.
    pub async fn award_badge(&self, uid: &UserId, badge: &str) -> Result<bool, RecordError> {
        self.modify(uid, |record| record.award_badge(badge)).await
    }

    /// Mark a course as paid for. Returns `true` if it was newly unlocked.
    pub async fn unlock_course(&self, uid: &UserId, course: &CourseId) -> Result<bool, RecordError> {
        let unlocked = self
            .modify(uid, |record| record.unlock_course(course.clone()))
            .await?;
        if unlocked {
            info!(%uid, %course, "course unlocked");
        }
        Ok(unlocked)
    }

    /// Enroll a user in a course. Returns `true` if newly enrolled.
    pub async fn enroll(&self, uid: &UserId, course: &CourseId) -> Result<bool, RecordError> {
        self.modify(uid, |record| record.enroll(course.clone())).await
    }

    /// Restrict an account.
    pub async fn restrict_user(&self, uid: &UserId) -> Result<(), RecordError> {
        self.set_status(uid, AccountStatus::Restricted).await
    }

    /// Re-activate an account.
    pub async fn activate_user(&self, uid: &UserId) -> Result<(), RecordError> {
        self.set_status(uid, AccountStatus::Active).await
    }

    /// Delete a user's record.
    pub async fn delete_user_record(&self, uid: &UserId) -> Result<(), RecordError> {
        if self.store.delete(uid).await? {
            info!(%uid, "user record deleted");
            Ok(())
        } else {
            Err(RecordError::NotFound(uid.clone()))
        }
    }

    async fn set_status(&self, uid: &UserId, status: AccountStatus) -> Result<(), RecordError> {
        self.modify(uid, |record| record.status = status).await?;
        info!(%uid, ?status, "account status changed");
        Ok(())
    }

    /// Apply one atomic change to an existing record.
    async fn modify<T, F>(&self, uid: &UserId, change: F) -> Result<T, RecordError>
    where
        F: FnOnce(&mut UserRecord) -> T + Send,
        T: Send,
    {
        self.store
            .update(uid, change)
            .await?
            .ok_or_else(|| RecordError::NotFound(uid.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use pinnacle_types::Role;

    use super::*;
    use crate::store::MemoryStore;
    use crate::store::testing::SlowStore;

    fn uid() -> UserId {
        UserId::from("learner-1")
    }

    async fn with_record() -> UserRecords<MemoryStore> {
        let records = UserRecords::new(MemoryStore::new());
        let created = records.create_user_record(&uid(), Some("l@example.com")).await;
        assert!(matches!(created, Ok(true)));
        records
    }

    #[tokio::test]
    async fn create_is_idempotent() {
        let records = with_record().await;
        assert!(records.add_score(&uid(), 25).await.is_ok());

        let again = records.create_user_record(&uid(), Some("other@example.com")).await;
        assert!(matches!(again, Ok(false)));

        let record = records.load_record(&uid()).await;
        assert!(record.is_ok_and(|r| r.score == 25
            && r.email.as_deref() == Some("l@example.com")
            && r.role == Role::User));
    }

    #[tokio::test]
    async fn score_only_goes_up() {
        let records = with_record().await;
        assert!(matches!(records.add_score(&uid(), 50).await, Ok(50)));
        assert!(matches!(records.add_score(&uid(), 0).await, Ok(50)));
        assert!(matches!(
            records.add_score(&uid(), -10).await,
            Err(RecordError::NegativePoints(-10))
        ));
        assert!(matches!(records.get_score(&uid()).await, Ok(50)));
    }

    #[tokio::test]
    async fn missing_record_score_is_zero() {
        let records = UserRecords::new(MemoryStore::new());
        assert!(matches!(records.get_score(&uid()).await, Ok(0)));
        assert!(matches!(
            records.add_score(&uid(), 5).await,
            Err(RecordError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn course_unlock_is_a_set_union() {
        let records = with_record().await;
        let course = CourseId::from("ethical-hacking");
        assert!(matches!(records.unlock_course(&uid(), &course).await, Ok(true)));
        assert!(matches!(records.unlock_course(&uid(), &course).await, Ok(false)));
        assert!(matches!(records.enroll(&uid(), &course).await, Ok(true)));

        let record = records.load_record(&uid()).await;
        assert!(record.is_ok_and(|r| r.unlocked_courses.len() == 1 && r.has_unlocked(&course)));
    }

    #[tokio::test]
    async fn badges_keep_award_order() {
        let records = with_record().await;
        assert!(matches!(records.award_badge(&uid(), "recon-rookie").await, Ok(true)));
        assert!(matches!(records.award_badge(&uid(), "ctf-first-blood").await, Ok(true)));
        assert!(matches!(records.award_badge(&uid(), "recon-rookie").await, Ok(false)));
        let record = records.load_record(&uid()).await;
        assert!(record.is_ok_and(|r| r.badges == ["recon-rookie", "ctf-first-blood"]));
    }

    #[tokio::test]
    async fn restrict_activate_delete() {
        let records = with_record().await;
        assert!(records.restrict_user(&uid()).await.is_ok());
        assert!(records.load_record(&uid()).await.is_ok_and(|r| r.is_restricted()));

        assert!(records.activate_user(&uid()).await.is_ok());
        assert!(records.load_record(&uid()).await.is_ok_and(|r| !r.is_restricted()));

        assert!(records.delete_user_record(&uid()).await.is_ok());
        assert!(matches!(
            records.delete_user_record(&uid()).await,
            Err(RecordError::NotFound(_))
        ));
        assert!(records.store().is_empty().await);
    }

    #[tokio::test]
    async fn concurrent_updates_are_not_lost() {
        let records = UserRecords::new(SlowStore::new(Duration::from_millis(20)));
        let course = CourseId::from("ethical-hacking");
        assert!(matches!(records.create_user_record(&uid(), None).await, Ok(true)));

        let id = uid();
        let (unlocked, scored, badged) = tokio::join!(
            records.unlock_course(&id, &course),
            records.add_score(&id, 50),
            records.award_badge(&id, "first-flag"),
        );
        assert!(matches!(unlocked, Ok(true)));
        assert!(scored.is_ok());
        assert!(matches!(badged, Ok(true)));

        let record = records.load_record(&uid()).await;
        assert!(record.is_ok_and(|r| r.score == 50
            && r.has_unlocked(&course)
            && r.badges == ["first-flag"]));
    }

    #[tokio::test]
    async fn parallel_score_increments_all_count() {
        let records = Arc::new(UserRecords::new(SlowStore::new(Duration::from_millis(5))));
        assert!(records.create_user_record(&uid(), None).await.is_ok());

        let tasks: Vec<_> = (0..10)
            .map(|_| {
                let records = Arc::clone(&records);
                tokio::spawn(async move { records.add_score(&uid(), 10).await })
            })
            .collect();
        for task in tasks {
            assert!(matches!(task.await, Ok(Ok(_))));
        }

        assert!(matches!(records.get_score(&uid()).await, Ok(100)));
    }

    #[tokio::test]
    async fn concurrent_creates_write_once() {
        let records = UserRecords::new(SlowStore::new(Duration::from_millis(10)));
        let id = uid();
        let (a, b) = tokio::join!(
            records.create_user_record(&id, Some("a@example.com")),
            records.create_user_record(&id, Some("b@example.com")),
        );
        let written = [a, b].into_iter().filter(|r| matches!(r, Ok(true))).count();
        assert_eq!(written, 1);
    }
}
