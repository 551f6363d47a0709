//! Document-store seam.
//!
//! User records live in an external managed document database. The portal
//! needs keyed reads and writes of [`UserRecord`]s, captured by
//! [`DocumentStore`]. Changes to an existing record go through
//! [`DocumentStore::update`], which must apply them atomically so that
//! concurrent increments and set unions never overwrite each other.
//! [`MemoryStore`] implements it in-process for tests and local development.

use std::collections::BTreeMap;
use std::future::Future;

use pinnacle_types::{UserId, UserRecord};
use tokio::sync::RwLock;

use crate::error::StoreError;

/// Keyed storage of user records.
///
/// Used through generics rather than `dyn` so implementations can use
/// plain `async fn`.
pub trait DocumentStore: Send + Sync {
    /// Fetch a record, or `None` if it does not exist.
    fn get(&self, uid: &UserId) -> impl Future<Output = Result<Option<UserRecord>, StoreError>> + Send;

    /// Create or overwrite a record.
    fn put(&self, record: UserRecord) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Insert a record unless one already exists. Returns `true` if written.
    fn create(&self, record: UserRecord) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Apply `change` to a stored record as one atomic step.
    ///
    /// Returns `None` without calling `change` if the record does not exist.
    fn update<T, F>(
        &self,
        uid: &UserId,
        change: F,
    ) -> impl Future<Output = Result<Option<T>, StoreError>> + Send
    where
        F: FnOnce(&mut UserRecord) -> T + Send,
        T: Send;

    /// Delete a record. Returns `true` if one existed.
    fn delete(&self, uid: &UserId) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// In-process [`DocumentStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<BTreeMap<UserId, UserRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, uid: &UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.docs.read().await.get(uid).cloned())
    }

    async fn put(&self, record: UserRecord) -> Result<(), StoreError> {
        self.docs.write().await.insert(record.uid.clone(), record);
        Ok(())
    }

    async fn create(&self, record: UserRecord) -> Result<bool, StoreError> {
        let mut docs = self.docs.write().await;
        if docs.contains_key(&record.uid) {
            return Ok(false);
        }
        docs.insert(record.uid.clone(), record);
        Ok(true)
    }

    async fn update<T, F>(&self, uid: &UserId, change: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut UserRecord) -> T + Send,
        T: Send,
    {
        Ok(self.docs.write().await.get_mut(uid).map(change))
    }

    async fn delete(&self, uid: &UserId) -> Result<bool, StoreError> {
        Ok(self.docs.write().await.remove(uid).is_some())
    }
}

impl<S: DocumentStore> DocumentStore for std::sync::Arc<S> {
    fn get(&self, uid: &UserId) -> impl Future<Output = Result<Option<UserRecord>, StoreError>> + Send {
        (**self).get(uid)
    }

    fn put(&self, record: UserRecord) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).put(record)
    }

    fn create(&self, record: UserRecord) -> impl Future<Output = Result<bool, StoreError>> + Send {
        (**self).create(record)
    }

    fn update<T, F>(
        &self,
        uid: &UserId,
        change: F,
    ) -> impl Future<Output = Result<Option<T>, StoreError>> + Send
    where
        F: FnOnce(&mut UserRecord) -> T + Send,
        T: Send,
    {
        (**self).update(uid, change)
    }

    fn delete(&self, uid: &UserId) -> impl Future<Output = Result<bool, StoreError>> + Send {
        (**self).delete(uid)
    }
}


#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[tokio::test]
    async fn put_get_delete() {
        let store = MemoryStore::new();
        let uid = UserId::from("u1");
        assert!(store.get(&uid).await.unwrap_or_default().is_none());

        let record = UserRecord::new(uid.clone(), None, Utc::now());
        assert!(store.put(record.clone()).await.is_ok());
        assert_eq!(store.get(&uid).await.unwrap_or_default(), Some(record));
        assert_eq!(store.len().await, 1);

        assert!(store.delete(&uid).await.unwrap_or(false));
        assert!(!store.delete(&uid).await.unwrap_or(true));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn create_never_overwrites() {
        let store = MemoryStore::new();
        let uid = UserId::from("u1");
        let mut first = UserRecord::new(uid.clone(), None, Utc::now());
        first.score = 10;
        assert!(matches!(store.create(first).await, Ok(true)));

        let second = UserRecord::new(uid.clone(), Some("x@example.com".to_owned()), Utc::now());
        assert!(matches!(store.create(second).await, Ok(false)));
        assert!(store.get(&uid).await.is_ok_and(|r| r.is_some_and(|r| r.score == 10)));
    }

    #[tokio::test]
    async fn update_missing_record_is_none() {
        let store = MemoryStore::new();
        let touched = store
            .update(&UserId::from("ghost"), |r| r.add_score(5))
            .await;
        assert!(matches!(touched, Ok(None)));
        assert!(store.is_empty().await);
    }
}
