use async_trait::async_trait;
use models::OwnedRecord;

use crate::errors::ServiceError;

/// Persistence for one kind of client-owned record.
#[async_trait]
pub trait RecordRepository<M: OwnedRecord>: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<M>, ServiceError>;
    /// Records of `client_id` with the given deleted flag, ascending id.
    async fn find_by_client_id_and_deleted(&self, client_id: i32, deleted: bool) -> Result<Vec<M>, ServiceError>;
    /// Upsert by identity: an unsaved record is inserted and gets its id
    /// from the store, anything else overwrites the row with that id.
    async fn save(&self, record: M) -> Result<M, ServiceError>;
    /// Row holding `code` for tables keyed by owner code; always `None` for
    /// the others. Includes soft-deleted rows; callers decide what deleted
    /// means for them.
    async fn find_by_owner_code(&self, code: &str) -> Result<Option<M>, ServiceError>;
}

/// Simple in-memory mock repository for tests and benches
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
    use std::sync::Mutex;

    pub struct InMemoryRecordRepository<M> {
        rows: Mutex<Vec<M>>, // insertion order == id order
        next_id: AtomicI32,
        saves: AtomicUsize,
    }

    impl<M> Default for InMemoryRecordRepository<M> {
        fn default() -> Self {
            Self { rows: Mutex::new(Vec::new()), next_id: AtomicI32::new(1), saves: AtomicUsize::new(0) }
        }
    }

    impl<M: OwnedRecord> InMemoryRecordRepository<M> {
        /// Insert a fixture row without counting it as a save.
        pub fn seed(&self, mut record: M) -> M {
            if record.is_new() {
                record.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
            }
            self.rows.lock().unwrap().push(record.clone());
            record
        }

        pub fn rows(&self) -> Vec<M> {
            self.rows.lock().unwrap().clone()
        }

        /// Number of `save` calls made through the trait.
        pub fn save_count(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<M: OwnedRecord> RecordRepository<M> for InMemoryRecordRepository<M> {
        async fn find_by_id(&self, id: i32) -> Result<Option<M>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|r| r.id() == id).cloned())
        }

        async fn find_by_client_id_and_deleted(&self, client_id: i32, deleted: bool) -> Result<Vec<M>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|r| r.client_id() == Some(client_id) && r.is_deleted() == deleted)
                .cloned()
                .collect())
        }

        async fn save(&self, mut record: M) -> Result<M, ServiceError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.lock().unwrap();
            if record.is_new() {
                record.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
                rows.push(record.clone());
                return Ok(record);
            }
            match rows.iter_mut().find(|r| r.id() == record.id()) {
                Some(row) => *row = record.clone(),
                None => return Err(ServiceError::Db(format!("no row with id {}", record.id()))),
            }
            Ok(record)
        }

        async fn find_by_owner_code(&self, code: &str) -> Result<Option<M>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|r| r.owner_code() == Some(code)).cloned())
        }
    }
}
