//! # In-Memory Repository
//!
//! Reference implementation of the repository contract, plus a matching
//! transaction manager with staged-write rollback.
//!
//! ## Rollback Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  begin()   every participant opens an undo journal                  │
//! │                                                                     │
//! │  add/update/delete apply to live rows immediately (read-your-       │
//! │  writes inside the scope) and push the inverse op to the journal:   │
//! │                                                                     │
//! │      add(x)     → Undo::Remove(x.key())                             │
//! │      update(x)  → Undo::Restore(previous row)                       │
//! │      delete(x)  → Undo::Reinsert(removed row)                       │
//! │                                                                     │
//! │  commit()   drop the journal, writes stay                           │
//! │  rollback() replay the journal in reverse, writes vanish            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One scope at a time per manager; scopes never span concurrent pipeline
//! invocations (the transaction aspect opens exactly one per outer call).

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use merx_core::error::{Fault, OpResult};
use merx_core::transaction::{TransactionManager, TransactionScope};
use tracing::debug;
use uuid::Uuid;

use crate::data_access::{Keyed, Predicate, Repository};

enum Undo<T> {
    Remove(Uuid),
    Restore(T),
    Reinsert(T),
}

struct Inner<T> {
    rows: HashMap<Uuid, T>,
    /// `Some` while a transaction scope is open.
    journal: Option<Vec<Undo<T>>>,
}

/// Lock-protected in-memory repository.
pub struct MemoryRepository<T> {
    inner: RwLock<Inner<T>>,
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        MemoryRepository {
            inner: RwLock::new(Inner {
                rows: HashMap::new(),
                journal: None,
            }),
        }
    }
}

impl<T: Keyed + Clone> MemoryRepository<T> {
    pub fn new() -> Self {
        MemoryRepository::default()
    }

    /// Bulk insert outside any transaction, for seeding tests and demos.
    pub fn seed(&self, entities: impl IntoIterator<Item = T>) {
        let mut inner = self.write();
        for entity in entities {
            inner.rows.insert(entity.key(), entity);
        }
    }

    // A poisoned lock only means a writer panicked; the rows are still
    // structurally sound, so we keep serving them.
    fn read(&self) -> RwLockReadGuard<'_, Inner<T>> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner<T>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> Repository<T> for MemoryRepository<T>
where
    T: Keyed + Clone + Send + Sync,
{
    fn get(&self, predicate: Predicate<'_, T>) -> OpResult<Option<T>> {
        let inner = self.read();
        Ok(inner.rows.values().find(|row| predicate(row)).cloned())
    }

    fn get_list(&self, predicate: Option<Predicate<'_, T>>) -> OpResult<Vec<T>> {
        let inner = self.read();
        let rows = inner.rows.values();
        Ok(match predicate {
            Some(predicate) => rows.filter(|row| predicate(row)).cloned().collect(),
            None => rows.cloned().collect(),
        })
    }

    fn add(&self, entity: &T) -> OpResult<()> {
        let mut inner = self.write();
        let key = entity.key();
        if inner.rows.contains_key(&key) {
            return Err(Fault::DataAccess(format!("duplicate key: {key}")));
        }
        inner.rows.insert(key, entity.clone());
        if let Some(journal) = inner.journal.as_mut() {
            journal.push(Undo::Remove(key));
        }
        debug!(key = %key, staged = inner.journal.is_some(), "row added");
        Ok(())
    }

    fn update(&self, entity: &T) -> OpResult<()> {
        let mut inner = self.write();
        let key = entity.key();
        let previous = inner
            .rows
            .get(&key)
            .cloned()
            .ok_or_else(|| Fault::DataAccess(format!("no row with key: {key}")))?;
        inner.rows.insert(key, entity.clone());
        if let Some(journal) = inner.journal.as_mut() {
            journal.push(Undo::Restore(previous));
        }
        Ok(())
    }

    fn delete(&self, entity: &T) -> OpResult<()> {
        let mut inner = self.write();
        let key = entity.key();
        let removed = inner
            .rows
            .remove(&key)
            .ok_or_else(|| Fault::DataAccess(format!("no row with key: {key}")))?;
        if let Some(journal) = inner.journal.as_mut() {
            journal.push(Undo::Reinsert(removed));
        }
        Ok(())
    }
}

/// What a repository must expose to take part in a memory transaction.
pub trait TxParticipant: Send + Sync {
    fn tx_begin(&self);
    fn tx_commit(&self);
    fn tx_rollback(&self);
}

impl<T> TxParticipant for MemoryRepository<T>
where
    T: Keyed + Clone + Send + Sync,
{
    fn tx_begin(&self) {
        self.write().journal = Some(Vec::new());
    }

    fn tx_commit(&self) {
        self.write().journal = None;
    }

    fn tx_rollback(&self) {
        let mut inner = self.write();
        let Some(journal) = inner.journal.take() else {
            return;
        };
        debug!(ops = journal.len(), "rolling back staged writes");
        for undo in journal.into_iter().rev() {
            match undo {
                Undo::Remove(key) => {
                    inner.rows.remove(&key);
                }
                Undo::Restore(row) | Undo::Reinsert(row) => {
                    inner.rows.insert(row.key(), row);
                }
            }
        }
    }
}

/// Transaction manager coordinating commit/rollback across the in-memory
/// repositories registered with it.
pub struct MemoryTransactionManager {
    participants: Vec<Arc<dyn TxParticipant>>,
}

impl MemoryTransactionManager {
    pub fn new(participants: Vec<Arc<dyn TxParticipant>>) -> Self {
        MemoryTransactionManager { participants }
    }
}

struct MemoryScope {
    participants: Vec<Arc<dyn TxParticipant>>,
}

impl TransactionScope for MemoryScope {
    fn commit(self: Box<Self>) {
        for participant in &self.participants {
            participant.tx_commit();
        }
    }

    fn rollback(self: Box<Self>) {
        for participant in &self.participants {
            participant.tx_rollback();
        }
    }
}

impl TransactionManager for MemoryTransactionManager {
    fn begin(&self) -> Box<dyn TransactionScope> {
        for participant in &self.participants {
            participant.tx_begin();
        }
        Box::new(MemoryScope {
            participants: self.participants.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Category;

    #[test]
    fn test_crud_round_trip() {
        let repo = MemoryRepository::new();
        let mut category = Category::new("Beverages");
        repo.add(&category).unwrap();

        let found = repo.get(&|c: &Category| c.name == "Beverages").unwrap();
        assert_eq!(found, Some(category.clone()));

        category.name = "Drinks".to_string();
        repo.update(&category).unwrap();
        assert!(repo.get(&|c: &Category| c.name == "Beverages").unwrap().is_none());

        repo.delete(&category).unwrap();
        assert!(repo.get_list(None).unwrap().is_empty());
    }

    #[test]
    fn test_update_of_missing_row_faults() {
        let repo = MemoryRepository::new();
        let category = Category::new("Ghost");
        assert!(matches!(
            repo.update(&category),
            Err(Fault::DataAccess(_))
        ));
    }

    #[test]
    fn test_rollback_reverts_adds_updates_and_deletes() {
        let repo = MemoryRepository::new();
        let mut kept = Category::new("Kept");
        let doomed = Category::new("Doomed");
        repo.seed([kept.clone(), doomed.clone()]);

        repo.tx_begin();
        kept.name = "Renamed".to_string();
        repo.update(&kept).unwrap();
        repo.delete(&doomed).unwrap();
        repo.add(&Category::new("Fresh")).unwrap();
        repo.tx_rollback();

        let mut names: Vec<String> = repo
            .get_list(None)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Doomed".to_string(), "Kept".to_string()]);
    }

    #[test]
    fn test_commit_keeps_staged_writes() {
        let repo = MemoryRepository::new();
        repo.tx_begin();
        repo.add(&Category::new("Beverages")).unwrap();
        repo.tx_commit();
        assert_eq!(repo.get_list(None).unwrap().len(), 1);
    }

    #[test]
    fn test_reads_see_writes_inside_open_scope() {
        let repo = MemoryRepository::new();
        repo.tx_begin();
        repo.add(&Category::new("Beverages")).unwrap();
        assert_eq!(repo.get_list(None).unwrap().len(), 1);
        repo.tx_rollback();
        assert!(repo.get_list(None).unwrap().is_empty());
    }
}
