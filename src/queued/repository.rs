use std::sync::Arc;

use tracing::debug;

use crate::entity::{Committable, Entity};
use crate::lock::{InMemoryLockManager, Lock, LockManager};
use crate::repository::{Commit, Find, Get, RepositoryError};

/// Options for read operations.
#[derive(Debug, Clone, Copy)]
pub struct ReadOpts {
    /// Whether to acquire the entity's lock.
    pub lock: bool,
}

impl Default for ReadOpts {
    fn default() -> Self {
        Self { lock: true }
    }
}

impl ReadOpts {
    /// Create options that skip locking.
    pub fn no_lock() -> Self {
        Self { lock: false }
    }
}

/// Serialises read-modify-write cycles per entity.
///
/// `get` blocks until the entity's lock is free and keeps it held; the lock is
/// released by a successful `commit` or by an explicit `unlock`/`abort`.
/// `find` never locks: listing is a read-only view.
pub struct QueuedRepository<R, L: LockManager = InMemoryLockManager> {
    inner: R,
    lock_manager: L,
}

impl<R> QueuedRepository<R> {
    pub fn new(inner: R) -> Self {
        QueuedRepository {
            inner,
            lock_manager: InMemoryLockManager::new(),
        }
    }
}

impl<R, L: LockManager> QueuedRepository<R, L> {
    /// Create a `QueuedRepository` with a custom lock manager.
    pub fn with_lock_manager(inner: R, lock_manager: L) -> Self {
        QueuedRepository {
            inner,
            lock_manager,
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn lock_manager(&self) -> &L {
        &self.lock_manager
    }

    pub fn unlock(&self, id: impl AsRef<str>) -> Result<(), RepositoryError> {
        let lock = self.ensure_lock(id.as_ref())?;
        lock.unlock()?;
        Ok(())
    }

    pub fn abort(&self, id: impl AsRef<str>) -> Result<(), RepositoryError> {
        debug!(entity_id = id.as_ref(), "aborting queued update");
        self.unlock(id)
    }

    fn ensure_lock(&self, id: &str) -> Result<Arc<L::Lock>, RepositoryError> {
        Ok(self.lock_manager.get_lock(id)?)
    }
}

impl<R: Get, L: LockManager> QueuedRepository<R, L> {
    pub fn get_with(&self, id: &str, opts: ReadOpts) -> Result<Option<Entity>, RepositoryError> {
        if !opts.lock {
            return self.inner.get(id);
        }

        let lock = self.ensure_lock(id)?;
        lock.lock()?;
        match self.inner.get(id) {
            Ok(entity) => Ok(entity),
            Err(err) => {
                lock.unlock()?;
                Err(err)
            }
        }
    }
}

impl<R: Get, L: LockManager> Get for QueuedRepository<R, L> {
    fn get(&self, id: &str) -> Result<Option<Entity>, RepositoryError> {
        self.get_with(id, ReadOpts::default())
    }
}

impl<R: Find, L: LockManager> Find for QueuedRepository<R, L> {
    fn find<F>(&self, predicate: F) -> Result<Vec<Entity>, RepositoryError>
    where
        F: Fn(&Entity) -> bool,
    {
        self.inner.find(predicate)
    }
}

impl<R: Commit, L: LockManager> Commit for QueuedRepository<R, L> {
    fn commit<C: Committable + ?Sized>(&self, committable: &mut C) -> Result<(), RepositoryError> {
        let mut locks = Vec::new();
        for entity in committable.entities_mut() {
            locks.push(self.ensure_lock(entity.id())?);
        }

        let result = self.inner.commit(committable);

        // Locks stay held on failure; the caller decides whether to abort.
        if result.is_ok() {
            for lock in locks {
                lock.unlock()?;
            }
        }

        result
    }
}

/// Repositories whose reads hold a lock that must be released on failure.
pub trait Unlock {
    fn unlock(&self, id: &str) -> Result<(), RepositoryError>;
}

impl<R, L: LockManager> Unlock for QueuedRepository<R, L> {
    fn unlock(&self, id: &str) -> Result<(), RepositoryError> {
        QueuedRepository::unlock(self, id)
    }
}

/// Builder trait for wrapping a repository with queue locking.
pub trait Queueable: Sized {
    fn queued(self) -> QueuedRepository<Self> {
        QueuedRepository::new(self)
    }

    fn queued_with<L: LockManager>(self, lock_manager: L) -> QueuedRepository<Self, L> {
        QueuedRepository::with_lock_manager(self, lock_manager)
    }
}

impl<T> Queueable for T {}
