use std::sync::Arc;

use super::{Lock, LockError};

/// Factory for per-key locks.
///
/// `QueuedRepository` asks for one lock per entity id. Repeated calls with the
/// same `id` must return the same logical lock.
pub trait LockManager: Send + Sync {
    type Lock: Lock;

    fn get_lock(&self, id: &str) -> Result<Arc<Self::Lock>, LockError>;
}
