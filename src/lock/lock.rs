use super::LockError;

/// A single per-match lock.
///
/// Held for the whole load → apply → commit span of one command so that two
/// commands against the same match never observe the same pre-state.
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self) -> Result<(), LockError>;

    /// Try to acquire the lock without blocking.
    /// Returns `Ok(true)` if acquired, `Ok(false)` if already held.
    fn try_lock(&self) -> Result<bool, LockError>;

    /// Release the lock. Releasing an unheld lock is a no-op.
    fn unlock(&self) -> Result<(), LockError>;
}
