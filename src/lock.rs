//! Busy flag for operations that should not run twice at once.
//!
//! [`AdvisoryLock::try_lock`] answers "already running" without waiting by
//! reading an atomic flag first; only when the flag is clear does it take the
//! mutex and set the flag. The mutex is the real exclusion boundary. Two
//! callers can both see a clear flag before either takes the mutex, and then
//! both succeed. Callers use this for "ignore the key press while busy", not
//! for protecting data.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LockError {
    #[error("already locking")]
    AlreadyLocking,
}

#[derive(Debug, Default)]
pub struct AdvisoryLock {
    mutex: Mutex<()>,
    locking: AtomicBool,
}

impl AdvisoryLock {
    pub const fn new() -> Self {
        Self {
            mutex: Mutex::new(()),
            locking: AtomicBool::new(false),
        }
    }

    /// Mark the resource busy, or fail immediately if it already is.
    pub fn try_lock(&self) -> Result<(), LockError> {
        if self.locking.load(Ordering::Acquire) {
            return Err(LockError::AlreadyLocking);
        }
        let _guard = self.mutex.lock();
        self.locking.store(true, Ordering::Release);
        Ok(())
    }

    /// Mark the resource free again.
    pub fn unlock(&self) {
        let _guard = self.mutex.lock();
        self.locking.store(false, Ordering::Release);
    }

    pub fn is_locking(&self) -> bool {
        let _guard = self.mutex.lock();
        self.locking.load(Ordering::Acquire)
    }

    /// [`try_lock`](Self::try_lock) returning a guard that unlocks on drop.
    pub fn try_guard(&self) -> Result<AdvisoryGuard<'_>, LockError> {
        self.try_lock()?;
        Ok(AdvisoryGuard { lock: self })
    }
}

/// Unlocks its [`AdvisoryLock`] when dropped.
#[derive(Debug)]
pub struct AdvisoryGuard<'a> {
    lock: &'a AdvisoryLock,
}

impl Drop for AdvisoryGuard<'_> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}
