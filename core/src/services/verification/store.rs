//! In-memory store of outstanding verification entries

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::entities::VerificationEntry;

use super::types::VerifyOutcome;

/// Mapping from recipient address to at most one live entry
///
/// Every public method takes the lock exactly once, so each operation is
/// atomic per key. No method performs I/O while holding the lock.
#[derive(Debug, Default)]
pub struct VerificationStore {
    entries: Mutex<HashMap<String, VerificationEntry>>,
}

impl VerificationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // A panic elsewhere cannot leave the map half-updated, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, VerificationEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `entry` for `recipient`, returning the entry it replaced
    pub fn insert(&self, recipient: &str, entry: VerificationEntry) -> Option<VerificationEntry> {
        self.lock().insert(recipient.to_string(), entry)
    }

    /// Snapshot of the entry for `recipient`
    pub fn get(&self, recipient: &str) -> Option<VerificationEntry> {
        self.lock().get(recipient).cloned()
    }

    /// Whether an entry exists for `recipient` (expired or not)
    pub fn contains(&self, recipient: &str) -> bool {
        self.lock().contains_key(recipient)
    }

    /// Check `code` for `recipient` at `now`, consuming the entry on success
    /// or when it has expired
    pub fn verify_at(&self, recipient: &str, code: &str, now: DateTime<Utc>) -> VerifyOutcome {
        let mut entries = self.lock();

        let outcome = match entries.get(recipient) {
            None => return VerifyOutcome::NotFound,
            Some(entry) if entry.is_expired_at(now) => VerifyOutcome::Expired,
            Some(entry) if entry.matches(code) => VerifyOutcome::Success,
            Some(_) => return VerifyOutcome::Mismatch,
        };

        entries.remove(recipient);
        outcome
    }

    /// Remove every entry expired at `now`, returning how many were removed
    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    /// Number of outstanding entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
