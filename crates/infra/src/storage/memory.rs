//! Process-local secret backend
//!
//! Used by tests and by sessions that must not outlive the process. Storage
//! can be marked unavailable, globally or per key, to exercise degraded
//! paths.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::{KeychainError, SecretBackend};

/// In-memory [`SecretBackend`]; clones share the same storage
#[derive(Debug, Clone, Default)]
pub struct MemoryKeychain {
    storage: Arc<Mutex<HashMap<String, String>>>,
    unavailable: Arc<AtomicBool>,
    failing_keys: Arc<Mutex<HashSet<String>>>,
}

impl MemoryKeychain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail as if the keychain were locked.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make operations on a single key fail.
    pub fn fail_key(&self, key: &str) {
        self.failing_keys.lock().insert(key.to_string());
    }

    /// Undo [`MemoryKeychain::fail_key`] for every key.
    pub fn heal(&self) {
        self.failing_keys.lock().clear();
        self.set_unavailable(false);
    }

    /// Number of stored secrets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.lock().is_empty()
    }

    fn check(&self, key: &str) -> Result<(), KeychainError> {
        if self.unavailable.load(Ordering::SeqCst) || self.failing_keys.lock().contains(key) {
            return Err(KeychainError::AccessFailed(format!("storage unavailable for {key}")));
        }
        Ok(())
    }
}

impl SecretBackend for MemoryKeychain {
    fn get_secret(&self, key: &str) -> Result<String, KeychainError> {
        self.check(key)?;
        self.storage.lock().get(key).cloned().ok_or(KeychainError::NotFound)
    }

    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        self.check(key)?;
        self.storage.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_secret(&self, key: &str) -> Result<(), KeychainError> {
        self.check(key)?;
        self.storage.lock().remove(key);
        Ok(())
    }
}
