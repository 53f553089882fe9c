//! In-memory account registry

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::ledger::Account;
use crate::traits::*;
use crate::types::*;

/// In-memory storage backed by a single synchronized map
///
/// A `BTreeMap` keeps listing order deterministic. Keys sort as strings, which
/// matches issue order only while identifiers fit the configured padding
/// width; wider identifiers sort lexically.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    accounts: Arc<RwLock<BTreeMap<String, Arc<Account>>>>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> LedgerResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, BTreeMap<String, Arc<Account>>>> {
        self.accounts
            .read()
            .map_err(|_| LedgerError::Storage("account registry lock poisoned".to_string()))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, BTreeMap<String, Arc<Account>>>> {
        self.accounts
            .write()
            .map_err(|_| LedgerError::Storage("account registry lock poisoned".to_string()))
    }
}

impl AccountStore for MemoryStorage {
    fn insert(&self, account: Arc<Account>) -> LedgerResult<()> {
        let mut accounts = self.write()?;
        if accounts.contains_key(account.id()) {
            return Err(LedgerError::IdentifierCollision(account.id().to_string()));
        }
        accounts.insert(account.id().to_string(), account);
        Ok(())
    }

    fn get(&self, account_id: &str) -> LedgerResult<Option<Arc<Account>>> {
        Ok(self.read()?.get(account_id).cloned())
    }

    fn contains(&self, account_id: &str) -> LedgerResult<bool> {
        Ok(self.read()?.contains_key(account_id))
    }

    fn remove(&self, account_id: &str) -> LedgerResult<bool> {
        Ok(self.write()?.remove(account_id).is_some())
    }

    fn list(&self) -> LedgerResult<Vec<Arc<Account>>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn len(&self) -> LedgerResult<usize> {
        Ok(self.read()?.len())
    }
}
