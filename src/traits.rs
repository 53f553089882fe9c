//! Traits for storage abstraction and extensibility

use std::sync::Arc;

use crate::ledger::Account;
use crate::types::*;
use crate::utils::validation::validate_phone;

/// Registry backend for the ledger
///
/// Keys are account identifiers and every stored account is keyed by its own
/// identifier. Implementations must make `insert` atomic with its collision
/// check.
pub trait AccountStore: Send + Sync {
    /// Register an account, failing if its identifier is already taken
    fn insert(&self, account: Arc<Account>) -> LedgerResult<()>;

    /// Get an account by identifier
    fn get(&self, account_id: &str) -> LedgerResult<Option<Arc<Account>>>;

    /// Whether an identifier is currently registered
    fn contains(&self, account_id: &str) -> LedgerResult<bool>;

    /// Remove an account, returning whether it was registered
    fn remove(&self, account_id: &str) -> LedgerResult<bool>;

    /// Snapshot of all registered accounts in identifier order
    fn list(&self) -> LedgerResult<Vec<Arc<Account>>>;

    /// Number of registered accounts
    fn len(&self) -> LedgerResult<usize>;

    /// Whether no account is registered
    fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// Trait for implementing custom account validation rules
pub trait AccountValidator: Send + Sync {
    /// Validate the fields of an account before it is constructed
    fn validate_new_account(&self, holder_name: &str, phone: &str) -> LedgerResult<()>;
}

/// Default account validator: only the phone pattern is enforced
pub struct DefaultAccountValidator;

impl AccountValidator for DefaultAccountValidator {
    fn validate_new_account(&self, _holder_name: &str, phone: &str) -> LedgerResult<()> {
        validate_phone(phone)
    }
}
