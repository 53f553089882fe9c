//! Main ledger orchestrator that owns the account registry

use bigdecimal::BigDecimal;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::LedgerConfig;
use crate::ledger::{Account, IdGenerator};
use crate::traits::*;
use crate::types::*;
use crate::utils::memory_storage::MemoryStorage;
use crate::utils::validation::validate_phone;

/// Registry of accounts plus the identifier space they are drawn from
pub struct Ledger<S: AccountStore = MemoryStorage> {
    storage: S,
    ids: Arc<IdGenerator>,
    validator: Box<dyn AccountValidator>,
    config: LedgerConfig,
}

impl Ledger<MemoryStorage> {
    /// Create an empty in-memory ledger with the default configuration
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create an empty in-memory ledger with a custom configuration
    pub fn with_config(config: LedgerConfig) -> Self {
        Self::with_storage(MemoryStorage::new(), config)
    }
}

impl Default for Ledger<MemoryStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AccountStore> Ledger<S> {
    /// Create a ledger over the given storage backend
    pub fn with_storage(storage: S, config: LedgerConfig) -> Self {
        Self {
            storage,
            ids: Arc::new(IdGenerator::new(&config)),
            validator: Box::new(DefaultAccountValidator),
            config,
        }
    }

    /// Replace the account validator
    pub fn with_validator(mut self, validator: Box<dyn AccountValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Identifier service shared with request queues
    pub fn id_generator(&self) -> Arc<IdGenerator> {
        Arc::clone(&self.ids)
    }

    /// Open a new account with a freshly generated identifier
    ///
    /// Validation happens before an identifier is drawn, so a rejected phone
    /// consumes nothing whichever validator is installed.
    pub fn create(
        &self,
        holder_name: &str,
        phone: &str,
        secret: &str,
    ) -> LedgerResult<Arc<Account>> {
        validate_phone(phone)?;
        self.validator.validate_new_account(holder_name, phone)?;

        loop {
            let id = self.ids.next_id();
            if self.storage.contains(&id)? {
                warn!(account_id = %id, "identifier already registered, skipping");
                continue;
            }

            let account = Arc::new(Account::open(id, holder_name, phone, secret)?);
            match self.storage.insert(Arc::clone(&account)) {
                Ok(()) => {
                    info!(account_id = %account.id(), "account created");
                    return Ok(account);
                }
                Err(LedgerError::IdentifierCollision(id)) => {
                    warn!(account_id = %id, "identifier registered concurrently, skipping");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Open an account under an identifier reserved earlier from this ledger
    pub(crate) fn materialize(
        &self,
        reserved_id: &str,
        holder_name: &str,
        phone: &str,
        secret: &str,
    ) -> LedgerResult<Arc<Account>> {
        self.validator.validate_new_account(holder_name, phone)?;

        if !self.ids.is_issued(reserved_id) {
            error!(account_id = %reserved_id, "reserved identifier was never issued");
            return Err(LedgerError::CorruptIdentifier(reserved_id.to_string()));
        }

        let account = Arc::new(Account::open(
            reserved_id.to_string(),
            holder_name,
            phone,
            secret,
        )?);
        if let Err(e) = self.storage.insert(Arc::clone(&account)) {
            error!(account_id = %reserved_id, "failed to register reserved identifier: {e}");
            return Err(e);
        }

        info!(account_id = %reserved_id, "account created from reservation");
        Ok(account)
    }

    /// Get an account by identifier
    pub fn lookup(&self, account_id: &str) -> LedgerResult<Option<Arc<Account>>> {
        self.storage.get(account_id)
    }

    /// Get an account by identifier, returning an error if not found
    pub fn lookup_required(&self, account_id: &str) -> LedgerResult<Arc<Account>> {
        self.storage
            .get(account_id)?
            .ok_or_else(|| LedgerError::AccountNotFound(account_id.to_string()))
    }

    /// Remove an account from the registry
    ///
    /// Records already written to counterpart histories are left untouched.
    pub fn delete(&self, account_id: &str) -> LedgerResult<bool> {
        let removed = self.storage.remove(account_id)?;
        if removed {
            info!(account_id, "account deleted");
        }
        Ok(removed)
    }

    /// Iterate over a snapshot of all accounts in identifier order
    pub fn list_all(&self) -> LedgerResult<impl Iterator<Item = Arc<Account>>> {
        Ok(self.storage.list()?.into_iter())
    }

    /// Transfer between two registered accounts
    pub fn transfer(&self, from_id: &str, to_id: &str, amount: &BigDecimal) -> LedgerResult<()> {
        let from = self.lookup_required(from_id)?;
        let to = self.lookup_required(to_id)?;
        from.transfer(&to, amount)
    }

    /// Accrue interest on every registered account
    ///
    /// Returns the number of accounts credited.
    pub fn apply_interest_to_all(&self) -> LedgerResult<usize> {
        self.config.validate()?;

        let mut credited = 0;
        for account in self.storage.list()? {
            account.apply_interest_with(&self.config)?;
            credited += 1;
        }
        info!(accounts = credited, rate = %self.config.annual_interest_rate, "interest applied");
        Ok(credited)
    }

    /// Sum of all registered balances
    pub fn total_balance(&self) -> LedgerResult<BigDecimal> {
        let mut total = BigDecimal::from(0);
        for account in self.storage.list()? {
            total += account.balance()?;
        }
        Ok(total)
    }

    pub fn len(&self) -> LedgerResult<usize> {
        self.storage.len()
    }

    pub fn is_empty(&self) -> LedgerResult<bool> {
        self.storage.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::transaction;
    use crate::utils::validation::EnhancedAccountValidator;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_create_registers_account() {
        let ledger = Ledger::new();
        let account = ledger.create("Alice", "01234567890", "pw").unwrap();

        assert_eq!(account.id(), "ACC000001");
        assert_eq!(account.holder_name(), "Alice");
        assert_eq!(account.balance().unwrap(), BigDecimal::from(0));

        let statement = account.statement().unwrap();
        assert_eq!(statement.len(), 1);
        assert_eq!(
            statement.iter().next().unwrap().description,
            transaction::ACCOUNT_CREATED
        );

        let found = ledger.lookup("ACC000001").unwrap().unwrap();
        assert!(Arc::ptr_eq(&found, &account));
    }

    #[test]
    fn test_create_with_invalid_phone_consumes_no_identifier() {
        let ledger = Ledger::new();

        assert!(matches!(
            ledger.create("Alice", "123", "pw"),
            Err(LedgerError::InvalidPhone(_))
        ));
        assert!(ledger.is_empty().unwrap());
        assert_eq!(ledger.id_generator().issued(), 0);

        let account = ledger.create("Alice", "01234567890", "pw").unwrap();
        assert_eq!(account.id(), "ACC000001");
    }

    struct AcceptEverything;

    impl AccountValidator for AcceptEverything {
        fn validate_new_account(&self, _holder_name: &str, _phone: &str) -> LedgerResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_permissive_validator_still_checks_phone_first() {
        let ledger = Ledger::new().with_validator(Box::new(AcceptEverything));

        assert!(matches!(
            ledger.create("A", "123", "pw"),
            Err(LedgerError::InvalidPhone(_))
        ));
        assert_eq!(ledger.id_generator().issued(), 0);
        assert!(ledger.is_empty().unwrap());
    }

    #[test]
    fn test_create_skips_identifiers_already_in_storage() {
        let storage = MemoryStorage::new();
        let existing =
            Account::open("ACC000001".to_string(), "Old", "01234567890", "pw").unwrap();
        storage.insert(Arc::new(existing)).unwrap();

        let ledger = Ledger::with_storage(storage, LedgerConfig::default());
        let account = ledger.create("New", "01234567890", "pw").unwrap();

        assert_eq!(account.id(), "ACC000002");
        assert_eq!(ledger.len().unwrap(), 2);
    }

    #[test]
    fn test_delete_never_reuses_identifiers() {
        let ledger = Ledger::new();
        let first = ledger.create("Alice", "01234567890", "pw").unwrap();

        assert!(ledger.delete(first.id()).unwrap());
        assert!(!ledger.delete(first.id()).unwrap());
        assert!(ledger.lookup(first.id()).unwrap().is_none());

        let second = ledger.create("Bob", "01234567891", "pw").unwrap();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_delete_keeps_counterpart_history() {
        let ledger = Ledger::new();
        let a = ledger.create("Alice", "01234567890", "pw").unwrap();
        let b = ledger.create("Bob", "01234567891", "pw").unwrap();
        a.deposit(&dec("20")).unwrap();
        a.transfer(&b, &dec("5")).unwrap();

        ledger.delete(a.id()).unwrap();

        let last = b.statement().unwrap().into_iter().last().unwrap();
        assert_eq!(last.description, format!("TRANSFER_FROM:{}", a.id()));
        assert_eq!(b.balance().unwrap(), dec("5"));
    }

    #[test]
    fn test_list_all_is_ordered() {
        let ledger = Ledger::new();
        for phone in ["01234567890", "01234567891", "01234567892"] {
            ledger.create("Holder", phone, "pw").unwrap();
        }

        let ids: Vec<String> = ledger
            .list_all()
            .unwrap()
            .map(|a| a.id().to_string())
            .collect();
        assert_eq!(ids, vec!["ACC000001", "ACC000002", "ACC000003"]);
    }

    #[test]
    fn test_transfer_by_identifier() {
        let ledger = Ledger::new();
        let a = ledger.create("Alice", "01234567890", "pw").unwrap();
        let b = ledger.create("Bob", "01234567891", "pw").unwrap();
        a.deposit(&dec("10")).unwrap();

        ledger.transfer(a.id(), b.id(), &dec("3")).unwrap();
        assert_eq!(b.balance().unwrap(), dec("3"));

        assert!(matches!(
            ledger.transfer(a.id(), "ACC999999", &dec("1")),
            Err(LedgerError::AccountNotFound(id)) if id == "ACC999999"
        ));
        assert_eq!(a.balance().unwrap(), dec("7"));
    }

    #[test]
    fn test_apply_interest_to_all() {
        let ledger = Ledger::new();
        let a = ledger.create("Alice", "01234567890", "pw").unwrap();
        let b = ledger.create("Bob", "01234567891", "pw").unwrap();
        a.deposit(&dec("365")).unwrap();

        assert_eq!(ledger.apply_interest_to_all().unwrap(), 2);

        assert_eq!(a.balance().unwrap(), dec("365.05"));
        assert_eq!(b.balance().unwrap(), dec("0"));
        assert_eq!(b.history_len().unwrap(), 2);
    }

    #[test]
    fn test_interest_follows_config() {
        let config = LedgerConfig::default().with_annual_rate(dec("0.73"));
        let ledger = Ledger::with_config(config);
        let a = ledger.create("Alice", "01234567890", "pw").unwrap();
        a.deposit(&dec("100")).unwrap();

        ledger.apply_interest_to_all().unwrap();
        assert_eq!(a.balance().unwrap(), dec("100.2"));
    }

    #[test]
    fn test_interest_sweep_rejects_zero_day_year() {
        let config = LedgerConfig {
            days_per_year: 0,
            ..LedgerConfig::default()
        };
        let ledger = Ledger::with_config(config);
        let a = ledger.create("Alice", "01234567890", "pw").unwrap();
        a.deposit(&dec("10")).unwrap();

        assert!(matches!(
            ledger.apply_interest_to_all(),
            Err(LedgerError::Validation(_))
        ));
        assert_eq!(a.balance().unwrap(), dec("10"));
        assert_eq!(a.history_len().unwrap(), 2);
    }

    #[test]
    fn test_materialize_checks_reservation() {
        let ledger = Ledger::new();
        let reserved = ledger.id_generator().next_id();

        assert!(matches!(
            ledger.materialize("ACC000050", "X", "01234567890", "pw"),
            Err(LedgerError::CorruptIdentifier(_))
        ));

        ledger
            .materialize(&reserved, "X", "01234567890", "pw")
            .unwrap();
        let err = ledger
            .materialize(&reserved, "X", "01234567890", "pw")
            .unwrap_err();
        assert!(matches!(err, LedgerError::IdentifierCollision(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_custom_validator() {
        let ledger = Ledger::new().with_validator(Box::new(EnhancedAccountValidator));

        assert!(matches!(
            ledger.create("", "01234567890", "pw"),
            Err(LedgerError::Validation(_))
        ));
        assert!(ledger.create("Alice", "01234567890", "pw").is_ok());
    }

    #[test]
    fn test_total_balance() {
        let ledger = Ledger::new();
        let a = ledger.create("Alice", "01234567890", "pw").unwrap();
        let b = ledger.create("Bob", "01234567891", "pw").unwrap();
        a.deposit(&dec("10.5")).unwrap();
        b.deposit(&dec("4.5")).unwrap();
        a.transfer(&b, &dec("2")).unwrap();

        assert_eq!(ledger.total_balance().unwrap(), dec("15"));
    }
}
