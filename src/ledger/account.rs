//! Account state and balance-changing operations

use bigdecimal::BigDecimal;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::config::LedgerConfig;
use crate::ledger::transaction::{self, Statement};
use crate::types::*;
use crate::utils::validation::{validate_phone, validate_positive_amount};

/// Balance and history, always mutated together under the account lock
#[derive(Debug)]
struct AccountState {
    balance: BigDecimal,
    history: Vec<TransactionRecord>,
}

impl AccountState {
    fn credit(&mut self, amount: BigDecimal, description: impl Into<String>) {
        self.balance += &amount;
        self.history.push(TransactionRecord::new(description, amount));
    }

    fn debit(&mut self, amount: &BigDecimal, description: impl Into<String>) -> LedgerResult<()> {
        if self.balance < *amount {
            return Err(LedgerError::InsufficientFunds {
                requested: amount.clone(),
                available: self.balance.clone(),
            });
        }
        self.balance -= amount;
        self.history
            .push(TransactionRecord::new(description, -amount.clone()));
        Ok(())
    }
}

/// A named, credentialed balance holder with an append-only history
///
/// Accounts are shared behind `Arc` by the ledger; every operation takes
/// `&self` and serializes on the account's own lock.
pub struct Account {
    id: String,
    holder_name: String,
    phone: String,
    secret: String,
    state: Mutex<AccountState>,
}

impl Account {
    /// Construct an account with a zero balance and its creation record
    pub(crate) fn open(
        id: String,
        holder_name: impl Into<String>,
        phone: impl Into<String>,
        secret: impl Into<String>,
    ) -> LedgerResult<Self> {
        let phone = phone.into();
        validate_phone(&phone)?;

        let mut state = AccountState {
            balance: BigDecimal::from(0),
            history: Vec::new(),
        };
        state.credit(BigDecimal::from(0), transaction::ACCOUNT_CREATED);

        Ok(Self {
            id,
            holder_name: holder_name.into(),
            phone,
            secret: secret.into(),
            state: Mutex::new(state),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Check a secret against the stored credential
    pub fn verify_credential(&self, secret: &str) -> bool {
        self.secret == secret
    }

    /// Current balance
    pub fn balance(&self) -> LedgerResult<BigDecimal> {
        Ok(self.state()?.balance.clone())
    }

    /// Number of records in the history
    pub fn history_len(&self) -> LedgerResult<usize> {
        Ok(self.state()?.history.len())
    }

    /// Credit the account
    pub fn deposit(&self, amount: &BigDecimal) -> LedgerResult<()> {
        validate_positive_amount(amount)?;

        let mut state = self.state()?;
        state.credit(amount.clone(), transaction::DEPOSIT);

        debug!(account_id = %self.id, %amount, balance = %state.balance, "deposit");
        Ok(())
    }

    /// Debit the account; nothing changes when funds are insufficient
    pub fn withdraw(&self, amount: &BigDecimal) -> LedgerResult<()> {
        validate_positive_amount(amount)?;

        let mut state = self.state()?;
        if let Err(e) = state.debit(amount, transaction::WITHDRAWAL) {
            debug!(account_id = %self.id, %amount, "withdrawal rejected: {e}");
            return Err(e);
        }

        debug!(account_id = %self.id, %amount, balance = %state.balance, "withdrawal");
        Ok(())
    }

    /// Move `amount` from this account to `other` as one atomic step
    ///
    /// Both locks are taken in identifier order, so opposite-direction
    /// transfers between the same pair cannot deadlock.
    pub fn transfer(&self, other: &Account, amount: &BigDecimal) -> LedgerResult<()> {
        validate_positive_amount(amount)?;
        if self.id == other.id {
            return Err(LedgerError::SelfTransfer(self.id.clone()));
        }

        let (mut source, mut target) = if self.id < other.id {
            let source = self.state()?;
            (source, other.state()?)
        } else {
            let target = other.state()?;
            (self.state()?, target)
        };

        if let Err(e) = source.debit(amount, transaction::transfer_to(&other.id)) {
            debug!(from = %self.id, to = %other.id, %amount, "transfer rejected: {e}");
            return Err(e);
        }
        target.credit(amount.clone(), transaction::transfer_from(&self.id));

        debug!(from = %self.id, to = %other.id, %amount, "transfer");
        Ok(())
    }

    /// Accrue one day of interest at the default 5% annual rate
    pub fn apply_interest(&self) -> LedgerResult<BigDecimal> {
        self.apply_interest_with(&LedgerConfig::default())
    }

    /// Accrue one period of interest using the rate and precision in `config`
    ///
    /// Returns the credited amount. A zero balance still records a zero
    /// interest entry.
    pub fn apply_interest_with(&self, config: &LedgerConfig) -> LedgerResult<BigDecimal> {
        let daily_rate = config.daily_rate()?;

        let mut state = self.state()?;
        let interest = (&state.balance * &daily_rate).round(config.interest_scale);
        state.credit(interest.clone(), transaction::INTEREST);

        debug!(account_id = %self.id, %interest, balance = %state.balance, "interest");
        Ok(interest)
    }

    /// Copy of the history, oldest record first
    pub fn statement(&self) -> LedgerResult<Statement> {
        let state = self.state()?;
        Ok(Statement::new(self.id.clone(), state.history.clone()))
    }

    /// Serializable view of the account without its credential
    pub fn snapshot(&self) -> LedgerResult<AccountSnapshot> {
        let state = self.state()?;
        Ok(AccountSnapshot {
            id: self.id.clone(),
            holder_name: self.holder_name.clone(),
            phone: self.phone.clone(),
            balance: state.balance.clone(),
            history: state.history.clone(),
        })
    }

    fn state(&self) -> LedgerResult<MutexGuard<'_, AccountState>> {
        self.state
            .lock()
            .map_err(|_| LedgerError::Storage(format!("account {} lock poisoned", self.id)))
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("holder_name", &self.holder_name)
            .field("phone", &self.phone)
            .field("secret", &"<redacted>")
            .field("state", &self.state)
            .finish()
    }
}
