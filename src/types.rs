//! Core types and data structures for the account ledger

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Width the description column is padded to when a record is rendered
pub const STATEMENT_DESCRIPTION_WIDTH: usize = 26;

/// Immutable entry describing one balance change on an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier for the record
    pub id: Uuid,
    /// When the balance change was committed
    pub timestamp: NaiveDateTime,
    /// Free-text label, e.g. `DEPOSIT` or `TRANSFER_TO:<id>`
    pub description: String,
    /// Signed amount: positive for a credit, negative for a debit
    pub amount: BigDecimal,
}

impl TransactionRecord {
    /// Create a new record stamped with the current time
    pub fn new(description: impl Into<String>, amount: BigDecimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: chrono::Utc::now().naive_utc(),
            description: description.into(),
            amount,
        }
    }

    /// Whether this record increased the balance
    pub fn is_credit(&self) -> bool {
        self.amount > BigDecimal::from(0)
    }

    /// Whether this record decreased the balance
    pub fn is_debit(&self) -> bool {
        self.amount < BigDecimal::from(0)
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.amount.round(2).with_scale(2);
        let sign = if amount < BigDecimal::from(0) { "" } else { "+" };
        write!(
            f,
            "[{}] {:<width$} {}{}",
            self.timestamp.format("%Y-%m-%d"),
            self.description,
            sign,
            amount,
            width = STATEMENT_DESCRIPTION_WIDTH
        )
    }
}

/// Lifecycle status of an account request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Waiting for an administrator
    Pending,
    /// Account was provisioned (terminal)
    Approved,
    /// Request was rejected (terminal)
    Denied,
}

impl RequestStatus {
    /// Terminal statuses accept no further transitions
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Denied => "DENIED",
        };
        f.write_str(label)
    }
}

/// Read-only, serializable view of an account
///
/// The credential secret is never part of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub id: String,
    pub holder_name: String,
    pub phone: String,
    pub balance: BigDecimal,
    pub history: Vec<TransactionRecord>,
}

/// Errors that can occur in the ledger system
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid phone number '{0}': expected exactly 11 digits")]
    InvalidPhone(String),
    #[error("Invalid amount {0}: amount must be positive")]
    InvalidAmount(BigDecimal),
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: BigDecimal,
        available: BigDecimal,
    },
    #[error("Account {0} cannot transfer to itself")]
    SelfTransfer(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Account request not found: {0}")]
    RequestNotFound(String),
    #[error("Account request {id} is already {status}")]
    AlreadyResolved { id: String, status: RequestStatus },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Identifier {0} is already registered")]
    IdentifierCollision(String),
    #[error("Identifier {0} was never issued by this ledger")]
    CorruptIdentifier(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Programmer-error conditions that callers should not try to recover from
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LedgerError::IdentifierCollision(_)
                | LedgerError::CorruptIdentifier(_)
                | LedgerError::Storage(_)
        )
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
