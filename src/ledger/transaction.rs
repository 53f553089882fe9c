//! Transaction labels and account statements

use crate::types::TransactionRecord;

/// Label of the zero-amount record every account starts with
pub const ACCOUNT_CREATED: &str = "ACCOUNT CREATED";
/// Label of a deposit credit
pub const DEPOSIT: &str = "DEPOSIT";
/// Label of a withdrawal debit
pub const WITHDRAWAL: &str = "WITHDRAWAL";
/// Label of an interest credit
pub const INTEREST: &str = "INTEREST";

/// Description of the debit side of a transfer
pub fn transfer_to(counterpart_id: &str) -> String {
    format!("TRANSFER_TO:{counterpart_id}")
}

/// Description of the credit side of a transfer
pub fn transfer_from(counterpart_id: &str) -> String {
    format!("TRANSFER_FROM:{counterpart_id}")
}

/// Counterpart identifier encoded in a transfer description, if any
pub fn transfer_counterpart(description: &str) -> Option<&str> {
    description
        .strip_prefix("TRANSFER_TO:")
        .or_else(|| description.strip_prefix("TRANSFER_FROM:"))
}

/// Point-in-time copy of an account's history in chronological order
///
/// Iterating does not consume the statement, so it can be walked any number
/// of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    account_id: String,
    records: Vec<TransactionRecord>,
}

impl Statement {
    pub(crate) fn new(account_id: String, records: Vec<TransactionRecord>) -> Self {
        Self {
            account_id,
            records,
        }
    }

    /// Identifier of the account this statement was taken from
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Iterate over the records, oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    /// Render each record as a fixed-width statement line
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.records.iter().map(ToString::to_string)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Statement {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for Statement {
    type Item = TransactionRecord;
    type IntoIter = std::vec::IntoIter<TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
