//! Identifier generation shared by the ledger and the request queue

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::LedgerConfig;

/// Monotonic source of account identifiers
///
/// A single generator backs both direct account creation and request
/// reservation, so an identifier is handed out at most once. Gaps are
/// possible (a reserved identifier for a denied request is never used).
#[derive(Debug)]
pub struct IdGenerator {
    prefix: String,
    width: usize,
    first: u64,
    next: AtomicU64,
}

impl IdGenerator {
    /// Create a generator with the identifier format from `config`
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            prefix: config.id_prefix.clone(),
            width: config.id_width,
            first: config.first_id,
            next: AtomicU64::new(config.first_id),
        }
    }

    /// Issue the next identifier
    pub fn next_id(&self) -> String {
        let number = self.next.fetch_add(1, Ordering::SeqCst);
        self.format(number)
    }

    /// Whether `id` has the generator's format and was already handed out
    pub fn is_issued(&self, id: &str) -> bool {
        match self.parse(id) {
            Some(number) => number >= self.first && number < self.next.load(Ordering::SeqCst),
            None => false,
        }
    }

    /// Number of identifiers issued so far
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::SeqCst) - self.first
    }

    fn format(&self, number: u64) -> String {
        format!("{}{:0width$}", self.prefix, number, width = self.width)
    }

    fn parse(&self, id: &str) -> Option<u64> {
        let digits = id.strip_prefix(&self.prefix)?;
        if digits.len() < self.width || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let number = digits.parse().ok()?;
        // Reject alternate spellings such as extra leading zeros
        (self.format(number) == id).then_some(number)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(&LedgerConfig::default())
    }
}
