//! Ledger configuration

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::{LedgerError, LedgerResult};

/// Annual interest rate applied when no configuration overrides it (5%)
pub fn default_annual_rate() -> BigDecimal {
    BigDecimal::from(5) / BigDecimal::from(100)
}

/// Tunables for a [`crate::Ledger`] and its identifier space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Annual interest rate as a fraction (0.05 = 5%)
    pub annual_interest_rate: BigDecimal,
    /// Divisor turning the annual rate into the per-accrual rate
    pub days_per_year: u32,
    /// Fractional digits kept when an interest amount is computed
    pub interest_scale: i64,
    /// Prefix of every generated account identifier
    pub id_prefix: String,
    /// Zero-padded width of the numeric part of an identifier
    pub id_width: usize,
    /// First number handed out by the identifier generator
    pub first_id: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            annual_interest_rate: default_annual_rate(),
            days_per_year: 365,
            interest_scale: 8,
            id_prefix: "ACC".to_string(),
            id_width: 6,
            first_id: 1,
        }
    }
}

impl LedgerConfig {
    /// Override the annual interest rate
    pub fn with_annual_rate(mut self, rate: BigDecimal) -> Self {
        self.annual_interest_rate = rate;
        self
    }

    /// Override the identifier prefix
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Check the interest settings before they are used for an accrual
    pub fn validate(&self) -> LedgerResult<()> {
        if self.annual_interest_rate < BigDecimal::from(0) {
            return Err(LedgerError::Validation(format!(
                "Interest rate cannot be negative: {}",
                self.annual_interest_rate
            )));
        }
        if self.days_per_year == 0 {
            return Err(LedgerError::Validation(
                "Days per year must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Rate applied by a single interest accrual
    pub fn daily_rate(&self) -> LedgerResult<BigDecimal> {
        self.validate()?;
        Ok(&self.annual_interest_rate / BigDecimal::from(self.days_per_year))
    }
}
