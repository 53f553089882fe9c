//! Validation utilities

use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Number of digits a contact phone must have
pub const PHONE_DIGITS: usize = 11;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> LedgerResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(LedgerError::InvalidAmount(amount.clone()))
    } else {
        Ok(())
    }
}

/// Validate that a phone number is exactly eleven ASCII digits
pub fn validate_phone(phone: &str) -> LedgerResult<()> {
    if phone.len() == PHONE_DIGITS && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(LedgerError::InvalidPhone(phone.to_string()))
    }
}

/// Validate that an account holder name is valid
pub fn validate_holder_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Account holder name cannot be empty".to_string(),
        ));
    }

    if name.chars().count() > 100 {
        return Err(LedgerError::Validation(
            "Account holder name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}

/// Account validator that also checks the holder name
pub struct EnhancedAccountValidator;

impl AccountValidator for EnhancedAccountValidator {
    fn validate_new_account(&self, holder_name: &str, phone: &str) -> LedgerResult<()> {
        validate_phone(phone)?;
        validate_holder_name(holder_name)?;
        Ok(())
    }
}
