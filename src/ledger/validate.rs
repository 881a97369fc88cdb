use rust_decimal::Decimal;

use super::{LedgerError, LedgerResult};
use crate::models::Purchase;

/// Check a candidate purchase before it reaches the store.
///
/// Pure: looks only at the description, the amount and the installment fields.
pub(crate) fn validate(candidate: &Purchase) -> LedgerResult<()> {
    if candidate.description.trim().is_empty() {
        return Err(LedgerError::InvalidPurchase("description is empty".into()));
    }
    if candidate.amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidPurchase(format!(
            "amount must be positive, got {}",
            candidate.amount
        )));
    }
    validate_installments(candidate.installment_index, candidate.installment_count)
}

pub(crate) fn validate_installments(index: u32, count: u32) -> LedgerResult<()> {
    if count < 1 || index < 1 || index > count {
        return Err(LedgerError::InvalidInstallment { index, count });
    }
    Ok(())
}

/// Limits may be zero but never negative.
pub(crate) fn validate_limit(person: &str, limit: Decimal) -> LedgerResult<()> {
    if person.trim().is_empty() || limit < Decimal::ZERO {
        return Err(LedgerError::InvalidLimit {
            person: person.to_string(),
            limit,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
