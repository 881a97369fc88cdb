use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::{checked_sum, round_cents, LedgerError, LedgerResult};
use crate::models::{PersonLimit, Purchase};

/// Split the cost of `expenses` among everyone in `limits`, weighted by each
/// person's share of the summed limits. Only the amounts are used; who is
/// responsible for each purchase plays no part.
pub(crate) fn divide_proportionally<'a, I>(
    expenses: I,
    limits: &[PersonLimit],
) -> LedgerResult<BTreeMap<String, Decimal>>
where
    I: IntoIterator<Item = &'a Purchase>,
{
    let weights: BTreeMap<String, Decimal> = limits
        .iter()
        .filter(|l| !l.is_personal())
        .map(|l| (l.person.clone(), l.limit))
        .collect();
    divide_amounts(expenses.into_iter().map(|p| p.amount), &weights)
}

/// Each expense share is rounded to cents per person before it is added, so the
/// owed totals can drift from the pool by at most half a cent per
/// (expense, person) pair. Everyone in `limits` appears in the result, including
/// people with a zero limit.
pub(crate) fn divide_amounts<I>(
    amounts: I,
    limits: &BTreeMap<String, Decimal>,
) -> LedgerResult<BTreeMap<String, Decimal>>
where
    I: IntoIterator<Item = Decimal>,
{
    if let Some((person, &limit)) = limits.iter().find(|(_, l)| **l < Decimal::ZERO) {
        return Err(LedgerError::InvalidLimit {
            person: person.clone(),
            limit,
        });
    }
    let total_limits = limits
        .values()
        .try_fold(Decimal::ZERO, |acc, l| checked_sum(acc, *l, "summing limits"))?;
    if total_limits <= Decimal::ZERO {
        return Err(LedgerError::DegenerateAllocation);
    }

    let mut owed: BTreeMap<String, Decimal> = limits
        .keys()
        .map(|person| (person.clone(), Decimal::ZERO))
        .collect();

    for amount in amounts {
        for (person, limit) in limits {
            let share = amount
                .checked_mul(*limit)
                .and_then(|weighted| weighted.checked_div(total_limits))
                .map(round_cents)
                .ok_or(LedgerError::Overflow("weighting an expense"))?;
            if let Some(total) = owed.get_mut(person) {
                *total = checked_sum(*total, share, "adding up shares")?;
            }
        }
    }

    Ok(owed)
}

#[cfg(test)]
#[path = "divide_tests.rs"]
mod tests;
