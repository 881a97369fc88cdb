use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::{checked_sum, month, round_cents, LedgerError, LedgerResult};
use crate::models::{PersonLimit, Purchase};

/// Spending against limit for one person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct PersonSummary {
    pub(crate) total_spent: Decimal,
    pub(crate) limit: Decimal,
    pub(crate) remaining: Decimal,
}

impl PersonSummary {
    fn new(total_spent: Decimal, limit: Decimal) -> LedgerResult<Self> {
        let remaining = limit
            .checked_sub(total_spent)
            .ok_or(LedgerError::Overflow("computing the remaining limit"))?;
        Ok(Self {
            total_spent,
            limit,
            remaining,
        })
    }

    pub(crate) fn is_over_limit(&self) -> bool {
        self.remaining < Decimal::ZERO
    }
}

/// Per-person totals for everyone who either spent or has a limit.
///
/// People without a limit get a limit of zero. Amounts are rounded to cents
/// before they are added, so the result does not depend on input order.
pub(crate) fn summarize<'a, I>(
    purchases: I,
    limits: &[PersonLimit],
) -> LedgerResult<BTreeMap<String, PersonSummary>>
where
    I: IntoIterator<Item = &'a Purchase>,
{
    let mut spent: BTreeMap<String, Decimal> = BTreeMap::new();
    for purchase in purchases {
        let total = spent.entry(purchase.responsible.clone()).or_default();
        *total = checked_sum(*total, round_cents(purchase.amount), "summing purchases")?;
    }

    let mut limit_of: BTreeMap<String, Decimal> = BTreeMap::new();
    for l in limits.iter().filter(|l| !l.is_personal()) {
        limit_of.insert(l.person.clone(), l.limit);
        spent.entry(l.person.clone()).or_default();
    }

    spent
        .into_iter()
        .map(|(person, total)| {
            let limit = limit_of.get(&person).copied().unwrap_or(Decimal::ZERO);
            Ok((person, PersonSummary::new(total, limit)?))
        })
        .collect()
}

/// Single-limit view: every purchase counts, whoever is responsible.
/// Restricted to one "YYYY-MM" bucket when `month` is given.
pub(crate) fn personal_report(
    purchases: &[Purchase],
    limit: Decimal,
    month: Option<&str>,
) -> LedgerResult<PersonSummary> {
    let selected: Vec<&Purchase> = match month {
        Some(m) => month::in_month(purchases, m),
        None => purchases.iter().collect(),
    };
    let total = selected.into_iter().try_fold(Decimal::ZERO, |acc, p| {
        checked_sum(acc, round_cents(p.amount), "summing purchases")
    })?;
    PersonSummary::new(total, limit)
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
