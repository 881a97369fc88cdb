//! Validation, aggregation and allocation over a ledger snapshot.
//!
//! Nothing here touches the store: every function takes the purchases and
//! limits it works on as arguments.

mod divide;
mod error;
mod filter;
mod month;
mod summary;
mod validate;

use rust_decimal::{Decimal, RoundingStrategy};

pub(crate) use divide::divide_proportionally;
pub(crate) use error::{LedgerError, LedgerResult};
pub(crate) use filter::PurchaseFilter;
pub(crate) use month::{month_bucket, parse_date, sorted_months};
pub(crate) use summary::{personal_report, summarize, PersonSummary};
pub(crate) use validate::{validate, validate_limit};

/// Round to cents, ties to even.
pub(crate) fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Add `value` to `acc`, failing with `Overflow` when the sum does not fit.
pub(crate) fn checked_sum(
    acc: Decimal,
    value: Decimal,
    what: &'static str,
) -> LedgerResult<Decimal> {
    acc.checked_add(value).ok_or(LedgerError::Overflow(what))
}
