use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::Purchase;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// "YYYY-MM" bucket key for a purchase date, or `None` if the date does not parse.
pub(crate) fn month_bucket(date: &str) -> Option<String> {
    parse_date(date).map(|d| d.format("%Y-%m").to_string())
}

/// Distinct month buckets across `purchases`, most recent first.
/// Purchases with unparseable dates are skipped with a warning.
pub(crate) fn sorted_months(purchases: &[Purchase]) -> Vec<String> {
    let buckets: BTreeSet<String> = purchases.iter().filter_map(bucket_or_warn).collect();
    buckets.into_iter().rev().collect()
}

/// Purchases falling in `month` ("YYYY-MM").
pub(crate) fn in_month<'a>(purchases: &'a [Purchase], month: &str) -> Vec<&'a Purchase> {
    purchases
        .iter()
        .filter(|p| bucket_or_warn(p).as_deref() == Some(month))
        .collect()
}

fn bucket_or_warn(purchase: &Purchase) -> Option<String> {
    let bucket = month_bucket(&purchase.date);
    if bucket.is_none() {
        tracing::warn!(
            id = ?purchase.id,
            date = %purchase.date,
            "skipping purchase with unparseable date"
        );
    }
    bucket
}

#[cfg(test)]
#[path = "month_tests.rs"]
mod tests;
