use super::month::month_bucket;
use crate::models::Purchase;

/// Optional criteria a purchase must match. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PurchaseFilter {
    pub(crate) card: Option<String>,
    pub(crate) person: Option<String>,
    pub(crate) category: Option<String>,
    /// Format: "YYYY-MM"
    pub(crate) month: Option<String>,
}

impl PurchaseFilter {
    pub(crate) fn is_empty(&self) -> bool {
        self.card.is_none()
            && self.person.is_none()
            && self.category.is_none()
            && self.month.is_none()
    }

    pub(crate) fn matches(&self, purchase: &Purchase) -> bool {
        let field_ok =
            |want: &Option<String>, have: &str| want.as_deref().map_or(true, |w| w == have);

        field_ok(&self.card, &purchase.card)
            && field_ok(&self.person, &purchase.responsible)
            && field_ok(&self.category, &purchase.category)
            && self
                .month
                .as_deref()
                .map_or(true, |m| month_bucket(&purchase.date).as_deref() == Some(m))
    }

    pub(crate) fn apply<'a>(&self, purchases: &'a [Purchase]) -> Vec<&'a Purchase> {
        purchases.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
