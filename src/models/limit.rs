use rust_decimal::Decimal;

/// Limit key reserved for the single-person ledger. Shares the limits table
/// with the per-person entries.
pub(crate) const PERSONAL_KEY: &str = "__personal__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PersonLimit {
    pub(crate) person: String,
    pub(crate) limit: Decimal,
}

impl PersonLimit {
    pub(crate) fn new(person: String, limit: Decimal) -> Self {
        Self { person, limit }
    }

    pub(crate) fn is_personal(&self) -> bool {
        self.person == PERSONAL_KEY
    }
}
