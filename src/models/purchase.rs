use rust_decimal::Decimal;

/// Category assigned when a purchase is recorded without one.
pub(crate) const DEFAULT_CATEGORY: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Purchase {
    pub(crate) id: Option<i64>,
    pub(crate) description: String,
    pub(crate) amount: Decimal,
    /// Format: "YYYY-MM-DD"
    pub(crate) date: String,
    pub(crate) responsible: String,
    pub(crate) card: String,
    pub(crate) category: String,
    pub(crate) installment_count: u32,
    pub(crate) installment_index: u32,
}

impl Purchase {
    /// A single-installment purchase in the default category.
    pub(crate) fn new(
        description: String,
        amount: Decimal,
        date: String,
        responsible: String,
        card: String,
    ) -> Self {
        Self {
            id: None,
            description,
            amount,
            date,
            responsible,
            card,
            category: DEFAULT_CATEGORY.to_string(),
            installment_count: 1,
            installment_index: 1,
        }
    }

    pub(crate) fn with_category(mut self, category: &str) -> Self {
        let trimmed = category.trim();
        self.category = if trimmed.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            trimmed.to_string()
        };
        self
    }

    pub(crate) fn with_installments(mut self, index: u32, count: u32) -> Self {
        self.installment_index = index;
        self.installment_count = count;
        self
    }

    pub(crate) fn is_installment(&self) -> bool {
        self.installment_count > 1
    }

    /// Installments still to be billed after this one.
    pub(crate) fn installments_left(&self) -> u32 {
        self.installment_count.saturating_sub(self.installment_index)
    }

    /// "3/10" style label, or empty for single payments.
    pub(crate) fn installment_label(&self) -> String {
        if self.is_installment() {
            format!("{}/{}", self.installment_index, self.installment_count)
        } else {
            String::new()
        }
    }
}
