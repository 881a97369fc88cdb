//! Ledger operations as the front end sees them: every write is validated
//! before it reaches the store, and every report runs over one snapshot.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::db::Database;
use crate::ledger::{self, LedgerError, LedgerResult, PersonSummary, PurchaseFilter};
use crate::models::{PersonLimit, Purchase, PERSONAL_KEY};

pub(crate) struct Ledger<'a> {
    db: &'a mut Database,
    config: &'a Config,
}

impl<'a> Ledger<'a> {
    pub(crate) fn new(db: &'a mut Database, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Validate a purchase and return the copy that gets stored, with its
    /// date rewritten as `YYYY-MM-DD`.
    fn check(&self, purchase: &Purchase) -> LedgerResult<Purchase> {
        ledger::validate(purchase)?;
        let responsible = purchase.responsible.trim();
        if responsible.is_empty()
            || responsible == PERSONAL_KEY
            || !self.config.knows_participant(responsible)
        {
            return Err(LedgerError::UnknownParticipant(purchase.responsible.clone()));
        }
        if purchase.card.trim().is_empty() || !self.config.knows_card(&purchase.card) {
            return Err(LedgerError::UnknownCard(purchase.card.clone()));
        }
        let date = ledger::parse_date(&purchase.date).ok_or_else(|| {
            LedgerError::InvalidPurchase(format!("unrecognised date '{}'", purchase.date))
        })?;

        let mut checked = purchase.clone();
        checked.date = date.format("%Y-%m-%d").to_string();
        Ok(checked)
    }

    // ── Writes ────────────────────────────────────────────────

    pub(crate) fn add_purchase(&mut self, purchase: &Purchase) -> LedgerResult<i64> {
        let purchase = self.check(purchase)?;
        Ok(self.db.insert_purchase(&purchase)?)
    }

    pub(crate) fn update_purchase(&mut self, id: i64, purchase: &Purchase) -> LedgerResult<()> {
        let purchase = self.check(purchase)?;
        if !self.db.update_purchase(id, &purchase)? {
            return Err(LedgerError::NotFound(id));
        }
        Ok(())
    }

    pub(crate) fn delete_purchase(&mut self, id: i64) -> LedgerResult<()> {
        if !self.db.delete_purchase(id)? {
            return Err(LedgerError::NotFound(id));
        }
        Ok(())
    }

    pub(crate) fn get_purchase(&self, id: i64) -> LedgerResult<Purchase> {
        self.db.get_purchase(id)?.ok_or(LedgerError::NotFound(id))
    }

    /// Insert restored purchases. Nothing is written unless every row passes.
    pub(crate) fn restore(&mut self, purchases: &[Purchase]) -> LedgerResult<usize> {
        let checked = purchases
            .iter()
            .map(|p| self.check(p))
            .collect::<LedgerResult<Vec<_>>>()?;
        Ok(self.db.insert_purchases_batch(&checked)?)
    }

    pub(crate) fn set_limit(&mut self, person: &str, limit: Decimal) -> LedgerResult<()> {
        let person = person.trim();
        ledger::validate_limit(person, limit)?;
        if person == PERSONAL_KEY || !self.config.knows_participant(person) {
            return Err(LedgerError::UnknownParticipant(person.to_string()));
        }
        Ok(self.db.upsert_limit(person, limit)?)
    }

    pub(crate) fn set_personal_limit(&mut self, limit: Decimal) -> LedgerResult<()> {
        ledger::validate_limit(PERSONAL_KEY, limit)?;
        Ok(self.db.set_personal_limit(limit)?)
    }

    // ── Reports ───────────────────────────────────────────────

    pub(crate) fn purchases(&mut self, filter: &PurchaseFilter) -> LedgerResult<Vec<Purchase>> {
        let snapshot = self.db.snapshot()?;
        Ok(filter.apply(&snapshot.purchases).into_iter().cloned().collect())
    }

    pub(crate) fn purchase_count(&self) -> LedgerResult<i64> {
        Ok(self.db.get_purchase_count()?)
    }

    pub(crate) fn limits(&self) -> LedgerResult<Vec<PersonLimit>> {
        Ok(self.db.list_limits()?)
    }

    pub(crate) fn months(&mut self) -> LedgerResult<Vec<String>> {
        Ok(ledger::sorted_months(&self.db.list_purchases()?))
    }

    pub(crate) fn summary(
        &mut self,
        filter: &PurchaseFilter,
    ) -> LedgerResult<BTreeMap<String, PersonSummary>> {
        let snapshot = self.db.snapshot()?;
        let selected = filter.apply(&snapshot.purchases);
        ledger::summarize(selected, &snapshot.limits)
    }

    pub(crate) fn divide(
        &mut self,
        filter: &PurchaseFilter,
    ) -> LedgerResult<BTreeMap<String, Decimal>> {
        let snapshot = self.db.snapshot()?;
        let selected = filter.apply(&snapshot.purchases);
        ledger::divide_proportionally(selected, &snapshot.limits)
    }

    pub(crate) fn personal(&mut self, month: Option<&str>) -> LedgerResult<PersonSummary> {
        let limit = self.db.get_limit(PERSONAL_KEY)?.unwrap_or(Decimal::ZERO);
        ledger::personal_report(&self.db.list_purchases()?, limit, month)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
