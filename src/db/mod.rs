mod schema;

use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

/// Runs before a purchase row is deleted. An error aborts the delete.
pub(crate) type PreDeleteHook = Box<dyn Fn(&Purchase) -> Result<()>>;

/// Purchases and limits read at the same point in time.
#[derive(Debug, Clone, Default)]
pub(crate) struct Snapshot {
    pub(crate) purchases: Vec<Purchase>,
    pub(crate) limits: Vec<PersonLimit>,
}

pub(crate) struct Database {
    conn: Connection,
    pre_delete: Option<PreDeleteHook>,
}

const PURCHASE_COLUMNS: &str = "id, description, amount, date, responsible, card, category, \
                                installment_count, installment_index";

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self {
            conn,
            pre_delete: None,
        };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self {
            conn,
            pre_delete: None,
        };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            return self.create_schema();
        }

        let stored: Option<i32> = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()
            .context("Failed to read schema version")?;
        let Some(current) = stored else {
            // Version table exists but setup never recorded a version
            tracing::warn!("schema_version is empty, recreating schema");
            return self.create_schema();
        };

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tracing::info!(from_version, "applying migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    fn create_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(schema::SCHEMA_V1)?;
        self.conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![schema::CURRENT_VERSION],
        )?;
        tracing::info!(version = schema::CURRENT_VERSION, "created ledger schema");
        Ok(())
    }

    pub(crate) fn set_pre_delete_hook(&mut self, hook: PreDeleteHook) {
        self.pre_delete = Some(hook);
    }

    // ── Purchases ─────────────────────────────────────────────

    pub(crate) fn insert_purchase(&self, purchase: &Purchase) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO purchases (description, amount, date, responsible, card, category,
                                    installment_count, installment_index, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                purchase.description,
                purchase.amount.to_string(),
                purchase.date,
                purchase.responsible,
                purchase.card,
                purchase.category,
                purchase.installment_count,
                purchase.installment_index,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(
            id,
            amount = %purchase.amount,
            responsible = %purchase.responsible,
            "purchase recorded"
        );
        Ok(id)
    }

    /// Replace every field of purchase `id`. Returns false if no such row exists.
    pub(crate) fn update_purchase(&self, id: i64, purchase: &Purchase) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE purchases
             SET description = ?1, amount = ?2, date = ?3, responsible = ?4, card = ?5,
                 category = ?6, installment_count = ?7, installment_index = ?8
             WHERE id = ?9",
            params![
                purchase.description,
                purchase.amount.to_string(),
                purchase.date,
                purchase.responsible,
                purchase.card,
                purchase.category,
                purchase.installment_count,
                purchase.installment_index,
                id,
            ],
        )?;
        if changed > 0 {
            tracing::info!(id, "purchase updated");
        }
        Ok(changed > 0)
    }

    /// Delete purchase `id`, running the pre-delete hook first.
    /// Returns false if no such row exists.
    pub(crate) fn delete_purchase(&self, id: i64) -> Result<bool> {
        let Some(purchase) = self.get_purchase(id)? else {
            return Ok(false);
        };
        if let Some(hook) = &self.pre_delete {
            hook(&purchase).with_context(|| format!("Pre-delete hook failed for purchase {id}"))?;
        }
        let deleted = self
            .conn
            .execute("DELETE FROM purchases WHERE id = ?1", params![id])?;
        tracing::info!(id, "purchase deleted");
        Ok(deleted > 0)
    }

    pub(crate) fn get_purchase(&self, id: i64) -> Result<Option<Purchase>> {
        let result = self.conn.query_row(
            &format!("SELECT {PURCHASE_COLUMNS} FROM purchases WHERE id = ?1"),
            params![id],
            purchase_from_row,
        );
        match result {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All purchases, most recent first.
    pub(crate) fn list_purchases(&self) -> Result<Vec<Purchase>> {
        read_purchases(&self.conn)
    }

    pub(crate) fn get_purchase_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM purchases", [], |row| row.get(0))?)
    }

    pub(crate) fn insert_purchases_batch(&mut self, purchases: &[Purchase]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let now = chrono::Utc::now().to_rfc3339();
        for purchase in purchases {
            tx.execute(
                "INSERT INTO purchases (description, amount, date, responsible, card, category,
                                        installment_count, installment_index, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    purchase.description,
                    purchase.amount.to_string(),
                    purchase.date,
                    purchase.responsible,
                    purchase.card,
                    purchase.category,
                    purchase.installment_count,
                    purchase.installment_index,
                    now,
                ],
            )?;
        }
        tx.commit()?;
        tracing::info!(count = purchases.len(), "purchases restored");
        Ok(purchases.len())
    }

    // ── Limits ────────────────────────────────────────────────

    pub(crate) fn list_limits(&self) -> Result<Vec<PersonLimit>> {
        read_limits(&self.conn)
    }

    pub(crate) fn get_limit(&self, person: &str) -> Result<Option<Decimal>> {
        let result = self.conn.query_row(
            "SELECT person, amount FROM limits WHERE person = ?1",
            params![person],
            limit_from_row,
        );
        match result {
            Ok(l) => Ok(Some(l.limit)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set the limit for `person`, replacing any previous value.
    pub(crate) fn upsert_limit(&self, person: &str, limit: Decimal) -> Result<()> {
        self.conn.execute(
            "INSERT INTO limits (person, amount)
             VALUES (?1, ?2)
             ON CONFLICT(person) DO UPDATE SET amount = ?2",
            params![person, limit.to_string()],
        )?;
        tracing::info!(person, limit = %limit, "limit set");
        Ok(())
    }

    pub(crate) fn set_personal_limit(&self, limit: Decimal) -> Result<()> {
        self.upsert_limit(PERSONAL_KEY, limit)
    }

    // ── Snapshot ──────────────────────────────────────────────

    /// Purchases and limits read inside a single transaction.
    pub(crate) fn snapshot(&mut self) -> Result<Snapshot> {
        let tx = self.conn.transaction()?;
        let purchases = read_purchases(&tx)?;
        let limits = read_limits(&tx)?;
        tx.commit()?;
        Ok(Snapshot { purchases, limits })
    }
}

fn read_purchases(conn: &Connection) -> Result<Vec<Purchase>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PURCHASE_COLUMNS} FROM purchases ORDER BY date DESC, id DESC"
    ))?;
    let rows = stmt.query_map([], purchase_from_row)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

fn read_limits(conn: &Connection) -> Result<Vec<PersonLimit>> {
    let mut stmt = conn.prepare("SELECT person, amount FROM limits ORDER BY person")?;
    let rows = stmt.query_map([], limit_from_row)?;
    Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
}

fn purchase_from_row(row: &Row<'_>) -> rusqlite::Result<Purchase> {
    Ok(Purchase {
        id: Some(row.get(0)?),
        description: row.get(1)?,
        amount: decimal_column(row, 2)?,
        date: row.get(3)?,
        responsible: row.get(4)?,
        card: row.get(5)?,
        category: row.get(6)?,
        installment_count: row.get(7)?,
        installment_index: row.get(8)?,
    })
}

fn limit_from_row(row: &Row<'_>) -> rusqlite::Result<PersonLimit> {
    Ok(PersonLimit::new(row.get(0)?, decimal_column(row, 1)?))
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
