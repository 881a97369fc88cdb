pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS purchases (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    description        TEXT NOT NULL,
    amount             TEXT NOT NULL,
    date               TEXT NOT NULL,
    responsible        TEXT NOT NULL,
    card               TEXT NOT NULL,
    category           TEXT NOT NULL DEFAULT 'Other',
    installment_count  INTEGER NOT NULL DEFAULT 1 CHECK (installment_count >= 1),
    installment_index  INTEGER NOT NULL DEFAULT 1 CHECK (installment_index >= 1),
    created_at         TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_purchases_date ON purchases(date);
CREATE INDEX IF NOT EXISTS idx_purchases_responsible ON purchases(responsible);

CREATE TABLE IF NOT EXISTS limits (
    person  TEXT PRIMARY KEY NOT NULL,
    amount  TEXT NOT NULL
);

"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
