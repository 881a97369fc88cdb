//! CSV copies of the purchase table: full exports, the append-only file the
//! pre-delete hook writes to, and restoring either back into the ledger.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::fs::OpenOptions;
use std::path::Path;
use std::str::FromStr;

use crate::ledger::parse_date;
use crate::models::Purchase;

const HEADER: [&str; 9] = [
    "id",
    "date",
    "description",
    "amount",
    "responsible",
    "card",
    "category",
    "installment_count",
    "installment_index",
];

/// Write `purchases` to a new CSV file at `path`. Returns the number of rows written.
pub(crate) fn export_purchases<'a, I>(path: &Path, purchases: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a Purchase>,
{
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create backup file: {}", path.display()))?;
    wtr.write_record(HEADER)?;
    let mut count = 0;
    for purchase in purchases {
        wtr.write_record(to_record(purchase))?;
        count += 1;
    }
    wtr.flush()?;
    Ok(count)
}

/// Append one purchase to `path`, writing the header first if the file is new or empty.
pub(crate) fn append_purchase(path: &Path, purchase: &Purchase) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open backup file: {}", path.display()))?;
    let is_empty = file.metadata()?.len() == 0;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if is_empty {
        wtr.write_record(HEADER)?;
    }
    wtr.write_record(to_record(purchase))?;
    wtr.flush()?;
    tracing::info!(id = ?purchase.id, path = %path.display(), "purchase backed up");
    Ok(())
}

/// Read purchases back from a backup file. Ids are dropped; the store assigns new ones.
pub(crate) fn restore_purchases(path: &Path) -> Result<Vec<Purchase>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Failed to open backup file: {}", path.display()))?;

    let mut purchases = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        // Row numbers count the header as row 1
        let row = i + 2;
        let record = result.with_context(|| format!("Row {row}: failed to read record"))?;
        let purchase = from_record(&record).with_context(|| format!("Row {row}: invalid purchase"))?;
        purchases.push(purchase);
    }
    Ok(purchases)
}

fn to_record(p: &Purchase) -> [String; 9] {
    [
        p.id.map(|id| id.to_string()).unwrap_or_default(),
        p.date.clone(),
        p.description.clone(),
        p.amount.to_string(),
        p.responsible.clone(),
        p.card.clone(),
        p.category.clone(),
        p.installment_count.to_string(),
        p.installment_index.to_string(),
    ]
}

fn from_record(record: &csv::StringRecord) -> Result<Purchase> {
    let field = |idx: usize| -> Result<&str> {
        record
            .get(idx)
            .map(str::trim)
            .with_context(|| format!("missing column '{}'", HEADER[idx]))
    };

    let raw_date = field(1)?;
    let date = parse_date(raw_date)
        .with_context(|| format!("could not parse date '{raw_date}'"))?
        .format("%Y-%m-%d")
        .to_string();

    let purchase = Purchase::new(
        field(2)?.to_string(),
        parse_decimal(field(3)?)?,
        date,
        field(4)?.to_string(),
        field(5)?.to_string(),
    )
    .with_category(field(6)?)
    .with_installments(parse_count(field(8)?)?, parse_count(field(7)?)?);
    Ok(purchase)
}

fn parse_count(s: &str) -> Result<u32> {
    if s.is_empty() {
        return Ok(1);
    }
    s.parse::<u32>()
        .with_context(|| format!("Failed to parse '{s}' as installment number"))
}

/// Parse a currency amount such as `1234.56`, `$1,234.56` or `R$ 99.90`.
///
/// Commas are only accepted as thousands separators; `12,50` is rejected
/// rather than read as 1250.
pub(crate) fn parse_decimal(s: &str) -> Result<Decimal> {
    let trimmed = s.trim();
    let cleaned = trimmed
        .strip_prefix("R$")
        .unwrap_or(trimmed)
        .replace(['$', '"'], "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        anyhow::bail!("Empty amount");
    }
    if cleaned.contains(',') && !is_thousands_grouped(&cleaned) {
        anyhow::bail!("Ambiguous amount '{s}': use '.' as the decimal separator");
    }
    Decimal::from_str(&cleaned.replace(',', ""))
        .with_context(|| format!("Failed to parse '{s}' as decimal"))
}

/// `1,234,567.89`: one to three leading digits, then groups of exactly three.
fn is_thousands_grouped(s: &str) -> bool {
    let (integer, fraction) = s.split_once('.').unwrap_or((s, ""));
    if fraction.contains(',') {
        return false;
    }
    let integer = integer.strip_prefix('-').unwrap_or(integer);
    let mut groups = integer.split(',');
    let all_digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    let leading_ok = groups
        .next()
        .map_or(false, |g| (1..=3).contains(&g.len()) && all_digits(g));
    leading_ok && groups.all(|g| g.len() == 3 && all_digits(g))
}
