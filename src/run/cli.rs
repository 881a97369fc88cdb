use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;

use super::format::{format_amount, truncate};
use crate::backup;
use crate::ledger::{self, PurchaseFilter};
use crate::models::Purchase;
use crate::service::Ledger;

/// Flags that consume the following argument.
const VALUE_FLAGS: &[&str] = &[
    "--person",
    "--card",
    "--date",
    "--category",
    "--installments",
    "--installment",
    "--description",
    "--amount",
    "--month",
];

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger<'_>) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };
    let rest = &args[2..];
    match command.as_str() {
        "add" | "a" => cli_add(rest, ledger),
        "edit" => cli_edit(rest, ledger),
        "delete" | "rm" => cli_delete(rest, ledger),
        "list" | "ls" => cli_list(rest, ledger),
        "months" => cli_months(ledger),
        "limit" => cli_limit(rest, ledger),
        "limits" => cli_limits(ledger),
        "summary" | "s" => cli_summary(rest, ledger),
        "divide" | "d" => cli_divide(rest, ledger),
        "personal" => cli_personal(rest, ledger),
        "export" => cli_export(rest, ledger),
        "restore" => cli_restore(rest, ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("cardsplit {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("cardsplit — shared credit-card ledger");
    println!();
    println!("Usage: cardsplit <command>");
    println!();
    println!("Commands:");
    println!("  add <description> <amount>    Record a purchase");
    println!("    --person <name> --card <card>");
    println!("    [--date YYYY-MM-DD] [--category <name>]");
    println!("    [--installments N] [--installment I]");
    println!("  edit <id> [same flags]        Replace fields of a purchase");
    println!("    [--description D] [--amount A]");
    println!("  delete <id>                   Delete a purchase");
    println!("  list [filters]                List purchases, newest first");
    println!("  months                        List months with purchases");
    println!("  limit <person> <amount>       Set a person's spending limit");
    println!("  limit --personal <amount>     Set the single personal limit");
    println!("  limits                        List limits");
    println!("  summary [filters]             Spent vs. limit per person");
    println!("  divide [filters]              Split purchases by limit share");
    println!("  personal [--month YYYY-MM]    Spent vs. the personal limit");
    println!("  export <file.csv> [filters]   Write purchases to CSV");
    println!("  restore <file.csv>            Load purchases from a CSV backup");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Filters: --card <card> --person <name> --category <name> --month YYYY-MM");
}

// ── Argument helpers ─────────────────────────────────────────

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
        } else if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

fn parse_month(raw: &str) -> Result<String> {
    ledger::month_bucket(&format!("{raw}-01"))
        .filter(|bucket| bucket == raw)
        .with_context(|| format!("Invalid month '{raw}', expected YYYY-MM"))
}

fn parse_date_arg(raw: &str) -> Result<String> {
    ledger::parse_date(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .with_context(|| format!("Invalid date '{raw}', expected YYYY-MM-DD or DD/MM/YYYY"))
}

fn parse_u32(raw: &str, what: &str) -> Result<u32> {
    raw.parse::<u32>()
        .with_context(|| format!("Invalid {what} '{raw}'"))
}

fn parse_id(args: &[String]) -> Result<i64> {
    let raw = positionals(args)
        .first()
        .copied()
        .context("Missing purchase id")?;
    raw.parse::<i64>()
        .with_context(|| format!("Invalid purchase id '{raw}'"))
}

fn filter_from(args: &[String]) -> Result<PurchaseFilter> {
    let month = flag(args, "--month").map(parse_month).transpose()?;
    Ok(PurchaseFilter {
        card: flag(args, "--card").map(str::to_string),
        person: flag(args, "--person").map(str::to_string),
        category: flag(args, "--category").map(str::to_string),
        month,
    })
}

/// Apply any field flags present in `args` on top of `purchase`.
fn apply_field_flags(mut purchase: Purchase, args: &[String]) -> Result<Purchase> {
    if let Some(d) = flag(args, "--description") {
        purchase.description = d.to_string();
    }
    if let Some(a) = flag(args, "--amount") {
        purchase.amount = backup::parse_decimal(a)?;
    }
    if let Some(d) = flag(args, "--date") {
        purchase.date = parse_date_arg(d)?;
    }
    if let Some(p) = flag(args, "--person") {
        purchase.responsible = p.trim().to_string();
    }
    if let Some(c) = flag(args, "--card") {
        purchase.card = c.trim().to_string();
    }
    if let Some(c) = flag(args, "--category") {
        purchase = purchase.with_category(c);
    }
    if let Some(n) = flag(args, "--installments") {
        purchase.installment_count = parse_u32(n, "installment count")?;
    }
    if let Some(i) = flag(args, "--installment") {
        purchase.installment_index = parse_u32(i, "installment number")?;
    }
    Ok(purchase)
}

// ── Commands ─────────────────────────────────────────────────

fn cli_add(args: &[String], ledger: &mut Ledger<'_>) -> Result<()> {
    let pos = positionals(args);
    let (Some(description), Some(amount)) = (pos.first(), pos.get(1)) else {
        anyhow::bail!(
            "Usage: cardsplit add <description> <amount> --person <name> --card <card> [--date YYYY-MM-DD]"
        );
    };

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let base = Purchase::new(
        description.to_string(),
        backup::parse_decimal(amount)?,
        today,
        String::new(),
        String::new(),
    );
    let purchase = apply_field_flags(base, args)?;
    let id = ledger.add_purchase(&purchase)?;
    println!(
        "Added #{id}: {} {} ({})",
        purchase.description,
        format_amount(purchase.amount),
        purchase.responsible
    );
    Ok(())
}

fn cli_edit(args: &[String], ledger: &mut Ledger<'_>) -> Result<()> {
    let id = parse_id(args)?;
    let current = ledger.get_purchase(id)?;
    let purchase = apply_field_flags(current, args)?;
    ledger.update_purchase(id, &purchase)?;
    println!("Updated #{id}: {}", purchase.description);
    Ok(())
}

fn cli_delete(args: &[String], ledger: &mut Ledger<'_>) -> Result<()> {
    let id = parse_id(args)?;
    let purchase = ledger.get_purchase(id)?;
    ledger.delete_purchase(id)?;
    println!("Deleted #{id}: {}", purchase.description);
    Ok(())
}

fn cli_list(args: &[String], ledger: &mut Ledger<'_>) -> Result<()> {
    let filter = filter_from(args)?;
    let purchases = ledger.purchases(&filter)?;
    if purchases.is_empty() {
        println!("No purchases");
        return Ok(());
    }

    println!(
        "{:<5} {:<10}  {:<24} {:>12}  {:<10} {:<10} {:<14} Inst",
        "ID", "Date", "Description", "Amount", "Person", "Card", "Category"
    );
    println!("{}", "─".repeat(100));
    for p in &purchases {
        println!(
            "{:<5} {:<10}  {:<24} {:>12}  {:<10} {:<10} {:<14} {}",
            p.id.unwrap_or(0),
            p.date,
            truncate(&p.description, 24),
            format_amount(p.amount),
            truncate(&p.responsible, 10),
            truncate(&p.card, 10),
            truncate(&p.category, 14),
            installment_column(p),
        );
    }
    let total: Decimal = purchases.iter().map(|p| ledger::round_cents(p.amount)).sum();
    println!("{}", "─".repeat(100));
    if filter.is_empty() {
        println!("{} purchases, total {}", purchases.len(), format_amount(total));
    } else {
        println!(
            "{} of {} purchases, total {}",
            purchases.len(),
            ledger.purchase_count()?,
            format_amount(total)
        );
    }
    Ok(())
}

fn installment_column(p: &Purchase) -> String {
    match p.installments_left() {
        0 => p.installment_label(),
        left => format!("{} ({left} left)", p.installment_label()),
    }
}

fn cli_months(ledger: &mut Ledger<'_>) -> Result<()> {
    let months = ledger.months()?;
    if months.is_empty() {
        println!("No purchases");
    }
    for month in months {
        println!("{month}");
    }
    Ok(())
}

fn cli_limit(args: &[String], ledger: &mut Ledger<'_>) -> Result<()> {
    let pos = positionals(args);
    if has_flag(args, "--personal") {
        let amount = pos
            .first()
            .context("Usage: cardsplit limit --personal <amount>")?;
        let limit = backup::parse_decimal(amount)?;
        ledger.set_personal_limit(limit)?;
        println!("Personal limit set to {}", format_amount(limit));
        return Ok(());
    }

    let (Some(person), Some(amount)) = (pos.first(), pos.get(1)) else {
        anyhow::bail!("Usage: cardsplit limit <person> <amount>");
    };
    let limit = backup::parse_decimal(amount)?;
    ledger.set_limit(person, limit)?;
    println!("Limit for {} set to {}", person.trim(), format_amount(limit));
    Ok(())
}

fn cli_limits(ledger: &mut Ledger<'_>) -> Result<()> {
    let limits = ledger.limits()?;
    if limits.is_empty() {
        println!("No limits");
        return Ok(());
    }
    for l in &limits {
        let name = if l.is_personal() { "(personal)" } else { l.person.as_str() };
        println!("  {name:<24} {:>14}", format_amount(l.limit));
    }
    Ok(())
}

fn cli_summary(args: &[String], ledger: &mut Ledger<'_>) -> Result<()> {
    let summary = ledger.summary(&filter_from(args)?)?;
    if summary.is_empty() {
        println!("Add purchases and limits to see a summary");
        return Ok(());
    }

    println!(
        "{:<16} {:>14} {:>14} {:>14}",
        "Person", "Spent", "Limit", "Remaining"
    );
    println!("{}", "─".repeat(61));
    for (person, s) in &summary {
        let marker = if s.is_over_limit() { "  over limit" } else { "" };
        println!(
            "{:<16} {:>14} {:>14} {:>14}{marker}",
            truncate(person, 16),
            format_amount(s.total_spent),
            format_amount(s.limit),
            format_amount(s.remaining),
        );
    }
    Ok(())
}

fn cli_divide(args: &[String], ledger: &mut Ledger<'_>) -> Result<()> {
    let owed = ledger.divide(&filter_from(args)?)?;
    println!("{:<16} {:>14}", "Person", "Owes");
    println!("{}", "─".repeat(31));
    for (person, amount) in &owed {
        println!("{:<16} {:>14}", truncate(person, 16), format_amount(*amount));
    }
    Ok(())
}

fn cli_personal(args: &[String], ledger: &mut Ledger<'_>) -> Result<()> {
    let month = flag(args, "--month").map(parse_month).transpose()?;
    let report = ledger.personal(month.as_deref())?;
    println!("Personal — {}", month.as_deref().unwrap_or("all months"));
    println!("{}", "─".repeat(40));
    println!("  Spent:      {}", format_amount(report.total_spent));
    println!("  Limit:      {}", format_amount(report.limit));
    if report.is_over_limit() {
        println!("  Over by:    {}", format_amount(-report.remaining));
    } else {
        println!("  Remaining:  {}", format_amount(report.remaining));
    }
    Ok(())
}

fn cli_export(args: &[String], ledger: &mut Ledger<'_>) -> Result<()> {
    let output = positionals(args)
        .first()
        .map(|p| shellexpand(p))
        .context("Usage: cardsplit export <file.csv> [filters]")?;
    let purchases = ledger.purchases(&filter_from(args)?)?;
    let count = backup::export_purchases(Path::new(&output), &purchases)?;
    println!("Exported {count} purchases to {output}");
    Ok(())
}

fn cli_restore(args: &[String], ledger: &mut Ledger<'_>) -> Result<()> {
    let input = positionals(args)
        .first()
        .map(|p| shellexpand(p))
        .context("Usage: cardsplit restore <file.csv>")?;
    let path = Path::new(&input);
    if !path.exists() {
        anyhow::bail!("File not found: {input}");
    }
    let purchases = backup::restore_purchases(path)?;
    let count = ledger.restore(&purchases)?;
    println!("Restored {count} purchases from {input}");
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
