mod backup;
mod config;
mod db;
mod ledger;
mod models;
mod run;
mod service;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    let mut db = db::Database::open(&config.db_path)?;

    if let Some(path) = config.backup_path.clone() {
        db.set_pre_delete_hook(Box::new(move |purchase| {
            backup::append_purchase(&path, purchase)
        }));
    }

    let mut ledger = service::Ledger::new(&mut db, &config);
    run::as_cli(&args, &mut ledger)
}

/// Log to stderr. `CARDSPLIT_LOG` takes precedence over `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("CARDSPLIT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("cardsplit=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
