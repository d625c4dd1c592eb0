mod config;
mod db;
mod export;
mod input;
mod ledger;
mod logging;
mod models;
mod report;
mod run;
mod sync;
mod ui;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::logging::LogTarget;
use crate::sync::{FetchOutcome, SnapshotSync};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::load()?;

    if args.len() > 1 {
        logging::init(LogTarget::Stderr, "warn")?;
    } else {
        logging::init(LogTarget::File(config.data_dir.join("gastui.log")), "info")?;
    }
    log::debug!("configuration: {config:?}");

    let sync = match &config.remote {
        Some(remote) => Some(
            SnapshotSync::github(remote, &config.db_path)
                .context("Failed to set up remote sync")?,
        ),
        None => {
            log::info!("no remote configured, running local-only");
            None
        }
    };

    if let Some(sync) = &sync {
        match sync.fetch_if_absent()? {
            FetchOutcome::AlreadyPresent => {}
            FetchOutcome::Downloaded { bytes } => {
                log::info!("downloaded remote snapshot ({bytes} bytes)");
            }
            FetchOutcome::Unavailable { reason } => {
                log::warn!("starting from an empty database: {reason}");
            }
        }
    }

    let db = db::Database::open(&config.db_path)?;
    let mut ledger = ledger::Ledger::new(db, sync);

    match args.len() {
        1 => run::as_tui(&mut ledger),
        _ => run::as_cli(&args, &mut ledger),
    }
}
