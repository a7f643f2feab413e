// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use kakeibo::db::{self, SqliteStore};
use kakeibo::repository::Repository;
use kakeibo::{cli, commands};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("KAKEIBO_LOG")
        .unwrap_or_else(|_| EnvFilter::new("kakeibo=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let mut repo = Repository::open(SqliteStore::new(conn)).context("Load saved data")?;
    commands::fixed::run_on_start(&mut repo, chrono::Local::now().date_naive())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut repo, sub)?,
        Some(("fixed", sub)) => commands::fixed::handle(&mut repo, sub)?,
        Some(("sync", sub)) => commands::sync::handle(&mut repo, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut repo, sub)?,
        Some(("report", sub)) => commands::reports::handle(&repo, sub)?,
        Some(("category", sub)) => commands::categories::handle(sub)?,
        Some(("config", sub)) => commands::config::handle(repo.store().connection(), sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
