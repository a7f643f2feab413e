// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kakeibo::commands::{LocalRepository, fixed, transactions};
use kakeibo::db::{self, SqliteStore};
use kakeibo::models::TxType;
use kakeibo::repository::Repository;
use kakeibo::{cli, commands};
use rust_decimal::Decimal;

fn setup() -> LocalRepository {
    Repository::open(SqliteStore::new(db::open_in_memory().unwrap())).unwrap()
}

fn run(repo: &mut LocalRepository, args: &[&str]) {
    let mut argv = vec!["kakeibo"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", sub)) => transactions::handle(repo, sub).unwrap(),
        Some(("fixed", sub)) => fixed::handle(repo, sub).unwrap(),
        Some(("config", sub)) => commands::config::handle(repo.store().connection(), sub).unwrap(),
        _ => panic!("unexpected subcommand"),
    }
}

#[test]
fn add_without_category_classifies_note() {
    let mut repo = setup();
    run(
        &mut repo,
        &["tx", "add", "--amount", "540", "--note", "Starbucks latte", "--date", "2025-01-03"],
    );
    let tx = &repo.list()[0];
    assert_eq!(tx.category_name, "Food");
    assert_eq!(tx.amount, Decimal::from(540));
}

#[test]
fn add_uses_catalog_icon() {
    let mut repo = setup();
    run(
        &mut repo,
        &[
            "tx", "add", "--amount", "250000", "--type", "income", "--category", "salary",
            "--date", "2025-01-25",
        ],
    );
    let tx = &repo.list()[0];
    assert_eq!(tx.r#type, TxType::Income);
    assert_eq!(tx.category_name, "Salary");
    assert_eq!(tx.category_icon, "💰");
}

#[test]
fn list_limit_respected() {
    let mut repo = setup();
    for day in 1..=3 {
        let date = format!("2025-01-0{}", day);
        run(&mut repo, &["tx", "add", "--amount", "10", "--category", "Food", "--date", &date]);
    }
    let matches = cli::build_cli().get_matches_from(["kakeibo", "tx", "list", "--limit", "2"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&repo, list_m).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2025-01-03");
}

#[test]
fn edit_and_remove_through_cli() {
    let mut repo = setup();
    run(&mut repo, &["tx", "add", "--amount", "800", "--category", "Food", "--date", "2025-02-01"]);
    let id = repo.list()[0].id.clone();

    run(&mut repo, &["tx", "edit", "--id", &id, "--amount", "900", "--note", "ramen"]);
    assert_eq!(repo.list()[0].amount, Decimal::from(900));
    assert_eq!(repo.list()[0].note.as_deref(), Some("ramen"));

    run(&mut repo, &["tx", "rm", "--id", "unknown"]);
    assert_eq!(repo.list().len(), 1);
    run(&mut repo, &["tx", "rm", "--id", &id]);
    assert!(repo.list().is_empty());
}

#[test]
fn edit_to_uncatalogued_category_drops_old_icon() {
    let mut repo = setup();
    run(&mut repo, &["tx", "add", "--amount", "800", "--category", "Food", "--date", "2025-02-01"]);
    let id = repo.list()[0].id.clone();
    assert_eq!(repo.list()[0].category_icon, "🍽️");

    run(&mut repo, &["tx", "edit", "--id", &id, "--category", "Pets"]);
    assert_eq!(repo.list()[0].category_name, "Pets");
    assert_eq!(repo.list()[0].category_icon, "⋯");

    run(&mut repo, &["tx", "edit", "--id", &id, "--category", "transport"]);
    assert_eq!(repo.list()[0].category_icon, "🚗");
}

#[test]
fn fixed_run_with_date_materializes() {
    let mut repo = setup();
    run(
        &mut repo,
        &[
            "fixed", "add", "--id", "rent", "--name", "Rent", "--amount", "50000", "--category",
            "Housing", "--day", "25",
        ],
    );
    assert_eq!(repo.fixed_rules()[0].category_icon, "🏠");

    run(&mut repo, &["fixed", "run", "--date", "2024-06-26"]);
    run(&mut repo, &["fixed", "run", "--date", "2024-06-27"]);
    let june: Vec<_> = repo.query(|t| t.id == "fixed-rent-2024-06");
    assert_eq!(june.len(), 1);
    assert_eq!(june[0].date.to_string(), "2024-06-25");
}

#[test]
fn config_set_stores_sync_url() {
    let mut repo = setup();
    run(&mut repo, &["config", "set", "sync_url", " https://example.test/exec "]);
    let url = kakeibo::utils::get_sync_url(repo.store().connection()).unwrap();
    assert_eq!(url.as_deref(), Some("https://example.test/exec"));
}

#[test]
fn invalid_amount_is_rejected() {
    let mut repo = setup();
    let matches = cli::build_cli().get_matches_from([
        "kakeibo", "tx", "add", "--amount", "0", "--category", "Food",
    ]);
    let Some(("tx", sub)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let err = transactions::handle(&mut repo, sub).unwrap_err();
    assert!(format!("{:#}", err).contains("amount must be positive"));
    assert!(repo.list().is_empty());
}
