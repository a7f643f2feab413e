// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use kakeibo::KakeiboError;
use kakeibo::db::{MemoryStore, Slot};
use kakeibo::models::{NewTransaction, TransactionPatch, TxType};
use kakeibo::repository::{Repository, TransactionFilter};
use rust_decimal::Decimal;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn lunch(date: NaiveDate) -> NewTransaction {
    NewTransaction {
        id: None,
        amount: Decimal::from(980),
        r#type: TxType::Expense,
        category_name: "Food".into(),
        category_icon: "🍽️".into(),
        note: Some("  lunch  ".into()),
        date,
    }
}

#[test]
fn add_assigns_id_and_persists() {
    let mut repo = Repository::open(MemoryStore::new()).unwrap();
    let tx = repo.add(lunch(ymd(2024, 5, 1))).unwrap();
    assert!(!tx.id.is_empty());
    assert_eq!(tx.note.as_deref(), Some("lunch"));
    assert_eq!(repo.store().save_count(), 1);
    assert!(repo.store().raw(Slot::Transactions).unwrap().contains(&tx.id));
}

#[test]
fn add_rejects_invalid_input_without_saving() {
    let mut repo = Repository::open(MemoryStore::new()).unwrap();
    let mut zero = lunch(ymd(2024, 5, 1));
    zero.amount = Decimal::ZERO;
    assert!(matches!(repo.add(zero), Err(KakeiboError::Validation(_))));

    let mut no_category = lunch(ymd(2024, 5, 1));
    no_category.category_name = " ".into();
    assert!(matches!(repo.add(no_category), Err(KakeiboError::Validation(_))));

    assert!(repo.list().is_empty());
    assert_eq!(repo.store().save_count(), 0);
}

#[test]
fn add_rejects_duplicate_id() {
    let mut repo = Repository::open(MemoryStore::new()).unwrap();
    let mut a = lunch(ymd(2024, 5, 1));
    a.id = Some("same".into());
    repo.add(a.clone()).unwrap();
    assert!(repo.add(a).is_err());
    assert_eq!(repo.list().len(), 1);
}

#[test]
fn update_changes_only_given_fields() {
    let mut repo = Repository::open(MemoryStore::new()).unwrap();
    let tx = repo.add(lunch(ymd(2024, 5, 1))).unwrap();
    let patch = TransactionPatch {
        amount: Some(Decimal::from(1200)),
        ..Default::default()
    };
    let updated = repo.update(&tx.id, &patch).unwrap().unwrap();
    assert_eq!(updated.id, tx.id);
    assert_eq!(updated.amount, Decimal::from(1200));
    assert_eq!(updated.category_name, "Food");
    assert_eq!(updated.note.as_deref(), Some("lunch"));
    assert_eq!(updated.date, tx.date);
}

#[test]
fn update_can_clear_note() {
    let mut repo = Repository::open(MemoryStore::new()).unwrap();
    let tx = repo.add(lunch(ymd(2024, 5, 1))).unwrap();
    let patch = TransactionPatch {
        note: Some(None),
        ..Default::default()
    };
    let updated = repo.update(&tx.id, &patch).unwrap().unwrap();
    assert_eq!(updated.note, None);
}

#[test]
fn rejected_update_leaves_transaction_unchanged() {
    let mut repo = Repository::open(MemoryStore::new()).unwrap();
    let tx = repo.add(lunch(ymd(2024, 5, 1))).unwrap();
    let patch = TransactionPatch {
        amount: Some(Decimal::from(-3)),
        note: Some(Some("changed".into())),
        ..Default::default()
    };
    assert!(repo.update(&tx.id, &patch).is_err());
    assert_eq!(repo.get(&tx.id).unwrap(), &tx);
    assert_eq!(repo.store().save_count(), 1);
}

#[test]
fn unknown_ids_are_benign() {
    let mut repo = Repository::open(MemoryStore::new()).unwrap();
    repo.add(lunch(ymd(2024, 5, 1))).unwrap();
    assert_eq!(
        repo.update("missing", &TransactionPatch::default()).unwrap(),
        None
    );
    assert!(!repo.remove("missing").unwrap());
    assert_eq!(repo.list().len(), 1);
    assert_eq!(repo.store().save_count(), 1);
    assert!(matches!(repo.get("missing"), Err(KakeiboError::NotFound(_))));
}

#[test]
fn remove_deletes_and_persists() {
    let mut repo = Repository::open(MemoryStore::new()).unwrap();
    let tx = repo.add(lunch(ymd(2024, 5, 1))).unwrap();
    assert!(repo.remove(&tx.id).unwrap());
    assert!(repo.list().is_empty());

    let reopened = Repository::open(repo.into_store()).unwrap();
    assert!(reopened.list().is_empty());
}

#[test]
fn filter_by_month_type_and_category() {
    let mut repo = Repository::open(MemoryStore::new()).unwrap();
    repo.add(lunch(ymd(2024, 5, 1))).unwrap();
    repo.add(lunch(ymd(2024, 5, 20))).unwrap();
    repo.add(lunch(ymd(2024, 6, 2))).unwrap();
    repo.add(NewTransaction {
        id: None,
        amount: Decimal::from(250000),
        r#type: TxType::Income,
        category_name: "Salary".into(),
        category_icon: "💰".into(),
        note: None,
        date: ymd(2024, 5, 25),
    })
    .unwrap();

    let may = TransactionFilter {
        month: Some((2024, 5)),
        ..Default::default()
    };
    let rows = repo.filter(&may);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].date, ymd(2024, 5, 25));

    let may_food = TransactionFilter {
        month: Some((2024, 5)),
        r#type: Some(TxType::Expense),
        category: Some("food".into()),
    };
    assert_eq!(repo.filter(&may_food).len(), 2);

    let big = repo.query(|t| t.amount > Decimal::from(1000));
    assert_eq!(big.len(), 1);
}
