// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{LocalRepository, today};
use crate::classifier::Classifier;
use crate::models::{
    NewTransaction, OTHER, Transaction, TransactionPatch, TxType, lookup_category,
};
use crate::repository::TransactionFilter;
use crate::utils::{
    fmt_amount, get_currency_symbol, maybe_print_json, parse_date, parse_decimal, parse_month,
    pretty_table,
};
use anyhow::{Context, Result, anyhow};

pub fn handle(repo: &mut LocalRepository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(repo, sub)?,
        Some(("list", sub)) => list(repo, sub)?,
        Some(("show", sub)) => show(repo, sub)?,
        Some(("edit", sub)) => edit(repo, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            if repo.remove(id)? {
                println!("Removed transaction {}", id);
            } else {
                println!("No transaction with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .ok_or_else(|| anyhow!("--{} is required", name))
}

fn optional(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_type(sub: &clap::ArgMatches) -> Result<Option<TxType>> {
    optional(sub, "type")
        .map(|t| t.parse::<TxType>())
        .transpose()
        .map_err(Into::into)
}

/// Resolves a category name and icon: explicit icon first, then the catalog,
/// then the classifier when no name was given.
pub fn resolve_category(
    kind: TxType,
    name: Option<String>,
    icon: Option<String>,
    note: Option<&str>,
) -> (String, String) {
    match name {
        Some(name) => {
            let catalog = lookup_category(kind, &name);
            let name = catalog.map(|c| c.name.to_string()).unwrap_or(name);
            let icon = icon
                .or_else(|| catalog.map(|c| c.icon.to_string()))
                .unwrap_or_else(|| OTHER.icon.to_string());
            (name, icon)
        }
        None => {
            let c = Classifier::builtin().classify(note);
            (c.category_name, icon.unwrap_or(c.category_icon))
        }
    }
}

pub fn new_transaction_from_args(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let amount = parse_decimal(required(sub, "amount")?)?;
    let kind = parse_type(sub)?.unwrap_or_default();
    let note = optional(sub, "note");
    let date = match optional(sub, "date") {
        Some(d) => parse_date(&d)?,
        None => today(),
    };
    let (category_name, category_icon) = resolve_category(
        kind,
        optional(sub, "category"),
        optional(sub, "icon"),
        note.as_deref(),
    );
    Ok(NewTransaction {
        id: None,
        amount,
        r#type: kind,
        category_name,
        category_icon,
        note,
        date,
    })
}

fn add(repo: &mut LocalRepository, sub: &clap::ArgMatches) -> Result<()> {
    let new = new_transaction_from_args(sub)?;
    let tx = repo.add(new).context("Transaction rejected")?;
    let symbol = get_currency_symbol(repo.store().connection())?;
    println!(
        "Recorded {} {} on {} as {} {} (id {})",
        tx.r#type,
        fmt_amount(&tx.amount, &symbol),
        tx.date,
        tx.category_icon,
        tx.category_name,
        tx.id
    );
    Ok(())
}

pub fn patch_from_args(sub: &clap::ArgMatches) -> Result<TransactionPatch> {
    let kind = parse_type(sub)?;
    let category_name = optional(sub, "category");
    let mut category_icon = optional(sub, "icon");
    if category_icon.is_none() {
        if let Some(name) = category_name.as_deref() {
            let found = match kind {
                Some(kind) => lookup_category(kind, name),
                None => lookup_category(TxType::Expense, name)
                    .or_else(|| lookup_category(TxType::Income, name)),
            };
            category_icon = Some(found.unwrap_or(OTHER).icon.to_string());
        }
    }
    let note = if sub.get_flag("clear_note") {
        Some(None)
    } else {
        optional(sub, "note").map(Some)
    };
    Ok(TransactionPatch {
        amount: optional(sub, "amount")
            .map(|a| parse_decimal(&a))
            .transpose()?,
        r#type: kind,
        category_name,
        category_icon,
        note,
        date: optional(sub, "date").map(|d| parse_date(&d)).transpose()?,
    })
}

fn edit(repo: &mut LocalRepository, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let patch = patch_from_args(sub)?;
    if patch.is_empty() {
        println!("Nothing to change for {}", id);
        return Ok(());
    }
    match repo.update(id, &patch).context("Edit rejected")? {
        Some(tx) => println!("Updated {} ({} {})", tx.id, tx.date, tx.category_name),
        None => println!("No transaction with id {}", id),
    }
    Ok(())
}

fn show(repo: &LocalRepository, sub: &clap::ArgMatches) -> Result<()> {
    let tx = repo.get(required(sub, "id")?)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), tx)? {
        print_rows(repo, std::slice::from_ref(&tx))?;
    }
    Ok(())
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        month: optional(sub, "month").map(|m| parse_month(&m)).transpose()?,
        r#type: parse_type(sub)?,
        category: optional(sub, "category"),
    })
}

pub fn query_rows<'a>(
    repo: &'a LocalRepository,
    sub: &clap::ArgMatches,
) -> Result<Vec<&'a Transaction>> {
    let filter = filter_from_args(sub)?;
    let mut rows = repo.filter(&filter);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list(repo: &LocalRepository, sub: &clap::ArgMatches) -> Result<()> {
    let rows = query_rows(repo, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        print_rows(repo, &rows)?;
    }
    Ok(())
}

fn print_rows(repo: &LocalRepository, rows: &[&Transaction]) -> Result<()> {
    let symbol = get_currency_symbol(repo.store().connection())?;
    let data: Vec<Vec<String>> = rows
        .iter()
        .map(|t| {
            let sign = match t.r#type {
                TxType::Income => "+",
                TxType::Expense => "-",
            };
            vec![
                t.date.to_string(),
                format!("{} {}", t.category_icon, t.category_name),
                format!("{}{}", sign, fmt_amount(&t.amount, &symbol)),
                t.note.clone().unwrap_or_default(),
                t.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Category", "Amount", "Note", "ID"], data)
    );
    Ok(())
}
