// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::transactions::resolve_category;
use super::{LocalRepository, today};
use crate::models::{FixedRuleInput, TxType};
use crate::utils::{
    fmt_amount, get_currency_symbol, maybe_print_json, parse_date, parse_decimal, pretty_table,
};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use tracing::info;

pub fn handle(repo: &mut LocalRepository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let input = rule_input_from_args(sub)?;
            let editing = input.id.is_some();
            let rule = repo.upsert_fixed_rule(input).context("Fixed expense rejected")?;
            println!(
                "{} fixed expense '{}' on day {} (id {})",
                if editing { "Saved" } else { "Added" },
                rule.name,
                rule.day_of_month,
                rule.id
            );
            run(repo, today())?;
        }
        Some(("list", sub)) => list(repo, sub)?,
        Some(("rm", sub)) => {
            let id = sub
                .get_one::<String>("id")
                .map(|s| s.trim())
                .ok_or_else(|| anyhow!("--id is required"))?;
            if repo.delete_fixed_rule(id)? {
                println!("Removed fixed expense {}", id);
            } else {
                println!("No fixed expense with id {}", id);
            }
        }
        Some(("run", sub)) => {
            let date = match sub.get_one::<String>("date") {
                Some(d) => parse_date(d)?,
                None => today(),
            };
            run(repo, date)?;
        }
        _ => {}
    }
    Ok(())
}

pub fn rule_input_from_args(sub: &clap::ArgMatches) -> Result<FixedRuleInput> {
    let get = |name: &str| {
        sub.get_one::<String>(name)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };
    let kind = get("type")
        .map(|t| t.parse::<TxType>())
        .transpose()?
        .unwrap_or_default();
    let name = get("name").ok_or_else(|| anyhow!("--name is required"))?;
    let amount = parse_decimal(&get("amount").ok_or_else(|| anyhow!("--amount is required"))?)?;
    let day = *sub
        .get_one::<u32>("day")
        .ok_or_else(|| anyhow!("--day is required"))?;
    let (category_name, category_icon) = resolve_category(kind, get("category"), get("icon"), None);
    Ok(FixedRuleInput {
        id: get("id"),
        name,
        amount,
        r#type: kind,
        category_name,
        category_icon,
        day_of_month: day,
    })
}

pub fn run(repo: &mut LocalRepository, date: NaiveDate) -> Result<usize> {
    let generated = repo.run_materialization(date)?;
    if !generated.is_empty() {
        let symbol = get_currency_symbol(repo.store().connection())?;
        for tx in &generated {
            println!(
                "Recorded fixed expense '{}' {} on {}",
                tx.note.as_deref().unwrap_or(""),
                fmt_amount(&tx.amount, &symbol),
                tx.date
            );
        }
    }
    Ok(generated.len())
}

/// Materialization pass made before every command. Stdout stays reserved for
/// the command's own output, so generated items only go to the log.
pub fn run_on_start(repo: &mut LocalRepository, date: NaiveDate) -> Result<usize> {
    let generated = repo.run_materialization(date)?;
    for tx in &generated {
        info!(
            id = %tx.id,
            name = tx.note.as_deref().unwrap_or(""),
            amount = %tx.amount,
            date = %tx.date,
            "recorded fixed expense"
        );
    }
    Ok(generated.len())
}

fn list(repo: &LocalRepository, sub: &clap::ArgMatches) -> Result<()> {
    let rules = repo.fixed_rules();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rules)? {
        return Ok(());
    }
    let symbol = get_currency_symbol(repo.store().connection())?;
    let data = rules
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.name.clone(),
                fmt_amount(&r.amount, &symbol),
                r.r#type.to_string(),
                format!("{} {}", r.category_icon, r.category_name),
                r.day_of_month.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Name", "Amount", "Type", "Category", "Day"], data)
    );
    Ok(())
}
