// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{LocalRepository, today};
use crate::models::TxType;
use crate::summary::{category_breakdown, month_totals, recent};
use crate::utils::{fmt_amount, get_currency_symbol, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use chrono::Datelike;

pub fn handle(repo: &LocalRepository, m: &clap::ArgMatches) -> Result<()> {
    let symbol = get_currency_symbol(repo.store().connection())?;
    match m.subcommand() {
        Some(("summary", sub)) => {
            let (year, month) = month_arg(sub)?;
            let totals = month_totals(repo.list(), year, month);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
                let rows = vec![vec![
                    format!("{:04}-{:02}", year, month),
                    fmt_amount(&totals.income, &symbol),
                    fmt_amount(&totals.expense, &symbol),
                    fmt_amount(&totals.balance, &symbol),
                ]];
                println!(
                    "{}",
                    pretty_table(&["Month", "Income", "Expense", "Balance"], rows)
                );
            }
        }
        Some(("breakdown", sub)) => {
            let (year, month) = month_arg(sub)?;
            let kind = sub
                .get_one::<String>("type")
                .map(|t| t.parse::<TxType>())
                .transpose()?
                .unwrap_or_default();
            let shares = category_breakdown(repo.list(), year, month, kind);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &shares)? {
                if shares.is_empty() {
                    println!("No {} recorded for {:04}-{:02}", kind, year, month);
                    return Ok(());
                }
                let rows = shares
                    .iter()
                    .map(|s| {
                        vec![
                            format!("{} {}", s.icon, s.name),
                            format!("{}%", s.pct),
                            fmt_amount(&s.amount, &symbol),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Category", "Share", "Amount"], rows));
            }
        }
        Some(("recent", sub)) => {
            let n = sub.get_one::<usize>("limit").copied().unwrap_or(5);
            let rows = recent(repo.list(), n);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
                let data = rows
                    .iter()
                    .map(|t| {
                        vec![
                            t.date.to_string(),
                            format!("{} {}", t.category_icon, t.category_name),
                            fmt_amount(&t.amount, &symbol),
                            t.r#type.to_string(),
                            t.note.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Date", "Category", "Amount", "Type", "Note"], data)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

fn month_arg(sub: &clap::ArgMatches) -> Result<(i32, u32)> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month(m),
        None => {
            let d = today();
            Ok((d.year(), d.month()))
        }
    }
}
