// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TxType};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub icon: String,
    pub amount: Decimal,
    /// Percent of the month total for the type, one decimal place.
    pub pct: Decimal,
}

fn in_month(tx: &Transaction, year: i32, month: u32) -> bool {
    tx.date.year() == year && tx.date.month() == month
}

pub fn month_totals(txs: &[Transaction], year: i32, month: u32) -> MonthTotals {
    let mut totals = MonthTotals::default();
    for tx in txs.iter().filter(|t| in_month(t, year, month)) {
        match tx.r#type {
            TxType::Income => totals.income += tx.amount,
            TxType::Expense => totals.expense += tx.amount,
        }
    }
    totals.balance = totals.income - totals.expense;
    totals
}

/// Per-category sums for one month and type, largest first.
pub fn category_breakdown(
    txs: &[Transaction],
    year: i32,
    month: u32,
    kind: TxType,
) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = Vec::new();
    let mut total = Decimal::ZERO;
    for tx in txs
        .iter()
        .filter(|t| t.r#type == kind && in_month(t, year, month))
    {
        total += tx.amount;
        match shares.iter_mut().find(|s| s.name == tx.category_name) {
            Some(s) => s.amount += tx.amount,
            None => shares.push(CategoryShare {
                name: tx.category_name.clone(),
                icon: tx.category_icon.clone(),
                amount: tx.amount,
                pct: Decimal::ZERO,
            }),
        }
    }
    if total > Decimal::ZERO {
        for s in &mut shares {
            s.pct = (s.amount / total * Decimal::ONE_HUNDRED).round_dp(1);
        }
    }
    // stable sort keeps first-seen order among equal amounts
    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    shares
}

/// The `n` most recent transactions, newest first.
pub fn recent(txs: &[Transaction], n: usize) -> Vec<&Transaction> {
    let mut out: Vec<&Transaction> = txs.iter().collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out.truncate(n);
    out
}
