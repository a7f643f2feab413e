// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{FixedExpenseRule, Transaction};
use crate::utils::last_day_of_month;
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

/// Identifier of the transaction `rule_id` generates in the given month.
pub fn generated_id(rule_id: &str, year: i32, month: u32) -> String {
    format!("fixed-{}-{:04}-{:02}", rule_id, year, month)
}

/// Day the rule charges in `year`/`month`; a day past the month end is
/// clamped to its last day (a 31st rule charges on the 30th in April).
pub fn effective_day(rule: &FixedExpenseRule, year: i32, month: u32) -> Option<u32> {
    let last = last_day_of_month(year, month)?;
    Some(rule.day_of_month.min(last))
}

/// Transactions due by `today` that are not yet among `existing_ids`.
///
/// Pure: calling it again with the returned ids merged into `existing_ids`
/// yields nothing for the same month.
pub fn materialize(
    rules: &[FixedExpenseRule],
    existing_ids: &HashSet<String>,
    today: NaiveDate,
) -> Vec<Transaction> {
    let (year, month) = (today.year(), today.month());
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for rule in rules {
        let Some(day) = effective_day(rule, year, month) else {
            continue;
        };
        if today.day() < day {
            continue;
        }
        let id = generated_id(&rule.id, year, month);
        if existing_ids.contains(&id) || !seen.insert(id.clone()) {
            continue;
        }
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        out.push(Transaction {
            id,
            amount: rule.amount,
            r#type: rule.r#type,
            category_name: rule.category_name.clone(),
            category_icon: rule.category_icon.clone(),
            note: Some(rule.name.clone()),
            date,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TxType;
    use rust_decimal::Decimal;

    fn rule(id: &str, day: u32) -> FixedExpenseRule {
        FixedExpenseRule {
            id: id.into(),
            name: "Gym".into(),
            amount: Decimal::from(8000),
            r#type: TxType::Expense,
            category_name: "Entertainment".into(),
            category_icon: "🎮".into(),
            day_of_month: day,
        }
    }

    #[test]
    fn id_is_stable_per_month() {
        assert_eq!(generated_id("r1", 2024, 6), "fixed-r1-2024-06");
        assert_eq!(generated_id("r1", 2024, 6), generated_id("r1", 2024, 6));
        assert_ne!(generated_id("r1", 2024, 6), generated_id("r1", 2024, 7));
    }

    #[test]
    fn duplicate_rule_ids_generate_once() {
        let rules = vec![rule("r1", 1), rule("r1", 1)];
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(materialize(&rules, &HashSet::new(), today).len(), 1);
    }

    #[test]
    fn february_clamps_late_days() {
        let r = rule("r1", 31);
        assert_eq!(effective_day(&r, 2024, 2), Some(29));
        assert_eq!(effective_day(&r, 2023, 2), Some(28));
        assert_eq!(effective_day(&r, 2023, 1), Some(31));
    }
}
