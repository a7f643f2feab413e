// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{KakeiboError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    #[default]
    Expense,
    Income,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Expense => "expense",
            TxType::Income => "income",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = KakeiboError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(TxType::Expense),
            "income" => Ok(TxType::Income),
            other => Err(KakeiboError::validation(format!(
                "type must be 'expense' or 'income', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub icon: &'static str,
}

pub const OTHER: Category = Category {
    name: "Other",
    icon: "⋯",
};

pub const EXPENSE_CATEGORIES: &[Category] = &[
    Category { name: "Food", icon: "🍽️" },
    Category { name: "Transport", icon: "🚗" },
    Category { name: "Housing", icon: "🏠" },
    Category { name: "Utilities", icon: "⚡" },
    Category { name: "Communication", icon: "📱" },
    Category { name: "Medical", icon: "🏥" },
    Category { name: "Clothing", icon: "👕" },
    Category { name: "Education", icon: "📚" },
    Category { name: "Entertainment", icon: "🎮" },
    Category { name: "Daily Goods", icon: "🛒" },
    Category { name: "Beauty", icon: "✂️" },
    OTHER,
];

pub const INCOME_CATEGORIES: &[Category] = &[
    Category { name: "Salary", icon: "💰" },
    Category { name: "Side Job", icon: "💼" },
    Category { name: "Investment", icon: "📈" },
    Category { name: "Bonus", icon: "🎁" },
    OTHER,
];

pub fn categories_for(kind: TxType) -> &'static [Category] {
    match kind {
        TxType::Expense => EXPENSE_CATEGORIES,
        TxType::Income => INCOME_CATEGORIES,
    }
}

pub fn lookup_category(kind: TxType, name: &str) -> Option<Category> {
    let name = name.trim();
    categories_for(kind)
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .copied()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub r#type: TxType,
    /// Empty for records pushed straight from the spreadsheet; filled on load.
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub category_icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(KakeiboError::validation("transaction id must not be empty"));
        }
        validate_amount(self.amount)?;
        validate_category(&self.category_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpenseRule {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub r#type: TxType,
    pub category_name: String,
    pub category_icon: String,
    pub day_of_month: u32,
}

impl FixedExpenseRule {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(KakeiboError::validation("fixed expense name must not be empty"));
        }
        validate_amount(self.amount)?;
        validate_category(&self.category_name)?;
        if !(1..=31).contains(&self.day_of_month) {
            return Err(KakeiboError::validation(format!(
                "day of month must be between 1 and 31, got {}",
                self.day_of_month
            )));
        }
        Ok(())
    }
}

/// Fields for a transaction about to be recorded. A missing id is assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub id: Option<String>,
    pub amount: Decimal,
    pub r#type: TxType,
    pub category_name: String,
    pub category_icon: String,
    pub note: Option<String>,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn into_transaction(self) -> Result<Transaction> {
        let id = match self.id.map(|s| s.trim().to_string()) {
            Some(id) if !id.is_empty() => id,
            _ => uuid::Uuid::new_v4().to_string(),
        };
        let tx = Transaction {
            id,
            amount: self.amount,
            r#type: self.r#type,
            category_name: self.category_name.trim().to_string(),
            category_icon: self.category_icon,
            note: clean_note(self.note),
            date: self.date,
        };
        tx.validate()?;
        Ok(tx)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub amount: Option<Decimal>,
    pub r#type: Option<TxType>,
    pub category_name: Option<String>,
    pub category_icon: Option<String>,
    /// `Some(None)` clears the note.
    pub note: Option<Option<String>>,
    pub date: Option<NaiveDate>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        *self == TransactionPatch::default()
    }

    /// Returns the patched copy; `tx` itself is left untouched.
    pub fn apply(&self, tx: &Transaction) -> Result<Transaction> {
        let mut out = tx.clone();
        if let Some(amount) = self.amount {
            out.amount = amount;
        }
        if let Some(kind) = self.r#type {
            out.r#type = kind;
        }
        if let Some(name) = &self.category_name {
            out.category_name = name.trim().to_string();
        }
        if let Some(icon) = &self.category_icon {
            out.category_icon = icon.clone();
        }
        if let Some(note) = &self.note {
            out.note = clean_note(note.clone());
        }
        if let Some(date) = self.date {
            out.date = date;
        }
        out.validate()?;
        Ok(out)
    }
}

/// Create-or-edit input for a fixed expense. `id` present means edit.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRuleInput {
    pub id: Option<String>,
    pub name: String,
    pub amount: Decimal,
    pub r#type: TxType,
    pub category_name: String,
    pub category_icon: String,
    pub day_of_month: u32,
}

impl FixedRuleInput {
    pub fn into_rule(self) -> Result<FixedExpenseRule> {
        let id = match self.id.map(|s| s.trim().to_string()) {
            Some(id) if !id.is_empty() => id,
            _ => uuid::Uuid::new_v4().simple().to_string(),
        };
        let rule = FixedExpenseRule {
            id,
            name: self.name.trim().to_string(),
            amount: self.amount,
            r#type: self.r#type,
            category_name: self.category_name.trim().to_string(),
            category_icon: self.category_icon,
            day_of_month: self.day_of_month,
        };
        rule.validate()?;
        Ok(rule)
    }
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(KakeiboError::validation(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}

fn validate_category(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(KakeiboError::validation("category must be set"));
    }
    Ok(())
}

pub(crate) fn clean_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}
