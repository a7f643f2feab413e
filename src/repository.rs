// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::classifier::Classifier;
use crate::db::{Slot, Store, load_collection, save_collection};
use crate::error::{KakeiboError, Result};
use crate::fixed;
use crate::models::{
    FixedExpenseRule, FixedRuleInput, NewTransaction, OTHER, Transaction, TransactionPatch,
    TxType, lookup_category,
};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub month: Option<(i32, u32)>,
    pub r#type: Option<TxType>,
    pub category: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some((y, m)) = self.month {
            if tx.date.year() != y || tx.date.month() != m {
                return false;
            }
        }
        if let Some(kind) = self.r#type {
            if tx.r#type != kind {
                return false;
            }
        }
        if let Some(cat) = &self.category {
            if !tx.category_name.eq_ignore_ascii_case(cat.trim()) {
                return false;
            }
        }
        true
    }
}

/// Owns the transaction and fixed-expense collections. Every mutation is
/// written through to the store before returning.
pub struct Repository<S: Store> {
    store: S,
    transactions: Vec<Transaction>,
    fixed_rules: Vec<FixedExpenseRule>,
}

impl<S: Store> Repository<S> {
    pub fn open(store: S) -> Result<Self> {
        let mut transactions: Vec<Transaction> = load_collection(&store, Slot::Transactions)?;
        let filled = fill_missing_categories(&mut transactions);
        if filled > 0 {
            debug!(filled, "categories filled for stored records");
        }
        let fixed_rules: Vec<FixedExpenseRule> = load_collection(&store, Slot::FixedRules)?;
        debug!(
            transactions = transactions.len(),
            fixed_rules = fixed_rules.len(),
            "repository loaded"
        );
        Ok(Self {
            store,
            transactions,
            fixed_rules,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn query<P>(&self, predicate: P) -> Vec<&Transaction>
    where
        P: Fn(&Transaction) -> bool,
    {
        self.transactions.iter().filter(|&t| predicate(t)).collect()
    }

    /// Matching transactions, newest first.
    pub fn filter(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        let mut out = self.query(|t| filter.matches(t));
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }

    pub fn get(&self, id: &str) -> Result<&Transaction> {
        self.transactions
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| KakeiboError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.transactions.iter().any(|t| t.id == id)
    }

    pub fn add(&mut self, new: NewTransaction) -> Result<Transaction> {
        let tx = new.into_transaction()?;
        if self.contains(&tx.id) {
            return Err(KakeiboError::validation(format!(
                "transaction id '{}' already exists",
                tx.id
            )));
        }
        self.transactions.push(tx.clone());
        self.persist_transactions()?;
        debug!(id = %tx.id, amount = %tx.amount, "transaction added");
        Ok(tx)
    }

    /// Appends already-built transactions with a single save. Ids must be new.
    pub fn extend(&mut self, txs: Vec<Transaction>) -> Result<usize> {
        if txs.is_empty() {
            return Ok(0);
        }
        let mut ids: HashSet<&str> = self.transactions.iter().map(|t| t.id.as_str()).collect();
        for tx in &txs {
            tx.validate()?;
            if !ids.insert(tx.id.as_str()) {
                return Err(KakeiboError::validation(format!(
                    "transaction id '{}' already exists",
                    tx.id
                )));
            }
        }
        let n = txs.len();
        self.transactions.extend(txs);
        self.persist_transactions()?;
        Ok(n)
    }

    /// `Ok(None)` when no transaction has `id`.
    pub fn update(&mut self, id: &str, patch: &TransactionPatch) -> Result<Option<Transaction>> {
        let Some(pos) = self.transactions.iter().position(|t| t.id == id) else {
            debug!(id, "update skipped, unknown id");
            return Ok(None);
        };
        let updated = patch.apply(&self.transactions[pos])?;
        self.transactions[pos] = updated.clone();
        self.persist_transactions()?;
        debug!(id, "transaction updated");
        Ok(Some(updated))
    }

    /// `Ok(false)` when no transaction has `id`.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            debug!(id, "remove skipped, unknown id");
            return Ok(false);
        }
        self.persist_transactions()?;
        debug!(id, "transaction removed");
        Ok(true)
    }

    pub fn fixed_rules(&self) -> &[FixedExpenseRule] {
        &self.fixed_rules
    }

    /// Replaces the rule with the same id, or appends a new one.
    pub fn upsert_fixed_rule(&mut self, input: FixedRuleInput) -> Result<FixedExpenseRule> {
        let rule = input.into_rule()?;
        match self.fixed_rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule.clone(),
            None => self.fixed_rules.push(rule.clone()),
        }
        save_collection(&mut self.store, Slot::FixedRules, &self.fixed_rules)?;
        debug!(id = %rule.id, name = %rule.name, "fixed expense saved");
        Ok(rule)
    }

    /// Transactions the rule already generated are kept.
    pub fn delete_fixed_rule(&mut self, id: &str) -> Result<bool> {
        let before = self.fixed_rules.len();
        self.fixed_rules.retain(|r| r.id != id);
        if self.fixed_rules.len() == before {
            return Ok(false);
        }
        save_collection(&mut self.store, Slot::FixedRules, &self.fixed_rules)?;
        debug!(id, "fixed expense deleted");
        Ok(true)
    }

    pub fn run_materialization(&mut self, today: NaiveDate) -> Result<Vec<Transaction>> {
        let existing: HashSet<String> = self.transactions.iter().map(|t| t.id.clone()).collect();
        let generated = fixed::materialize(&self.fixed_rules, &existing, today);
        for tx in &generated {
            debug!(id = %tx.id, date = %tx.date, "fixed expense materialized");
        }
        self.extend(generated.clone())?;
        tracing::info!(generated = generated.len(), %today, "fixed expense run");
        Ok(generated)
    }

    fn persist_transactions(&mut self) -> Result<()> {
        save_collection(&mut self.store, Slot::Transactions, &self.transactions)
    }
}

/// Classifies records whose category was never set, and gives a named but
/// icon-less category its catalog icon.
fn fill_missing_categories(transactions: &mut [Transaction]) -> usize {
    let classifier = Classifier::builtin();
    let mut filled = 0;
    for tx in transactions.iter_mut() {
        if tx.category_name.trim().is_empty() {
            let c = classifier.classify(tx.note.as_deref());
            tx.category_name = c.category_name;
            if tx.category_icon.is_empty() {
                tx.category_icon = c.category_icon;
            }
            filled += 1;
        } else if tx.category_icon.is_empty() {
            tx.category_icon = lookup_category(tx.r#type, &tx.category_name)
                .unwrap_or(OTHER)
                .icon
                .to_string();
            filled += 1;
        }
    }
    filled
}
