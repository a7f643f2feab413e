// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Import of externally sourced transactions with duplicate suppression.
//!
//! A record is a duplicate when its id is already known, or when another
//! transaction has the same `date|amount|note` key. Both indices grow while a
//! batch is processed, so repeats inside one batch are caught as well.

use crate::classifier::Classifier;
use crate::db::Store;
use crate::error::{KakeiboError, Result};
use crate::models::{Transaction, TxType, clean_note};
use crate::repository::Repository;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// A validated incoming record, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingRecord {
    pub id: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub r#type: TxType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub added: usize,
    pub duplicates: usize,
    pub malformed: usize,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Option<RawId>,
    amount: Decimal,
    date: String,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    r#type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Debug, Deserialize)]
struct SyncResponse {
    success: bool,
    #[serde(default)]
    transactions: Option<Vec<Value>>,
    #[serde(default)]
    error: Option<String>,
}

pub fn composite_key(date: NaiveDate, amount: Decimal, note: Option<&str>) -> String {
    format!("{}|{}|{}", date, amount.normalize(), note.unwrap_or(""))
}

fn key_of(tx: &Transaction) -> String {
    composite_key(tx.date, tx.amount, tx.note.as_deref())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, keeping only its date.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

pub fn parse_record(value: Value) -> Result<IncomingRecord> {
    let raw: RawRecord = serde_json::from_value(value)
        .map_err(|e| KakeiboError::SyncPayload(format!("malformed record: {}", e)))?;
    let date = parse_record_date(&raw.date)
        .ok_or_else(|| KakeiboError::SyncPayload(format!("invalid date '{}'", raw.date)))?;
    if raw.amount <= Decimal::ZERO {
        return Err(KakeiboError::SyncPayload(format!(
            "amount must be positive, got {}",
            raw.amount
        )));
    }
    let r#type = match raw.r#type.as_deref().map(str::trim) {
        None | Some("") => TxType::Expense,
        Some(t) => t
            .parse::<TxType>()
            .map_err(|_| KakeiboError::SyncPayload(format!("unknown type '{}'", t)))?,
    };
    let id = raw.id.map(|id| match id {
        RawId::Text(s) => s.trim().to_string(),
        RawId::Number(n) => n.to_string(),
    });
    Ok(IncomingRecord {
        id: id.filter(|s| !s.is_empty()),
        amount: raw.amount,
        date,
        note: clean_note(raw.note),
        r#type,
    })
}

/// Interprets a sync endpoint reply. Returns the raw entries on success.
pub fn decode_response(status: u16, body: &str) -> Result<Vec<Value>> {
    if !(200..300).contains(&status) {
        return Err(KakeiboError::SyncTransport(format!("HTTP {}", status)));
    }
    let value: Value = serde_json::from_str(body)
        .map_err(|e| KakeiboError::SyncPayload(format!("response is not valid JSON: {}", e)))?;
    let resp: SyncResponse = serde_json::from_value(value)
        .map_err(|e| KakeiboError::SyncPayload(format!("unexpected response shape: {}", e)))?;
    if !resp.success {
        return Err(KakeiboError::SyncPayload(
            resp.error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "sync failed".to_string()),
        ));
    }
    resp.transactions.ok_or_else(|| {
        KakeiboError::SyncPayload("response has no transactions list".to_string())
    })
}

/// Validates raw entries one by one; malformed ones are skipped and counted.
pub fn parse_entries(entries: Vec<Value>) -> (Vec<IncomingRecord>, usize) {
    let mut records = Vec::with_capacity(entries.len());
    let mut malformed = 0;
    for (i, entry) in entries.into_iter().enumerate() {
        match parse_record(entry) {
            Ok(r) => records.push(r),
            Err(err) => {
                warn!(index = i, %err, "skipping malformed sync record");
                malformed += 1;
            }
        }
    }
    (records, malformed)
}

pub fn import_batch<S: Store>(
    repo: &mut Repository<S>,
    classifier: &Classifier,
    incoming: Vec<IncomingRecord>,
) -> Result<ImportReport> {
    let mut ids: HashSet<String> = repo.list().iter().map(|t| t.id.clone()).collect();
    let mut keys: HashSet<String> = repo.list().iter().map(key_of).collect();
    let mut report = ImportReport::default();
    let mut fresh = Vec::new();

    for rec in incoming {
        if let Some(id) = rec.id.as_deref() {
            if ids.contains(id) {
                debug!(id, "duplicate id");
                report.duplicates += 1;
                continue;
            }
        }
        let key = composite_key(rec.date, rec.amount, rec.note.as_deref());
        if keys.contains(&key) {
            debug!(%key, "duplicate date/amount/note");
            report.duplicates += 1;
            continue;
        }
        let category = classifier.classify(rec.note.as_deref());
        let tx = Transaction {
            id: rec
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            amount: rec.amount,
            r#type: rec.r#type,
            category_name: category.category_name,
            category_icon: category.category_icon,
            note: rec.note,
            date: rec.date,
        };
        ids.insert(tx.id.clone());
        keys.insert(key);
        fresh.push(tx);
    }

    report.added = repo.extend(fresh)?;
    Ok(report)
}

/// Decodes a reply and imports it. Nothing is written when the reply is rejected.
pub fn import_response<S: Store>(
    repo: &mut Repository<S>,
    classifier: &Classifier,
    status: u16,
    body: &str,
) -> Result<ImportReport> {
    let entries = decode_response(status, body)?;
    let (records, malformed) = parse_entries(entries);
    let mut report = import_batch(repo, classifier, records)?;
    report.malformed = malformed;
    Ok(report)
}

pub fn run_sync<S: Store>(
    repo: &mut Repository<S>,
    classifier: &Classifier,
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<ImportReport> {
    info!(url, "sync request");
    let resp = client
        .get(url)
        .send()
        .map_err(|e| KakeiboError::SyncTransport(e.to_string()))?;
    let status = resp.status().as_u16();
    let body = resp
        .text()
        .map_err(|e| KakeiboError::SyncTransport(e.to_string()))?;
    let report = import_response(repo, classifier, status, &body)?;
    info!(
        added = report.added,
        duplicates = report.duplicates,
        malformed = report.malformed,
        "sync finished"
    );
    Ok(report)
}
