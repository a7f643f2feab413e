// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::LocalRepository;
use super::sync::describe;
use crate::classifier::Classifier;
use crate::models::TxType;
use crate::sync::{IncomingRecord, import_batch, parse_record_date};
use crate::utils::parse_decimal;
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::io::Read;

pub fn handle(repo: &mut LocalRepository, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("csv", sub)) => {
            let path = sub.get_one::<String>("path").map(|s| s.trim()).unwrap_or_default();
            let file = std::fs::File::open(path).with_context(|| format!("Open CSV {}", path))?;
            let records = read_records(file)?;
            let report = import_batch(repo, &Classifier::builtin(), records)?;
            println!("{} from {}", describe(&report), path);
        }
        _ => {}
    }
    Ok(())
}

/// Reads `date,amount,note[,id][,type]` rows; columns are matched by header name.
pub fn read_records<R: Read>(input: R) -> Result<Vec<IncomingRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    let headers = rdr.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let date_col = col("date").context("CSV has no 'date' column")?;
    let amount_col = col("amount").context("CSV has no 'amount' column")?;
    let (note_col, id_col, type_col) = (col("note"), col("id"), col("type"));

    let mut out = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = line + 2;
        let date_raw = rec.get(date_col).unwrap_or("");
        let date = parse_record_date(date_raw)
            .ok_or_else(|| anyhow!("Row {}: invalid date '{}'", row, date_raw))?;
        let amount = parse_decimal(rec.get(amount_col).unwrap_or(""))
            .with_context(|| format!("Row {}", row))?;
        if amount <= Decimal::ZERO {
            return Err(anyhow!("Row {}: amount must be positive, got {}", row, amount));
        }
        let field = |c: Option<usize>| {
            c.and_then(|c| rec.get(c))
                .map(str::to_string)
                .filter(|s| !s.is_empty())
        };
        let r#type = match field(type_col) {
            Some(t) => t.parse::<TxType>().with_context(|| format!("Row {}", row))?,
            None => TxType::Expense,
        };
        out.push(IncomingRecord {
            id: field(id_col),
            amount,
            date,
            note: field(note_col),
            r#type,
        });
    }
    Ok(out)
}
