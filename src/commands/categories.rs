// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::classifier::Classifier;
use crate::models::{TxType, categories_for};
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let kinds = match sub.get_one::<String>("type") {
                Some(t) => vec![t.parse::<TxType>()?],
                None => vec![TxType::Expense, TxType::Income],
            };
            let mut data = Vec::new();
            for kind in kinds {
                for c in categories_for(kind) {
                    data.push(vec![kind.to_string(), c.icon.to_string(), c.name.to_string()]);
                }
            }
            println!("{}", pretty_table(&["Type", "Icon", "Category"], data));
        }
        Some(("classify", sub)) => {
            let text = sub.get_one::<String>("text").map(|s| s.as_str());
            let c = Classifier::builtin().classify(text);
            println!("{} {}", c.category_icon, c.category_name);
        }
        _ => {}
    }
    Ok(())
}
