// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{DEFAULT_CURRENCY_SYMBOL, get_setting, set_setting};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").map(|s| s.as_str()).unwrap_or_default();
            match (get_setting(conn, key)?, key) {
                (Some(v), _) => println!("{}", v),
                (None, "currency_symbol") => println!("{}", DEFAULT_CURRENCY_SYMBOL),
                (None, _) => println!("{} is not set", key),
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").map(|s| s.as_str()).unwrap_or_default();
            let value = sub
                .get_one::<String>("value")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| anyhow!("value must not be empty"))?;
            set_setting(conn, key, value)?;
            println!("{} set to {}", key, value);
        }
        _ => {}
    }
    Ok(())
}
