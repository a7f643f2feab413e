// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use anyhow::Context;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.kakeibo", "Kakeibo", "kakeibo"));

pub const DB_ENV: &str = "KAKEIBO_DB";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Transactions,
    FixedRules,
}

impl Slot {
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Transactions => "kakeibo_transactions",
            Slot::FixedRules => "kakeibo_fixed_expenses",
        }
    }
}

/// Blind key-value persistence for serialized collections.
pub trait Store {
    fn load(&self, slot: Slot) -> Result<Option<String>>;
    fn save(&mut self, slot: Slot, payload: &str) -> Result<()>;
}

pub fn load_collection<T: DeserializeOwned, S: Store + ?Sized>(
    store: &S,
    slot: Slot,
) -> Result<Vec<T>> {
    match store.load(slot)? {
        Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
        _ => Ok(Vec::new()),
    }
}

pub fn save_collection<T: Serialize, S: Store + ?Sized>(
    store: &mut S,
    slot: Slot,
    items: &[T],
) -> Result<()> {
    let raw = serde_json::to_string(items)?;
    store.save(slot, &raw)
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Store for SqliteStore {
    fn load(&self, slot: Slot) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key=?1",
                params![slot.key()],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    fn save(&mut self, slot: Slot, payload: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO slots(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![slot.key(), payload],
        )?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<Slot, String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(mut self, slot: Slot, payload: impl Into<String>) -> Self {
        self.slots.insert(slot, payload.into());
        self
    }

    pub fn raw(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(|s| s.as_str())
    }

    /// Number of `save` calls seen so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Store for MemoryStore {
    fn load(&self, slot: Slot) -> Result<Option<String>> {
        Ok(self.slots.get(&slot).cloned())
    }

    fn save(&mut self, slot: Slot, payload: &str) -> Result<()> {
        self.slots.insert(slot, payload.to_string());
        self.saves += 1;
        Ok(())
    }
}

pub fn db_path() -> anyhow::Result<PathBuf> {
    if let Some(custom) = std::env::var_os(DB_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(custom));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("kakeibo.sqlite"))
}

pub fn open_or_init() -> anyhow::Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- serialized collections, one JSON document per slot
    CREATE TABLE IF NOT EXISTS slots(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}
