// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::SqliteStore;
use crate::repository::Repository;

pub mod categories;
pub mod config;
pub mod fixed;
pub mod importer;
pub mod reports;
pub mod sync;
pub mod transactions;

pub type LocalRepository = Repository<SqliteStore>;

pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
