// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod classifier;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod fixed;
pub mod models;
pub mod repository;
pub mod summary;
pub mod sync;
pub mod utils;

pub use error::{KakeiboError, Result};
