// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KakeiboError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("'{0}' not found")]
    NotFound(String),
    #[error("Sync request failed: {0}")]
    SyncTransport(String),
    #[error("Sync response rejected: {0}")]
    SyncPayload(String),
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl KakeiboError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_sync_failure(&self) -> bool {
        matches!(self, Self::SyncTransport(_) | Self::SyncPayload(_))
    }
}

pub type Result<T> = std::result::Result<T, KakeiboError>;
