// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::LocalRepository;
use crate::classifier::Classifier;
use crate::sync::{ImportReport, run_sync};
use crate::utils::{get_sync_url, http_client, set_sync_url};
use anyhow::{Result, anyhow};

pub fn handle(repo: &mut LocalRepository, m: &clap::ArgMatches) -> Result<()> {
    let url = resolve_url(repo, m)?;
    set_sync_url(repo.store().connection(), &url)?;

    let client = http_client()?;
    match run_sync(repo, &Classifier::builtin(), &client, &url) {
        Ok(report) => {
            println!("{}", describe(&report));
            Ok(())
        }
        Err(err) if err.is_sync_failure() => {
            tracing::error!(%err, "sync failed");
            Err(anyhow!("Sync error: {}", err))
        }
        Err(err) => Err(err.into()),
    }
}

pub fn resolve_url(repo: &LocalRepository, m: &clap::ArgMatches) -> Result<String> {
    if let Some(url) = m
        .get_one::<String>("url")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        return Ok(url);
    }
    get_sync_url(repo.store().connection())?
        .ok_or_else(|| anyhow!("No sync URL configured; pass --url or run `config set sync_url <URL>`"))
}

pub fn describe(report: &ImportReport) -> String {
    let mut msg = if report.added > 0 {
        format!("Imported {} transaction(s)", report.added)
    } else {
        "No new transactions".to_string()
    };
    if report.duplicates > 0 {
        msg.push_str(&format!(", {} duplicate(s) skipped", report.duplicates));
    }
    if report.malformed > 0 {
        msg.push_str(&format!(", {} malformed record(s) ignored", report.malformed));
    }
    msg
}
