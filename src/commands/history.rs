// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::format::fmt_money;
use crate::models::{NetWorthPoint, NetWorthSnapshot};
use crate::sampler::sample_history;
use crate::service::NetWorthService;
use crate::utils::{as_of_or_today, maybe_print_json, pretty_table, range_or_default};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let raw = sub.get_flag("raw");
    let account = sub.get_one::<String>("account").map(|s| s.trim());
    let range = range_or_default(sub, cfg.default_range)?;
    let as_of = as_of_or_today(sub)?;

    let svc = NetWorthService::new(conn, cfg.base_currency.clone());
    let snapshot = svc.fetch_snapshot(range, as_of)?;
    let series = display_series(&snapshot, account, raw)?;
    tracing::debug!(%range, points = series.len(), "history ready");

    if !maybe_print_json(json_flag, jsonl_flag, &series)? {
        let rows = series
            .iter()
            .map(|p| vec![p.date.to_string(), fmt_money(p.value, &snapshot.currency)])
            .collect();
        println!("{}", pretty_table(&["Date", "Net worth"], rows));
    }
    Ok(())
}

/// Series to show for a snapshot: the total or one account's history,
/// sampled for the snapshot's range unless `raw`.
pub fn display_series(
    snapshot: &NetWorthSnapshot,
    account: Option<&str>,
    raw: bool,
) -> Result<Vec<NetWorthPoint>> {
    let source = match account {
        Some(name) => snapshot
            .accounts
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.history.as_slice())
            .ok_or_else(|| anyhow!("Account '{}' not found", name))?,
        None => snapshot.history.as_slice(),
    };
    if raw {
        Ok(source.to_vec())
    } else {
        Ok(sample_history(source, snapshot.range))
    }
}
