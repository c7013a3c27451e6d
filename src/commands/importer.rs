// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::models::Account;
use crate::service::NetWorthService;
use crate::utils::{parse_date, parse_decimal};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;
use std::collections::{HashMap, hash_map::Entry};

pub fn handle(conn: &mut Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balances", sub)) => import_balances(conn, cfg, sub),
        _ => Ok(()),
    }
}

/// Columns: `date,account,value`. All rows land or none do.
fn import_balances(conn: &mut Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let svc = NetWorthService::new(&tx, cfg.base_currency.clone());
    let mut account_cache: HashMap<String, Account> = HashMap::new();
    let mut imported = 0usize;

    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let date_raw = rec.get(0).context("date missing")?;
        let account = rec.get(1).context("account missing")?.to_string();
        let value_raw = rec.get(2).context("value missing")?;

        let date = parse_date(date_raw)
            .with_context(|| format!("Invalid balance date '{}' on row {}", date_raw, line + 1))?;
        let value = parse_decimal(value_raw)
            .with_context(|| format!("Invalid value '{}' for {}", value_raw, account))?;

        let acct = match account_cache.entry(account) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let acct = svc.account_by_name(entry.key())?;
                entry.insert(acct)
            }
        };
        svc.record_balance_for(acct, date, value)?;
        imported += 1;
    }
    tx.commit()?;
    tracing::info!(rows = imported, path, "balances imported");
    println!("Imported {} balances from {}", imported, path);
    Ok(())
}
