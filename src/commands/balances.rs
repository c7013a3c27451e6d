// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::summary::headline;
use crate::config::Config;
use crate::format::fmt_money;
use crate::models::NetWorthSnapshot;
use crate::service::{NetWorthService, SnapshotFeed, SnapshotObserver};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

/// Prints the refreshed headline after a balance is written.
struct HeadlinePrinter;

impl SnapshotObserver for HeadlinePrinter {
    fn on_snapshot(&mut self, snapshot: &NetWorthSnapshot) {
        println!("{}", headline(snapshot));
    }
}

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, cfg, sub)?,
        Some(("list", sub)) => list(conn, cfg, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let account = sub.get_one::<String>("account").unwrap().trim();
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let value = parse_decimal(sub.get_one::<String>("value").unwrap())?;

    let svc = NetWorthService::new(conn, cfg.base_currency.clone());
    svc.record_balance(account, date, value)?;
    println!("Recorded {} for '{}' on {}", value, account, date);

    let as_of = chrono::Local::now().date_naive().max(date);
    let mut feed = SnapshotFeed::new(cfg.default_range, as_of);
    feed.subscribe(Box::new(HeadlinePrinter));
    feed.notify_mutation(&svc)?;
    Ok(())
}

fn list(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let account = sub.get_one::<String>("account").map(|s| s.as_str());

    let svc = NetWorthService::new(conn, cfg.base_currency.clone());
    let data = svc.list_balances(account)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.date.to_string(),
                    b.account.clone(),
                    b.kind.as_str().to_string(),
                    fmt_money(b.value, &b.currency),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Account", "Kind", "Balance"], rows)
        );
    }
    Ok(())
}
