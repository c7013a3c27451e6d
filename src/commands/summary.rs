// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::format::{fmt_change, fmt_money, styled_delta_cell};
use crate::metrics::Direction;
use crate::models::NetWorthSnapshot;
use crate::service::NetWorthService;
use crate::utils::{as_of_or_today, maybe_print_json, range_or_default};
use anyhow::Result;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let range = range_or_default(sub, cfg.default_range)?;
    let as_of = as_of_or_today(sub)?;

    let svc = NetWorthService::new(conn, cfg.base_currency.clone());
    let snapshot = svc.fetch_snapshot(range, as_of)?;
    if maybe_print_json(json_flag, jsonl_flag, &snapshot)? {
        return Ok(());
    }
    println!("{}", metrics_table(&snapshot));
    println!("{}", breakdown_table(&snapshot));
    Ok(())
}

/// One-line plain-text summary.
pub fn headline(snapshot: &NetWorthSnapshot) -> String {
    format!(
        "Net worth {} as of {} | month over month {} | {} change {}",
        fmt_money(snapshot.current_total, &snapshot.currency),
        snapshot.as_of,
        fmt_change(&snapshot.month_over_month, &snapshot.currency),
        snapshot.range,
        fmt_change(&snapshot.period, &snapshot.currency),
    )
}

fn metrics_table(snapshot: &NetWorthSnapshot) -> Table {
    let ccy = snapshot.currency.as_str();
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(vec![
        Cell::new(format!("Net worth ({})", snapshot.as_of)),
        Cell::new("Month over month"),
        Cell::new(format!("Change ({})", snapshot.range)),
    ]);
    t.add_row(vec![
        Cell::new(fmt_money(snapshot.current_total, ccy)),
        styled_delta_cell(&snapshot.month_over_month, ccy),
        styled_delta_cell(&snapshot.period, ccy),
    ]);
    t
}

fn breakdown_table(snapshot: &NetWorthSnapshot) -> Table {
    let ccy = snapshot.currency.as_str();
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(vec!["Account", "Kind", "CCY", "Value (BASE)"]);
    for acct in &snapshot.accounts {
        t.add_row(vec![
            Cell::new(&acct.name),
            Cell::new(acct.kind.as_str()),
            Cell::new(&acct.currency),
            Cell::new(fmt_money(acct.current_value, ccy))
                .fg(Direction::of(acct.current_value).color()),
        ]);
    }
    t
}
