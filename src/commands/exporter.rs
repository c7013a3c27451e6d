// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::history::display_series;
use crate::config::Config;
use crate::service::NetWorthService;
use crate::utils::{as_of_or_today, range_or_default};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("history", sub)) => export_history(conn, cfg, sub),
        _ => Ok(()),
    }
}

fn export_history(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }
    let range = range_or_default(sub, cfg.default_range)?;
    let as_of = as_of_or_today(sub)?;

    let svc = NetWorthService::new(conn, cfg.base_currency.clone());
    let snapshot = svc.fetch_snapshot(range, as_of)?;
    let series = display_series(&snapshot, None, false)?;

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record(["date", "value", "currency"])?;
        for p in &series {
            wtr.write_record([
                p.date.to_string(),
                p.value.to_string(),
                snapshot.currency.clone(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let doc = json!({
            "as_of": snapshot.as_of,
            "range": snapshot.range,
            "currency": snapshot.currency,
            "points": &series,
        });
        std::fs::write(out, serde_json::to_string_pretty(&doc)?)?;
    }
    println!("Exported {} points ({}) to {}", series.len(), range, out);
    Ok(())
}
