// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Config, set_base_currency};
use crate::fx::{FxRate, add_rate, fetch_rates, foreign_currencies, http_client, list_rates};
use crate::utils::{parse_date, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate, TimeDelta};
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-base", sub)) => {
            let ccy = sub.get_one::<String>("currency").unwrap().trim().to_uppercase();
            set_base_currency(conn, &ccy)?;
            println!("Base currency set to {}", ccy);
        }
        Some(("add", sub)) => {
            let rate = FxRate {
                date: parse_date(sub.get_one::<String>("date").unwrap())?,
                base: sub.get_one::<String>("base").unwrap().trim().to_uppercase(),
                quote: sub.get_one::<String>("quote").unwrap().trim().to_uppercase(),
                rate: parse_decimal(sub.get_one::<String>("rate").unwrap())?,
            };
            if rate.rate <= rust_decimal::Decimal::ZERO {
                return Err(anyhow!("Rate must be positive, got {}", rate.rate));
            }
            add_rate(conn, &rate)?;
            println!(
                "Stored 1 {} = {} {} on {}",
                rate.base, rate.rate, rate.quote, rate.date
            );
        }
        Some(("fetch", sub)) => {
            let days: usize = *sub.get_one::<usize>("days").unwrap_or(&120);
            let base = &cfg.base_currency;
            let targets = foreign_currencies(conn, base)?;
            if targets.is_empty() {
                println!("No non-base currencies found; nothing to fetch.");
                return Ok(());
            }
            let today = Local::now().date_naive();
            let start = fetch_window_start(today, days)?;
            let client = http_client()?;
            let n = fetch_rates(conn, &client, base, &targets, start, today)?;
            println!("Fetched {} FX rates via Frankfurter (ECB).", n);
        }
        Some(("list", _)) => {
            let data = list_rates(conn, 50)?
                .into_iter()
                .map(|r| vec![r.date.to_string(), r.base, r.quote, r.rate.to_string()])
                .collect();
            println!("{}", pretty_table(&["Date", "Base", "Quote", "Rate"], data));
        }
        _ => {}
    }
    Ok(())
}

/// First day of a `days`-long fetch window ending `today`.
pub fn fetch_window_start(today: NaiveDate, days: usize) -> Result<NaiveDate> {
    i64::try_from(days)
        .ok()
        .and_then(TimeDelta::try_days)
        .and_then(|span| today.checked_sub_signed(span))
        .ok_or_else(|| anyhow!("--days {} reaches past the earliest supported date", days))
}
