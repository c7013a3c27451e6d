// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use networth::commands::{balances, history::display_series, settings};
use networth::config::{self, Config};
use networth::models::{AccountKind, TimeRange};
use networth::service::NetWorthService;
use networth::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::path::PathBuf;

fn conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn global_flags_parse_after_subcommand() {
    let m = cli::build_cli().get_matches_from([
        "networth", "summary", "--range", "1Y", "--db", "/tmp/nw.sqlite", "-v",
    ]);
    assert_eq!(m.get_one::<String>("db").map(String::as_str), Some("/tmp/nw.sqlite"));
    assert!(m.get_flag("verbose"));
    let (name, sub) = m.subcommand().unwrap();
    assert_eq!(name, "summary");
    assert_eq!(sub.get_one::<String>("range").map(String::as_str), Some("1Y"));
}

#[test]
fn negative_balance_values_are_accepted() {
    let m = cli::build_cli().get_matches_from([
        "networth", "balance", "set", "--account", "Checking", "--date", "2024-01-01", "--value",
        "-42.10",
    ]);
    let (_, balance_m) = m.subcommand().unwrap();
    let (_, set_m) = balance_m.subcommand().unwrap();
    assert_eq!(set_m.get_one::<String>("value").map(String::as_str), Some("-42.10"));
}

#[test]
fn time_range_parsing_and_windows() {
    assert_eq!("6m".parse::<TimeRange>().unwrap(), TimeRange::SixMonths);
    assert_eq!(" all ".parse::<TimeRange>().unwrap(), TimeRange::All);
    assert!("2W".parse::<TimeRange>().is_err());
    assert_eq!(TimeRange::OneMonth.window_start(d(2024, 3, 31)), Some(d(2024, 2, 29)));
    assert_eq!(TimeRange::OneYear.window_start(d(2024, 2, 29)), Some(d(2023, 2, 28)));
    assert_eq!(TimeRange::All.window_start(d(2024, 2, 29)), None);
    assert_eq!(
        serde_json::to_string(&TimeRange::ThreeMonths).unwrap(),
        "\"3M\""
    );
}

#[test]
fn config_defaults_and_overrides() {
    let conn = conn();
    let cfg = Config::load(&conn, PathBuf::from("nw.sqlite")).unwrap();
    assert_eq!(cfg.base_currency, "USD");
    assert_eq!(cfg.default_range, TimeRange::SixMonths);

    config::set_base_currency(&conn, "eur").unwrap();
    let m = cli::build_cli().get_matches_from(["networth", "config", "set-range", "--range", "1y"]);
    let (_, config_m) = m.subcommand().unwrap();
    settings::handle(&conn, &cfg, config_m).unwrap();

    let cfg = Config::load(&conn, PathBuf::from("nw.sqlite")).unwrap();
    assert_eq!(cfg.base_currency, "EUR");
    assert_eq!(cfg.default_range, TimeRange::OneYear);
}

#[test]
fn corrupt_stored_range_is_an_error() {
    let conn = conn();
    config::set_setting(&conn, config::DEFAULT_RANGE_KEY, "fortnight").unwrap();
    assert!(Config::load(&conn, PathBuf::from("nw.sqlite")).is_err());
}

#[test]
fn balance_set_command_records_and_refreshes() {
    let conn = conn();
    let cfg = Config::load(&conn, PathBuf::from("nw.sqlite")).unwrap();
    let svc = NetWorthService::new(&conn, "USD");
    svc.add_account("Checking", AccountKind::Asset, "USD").unwrap();

    let m = cli::build_cli().get_matches_from([
        "networth", "balance", "set", "--account", "Checking", "--date", "2024-01-01", "--value",
        "250",
    ]);
    let (_, balance_m) = m.subcommand().unwrap();
    balances::handle(&conn, &cfg, balance_m).unwrap();

    let rows = svc.list_balances(None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value, Decimal::new(250, 0));
}

#[test]
fn display_series_picks_account_and_honours_raw() {
    let conn = conn();
    let svc = NetWorthService::new(&conn, "USD");
    svc.add_account("Loan", AccountKind::Liability, "USD").unwrap();
    for day in 1..=20 {
        svc.record_balance("Loan", d(2024, 1, day), Decimal::new(1000 - day as i64, 0))
            .unwrap();
    }
    let snap = svc.fetch_snapshot(TimeRange::SixMonths, d(2024, 1, 20)).unwrap();

    let raw = display_series(&snap, Some("Loan"), true).unwrap();
    assert_eq!(raw.len(), 20);
    assert_eq!(raw[0].value, Decimal::new(-999, 0));

    let sampled = display_series(&snap, Some("Loan"), false).unwrap();
    let dates: Vec<NaiveDate> = sampled.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![d(2024, 1, 1), d(2024, 1, 7), d(2024, 1, 14)]);

    assert!(display_series(&snap, Some("Nope"), false).is_err());
    assert_eq!(display_series(&snap, None, true).unwrap(), snap.history);
}
