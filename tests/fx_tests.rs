// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use networth::commands::fx::fetch_window_start;
use networth::errors::NetWorthError;
use networth::fx::{FxRate, FxRates, add_rate, foreign_currencies, list_rates};
use networth::models::AccountKind;
use networth::service::NetWorthService;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    networth::db::init_schema(&conn).unwrap();
    conn
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn fx_triangulation_and_reciprocal() {
    let conn = setup();
    // USD->INR and USD->EUR available
    conn.execute(
        "INSERT INTO fx_rates(date,base,quote,rate) VALUES (?1,?2,?3,?4)",
        params!["2025-08-01", "USD", "INR", "83"],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO fx_rates(date,base,quote,rate) VALUES (?1,?2,?3,?4)",
        params!["2025-08-01", "USD", "EUR", "0.90"],
    )
    .unwrap();

    let rates = FxRates::load(&conn, "USD").unwrap();
    // 90 EUR -> USD = 90 / 0.90 = 100 USD; -> INR = 100 * 83 = 8300
    let res = rates
        .convert(day(2025, 8, 15), Decimal::new(9000, 2), "EUR", "INR")
        .unwrap();
    assert_eq!(format!("{:.2}", res.round_dp(2)), "8300.00");

    // INR -> USD using only USD->INR: 166 / 83 = 2
    let res2 = rates
        .convert(day(2025, 8, 15), Decimal::new(16600, 2), "INR", "USD")
        .unwrap();
    assert_eq!(format!("{:.2}", res2.round_dp(2)), "2.00");
}

#[test]
fn reciprocal_pair_is_used_when_hub_pair_missing() {
    let conn = setup();
    add_rate(
        &conn,
        &FxRate {
            date: day(2025, 1, 1),
            base: "gbp".into(),
            quote: "usd".into(),
            rate: Decimal::new(125, 2),
        },
    )
    .unwrap();
    let rates = FxRates::load(&conn, "USD").unwrap();
    // 1 GBP = 1.25 USD, so 125 USD = 100 GBP
    let out = rates
        .convert(day(2025, 3, 1), Decimal::new(125, 0), "USD", "GBP")
        .unwrap();
    assert_eq!(out.round_dp(2), Decimal::new(100, 0));
    // and the other way: 100 GBP = 125 USD
    let back = rates
        .convert(day(2025, 3, 1), Decimal::new(100, 0), "GBP", "USD")
        .unwrap();
    assert_eq!(back, Decimal::new(125, 0));
}

#[test]
fn lookups_use_closest_rate_on_or_before_date() {
    let conn = setup();
    for (date, rate) in [("2025-01-01", "0.80"), ("2025-02-01", "0.50")] {
        conn.execute(
            "INSERT INTO fx_rates(date,base,quote,rate) VALUES (?1,'USD','EUR',?2)",
            params![date, rate],
        )
        .unwrap();
    }
    let rates = FxRates::load(&conn, "USD").unwrap();
    let amt = Decimal::new(100, 0);
    assert_eq!(
        rates.convert(day(2025, 1, 20), amt, "USD", "EUR").unwrap(),
        Decimal::new(80, 0)
    );
    assert_eq!(
        rates.convert(day(2025, 2, 1), amt, "USD", "EUR").unwrap(),
        Decimal::new(50, 0)
    );
    // before any rate: left unconverted
    assert_eq!(rates.convert(day(2024, 12, 31), amt, "USD", "EUR").unwrap(), amt);
}

#[test]
fn add_rate_upserts_and_list_is_newest_first() {
    let conn = setup();
    let mut rate = FxRate {
        date: day(2025, 5, 1),
        base: "USD".into(),
        quote: "JPY".into(),
        rate: Decimal::new(150, 0),
    };
    add_rate(&conn, &rate).unwrap();
    rate.rate = Decimal::new(152, 0);
    add_rate(&conn, &rate).unwrap();
    rate.date = day(2025, 5, 2);
    add_rate(&conn, &rate).unwrap();

    let listed = list_rates(&conn, 10).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].date, day(2025, 5, 2));
    assert_eq!(listed[1].rate, Decimal::new(152, 0));
}

#[test]
fn foreign_currencies_skip_base() {
    let conn = setup();
    let svc = NetWorthService::new(&conn, "USD");
    svc.add_account("Brokerage", AccountKind::Asset, "USD").unwrap();
    svc.add_account("Flat", AccountKind::Asset, "eur").unwrap();
    svc.add_account("Mortgage", AccountKind::Liability, "EUR").unwrap();
    svc.add_account("Yen", AccountKind::Asset, "JPY").unwrap();
    assert_eq!(foreign_currencies(&conn, "USD").unwrap(), vec!["EUR", "JPY"]);
}

#[test]
fn conversion_overflow_is_an_error() {
    let conn = setup();
    conn.execute(
        "INSERT INTO fx_rates(date,base,quote,rate) VALUES ('2025-01-01','USD','JPY','150')",
        [],
    )
    .unwrap();
    let rates = FxRates::load(&conn, "USD").unwrap();
    let err = rates
        .convert(day(2025, 1, 2), Decimal::MAX, "USD", "JPY")
        .unwrap_err();
    assert!(matches!(err, NetWorthError::InvalidAmount(_)));
}

#[test]
fn fetch_window_rejects_spans_chrono_cannot_represent() {
    let today = day(2025, 3, 1);
    assert_eq!(fetch_window_start(today, 28).unwrap(), day(2025, 2, 1));
    assert!(fetch_window_start(today, usize::MAX).is_err());
    assert!(fetch_window_start(today, 1_000_000_000).is_err());
}
