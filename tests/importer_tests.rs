// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use networth::config::Config;
use networth::models::{AccountKind, TimeRange};
use networth::service::NetWorthService;
use networth::{cli, commands::importer, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO accounts(id,name,kind,currency) VALUES (1,'Checking','asset','USD')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO accounts(id,name,kind,currency) VALUES (2,'Visa','liability','USD')",
        [],
    )
    .unwrap();
    conn
}

fn csv_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,account,value\n{}", body).unwrap();
    file.flush().unwrap();
    file
}

fn run_import(conn: &mut Connection, path: &str) -> anyhow::Result<()> {
    let matches =
        cli::build_cli().get_matches_from(["networth", "import", "balances", "--path", path]);
    let cfg = Config::load(conn, PathBuf::from("nw.sqlite")).unwrap();
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, &cfg, import_m)
    } else {
        panic!("no import subcommand");
    }
}

fn balance_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM balances", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn importer_loads_rows_and_trims_fields() {
    let mut conn = base_conn();
    let file = csv_file("2025-02-03, Checking ,1200.50\n 2025-02-03 ,Visa, 310\n2025-02-10,Checking,1180");
    let padded = format!("  {}  ", file.path().to_str().unwrap());
    run_import(&mut conn, &padded).unwrap();

    assert_eq!(balance_count(&conn), 3);
    let value: String = conn
        .query_row(
            "SELECT value FROM balances WHERE account_id=2 AND date='2025-02-03'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(value, "310");
}

#[test]
fn importer_replaces_existing_balance_for_same_day() {
    let mut conn = base_conn();
    conn.execute(
        "INSERT INTO balances(account_id,date,value) VALUES (1,'2025-02-03','1.00')",
        [],
    )
    .unwrap();
    let file = csv_file("2025-02-03,Checking,99.99");
    run_import(&mut conn, file.path().to_str().unwrap()).unwrap();

    assert_eq!(balance_count(&conn), 1);
    let value: String = conn
        .query_row("SELECT value FROM balances", [], |r| r.get(0))
        .unwrap();
    assert_eq!(value, "99.99");
}

#[test]
fn importer_rejects_invalid_value() {
    let mut conn = base_conn();
    let file = csv_file("2025-02-03,Checking,abc");
    let err = run_import(&mut conn, file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Invalid value 'abc' for Checking"));
    assert_eq!(balance_count(&conn), 0);
}

#[test]
fn importer_rolls_back_on_unknown_account() {
    let mut conn = base_conn();
    let file = csv_file("2025-02-03,Checking,10\n2025-02-04,Brokerage,20");
    let err = run_import(&mut conn, file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Account 'Brokerage' not found"));
    assert_eq!(balance_count(&conn), 0);
}

#[test]
fn importer_reports_row_of_bad_date() {
    let mut conn = base_conn();
    let file = csv_file("2025-02-03,Checking,10\n03/02/2025,Checking,20");
    let err = run_import(&mut conn, file.path().to_str().unwrap()).unwrap_err();
    assert!(
        err.to_string()
            .contains("Invalid balance date '03/02/2025' on row 2")
    );
    assert_eq!(balance_count(&conn), 0);
}

#[test]
fn imported_balances_are_visible_to_the_service() {
    let mut conn = base_conn();
    let file = csv_file("2025-02-03,Checking,1000\n2025-02-03,Visa,250\n2025-02-05,Checking,1100");
    run_import(&mut conn, file.path().to_str().unwrap()).unwrap();

    let svc = NetWorthService::new(&conn, "USD");
    let rows = svc.list_balances(Some("Visa")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, AccountKind::Liability);
    assert_eq!(rows[0].value, Decimal::new(250, 0));

    let as_of = NaiveDate::from_ymd_opt(2025, 2, 5).unwrap();
    let snap = svc
        .fetch_snapshot(TimeRange::OneMonth, as_of)
        .unwrap();
    assert_eq!(snap.current_total, Decimal::new(850, 0));
}
